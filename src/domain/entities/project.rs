use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    content_rules::{derive_short_description, parse_technologies, slugify_title},
    entities::{
        option_fields::OptionField,
        project_image::ProjectImage,
        validation::{
            validate_optional_short_description, validate_optional_slug,
            validate_optional_url_field, validate_short_description, validate_slug,
            validate_title, validate_url,
        },
    },
};

// ───── Classification ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    #[default]
    Web,
    Tools,
    #[sqlx(rename = "GUI")]
    #[serde(rename = "GUI")]
    Gui,
    Desktop,
    Automation,
    Api,
    Data,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 7] = [
        ProjectCategory::Web,
        ProjectCategory::Tools,
        ProjectCategory::Gui,
        ProjectCategory::Desktop,
        ProjectCategory::Automation,
        ProjectCategory::Api,
        ProjectCategory::Data,
    ];

    /// Stored value, also used as the `category` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "web",
            ProjectCategory::Tools => "tools",
            ProjectCategory::Gui => "GUI",
            ProjectCategory::Desktop => "desktop",
            ProjectCategory::Automation => "automation",
            ProjectCategory::Api => "api",
            ProjectCategory::Data => "data",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "Web Applications",
            ProjectCategory::Tools => "Tools & Utilities",
            ProjectCategory::Gui => "Python GUIs",
            ProjectCategory::Desktop => "Desktop Applications",
            ProjectCategory::Automation => "Automation Scripts",
            ProjectCategory::Api => "API Development",
            ProjectCategory::Data => "Data Analysis",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectCategory {
    type Err = String;

    /// Exact, case-sensitive match against the stored values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown project category: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    #[default]
    Completed,
    Archived,
    OnHold,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active Development",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Archived => "Archived",
            ProjectStatus::OnHold => "On Hold",
        }
    }
}

// ───── Database Models ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub slug_is_custom: bool,
    pub description: String,
    pub short_description: String,
    pub category: ProjectCategory,
    pub status: ProjectStatus,
    pub featured: bool,
    pub visible: bool,
    pub github_url: String,
    pub live_url: Option<String>,
    pub documentation_url: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub technologies: String,
    #[sqlx(rename = "display_order")]
    pub order: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn technologies_list(&self) -> Vec<String> {
        parse_technologies(&self.technologies)
    }

    pub fn has_live_demo(&self) -> bool {
        self.live_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    pub fn image_url(&self, media_url: &str) -> Option<String> {
        self.image.as_deref().map(|path| media_path_to_url(media_url, path))
    }

    pub fn thumbnail_url(&self, media_url: &str) -> Option<String> {
        self.thumbnail.as_deref().map(|path| media_path_to_url(media_url, path))
    }
}

/// Resolves a stored media path against the public media prefix. Absolute
/// URLs and rooted paths are returned untouched.
pub fn media_path_to_url(media_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}{}", media_url, path)
    }
}

/// Fully resolved column values for an insert or a full-row update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub title: String,
    pub slug: String,
    pub slug_is_custom: bool,
    pub description: String,
    pub short_description: String,
    pub category: ProjectCategory,
    pub status: ProjectStatus,
    pub featured: bool,
    pub visible: bool,
    pub github_url: String,
    pub live_url: Option<String>,
    pub documentation_url: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub technologies: String,
    pub order: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProjectInsert {
    /// Derives the slug from the title when none was assigned.
    /// Returns `true` when a derivation happened.
    pub fn ensure_slug(&mut self) -> bool {
        if !self.slug.trim().is_empty() {
            return false;
        }
        self.slug = slugify_title(&self.title);
        self.slug_is_custom = false;
        true
    }

    pub fn ensure_short_description(&mut self) {
        if self.short_description.trim().is_empty() {
            self.short_description = derive_short_description(&self.description);
        }
    }

    /// Applies both save-time derivations.
    pub fn prepare(&mut self) -> bool {
        self.ensure_short_description();
        self.ensure_slug()
    }
}

impl From<NewProjectRequest> for ProjectInsert {
    fn from(req: NewProjectRequest) -> Self {
        let slug = req.slug.map(|s| s.trim().to_string()).unwrap_or_default();
        ProjectInsert {
            slug_is_custom: !slug.is_empty(),
            slug,
            title: req.title.trim().to_string(),
            description: req.description,
            short_description: req.short_description.unwrap_or_default(),
            category: req.category,
            status: req.status,
            featured: req.featured,
            visible: req.visible,
            github_url: req.github_url,
            live_url: non_empty(req.live_url),
            documentation_url: non_empty(req.documentation_url),
            image: non_empty(req.image),
            thumbnail: non_empty(req.thumbnail),
            technologies: req.technologies,
            order: req.order,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

impl From<&Project> for ProjectInsert {
    fn from(project: &Project) -> Self {
        ProjectInsert {
            title: project.title.clone(),
            slug: project.slug.clone(),
            slug_is_custom: project.slug_is_custom,
            description: project.description.clone(),
            short_description: project.short_description.clone(),
            category: project.category,
            status: project.status,
            featured: project.featured,
            visible: project.visible,
            github_url: project.github_url.clone(),
            live_url: project.live_url.clone(),
            documentation_url: project.documentation_url.clone(),
            image: project.image.clone(),
            thumbnail: project.thumbnail.clone(),
            technologies: project.technologies.clone(),
            order: project.order,
            start_date: project.start_date,
            end_date: project.end_date,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn default_visible() -> bool {
    true
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: String,

    #[validate(custom(function = "validate_short_description"))]
    pub short_description: Option<String>,

    #[serde(default)]
    pub category: ProjectCategory,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(default)]
    pub featured: bool,

    #[serde(default = "default_visible")]
    pub visible: bool,

    #[validate(custom(function = "validate_url"))]
    pub github_url: String,

    #[validate(custom(function = "validate_url"))]
    pub live_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub documentation_url: Option<String>,

    pub image: Option<String>,
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub technologies: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Order cannot be negative"))]
    pub order: i32,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// PATCH payload. Nullable columns use [`OptionField`]; clearing `slug` or
/// `short_description` makes them derived again.
#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateProjectRequest {
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_optional_slug"))]
    pub slug: OptionField<String>,

    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_optional_short_description"))]
    pub short_description: OptionField<String>,

    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
    pub featured: Option<bool>,
    pub visible: Option<bool>,

    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub live_url: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub documentation_url: OptionField<String>,

    pub image: OptionField<String>,
    pub thumbnail: OptionField<String>,
    pub technologies: Option<String>,

    #[validate(range(min = 0, message = "Order cannot be negative"))]
    pub order: Option<i32>,

    pub start_date: OptionField<NaiveDate>,
    pub end_date: OptionField<NaiveDate>,
}

impl UpdateProjectRequest {
    /// Merges the patch into the stored row. Slug handling is left to the
    /// caller, which needs the repository to resolve collisions.
    pub fn apply_to(self, project: &Project) -> ProjectInsert {
        let mut insert = ProjectInsert::from(project);

        if let Some(title) = self.title {
            insert.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            insert.description = description;
        }
        match self.short_description {
            OptionField::Unchanged => {}
            OptionField::SetToNull => insert.short_description.clear(),
            OptionField::SetToValue(text) => insert.short_description = text,
        }
        if let Some(category) = self.category {
            insert.category = category;
        }
        if let Some(status) = self.status {
            insert.status = status;
        }
        if let Some(featured) = self.featured {
            insert.featured = featured;
        }
        if let Some(visible) = self.visible {
            insert.visible = visible;
        }
        if let Some(github_url) = self.github_url {
            insert.github_url = github_url;
        }
        insert.live_url = self.live_url.apply_to_text(insert.live_url);
        insert.documentation_url = self.documentation_url.apply_to_text(insert.documentation_url);
        insert.image = self.image.apply_to_text(insert.image);
        insert.thumbnail = self.thumbnail.apply_to_text(insert.thumbnail);
        if let Some(technologies) = self.technologies {
            insert.technologies = technologies;
        }
        if let Some(order) = self.order {
            insert.order = order;
        }
        insert.start_date = self.start_date.apply_to(insert.start_date);
        insert.end_date = self.end_date.apply_to(insert.end_date);

        insert
    }
}

// ───── Query Filters ────────────────────────────────────────────────

/// Public listing filter parsed from the `category` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Featured,
    Category(ProjectCategory),
    /// A value that names no category; matches nothing.
    Unmatched,
}

impl CategoryFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some("featured") => CategoryFilter::Featured,
            Some(other) => other
                .parse::<ProjectCategory>()
                .map(CategoryFilter::Category)
                .unwrap_or(CategoryFilter::Unmatched),
        }
    }

    /// Value echoed back to templates for highlighting the active tab.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            CategoryFilter::All | CategoryFilter::Unmatched => "all",
            CategoryFilter::Featured => "featured",
            CategoryFilter::Category(c) => c.as_str(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Admin listing filter; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListFilter {
    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
    pub featured: Option<bool>,
    pub visible: Option<bool>,
    pub search: Option<String>,
}

impl ProjectListFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchUpdateRequest {
    #[validate(length(min = 1, message = "At least one id is required"))]
    pub ids: Vec<Uuid>,
    pub value: bool,
}

#[derive(Debug, Serialize)]
pub struct BatchUpdateResponse {
    pub updated: u64,
}

// ───── API Response Models ──────────────────────────────────────────

/// Public JSON shape of a project.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectProjection {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub github: String,
    pub live: Option<String>,
    pub category: ProjectCategory,
    pub featured: bool,
    pub image: Option<String>,
    pub slug: String,
}

impl ProjectProjection {
    pub fn from_project(project: &Project, media_url: &str) -> Self {
        ProjectProjection {
            title: project.title.clone(),
            description: project.description.clone(),
            tags: project.technologies_list(),
            github: project.github_url.clone(),
            live: project.live_url.clone(),
            category: project.category,
            featured: project.featured,
            image: project.image_url(media_url),
            slug: project.slug.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectsApiResponse {
    pub projects: Vec<ProjectProjection>,
}

/// Everything the detail page shows for one project.
#[derive(Debug, Clone)]
pub struct ProjectDetail {
    pub project: Project,
    pub gallery: Vec<ProjectImage>,
    pub related: Vec<Project>,
}
