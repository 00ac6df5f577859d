use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::{
    option_fields::OptionField,
    validation::{validate_hex_color, validate_optional_color_field, validate_optional_url_field, validate_url},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "technology_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TechnologyCategory {
    #[default]
    Language,
    Framework,
    Library,
    Database,
    Tool,
    Platform,
    Service,
}

impl TechnologyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TechnologyCategory::Language => "Programming Language",
            TechnologyCategory::Framework => "Framework",
            TechnologyCategory::Library => "Library",
            TechnologyCategory::Database => "Database",
            TechnologyCategory::Tool => "Tool",
            TechnologyCategory::Platform => "Platform",
            TechnologyCategory::Service => "Service",
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Technology {
    pub id: Uuid,
    pub name: String,
    pub category: TechnologyCategory,
    /// Font Awesome class, e.g. `fab fa-python`.
    pub icon: Option<String>,
    pub color: Option<String>,
    pub website: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TechnologyInsert {
    pub name: String,
    pub category: TechnologyCategory,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewTechnologyRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    pub category: TechnologyCategory,

    #[validate(length(max = 100, message = "Icon must be at most 100 characters"))]
    pub icon: Option<String>,

    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub website: Option<String>,
}

impl From<NewTechnologyRequest> for TechnologyInsert {
    fn from(req: NewTechnologyRequest) -> Self {
        TechnologyInsert {
            name: req.name.trim().to_string(),
            category: req.category,
            icon: req.icon.filter(|s| !s.trim().is_empty()),
            color: req.color.filter(|s| !s.trim().is_empty()),
            website: req.website.filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateTechnologyRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    pub category: Option<TechnologyCategory>,

    pub icon: OptionField<String>,

    #[validate(custom(function = "validate_optional_color_field"))]
    pub color: OptionField<String>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub website: OptionField<String>,
}

impl UpdateTechnologyRequest {
    pub fn apply_to(self, current: &Technology) -> TechnologyInsert {
        TechnologyInsert {
            name: self
                .name
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| current.name.clone()),
            category: self.category.unwrap_or(current.category),
            icon: self.icon.apply_to_text(current.icon.clone()),
            color: self.color.apply_to_text(current.color.clone()),
            website: self.website.apply_to_text(current.website.clone()),
        }
    }
}

/// Admin listing filter; `search` matches the name case-insensitively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TechnologyListFilter {
    pub category: Option<TechnologyCategory>,
    pub search: Option<String>,
}

impl TechnologyListFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_checks_color_and_website() {
        let req: NewTechnologyRequest = serde_json::from_value(serde_json::json!({
            "name": "PostgreSQL",
            "category": "database",
            "color": "336791",
            "website": "postgresql.org",
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("color"));
        assert!(errors.field_errors().contains_key("website"));
    }

    #[test]
    fn patch_keeps_unlisted_fields() {
        let now = Utc::now();
        let current = Technology {
            id: Uuid::new_v4(),
            name: "React".into(),
            category: TechnologyCategory::Framework,
            icon: Some("fab fa-react".into()),
            color: Some("#61dafb".into()),
            website: None,
            created_at: now,
            updated_at: now,
        };

        let patch: UpdateTechnologyRequest =
            serde_json::from_value(serde_json::json!({"category": "library", "icon": null})).unwrap();
        let merged = patch.apply_to(&current);

        assert_eq!(merged.name, "React");
        assert_eq!(merged.category, TechnologyCategory::Library);
        assert_eq!(merged.icon, None);
        assert_eq!(merged.color.as_deref(), Some("#61dafb"));
    }

    #[test]
    fn list_filter_parses_category_and_ignores_blank_search() {
        let filter: TechnologyListFilter =
            serde_json::from_value(serde_json::json!({"category": "framework", "search": "  "})).unwrap();
        assert_eq!(filter.category, Some(TechnologyCategory::Framework));
        assert_eq!(filter.search_term(), None);
    }
}
