use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{HOME_FEATURED_LIMIT, RELATED_PROJECTS_LIMIT},
    content_rules::slug_candidate,
    entities::{
        option_fields::OptionField,
        project::{
            BatchUpdateRequest, BatchUpdateResponse, CategoryFilter, NewProjectRequest, Project,
            ProjectDetail, ProjectInsert, ProjectListFilter, ProjectProjection, ProjectsApiResponse,
            UpdateProjectRequest,
        },
        project_image::{NewProjectImageRequest, ProjectImage},
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

/// Upper bound on `-N` suffixes tried for a derived slug.
const MAX_SLUG_ATTEMPTS: u32 = 1_000;

pub struct ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub project_repo: Arc<R>,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository + ?Sized,
{
    pub fn new(project_repo: Arc<R>) -> Self {
        ProjectHandler { project_repo }
    }

    // ───── Public reads ─────────────────────────────────────────────

    /// Featured, visible projects for the home page.
    pub async fn list_featured(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_featured_projects(HOME_FEATURED_LIMIT).await
    }

    pub async fn list_visible(&self, filter: &CategoryFilter) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_visible_projects(filter).await
    }

    pub async fn api_projects(
        &self,
        filter: &CategoryFilter,
        media_url: &str,
    ) -> Result<ProjectsApiResponse, AppError> {
        let projects = self.list_visible(filter).await?;
        Ok(ProjectsApiResponse {
            projects: projects
                .iter()
                .map(|p| ProjectProjection::from_project(p, media_url))
                .collect(),
        })
    }

    /// A visible project with its gallery and up to three related projects.
    pub async fn get_visible_detail(&self, slug: &str) -> Result<ProjectDetail, AppError> {
        let project = self
            .project_repo
            .get_visible_project_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        let gallery = self.project_repo.list_project_images(&project.id).await?;
        let related = self
            .project_repo
            .list_related_projects(&project, RELATED_PROJECTS_LIMIT)
            .await?;

        Ok(ProjectDetail { project, gallery, related })
    }

    // ───── Admin curation ───────────────────────────────────────────

    pub async fn list_projects(&self, filter: &ProjectListFilter) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects(filter).await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        self.find_project(&valid_id).await
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        request.validate()?;

        let mut insert = ProjectInsert::from(request);
        check_date_range(&insert)?;
        self.save_new(&mut insert).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_project(
        &self,
        id: &str,
        mut request: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        request.validate()?;

        let valid_id = valid_uuid(id)?;
        let current = self.find_project(&valid_id).await?;

        let title_changed = request
            .title
            .as_deref()
            .is_some_and(|t| t.trim() != current.title);
        let slug_patch = std::mem::take(&mut request.slug);

        let mut insert = request.apply_to(&current);
        match slug_patch {
            OptionField::SetToValue(slug) if !slug.trim().is_empty() => {
                insert.slug = slug.trim().to_string();
                insert.slug_is_custom = true;
            }
            OptionField::SetToValue(_) | OptionField::SetToNull => insert.slug.clear(),
            OptionField::Unchanged => {
                if title_changed && !current.slug_is_custom {
                    insert.slug.clear();
                }
            }
        }
        check_date_range(&insert)?;

        insert.ensure_short_description();
        if insert.ensure_slug() {
            self.assign_unique_slug(&mut insert, Some(current.id)).await?;
        } else if insert.slug != current.slug {
            self.ensure_slug_available(&insert.slug, Some(current.id)).await?;
        }

        let updated = self.project_repo.update_project(&current.id, &insert).await?;
        info!(project_id = %updated.id, slug = %updated.slug, "Project updated");
        Ok(updated)
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.delete_project(&valid_id).await
    }

    pub async fn set_featured(&self, request: BatchUpdateRequest) -> Result<BatchUpdateResponse, AppError> {
        request.validate()?;
        let updated = self.project_repo.set_featured(&request.ids, request.value).await?;
        info!(updated, featured = request.value, "Batch featured update");
        Ok(BatchUpdateResponse { updated })
    }

    pub async fn set_visible(&self, request: BatchUpdateRequest) -> Result<BatchUpdateResponse, AppError> {
        request.validate()?;
        let updated = self.project_repo.set_visible(&request.ids, request.value).await?;
        info!(updated, visible = request.value, "Batch visibility update");
        Ok(BatchUpdateResponse { updated })
    }

    pub async fn add_image(
        &self,
        project_id: &str,
        request: NewProjectImageRequest,
    ) -> Result<ProjectImage, AppError> {
        request.validate()?;
        let project = self.get_project(project_id).await?;
        self.project_repo.add_project_image(&project.id, &request).await
    }

    pub async fn list_images(&self, project_id: &str) -> Result<Vec<ProjectImage>, AppError> {
        let project = self.get_project(project_id).await?;
        self.project_repo.list_project_images(&project.id).await
    }

    pub async fn delete_image(&self, image_id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(image_id)?;
        self.project_repo.delete_project_image(&valid_id).await
    }

    /// Looks a project up by title and creates it when missing.
    /// Returns the row and whether it was created.
    pub async fn get_or_create(&self, mut insert: ProjectInsert) -> Result<(Project, bool), AppError> {
        if let Some(existing) = self.project_repo.find_project_by_title(&insert.title).await? {
            return Ok((existing, false));
        }
        let created = self.save_new(&mut insert).await?;
        Ok((created, true))
    }

    // ───── Helpers ──────────────────────────────────────────────────

    async fn find_project(&self, id: &Uuid) -> Result<Project, AppError> {
        self.project_repo
            .get_project_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn save_new(&self, insert: &mut ProjectInsert) -> Result<Project, AppError> {
        insert.ensure_short_description();
        if insert.ensure_slug() {
            self.assign_unique_slug(insert, None).await?;
        } else {
            self.ensure_slug_available(&insert.slug, None).await?;
        }

        let created = self.project_repo.create_project(insert).await?;
        info!(project_id = %created.id, slug = %created.slug, "Project created");
        Ok(created)
    }

    async fn ensure_slug_available(&self, slug: &str, exclude: Option<Uuid>) -> Result<(), AppError> {
        if self.project_repo.slug_exists(slug, exclude).await? {
            return Err(AppError::Conflict(format!("Slug '{}' is already in use", slug)));
        }
        Ok(())
    }

    /// Appends `-2`, `-3`, ... to a derived slug until no other row uses it.
    async fn assign_unique_slug(&self, insert: &mut ProjectInsert, exclude: Option<Uuid>) -> Result<(), AppError> {
        let base = insert.slug.clone();
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let candidate = slug_candidate(&base, attempt);
            if !self.project_repo.slug_exists(&candidate, exclude).await? {
                insert.slug = candidate;
                return Ok(());
            }
        }
        Err(AppError::Conflict(format!("No free slug left for '{}'", base)))
    }
}

fn check_date_range(insert: &ProjectInsert) -> Result<(), AppError> {
    match (insert.start_date, insert.end_date) {
        (Some(start), Some(end)) if end < start => Err(AppError::InvalidInput(
            "end_date cannot be before start_date".into(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::{fixtures::project, ProjectCategory};
    use async_trait::async_trait;
    use mockall::{mock, predicate::eq};

    mock! {
        pub ProjectRepo {}

        #[async_trait]
        impl ProjectRepository for ProjectRepo {
            async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
            async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError>;
            async fn get_visible_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError>;
            async fn find_project_by_title(&self, title: &str) -> Result<Option<Project>, AppError>;
            async fn list_featured_projects(&self, limit: i64) -> Result<Vec<Project>, AppError>;
            async fn list_visible_projects(&self, filter: &CategoryFilter) -> Result<Vec<Project>, AppError>;
            async fn list_related_projects(&self, project: &Project, limit: i64) -> Result<Vec<Project>, AppError>;
            async fn list_projects(&self, filter: &ProjectListFilter) -> Result<Vec<Project>, AppError>;
            async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError>;
            async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Project, AppError>;
            async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
            async fn set_featured(&self, ids: &[Uuid], featured: bool) -> Result<u64, AppError>;
            async fn set_visible(&self, ids: &[Uuid], visible: bool) -> Result<u64, AppError>;
            async fn add_project_image(&self, project_id: &Uuid, image: &NewProjectImageRequest) -> Result<ProjectImage, AppError>;
            async fn list_project_images(&self, project_id: &Uuid) -> Result<Vec<ProjectImage>, AppError>;
            async fn delete_project_image(&self, image_id: &Uuid) -> Result<(), AppError>;
        }
    }

    fn created_from(insert: &ProjectInsert) -> Project {
        let mut row = project(&insert.title, insert.category);
        row.slug = insert.slug.clone();
        row.slug_is_custom = insert.slug_is_custom;
        row.short_description = insert.short_description.clone();
        row
    }

    fn new_request(title: &str, slug: Option<&str>) -> NewProjectRequest {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "slug": slug,
            "description": "Automates stock counts",
            "github_url": "https://github.com/Dimeji-G/inventory",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn derived_slug_gets_numeric_suffix_on_collision() {
        let mut repo = MockProjectRepo::new();
        repo.expect_slug_exists()
            .with(eq("inventory-automation-system"), eq(None))
            .returning(|_, _| Ok(true));
        repo.expect_slug_exists()
            .with(eq("inventory-automation-system-2"), eq(None))
            .returning(|_, _| Ok(false));
        repo.expect_create_project()
            .times(1)
            .returning(|insert| Ok(created_from(insert)));

        let handler = ProjectHandler::new(Arc::new(repo));
        let created = handler
            .create_project(new_request("Inventory Automation System", None))
            .await
            .unwrap();

        assert_eq!(created.slug, "inventory-automation-system-2");
        assert!(!created.slug_is_custom);
        assert_eq!(created.short_description, "Automates stock counts");
    }

    #[tokio::test]
    async fn transliterated_title_yields_a_slug_that_fits_the_column() {
        use crate::entities::validation::MAX_SLUG_LENGTH;

        let mut repo = MockProjectRepo::new();
        repo.expect_slug_exists()
            .times(2)
            .returning(|slug, _| Ok(!slug.ends_with("-2")));
        repo.expect_create_project()
            .times(1)
            .returning(|insert| Ok(created_from(insert)));

        let handler = ProjectHandler::new(Arc::new(repo));
        let created = handler
            .create_project(new_request(&"ß".repeat(200), None))
            .await
            .unwrap();

        assert!(created.slug.len() <= MAX_SLUG_LENGTH);
        assert!(created.slug.ends_with("-2"));
    }

    #[tokio::test]
    async fn explicit_slug_collision_is_a_conflict() {
        let mut repo = MockProjectRepo::new();
        repo.expect_slug_exists().returning(|_, _| Ok(true));
        repo.expect_create_project().never();

        let handler = ProjectHandler::new(Arc::new(repo));
        let err = handler
            .create_project(new_request("Inventory", Some("inventory")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn title_change_rederives_a_derived_slug() {
        let current = project("Flashy", ProjectCategory::Web);
        let id = current.id;

        let mut repo = MockProjectRepo::new();
        let stored = current.clone();
        repo.expect_get_project_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_slug_exists()
            .with(eq("flashy-cards"), eq(Some(id)))
            .returning(|_, _| Ok(false));
        repo.expect_update_project()
            .times(1)
            .returning(|_, insert| Ok(created_from(insert)));

        let handler = ProjectHandler::new(Arc::new(repo));
        let patch: UpdateProjectRequest =
            serde_json::from_value(serde_json::json!({"title": "Flashy Cards"})).unwrap();
        let updated = handler.update_project(&id.to_string(), patch).await.unwrap();

        assert_eq!(updated.slug, "flashy-cards");
    }

    #[tokio::test]
    async fn title_change_keeps_a_custom_slug() {
        let mut current = project("Suncore", ProjectCategory::Tools);
        current.slug = "suncore-audio".into();
        current.slug_is_custom = true;
        let id = current.id;

        let mut repo = MockProjectRepo::new();
        let stored = current.clone();
        repo.expect_get_project_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_slug_exists().never();
        repo.expect_update_project()
            .returning(|_, insert| Ok(created_from(insert)));

        let handler = ProjectHandler::new(Arc::new(repo));
        let patch: UpdateProjectRequest =
            serde_json::from_value(serde_json::json!({"title": "Suncore Studio"})).unwrap();
        let updated = handler.update_project(&id.to_string(), patch).await.unwrap();

        assert_eq!(updated.slug, "suncore-audio");
    }

    #[tokio::test]
    async fn missing_or_hidden_slug_is_not_found() {
        let mut repo = MockProjectRepo::new();
        repo.expect_get_visible_project_by_slug().returning(|_| Ok(None));

        let handler = ProjectHandler::new(Arc::new(repo));
        let err = handler.get_visible_detail("hidden-project").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn detail_asks_for_three_related_projects() {
        let shown = project("Suncore", ProjectCategory::Tools);
        let returned = shown.clone();

        let mut repo = MockProjectRepo::new();
        repo.expect_get_visible_project_by_slug()
            .with(eq("suncore"))
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_list_project_images().returning(|_| Ok(vec![]));
        repo.expect_list_related_projects()
            .withf(|p, limit| p.slug == "suncore" && *limit == 3)
            .returning(|_, _| Ok(vec![project("Flashy", ProjectCategory::Tools)]));

        let handler = ProjectHandler::new(Arc::new(repo));
        let detail = handler.get_visible_detail("suncore").await.unwrap();

        assert_eq!(detail.project.id, shown.id);
        assert_eq!(detail.related.len(), 1);
    }

    #[tokio::test]
    async fn inverted_date_range_is_rejected() {
        let repo = MockProjectRepo::new();
        let handler = ProjectHandler::new(Arc::new(repo));

        let request: NewProjectRequest = serde_json::from_value(serde_json::json!({
            "title": "Data Analysis Dashboard",
            "description": "Charts",
            "github_url": "https://github.com/Dimeji-G/dashboard",
            "start_date": "2024-05-01",
            "end_date": "2024-01-01",
        }))
        .unwrap();

        let err = handler.create_project(request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_touching_the_store() {
        let mut repo = MockProjectRepo::new();
        repo.expect_set_featured().never();

        let handler = ProjectHandler::new(Arc::new(repo));
        let err = handler
            .set_featured(BatchUpdateRequest { ids: vec![], value: true })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
