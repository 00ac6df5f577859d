use async_trait::async_trait;
use sqlx::{self, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::{
        project::{CategoryFilter, Project, ProjectInsert, ProjectListFilter},
        project_image::{NewProjectImageRequest, ProjectImage},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Listing order shared by every project query.
const PROJECT_ORDER_BY: &str = " ORDER BY display_order ASC, featured DESC, created_at DESC";
const SLUG_CONSTRAINT: &str = "projects_slug_key";

#[async_trait]
pub trait ProjectRepository: Send + Sync {
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

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(SLUG_CONSTRAINT) {
            return AppError::Conflict("Slug already exists".into());
        }
    }
    AppError::from(e)
}

fn push_category_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &CategoryFilter) {
    match filter {
        CategoryFilter::All | CategoryFilter::Unmatched => {}
        CategoryFilter::Featured => {
            builder.push(" AND featured = TRUE");
        }
        CategoryFilter::Category(category) => {
            builder.push(" AND category = ").push_bind(*category);
        }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, slug, slug_is_custom, description, short_description,
                category, status, featured, visible, github_url, live_url,
                documentation_url, image, thumbnail, technologies, display_order,
                start_date, end_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.slug)
        .bind(project.slug_is_custom)
        .bind(&project.description)
        .bind(&project.short_description)
        .bind(project.category)
        .bind(project.status)
        .bind(project.featured)
        .bind(project.visible)
        .bind(&project.github_url)
        .bind(&project.live_url)
        .bind(&project.documentation_url)
        .bind(&project.image)
        .bind(&project.thumbnail)
        .bind(&project.technologies)
        .bind(project.order)
        .bind(project.start_date)
        .bind(project.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(created)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    async fn get_visible_project_by_slug(&self, slug: &str) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE slug = $1 AND visible = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn find_project_by_title(&self, title: &str) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE title = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    async fn list_featured_projects(&self, limit: i64) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new(
            "SELECT * FROM projects WHERE visible = TRUE AND featured = TRUE",
        );
        builder.push(PROJECT_ORDER_BY);
        builder.push(" LIMIT ").push_bind(limit);

        let projects = builder.build_query_as::<Project>().fetch_all(&self.pool).await?;
        Ok(projects)
    }

    async fn list_visible_projects(&self, filter: &CategoryFilter) -> Result<Vec<Project>, AppError> {
        if *filter == CategoryFilter::Unmatched {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::new("SELECT * FROM projects WHERE visible = TRUE");
        push_category_filter(&mut builder, filter);
        builder.push(PROJECT_ORDER_BY);

        let projects = builder.build_query_as::<Project>().fetch_all(&self.pool).await?;
        Ok(projects)
    }

    async fn list_related_projects(&self, project: &Project, limit: i64) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects WHERE visible = TRUE");
        builder.push(" AND category = ").push_bind(project.category);
        builder.push(" AND id <> ").push_bind(project.id);
        builder.push(PROJECT_ORDER_BY);
        builder.push(" LIMIT ").push_bind(limit);

        let projects = builder.build_query_as::<Project>().fetch_all(&self.pool).await?;
        Ok(projects)
    }

    async fn list_projects(&self, filter: &ProjectListFilter) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects WHERE TRUE");

        if let Some(category) = filter.category {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(featured) = filter.featured {
            builder.push(" AND featured = ").push_bind(featured);
        }
        if let Some(visible) = filter.visible {
            builder.push(" AND visible = ").push_bind(visible);
        }
        if let Some(term) = filter.search_term() {
            let pattern = format!("%{}%", term);
            builder.push(" AND (title ILIKE ").push_bind(pattern.clone());
            builder.push(" OR description ILIKE ").push_bind(pattern.clone());
            builder.push(" OR technologies ILIKE ").push_bind(pattern);
            builder.push(")");
        }
        builder.push(PROJECT_ORDER_BY);

        let projects = builder.build_query_as::<Project>().fetch_all(&self.pool).await?;
        Ok(projects)
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM projects
                WHERE slug = $1
                  AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Project, AppError> {
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                title = $1,
                slug = $2,
                slug_is_custom = $3,
                description = $4,
                short_description = $5,
                category = $6,
                status = $7,
                featured = $8,
                visible = $9,
                github_url = $10,
                live_url = $11,
                documentation_url = $12,
                image = $13,
                thumbnail = $14,
                technologies = $15,
                display_order = $16,
                start_date = $17,
                end_date = $18,
                updated_at = NOW()
            WHERE id = $19
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.slug)
        .bind(project.slug_is_custom)
        .bind(&project.description)
        .bind(&project.short_description)
        .bind(project.category)
        .bind(project.status)
        .bind(project.featured)
        .bind(project.visible)
        .bind(&project.github_url)
        .bind(&project.live_url)
        .bind(&project.documentation_url)
        .bind(&project.image)
        .bind(&project.thumbnail)
        .bind(&project.technologies)
        .bind(project.order)
        .bind(project.start_date)
        .bind(project.end_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        updated.ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }

    async fn set_featured(&self, ids: &[Uuid], featured: bool) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE projects SET featured = $1, updated_at = NOW() WHERE id = ANY($2)",
        )
        .bind(featured)
        .bind(ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn set_visible(&self, ids: &[Uuid], visible: bool) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE projects SET visible = $1, updated_at = NOW() WHERE id = ANY($2)",
        )
        .bind(visible)
        .bind(ids)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn add_project_image(&self, project_id: &Uuid, image: &NewProjectImageRequest) -> Result<ProjectImage, AppError> {
        let created = sqlx::query_as::<_, ProjectImage>(
            r#"
            INSERT INTO project_images (project_id, image, caption, display_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(project_id)
        .bind(&image.image)
        .bind(&image.caption)
        .bind(image.order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::NotFound("Project not found".into()),
            other => other,
        })?;

        Ok(created)
    }

    async fn list_project_images(&self, project_id: &Uuid) -> Result<Vec<ProjectImage>, AppError> {
        let images = sqlx::query_as::<_, ProjectImage>(
            "SELECT * FROM project_images WHERE project_id = $1 ORDER BY display_order ASC, created_at ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    async fn delete_project_image(&self, image_id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM project_images WHERE id = $1")
            .bind(image_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project image not found".into()));
        }

        Ok(())
    }
}
