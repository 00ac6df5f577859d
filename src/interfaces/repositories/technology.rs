use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::technology::{Technology, TechnologyInsert, TechnologyListFilter},
    errors::AppError,
    repositories::sqlx_repo::SqlxTechnologyRepo,
};

const NAME_CONSTRAINT: &str = "technologies_name_key";

#[async_trait]
pub trait TechnologyRepository: Send + Sync {
    async fn create_technology(&self, technology: &TechnologyInsert) -> Result<Technology, AppError>;
    async fn get_technology_by_id(&self, id: &Uuid) -> Result<Option<Technology>, AppError>;
    async fn find_technology_by_name(&self, name: &str) -> Result<Option<Technology>, AppError>;
    /// Technologies matching `filter`, alphabetical by name.
    async fn list_technologies(&self, filter: &TechnologyListFilter) -> Result<Vec<Technology>, AppError>;
    async fn update_technology(&self, id: &Uuid, technology: &TechnologyInsert) -> Result<Technology, AppError>;
    async fn delete_technology(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxTechnologyRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxTechnologyRepo { pool }
    }
}

fn map_name_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(NAME_CONSTRAINT) {
            return AppError::Conflict("Technology with this name already exists".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
impl TechnologyRepository for SqlxTechnologyRepo {
    async fn create_technology(&self, technology: &TechnologyInsert) -> Result<Technology, AppError> {
        let created = sqlx::query_as::<_, Technology>(
            r#"
            INSERT INTO technologies (name, category, icon, color, website)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&technology.name)
        .bind(technology.category)
        .bind(&technology.icon)
        .bind(&technology.color)
        .bind(&technology.website)
        .fetch_one(&self.pool)
        .await
        .map_err(map_name_conflict)?;

        Ok(created)
    }

    async fn get_technology_by_id(&self, id: &Uuid) -> Result<Option<Technology>, AppError> {
        let technology = sqlx::query_as::<_, Technology>("SELECT * FROM technologies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(technology)
    }

    async fn find_technology_by_name(&self, name: &str) -> Result<Option<Technology>, AppError> {
        let technology = sqlx::query_as::<_, Technology>("SELECT * FROM technologies WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(technology)
    }

    async fn list_technologies(&self, filter: &TechnologyListFilter) -> Result<Vec<Technology>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM technologies WHERE TRUE");

        if let Some(category) = filter.category {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(term) = filter.search_term() {
            builder.push(" AND name ILIKE ").push_bind(format!("%{}%", term));
        }
        builder.push(" ORDER BY name ASC");

        let technologies = builder.build_query_as::<Technology>().fetch_all(&self.pool).await?;
        Ok(technologies)
    }

    async fn update_technology(&self, id: &Uuid, technology: &TechnologyInsert) -> Result<Technology, AppError> {
        let updated = sqlx::query_as::<_, Technology>(
            r#"
            UPDATE technologies SET
                name = $1,
                category = $2,
                icon = $3,
                color = $4,
                website = $5,
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&technology.name)
        .bind(technology.category)
        .bind(&technology.icon)
        .bind(&technology.color)
        .bind(&technology.website)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_name_conflict)?;

        updated.ok_or_else(|| AppError::NotFound("Technology not found".into()))
    }

    async fn delete_technology(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM technologies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Technology not found".into()));
        }

        Ok(())
    }
}
