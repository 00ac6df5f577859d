use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::{
    entities::technology::{
        NewTechnologyRequest, Technology, TechnologyInsert, TechnologyListFilter, UpdateTechnologyRequest,
    },
    errors::AppError,
    repositories::technology::TechnologyRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct TechnologyHandler<R>
where
    R: TechnologyRepository + ?Sized,
{
    pub technology_repo: Arc<R>,
}

impl<R> TechnologyHandler<R>
where
    R: TechnologyRepository + ?Sized,
{
    pub fn new(technology_repo: Arc<R>) -> Self {
        TechnologyHandler { technology_repo }
    }

    /// Skills listing, alphabetical by name.
    pub async fn list_technologies(&self) -> Result<Vec<Technology>, AppError> {
        self.technology_repo.list_technologies(&TechnologyListFilter::default()).await
    }

    pub async fn search_technologies(&self, filter: &TechnologyListFilter) -> Result<Vec<Technology>, AppError> {
        self.technology_repo.list_technologies(filter).await
    }

    pub async fn get_technology(&self, id: &str) -> Result<Technology, AppError> {
        let valid_id = valid_uuid(id)?;
        self.technology_repo
            .get_technology_by_id(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Technology not found".into()))
    }

    pub async fn create_technology(&self, request: NewTechnologyRequest) -> Result<Technology, AppError> {
        request.validate()?;

        let insert = TechnologyInsert::from(request);
        if self.technology_repo.find_technology_by_name(&insert.name).await?.is_some() {
            return Err(AppError::Conflict("Technology with this name already exists".into()));
        }

        let created = self.technology_repo.create_technology(&insert).await?;
        info!(technology = %created.name, "Technology created");
        Ok(created)
    }

    pub async fn update_technology(
        &self,
        id: &str,
        request: UpdateTechnologyRequest,
    ) -> Result<Technology, AppError> {
        request.validate()?;

        let current = self.get_technology(id).await?;
        let insert = request.apply_to(&current);

        if insert.name != current.name {
            if let Some(other) = self.technology_repo.find_technology_by_name(&insert.name).await? {
                if other.id != current.id {
                    return Err(AppError::Conflict("Technology with this name already exists".into()));
                }
            }
        }

        self.technology_repo.update_technology(&current.id, &insert).await
    }

    pub async fn delete_technology(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.technology_repo.delete_technology(&valid_id).await
    }

    /// Seeding helper keyed on the unique name.
    pub async fn get_or_create(&self, insert: TechnologyInsert) -> Result<(Technology, bool), AppError> {
        if let Some(existing) = self.technology_repo.find_technology_by_name(&insert.name).await? {
            return Ok((existing, false));
        }
        let created = self.technology_repo.create_technology(&insert).await?;
        Ok((created, true))
    }
}
