use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::technology::{NewTechnologyRequest, TechnologyListFilter, UpdateTechnologyRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state, data))]
pub async fn create_technology(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewTechnologyRequest>,
) -> Result<impl Responder, AppError> {
    let technology = state
        .technology_handler
        .create_technology(data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(technology))
}

#[instrument(skip(_claims, state, query))]
pub async fn list_technologies(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<TechnologyListFilter>,
) -> Result<impl Responder, AppError> {
    let technologies = state.technology_handler.search_technologies(&query).await?;
    Ok(HttpResponse::Ok().json(technologies))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_technology(
    _claims: AdminClaims,
    technology_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateTechnologyRequest>,
) -> Result<impl Responder, AppError> {
    let technology = state
        .technology_handler
        .update_technology(&technology_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(technology))
}

#[instrument(skip(_claims, state))]
pub async fn delete_technology(
    _claims: AdminClaims,
    technology_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.technology_handler.delete_technology(&technology_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
