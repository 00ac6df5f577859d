use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{
        project::{BatchUpdateRequest, NewProjectRequest, ProjectListFilter, UpdateProjectRequest},
        project_image::NewProjectImageRequest,
    },
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state, data))]
pub async fn create_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.create_project(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(_claims, state, query))]
pub async fn list_projects(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<ProjectListFilter>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects(&query).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_claims, state))]
pub async fn get_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project(&project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_claims, state, data))]
pub async fn update_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state
        .project_handler
        .update_project(&project_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_claims, state))]
pub async fn delete_project(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(&project_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(_claims, state, data))]
pub async fn set_featured(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<BatchUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.set_featured(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_claims, state, data))]
pub async fn set_visible(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<BatchUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.set_visible(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_claims, state, data))]
pub async fn add_project_image(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewProjectImageRequest>,
) -> Result<impl Responder, AppError> {
    let image = state
        .project_handler
        .add_image(&project_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(image))
}

#[instrument(skip(_claims, state))]
pub async fn list_project_images(
    _claims: AdminClaims,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let images = state.project_handler.list_images(&project_id).await?;
    Ok(HttpResponse::Ok().json(images))
}

#[instrument(skip(_claims, state))]
pub async fn delete_project_image(
    _claims: AdminClaims,
    image_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_image(&image_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
