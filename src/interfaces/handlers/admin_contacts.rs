use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::{contact::ContactListFilter, project::BatchUpdateRequest},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(_claims, state, query))]
pub async fn list_contacts(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    query: web::Query<ContactListFilter>,
) -> Result<impl Responder, AppError> {
    let contacts = state.contact_handler.list_contacts(&query).await?;
    Ok(HttpResponse::Ok().json(contacts))
}

#[instrument(skip(_claims, state))]
pub async fn get_contact(
    _claims: AdminClaims,
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let contact = state.contact_handler.get_contact(&contact_id).await?;
    Ok(HttpResponse::Ok().json(contact))
}

#[instrument(skip(_claims, state, data))]
pub async fn set_replied(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    data: web::Json<BatchUpdateRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.contact_handler.set_replied(data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_claims, state))]
pub async fn delete_contact(
    _claims: AdminClaims,
    contact_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.contact_handler.delete_contact(&contact_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
