use actix_web::{http::header::ContentType, web, HttpResponse};
use tracing::instrument;

use crate::{
    entities::{contact::ContactForm, project::{CategoryFilter, CategoryQuery}},
    errors::AppError,
    AppState,
};

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

fn not_found(state: &AppState) -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(state.pages.not_found())
}

#[instrument(skip(state))]
pub async fn home(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let featured = state.project_handler.list_featured().await?;
    Ok(html(state.pages.home(&featured)))
}

#[instrument(skip(state))]
pub async fn about(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let technologies = state.technology_handler.list_technologies().await?;
    Ok(html(state.pages.about(&technologies)))
}

#[instrument(skip(state, query))]
pub async fn projects(
    state: web::Data<AppState>,
    query: web::Query<CategoryQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = CategoryFilter::parse(query.category.as_deref());
    let projects = state.project_handler.list_visible(&filter).await?;
    Ok(html(state.pages.projects(&projects, &filter)))
}

#[instrument(skip(state))]
pub async fn project_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    match state.project_handler.get_visible_detail(&slug).await {
        Ok(detail) => Ok(html(state.pages.project_detail(&detail))),
        Err(AppError::NotFound(_)) => Ok(not_found(&state)),
        Err(e) => Err(e),
    }
}

pub async fn contact_form(state: web::Data<AppState>) -> HttpResponse {
    html(state.pages.contact(false))
}

#[instrument(skip(state, form))]
pub async fn submit_contact(
    state: web::Data<AppState>,
    form: web::Form<ContactForm>,
) -> Result<HttpResponse, AppError> {
    state.contact_handler.submit(form.into_inner()).await?;
    Ok(html(state.pages.contact(true)))
}

/// Fallback for unmatched routes.
pub async fn page_not_found(state: web::Data<AppState>) -> HttpResponse {
    not_found(&state)
}
