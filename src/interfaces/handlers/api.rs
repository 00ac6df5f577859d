use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::{CategoryFilter, CategoryQuery},
    errors::AppError,
    AppState,
};

/// `{"projects": [...]}` for the front-end filter script.
#[instrument(skip(state, query))]
pub async fn projects_api(
    state: web::Data<AppState>,
    query: web::Query<CategoryQuery>,
) -> Result<impl Responder, AppError> {
    let filter = CategoryFilter::parse(query.category.as_deref());
    let response = state
        .project_handler
        .api_projects(&filter, &state.media_url)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
