use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::project::media_path_to_url;

/// Gallery image belonging to a single project.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectImage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub image: String,
    pub caption: String,
    #[sqlx(rename = "display_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl ProjectImage {
    pub fn url(&self, media_url: &str) -> String {
        media_path_to_url(media_url, &self.image)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewProjectImageRequest {
    #[validate(length(min = 1, message = "Image path cannot be empty"))]
    pub image: String,

    #[serde(default)]
    #[validate(length(max = 200, message = "Caption must be at most 200 characters"))]
    pub caption: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "Order cannot be negative"))]
    pub order: i32,
}
