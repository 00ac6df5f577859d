use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path segment as a UUID, mapping failures to a 400.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id.trim()).map_err(|_| AppError::InvalidInput(format!("Invalid id: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_uuid_ids() {
        assert!(valid_uuid("4b3c9d1e-7e7a-4a43-9f4e-0c5a8f6f2b10").is_ok());
        assert!(matches!(valid_uuid("42"), Err(AppError::InvalidInput(_))));
    }
}
