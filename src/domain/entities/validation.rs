use std::borrow::Cow;

use validator::ValidationError;

use crate::entities::option_fields::OptionField;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_SLUG_LENGTH: usize = 250;
pub const MAX_SHORT_DESCRIPTION_LENGTH: usize = 300;

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    // Empty means "derive it from the title"
    if slug.is_empty() {
        return Ok(());
    }
    if slug.chars().count() > MAX_SLUG_LENGTH {
        return Err(new_validation_error("slug_too_long", "Slug must be at most 250 characters"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error("slug_invalid_chars", "Slug must contain only lowercase letters, digits, or hyphens"));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(new_validation_error("slug_edge_hyphen", "Slug must not start or end with a hyphen"));
    }
    if slug.contains("--") {
        return Err(new_validation_error("slug_double_hyphen", "Slug must not contain consecutive hyphens"));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(new_validation_error("title_empty", "Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(new_validation_error("title_too_long", "Title must be at most 200 characters"));
    }
    Ok(())
}

pub fn validate_short_description(text: &str) -> Result<(), ValidationError> {
    if text.chars().count() > MAX_SHORT_DESCRIPTION_LENGTH {
        return Err(new_validation_error("short_description_too_long", "Short description must be at most 300 characters"));
    }
    Ok(())
}

pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(new_validation_error("invalid_color", "Color must be a hex code like #3776ab"))
    }
}

pub fn validate_optional_url_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(url) if !url.is_empty() => validate_url(url),
        _ => Ok(()),
    }
}

pub fn validate_optional_color_field(value: &OptionField<String>) -> Result<(), ValidationError> {
    match value {
        OptionField::SetToValue(color) if !color.is_empty() => validate_hex_color(color),
        _ => Ok(()),
    }
}

pub fn validate_optional_short_description(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(text) = value {
        validate_short_description(text)?;
    }
    Ok(())
}

pub fn validate_optional_slug(value: &OptionField<String>) -> Result<(), ValidationError> {
    if let OptionField::SetToValue(slug) = value {
        validate_slug(slug)?;
    }
    Ok(())
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
