use validator::ValidationError;
use zxcvbn::zxcvbn;

use crate::entities::validation::new_validation_error;

const MIN_LENGTH: usize = 8;
const MIN_STRENGTH_SCORE: u8 = 3;

/// Admin password policy: length, character classes, then a zxcvbn estimate.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(new_validation_error("password_length", "Must be at least 8 characters"));
    }

    let has_upper = password.chars().any(char::is_uppercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if !(has_upper && has_digit && has_symbol) {
        return Err(new_validation_error(
            "password_complexity",
            "Must include an uppercase letter, a digit and a symbol",
        ));
    }

    let estimate = zxcvbn(password, &[]);
    if (estimate.score() as u8) < MIN_STRENGTH_SCORE {
        let mut error = ValidationError::new("password_weak");
        let hint = estimate
            .feedback()
            .and_then(|f| f.warning().map(|w| w.to_string()))
            .unwrap_or_else(|| "Password is too easy to guess".to_string());
        error.message = Some(hint.into());
        return Err(error);
    }

    Ok(())
}
