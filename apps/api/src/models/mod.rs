pub mod candidate;
pub mod job;

use serde::Serialize;

use crate::errors::AppError;

/// Plain confirmation body, e.g. for deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Rejects a blank value or one longer than `max` characters.
pub(crate) fn check_required(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    check_optional(field, Some(value), max)
}

pub(crate) fn check_optional(field: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_required_rejects_blank() {
        assert!(matches!(
            check_required("title", "   ", 255),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        let name = "é".repeat(255);
        assert!(check_required("name", &name, 255).is_ok());
        assert!(check_optional("name", Some(&format!("{name}x")), 255).is_err());
        assert!(check_optional("name", None, 1).is_ok());
    }
}
