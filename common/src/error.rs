//! Error types

use crate::form::ValidationIssue;
use thiserror::Error;

/// Errors of the shared complaint-form logic
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formulář není vyplněn správně: {}", join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::RequiredField;

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_invalid() {
        let error = Error::Invalid(vec![
            ValidationIssue::Missing(RequiredField::FirstName),
            ValidationIssue::InvalidEmail("x".to_string()),
        ]);
        let display = format!("{}", error);
        assert_eq!(
            display,
            "Formulář není vyplněn správně: Povinné pole není vyplněno: Jméno; Neplatný e-mail: x"
        );
    }
}
