//! Field rules for the contact form.
//!
//! Both validators are pure and return the first rule that fails.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// One or more ASCII letters, nothing else
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").unwrap());

/// `local@label(.label)+` where the last label has at least two characters
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@]+@[0-9A-Za-z_]+(\.[0-9A-Za-z_]+)+[0-9A-Za-z_]$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    Required,
    LettersOnly,
    Malformed,
    Duplicate,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Required => "required",
            Reason::LettersOnly => "letters-only",
            Reason::Malformed => "malformed",
            Reason::Duplicate => "duplicate",
        }
    }
}

/// A rule that failed for a specific form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: Field,
    pub reason: Reason,
}

impl ValidationError {
    pub fn new(field: Field, reason: Reason) -> Self {
        Self { field, reason }
    }

    /// Text shown next to the offending input
    pub fn message(&self) -> String {
        match self.reason {
            Reason::Required => format!("{} field is required", self.field.label()),
            Reason::LettersOnly => {
                format!("{} can only contain english letters", self.field.label())
            }
            Reason::Malformed => "Incorrect email address".to_string(),
            Reason::Duplicate => "Already have that email on file".to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_name(value: &str) -> Result<(), Reason> {
    if value.is_empty() {
        return Err(Reason::Required);
    }
    if !NAME_REGEX.is_match(value) {
        return Err(Reason::LettersOnly);
    }
    Ok(())
}

/// Checks a candidate address against the form rules and the addresses
/// already on the contact. The duplicate check compares the raw candidate,
/// before it is lowercased for storage.
pub fn validate_email(candidate: &str, existing: &[String]) -> Result<(), Reason> {
    if candidate.is_empty() {
        return Err(Reason::Required);
    }
    if !EMAIL_REGEX.is_match(candidate) {
        return Err(Reason::Malformed);
    }
    if existing.iter().any(|email| email == candidate) {
        return Err(Reason::Duplicate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("John"), Ok(()));
        assert_eq!(validate_name(""), Err(Reason::Required));
        assert_eq!(validate_name("John2"), Err(Reason::LettersOnly));
        assert_eq!(validate_name("Mary Ann"), Err(Reason::LettersOnly));
        assert_eq!(validate_name("Zoë"), Err(Reason::LettersOnly));
    }

    #[test]
    fn test_validate_email_shapes() {
        let none: Vec<String> = Vec::new();
        assert_eq!(validate_email("a@b.com", &none), Ok(()));
        assert_eq!(validate_email("first.last@mail.example.org", &none), Ok(()));
        assert_eq!(validate_email("", &none), Err(Reason::Required));
        assert_eq!(validate_email("not-an-email", &none), Err(Reason::Malformed));
        assert_eq!(validate_email("a@b", &none), Err(Reason::Malformed));
        assert_eq!(validate_email("a@@b.com", &none), Err(Reason::Malformed));
        assert_eq!(validate_email("a@b.c", &none), Err(Reason::Malformed));
        assert_eq!(validate_email("a@b.com.", &none), Err(Reason::Malformed));
    }

    #[test]
    fn test_validate_email_duplicate_is_case_sensitive() {
        let existing = vec!["jane@x.com".to_string()];
        assert_eq!(validate_email("jane@x.com", &existing), Err(Reason::Duplicate));
        assert_eq!(validate_email("Jane@x.com", &existing), Ok(()));
    }

    #[test]
    fn test_messages() {
        let err = ValidationError::new(Field::FirstName, Reason::Required);
        assert_eq!(err.to_string(), "First Name field is required");

        let err = ValidationError::new(Field::LastName, Reason::LettersOnly);
        assert_eq!(err.to_string(), "Last Name can only contain english letters");

        let err = ValidationError::new(Field::Email, Reason::Duplicate);
        assert_eq!(err.to_string(), "Already have that email on file");
    }
}
