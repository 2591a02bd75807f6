//! Contact form draft and field validation
//!
//! The same validation runs in the browser-side form before any network call
//! and again in the server handler, so a hand-crafted request cannot bypass it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One of the three contact form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Form input name (`name="..."` attribute)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }

    /// Look up a field by its input name
    pub fn from_name(name: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields are empty or absent
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    /// Email is present but not a plausible address
    #[error("invalid email address")]
    InvalidEmail,
}

impl ValidationError {
    /// Message shown to the person filling in the form
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingFields(_) => "Please fill in all fields",
            ValidationError::InvalidEmail => "Please provide a valid email address",
        }
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// In-progress contact form value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFormDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Current value of one field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    /// Replace one field in place; other fields are untouched
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Return a copy with one field replaced
    ///
    /// No validation happens here; it is deferred to submit.
    pub fn update_field(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.set_field(field, value);
        next
    }

    /// True when every field is empty (freshly reset)
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Clear all fields
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fields that are empty after trimming whitespace
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Check required-field and email-syntax rules
    pub fn validate(&self) -> Result<ValidContact, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let email = self.email.trim();
        if !is_plausible_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(ValidContact {
            name: self.name.trim().to_string(),
            email: email.to_string(),
            message: self.message.clone(),
        })
    }
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Syntactic plausibility check matching `<input type="email">`
///
/// One `@`, a non-empty local part, a dotted domain without empty labels,
/// no whitespace.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> ContactFormDraft {
        ContactFormDraft::new("Jane", "jane@x.com", "Hi")
    }

    #[test]
    fn test_update_field_only_touches_target() {
        let draft = jane();
        for field in Field::ALL {
            let updated = draft.update_field(field, "changed");
            assert_eq!(updated.get(field), "changed");
            for other in Field::ALL.into_iter().filter(|f| *f != field) {
                assert_eq!(updated.get(other), draft.get(other), "{} changed", other);
            }
        }
        // Original untouched
        assert_eq!(draft, jane());
    }

    #[test]
    fn test_update_field_does_not_validate() {
        let draft = ContactFormDraft::default().update_field(Field::Email, "not-an-email");
        assert_eq!(draft.email, "not-an-email");
    }

    #[test]
    fn test_validate_ok() {
        let valid = jane().validate().unwrap();
        assert_eq!(valid.name, "Jane");
        assert_eq!(valid.email, "jane@x.com");
        assert_eq!(valid.message, "Hi");
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let draft = ContactFormDraft::new("", "a@b.com", "   ");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::MissingFields(vec![Field::Name, Field::Message]))
        );
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let draft = ContactFormDraft::new("Jane", "jane@", "Hi");
        assert_eq!(draft.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_plausible_email() {
        assert!(is_plausible_email("a@b.com"));
        assert!(is_plausible_email("first.last+tag@sub.example.co.in"));
        assert!(!is_plausible_email("plainaddress"));
        assert!(!is_plausible_email("@b.com"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("a@@b.com"));
        assert!(!is_plausible_email("a@b..com"));
        assert!(!is_plausible_email("a b@c.com"));
        assert!(!is_plausible_email("a@-b.com"));
    }

    #[test]
    fn test_reset_and_is_empty() {
        let mut draft = jane();
        assert!(!draft.is_empty());
        draft.reset();
        assert!(draft.is_empty());
        assert_eq!(draft, ContactFormDraft::new("", "", ""));
    }

    #[test]
    fn test_field_names() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.as_str()), Some(field));
        }
        assert_eq!(Field::from_name("phone"), None);
    }

    #[test]
    fn test_validation_messages() {
        let missing = ValidationError::MissingFields(vec![Field::Message]);
        assert_eq!(missing.user_message(), "Please fill in all fields");
        assert_eq!(missing.to_string(), "missing required fields: message");
    }
}
