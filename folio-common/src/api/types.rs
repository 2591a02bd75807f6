//! Contact endpoint request/response types

use serde::{Deserialize, Serialize};

use crate::contact::{ContactFormDraft, ValidContact, ValidationError};

/// Reply text for an accepted submission
pub const MSG_THANK_YOU: &str = "Thank you for your message! I will get back to you soon.";

/// Reply text for a failure inside the handler
pub const MSG_PROCESSING_ERROR: &str = "Error processing your message";

/// Body of `POST /contact`
///
/// Fields are optional on the wire so an absent field produces the structured
/// 400 reply instead of a deserialization failure.
///
/// # Examples
///
/// ```
/// use folio_common::api::types::ContactRequest;
///
/// let request: ContactRequest =
///     serde_json::from_str(r#"{"name":"A","email":"a@b.com"}"#).unwrap();
/// assert!(request.message.is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl ContactRequest {
    /// Convert into a draft (absent fields become empty strings)
    pub fn to_draft(&self) -> ContactFormDraft {
        ContactFormDraft::new(
            self.name.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.message.clone().unwrap_or_default(),
        )
    }

    /// Validate with the same rules as the browser form
    pub fn validate(&self) -> Result<ValidContact, ValidationError> {
        self.to_draft().validate()
    }
}

impl From<&ContactFormDraft> for ContactRequest {
    fn from(draft: &ContactFormDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            email: Some(draft.email.clone()),
            message: Some(draft.message.clone()),
        }
    }
}

/// Reply envelope for `POST /contact`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Field;

    #[test]
    fn test_missing_message_is_reported() {
        let request: ContactRequest =
            serde_json::from_str(r#"{"name":"A","email":"a@b.com"}"#).unwrap();
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingFields(vec![Field::Message]))
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let request: ContactRequest =
            serde_json::from_str(r#"{"name":null,"email":"a@b.com","message":"x"}"#).unwrap();
        assert_eq!(
            request.validate(),
            Err(ValidationError::MissingFields(vec![Field::Name]))
        );
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_value(ContactResponse::failure("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "nope"}));
    }

    #[test]
    fn test_from_draft() {
        let draft = ContactFormDraft::new("Jane", "jane@x.com", "Hi");
        let request = ContactRequest::from(&draft);
        assert_eq!(request.to_draft(), draft);
    }
}
