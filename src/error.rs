use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Discriminant carried in the `type` field of a rejected service call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ErrorTag {
    AlreadyExistingUsername,
    PendingRegistrationExists,
    NotFound,
    Other(String),
}

impl ErrorTag {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorTag::AlreadyExistingUsername => "AlreadyExistingUsername",
            ErrorTag::PendingRegistrationExists => "PendingRegistrationExists",
            ErrorTag::NotFound => "NotFound",
            ErrorTag::Other(tag) => tag,
        }
    }
}

impl From<String> for ErrorTag {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "AlreadyExistingUsername" => ErrorTag::AlreadyExistingUsername,
            "PendingRegistrationExists" => ErrorTag::PendingRegistrationExists,
            "NotFound" => ErrorTag::NotFound,
            _ => ErrorTag::Other(tag),
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Request rejected ({tag}){}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected {
        tag: ErrorTag,
        message: Option<String>,
    },

    #[error("Unexpected HTTP status: {0}")]
    Http(reqwest::StatusCode),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn rejected(tag: ErrorTag) -> Self {
        ServiceError::Rejected { tag, message: None }
    }

    /// The rejection tag, if the service answered with one.
    pub fn tag(&self) -> Option<&ErrorTag> {
        match self {
            ServiceError::Rejected { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_parse() {
        let tag: ErrorTag = serde_json::from_str(r#""AlreadyExistingUsername""#).unwrap();
        assert_eq!(tag, ErrorTag::AlreadyExistingUsername);
        let tag: ErrorTag = serde_json::from_str(r#""PendingRegistrationExists""#).unwrap();
        assert_eq!(tag, ErrorTag::PendingRegistrationExists);
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let tag: ErrorTag = serde_json::from_str(r#""ApprovalError""#).unwrap();
        assert_eq!(tag, ErrorTag::Other("ApprovalError".into()));
        assert_eq!(tag.to_string(), "ApprovalError");
    }

    #[test]
    fn test_rejected_display() {
        let err = ServiceError::Rejected {
            tag: ErrorTag::NotFound,
            message: Some("gone".into()),
        };
        assert_eq!(err.to_string(), "Request rejected (NotFound): gone");
        assert_eq!(err.tag(), Some(&ErrorTag::NotFound));

        let err = ServiceError::rejected(ErrorTag::NotFound);
        assert_eq!(err.to_string(), "Request rejected (NotFound)");
    }
}
