pub mod http;
pub mod local;
#[cfg(test)]
pub mod scripted;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

/// A registration request as listed by the service.
///
/// The password is write-only and never part of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub status: RequestStatus,
    /// Milliseconds since the epoch.
    #[serde(default)]
    pub create_date: Option<i64>,
}

impl RegistrationRequest {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_date
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

#[derive(Clone, Serialize)]
pub struct NewRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl fmt::Debug for NewRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRegistration")
            .field("username", &self.username)
            .field("password", &"***")
            .field("email", &self.email)
            .finish()
    }
}

/// Operator decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Approve,
    Reject,
}

impl Resolution {
    pub fn verb(&self) -> &'static str {
        match self {
            Resolution::Approve => "approve",
            Resolution::Reject => "reject",
        }
    }

    pub fn resulting_status(&self) -> RequestStatus {
        match self {
            Resolution::Approve => RequestStatus::Approved,
            Resolution::Reject => RequestStatus::Rejected,
        }
    }
}

#[async_trait]
pub trait RegistrationService: Send + Sync {
    fn name(&self) -> &str;
    async fn submit(&self, registration: &NewRegistration) -> Result<(), ServiceError>;
    async fn list_pending(&self) -> Result<Vec<RegistrationRequest>, ServiceError>;
    async fn approve(&self, id: &str) -> Result<(), ServiceError>;
    async fn reject(&self, id: &str) -> Result<(), ServiceError>;

    async fn resolve(&self, id: &str, resolution: Resolution) -> Result<(), ServiceError> {
        match resolution {
            Resolution::Approve => self.approve(id).await,
            Resolution::Reject => self.reject(id).await,
        }
    }
}
