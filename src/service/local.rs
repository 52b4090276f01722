use std::sync::Arc;

use async_trait::async_trait;

use super::{NewRegistration, RegistrationRequest, RegistrationService, RequestStatus};
use crate::db::Database;
use crate::db::models::StoredRequest;
use crate::error::{ErrorTag, ServiceError};

/// Offline registration backend over the local SQLite database.
///
/// Applies the same rules as the remote service: submissions are validated
/// (username 3-50 characters, password 8-50, a plausible email), usernames are
/// unique among accounts and pending requests, only pending requests can be
/// resolved, and approval creates the account.
pub struct LocalRegistrationService {
    db: Arc<Database>,
    operator: String,
    hash_cost: u32,
}

impl LocalRegistrationService {
    pub fn new(db: Arc<Database>, operator: impl Into<String>) -> Self {
        Self {
            db,
            operator: operator.into(),
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    #[cfg(test)]
    fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }
}

const USERNAME_LENGTH: (usize, usize) = (3, 50);
const PASSWORD_LENGTH: (usize, usize) = (8, 50);

fn invalid(field: &str, reason: String) -> ServiceError {
    ServiceError::Rejected {
        tag: ErrorTag::Other("ValidationError".into()),
        message: Some(format!("{field} {reason}")),
    }
}

/// Trim `value` and check its length in characters.
fn checked_length(field: &str, value: &str, (min, max): (usize, usize)) -> Result<String, ServiceError> {
    let value = value.trim();
    let len = value.chars().count();
    if len < min || len > max {
        return Err(invalid(
            field,
            format!("must be between {min} and {max} characters, got {len}"),
        ));
    }
    Ok(value.to_string())
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Normalize and validate a submission before anything is stored.
fn validate(registration: &NewRegistration) -> Result<NewRegistration, ServiceError> {
    let username = checked_length("username", &registration.username, USERNAME_LENGTH)?;
    let password = checked_length("password", &registration.password, PASSWORD_LENGTH)?;
    let email = registration.email.trim().to_string();
    if !looks_like_email(&email) {
        return Err(invalid("email", "is not a valid address".into()));
    }
    Ok(NewRegistration {
        username,
        password,
        email,
    })
}

fn to_listing(stored: StoredRequest) -> RegistrationRequest {
    let status = match stored.status.as_str() {
        "approved" => RequestStatus::Approved,
        "rejected" => RequestStatus::Rejected,
        _ => RequestStatus::Pending,
    };
    RegistrationRequest {
        id: stored.id,
        username: stored.username,
        email: stored.email,
        status,
        create_date: Some(stored.created_at),
    }
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::Rejected {
        tag: ErrorTag::NotFound,
        message: Some(format!("Request '{id}' does not exist or was already processed")),
    }
}

#[async_trait]
impl RegistrationService for LocalRegistrationService {
    fn name(&self) -> &str {
        "local"
    }

    async fn submit(&self, registration: &NewRegistration) -> Result<(), ServiceError> {
        let registration = validate(registration)?;

        let cost = self.hash_cost;
        let password = registration.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| ServiceError::Storage(format!("password hashing task failed: {e}")))??;

        let request = StoredRequest {
            id: uuid::Uuid::new_v4().to_string(),
            username: registration.username,
            email: registration.email,
            password_hash,
            status: RequestStatus::Pending.as_str().to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
            processed_at: None,
            processed_by: None,
        };
        self.db.create_request(&request)?;
        tracing::info!("Stored registration request {} for {}", request.id, request.username);
        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<RegistrationRequest>, ServiceError> {
        let pending = self.db.list_pending_requests()?;
        Ok(pending.into_iter().map(to_listing).collect())
    }

    async fn approve(&self, id: &str) -> Result<(), ServiceError> {
        let now = chrono::Utc::now().timestamp_millis();
        let user = self
            .db
            .approve_request(id, &self.operator, now)?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Created account {} ({}) from request {}", user.username, user.id, id);
        Ok(())
    }

    async fn reject(&self, id: &str) -> Result<(), ServiceError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.db
            .reject_request(id, &self.operator, now)?
            .ok_or_else(|| not_found(id))?;
        tracing::info!("Rejected registration request {}", id);
        Ok(())
    }
}
