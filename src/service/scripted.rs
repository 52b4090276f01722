//! In-memory service double that records every call it receives.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{NewRegistration, RegistrationRequest, RegistrationService};
use crate::error::{ErrorTag, ServiceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Submit(String),
    ListPending,
    Approve(String),
    Reject(String),
}

#[derive(Debug, Clone)]
pub enum Failure {
    Tag(ErrorTag),
    Status(u16),
}

impl Failure {
    fn to_error(&self) -> ServiceError {
        match self {
            Failure::Tag(tag) => ServiceError::rejected(tag.clone()),
            Failure::Status(code) => ServiceError::Http(
                reqwest::StatusCode::from_u16(*code)
                    .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            ),
        }
    }
}

#[derive(Default)]
pub struct ScriptedService {
    pending: Mutex<Vec<RegistrationRequest>>,
    calls: Mutex<Vec<Call>>,
    submit_failure: Mutex<Option<Failure>>,
    resolve_failure: Mutex<Option<Failure>>,
    list_failure: Mutex<Option<Failure>>,
}

impl ScriptedService {
    pub fn with_pending(requests: Vec<RegistrationRequest>) -> Self {
        Self {
            pending: Mutex::new(requests),
            ..Default::default()
        }
    }

    pub fn fail_submit(&self, failure: Failure) {
        *self.submit_failure.lock().unwrap() = Some(failure);
    }

    pub fn fail_resolve(&self, failure: Failure) {
        *self.resolve_failure.lock().unwrap() = Some(failure);
    }

    pub fn fail_list(&self, failure: Failure) {
        *self.list_failure.lock().unwrap() = Some(failure);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == Call::ListPending)
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_resolution(&self, id: &str) -> Result<(), ServiceError> {
        if let Some(failure) = self.resolve_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        let mut pending = self.pending.lock().unwrap();
        let before = pending.len();
        pending.retain(|r| r.id != id);
        if pending.len() == before {
            return Err(ServiceError::rejected(ErrorTag::NotFound));
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrationService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn submit(&self, registration: &NewRegistration) -> Result<(), ServiceError> {
        self.record(Call::Submit(registration.username.clone()));
        match self.submit_failure.lock().unwrap().as_ref() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    async fn list_pending(&self) -> Result<Vec<RegistrationRequest>, ServiceError> {
        self.record(Call::ListPending);
        if let Some(failure) = self.list_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        Ok(self.pending.lock().unwrap().clone())
    }

    async fn approve(&self, id: &str) -> Result<(), ServiceError> {
        self.record(Call::Approve(id.to_string()));
        self.take_resolution(id)
    }

    async fn reject(&self, id: &str) -> Result<(), ServiceError> {
        self.record(Call::Reject(id.to_string()));
        self.take_resolution(id)
    }
}
