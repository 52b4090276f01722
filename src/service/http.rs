use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use super::{NewRegistration, RegistrationRequest, RegistrationService};
use crate::error::{ErrorTag, ServiceError};

/// Registration endpoints of the document-management REST API.
///
/// Guest calls (submission) go out unauthenticated; the administrator calls
/// carry the `auth_token` cookie when one is configured.
pub struct HttpRegistrationService {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpRegistrationService {
    pub fn new(base_url: &str, auth_token: Option<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("regdesk/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: normalize_base(base_url),
            auth_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authenticated(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.header(reqwest::header::COOKIE, format!("auth_token={token}")),
            None => builder,
        }
    }

    async fn post_resolution(&self, id: &str, verb: &str) -> Result<(), ServiceError> {
        let path = format!("user/registration/{id}/{verb}");
        let resp = self
            .authenticated(self.client.post(self.url(&path)))
            .send()
            .await?;
        tracing::debug!("POST {} -> {}", path, resp.status());
        check(resp).await.map(|_| ())
    }
}

fn normalize_base(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{base_url}/")
    }
}

// ---------------------------------------------------------------------------
// Response deserialization
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PendingResponse {
    #[serde(default)]
    requests: Vec<RegistrationRequest>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    tag: ErrorTag,
    #[serde(default)]
    message: Option<String>,
}

/// Turn a non-success response into a `ServiceError`.
///
/// Bodies carrying a `type` field become tagged rejections; anything else is
/// reported by status code alone.
async fn check(resp: Response) -> Result<Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(error_from_body(status, &body))
}

fn error_from_body(status: reqwest::StatusCode, body: &str) -> ServiceError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => ServiceError::Rejected {
            tag: err.tag,
            message: err.message,
        },
        Err(_) => ServiceError::Http(status),
    }
}

// ---------------------------------------------------------------------------
// RegistrationService implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl RegistrationService for HttpRegistrationService {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn submit(&self, registration: &NewRegistration) -> Result<(), ServiceError> {
        let resp = self
            .client
            .post(self.url("user/registration"))
            .form(registration)
            .send()
            .await?;
        tracing::debug!("POST user/registration -> {}", resp.status());
        check(resp).await.map(|_| ())
    }

    async fn list_pending(&self) -> Result<Vec<RegistrationRequest>, ServiceError> {
        let resp = self
            .authenticated(self.client.get(self.url("user/registration/pending")))
            .send()
            .await?;
        tracing::debug!("GET user/registration/pending -> {}", resp.status());
        let body = check(resp).await?.text().await?;
        let parsed: PendingResponse = serde_json::from_str(&body)?;
        Ok(parsed.requests)
    }

    async fn approve(&self, id: &str) -> Result<(), ServiceError> {
        self.post_resolution(id, "approve").await
    }

    async fn reject(&self, id: &str) -> Result<(), ServiceError> {
        self.post_resolution(id, "reject").await
    }
}
