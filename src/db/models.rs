use serde::{Deserialize, Serialize};

/// Account created by an approval. `created_at` is epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_by: Option<String>,
    pub created_at: i64,
}

/// Stored registration request. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRequest {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub status: String,
    pub created_at: i64,
    pub processed_at: Option<i64>,
    pub processed_by: Option<String>,
}
