use rusqlite::{Connection, OptionalExtension, params};

use super::Database;
use super::models::{StoredRequest, UserAccount};
use crate::error::{ErrorTag, ServiceError};

const REQUEST_COLUMNS: &str =
    "id, username, email, password_hash, status, created_at, processed_at, processed_by";

fn request_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredRequest> {
    Ok(StoredRequest {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
        processed_at: row.get(6)?,
        processed_by: row.get(7)?,
    })
}

fn user_exists(conn: &Connection, username: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
        params![username],
        |row| row.get(0),
    )
}

fn pending_request_exists(conn: &Connection, username: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM registration_requests WHERE username = ?1 AND status = 'pending')",
        params![username],
        |row| row.get(0),
    )
}

/// Flip a pending request to `status`. Returns `None` when the id is unknown
/// or the request is no longer pending.
fn close_request(
    conn: &Connection,
    id: &str,
    status: &str,
    processed_by: &str,
    processed_at: i64,
) -> rusqlite::Result<Option<StoredRequest>> {
    let changed = conn.execute(
        "UPDATE registration_requests
         SET status = ?2, processed_at = ?3, processed_by = ?4
         WHERE id = ?1 AND status = 'pending'",
        params![id, status, processed_at, processed_by],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    conn.query_row(
        &format!("SELECT {REQUEST_COLUMNS} FROM registration_requests WHERE id = ?1"),
        params![id],
        request_from_row,
    )
    .optional()
}

impl Database {
    // --- Registration requests ---

    /// Store a new pending request, enforcing username uniqueness against
    /// existing accounts first and pending requests second.
    pub fn create_request(&self, request: &StoredRequest) -> Result<(), ServiceError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        if user_exists(&tx, &request.username)? {
            return Err(ServiceError::rejected(ErrorTag::AlreadyExistingUsername));
        }
        if pending_request_exists(&tx, &request.username)? {
            return Err(ServiceError::rejected(ErrorTag::PendingRegistrationExists));
        }

        tx.execute(
            "INSERT INTO registration_requests (id, username, email, password_hash, status, created_at, processed_at, processed_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                request.id,
                request.username,
                request.email,
                request.password_hash,
                request.status,
                request.created_at,
                request.processed_at,
                request.processed_by,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn get_request(&self, id: &str) -> Result<Option<StoredRequest>, ServiceError> {
        let conn = self.conn()?;
        let request = conn
            .query_row(
                &format!("SELECT {REQUEST_COLUMNS} FROM registration_requests WHERE id = ?1"),
                params![id],
                request_from_row,
            )
            .optional()?;
        Ok(request)
    }

    pub fn list_pending_requests(&self) -> Result<Vec<StoredRequest>, ServiceError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {REQUEST_COLUMNS} FROM registration_requests
             WHERE status = 'pending' ORDER BY created_at, rowid"
        ))?;
        let rows = stmt.query_map([], request_from_row)?;

        let mut requests = Vec::new();
        for row in rows {
            requests.push(row?);
        }
        Ok(requests)
    }

    /// Approve a pending request and create the account it describes.
    pub fn approve_request(
        &self,
        id: &str,
        processed_by: &str,
        now_ms: i64,
    ) -> Result<Option<UserAccount>, ServiceError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let Some(request) = close_request(&tx, id, "approved", processed_by, now_ms)? else {
            return Ok(None);
        };

        let user = UserAccount {
            id: uuid::Uuid::new_v4().to_string(),
            username: request.username,
            email: request.email,
            password_hash: request.password_hash,
            created_by: Some(processed_by.to_string()),
            created_at: now_ms,
        };
        tx.execute(
            "INSERT INTO users (id, username, email, password_hash, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id,
                user.username,
                user.email,
                user.password_hash,
                user.created_by,
                user.created_at,
            ],
        )?;
        tx.commit()?;
        Ok(Some(user))
    }

    pub fn reject_request(
        &self,
        id: &str,
        processed_by: &str,
        now_ms: i64,
    ) -> Result<Option<StoredRequest>, ServiceError> {
        let conn = self.conn()?;
        Ok(close_request(&conn, id, "rejected", processed_by, now_ms)?)
    }

    // --- Users ---

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserAccount>, ServiceError> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, email, password_hash, created_by, created_at
                 FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserAccount {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        email: row.get(2)?,
                        password_hash: row.get(3)?,
                        created_by: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }
}
