//! User and session persistence.

use crate::{map_sqlite_error, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use sketch_types::{User, UserKind};
use std::sync::{Arc, Mutex};

/// A persisted login session: an opaque bearer token bound to a user with a
/// fixed expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// CRUD over the `users` and `sessions` tables.
#[derive(Clone)]
pub struct UserStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore").finish_non_exhaustive()
    }
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, kind, last_activity, created_at, updated_at, deleted_at";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let kind: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        kind: UserKind::parse(&kind).unwrap_or(UserKind::Guest),
        last_activity: row.get::<_, DateTime<Utc>>(5)?,
        created_at: row.get::<_, DateTime<Utc>>(6)?,
        updated_at: row.get::<_, DateTime<Utc>>(7)?,
        deleted_at: row.get::<_, Option<DateTime<Utc>>>(8)?,
    })
}

impl UserStore {
    pub(crate) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Inserts a new account.
    ///
    /// # Errors
    /// [`StoreError::Conflict`] on duplicate id or email.
    pub fn create(&self, user: &User) -> StoreResult<()> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        conn.execute(
            "INSERT INTO users (id, name, email, password_hash, kind, last_activity, \
             created_at, updated_at, deleted_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                user.id,
                user.name,
                user.email,
                user.password_hash,
                user.kind.as_str(),
                user.last_activity,
                user.created_at,
                user.updated_at,
                user.deleted_at,
            ],
        )
        .map_err(map_sqlite_error)?;
        Ok(())
    }

    /// Fetches one live account by id.
    pub fn get_by_id(&self, id: &str) -> StoreResult<User> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            row_to_user,
        )
        .optional()?
        .ok_or(StoreError::NotFound)
    }

    /// Fetches one live account by email.
    pub fn get_by_email(&self, email: &str) -> StoreResult<User> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 AND deleted_at IS NULL"),
            params![email],
            row_to_user,
        )
        .optional()?
        .ok_or(StoreError::NotFound)
    }

    /// Returns every live account, in insertion order.
    pub fn get_all(&self) -> StoreResult<Vec<User>> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY rowid"
        ))?;
        let rows = stmt.query_map([], row_to_user)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// True when at least one live account exists.
    pub fn has_any(&self) -> StoreResult<bool> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Stamps an account's `last_activity`.
    pub fn touch_activity(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        let changed = conn.execute(
            "UPDATE users SET last_activity = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            params![id, Utc::now()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Persists a freshly issued session.
    pub fn create_session(&self, session: &Session) -> StoreResult<()> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        conn.execute(
            "INSERT INTO sessions (token, user_id, issued_at, expires_at) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session.token,
                session.user_id,
                session.issued_at,
                session.expires_at,
            ],
        )
        .map_err(map_sqlite_error)?;
        Ok(())
    }

    /// Fetches a session by token if it has not expired.
    ///
    /// Expired sessions are pruned on sight.
    pub fn get_session(&self, token: &str) -> StoreResult<Session> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        let session = conn
            .query_row(
                "SELECT token, user_id, issued_at, expires_at FROM sessions WHERE token = ?1",
                params![token],
                |row| {
                    Ok(Session {
                        token: row.get(0)?,
                        user_id: row.get(1)?,
                        issued_at: row.get::<_, DateTime<Utc>>(2)?,
                        expires_at: row.get::<_, DateTime<Utc>>(3)?,
                    })
                },
            )
            .optional()?
            .ok_or(StoreError::NotFound)?;

        if session.expires_at <= Utc::now() {
            conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
            return Err(StoreError::NotFound);
        }
        Ok(session)
    }

    /// Removes a session. Missing tokens are not an error; logout is
    /// idempotent.
    pub fn delete_session(&self, token: &str) -> StoreResult<()> {
        let conn = self.conn.lock().expect("user store lock poisoned");
        conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
        Ok(())
    }
}
