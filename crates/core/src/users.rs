//! User accounts and login sessions.
//!
//! A deliberately small surface: the first account is bootstrapped once,
//! logins exchange credentials for an opaque bearer token with a fixed TTL,
//! and every authenticated request resolves its token back to an account.
//! Passwords are hashed with argon2; hashes never leave the process.

use crate::constants::SESSION_TTL_HOURS;
use crate::{CoreError, CoreResult, FileId};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use base64::Engine;
use chrono::{Duration, Utc};
use password_hash::{PasswordHash, SaltString};
use sketch_store::{Session, UserStore};
use sketch_types::{User, UserInfo, UserKind};

/// Accounts and sessions service.
#[derive(Clone)]
pub struct UserService {
    users: UserStore,
    session_ttl: Duration,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

fn hash_password(password: &str) -> CoreResult<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| CoreError::Internal(format!("salt generation failed: {e}")))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| CoreError::Internal(format!("salt encoding failed: {e}")))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| CoreError::Internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// 128-bit random token, base64url without padding.
fn generate_token() -> CoreResult<String> {
    let mut buf = [0u8; 32];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::Internal(format!("token generation failed: {e}")))?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf))
}

impl UserService {
    pub fn new(users: UserStore) -> Self {
        Self {
            users,
            session_ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Overrides the default session lifetime.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// True when at least one account exists.
    pub fn has_users(&self) -> CoreResult<bool> {
        self.users
            .has_any()
            .map_err(|e| CoreError::Metadata {
                op: "has_any",
                id: "*".into(),
                source: e,
            })
    }

    /// Bootstraps the owner account. Allowed exactly once.
    ///
    /// # Errors
    /// - [`CoreError::Conflict`] once any account exists
    /// - [`CoreError::Invalid`] on empty name/email/password
    pub fn create_first_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> CoreResult<UserInfo> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(CoreError::Invalid("name and email are required".into()));
        }
        if password.len() < 8 {
            return Err(CoreError::Invalid(
                "password must be at least 8 characters".into(),
            ));
        }
        if self.has_users()? {
            return Err(CoreError::Conflict(
                "system already has users - first user already created".into(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: FileId::new().to_string(),
            name: name.trim().to_owned(),
            email: email.trim().to_owned(),
            password_hash: hash_password(password)?,
            kind: UserKind::Owner,
            last_activity: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.users.create(&user).map_err(|e| match e {
            sketch_store::StoreError::Conflict => {
                CoreError::Conflict(format!("email already registered: {}", user.email))
            }
            other => CoreError::Metadata {
                op: "create",
                id: user.id.clone(),
                source: other,
            },
        })?;

        tracing::info!(id = %user.id, "created first user");
        Ok(user.to_info())
    }

    /// Exchanges credentials for a session token.
    ///
    /// # Errors
    /// [`CoreError::Unauthorized`] on unknown email or wrong password; the
    /// two cases are indistinguishable to the caller.
    pub fn login(&self, email: &str, password: &str) -> CoreResult<(Session, UserInfo)> {
        let user = match self.users.get_by_email(email.trim()) {
            Ok(user) => user,
            Err(sketch_store::StoreError::NotFound) => {
                return Err(CoreError::Unauthorized("invalid credentials".into()));
            }
            Err(e) => {
                return Err(CoreError::Metadata {
                    op: "get_by_email",
                    id: email.to_owned(),
                    source: e,
                });
            }
        };

        if !verify_password(password, &user.password_hash) {
            return Err(CoreError::Unauthorized("invalid credentials".into()));
        }

        let now = Utc::now();
        let session = Session {
            token: generate_token()?,
            user_id: user.id.clone(),
            issued_at: now,
            expires_at: now + self.session_ttl,
        };
        self.users.create_session(&session).map_err(|e| CoreError::Metadata {
            op: "create_session",
            id: user.id.clone(),
            source: e,
        })?;

        // best-effort; a failed stamp must not fail the login
        if let Err(e) = self.users.touch_activity(&user.id) {
            tracing::warn!(id = %user.id, error = %e, "failed to stamp last activity");
        }

        tracing::info!(id = %user.id, "user logged in");
        Ok((session, user.to_info()))
    }

    /// Resolves a bearer token to its account, stamping activity.
    ///
    /// # Errors
    /// [`CoreError::Unauthorized`] on unknown or expired tokens.
    pub fn authenticate(&self, token: &str) -> CoreResult<User> {
        let session = self
            .users
            .get_session(token)
            .map_err(|_| CoreError::Unauthorized("invalid or expired session".into()))?;

        let user = self
            .users
            .get_by_id(&session.user_id)
            .map_err(|_| CoreError::Unauthorized("session user no longer exists".into()))?;

        if let Err(e) = self.users.touch_activity(&user.id) {
            tracing::warn!(id = %user.id, error = %e, "failed to stamp last activity");
        }
        Ok(user)
    }

    /// Revokes a session. Idempotent.
    pub fn logout(&self, token: &str) -> CoreResult<()> {
        self.users.delete_session(token).map_err(|e| CoreError::Metadata {
            op: "delete_session",
            id: "*".into(),
            source: e,
        })
    }

    /// Every live account, without credentials.
    pub fn list_users(&self) -> CoreResult<Vec<UserInfo>> {
        let users = self.users.get_all().map_err(|e| CoreError::Metadata {
            op: "get_all",
            id: "*".into(),
            source: e,
        })?;
        Ok(users.iter().map(User::to_info).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketch_store::Database;

    fn service() -> UserService {
        UserService::new(Database::open_in_memory().unwrap().users())
    }

    #[test]
    fn first_user_bootstrap_is_once_only() {
        let svc = service();
        assert!(!svc.has_users().unwrap());

        let info = svc
            .create_first_user("Ada", "ada@example.com", "correct horse")
            .unwrap();
        assert_eq!(info.kind, UserKind::Owner);
        assert!(svc.has_users().unwrap());

        let err = svc
            .create_first_user("Eve", "eve@example.com", "battery staple")
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn first_user_requires_reasonable_input() {
        let svc = service();
        assert!(matches!(
            svc.create_first_user(" ", "a@b.c", "long enough"),
            Err(CoreError::Invalid(_))
        ));
        assert!(matches!(
            svc.create_first_user("Ada", "a@b.c", "short"),
            Err(CoreError::Invalid(_))
        ));
    }

    #[test]
    fn login_issues_usable_session() {
        let svc = service();
        svc.create_first_user("Ada", "ada@example.com", "correct horse")
            .unwrap();

        let (session, info) = svc.login("ada@example.com", "correct horse").unwrap();
        assert_eq!(info.email, "ada@example.com");
        assert!(!session.token.is_empty());

        let user = svc.authenticate(&session.token).unwrap();
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn login_rejects_wrong_password_and_unknown_email() {
        let svc = service();
        svc.create_first_user("Ada", "ada@example.com", "correct horse")
            .unwrap();

        assert!(matches!(
            svc.login("ada@example.com", "wrong"),
            Err(CoreError::Unauthorized(_))
        ));
        assert!(matches!(
            svc.login("ghost@example.com", "correct horse"),
            Err(CoreError::Unauthorized(_))
        ));
    }

    #[test]
    fn logout_revokes_the_session() {
        let svc = service();
        svc.create_first_user("Ada", "ada@example.com", "correct horse")
            .unwrap();
        let (session, _) = svc.login("ada@example.com", "correct horse").unwrap();

        svc.logout(&session.token).unwrap();
        assert!(matches!(
            svc.authenticate(&session.token),
            Err(CoreError::Unauthorized(_))
        ));
        // logging out twice is fine
        svc.logout(&session.token).unwrap();
    }

    #[test]
    fn expired_sessions_do_not_authenticate() {
        let svc = service().with_session_ttl(Duration::seconds(-1));
        svc.create_first_user("Ada", "ada@example.com", "correct horse")
            .unwrap();
        let (session, _) = svc.login("ada@example.com", "correct horse").unwrap();

        assert!(matches!(
            svc.authenticate(&session.token),
            Err(CoreError::Unauthorized(_))
        ));
    }

    #[test]
    fn list_users_hides_credentials() {
        let svc = service();
        svc.create_first_user("Ada", "ada@example.com", "correct horse")
            .unwrap();

        let users = svc.list_users().unwrap();
        assert_eq!(users.len(), 1);
        let json = serde_json::to_string(&users).unwrap();
        assert!(!json.contains("argon2"));
    }
}
