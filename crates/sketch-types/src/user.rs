//! User account types.
//!
//! Accounts gate access to the drawing tree but carry no file-tree logic of
//! their own. The password hash never leaves the process: [`User`] skips it
//! on serialization and API responses use the [`UserInfo`] projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Owner,
    Admin,
    Guest,
}

impl UserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Owner => "owner",
            UserKind::Admin => "admin",
            UserKind::Guest => "guest",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owner" => Some(UserKind::Owner),
            "admin" => Some(UserKind::Admin),
            "guest" => Some(UserKind::Guest),
            _ => None,
        }
    }
}

/// A persisted user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub kind: UserKind,
    pub last_activity: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_owner(&self) -> bool {
        self.kind == UserKind::Owner
    }

    pub fn is_admin(&self) -> bool {
        self.kind == UserKind::Admin
    }

    /// Projects this account into the shape exposed over the API.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            kind: self.kind,
            last_activity: self.last_activity.timestamp_millis(),
        }
    }
}

/// API projection of a user account, without credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub kind: UserKind,
    pub last_activity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_never_serializes() {
        let now = Utc::now();
        let user = User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            kind: UserKind::Owner,
            last_activity: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("passwordHash"));

        let info_json = serde_json::to_value(user.to_info()).unwrap();
        assert_eq!(info_json["kind"], "owner");
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [UserKind::Owner, UserKind::Admin, UserKind::Guest] {
            assert_eq!(UserKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(UserKind::parse("root"), None);
    }
}
