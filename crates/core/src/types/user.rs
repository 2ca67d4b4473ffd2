//! Users of the mock store.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Credential record as served by `GET /users`.
///
/// The mock store keeps passwords in plain text; `Debug` redacts it. User ids
/// must be numeric. A record without a password decodes but can never log in.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

impl UserRecord {
    /// Whether `username` and `password` match this record.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.as_deref() == Some(password)
    }

    /// Profile kept in the session, without the password.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish()
    }
}

/// Identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_drops_password() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id": 1, "username": "demo", "password": "demo123",
                "email": "demo@grocerease.in", "name": "Demo User"}"#,
        )
        .unwrap();

        let json = serde_json::to_string(&record.profile()).unwrap();
        assert!(json.contains("\"username\":\"demo\""));
        assert!(!json.contains("demo123"));
        assert!(!format!("{record:?}").contains("demo123"));
    }

    #[test]
    fn test_record_without_password_never_matches() {
        let users: Vec<UserRecord> = serde_json::from_str(
            r#"[{"id": 1, "username": "demo", "password": "demo123"},
                {"id": 2, "username": "guest"}]"#,
        )
        .unwrap();

        assert!(users[0].matches("demo", "demo123"));
        assert!(!users[0].matches("demo", "wrong"));
        assert!(!users[1].matches("guest", ""));
    }
}
