//! Profile data for the authenticated user.
//!
//! The [`UserProfile`] struct mirrors what `GET /api/v1/users/me` returns.
//! Beyond the numeric id the fields are treated as optional on the wire;
//! the client passes them through without validating them.

use serde::{Deserialize, Serialize};

/// The authenticated user's profile as reported by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user id.
    pub id: i64,

    /// Given name.
    #[serde(default)]
    pub name: Option<String>,

    /// Family name.
    #[serde(default)]
    pub surname: Option<String>,

    /// Account login.
    #[serde(default)]
    pub login: Option<String>,
}

impl UserProfile {
    /// Creates a profile with only the id set.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            surname: None,
            login: None,
        }
    }

    /// Returns a name suitable for display.
    ///
    /// Prefers "name surname", falls back to the login, and finally to the
    /// numeric id.
    ///
    /// # Example
    ///
    /// ```
    /// # use nutriplan_client::UserProfile;
    /// let user = UserProfile {
    ///     id: 7,
    ///     name: Some("Ana".to_string()),
    ///     surname: Some("Silva".to_string()),
    ///     login: Some("ana".to_string()),
    /// };
    /// assert_eq!(user.display_name(), "Ana Silva");
    /// ```
    pub fn display_name(&self) -> String {
        match (&self.name, &self.surname) {
            (Some(name), Some(surname)) => format!("{} {}", name, surname),
            (Some(name), None) => name.clone(),
            _ => self
                .login
                .clone()
                .unwrap_or_else(|| self.id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_profile() {
        let json = r#"{
            "id": 1,
            "name": "Ana",
            "surname": "Silva",
            "login": "ana"
        }"#;

        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name.as_deref(), Some("Ana"));
        assert_eq!(user.surname.as_deref(), Some("Silva"));
        assert_eq!(user.login.as_deref(), Some("ana"));
    }

    #[test]
    fn test_deserialize_id_only() {
        let user: UserProfile = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(user.id, 42);
        assert!(user.name.is_none());
        assert!(user.surname.is_none());
        assert!(user.login.is_none());
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let user = UserProfile {
            id: 1,
            name: Some("Ana".to_string()),
            surname: Some("Silva".to_string()),
            login: Some("ana".to_string()),
        };
        assert_eq!(user.display_name(), "Ana Silva");
    }

    #[test]
    fn test_display_name_falls_back_to_login() {
        let user = UserProfile {
            login: Some("ana".to_string()),
            ..UserProfile::new(1)
        };
        assert_eq!(user.display_name(), "ana");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let user = UserProfile::new(9);
        assert_eq!(user.display_name(), "9");
    }

    #[test]
    fn test_serialization_round_trip() {
        let user = UserProfile {
            id: 1,
            name: Some("Ana".to_string()),
            surname: None,
            login: Some("ana".to_string()),
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(user, back);
    }
}
