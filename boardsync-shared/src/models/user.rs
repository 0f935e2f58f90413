/// User model and roles
///
/// Roles form a flat vocabulary rather than a hierarchy in the core: the
/// authorization policy (`crate::auth::policy`) is the single place that
/// maps a role to the actions it permits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role
///
/// Role strings the backend does not know about (or a missing role claim)
/// deserialize to `Unknown`, which the policy treats as read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular employee: read-only plus message posting
    Employee,

    /// Can create and edit tasks
    Manager,

    /// Can create and edit tasks, and manage users
    Ceo,

    /// Full access
    Admin,

    /// Unrecognized or absent role, treated as read-only
    #[default]
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Ceo => "ceo",
            Role::Admin => "admin",
            Role::Unknown => "unknown",
        }
    }
}

/// User account as returned by the backend user listing
///
/// The credential hash never crosses this boundary; the core only ever
/// sees usernames and roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: i64,

    /// Unique username
    pub username: String,

    /// Role, used for display next to assignee options
    #[serde(default)]
    pub role: Role,

    /// When the account was created
    #[serde(
        default,
        deserialize_with = "crate::models::timestamp::deserialize_optional"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserializes_lowercase() {
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::Manager);
    }

    #[test]
    fn test_unrecognized_role_maps_to_unknown() {
        let role: Role = serde_json::from_str("\"intern\"").unwrap();
        assert_eq!(role, Role::Unknown);
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Employee.as_str(), "employee");
        assert_eq!(Role::Manager.as_str(), "manager");
        assert_eq!(Role::Ceo.as_str(), "ceo");
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Unknown.as_str(), "unknown");
    }
}
