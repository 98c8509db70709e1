//! Member Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::club::ClubRole;

/// Club roster entry (`GET /clubs/{id}/members`)
///
/// Transient: fetched for a details view and never cached across views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: i64,
    #[serde(default, alias = "userName")]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "role")]
    pub club_role: ClubRole,
    #[serde(default)]
    pub joined_at: Option<NaiveDateTime>,
}

impl Member {
    pub fn is_admin(&self) -> bool {
        self.club_role == ClubRole::Admin
    }

    /// Roster label: username, then name, then "Unknown".
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_field_aliases() {
        let member: Member = serde_json::from_value(json!({
            "userId": 12,
            "userName": "meera",
            "role": "ADMIN"
        }))
        .unwrap();
        assert_eq!(member.username.as_deref(), Some("meera"));
        assert!(member.is_admin());
    }

    #[test]
    fn test_member_full_dto() {
        let member: Member = serde_json::from_value(json!({
            "userId": 3,
            "name": "Ravi",
            "username": "ravi",
            "email": "ravi@example.com",
            "clubRole": "MEMBER",
            "joinedAt": "2025-03-14T09:30:00"
        }))
        .unwrap();
        assert_eq!(member.club_role, ClubRole::Member);
        assert!(member.joined_at.is_some());
        assert_eq!(member.display_name(), "ravi");
    }

    #[test]
    fn test_display_name_fallback() {
        let member: Member = serde_json::from_value(json!({ "userId": 3 })).unwrap();
        assert_eq!(member.display_name(), "Unknown");
    }
}
