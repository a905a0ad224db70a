//! User profile row type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer profile, keyed by the Supabase auth user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Auth-linked user id.
    pub id: Uuid,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub wilayat: Option<String>,
    pub city: Option<String>,
    /// Set once name, phone, and wilayat are all present.
    #[serde(default)]
    pub profile_completed: bool,
}

impl UserProfile {
    /// Whether the profile has everything checkout needs pre-filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        fn present(field: Option<&String>) -> bool {
            field.is_some_and(|s| !s.trim().is_empty())
        }
        present(self.name.as_ref()) && present(self.phone.as_ref()) && present(self.wilayat.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: Option<&str>, phone: Option<&str>, wilayat: Option<&str>) -> UserProfile {
        UserProfile {
            id: Uuid::nil(),
            name: name.map(String::from),
            phone: phone.map(String::from),
            wilayat: wilayat.map(String::from),
            city: None,
            profile_completed: false,
        }
    }

    #[test]
    fn test_complete_profile() {
        assert!(profile(Some("Ali"), Some("+96890000000"), Some("Muscat")).is_complete());
    }

    #[test]
    fn test_missing_field() {
        assert!(!profile(Some("Ali"), None, Some("Muscat")).is_complete());
    }

    #[test]
    fn test_whitespace_field_counts_as_missing() {
        assert!(!profile(Some("  "), Some("+96890000000"), Some("Muscat")).is_complete());
    }
}
