use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A chat platform user as it appears in interaction payloads and stored records.
///
/// Identity is the `id` alone: `username` and `global_name` are display
/// attributes that can change between interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        global_name: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            global_name: global_name.map(str::to_string),
        }
    }

    /// Display name: the global name when set and non-empty, the username otherwise
    pub fn name(&self) -> &str {
        match self.global_name.as_deref() {
            Some(global_name) if !global_name.is_empty() => global_name,
            _ => &self.username,
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Tenant key: all match history and sessions are partitioned per guild
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guild {
    pub guild_id: String,
}

impl Guild {
    pub fn new(guild_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_prefers_global_name() {
        let user = User::new("1", "paul", Some("Paul!"));
        assert_eq!(user.name(), "Paul!");
    }

    #[test]
    fn name_falls_back_to_username() {
        assert_eq!(User::new("1", "paul", None).name(), "paul");
        assert_eq!(User::new("1", "paul", Some("")).name(), "paul");
    }

    #[test]
    fn equality_is_by_id_only() {
        let before = User::new("1", "paul", Some("Paul"));
        let after = User::new("1", "paul_renamed", Some("Pauly"));
        let other = User::new("2", "paul", Some("Paul"));

        assert_eq!(before, after);
        assert_ne!(before, other);
    }

    #[test]
    fn deserializes_null_global_name() {
        let user: User =
            serde_json::from_str(r#"{"id": "1", "username": "user1", "global_name": null}"#)
                .unwrap();
        assert_eq!(user.global_name, None);
        assert_eq!(user.name(), "user1");
    }
}
