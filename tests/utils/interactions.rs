//! Builders for interaction payloads as the chat platform sends them
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::{json, Map, Value};

pub const GUILD_ID: &str = "100200300";
pub const LOGGER_ID: &str = "logger";

pub struct InteractionBuilder {
    name: String,
    guild_id: Option<String>,
    options: Vec<Value>,
    users: Map<String, Value>,
}

impl InteractionBuilder {
    pub fn new(name: &str) -> Self {
        let mut users = Map::new();
        users.insert(LOGGER_ID.to_string(), user_json(LOGGER_ID));
        Self {
            name: name.to_string(),
            guild_id: Some(GUILD_ID.to_string()),
            options: Vec::new(),
            users,
        }
    }

    pub fn without_guild(mut self) -> Self {
        self.guild_id = None;
        self
    }

    pub fn in_guild(mut self, guild_id: &str) -> Self {
        self.guild_id = Some(guild_id.to_string());
        self
    }

    pub fn string(mut self, name: &str, value: &str) -> Self {
        self.options.push(json!({"name": name, "type": 3, "value": value}));
        self
    }

    pub fn integer(mut self, name: &str, value: i64) -> Self {
        self.options.push(json!({"name": name, "type": 4, "value": value}));
        self
    }

    pub fn boolean(mut self, name: &str, value: bool) -> Self {
        self.options.push(json!({"name": name, "type": 5, "value": value}));
        self
    }

    /// A user option, resolved the way the platform resolves mentioned users
    pub fn user(mut self, name: &str, user_id: &str) -> Self {
        self.options.push(json!({"name": name, "type": 6, "value": user_id}));
        self.users.insert(user_id.to_string(), user_json(user_id));
        self
    }

    /// Scores for record-match style commands
    pub fn scores(self, player_one: &str, one_score: i64, player_two: &str, two_score: i64) -> Self {
        self.user("player-one", player_one)
            .integer("player-one-score", one_score)
            .user("player-two", player_two)
            .integer("player-two-score", two_score)
    }

    pub fn build(self) -> Value {
        let mut interaction = json!({
            "type": 2,
            "member": {"user": user_json(LOGGER_ID)},
            "data": {
                "name": self.name,
                "options": self.options,
                "resolved": {"users": self.users},
            },
        });
        if let Some(guild_id) = self.guild_id {
            interaction["guild_id"] = json!(guild_id);
        }
        interaction
    }
}

pub fn command_interaction(name: &str) -> InteractionBuilder {
    InteractionBuilder::new(name)
}

fn user_json(id: &str) -> Value {
    json!({"id": id, "username": id, "global_name": null})
}
