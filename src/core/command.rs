use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use super::response::ResponseBody;
use super::user::{Guild, User};
use crate::storage::StorageError;

/// Errors raised while parsing or handling a command.
///
/// `MissingOptions` and `Rejected` are the requester's fault and are
/// answered with a message; every other variant is a failure of the service.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing required options: {}", .0.join(", "))]
    MissingOptions(Vec<String>),

    #[error("{0}")]
    Rejected(String),

    #[error("Malformed interaction payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Command failed: {0}")]
    Failed(String),
}

impl CommandError {
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CommandError::MissingOptions(_) | CommandError::Rejected(_)
        )
    }
}

/// Option types as numbered by the chat platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOptionType {
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Number = 10,
}

/// A parsed option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    User(User),
}

impl OptionValue {
    pub fn kind(&self) -> CommandOptionType {
        match self {
            OptionValue::String(_) => CommandOptionType::String,
            OptionValue::Integer(_) => CommandOptionType::Integer,
            OptionValue::Number(_) => CommandOptionType::Number,
            OptionValue::Boolean(_) => CommandOptionType::Boolean,
            OptionValue::User(_) => CommandOptionType::User,
        }
    }

    /// Empty strings, zeroes and `false` count as "not given" when applying defaults
    pub fn is_falsy(&self) -> bool {
        match self {
            OptionValue::String(value) => value.is_empty(),
            OptionValue::Integer(value) => *value == 0,
            OptionValue::Number(value) => *value == 0.0,
            OptionValue::Boolean(value) => !value,
            OptionValue::User(_) => false,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            OptionValue::String(value) => json!(value),
            OptionValue::Integer(value) => json!(value),
            OptionValue::Number(value) => json!(value),
            OptionValue::Boolean(value) => json!(value),
            OptionValue::User(user) => json!(user.id),
        }
    }

    fn from_json(name: &str, value: &Value) -> Result<Self, CommandError> {
        match value {
            Value::String(value) => Ok(OptionValue::String(value.clone())),
            Value::Bool(value) => Ok(OptionValue::Boolean(*value)),
            Value::Number(number) => match number.as_i64() {
                Some(value) => Ok(OptionValue::Integer(value)),
                None => number.as_f64().map(OptionValue::Number).ok_or_else(|| {
                    CommandError::MalformedPayload(format!("option {name} is not a number"))
                }),
            },
            other => Err(CommandError::MalformedPayload(format!(
                "option {name} has unsupported value {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandOptionChoice {
    pub name: String,
    pub value: OptionValue,
}

impl CommandOptionChoice {
    pub fn new(name: impl Into<String>, value: OptionValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Declaration of a single command option
#[derive(Debug, Clone)]
pub struct CommandOption {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandOptionType,
    pub required: bool,
    pub default: Option<OptionValue>,
    pub choices: Vec<CommandOptionChoice>,
}

impl CommandOption {
    pub fn new(name: &'static str, description: &'static str, kind: CommandOptionType) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
            default: None,
            choices: Vec::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: OptionValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_choices(mut self, choices: Vec<CommandOptionChoice>) -> Self {
        self.choices = choices;
        self
    }

    fn definition(&self) -> Value {
        let mut definition = json!({
            "name": self.name,
            "description": self.description,
            "type": self.kind as u8,
            "required": self.required,
        });
        if !self.choices.is_empty() {
            definition["choices"] = self
                .choices
                .iter()
                .map(|choice| json!({ "name": choice.name, "value": choice.value.to_json() }))
                .collect();
        }
        definition
    }
}

// ============================================================================
// Interaction payload
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub data: Option<InteractionData>,
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub options: Vec<RawOption>,
    #[serde(default)]
    pub resolved: Resolved,
    #[serde(default)]
    pub guild_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOption {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<u8>,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resolved {
    #[serde(default)]
    pub users: HashMap<String, User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: User,
}

impl Interaction {
    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.name.as_str())
    }

    /// The guild the interaction came from; ids must be numeric snowflakes
    pub fn guild(&self) -> Result<Guild, CommandError> {
        let guild_id = self
            .guild_id
            .as_deref()
            .or_else(|| self.data.as_ref().and_then(|data| data.guild_id.as_deref()))
            .ok_or_else(|| CommandError::MalformedPayload("missing guild_id".to_string()))?;

        if guild_id.is_empty() || !guild_id.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(CommandError::MalformedPayload(format!(
                "invalid guild_id {guild_id:?}"
            )));
        }
        Ok(Guild::new(guild_id))
    }

    pub fn invoking_user(&self) -> Result<User, CommandError> {
        self.member
            .as_ref()
            .map(|member| member.user.clone())
            .or_else(|| self.user.clone())
            .ok_or_else(|| CommandError::MalformedPayload("missing invoking user".to_string()))
    }
}

// ============================================================================
// Parsed options and handler context
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOptions {
    values: HashMap<String, OptionValue>,
}

impl CommandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: OptionValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(OptionValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(OptionValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        match self.values.get(name) {
            Some(OptionValue::User(user)) => Some(user),
            _ => None,
        }
    }

    pub fn require_integer(&self, name: &str) -> Result<i64, CommandError> {
        self.integer(name)
            .ok_or_else(|| CommandError::MalformedPayload(format!("option {name} is not an integer")))
    }

    pub fn require_string(&self, name: &str) -> Result<&str, CommandError> {
        self.string(name)
            .ok_or_else(|| CommandError::MalformedPayload(format!("option {name} is not a string")))
    }

    pub fn require_user(&self, name: &str) -> Result<&User, CommandError> {
        self.user(name)
            .ok_or_else(|| CommandError::MalformedPayload(format!("option {name} is not a user")))
    }
}

/// Everything a command handler needs once the payload has been unpacked
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub options: CommandOptions,
    pub guild: Guild,
    pub user: User,
    pub now: NaiveDateTime,
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn options(&self) -> &[CommandOption];

    /// Command specific logic, called with already parsed options
    async fn run(&self, context: CommandContext) -> Result<ResponseBody, CommandError>;

    async fn handle(&self, interaction: &Interaction) -> Result<ResponseBody, CommandError> {
        let options = self.parse_options(interaction)?;
        let context = CommandContext {
            options,
            guild: interaction.guild()?,
            user: interaction.invoking_user()?,
            now: Utc::now().naive_utc(),
        };
        debug!(command = self.name(), guild_id = %context.guild.guild_id, "Running command");
        self.run(context).await
    }

    fn parse_options(&self, interaction: &Interaction) -> Result<CommandOptions, CommandError> {
        parse_options(self.options(), interaction)
    }

    /// Metadata published to the chat platform when registering commands
    fn definition(&self) -> Value {
        json!({
            "name": self.name(),
            "description": self.description(),
            "options": self.options().iter().map(CommandOption::definition).collect::<Vec<_>>(),
        })
    }
}

pub fn parse_options(
    declared: &[CommandOption],
    interaction: &Interaction,
) -> Result<CommandOptions, CommandError> {
    let empty = InteractionData::default();
    let data = interaction.data.as_ref().unwrap_or(&empty);

    let mut values = HashMap::new();
    for raw in &data.options {
        let declared_kind = declared
            .iter()
            .find(|option| option.name == raw.name)
            .map(|option| option.kind);

        let value = match declared_kind {
            Some(CommandOptionType::User) => {
                let user_id = raw.value.as_str().ok_or_else(|| {
                    CommandError::MalformedPayload(format!("option {} is not a user id", raw.name))
                })?;
                let user = data.resolved.users.get(user_id).ok_or_else(|| {
                    CommandError::MalformedPayload(format!("user {user_id} was not resolved"))
                })?;
                OptionValue::User(user.clone())
            }
            _ => OptionValue::from_json(&raw.name, &raw.value)?,
        };
        values.insert(raw.name.clone(), value);
    }

    let missing: Vec<String> = declared
        .iter()
        .filter(|option| option.required && !values.contains_key(option.name))
        .map(|option| option.name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CommandError::MissingOptions(missing));
    }

    for option in declared {
        let Some(default) = &option.default else {
            continue;
        };
        let absent = values
            .get(option.name)
            .map_or(true, OptionValue::is_falsy);
        if absent {
            values.insert(option.name.to_string(), default.clone());
        }
    }

    Ok(CommandOptions { values })
}
