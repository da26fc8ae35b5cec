use std::collections::HashMap;
use std::str::FromStr;

use strum_macros::{Display, EnumString};
use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMETABLE_API_URL: &str = "https://celticleisure.legendonlineservices.co.uk";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VerifierKind {
    Ed25519,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum StorageKind {
    Local,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub public_key: String,
    pub bot_token: String,
    pub verifier: VerifierKind,
    pub storage_backend: StorageKind,
    pub match_results_path: String,
    pub match_results_file: String,
    pub sessions_path: String,
    pub sessions_file: String,
    pub timetable_api_url: String,
    pub timetable_activity_id: String,
    pub timetable_location_id: String,
    pub prompt_session_booking_channel_ids: Vec<String>,
    pub actions_token: Option<String>,
}

impl Settings {
    /// Loads the env file named by `ENV_FILE_PATH` (default `.env`) if it exists,
    /// then reads settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_file = std::env::var("ENV_FILE_PATH").unwrap_or_else(|_| ".env".to_string());
        match dotenvy::from_path(&env_file) {
            Ok(()) => info!(env_file = %env_file, "Loaded env file"),
            Err(err) if err.not_found() => debug!(env_file = %env_file, "No env file"),
            Err(err) => return Err(err.into()),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let settings = Self {
            port: parse(&lookup, "PORT", DEFAULT_PORT)?,
            public_key: string("PUBLIC_KEY", ""),
            bot_token: string("BOT_TOKEN", ""),
            verifier: parse(&lookup, "VERIFIER", VerifierKind::Ed25519)?,
            storage_backend: parse(&lookup, "STORAGE_BACKEND", StorageKind::Local)?,
            match_results_path: string("MATCH_RESULTS_PATH", "data/match_results"),
            match_results_file: string("MATCH_RESULTS_FILE", "match_results.json"),
            sessions_path: string("SESSIONS_PATH", "data/sessions"),
            sessions_file: string("SESSIONS_FILE", "sessions.json"),
            timetable_api_url: string("TIMETABLE_API_URL", DEFAULT_TIMETABLE_API_URL),
            timetable_activity_id: string("TIMETABLE_ACTIVITY_ID", "87"),
            timetable_location_id: string("TIMETABLE_LOCATION_ID", "1917"),
            prompt_session_booking_channel_ids: lookup("PROMPT_SESSION_BOOKING_CHANNEL_IDS")
                .map(|ids| split_list(&ids))
                .unwrap_or_default(),
            actions_token: lookup("ACTIONS_TOKEN").filter(|token| !token.trim().is_empty()),
        };

        if settings.verifier == VerifierKind::Ed25519 && settings.public_key.is_empty() {
            return Err(ConfigError::Missing("PUBLIC_KEY"));
        }
        Ok(settings)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        _ => Ok(default),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
