use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

use crate::core::command::CommandError;
use crate::core::registry::CommandRegistry;
use crate::core::verify::Verifier;
use crate::scheduled::{ActionError, ActionRegistry};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CommandRegistry>,
    pub verifier: Arc<dyn Verifier>,
    pub actions: Arc<ActionRegistry>,
    /// Bearer secret for `POST /actions`; actions are refused when unset
    pub actions_token: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        registry: CommandRegistry,
        verifier: Arc<dyn Verifier>,
        actions: ActionRegistry,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            verifier,
            actions: Arc::new(actions),
            actions_token: None,
        }
    }

    pub fn with_actions_token(mut self, token: Option<String>) -> Self {
        self.actions_token = token.map(Arc::from);
        self
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Command failed: {0}")]
    Command(#[from] CommandError),

    #[error("Error running action {action_type}: {source}")]
    Action {
        action_type: String,
        source: ActionError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Command(err) => {
                error!(error = %err, "Command failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Action {
                action_type,
                source,
            } => {
                error!(action_type = %action_type, error = %source, "Action failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error running action {action_type}"),
                )
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::core::verify::NoopVerifier;

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        registry: CommandRegistry,
        verifier: Option<Arc<dyn Verifier>>,
        actions: ActionRegistry,
        actions_token: Option<String>,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                registry: CommandRegistry::default(),
                verifier: None,
                actions: ActionRegistry::default(),
                actions_token: None,
            }
        }

        pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
            self.registry = registry;
            self
        }

        pub fn with_verifier(mut self, verifier: Arc<dyn Verifier>) -> Self {
            self.verifier = Some(verifier);
            self
        }

        pub fn with_actions(mut self, actions: ActionRegistry) -> Self {
            self.actions = actions;
            self
        }

        pub fn with_actions_token(mut self, token: &str) -> Self {
            self.actions_token = Some(token.to_string());
            self
        }

        pub fn build(self) -> AppState {
            AppState::new(
                self.registry,
                self.verifier.unwrap_or_else(|| Arc::new(NoopVerifier)),
                self.actions,
            )
            .with_actions_token(self.actions_token)
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
