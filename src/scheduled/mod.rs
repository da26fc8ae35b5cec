pub mod actions;
pub mod handlers;

pub use actions::PromptSessionBooking;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::notify::NotifyError;
use crate::timetable::TimetableError;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Timetable(#[from] TimetableError),

    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// A job triggered by an external scheduler rather than a chat interaction
#[async_trait]
pub trait Action: Send + Sync {
    /// Value of `action_type` that selects this action
    fn code(&self) -> &'static str;

    async fn run(&self, now: NaiveDateTime) -> Result<(), ActionError>;
}

#[derive(Debug, Error, PartialEq)]
pub enum ActionRegistryError {
    #[error("Action with code {0} already exists")]
    DuplicateAction(String),
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action_type: String,
}

#[derive(Default, Clone)]
pub struct ActionRegistry {
    actions: HashMap<&'static str, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn builder() -> ActionRegistryBuilder {
        ActionRegistryBuilder::default()
    }

    pub fn get(&self, code: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(code).cloned()
    }
}

#[derive(Default)]
pub struct ActionRegistryBuilder {
    actions: Vec<Arc<dyn Action>>,
}

impl ActionRegistryBuilder {
    pub fn with_action(mut self, action: Arc<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn build(self) -> Result<ActionRegistry, ActionRegistryError> {
        let mut registry = ActionRegistry::default();
        for action in self.actions {
            let code = action.code();
            if registry.actions.contains_key(code) {
                return Err(ActionRegistryError::DuplicateAction(code.to_string()));
            }
            registry.actions.insert(code, action);
        }
        Ok(registry)
    }
}
