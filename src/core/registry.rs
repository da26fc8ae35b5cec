use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::command::Command;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("Command with name {0} already exists")]
    DuplicateCommand(String),
}

/// Lookup table from command name to handler, built once at startup.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Arc<dyn Command>>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    /// All commands in registration order
    pub fn all(&self) -> Vec<Arc<dyn Command>> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Default)]
pub struct CommandRegistryBuilder {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistryBuilder {
    pub fn with_command(mut self, command: Arc<dyn Command>) -> Self {
        self.commands.push(command);
        self
    }

    pub fn build(self) -> Result<CommandRegistry, RegistryError> {
        let mut registry = CommandRegistry::default();
        for command in self.commands {
            let name = command.name();
            if registry.commands.contains_key(name) {
                return Err(RegistryError::DuplicateCommand(name.to_string()));
            }
            registry.order.push(name);
            registry.commands.insert(name, command);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::{CommandContext, CommandError, CommandOption};
    use crate::core::response::ResponseBody;
    use async_trait::async_trait;

    struct NamedCommand(&'static str);

    #[async_trait]
    impl Command for NamedCommand {
        fn name(&self) -> &'static str {
            self.0
        }

        fn description(&self) -> &'static str {
            "Test command"
        }

        fn options(&self) -> &[CommandOption] {
            &[]
        }

        async fn run(&self, _context: CommandContext) -> Result<ResponseBody, CommandError> {
            Ok(ResponseBody::channel_message(self.0))
        }
    }

    #[test]
    fn registers_commands_by_name() {
        let registry = CommandRegistry::builder()
            .with_command(Arc::new(NamedCommand("test-one")))
            .with_command(Arc::new(NamedCommand("test-two")))
            .build()
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("test-one").is_some());
        assert!(registry.get("missing").is_none());

        let names: Vec<_> = registry.all().iter().map(|command| command.name()).collect();
        assert_eq!(names, vec!["test-one", "test-two"]);
    }

    #[test]
    fn rejects_duplicate_command_names() {
        let result = CommandRegistry::builder()
            .with_command(Arc::new(NamedCommand("test")))
            .with_command(Arc::new(NamedCommand("test")))
            .build();

        assert_eq!(
            result.err(),
            Some(RegistryError::DuplicateCommand("test".to_string()))
        );
    }
}
