use std::collections::HashMap;

use tracing::debug;

use super::{
    ArgType, Command, CommandError, CommandMetadata, CommandOutcome, CommandParams,
    OutputModifier, Permission, dispatch::dispatch, types::FORMAT_PARAM,
};

/// A command together with its optional output modifier.
pub struct RegisteredCommand {
    command: Box<dyn Command>,
    modifier: Option<OutputModifier>,
}

impl RegisteredCommand {
    /// The registered command.
    pub fn command(&self) -> &dyn Command {
        self.command.as_ref()
    }

    /// The output modifier, if one was registered.
    pub fn modifier(&self) -> Option<&OutputModifier> {
        self.modifier.as_ref()
    }
}

/// Name, access class and description of a registered command.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CommandSummary {
    /// Command name within its category.
    pub name: String,
    /// Access class required to run it.
    pub permission: Permission,
    /// Brief description.
    pub description: String,
}

/// Registry for CLI commands organized by category.
///
/// Commands are registered once at startup and looked up by
/// `(category, name)`, e.g. `subsystem list` or `listener add`.
///
/// ```text
/// registry
/// ├── gateway
/// │   ├── info
/// │   └── list
/// ├── subsystem
/// │   ├── add
/// │   ├── del
/// │   └── list
/// └── listener
///     └── list
/// ```
#[derive(Default)]
pub struct CommandRegistry {
    /// Nested HashMap structure: category name -> (command name -> registration)
    categories: HashMap<String, HashMap<String, RegisteredCommand>>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under the category and name from its metadata.
    ///
    /// # Errors
    /// Returns `CommandError::DuplicateCommand` if the name is already taken
    /// in that category.
    pub fn register_command(&mut self, command: Box<dyn Command>) -> Result<(), CommandError> {
        self.insert(command, None)
    }

    /// Registers a command whose results pass through `modifier`.
    ///
    /// # Errors
    /// Returns `CommandError::DuplicateCommand` if the name is already taken
    /// in that category.
    pub fn register_command_with_modifier(
        &mut self,
        command: Box<dyn Command>,
        modifier: OutputModifier,
    ) -> Result<(), CommandError> {
        self.insert(command, Some(modifier))
    }

    fn insert(
        &mut self,
        command: Box<dyn Command>,
        modifier: Option<OutputModifier>,
    ) -> Result<(), CommandError> {
        let metadata = command.metadata();
        let commands = self.categories.entry(metadata.category.clone()).or_default();

        if commands.contains_key(&metadata.name) {
            return Err(CommandError::DuplicateCommand(format!(
                "{} {}",
                metadata.category, metadata.name
            )));
        }

        debug!(category = %metadata.category, command = %metadata.name, "registered command");
        commands.insert(metadata.name, RegisteredCommand { command, modifier });

        Ok(())
    }

    /// Looks up a registered command.
    pub fn get(&self, category: &str, command_name: &str) -> Option<&RegisteredCommand> {
        self.categories.get(category)?.get(command_name)
    }

    /// Runs a command by category and name on behalf of a caller holding `access`.
    ///
    /// Unknown commands, insufficient access and invalid parameters produce
    /// a failed outcome without invoking the command. The output format is
    /// taken from the `format` parameter.
    ///
    /// # Errors
    /// Propagates unclassified failures from [`dispatch`].
    pub fn call(
        &self,
        category: &str,
        command_name: &str,
        params: &CommandParams,
        access: Permission,
    ) -> Result<CommandOutcome, CommandError> {
        match self.resolve(category, command_name, params, access) {
            Ok(registered) => dispatch(
                registered.command(),
                params,
                registered.modifier(),
                params.format(),
            ),
            Err(error) => CommandOutcome::failure(&error).ok_or(error),
        }
    }

    fn resolve(
        &self,
        category: &str,
        command_name: &str,
        params: &CommandParams,
        access: Permission,
    ) -> Result<&RegisteredCommand, CommandError> {
        let found_category = self.categories.get(category).ok_or_else(|| {
            CommandError::CommandNotFound(format!("Failed to find category '{category}'"))
        })?;

        let registered = found_category.get(command_name).ok_or_else(|| {
            CommandError::CommandNotFound(format!("Failed to find command '{command_name}'"))
        })?;

        let metadata = registered.command().metadata();
        if !access.allows(metadata.permission) {
            return Err(CommandError::PermissionDenied(format!(
                "{category} {command_name}"
            )));
        }

        Self::validate_args(&metadata, params)?;

        Ok(registered)
    }

    /// Lists all registered commands organized by category.
    ///
    /// Categories and commands are sorted alphabetically for consistent display.
    pub fn list_commands(&self) -> Vec<(String, Vec<CommandSummary>)> {
        let mut categories: Vec<(String, Vec<CommandSummary>)> = self
            .categories
            .iter()
            .map(|(category, commands)| {
                let mut summaries: Vec<CommandSummary> = commands
                    .values()
                    .map(|registered| {
                        let metadata = registered.command().metadata();
                        CommandSummary {
                            name: metadata.name,
                            permission: metadata.permission,
                            description: metadata.description,
                        }
                    })
                    .collect();
                summaries.sort();

                (category.clone(), summaries)
            })
            .collect();

        categories.sort();

        categories
    }

    fn validate_args(
        metadata: &CommandMetadata,
        params: &CommandParams,
    ) -> Result<(), CommandError> {
        let declared = |name: &str| metadata.args.iter().any(|arg| arg.name == name);

        if let Some(unknown) = params
            .names()
            .find(|name| *name != FORMAT_PARAM && !declared(*name))
        {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown parameter '{unknown}' for '{} {}'",
                metadata.category, metadata.name
            )));
        }

        for arg in &metadata.args {
            if arg.required {
                params.require(&arg.name)?;
            }

            match arg.value_type {
                ArgType::Number => {
                    params.integer(&arg.name)?;
                }
                ArgType::Boolean => {
                    params.flag(&arg.name)?;
                }
                ArgType::String => {}
            }
        }

        Ok(())
    }
}
