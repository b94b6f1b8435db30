use std::sync::Arc;

use tracing::info;

use crate::{
    config::Config,
    gateway::{Gateway, GatewayClient},
    mapper::Mapper,
};

use super::{
    CommandError, CommandOutcome, CommandParams, CommandRegistry, CommandSummary, Permission,
    commands,
};

/// High-level service for managing and executing CLI commands.
///
/// Provides a unified interface for command registration, discovery, and execution.
/// Commands are organized by category and can be listed or executed by name.
pub struct CliService {
    registry: CommandRegistry,
    access: Permission,
}

impl CliService {
    /// Creates a new CLI service with all built-in commands registered.
    ///
    /// Gateway-backed commands share `gateway`; responses are shaped with
    /// the configured depth ceiling. Callers get read-write access unless
    /// the configuration marks them read-only.
    ///
    /// # Errors
    /// Returns `CommandError::DuplicateCommand` if built-in registrations collide.
    pub fn new(config: &Config, gateway: Arc<dyn Gateway>) -> Result<Self, CommandError> {
        let client = GatewayClient::new(gateway, Mapper::new(config.mapper.max_depth));
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry, &client, config)?;

        let access = if config.general.read_only {
            Permission::Read
        } else {
            Permission::Write
        };
        info!(%access, max_depth = config.mapper.max_depth, "CLI service ready");

        Ok(CliService { registry, access })
    }

    /// Restricts this service to read-only commands.
    pub fn read_only(mut self) -> Self {
        self.access = Permission::Read;
        self
    }

    /// Executes a command by category and name with the provided parameters.
    ///
    /// # Errors
    /// Propagates unclassified failures such as response shaping defects;
    /// classified failures come back as an outcome with a non-zero `retval`.
    pub fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        params: &CommandParams,
    ) -> Result<CommandOutcome, CommandError> {
        self.registry.call(category, command_name, params, self.access)
    }

    /// Lists all available commands organized by category.
    pub fn list_all(&self) -> Vec<(String, Vec<CommandSummary>)> {
        self.registry.list_commands()
    }
}
