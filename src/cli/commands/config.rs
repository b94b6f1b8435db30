//! Configuration inspection commands.

use schemars::schema_for;
use serde::Serialize;

use crate::{
    cli::{CommandError, CommandMetadata, CommandRegistry, CommandResult, FnCommand, Permission},
    config::Config,
    mapper::Value,
};

const CATEGORY_NAME: &str = "config";

/// Registers the `config` commands.
pub fn register_commands(
    registry: &mut CommandRegistry,
    config: &Config,
) -> Result<(), CommandError> {
    let effective = config.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(
            CATEGORY_NAME,
            "show",
            Permission::Read,
            "Show the effective configuration",
        ),
        move |_| to_value(&effective),
    )))?;

    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(
            CATEGORY_NAME,
            "schema",
            Permission::Read,
            "Print the JSON schema of the configuration file",
        ),
        |_| to_value(&schema_for!(Config)),
    )))?;

    Ok(())
}

fn to_value<T: Serialize>(value: &T) -> CommandResult {
    let document = serde_json::to_value(value).map_err(|e| CommandError::Serialization {
        format: "json",
        details: e.to_string(),
    })?;

    Ok(Some(Value::from(document)))
}
