//! Gateway management commands, grouped by category.

mod config;
mod connection;
mod gateway;
mod host;
mod listener;
mod namespace;
mod subsystem;

use tracing::debug;

use crate::{
    cli::{CommandError, CommandParams, CommandRegistry},
    config::Config,
    gateway::GatewayClient,
    mapper::{Record, Value},
};

/// Registers every built-in command.
///
/// # Errors
/// Returns `CommandError::DuplicateCommand` if two commands share a name.
pub fn register_all(
    registry: &mut CommandRegistry,
    client: &GatewayClient,
    config: &Config,
) -> Result<(), CommandError> {
    gateway::register_commands(registry, client, config)?;
    subsystem::register_commands(registry, client)?;
    namespace::register_commands(registry, client)?;
    listener::register_commands(registry, client)?;
    host::register_commands(registry, client)?;
    connection::register_commands(registry, client)?;
    config::register_commands(registry, config)?;

    Ok(())
}

/// Output modifier dropping the response status fields, which are always
/// zero once a call has succeeded.
pub(crate) fn strip_status(
    result: Option<Value>,
    success: bool,
    params: &CommandParams,
    failure: Option<&CommandError>,
) -> Option<Value> {
    if !success {
        debug!(?params, ?failure, "command failed before output shaping");
        return None;
    }

    match result {
        Some(Value::Record(record)) => {
            Some(Value::Record(record.without(&["status", "error_message"])))
        }
        other => other,
    }
}

fn sequence(records: Vec<Record>) -> Value {
    Value::Sequence(records.into_iter().map(Value::Record).collect())
}
