use crate::{
    cli::{
        ArgType, CommandArg, CommandError, CommandMetadata, CommandParams, CommandRegistry,
        CommandResult, FnCommand, Permission,
    },
    gateway::{GatewayClient, models::CONNECTION},
    mapper::Source,
};

use super::sequence;

/// Registers the `connection` commands.
pub fn register_commands(
    registry: &mut CommandRegistry,
    client: &GatewayClient,
) -> Result<(), CommandError> {
    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(
            "connection",
            "list",
            Permission::Read,
            "List host connections to a subsystem",
        )
        .arg(CommandArg::required("nqn", ArgType::String, "Subsystem NQN")),
        move |params| list(&c, params),
    )))
}

fn list(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([("subsystem", Source::from(params.require("nqn")?))]);
    let connections =
        client.collection("list_connections", &request, "connections", &CONNECTION)?;

    Ok(Some(sequence(connections)))
}
