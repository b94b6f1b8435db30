use crate::{
    cli::{
        ArgType, CommandArg, CommandError, CommandMetadata, CommandParams, CommandRegistry,
        CommandResult, FnCommand, Permission,
    },
    gateway::{GatewayClient, models::LISTENER},
    mapper::Source,
};

use super::sequence;

const CATEGORY_NAME: &str = "listener";
const DEFAULT_TRSVCID: i64 = 4420;
const DEFAULT_ADRFAM: &str = "ipv4";

fn address_args(metadata: CommandMetadata) -> CommandMetadata {
    metadata
        .arg(CommandArg::required("nqn", ArgType::String, "Subsystem NQN"))
        .arg(CommandArg::required(
            "host_name",
            ArgType::String,
            "Gateway host running the listener",
        ))
        .arg(CommandArg::required("traddr", ArgType::String, "Listener address"))
        .arg(CommandArg::optional(
            "trsvcid",
            ArgType::Number,
            "Listener port (default 4420)",
        ))
        .arg(CommandArg::optional(
            "adrfam",
            ArgType::String,
            "Address family, ipv4 or ipv6 (default ipv4)",
        ))
}

/// Registers the `listener` commands.
pub fn register_commands(
    registry: &mut CommandRegistry,
    client: &GatewayClient,
) -> Result<(), CommandError> {
    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(
            CATEGORY_NAME,
            "list",
            Permission::Read,
            "List listeners of a subsystem",
        )
        .arg(CommandArg::required("nqn", ArgType::String, "Subsystem NQN")),
        move |params| list(&c, params),
    )))?;

    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        address_args(CommandMetadata::new(
            CATEGORY_NAME,
            "add",
            Permission::Write,
            "Create a listener",
        )),
        move |params| change(&c, "create_listener", params),
    )))?;

    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        address_args(CommandMetadata::new(
            CATEGORY_NAME,
            "del",
            Permission::Write,
            "Delete a listener",
        )),
        move |params| change(&c, "delete_listener", params),
    )))?;

    Ok(())
}

fn list(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([("subsystem", Source::from(params.require("nqn")?))]);
    let listeners = client.collection("list_listeners", &request, "listeners", &LISTENER)?;

    Ok(Some(sequence(listeners)))
}

fn change(client: &GatewayClient, method: &str, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([
        ("nqn", Source::from(params.require("nqn")?)),
        ("host_name", Source::from(params.require("host_name")?)),
        ("traddr", Source::from(params.require("traddr")?)),
        (
            "trsvcid",
            Source::from(params.integer("trsvcid")?.unwrap_or(DEFAULT_TRSVCID)),
        ),
        (
            "adrfam",
            Source::from(params.get("adrfam").unwrap_or(DEFAULT_ADRFAM)),
        ),
    ]);
    client.empty(method, &request)?;

    Ok(None)
}
