use std::sync::Arc;

use crate::{
    cli::{
        ArgType, CommandArg, CommandError, CommandMetadata, CommandParams, CommandRegistry,
        CommandResult, FnCommand, Permission,
    },
    gateway::{GatewayClient, models::SUBSYSTEM},
    mapper::{Source, Value},
};

use super::sequence;

const CATEGORY_NAME: &str = "subsystem";

fn nqn_arg() -> CommandArg {
    CommandArg::required("nqn", ArgType::String, "Subsystem NQN")
}

/// Registers the `subsystem` commands.
pub fn register_commands(
    registry: &mut CommandRegistry,
    client: &GatewayClient,
) -> Result<(), CommandError> {
    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(CATEGORY_NAME, "list", Permission::Read, "List subsystems").arg(
            CommandArg::optional("nqn", ArgType::String, "Only list this subsystem"),
        ),
        move |params| list(&c, params),
    )))?;

    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(CATEGORY_NAME, "get", Permission::Read, "Show one subsystem")
            .arg(nqn_arg()),
        move |params| get(&c, params),
    )))?;

    let c = client.clone();
    registry.register_command_with_modifier(
        Box::new(FnCommand::new(
            CommandMetadata::new(CATEGORY_NAME, "add", Permission::Write, "Create a subsystem")
                .arg(nqn_arg())
                .arg(CommandArg::optional(
                    "max_namespaces",
                    ArgType::Number,
                    "Namespace limit for the subsystem",
                ))
                .arg(CommandArg::optional(
                    "serial_number",
                    ArgType::String,
                    "Serial number reported to hosts",
                ))
                .arg(CommandArg::optional(
                    "enable_ha",
                    ArgType::Boolean,
                    "Enable high availability",
                )),
            move |params| add(&c, params),
        )),
        Arc::new(confirm_created),
    )?;

    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(CATEGORY_NAME, "del", Permission::Write, "Delete a subsystem")
            .arg(nqn_arg())
            .arg(CommandArg::optional(
                "force",
                ArgType::Boolean,
                "Delete even if namespaces remain",
            )),
        move |params| del(&c, params),
    )))?;

    Ok(())
}

fn list(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([("subsystem_nqn", Source::from(params.get("nqn")))]);
    let subsystems = client.collection("list_subsystems", &request, "subsystems", &SUBSYSTEM)?;

    Ok(Some(sequence(subsystems)))
}

fn get(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([("subsystem_nqn", Source::from(params.require("nqn")?))]);
    let subsystem = client.first("list_subsystems", &request, "subsystems", &SUBSYSTEM)?;

    Ok(Some(subsystem.into()))
}

fn add(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([
        ("subsystem_nqn", Source::from(params.require("nqn")?)),
        ("max_namespaces", Source::from(params.integer("max_namespaces")?)),
        ("serial_number", Source::from(params.get("serial_number"))),
        ("enable_ha", Source::from(params.flag("enable_ha")?)),
    ]);
    client.empty("create_subsystem", &request)?;

    Ok(None)
}

fn del(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([
        ("subsystem_nqn", Source::from(params.require("nqn")?)),
        ("force", Source::from(params.flag("force")?.unwrap_or(false))),
    ]);
    client.empty("delete_subsystem", &request)?;

    Ok(None)
}

/// Replaces the empty result of `subsystem add` with the created NQN.
fn confirm_created(
    result: Option<Value>,
    success: bool,
    params: &CommandParams,
    _failure: Option<&CommandError>,
) -> Option<Value> {
    match (success, params.get("nqn")) {
        (true, Some(nqn)) => Some(Value::mapping([
            ("nqn", Value::from(nqn)),
            ("created", Value::Bool(true)),
        ])),
        _ => result,
    }
}
