use std::sync::Arc;

use crate::{
    cli::{
        ArgType, CommandArg, CommandError, CommandMetadata, CommandParams, CommandRegistry,
        CommandResult, FnCommand, Permission,
    },
    gateway::{GatewayClient, models::HOSTS_INFO},
    mapper::Source,
};

use super::strip_status;

const CATEGORY_NAME: &str = "host";

/// Registers the `host` commands.
pub fn register_commands(
    registry: &mut CommandRegistry,
    client: &GatewayClient,
) -> Result<(), CommandError> {
    let nqn = || CommandArg::required("nqn", ArgType::String, "Subsystem NQN");
    let host_nqn =
        || CommandArg::required("host_nqn", ArgType::String, "Host NQN, or * for any host");

    let c = client.clone();
    registry.register_command_with_modifier(
        Box::new(FnCommand::new(
            CommandMetadata::new(
                CATEGORY_NAME,
                "list",
                Permission::Read,
                "List hosts allowed to connect to a subsystem",
            )
            .arg(nqn()),
            move |params| list(&c, params),
        )),
        Arc::new(strip_status),
    )?;

    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(CATEGORY_NAME, "add", Permission::Write, "Allow a host")
            .arg(nqn())
            .arg(host_nqn()),
        move |params| change(&c, "add_host", params),
    )))?;

    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(CATEGORY_NAME, "del", Permission::Write, "Disallow a host")
            .arg(nqn())
            .arg(host_nqn()),
        move |params| change(&c, "remove_host", params),
    )))?;

    Ok(())
}

fn list(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([("subsystem", Source::from(params.require("nqn")?))]);
    let hosts = client.model("list_hosts", &request, &HOSTS_INFO)?;

    Ok(Some(hosts.into()))
}

fn change(client: &GatewayClient, method: &str, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([
        ("subsystem_nqn", Source::from(params.require("nqn")?)),
        ("host_nqn", Source::from(params.require("host_nqn")?)),
    ]);
    client.empty(method, &request)?;

    Ok(None)
}
