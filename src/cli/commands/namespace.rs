use std::sync::Arc;

use crate::{
    cli::{
        ArgType, CommandArg, CommandError, CommandMetadata, CommandParams, CommandRegistry,
        CommandResult, FnCommand, Permission,
    },
    gateway::{
        GatewayClient,
        models::{NAMESPACE_LIST, NSID_STATUS},
    },
    mapper::Source,
};

use super::strip_status;

const CATEGORY_NAME: &str = "namespace";

/// Registers the `namespace` commands.
pub fn register_commands(
    registry: &mut CommandRegistry,
    client: &GatewayClient,
) -> Result<(), CommandError> {
    let nqn = || CommandArg::required("nqn", ArgType::String, "Subsystem NQN");

    let c = client.clone();
    registry.register_command_with_modifier(
        Box::new(FnCommand::new(
            CommandMetadata::new(
                CATEGORY_NAME,
                "list",
                Permission::Read,
                "List namespaces of a subsystem",
            )
            .arg(nqn())
            .arg(CommandArg::optional("nsid", ArgType::Number, "Only list this namespace")),
            move |params| list(&c, params),
        )),
        Arc::new(strip_status),
    )?;

    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(
            CATEGORY_NAME,
            "add",
            Permission::Write,
            "Add an RBD image as a namespace",
        )
        .arg(nqn())
        .arg(CommandArg::required("rbd_pool", ArgType::String, "RBD pool name"))
        .arg(CommandArg::required("rbd_image", ArgType::String, "RBD image name"))
        .arg(CommandArg::optional("nsid", ArgType::Number, "Requested namespace ID"))
        .arg(CommandArg::optional("block_size", ArgType::Number, "Block size in bytes"))
        .arg(CommandArg::optional(
            "load_balancing_group",
            ArgType::Number,
            "Load balancing group",
        )),
        move |params| add(&c, params),
    )))?;

    let c = client.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(CATEGORY_NAME, "del", Permission::Write, "Delete a namespace")
            .arg(nqn())
            .arg(CommandArg::required("nsid", ArgType::Number, "Namespace ID")),
        move |params| del(&c, params),
    )))?;

    Ok(())
}

fn list(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([
        ("subsystem", Source::from(params.require("nqn")?)),
        ("nsid", Source::from(params.integer("nsid")?)),
    ]);
    let namespaces = client.model("list_namespaces", &request, &NAMESPACE_LIST)?;

    Ok(Some(namespaces.into()))
}

fn add(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([
        ("subsystem_nqn", Source::from(params.require("nqn")?)),
        ("rbd_pool_name", Source::from(params.require("rbd_pool")?)),
        ("rbd_image_name", Source::from(params.require("rbd_image")?)),
        ("nsid", Source::from(params.integer("nsid")?)),
        ("block_size", Source::from(params.integer("block_size")?)),
        (
            "anagrpid",
            Source::from(params.integer("load_balancing_group")?),
        ),
    ]);
    let nsid = client.pick("namespace_add", &request, "nsid", &NSID_STATUS)?;

    Ok(Some(nsid))
}

fn del(client: &GatewayClient, params: &CommandParams) -> CommandResult {
    let request = Source::mapping([
        ("subsystem_nqn", Source::from(params.require("nqn")?)),
        ("nsid", Source::from(params.integer("nsid")?)),
    ]);
    client.empty("namespace_delete", &request)?;

    Ok(None)
}
