use std::{collections::BTreeMap, sync::Arc};

use crate::{
    cli::{
        CommandError, CommandMetadata, CommandRegistry, CommandResult, FnCommand, Permission,
    },
    config::{Config, GatewaySettings},
    gateway::{GatewayClient, models::GATEWAY_INFO},
    mapper::{Source, Value},
};

use super::strip_status;

const CATEGORY_NAME: &str = "gateway";

/// Registers the `gateway` commands.
pub fn register_commands(
    registry: &mut CommandRegistry,
    client: &GatewayClient,
    config: &Config,
) -> Result<(), CommandError> {
    let info_client = client.clone();
    registry.register_command_with_modifier(
        Box::new(FnCommand::new(
            CommandMetadata::new(
                CATEGORY_NAME,
                "info",
                Permission::Read,
                "Show information about the connected gateway",
            ),
            move |_| info(&info_client),
        )),
        Arc::new(strip_status),
    )?;

    let settings = config.gateway.clone();
    registry.register_command(Box::new(FnCommand::new(
        CommandMetadata::new(
            CATEGORY_NAME,
            "list",
            Permission::Read,
            "List configured gateways by group",
        ),
        move |_| list(&settings),
    )))?;

    Ok(())
}

fn info(client: &GatewayClient) -> CommandResult {
    let request = Source::mapping([("cli_version", Source::from(env!("CARGO_PKG_VERSION")))]);
    let info = client.model("get_gateway_info", &request, &GATEWAY_INFO)?;

    Ok(Some(info.into()))
}

/// Lists configured gateways, limited to the selected group when one is set.
fn list(settings: &GatewaySettings) -> CommandResult {
    let groups: BTreeMap<_, _> = match &settings.group {
        Some(name) => {
            let group = settings
                .groups
                .get_key_value(name)
                .ok_or_else(|| CommandError::NotFound(format!("Gateway group '{name}'")))?;
            BTreeMap::from([group])
        }
        None => settings.groups.iter().collect(),
    };

    let groups = serde_json::to_value(&groups).map_err(|e| {
        CommandError::Serialization {
            format: "json",
            details: e.to_string(),
        }
    })?;

    Ok(Some(Value::mapping([("gateways", Value::from(groups))])))
}
