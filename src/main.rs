//! nvmeof-cli - management commands for Ceph NVMe-oF gateways
//!
//! Runs one `<category> <command> [name=value ...]` invocation, prints the
//! formatted payload on stdout and any diagnostic on stderr, and exits with
//! the absolute value of the command's return code.

use std::{error::Error, path::PathBuf, process, sync::Arc};

use clap::Parser;
use nvmeof_cli::{
    cli::{
        CliService, CommandParams, FORMAT_PARAM,
        formatting::{format_error, format_help},
    },
    config::Config,
    gateway::{Disconnected, Gateway, ReplayGateway},
    tracing_config,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "nvmeof-cli")]
#[command(about = "Manage Ceph NVMe-oF gateways", version)]
struct Cli {
    /// Configuration file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format (json or yaml)
    #[arg(short, long)]
    format: Option<String>,

    /// Serve gateway calls from a JSON file of canned responses
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Refuse commands that change gateway state
    #[arg(long)]
    read_only: bool,

    /// Command category, or `help`
    category: Option<String>,

    /// Command within the category
    command: Option<String>,

    /// Command parameters as name=value
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    params: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}: {e}", format_error("Error"));
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => Config::load_with_imports(path)?,
        None => Config::load()?,
    };

    let _guard = if config.general.log_file {
        Some(tracing_config::init_with_file(config.general.log_level)?)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };

    let gateway = connect(&cli, &config)?;
    let mut service = CliService::new(&config, gateway)?;
    if cli.read_only {
        service = service.read_only();
    }

    let category = cli.category.as_deref().unwrap_or("help");
    if category == "help" {
        println!("{}", format_help(&service.list_all()));
        return Ok(0);
    }

    let Some(command) = cli.command.as_deref() else {
        eprintln!(
            "{}",
            format_error(&format!("Missing command for category '{category}'"))
        );
        eprintln!("{}", format_help(&service.list_all()));
        return Ok(libc::EINVAL);
    };

    let mut params = match CommandParams::parse(&cli.params) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            return Ok(libc::EINVAL);
        }
    };
    if let Some(format) = &cli.format {
        params = params.with(FORMAT_PARAM, format);
    }

    let outcome = service.execute_command(category, command, &params)?;

    if !outcome.stdout.is_empty() {
        println!("{}", outcome.stdout);
    }
    if !outcome.stderr.is_empty() {
        eprintln!("{}", format_error(&outcome.stderr));
    }

    debug!(retval = outcome.retval, "command finished");
    Ok(outcome.retval.saturating_abs())
}

fn connect(cli: &Cli, config: &Config) -> Result<Arc<dyn Gateway>, Box<dyn Error>> {
    let replay = cli.replay.as_ref().or(config.gateway.replay_file.as_ref());

    match replay {
        Some(path) => {
            info!(path = %path.display(), "Serving gateway calls from replay file");
            Ok(Arc::new(ReplayGateway::from_file(path)?))
        }
        None => Ok(Arc::new(Disconnected)),
    }
}
