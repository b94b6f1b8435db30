//! Command-line interface for gateway management.
//!
//! Commands are registered once at startup in a [`CommandRegistry`],
//! organized by category. Every call goes through [`dispatch`], which
//! applies the command's output modifier, serializes the payload as JSON or
//! YAML and converts classified failures into a [`CommandOutcome`].

mod commands;
mod dispatch;
pub mod formatting;
mod registry;
mod service;
mod types;


pub use dispatch::{CommandOutcome, OutputFormat, OutputModifier, dispatch};
pub use registry::{CommandRegistry, CommandSummary, RegisteredCommand};
pub use service::CliService;
pub use types::{
    ArgType, Command, CommandArg, CommandError, CommandMetadata, CommandParams, CommandResult,
    FORMAT_PARAM, FnCommand, Permission,
};
