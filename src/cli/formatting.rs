//! Formatting utilities for CLI output.
//!
//! Encodes command payloads as JSON or YAML documents and styles help
//! and diagnostic text for the terminal.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

use super::{CommandError, registry::CommandSummary};

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Blue color
    pub const BLUE: &'static str = "\x1b[34m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats category names with styling
pub fn format_category(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::BLUE, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats permission markers with styling
pub fn format_permission(text: &str) -> String {
    format!("{}{}{}", Colors::YELLOW, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Renders the command list grouped by category.
///
/// ```text
/// Commands
///   subsystem
///     add [rw]  Create a subsystem
///     list [r]  List subsystems
/// ```
pub fn format_help(categories: &[(String, Vec<CommandSummary>)]) -> String {
    let mut lines = vec![format_header("Commands")];

    for (category, commands) in categories {
        lines.push(format!("  {}", format_category(category)));
        for command in commands {
            lines.push(format!(
                "    {} {}  {}",
                format_command(&command.name),
                format_permission(&format!("[{}]", command.permission)),
                format_description(&command.description),
            ));
        }
    }

    lines.join("\n")
}

/// JSON formatter writing `", "` and `": "` separators, e.g. `{"a": "b"}`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Encodes a payload as a single-line JSON document.
///
/// # Examples
///
/// ```
/// use nvmeof_cli::cli::formatting::to_json;
/// use nvmeof_cli::mapper::Value;
///
/// let payload = Value::mapping([("a", Value::from("b"))]);
/// assert_eq!(to_json(&payload).unwrap(), r#"{"a": "b"}"#);
/// ```
///
/// # Errors
/// Returns `CommandError::Serialization` if the payload cannot be encoded.
pub fn to_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, CommandError> {
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), SpacedFormatter);
    payload
        .serialize(&mut serializer)
        .map_err(|e| serialization_error("json", e))?;

    String::from_utf8(serializer.into_inner()).map_err(|e| serialization_error("json", e))
}

/// Encodes a payload as a YAML document.
///
/// # Errors
/// Returns `CommandError::Serialization` if the payload cannot be encoded.
pub fn to_yaml<T: Serialize + ?Sized>(payload: &T) -> Result<String, CommandError> {
    serde_yaml::to_string(payload).map_err(|e| serialization_error("yaml", e))
}

fn serialization_error(format: &'static str, error: impl std::fmt::Display) -> CommandError {
    CommandError::Serialization {
        format,
        details: error.to_string(),
    }
}
