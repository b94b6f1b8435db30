//! Uniform invocation of command operations.
//!
//! [`dispatch`] runs an operation, applies the optional output modifier,
//! serializes the payload in the requested format and converts classified
//! failures into a `(retval, stdout, stderr)` triple. Nothing is retained
//! between invocations.

use std::{fmt, sync::Arc};

use tracing::{debug, instrument};

use super::{
    Command, CommandError, CommandParams,
    formatting::{to_json, to_yaml},
};
use crate::mapper::Value;

/// Post-processing hook run once per dispatch.
///
/// Called as `(result, true, params, None)` on success, where its return
/// value replaces the result, and as `(None, false, params, Some(failure))`
/// on a classified failure, where its return value is ignored.
pub type OutputModifier = Arc<
    dyn Fn(Option<Value>, bool, &CommandParams, Option<&CommandError>) -> Option<Value>
        + Send
        + Sync,
>;

/// Formatted result of a command call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Zero on success, a negative errno otherwise.
    pub retval: i32,
    /// Serialized payload; empty on failure or when there is no payload.
    pub stdout: String,
    /// Diagnostic message; empty on success.
    pub stderr: String,
}

impl CommandOutcome {
    /// Successful outcome carrying `stdout`.
    pub fn success(stdout: String) -> Self {
        Self {
            retval: 0,
            stdout,
            stderr: String::new(),
        }
    }

    /// Failed outcome for a classified error, `None` for unclassified ones.
    pub fn failure(error: &CommandError) -> Option<Self> {
        error.exit_code().map(|retval| Self {
            retval,
            stdout: String::new(),
            stderr: error.to_string(),
        })
    }

    /// True when `retval` is zero.
    pub fn is_success(&self) -> bool {
        self.retval == 0
    }
}

/// Recognized output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Single-line JSON document (default).
    #[default]
    Json,

    /// YAML document.
    Yaml,
}

impl OutputFormat {
    /// Resolves the caller's requested format. Unset or empty means JSON.
    ///
    /// # Errors
    /// Returns `CommandError::UnsupportedFormat` for any other unrecognized value.
    pub fn from_request(requested: Option<&str>) -> Result<Self, CommandError> {
        match requested {
            None | Some("") | Some("json") => Ok(OutputFormat::Json),
            Some("yaml") => Ok(OutputFormat::Yaml),
            Some(other) => Err(CommandError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Encodes `payload` in this format.
    ///
    /// # Errors
    /// Returns `CommandError::Serialization` if encoding fails.
    pub fn encode(self, payload: &Value) -> Result<String, CommandError> {
        match self {
            OutputFormat::Json => to_json(payload),
            OutputFormat::Yaml => to_yaml(payload),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Invokes `command` and formats its result.
///
/// # Errors
/// Unclassified failures (response shaping defects, encoder failures) are
/// returned as `Err` without invoking the modifier. Every classified
/// failure becomes an `Ok` outcome with a non-zero `retval`.
#[instrument(skip_all, fields(command = %command.metadata().name))]
pub fn dispatch(
    command: &dyn Command,
    params: &CommandParams,
    modifier: Option<&OutputModifier>,
    format: Option<&str>,
) -> Result<CommandOutcome, CommandError> {
    match command.execute(params) {
        Ok(result) => {
            let result = match modifier {
                Some(modify) => modify(result, true, params, None),
                None => result,
            };
            serialize(result.as_ref(), format)
        }
        Err(error) => {
            let Some(outcome) = CommandOutcome::failure(&error) else {
                return Err(error);
            };

            if let Some(modify) = modifier {
                let _ = modify(None, false, params, Some(&error));
            }

            debug!(retval = outcome.retval, "{error}");
            Ok(outcome)
        }
    }
}

fn serialize(
    payload: Option<&Value>,
    format: Option<&str>,
) -> Result<CommandOutcome, CommandError> {
    let format = match OutputFormat::from_request(format) {
        Ok(format) => format,
        Err(error) => {
            debug!("{error}");
            return CommandOutcome::failure(&error).ok_or(error);
        }
    };

    match payload {
        None | Some(Value::Null) => {
            debug!(%format, "command produced no payload");
            Ok(CommandOutcome::success(String::new()))
        }
        Some(payload) => format.encode(payload).map(CommandOutcome::success),
    }
}
