use std::{collections::BTreeMap, fmt};

use thiserror::Error;

use crate::mapper::{MapError, Value};

/// Caller parameter that selects the output format.
pub const FORMAT_PARAM: &str = "format";

/// Errors that can occur while registering, validating or running commands.
///
/// The remote-call kinds, `NotFound`, and the argument/lookup kinds form the
/// classified set: [`CommandError::exit_code`] maps each to a fixed negative
/// errno and the dispatcher turns them into a failed [`CommandOutcome`](super::CommandOutcome).
/// Mapping defects and serialization failures are unclassified and propagate
/// to the caller.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The gateway could not be reached or the transport failed.
    #[error("gateway unavailable ({code}): {details}")]
    RemoteUnavailable {
        /// Transport status code, e.g. "UNAVAILABLE"
        code: String,
        /// Transport diagnostic
        details: String,
    },

    /// The gateway executed the call and reported an error status.
    #[error("gateway rejected request (status {status}): {message}")]
    RemoteRejected {
        /// Status code returned by the gateway
        status: i64,
        /// Error message returned by the gateway
        message: String,
    },

    /// The requested output format is not one of the recognized formats.
    #[error("format '{0}' is not implemented")]
    UnsupportedFormat(String),

    /// The gateway answered with no matching entry.
    #[error("{0} not found")]
    NotFound(String),

    /// Caller parameters failed validation.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No command is registered under the requested name.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// A read-only caller invoked a read-write command.
    #[error("Permission denied: '{0}' requires read-write access")]
    PermissionDenied(String),

    /// A command with the same name is already registered in the category.
    #[error("Command '{0}' is already registered")]
    DuplicateCommand(String),

    /// Shaping a gateway response failed.
    #[error("failed to shape gateway response: {0}")]
    Mapping(#[from] MapError),

    /// Encoding the payload failed.
    #[error("failed to serialize {format} output: {details}")]
    Serialization {
        /// Requested format
        format: &'static str,
        /// Encoder diagnostic
        details: String,
    },
}

impl CommandError {
    /// Exit code for classified failures, `None` for failures that must
    /// propagate to the caller's own handler.
    pub fn exit_code(&self) -> Option<i32> {
        let errno = match self {
            CommandError::RemoteUnavailable { .. } => libc::EHOSTUNREACH,
            CommandError::RemoteRejected { .. } => libc::EREMOTEIO,
            CommandError::NotFound(_) => libc::ENOENT,
            CommandError::UnsupportedFormat(_)
            | CommandError::InvalidArguments(_)
            | CommandError::CommandNotFound(_) => libc::EINVAL,
            CommandError::PermissionDenied(_) => libc::EACCES,
            CommandError::DuplicateCommand(_)
            | CommandError::Mapping(_)
            | CommandError::Serialization { .. } => return None,
        };

        Some(-errno)
    }

    /// True when the dispatcher converts this failure into an exit triple.
    pub fn is_classified(&self) -> bool {
        self.exit_code().is_some()
    }
}

/// Result of running a command's operation: a payload, no payload, or a failure.
pub type CommandResult = Result<Option<Value>, CommandError>;

/// Access class of a command, and of a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Permission {
    /// Only inspects gateway state.
    Read,

    /// Changes gateway state.
    Write,
}

impl Permission {
    /// Whether a caller holding `self` may run a command requiring `required`.
    pub fn allows(self, required: Permission) -> bool {
        self >= required
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Read => write!(f, "r"),
            Permission::Write => write!(f, "rw"),
        }
    }
}

/// Specification for a single command parameter.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the parameter (e.g., "nqn", "traddr").
    pub name: String,

    /// Human-readable description of what this parameter does.
    pub description: String,

    /// Whether this parameter is required for command execution.
    pub required: bool,

    /// The expected type of this parameter for validation and help display.
    pub value_type: ArgType,
}

impl CommandArg {
    /// Required parameter.
    pub fn required(name: &str, value_type: ArgType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            value_type,
        }
    }

    /// Optional parameter.
    pub fn optional(name: &str, value_type: ArgType, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, value_type, description)
        }
    }
}

/// Type classification for command parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A general string value.
    String,

    /// An integer value.
    Number,

    /// A boolean value (true/false).
    Boolean,
}

/// Complete metadata for a registered command.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "list", "add").
    pub name: String,

    /// Category this command belongs to (e.g., "subsystem", "listener").
    pub category: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Access class required to run the command.
    pub permission: Permission,

    /// Specification of all parameters this command accepts.
    pub args: Vec<CommandArg>,
}

impl CommandMetadata {
    /// Metadata with no parameters.
    pub fn new(category: &str, name: &str, permission: Permission, description: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            permission,
            args: Vec::new(),
        }
    }

    /// Adds a parameter specification.
    pub fn arg(mut self, arg: CommandArg) -> Self {
        self.args.push(arg);
        self
    }
}

/// String-keyed parameter set supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandParams {
    values: BTreeMap<String, String>,
}

impl CommandParams {
    /// Empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Parses `key=value` words as given on the command line.
    ///
    /// # Errors
    /// Returns `CommandError::InvalidArguments` for a word without `=` or with an empty key.
    pub fn parse<I, S>(words: I) -> Result<Self, CommandError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();

        for word in words {
            let word = word.as_ref();
            let (name, value) = word
                .split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "Expected <name>=<value>, got '{word}'"
                    ))
                })?;
            params.values.insert(name.to_string(), value.to_string());
        }

        Ok(params)
    }

    /// Raw parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Requested output format; empty counts as unspecified.
    pub fn format(&self) -> Option<&str> {
        self.get(FORMAT_PARAM).filter(|format| !format.is_empty())
    }

    /// Value of a required parameter.
    ///
    /// # Errors
    /// Returns `CommandError::InvalidArguments` if the parameter is absent.
    pub fn require(&self, name: &str) -> Result<&str, CommandError> {
        self.get(name).ok_or_else(|| {
            CommandError::InvalidArguments(format!("Missing required parameter '{name}'"))
        })
    }

    /// Integer value of an optional parameter.
    ///
    /// # Errors
    /// Returns `CommandError::InvalidArguments` if the value is not an integer.
    pub fn integer(&self, name: &str) -> Result<Option<i64>, CommandError> {
        self.get(name)
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "Parameter '{name}' expects a number, got '{raw}'"
                    ))
                })
            })
            .transpose()
    }

    /// Boolean value of an optional parameter.
    ///
    /// # Errors
    /// Returns `CommandError::InvalidArguments` if the value is not `true` or `false`.
    pub fn flag(&self, name: &str) -> Result<Option<bool>, CommandError> {
        self.get(name)
            .map(|raw| {
                raw.parse::<bool>().map_err(|_| {
                    CommandError::InvalidArguments(format!(
                        "Parameter '{name}' expects true or false, got '{raw}'"
                    ))
                })
            })
            .transpose()
    }

    /// Parameter names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their collaborators (gateway, configuration) through
/// their constructors and are invoked with the caller's parameters.
pub trait Command: Send + Sync {
    /// Runs the command's operation.
    ///
    /// Parameters have already been checked against [`Command::metadata`]
    /// when the call arrives through the registry.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for any execution failure, including:
    /// - Gateway transport failures and error statuses
    /// - Invalid parameter values
    /// - Response shaping defects
    fn execute(&self, params: &CommandParams) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}

/// Command built from metadata and a closure.
pub struct FnCommand<F> {
    metadata: CommandMetadata,
    operation: F,
}

impl<F> FnCommand<F>
where
    F: Fn(&CommandParams) -> CommandResult + Send + Sync,
{
    /// Wraps `operation` under the given metadata.
    pub fn new(metadata: CommandMetadata, operation: F) -> Self {
        Self {
            metadata,
            operation,
        }
    }
}

impl<F> Command for FnCommand<F>
where
    F: Fn(&CommandParams) -> CommandResult + Send + Sync,
{
    fn execute(&self, params: &CommandParams) -> CommandResult {
        (self.operation)(params)
    }

    fn metadata(&self) -> CommandMetadata {
        self.metadata.clone()
    }
}
