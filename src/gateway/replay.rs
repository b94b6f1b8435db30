use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::{Gateway, TransportError};
use crate::mapper::Source;

/// Key marking a scripted transport failure in a replay file.
const TRANSPORT_ERROR_KEY: &str = "$transport_error";

/// Errors raised while loading a replay file.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// The replay file could not be read.
    #[error("failed to read replay file '{path}': {details}")]
    Io {
        /// Replay file path
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// The replay file is not a JSON object of method responses.
    #[error("failed to parse replay file '{path}': {details}")]
    Parse {
        /// Replay file path
        path: PathBuf,
        /// Parse error details
        details: String,
    },
}

#[derive(Debug, Clone)]
enum Scripted {
    Response(Source),
    Failure(TransportError),
}

#[derive(Deserialize)]
struct ScriptedFailure {
    code: String,
    details: String,
}

/// Gateway answering from canned responses.
///
/// Used for offline runs of the CLI and in tests. Every call is recorded.
/// A replay file is a JSON object mapping method names to responses:
///
/// ```json
/// {
///   "get_gateway_info": {"status": 0, "name": "gw-1", "group": "east"},
///   "list_subsystems": {"$transport_error": {"code": "UNAVAILABLE", "details": "down"}}
/// }
/// ```
#[derive(Debug, Default)]
pub struct ReplayGateway {
    scripted: HashMap<String, Scripted>,
    calls: Mutex<Vec<(String, Source)>>,
}

impl ReplayGateway {
    /// Gateway with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `method` to answer with `response`.
    pub fn respond(mut self, method: &str, response: impl Into<Source>) -> Self {
        self.scripted
            .insert(method.to_string(), Scripted::Response(response.into()));
        self
    }

    /// Scripts `method` to fail at the transport level.
    pub fn fail(mut self, method: &str, error: TransportError) -> Self {
        self.scripted
            .insert(method.to_string(), Scripted::Failure(error));
        self
    }

    /// Loads scripted responses from a JSON replay file.
    ///
    /// # Errors
    /// Returns `ReplayError` if the file cannot be read or parsed.
    #[instrument]
    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let content = fs::read_to_string(path).map_err(|e| ReplayError::Io {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        let parse_error = |details: String| ReplayError::Parse {
            path: path.to_path_buf(),
            details,
        };

        let entries: HashMap<String, serde_json::Value> =
            serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;

        let mut gateway = Self::new();
        for (method, entry) in entries {
            let scripted = match entry.get(TRANSPORT_ERROR_KEY) {
                Some(failure) => {
                    let failure: ScriptedFailure = serde_json::from_value(failure.clone())
                        .map_err(|e| parse_error(format!("{method}: {e}")))?;
                    Scripted::Failure(TransportError {
                        code: failure.code,
                        details: failure.details,
                    })
                }
                None => Scripted::Response(Source::from(entry)),
            };
            gateway.scripted.insert(method, scripted);
        }

        debug!(methods = gateway.scripted.len(), "loaded replay file");
        Ok(gateway)
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<(String, Source)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Names of the methods called so far, oldest first.
    pub fn called_methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }
}

impl Gateway for ReplayGateway {
    fn call(&self, method: &str, request: &Source) -> Result<Source, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((method.to_string(), request.clone()));
        }

        match self.scripted.get(method) {
            Some(Scripted::Response(response)) => Ok(response.clone()),
            Some(Scripted::Failure(error)) => Err(error.clone()),
            None => Err(TransportError {
                code: "UNIMPLEMENTED".to_string(),
                details: format!("no replay response for '{method}'"),
            }),
        }
    }
}
