use std::sync::Arc;

use tracing::{debug, instrument};

use super::Gateway;
use crate::{
    cli::CommandError,
    mapper::{Mapper, Record, Schema, Source, Value},
};

/// Checked, schema-shaping access to a [`Gateway`].
///
/// Cloning is cheap; commands each hold their own handle.
#[derive(Clone)]
pub struct GatewayClient {
    gateway: Arc<dyn Gateway>,
    mapper: Mapper,
}

impl GatewayClient {
    /// Wraps `gateway`, shaping responses with `mapper`.
    pub fn new(gateway: Arc<dyn Gateway>, mapper: Mapper) -> Self {
        Self { gateway, mapper }
    }

    /// Runs a call and checks its status.
    ///
    /// # Errors
    /// * `CommandError::RemoteUnavailable` - the transport failed
    /// * `CommandError::RemoteRejected` - the response status is non-zero
    #[instrument(skip(self, request))]
    pub fn call(&self, method: &str, request: &Source) -> Result<Source, CommandError> {
        let response = self.gateway.call(method, request).map_err(|e| {
            CommandError::RemoteUnavailable {
                code: e.code,
                details: e.details,
            }
        })?;

        let status = response.lookup("status").map_or(0, |status| status_code(&status));

        if status != 0 {
            let message = response
                .lookup("error_message")
                .and_then(|message| message.as_str().map(str::to_string))
                .unwrap_or_default();
            return Err(CommandError::RemoteRejected { status, message });
        }

        debug!("gateway call succeeded");
        Ok(response)
    }

    /// Shapes the whole response of `method` as a `schema` record.
    ///
    /// # Errors
    /// Call failures from [`GatewayClient::call`] and `CommandError::Mapping`.
    pub fn model(
        &self,
        method: &str,
        request: &Source,
        schema: &Schema,
    ) -> Result<Record, CommandError> {
        let response = self.call(method, request)?;
        Ok(self.mapper.map(&response, schema)?)
    }

    /// Shapes the first element of the repeated field `pick`.
    ///
    /// # Errors
    /// `CommandError::NotFound` when the field is missing or empty, plus
    /// everything [`GatewayClient::model`] returns.
    pub fn first(
        &self,
        method: &str,
        request: &Source,
        pick: &str,
        schema: &Schema,
    ) -> Result<Record, CommandError> {
        let response = self.call(method, request)?;

        let first = match response.lookup(pick).as_deref() {
            Some(Source::List(items)) => items.first().cloned(),
            _ => None,
        }
        .ok_or_else(|| CommandError::NotFound(schema.name().to_string()))?;

        Ok(self.mapper.map(&first, schema)?)
    }

    /// Shapes every element of the repeated field `pick`.
    ///
    /// A missing field yields an empty collection.
    ///
    /// # Errors
    /// Same as [`GatewayClient::model`].
    pub fn collection(
        &self,
        method: &str,
        request: &Source,
        pick: &str,
        schema: &Schema,
    ) -> Result<Vec<Record>, CommandError> {
        let response = self.call(method, request)?;

        match response.lookup(pick).as_deref() {
            Some(Source::List(items)) => items
                .iter()
                .map(|item| self.mapper.map(item, schema).map_err(CommandError::from))
                .collect(),
            _ => Ok(Vec::new()),
        }
    }

    /// Shapes the response as a `schema` record and returns its `field`.
    ///
    /// A field the schema does not declare yields `Value::Null`.
    ///
    /// # Errors
    /// Same as [`GatewayClient::model`].
    pub fn pick(
        &self,
        method: &str,
        request: &Source,
        field: &str,
        schema: &Schema,
    ) -> Result<Value, CommandError> {
        let record = self.model(method, request, schema)?;
        Ok(record.into_field(field).unwrap_or(Value::Null))
    }

    /// Runs a call for its effect only.
    ///
    /// # Errors
    /// Same as [`GatewayClient::call`].
    pub fn empty(&self, method: &str, request: &Source) -> Result<(), CommandError> {
        self.call(method, request).map(|_| ())
    }
}

/// Status reported when a response carries a status that is not a number.
const UNKNOWN_STATUS: i64 = -1;

/// Reads a response status. Anything that is not recognizably zero is a
/// failure; unreadable values become [`UNKNOWN_STATUS`].
fn status_code(status: &Source) -> i64 {
    match status {
        Source::Null => 0,
        Source::Int(code) => *code,
        Source::Bool(flag) => i64::from(*flag),
        Source::Float(code) if *code == 0.0 => 0,
        Source::Float(code) if code.fract() == 0.0 && code.abs() < i64::MAX as f64 => *code as i64,
        Source::Str(code) => code
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|code| *code != 0)
            .unwrap_or(UNKNOWN_STATUS),
        _ => UNKNOWN_STATUS,
    }
}
