//! Bounded-depth structural mapping of loosely-typed responses.
//!
//! Gateway responses arrive either as parsed documents (nested mappings)
//! or as attribute-bearing message objects. The mapper shapes both into
//! [`Record`]s according to a declared [`Schema`], recursing into nested
//! records and sequences. Recursion is bounded by a depth ceiling rather
//! than by cycle detection, so back-referencing object graphs terminate
//! with [`MapError::DepthExceeded`].
//!
//! Depth starts at 1 for the top-level record. Fields of a record at depth
//! `d` are converted at depth `d`; a nested record or sequence element is
//! converted one level deeper. Converting any value at a depth above the
//! ceiling fails.

mod schema;
mod source;
mod value;

#[cfg(test)]
mod tests;

pub use schema::{Field, FieldType, Schema, SchemaBuilder};
pub use source::{Attributes, Source};
pub use value::{Record, Value};

use thiserror::Error;
use tracing::debug;

use source::Shape;

/// Depth ceiling used when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Errors raised while shaping a source value.
///
/// Both variants indicate a schema/source mismatch or malformed input and
/// are never recovered from inside the mapper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Nesting went past the configured ceiling.
    #[error("maximum nesting depth of {max_depth} exceeded at depth {depth} (field '{path}')")]
    DepthExceeded {
        /// Depth at which conversion was attempted
        depth: usize,
        /// Configured ceiling
        max_depth: usize,
        /// Dotted path of the offending field
        path: String,
    },

    /// A sequence-typed field held elements of differing shapes.
    #[error("sequence field '{path}' mixes element shapes")]
    HeterogeneousSequence {
        /// Dotted path of the sequence field
        path: String,
    },
}

/// Shapes `source` into a record of `schema` using [`DEFAULT_MAX_DEPTH`].
///
/// # Errors
/// See [`map_with_depth`].
pub fn map(source: &Source, schema: &Schema) -> Result<Record, MapError> {
    Mapper::default().map(source, schema)
}

/// Shapes `source` into a record of `schema` with an explicit depth ceiling.
///
/// # Errors
/// * `MapError::DepthExceeded` - if any value would be converted deeper than `max_depth`
/// * `MapError::HeterogeneousSequence` - if a sequence-typed field mixes element shapes
pub fn map_with_depth(
    source: &Source,
    schema: &Schema,
    max_depth: usize,
) -> Result<Record, MapError> {
    Mapper::new(max_depth).map(source, schema)
}

/// Stateless mapper carrying a depth ceiling.
///
/// Cheap to copy and safe to share between threads; each call works only
/// on its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapper {
    max_depth: usize,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Mapper {
    /// Creates a mapper with the given depth ceiling.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Configured depth ceiling.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Shapes `source` into a record of `schema`.
    ///
    /// # Errors
    /// See [`map_with_depth`].
    pub fn map(&self, source: &Source, schema: &Schema) -> Result<Record, MapError> {
        self.build_record(source, schema, 1, "")
    }

    fn build_record(
        &self,
        source: &Source,
        schema: &Schema,
        depth: usize,
        path: &str,
    ) -> Result<Record, MapError> {
        let mut fields = Vec::with_capacity(schema.fields().len());

        for field in schema.fields() {
            let value = match source.lookup(&field.name) {
                Some(located) => {
                    let field_path = child_path(path, &field.name);
                    self.convert(&located, &field.field_type, depth, &field_path)?
                }
                None => Value::Null,
            };
            fields.push((field.name.clone(), value));
        }

        Ok(Record::new(schema.name(), fields))
    }

    fn convert(
        &self,
        value: &Source,
        field_type: &FieldType,
        depth: usize,
        path: &str,
    ) -> Result<Value, MapError> {
        if depth > self.max_depth {
            return Err(MapError::DepthExceeded {
                depth,
                max_depth: self.max_depth,
                path: path.to_string(),
            });
        }

        match (field_type, value) {
            (FieldType::Record(schema), nested) if nested.is_structured() => self
                .build_record(nested, schema, depth + 1, path)
                .map(Value::Record),

            (_, Source::List(items)) if items.is_empty() => Ok(Value::Sequence(Vec::new())),

            (FieldType::Sequence(element_type), Source::List(items)) => {
                let converted = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        self.convert(item, element_type, depth + 1, &format!("{path}[{index}]"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                if !is_homogeneous(items) {
                    return Err(MapError::HeterogeneousSequence {
                        path: path.to_string(),
                    });
                }

                Ok(Value::Sequence(converted))
            }

            _ => Ok(as_is(value, path)),
        }
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn is_homogeneous(items: &[Source]) -> bool {
    let mut shapes = items
        .iter()
        .map(Source::shape)
        .filter(|shape| *shape != Shape::Null);

    match shapes.next() {
        Some(first) => shapes.all(|shape| shape == first),
        None => true,
    }
}

/// Copies a value without schema guidance. Plain document trees are finite,
/// so no depth accounting applies; objects cannot be expanded without a
/// schema and become null.
fn as_is(value: &Source, path: &str) -> Value {
    match value {
        Source::Null => Value::Null,
        Source::Bool(b) => Value::Bool(*b),
        Source::Int(i) => Value::Integer(*i),
        Source::Float(f) => Value::Float(*f),
        Source::Str(s) => Value::String(s.clone()),
        Source::List(items) => {
            Value::Sequence(items.iter().map(|item| as_is(item, path)).collect())
        }
        Source::Map(entries) => Value::Mapping(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), as_is(item, path)))
                .collect(),
        ),
        Source::Object(object) => {
            debug!(field = path, ?object, "object found where no record schema was declared");
            Value::Null
        }
    }
}
