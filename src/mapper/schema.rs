use std::sync::Arc;

/// Declared type of a single record field.
///
/// Primitive variants are taken from the source value as-is; the mapper
/// performs no coercion between them. Only `Record` and `Sequence` drive
/// recursion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Text value.
    String,

    /// Whole number.
    Integer,

    /// True/false flag.
    Boolean,

    /// Floating point number.
    Float,

    /// Free-form key/value data, kept as found.
    Mapping,

    /// Nested record described by another schema.
    Record(Arc<Schema>),

    /// Homogeneous sequence of the boxed element type.
    Sequence(Box<FieldType>),
}

impl FieldType {
    /// Nested record field type.
    pub fn record(schema: &Arc<Schema>) -> Self {
        FieldType::Record(Arc::clone(schema))
    }

    /// Sequence field type with the given element type.
    pub fn sequence_of(element: FieldType) -> Self {
        FieldType::Sequence(Box::new(element))
    }
}

/// A named field of a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Name looked up on the source value.
    pub name: String,

    /// Declared type used to convert the located value.
    pub field_type: FieldType,
}

/// Record-type declaration: an ordered set of named, typed fields.
///
/// Schemas are built once (usually behind a `LazyLock`) and shared through
/// `Arc` by every record type that nests them.
///
/// ```
/// use nvmeof_cli::mapper::{FieldType, Schema};
///
/// let person = Schema::named("Person")
///     .field("name", FieldType::String)
///     .field("age", FieldType::Integer)
///     .build();
///
/// assert_eq!(person.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    /// Starts declaring a schema with the given record name.
    pub fn named(name: &str) -> SchemaBuilder {
        SchemaBuilder {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Record name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared fields in schema order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Builder returned by [`Schema::named`].
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Appends a field. Redeclaring a name replaces the earlier declaration
    /// in place so field order stays stable.
    pub fn field(mut self, name: &str, field_type: FieldType) -> Self {
        let field = Field {
            name: name.to_string(),
            field_type,
        };

        match self.fields.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }

        self
    }

    /// Finishes the declaration.
    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema {
            name: self.name,
            fields: self.fields,
        })
    }
}
