use std::{borrow::Cow, collections::BTreeMap, fmt, sync::Arc};

/// Read access to an attribute-bearing response object.
///
/// Transport message types implement this so the mapper can read them
/// without converting them to plain mappings first. Returning `Some` means
/// the attribute exists, even when its value is [`Source::Null`].
pub trait Attributes: fmt::Debug + Send + Sync {
    /// Returns the named attribute, or `None` if the object has no such attribute.
    fn attribute(&self, name: &str) -> Option<Source>;
}

/// Raw input to the mapper.
///
/// Either a plain document tree (as parsed from JSON) or an
/// attribute-bearing object. Source values are never mutated by the mapper.
#[derive(Debug, Clone)]
pub enum Source {
    /// Explicit null.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating point scalar.
    Float(f64),
    /// String scalar.
    Str(String),
    /// Ordered list.
    List(Vec<Source>),
    /// Key/value mapping.
    Map(BTreeMap<String, Source>),
    /// Object exposing named attributes.
    Object(Arc<dyn Attributes>),
}

/// Coarse shape of a source value, used for sequence homogeneity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Null,
    Bool,
    Number,
    Text,
    List,
    Structured,
}

impl Source {
    /// Builds a mapping source from key/value pairs.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Source)>,
    {
        Source::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Wraps an attribute-bearing object.
    pub fn object(object: impl Attributes + 'static) -> Self {
        Source::Object(Arc::new(object))
    }

    /// Locates a named value on this source.
    ///
    /// An object attribute wins; otherwise a mapping entry is used when it is
    /// present and not null. Anything else is `None`, which the mapper turns
    /// into a null field.
    pub fn lookup(&self, name: &str) -> Option<Cow<'_, Source>> {
        match self {
            Source::Object(object) => object.attribute(name).map(Cow::Owned),
            Source::Map(entries) => entries
                .get(name)
                .filter(|value| !value.is_null())
                .map(Cow::Borrowed),
            _ => None,
        }
    }

    /// True for [`Source::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Source::Null)
    }

    /// True for mappings and attribute-bearing objects.
    pub fn is_structured(&self) -> bool {
        matches!(self, Source::Map(_) | Source::Object(_))
    }

    /// Integer view of this value, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Source::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// String view of this value, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Source::Str(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn shape(&self) -> Shape {
        match self {
            Source::Null => Shape::Null,
            Source::Bool(_) => Shape::Bool,
            Source::Int(_) | Source::Float(_) => Shape::Number,
            Source::Str(_) => Shape::Text,
            Source::List(_) => Shape::List,
            Source::Map(_) | Source::Object(_) => Shape::Structured,
        }
    }
}

impl From<serde_json::Value> for Source {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Source::Null,
            serde_json::Value::Bool(b) => Source::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Source::Int(i),
                None => Source::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Source::Str(s),
            serde_json::Value::Array(items) => {
                Source::List(items.into_iter().map(Source::from).collect())
            }
            serde_json::Value::Object(entries) => Source::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Source::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        Source::Str(value.to_string())
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Source::Str(value)
    }
}

impl From<i64> for Source {
    fn from(value: i64) -> Self {
        Source::Int(value)
    }
}

impl From<bool> for Source {
    fn from(value: bool) -> Self {
        Source::Bool(value)
    }
}

impl<T: Into<Source>> From<Option<T>> for Source {
    fn from(value: Option<T>) -> Self {
        value.map_or(Source::Null, Into::into)
    }
}
