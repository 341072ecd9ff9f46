//! Mapping of annotated type names to writers.

use crate::Value;
use std::{collections::HashMap, fmt};

mod tests;

/// A writer of the [`Encoder`], selectable by name through the [`TypeRegistry`].
///
/// [`Encoder`]: crate::Encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriterKind {
    Null,
    Bool,
    Int,
    Long,
    Double,
    Date,
    Bytes,
    String,
    Map,
    Array,
}

impl WriterKind {
    /// Returns `true` for the writers of maps and lists.
    ///
    /// Composite writers receive the whole annotated value, so that its type name ends up on the
    /// wire. Every other writer receives the payload alone.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Map | Self::Array)
    }
}

impl fmt::Display for WriterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::Date => "date",
            Self::Bytes => "bytes",
            Self::String => "string",
            Self::Map => "map",
            Self::Array => "array",
        };
        f.write_str(name)
    }
}

const DEFAULT_TYPES: &[(&str, WriterKind)] = &[
    ("null", WriterKind::Null),
    ("boolean", WriterKind::Bool),
    ("bool", WriterKind::Bool),
    ("java.lang.Boolean", WriterKind::Bool),
    ("int", WriterKind::Int),
    ("short", WriterKind::Int),
    ("byte", WriterKind::Int),
    ("java.lang.Integer", WriterKind::Int),
    ("java.lang.Short", WriterKind::Int),
    ("java.lang.Byte", WriterKind::Int),
    ("long", WriterKind::Long),
    ("java.lang.Long", WriterKind::Long),
    ("double", WriterKind::Double),
    ("float", WriterKind::Double),
    ("java.lang.Double", WriterKind::Double),
    ("java.lang.Float", WriterKind::Double),
    ("date", WriterKind::Date),
    ("java.util.Date", WriterKind::Date),
    ("bytes", WriterKind::Bytes),
    ("[byte", WriterKind::Bytes),
    ("string", WriterKind::String),
    ("char", WriterKind::String),
    ("java.lang.String", WriterKind::String),
    ("java.lang.Character", WriterKind::String),
    ("map", WriterKind::Map),
    ("java.util.Map", WriterKind::Map),
    ("java.util.HashMap", WriterKind::Map),
    ("java.util.LinkedHashMap", WriterKind::Map),
    ("java.util.TreeMap", WriterKind::Map),
    ("list", WriterKind::Array),
    ("array", WriterKind::Array),
    ("java.util.List", WriterKind::Array),
    ("java.util.ArrayList", WriterKind::Array),
    ("java.util.Set", WriterKind::Array),
    ("java.util.HashSet", WriterKind::Array),
    ("java.util.Collection", WriterKind::Array),
];

/// Registry of the writers selected by annotated type names.
///
/// The default registry knows the standard primitive names (`int`, `long`, `double`, ...), their
/// Java class names, and the common Java map and list classes.
///
/// # Examples
///
/// ```rust
/// use hessian::{TypeRegistry, Value, WriterKind};
///
/// let registry = TypeRegistry::default().with_type("com.example.Id", WriterKind::Long);
/// assert_eq!(registry.get("int"), Some(WriterKind::Int));
/// assert_eq!(registry.get("com.example.Id"), Some(WriterKind::Long));
/// assert_eq!(registry.resolve("com.example.Missing", &Value::Int(1)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    types: HashMap<String, WriterKind>,
}

impl TypeRegistry {
    /// Creates a registry without any entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Returns `self` with the given entry.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>, kind: WriterKind) -> Self {
        _ = self.insert(name, kind);
        self
    }

    /// Registers the writer for the given type name.
    ///
    /// Returns the previously registered writer, if it exists.
    pub fn insert(&mut self, name: impl Into<String>, kind: WriterKind) -> Option<WriterKind> {
        self.types.insert(name.into(), kind)
    }

    /// Removes the entry for the given type name.
    pub fn remove(&mut self, name: &str) -> Option<WriterKind> {
        self.types.remove(name)
    }

    /// Returns the writer registered for exactly this type name.
    pub fn get(&self, name: &str) -> Option<WriterKind> {
        self.types.get(name).copied()
    }

    /// Returns the writer for an annotated value with the given type name and payload.
    ///
    /// Registered names always win. Otherwise, Java array class names (starting with `[`) select
    /// the array writer for list payloads, and any other class name selects the map writer for
    /// map payloads, so that the name is written as the class of the object. A null payload is
    /// null whatever its type.
    pub fn resolve(&self, name: &str, payload: &Value) -> Option<WriterKind> {
        if let Some(kind) = self.get(name) {
            return Some(kind);
        }
        match payload {
            Value::Null => Some(WriterKind::Null),
            Value::List(_) if name.starts_with('[') => Some(WriterKind::Array),
            Value::Map(_) if !name.is_empty() && !name.starts_with('[') => Some(WriterKind::Map),
            _ => None,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES
                .iter()
                .map(|&(name, kind)| (name.to_owned(), kind))
                .collect(),
        }
    }
}
