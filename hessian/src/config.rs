//! Encoder configuration.

use crate::TypeRegistry;
use std::num::NonZeroU16;

mod tests;

/// Default maximum number of UTF-16 code units in a string chunk.
pub const DEFAULT_STRING_CHUNK_SIZE: NonZeroU16 = match NonZeroU16::new(0x8000) {
    Some(size) => size,
    None => unreachable!(),
};

/// Default maximum number of bytes in a byte buffer chunk.
pub const DEFAULT_BYTES_CHUNK_SIZE: NonZeroU16 = match NonZeroU16::new(0x8000) {
    Some(size) => size,
    None => unreachable!(),
};

/// Configuration of an [`Encoder`].
///
/// # Examples
///
/// ```rust
/// use hessian::{EncoderConfig, TypeRegistry, WriterKind};
/// use std::num::NonZeroU16;
///
/// let config = EncoderConfig::default()
///     .with_registry(TypeRegistry::default().with_type("com.example.Id", WriterKind::Long))
///     .with_max_depth(Some(64));
/// assert_eq!(config.max_depth(), Some(64));
/// assert_eq!(config.string_chunk_size().get(), 0x8000);
/// ```
///
/// [`Encoder`]: crate::Encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    registry: TypeRegistry,
    string_chunk_size: NonZeroU16,
    bytes_chunk_size: NonZeroU16,
    max_depth: Option<usize>,
    annotation: Annotation,
}

impl EncoderConfig {
    /// Returns `self` with the given type registry.
    #[must_use]
    pub fn with_registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Returns `self` with the given maximum string chunk size, in UTF-16 code units.
    #[must_use]
    pub fn with_string_chunk_size(mut self, size: NonZeroU16) -> Self {
        self.string_chunk_size = size;
        self
    }

    /// Returns `self` with the given maximum byte buffer chunk size, in bytes.
    #[must_use]
    pub fn with_bytes_chunk_size(mut self, size: NonZeroU16) -> Self {
        self.bytes_chunk_size = size;
        self
    }

    /// Returns `self` with the given limit on nested maps and lists.
    ///
    /// `None` disables the limit, in which case deeply nested values are bounded only by the
    /// stack.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns `self` with the given annotation field names.
    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    /// Returns the type registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Returns a mutable reference to the type registry.
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Returns the maximum length of a string chunk, in UTF-16 code units.
    pub fn string_chunk_size(&self) -> NonZeroU16 {
        self.string_chunk_size
    }

    /// Returns the maximum length of a byte array chunk.
    pub fn bytes_chunk_size(&self) -> NonZeroU16 {
        self.bytes_chunk_size
    }

    /// Returns the nesting limit of maps and lists, if any.
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns the field names of annotated JSON values.
    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            registry: TypeRegistry::default(),
            string_chunk_size: DEFAULT_STRING_CHUNK_SIZE,
            bytes_chunk_size: DEFAULT_BYTES_CHUNK_SIZE,
            max_depth: None,
            annotation: Annotation::default(),
        }
    }
}

/// Names of the fields that mark an annotated value in loosely-typed input.
///
/// A JSON object with exactly these two fields is read as a [`Typed`] value by
/// [`Value::from_json`].
///
/// [`Typed`]: crate::Typed
/// [`Value::from_json`]: crate::Value::from_json
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    type_field: String,
    payload_field: String,
}

impl Annotation {
    /// Creates a new [`Annotation`] with the given field names.
    #[must_use]
    pub fn new(type_field: impl Into<String>, payload_field: impl Into<String>) -> Self {
        Self {
            type_field: type_field.into(),
            payload_field: payload_field.into(),
        }
    }

    /// Returns the name of the field holding the type name.
    pub fn type_field(&self) -> &str {
        &self.type_field
    }

    /// Returns the name of the field holding the payload.
    pub fn payload_field(&self) -> &str {
        &self.payload_field
    }
}

impl Default for Annotation {
    fn default() -> Self {
        Self::new("$class", "$")
    }
}
