use crate::WriterKind;
use thiserror::Error;

mod tests;

/// A specialized result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodeError>;

/// An error raised while encoding a value.
///
/// Errors abort the current write only. Bytes written before the failure stay in the sink, which
/// may leave an unterminated map or list behind, so the whole session should be discarded with
/// [`Encoder::reset`].
///
/// [`Encoder::reset`]: crate::Encoder::reset
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The value does not have the shape required by the writer.
    #[error("type error: {writer} writer expected {expected}, found {found}")]
    Type {
        writer: WriterKind,
        expected: &'static str,
        found: &'static str,
    },
    /// An annotated value names a type with no registered writer.
    #[error("unknown type: {0:?}")]
    UnknownType(String),
    /// A length does not fit in its field on the wire.
    #[error("{what} length {len} exceeds the maximum value")]
    LengthOverflow { what: &'static str, len: usize },
    /// Maps and lists are nested deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {0}")]
    DepthExceeded(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    pub(crate) fn type_error(writer: WriterKind, expected: &'static str, found: &'static str) -> Self {
        Self::Type {
            writer,
            expected,
            found,
        }
    }
}
