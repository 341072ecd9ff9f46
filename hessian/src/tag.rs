//! Hessian 1.0 tag bytes.
//!
//! Every encoded value starts with one of these ASCII bytes, which identifies its wire type.

/// Null value, no payload.
pub const NULL: u8 = b'N';
/// Boolean `true`, no payload.
pub const TRUE: u8 = b'T';
/// Boolean `false`, no payload.
pub const FALSE: u8 = b'F';
/// 32-bit signed integer.
pub const INT: u8 = b'I';
/// 64-bit signed integer.
pub const LONG: u8 = b'L';
/// 64-bit IEEE-754 floating point number.
pub const DOUBLE: u8 = b'D';
/// Milliseconds since the Unix epoch, as a 64-bit signed integer.
pub const DATE: u8 = b'd';
/// Non-final chunk of a byte buffer.
pub const BYTES_CHUNK: u8 = b'b';
/// Final chunk of a byte buffer.
pub const BYTES_FINAL: u8 = b'B';
/// Non-final chunk of a string.
pub const STRING_CHUNK: u8 = b's';
/// Final chunk of a string.
pub const STRING_FINAL: u8 = b'S';
/// Type name of a map or list.
pub const TYPE: u8 = b't';
/// Element count of a list.
pub const LENGTH: u8 = b'l';
/// Reference to a previously written map or list.
pub const REF: u8 = b'R';
/// Start of a map or class-tagged object.
pub const MAP: u8 = b'M';
/// Start of a list.
pub const LIST: u8 = b'V';
/// End of a map or list.
pub const END: u8 = b'z';
