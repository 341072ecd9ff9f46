#![doc = include_str!("../README.md")]

// Re-export for convenience.
pub use bytes::{BufMut, Bytes, BytesMut};

mod sink;
pub use sink::ByteSink;
