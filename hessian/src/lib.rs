#![doc = include_str!("../README.md")]
#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::expect_used,
    clippy::unwrap_used
)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod tag;

mod error;
pub use error::{EncodeError, Result};

mod value;
pub use value::{Date, List, Map, Typed, Value, DEFAULT_LIST_TYPE, DEFAULT_MAP_TYPE};

mod registry;
pub use registry::{TypeRegistry, WriterKind};

mod config;
pub use config::{Annotation, EncoderConfig, DEFAULT_BYTES_CHUNK_SIZE, DEFAULT_STRING_CHUNK_SIZE};

mod table;
pub use table::ObjectTable;

mod chunk;

mod encoder;
pub use encoder::Encoder;

mod json;

mod codec;
pub use codec::HessianCodec;

// Re-export for convenience.
pub use hessian_bytes::{ByteSink, Bytes, BytesMut};
