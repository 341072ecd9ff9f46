//! Encoding of values into the Hessian 1.0 wire format.
//!
//! Provides the [`Encoder`], which dispatches every [`Value`] to the writer of its wire type and
//! keeps the session state (the output sink and the table of written maps and lists).

use crate::{
    chunk::{utf16_len, ByteChunks, StrChunks},
    tag, Date, EncodeError, EncoderConfig, List, Map, ObjectTable, Result, Typed, Value,
    WriterKind, DEFAULT_LIST_TYPE, DEFAULT_MAP_TYPE,
};
use hessian_bytes::{ByteSink, Bytes, BytesMut};
use tracing::{debug, trace};


/// Lower bound of integral numbers written as a `long` rather than a `double`, `-2^63`.
const LONG_MIN: f64 = -9_223_372_036_854_775_808.0;

/// Upper bound (exclusive) of integral numbers written as a `long`, `2^63`.
const LONG_MAX: f64 = 9_223_372_036_854_775_808.0;

/// Writes values into a byte sink, according to the Hessian 1.0 specification.
///
/// An encoder holds one encoding session: the bytes written so far and the maps and lists they
/// contain. Writing the same map or list twice in a session emits its body once, and a reference
/// to it afterwards, which is also how circular structures are encoded.
///
/// Sessions are not meant to be shared. Use one encoder per concurrent encoding operation, and
/// [`reset`] it to start a new session.
///
/// # Examples
///
/// ```rust
/// use hessian::{Encoder, List, Value};
///
/// let list = List::new();
/// list.push(list.clone());
///
/// let mut encoder = Encoder::new();
/// encoder.write(&Value::from(list)).expect("should encode the list");
/// assert_eq!(
///     &encoder.get()[..],
///     [
///         b'V', b't', 0, 0, b'l', 0, 0, 0, 1, // untyped list with one element
///         b'R', 0, 0, 0, 0, // reference to itself
///         b'z',
///     ]
/// );
/// ```
///
/// [`reset`]: Encoder::reset
#[derive(Debug)]
pub struct Encoder<S = BytesMut> {
    sink: S,
    table: ObjectTable,
    config: EncoderConfig,
    depth: usize,
}

impl Encoder {
    /// Creates a new [`Encoder`] with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EncoderConfig::default())
    }

    /// Creates a new [`Encoder`] with the given configuration.
    #[must_use]
    pub fn with_config(config: EncoderConfig) -> Self {
        Self::with_sink(BytesMut::new(), config)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Encoder<S>
where
    S: ByteSink,
{
    /// Creates a new [`Encoder`] that appends to the given sink.
    ///
    /// Bytes already in the sink are kept, and are cleared along with the session on [`reset`].
    ///
    /// [`reset`]: Encoder::reset
    pub fn with_sink(sink: S, config: EncoderConfig) -> Self {
        Self {
            sink,
            table: ObjectTable::new(),
            config,
            depth: 0,
        }
    }

    /// Writes any value, choosing the writer from its kind.
    ///
    /// - Null and `NaN` are written as null.
    /// - Integral numbers are written as an `int` if they fit in 32 bits, and as a `long`
    ///   otherwise. Other numbers are written as a `double`.
    /// - Annotated values are written by the writer registered for their type name.
    /// - Maps and lists are written with an empty type name.
    ///
    /// # Errors
    ///
    /// Returns an error if an annotated value names an unknown type, if a payload does not have
    /// the shape required by its writer, or if a length does not fit in its wire field.
    ///
    /// The bytes written before the error are left in the sink.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hessian::{Encoder, Value};
    ///
    /// let mut encoder = Encoder::new();
    /// encoder
    ///     .write(&Value::from(2_147_483_647))?
    ///     .write(&Value::from(2_147_483_648_i64))?
    ///     .write(&Value::from(1.5))?;
    /// let bytes = encoder.get();
    /// assert_eq!(bytes[0], b'I');
    /// assert_eq!(bytes[5], b'L');
    /// assert_eq!(bytes[14], b'D');
    /// # Ok::<(), hessian::EncodeError>(())
    /// ```
    pub fn write(&mut self, value: &Value) -> Result<&mut Self> {
        match value {
            Value::Null => Ok(self.write_null()),
            Value::Bool(value) => Ok(self.write_bool(*value)),
            Value::String(value) => Ok(self.write_string(value)),
            Value::Int(value) => Ok(self.write_integer(*value)),
            Value::Double(value) => Ok(self.write_number(*value)),
            Value::Date(value) => Ok(self.write_date(*value)),
            Value::Bytes(value) => Ok(self.write_bytes(value)),
            Value::List(_) => self.write_array(value),
            Value::Typed(typed) => self.write_typed(typed, value),
            Value::Map(_) => self.write_object(value),
        }
    }

    /// Writes a null.
    pub fn write_null(&mut self) -> &mut Self {
        self.sink.put_u8(tag::NULL);
        self
    }

    /// Writes a boolean.
    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.sink.put_u8(if value { tag::TRUE } else { tag::FALSE });
        self
    }

    /// Writes a 32-bit signed integer.
    pub fn write_int(&mut self, value: i32) -> &mut Self {
        self.sink.put_u8(tag::INT);
        self.sink.put_i32(value);
        self
    }

    /// Writes a 64-bit signed integer, even if it would fit in 32 bits.
    pub fn write_long(&mut self, value: i64) -> &mut Self {
        self.sink.put_u8(tag::LONG);
        self.sink.put_i64(value);
        self
    }

    /// Writes a 64-bit floating point number, even if it is integral.
    pub fn write_double(&mut self, value: f64) -> &mut Self {
        self.sink.put_u8(tag::DOUBLE);
        self.sink.put_f64(value);
        self
    }

    /// Writes a date, from a [`Date`], a [`SystemTime`] or raw milliseconds since the epoch.
    ///
    /// [`SystemTime`]: std::time::SystemTime
    pub fn write_date(&mut self, value: impl Into<Date>) -> &mut Self {
        self.sink.put_u8(tag::DATE);
        self.sink.put_i64(value.into().as_millis());
        self
    }

    /// Writes a byte buffer, split into chunks of the configured size.
    pub fn write_bytes(&mut self, value: &[u8]) -> &mut Self {
        let limit = usize::from(self.config.bytes_chunk_size().get());
        for chunk in ByteChunks::new(value, limit) {
            if !chunk.last {
                trace!(len = chunk.len, "writing bytes continuation chunk");
            }
            let tag = if chunk.last {
                tag::BYTES_FINAL
            } else {
                tag::BYTES_CHUNK
            };
            self.write_chunk_header(tag, chunk.len);
            self.sink.put_slice(chunk.data);
        }
        self
    }

    /// Writes a string, split into chunks of the configured size.
    ///
    /// Chunk lengths count UTF-16 code units, and a chunk never ends in the middle of a
    /// surrogate pair.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        let limit = usize::from(self.config.string_chunk_size().get());
        for chunk in StrChunks::new(value, limit) {
            if !chunk.last {
                trace!(len = chunk.len, "writing string continuation chunk");
            }
            let tag = if chunk.last {
                tag::STRING_FINAL
            } else {
                tag::STRING_CHUNK
            };
            self.write_chunk_header(tag, chunk.len);
            self.sink.put_utf8(chunk.data);
        }
        self
    }

    /// Writes a map, or an annotated map whose type name is written as its class.
    ///
    /// Null is written as null. A map already written in this session is written as a
    /// reference to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a map nor an annotated map, if the type name is
    /// too long, or if writing any entry fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hessian::{Encoder, Map, Value};
    ///
    /// let mut encoder = Encoder::new();
    /// encoder.write_object(&Value::typed("a.B", Map::new()))?;
    /// assert_eq!(&encoder.get()[..], [b'M', b't', 0, 3, b'a', b'.', b'B', b'z']);
    /// # Ok::<(), hessian::EncodeError>(())
    /// ```
    pub fn write_object(&mut self, value: &Value) -> Result<&mut Self> {
        let (type_name, map) = match value {
            Value::Null => return Ok(self.write_null()),
            Value::Map(map) => ("", map),
            Value::Typed(typed) => match typed.payload() {
                Value::Null => return Ok(self.write_null()),
                Value::Map(map) => (wire_type_name(typed, DEFAULT_MAP_TYPE), map),
                other => return Err(type_error(WriterKind::Map, other)),
            },
            other => return Err(type_error(WriterKind::Map, other)),
        };
        let type_len = type_name_len(type_name)?;
        if self.write_reference(value)? {
            return Ok(self);
        }
        self.enter()?;
        _ = self.table.track(value);
        let result = self.write_map_body(type_name, type_len, map);
        self.depth -= 1;
        result.map(|()| self)
    }

    /// Writes a list, or an annotated list whose type name is written in its type block.
    ///
    /// Null is written as null. A list already written in this session is written as a
    /// reference to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a list nor an annotated list, if the type name
    /// or the number of elements are too large, or if writing any element fails.
    pub fn write_array(&mut self, value: &Value) -> Result<&mut Self> {
        let (type_name, list) = match value {
            Value::Null => return Ok(self.write_null()),
            Value::List(list) => ("", list),
            Value::Typed(typed) => match typed.payload() {
                Value::Null => return Ok(self.write_null()),
                Value::List(list) => (wire_type_name(typed, DEFAULT_LIST_TYPE), list),
                other => return Err(type_error(WriterKind::Array, other)),
            },
            other => return Err(type_error(WriterKind::Array, other)),
        };
        let type_len = type_name_len(type_name)?;
        if self.write_reference(value)? {
            return Ok(self);
        }
        self.enter()?;
        _ = self.table.track(value);
        let result = self.write_list_body(type_name, type_len, list);
        self.depth -= 1;
        result.map(|()| self)
    }

    /// Writes a value with the given writer, checking that it has the required shape.
    ///
    /// Numbers are converted between the numeric writers when no information is lost, dates
    /// accept raw milliseconds, and null is accepted by every writer.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Type`] if the value cannot be written by the writer, or any
    /// error of the map and list writers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hessian::{EncodeError, Encoder, Value, WriterKind};
    ///
    /// let mut encoder = Encoder::new();
    /// encoder.write_as(WriterKind::Date, &Value::Int(1_000))?;
    /// assert_eq!(&encoder.get()[..], [b'd', 0, 0, 0, 0, 0, 0, 0x03, 0xe8]);
    ///
    /// let error = encoder.write_as(WriterKind::Bytes, &Value::from("text"));
    /// assert!(matches!(error, Err(EncodeError::Type { .. })));
    /// # Ok::<(), EncodeError>(())
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn write_as(&mut self, kind: WriterKind, value: &Value) -> Result<&mut Self> {
        match (kind, value) {
            (WriterKind::Map, _) => self.write_object(value),
            (WriterKind::Array, _) => self.write_array(value),
            (WriterKind::Null, _) | (_, Value::Null) => Ok(self.write_null()),
            (WriterKind::Bool, Value::Bool(value)) => Ok(self.write_bool(*value)),
            (WriterKind::Int, Value::Int(value)) => match i32::try_from(*value) {
                Ok(value) => Ok(self.write_int(value)),
                Err(_) => Err(EncodeError::type_error(kind, "32-bit integer", "long")),
            },
            (WriterKind::Int, Value::Double(value)) if is_int(*value) => {
                Ok(self.write_int(*value as i32))
            }
            (WriterKind::Long, Value::Int(value)) => Ok(self.write_long(*value)),
            (WriterKind::Long, Value::Double(value)) if value.fract() == 0.0 => {
                Ok(self.write_long(*value as i64))
            }
            (WriterKind::Double, Value::Int(value)) => Ok(self.write_double(*value as f64)),
            (WriterKind::Double, Value::Double(value)) => Ok(self.write_double(*value)),
            (WriterKind::Date, Value::Date(value)) => Ok(self.write_date(*value)),
            (WriterKind::Date, Value::Int(millis)) => Ok(self.write_date(*millis)),
            (WriterKind::Bytes, Value::Bytes(value)) => Ok(self.write_bytes(value)),
            (WriterKind::String, Value::String(value)) => Ok(self.write_string(value)),
            (kind, other) => Err(type_error(kind, other)),
        }
    }

    /// Returns a copy of the bytes written so far, without resetting the session.
    pub fn get(&self) -> Bytes {
        self.sink.to_bytes()
    }

    /// Returns the bytes written so far and resets the session.
    pub fn finish(&mut self) -> Bytes {
        let bytes = self.get();
        self.reset();
        bytes
    }

    /// Returns the bytes written so far as a slice.
    pub fn as_slice(&self) -> &[u8] {
        self.sink.as_slice()
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.sink.len()
    }

    /// Returns `true` if nothing has been written in this session.
    pub fn is_empty(&self) -> bool {
        self.sink.is_empty()
    }

    /// Returns the maps and lists written in this session.
    pub fn table(&self) -> &ObjectTable {
        &self.table
    }

    /// Returns the number of maps and lists written in this session.
    pub fn references(&self) -> usize {
        self.table.len()
    }

    /// Returns the configuration of this encoder.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Discards the bytes and the object table, starting a new session.
    ///
    /// This is also the way to recover from an error, since a failed write may leave partial
    /// output behind.
    pub fn reset(&mut self) {
        debug!(
            len = self.sink.len(),
            references = self.table.len(),
            "resetting encoder session"
        );
        self.sink.clear();
        self.table.clear();
        self.depth = 0;
    }

    /// Consumes the encoder, returning the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn write_integer(&mut self, value: i64) -> &mut Self {
        match i32::try_from(value) {
            Ok(value) => self.write_int(value),
            Err(_) => self.write_long(value),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_number(&mut self, value: f64) -> &mut Self {
        if value.is_nan() {
            return self.write_null();
        }
        // Range checks happen on the float, before any truncation.
        if is_int(value) {
            return self.write_int(value as i32);
        }
        if value.fract() == 0.0 && (LONG_MIN..LONG_MAX).contains(&value) {
            return self.write_long(value as i64);
        }
        self.write_double(value)
    }

    fn write_typed(&mut self, typed: &Typed, value: &Value) -> Result<&mut Self> {
        let registry = self.config.registry();
        let Some(kind) = registry.resolve(typed.type_name(), typed.payload()) else {
            debug!(
                type_name = typed.type_name(),
                payload = typed.payload().kind(),
                "no writer registered for annotated type"
            );
            return Err(EncodeError::UnknownType(typed.type_name().to_owned()));
        };
        trace!(type_name = typed.type_name(), writer = %kind, "writing annotated value");
        if kind.is_composite() {
            self.write_as(kind, value)
        } else {
            self.write_as(kind, typed.payload())
        }
    }

    /// Writes a reference if the map or list was already written.
    ///
    /// Returns `true` if the reference was written.
    fn write_reference(&mut self, value: &Value) -> Result<bool> {
        let Some(position) = self.table.position(value) else {
            return Ok(false);
        };
        let index = i32::try_from(position).map_err(|_| EncodeError::LengthOverflow {
            what: "object table",
            len: position,
        })?;
        trace!(index, "writing reference");
        self.sink.put_u8(tag::REF);
        self.sink.put_i32(index);
        Ok(true)
    }

    fn write_map_body(&mut self, type_name: &str, type_len: u16, map: &Map) -> Result<()> {
        self.sink.put_u8(tag::MAP);
        self.write_type(type_name, type_len);
        let entries = map.read();
        for (key, value) in entries.iter() {
            self.write(key.value())?;
            self.write(value)?;
        }
        self.sink.put_u8(tag::END);
        Ok(())
    }

    fn write_list_body(&mut self, type_name: &str, type_len: u16, list: &List) -> Result<()> {
        let elements = list.read();
        let len = u32::try_from(elements.len()).map_err(|_| EncodeError::LengthOverflow {
            what: "list",
            len: elements.len(),
        })?;
        self.sink.put_u8(tag::LIST);
        self.write_type(type_name, type_len);
        self.sink.put_u8(tag::LENGTH);
        self.sink.put_u32(len);
        for element in elements.iter() {
            self.write(element)?;
        }
        self.sink.put_u8(tag::END);
        Ok(())
    }

    fn write_type(&mut self, type_name: &str, type_len: u16) {
        self.sink.put_u8(tag::TYPE);
        self.sink.put_u16(type_len);
        self.sink.put_utf8(type_name);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_chunk_header(&mut self, tag: u8, len: usize) {
        // Chunks never exceed the configured size, which is itself a u16.
        self.sink.put_u8(tag);
        self.sink.put_u16(len as u16);
    }

    /// Enters a nested map or list, checking the configured depth limit.
    fn enter(&mut self) -> Result<()> {
        if let Some(max_depth) = self.config.max_depth() {
            if self.depth >= max_depth {
                return Err(EncodeError::DepthExceeded(max_depth));
            }
        }
        self.depth += 1;
        Ok(())
    }
}

/// Returns `true` if the float is integral and fits in an `int`.
fn is_int(value: f64) -> bool {
    value.fract() == 0.0 && (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value)
}

/// Returns the name written in the type block of an annotated map or list.
fn wire_type_name<'a>(typed: &'a Typed, default_name: &str) -> &'a str {
    match typed.type_name() {
        name if name == default_name => "",
        name => name,
    }
}

fn type_name_len(type_name: &str) -> Result<u16> {
    let len = utf16_len(type_name);
    u16::try_from(len).map_err(|_| EncodeError::LengthOverflow {
        what: "type name",
        len,
    })
}

fn type_error(writer: WriterKind, found: &Value) -> EncodeError {
    let expected = match writer {
        WriterKind::Null => "null",
        WriterKind::Bool => "bool",
        WriterKind::Int => "int",
        WriterKind::Long => "integral number",
        WriterKind::Double => "number",
        WriterKind::Date => "date or milliseconds",
        WriterKind::Bytes => "bytes",
        WriterKind::String => "string",
        WriterKind::Map => "map",
        WriterKind::Array => "list",
    };
    EncodeError::type_error(writer, expected, found.kind())
}
