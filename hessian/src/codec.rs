//! Adapter for framed transports built on [`tokio_util::codec`].

use crate::{EncodeError, Encoder, EncoderConfig, Value};
use hessian_bytes::BytesMut;
use tokio_util::codec;


/// Encodes values into the frames of a [`FramedWrite`].
///
/// Every item is written in a session of its own, so references never point into a previous
/// item. Hessian values are self-delimiting, so no length prefix is added.
///
/// # Examples
///
/// ```rust
/// use hessian::{BytesMut, HessianCodec, Value};
/// use tokio_util::codec::Encoder;
///
/// let mut codec = HessianCodec::default();
/// let mut frame = BytesMut::new();
/// codec.encode(Value::from(true), &mut frame)?;
/// codec.encode(&Value::Null, &mut frame)?;
/// assert_eq!(&frame[..], b"TN");
/// # Ok::<(), hessian::EncodeError>(())
/// ```
///
/// [`FramedWrite`]: tokio_util::codec::FramedWrite
#[derive(Debug, Clone, Default)]
pub struct HessianCodec {
    config: EncoderConfig,
}

impl HessianCodec {
    /// Creates a new [`HessianCodec`] with the given configuration.
    #[must_use]
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used for every item.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl codec::Encoder<&Value> for HessianCodec {
    type Error = EncodeError;

    fn encode(&mut self, item: &Value, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let start = dst.len();
        let result = Encoder::with_sink(&mut *dst, self.config.clone())
            .write(item)
            .map(|_| ());
        if let Err(error) = result {
            // Leave no partial value behind in the frame buffer.
            dst.truncate(start);
            return Err(error);
        }
        Ok(())
    }
}

impl codec::Encoder<Value> for HessianCodec {
    type Error = EncodeError;

    fn encode(&mut self, item: Value, dst: &mut BytesMut) -> Result<(), Self::Error> {
        codec::Encoder::<&Value>::encode(self, &item, dst)
    }
}
