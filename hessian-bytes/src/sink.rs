//! Append-only byte sinks.
//!
//! Provides the [`ByteSink`] trait, which is the output side of the Hessian encoder, and its
//! implementations for [`BytesMut`] and [`Vec<u8>`].

use super::{BufMut, Bytes, BytesMut};


/// An append-only destination for encoded bytes that can be read back.
///
/// Writes come from [`BufMut`], whose fixed-width `put_*` methods use network (big-endian) byte
/// order. Implementors only add read-back and clearing on top of it.
///
/// # Examples
///
/// ```rust
/// use hessian_bytes::{BufMut, ByteSink};
///
/// let mut sink: Vec<u8> = Vec::new();
/// sink.put_u8(b'L');
/// sink.put_i64(-1);
/// assert_eq!(ByteSink::len(&sink), 9);
/// assert_eq!(&ByteSink::as_slice(&sink)[1..], &[0xff; 8]);
/// ```
pub trait ByteSink: BufMut {
    /// Returns the number of bytes accumulated so far.
    fn len(&self) -> usize;

    /// Returns `true` if nothing has been written to the sink.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the accumulated bytes as a contiguous slice.
    fn as_slice(&self) -> &[u8];

    /// Discards every byte accumulated so far.
    fn clear(&mut self);

    /// Appends the UTF-8 encoding of `text` to the sink.
    ///
    /// No length or delimiter is written; framing the text is up to the caller.
    #[inline]
    fn put_utf8(&mut self, text: &str) {
        self.put_slice(text.as_bytes());
    }

    /// Copies the accumulated bytes into a new [`Bytes`], leaving the sink untouched.
    fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_slice())
    }
}

impl ByteSink for BytesMut {
    fn len(&self) -> usize {
        BytesMut::len(self)
    }

    fn as_slice(&self) -> &[u8] {
        self.as_ref()
    }

    fn clear(&mut self) {
        BytesMut::clear(self);
    }
}

impl ByteSink for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_slice(&self) -> &[u8] {
        Vec::as_slice(self)
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<T> ByteSink for &mut T
where
    T: ByteSink + ?Sized,
{
    fn len(&self) -> usize {
        (**self).len()
    }

    fn as_slice(&self) -> &[u8] {
        (**self).as_slice()
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}
