//! Splitting of long strings and byte buffers into wire chunks.
//!
//! Both chunked types follow the same rule: while the remaining length is at least the chunk
//! size, a full non-final chunk is split off. The final chunk carries whatever is left, which may
//! be nothing at all.


/// A segment of a chunked value.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Chunk<'a, T: ?Sized> {
    pub data: &'a T,
    /// Length of the chunk as written in its length field.
    pub len: usize,
    pub last: bool,
}

/// Returns the length of `text` in UTF-16 code units.
pub(crate) fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Splits `text` after at most `limit` UTF-16 code units.
///
/// Characters are never split, so a surrogate pair that would straddle the limit is left for
/// the next chunk. A leading character wider than `limit` is taken whole.
fn split_utf16(text: &str, limit: usize) -> (&str, usize, &str) {
    let mut units = 0;
    for (index, c) in text.char_indices() {
        let width = c.len_utf16();
        if units + width > limit && units > 0 {
            let (head, tail) = text.split_at(index);
            return (head, units, tail);
        }
        units += width;
    }
    (text, units, "")
}

/// Iterator over the chunks of a string, measured in UTF-16 code units.
#[derive(Debug)]
pub(crate) struct StrChunks<'a> {
    rest: Option<&'a str>,
    remaining: usize,
    limit: usize,
}

impl<'a> StrChunks<'a> {
    pub fn new(text: &'a str, limit: usize) -> Self {
        Self {
            rest: Some(text),
            remaining: utf16_len(text),
            limit,
        }
    }
}

impl<'a> Iterator for StrChunks<'a> {
    type Item = Chunk<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        if self.remaining >= self.limit {
            let (data, len, tail) = split_utf16(rest, self.limit);
            self.rest = Some(tail);
            self.remaining -= len;
            return Some(Chunk {
                data,
                len,
                last: false,
            });
        }
        self.rest = None;
        Some(Chunk {
            data: rest,
            len: self.remaining,
            last: true,
        })
    }
}

/// Iterator over the chunks of a byte buffer.
#[derive(Debug)]
pub(crate) struct ByteChunks<'a> {
    rest: Option<&'a [u8]>,
    limit: usize,
}

impl<'a> ByteChunks<'a> {
    pub fn new(data: &'a [u8], limit: usize) -> Self {
        Self {
            rest: Some(data),
            limit,
        }
    }
}

impl<'a> Iterator for ByteChunks<'a> {
    type Item = Chunk<'a, [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        if rest.len() >= self.limit {
            let (data, tail) = rest.split_at(self.limit);
            self.rest = Some(tail);
            return Some(Chunk {
                data,
                len: data.len(),
                last: false,
            });
        }
        self.rest = None;
        Some(Chunk {
            data: rest,
            len: rest.len(),
            last: true,
        })
    }
}
