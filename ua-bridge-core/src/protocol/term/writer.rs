use super::{tag, VERSION};
use bytes::{BufMut, Bytes, BytesMut};

/// Append-only builder for one encoded term body.
///
/// Integers are emitted in the narrowest representation that holds the
/// value so that large unsigned values survive without sign corruption.
#[derive(Default)]
pub struct TermWriter {
    buf: BytesMut,
}

impl TermWriter {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(256),
        }
    }

    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn version(&mut self) -> &mut Self {
        self.buf.put_u8(VERSION);
        self
    }

    /// Splice pre-encoded term bytes verbatim.
    pub fn raw(&mut self, encoded: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(encoded);
        self
    }

    pub fn tuple_header(&mut self, arity: usize) -> &mut Self {
        if arity <= u8::MAX as usize {
            self.buf.put_u8(tag::SMALL_TUPLE_EXT);
            self.buf.put_u8(arity as u8);
        } else {
            self.buf.put_u8(tag::LARGE_TUPLE_EXT);
            self.buf.put_u32(arity as u32);
        }
        self
    }

    pub fn atom(&mut self, name: &str) -> &mut Self {
        self.buf.put_u8(tag::ATOM_EXT);
        self.buf.put_u16(name.len() as u16);
        self.buf.extend_from_slice(name.as_bytes());
        self
    }

    pub fn boolean(&mut self, value: bool) -> &mut Self {
        self.atom(if value { "true" } else { "false" })
    }

    pub fn i64(&mut self, value: i64) -> &mut Self {
        if (0..=255).contains(&value) {
            self.buf.put_u8(tag::SMALL_INTEGER_EXT);
            self.buf.put_u8(value as u8);
        } else if let Ok(v) = i32::try_from(value) {
            self.buf.put_u8(tag::INTEGER_EXT);
            self.buf.put_i32(v);
        } else {
            self.small_big(value.unsigned_abs(), value < 0);
        }
        self
    }

    pub fn u64(&mut self, value: u64) -> &mut Self {
        if value <= 255 {
            self.buf.put_u8(tag::SMALL_INTEGER_EXT);
            self.buf.put_u8(value as u8);
        } else if let Ok(v) = i32::try_from(value) {
            self.buf.put_u8(tag::INTEGER_EXT);
            self.buf.put_i32(v);
        } else {
            self.small_big(value, false);
        }
        self
    }

    fn small_big(&mut self, magnitude: u64, negative: bool) {
        let raw = magnitude.to_le_bytes();
        let n = raw.iter().rposition(|b| *b != 0).map_or(1, |i| i + 1);
        self.buf.put_u8(tag::SMALL_BIG_EXT);
        self.buf.put_u8(n as u8);
        self.buf.put_u8(u8::from(negative));
        self.buf.extend_from_slice(&raw[..n]);
    }

    pub fn f64(&mut self, value: f64) -> &mut Self {
        self.buf.put_u8(tag::NEW_FLOAT_EXT);
        self.buf.put_f64(value);
        self
    }

    pub fn binary(&mut self, data: &[u8]) -> &mut Self {
        self.buf.put_u8(tag::BINARY_EXT);
        self.buf.put_u32(data.len() as u32);
        self.buf.extend_from_slice(data);
        self
    }

    /// Latin-1 charlist. Reserved for the node-class text, which callers
    /// historically match as a list of small integers.
    pub fn charlist(&mut self, text: &str) -> &mut Self {
        self.buf.put_u8(tag::STRING_EXT);
        self.buf.put_u16(text.len() as u16);
        self.buf.extend_from_slice(text.as_bytes());
        self
    }

    /// List header for a sequence of `len` elements.
    ///
    /// The caller must follow the `len` elements with [`TermWriter::nil`]
    /// when, and only when, `len` is non-zero; a zero-length sequence is the
    /// bare header with no terminator.
    pub fn list_header(&mut self, len: usize) -> &mut Self {
        if len == 0 {
            self.buf.put_u8(tag::NIL_EXT);
        } else {
            self.buf.put_u8(tag::LIST_EXT);
            self.buf.put_u32(len as u32);
        }
        self
    }

    pub fn nil(&mut self) -> &mut Self {
        self.buf.put_u8(tag::NIL_EXT);
        self
    }

    pub fn map_header(&mut self, arity: usize) -> &mut Self {
        self.buf.put_u8(tag::MAP_EXT);
        self.buf.put_u32(arity as u32);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers_use_one_byte_form() {
        let mut w = TermWriter::new();
        w.u64(200);
        assert_eq!(w.into_bytes().as_ref(), &[tag::SMALL_INTEGER_EXT, 200]);
    }

    #[test]
    fn i32_range_uses_integer_ext() {
        let mut w = TermWriter::new();
        w.i64(-1);
        assert_eq!(
            w.into_bytes().as_ref(),
            &[tag::INTEGER_EXT, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn wide_unsigned_uses_small_big() {
        let mut w = TermWriter::new();
        w.u64(u64::MAX);
        let out = w.into_bytes();
        assert_eq!(out[0], tag::SMALL_BIG_EXT);
        assert_eq!(out[1], 8); // digit count
        assert_eq!(out[2], 0); // sign
        assert!(out[3..].iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn empty_list_is_bare_nil() {
        let mut w = TermWriter::new();
        w.list_header(0);
        assert_eq!(w.into_bytes().as_ref(), &[tag::NIL_EXT]);
    }

    #[test]
    fn nonempty_list_has_header_and_terminator() {
        let mut w = TermWriter::new();
        w.list_header(2);
        w.u64(1);
        w.u64(2);
        w.nil();
        let out = w.into_bytes();
        assert_eq!(out[0], tag::LIST_EXT);
        assert_eq!(&out[1..5], &[0, 0, 0, 2]);
        assert_eq!(*out.last().unwrap(), tag::NIL_EXT);
    }

    #[test]
    fn charlist_uses_string_ext() {
        let mut w = TermWriter::new();
        w.charlist("Variable");
        let out = w.into_bytes();
        assert_eq!(out[0], tag::STRING_EXT);
        assert_eq!(&out[3..], b"Variable");
    }
}
