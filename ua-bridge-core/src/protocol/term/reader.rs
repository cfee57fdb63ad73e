use super::{tag, VERSION};
use crate::protocol::error::{ProtocolError, Result};
use bytes::Bytes;

/// Cursor over one encoded term body.
///
/// Every accessor validates the leading tag before consuming the payload; a
/// mismatch is a fatal decode failure, never a partial read.
pub struct TermReader {
    buf: Bytes,
    pos: usize,
}

impl TermReader {
    pub fn new(buf: Bytes) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn need(&self, n: usize) -> Result<()> {
        if self.remaining() < n {
            return Err(ProtocolError::Truncated {
                needed: n - self.remaining(),
            });
        }
        Ok(())
    }

    fn take_u8(&mut self) -> Result<u8> {
        self.need(1)?;
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    fn take_u16(&mut self) -> Result<u16> {
        self.need(2)?;
        let v = u16::from_be_bytes([self.buf[self.pos], self.buf[self.pos + 1]]);
        self.pos += 2;
        Ok(v)
    }

    fn take_u32(&mut self) -> Result<u32> {
        self.need(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.buf[self.pos..self.pos + 4]);
        self.pos += 4;
        Ok(u32::from_be_bytes(raw))
    }

    fn take_bytes(&mut self, n: usize) -> Result<Bytes> {
        self.need(n)?;
        let out = self.buf.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }

    #[inline]
    pub fn peek_tag(&self) -> Result<u8> {
        self.need(1)?;
        Ok(self.buf[self.pos])
    }

    /// Consume the leading version byte.
    pub fn expect_version(&mut self) -> Result<()> {
        let v = self.take_u8()?;
        if v != VERSION {
            return Err(ProtocolError::BadVersion(v));
        }
        Ok(())
    }

    /// Read a tuple header and return its arity.
    pub fn read_tuple_header(&mut self, context: &'static str) -> Result<usize> {
        match self.take_u8()? {
            tag::SMALL_TUPLE_EXT => Ok(self.take_u8()? as usize),
            tag::LARGE_TUPLE_EXT => Ok(self.take_u32()? as usize),
            found => Err(ProtocolError::UnexpectedTag {
                context,
                expected: "tuple",
                found,
            }),
        }
    }

    /// Read a tuple header and validate its arity.
    pub fn expect_tuple(&mut self, context: &'static str, arity: usize) -> Result<()> {
        let actual = self.read_tuple_header(context)?;
        if actual != arity {
            return Err(ProtocolError::ArityMismatch {
                context,
                expected: arity,
                actual,
            });
        }
        Ok(())
    }

    /// Read any integer term as a signed 64-bit value.
    pub fn read_i64(&mut self, target: &'static str) -> Result<i64> {
        match self.take_u8()? {
            tag::SMALL_INTEGER_EXT => Ok(i64::from(self.take_u8()?)),
            tag::INTEGER_EXT => Ok(i64::from(self.take_u32()? as i32)),
            tag::SMALL_BIG_EXT => {
                let n = self.take_u8()? as usize;
                let sign = self.take_u8()?;
                let digits = self.take_bytes(n)?;
                let mut magnitude: u64 = 0;
                for (i, d) in digits.iter().enumerate() {
                    if i >= 8 && *d != 0 {
                        return Err(ProtocolError::IntegerRange { target });
                    }
                    if i < 8 {
                        magnitude |= u64::from(*d) << (8 * i);
                    }
                }
                if sign == 0 {
                    i64::try_from(magnitude).map_err(|_| ProtocolError::IntegerRange { target })
                } else if magnitude <= i64::MAX as u64 + 1 {
                    Ok((magnitude as i64).wrapping_neg())
                } else {
                    Err(ProtocolError::IntegerRange { target })
                }
            }
            found => Err(ProtocolError::UnexpectedTag {
                context: target,
                expected: "integer",
                found,
            }),
        }
    }

    /// Read any integer term as an unsigned 64-bit value.
    pub fn read_u64(&mut self, target: &'static str) -> Result<u64> {
        match self.take_u8()? {
            tag::SMALL_INTEGER_EXT => Ok(u64::from(self.take_u8()?)),
            tag::INTEGER_EXT => {
                let v = self.take_u32()? as i32;
                u64::try_from(v).map_err(|_| ProtocolError::IntegerRange { target })
            }
            tag::SMALL_BIG_EXT => {
                let n = self.take_u8()? as usize;
                let sign = self.take_u8()?;
                if sign != 0 {
                    return Err(ProtocolError::IntegerRange { target });
                }
                let digits = self.take_bytes(n)?;
                let mut magnitude: u64 = 0;
                for (i, d) in digits.iter().enumerate() {
                    if i >= 8 && *d != 0 {
                        return Err(ProtocolError::IntegerRange { target });
                    }
                    if i < 8 {
                        magnitude |= u64::from(*d) << (8 * i);
                    }
                }
                Ok(magnitude)
            }
            found => Err(ProtocolError::UnexpectedTag {
                context: target,
                expected: "integer",
                found,
            }),
        }
    }

    pub fn read_u32(&mut self, target: &'static str) -> Result<u32> {
        u32::try_from(self.read_u64(target)?).map_err(|_| ProtocolError::IntegerRange { target })
    }

    pub fn read_u16(&mut self, target: &'static str) -> Result<u16> {
        u16::try_from(self.read_u64(target)?).map_err(|_| ProtocolError::IntegerRange { target })
    }

    pub fn read_u8_int(&mut self, target: &'static str) -> Result<u8> {
        u8::try_from(self.read_u64(target)?).map_err(|_| ProtocolError::IntegerRange { target })
    }

    pub fn read_i32(&mut self, target: &'static str) -> Result<i32> {
        i32::try_from(self.read_i64(target)?).map_err(|_| ProtocolError::IntegerRange { target })
    }

    pub fn read_f64(&mut self, context: &'static str) -> Result<f64> {
        match self.take_u8()? {
            tag::NEW_FLOAT_EXT => {
                self.need(8)?;
                let mut raw = [0u8; 8];
                raw.copy_from_slice(&self.buf[self.pos..self.pos + 8]);
                self.pos += 8;
                Ok(f64::from_be_bytes(raw))
            }
            found => Err(ProtocolError::UnexpectedTag {
                context,
                expected: "float",
                found,
            }),
        }
    }

    pub fn read_atom(&mut self, context: &'static str) -> Result<String> {
        let len = match self.take_u8()? {
            tag::ATOM_EXT | tag::ATOM_UTF8_EXT => self.take_u16()? as usize,
            tag::SMALL_ATOM_UTF8_EXT => self.take_u8()? as usize,
            found => {
                return Err(ProtocolError::UnexpectedTag {
                    context,
                    expected: "atom",
                    found,
                })
            }
        };
        let raw = self.take_bytes(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| ProtocolError::AtomNotUtf8)
    }

    pub fn read_bool(&mut self, context: &'static str) -> Result<bool> {
        match self.read_atom(context)?.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ProtocolError::UnexpectedTag {
                context,
                expected: "boolean atom",
                found: tag::ATOM_EXT,
            }),
        }
    }

    /// Read a binary blob. Arbitrary byte content, embedded NULs included.
    pub fn read_binary(&mut self, context: &'static str) -> Result<Bytes> {
        match self.take_u8()? {
            tag::BINARY_EXT => {
                let len = self.take_u32()? as usize;
                self.take_bytes(len)
            }
            found => Err(ProtocolError::UnexpectedTag {
                context,
                expected: "binary",
                found,
            }),
        }
    }

    /// Read a binary blob as owned text.
    pub fn read_binary_string(&mut self, context: &'static str) -> Result<String> {
        let raw = self.read_binary(context)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    /// Skip exactly one term and return its raw encoded bytes.
    ///
    /// Used to capture caller metadata verbatim without modelling its shape.
    pub fn skip_term(&mut self) -> Result<Bytes> {
        let start = self.pos;
        self.skip_one()?;
        Ok(self.buf.slice(start..self.pos))
    }

    fn skip_one(&mut self) -> Result<()> {
        match self.take_u8()? {
            tag::SMALL_INTEGER_EXT => {
                self.take_u8()?;
            }
            tag::INTEGER_EXT => {
                self.take_u32()?;
            }
            tag::NEW_FLOAT_EXT => {
                self.take_bytes(8)?;
            }
            tag::ATOM_EXT | tag::ATOM_UTF8_EXT => {
                let len = self.take_u16()? as usize;
                self.take_bytes(len)?;
            }
            tag::SMALL_ATOM_UTF8_EXT => {
                let len = self.take_u8()? as usize;
                self.take_bytes(len)?;
            }
            tag::SMALL_TUPLE_EXT => {
                let arity = self.take_u8()? as usize;
                for _ in 0..arity {
                    self.skip_one()?;
                }
            }
            tag::LARGE_TUPLE_EXT => {
                let arity = self.take_u32()? as usize;
                for _ in 0..arity {
                    self.skip_one()?;
                }
            }
            tag::NIL_EXT => {}
            tag::STRING_EXT => {
                let len = self.take_u16()? as usize;
                self.take_bytes(len)?;
            }
            tag::LIST_EXT => {
                let len = self.take_u32()? as usize;
                for _ in 0..len {
                    self.skip_one()?;
                }
                // improper-list tail
                self.skip_one()?;
            }
            tag::BINARY_EXT => {
                let len = self.take_u32()? as usize;
                self.take_bytes(len)?;
            }
            tag::SMALL_BIG_EXT => {
                let n = self.take_u8()? as usize;
                self.take_bytes(n + 1)?;
            }
            tag::MAP_EXT => {
                let arity = self.take_u32()? as usize;
                for _ in 0..arity * 2 {
                    self.skip_one()?;
                }
            }
            found => {
                return Err(ProtocolError::UnexpectedTag {
                    context: "skip_term",
                    expected: "any supported term",
                    found,
                })
            }
        }
        Ok(())
    }
}
