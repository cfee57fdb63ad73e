//! Length-prefixed framing over the host transport.
//!
//! Every message is a big-endian u16 byte count followed by that many body
//! bytes. The prefix counts the body only, never itself.

use crate::protocol::error::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

const LENGTH_PREFIX: usize = 2;

/// Splits the byte stream into message bodies and prefixes outbound bodies.
pub struct FrameCodec {
    max_frame_bytes: usize,
}

impl FrameCodec {
    pub fn new(max_frame_bytes: usize) -> Self {
        Self {
            max_frame_bytes: max_frame_bytes.min(u16::MAX as usize),
        }
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new(u16::MAX as usize)
    }
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>, ProtocolError> {
        if src.len() < LENGTH_PREFIX {
            return Ok(None);
        }

        let body_len = u16::from_be_bytes([src[0], src[1]]) as usize;
        if body_len > self.max_frame_bytes {
            tracing::warn!(body_len, limit = self.max_frame_bytes, "oversized frame");
            return Err(ProtocolError::FrameTooLarge(body_len));
        }
        if src.len() < LENGTH_PREFIX + body_len {
            src.reserve(LENGTH_PREFIX + body_len - src.len());
            return Ok(None);
        }

        src.advance(LENGTH_PREFIX);
        Ok(Some(src.split_to(body_len).freeze()))
    }
}

impl Encoder<Bytes> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, body: Bytes, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        if body.len() > self.max_frame_bytes {
            return Err(ProtocolError::FrameTooLarge(body.len()));
        }
        dst.reserve(LENGTH_PREFIX + body.len());
        dst.put_u16(body.len() as u16);
        dst.extend_from_slice(&body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_prefixes_body_length() {
        let mut codec = FrameCodec::default();
        let mut out = BytesMut::new();
        codec.encode(Bytes::from_static(b"abc"), &mut out).unwrap();
        assert_eq!(out.as_ref(), &[0, 3, b'a', b'b', b'c']);
    }

    #[test]
    fn decode_waits_for_full_body() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[0u8, 4, 1, 2][..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(&[3, 4]);
        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(frame.as_ref(), &[1, 2, 3, 4]);
        assert!(buf.is_empty());
    }

    #[test]
    fn decode_splits_back_to_back_frames() {
        let mut codec = FrameCodec::default();
        let mut buf = BytesMut::from(&[0u8, 1, 9, 0, 2, 7, 8][..]);
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap().as_ref(), &[9]);
        assert_eq!(codec.decode(&mut buf).unwrap().unwrap().as_ref(), &[7, 8]);
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn oversized_frame_is_rejected() {
        let mut codec = FrameCodec::new(8);
        let mut buf = BytesMut::from(&[0u8, 9][..]);
        assert!(matches!(
            codec.decode(&mut buf),
            Err(ProtocolError::FrameTooLarge(9))
        ));

        let mut out = BytesMut::new();
        assert!(matches!(
            codec.encode(Bytes::from(vec![0; 9]), &mut out),
            Err(ProtocolError::FrameTooLarge(9))
        ));
    }

    #[test]
    fn empty_frame_round_trips() {
        let mut codec = FrameCodec::default();
        let mut out = BytesMut::new();
        codec.encode(Bytes::new(), &mut out).unwrap();
        let frame = codec.decode(&mut out).unwrap().unwrap();
        assert!(frame.is_empty());
    }
}
