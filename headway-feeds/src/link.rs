//! Frame layer of the co-processor link
//!
//! Frame format:
//! - SYNC (1 byte): 0x7E synchronization byte
//! - KIND (1 byte): message kind identifier
//! - LENGTH (2 bytes): body length, little-endian (0-4096)
//! - BODY (LENGTH bytes): kind-specific data
//! - CHECKSUM (1 byte): two's complement of the byte sum over KIND,
//!   LENGTH and BODY, so the sum of everything after SYNC is zero
//!
//! Response bodies carry whole HTTP response bodies, so the length field
//! is two bytes and the body bound is generous compared to a typical
//! control link.

use heapless::Vec;

/// Frame synchronization byte
pub const LINK_SYNC: u8 = 0x7E;

/// Maximum body length in bytes
pub const MAX_BODY_LEN: usize = 4096;

/// Bytes of framing around the body (SYNC + KIND + LENGTH + CHECKSUM)
pub const FRAME_OVERHEAD: usize = 5;

/// Errors produced by the frame layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Declared body length exceeds the link bound
    Oversize,
    /// Checksum mismatch
    Checksum,
    /// Output buffer too small for encoding
    BufferTooSmall,
    /// Message body failed to encode or decode
    Codec,
}

/// A complete, checksum-verified frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFrame {
    /// Message kind identifier
    pub kind: u8,
    /// Message body
    pub body: Vec<u8, MAX_BODY_LEN>,
}

/// Encode one frame into `out`, returning the number of bytes written
pub fn encode_frame(kind: u8, body: &[u8], out: &mut [u8]) -> Result<usize, LinkError> {
    if body.len() > MAX_BODY_LEN {
        return Err(LinkError::Oversize);
    }
    let total = FRAME_OVERHEAD + body.len();
    if out.len() < total {
        return Err(LinkError::BufferTooSmall);
    }

    let len = body.len() as u16;
    out[0] = LINK_SYNC;
    out[1] = kind;
    out[2] = (len & 0xFF) as u8;
    out[3] = (len >> 8) as u8;
    out[4..4 + body.len()].copy_from_slice(body);
    out[total - 1] = checksum(kind, len, body);

    Ok(total)
}

/// Checksum over everything between SYNC and the checksum byte itself
fn checksum(kind: u8, len: u16, body: &[u8]) -> u8 {
    let mut sum = kind
        .wrapping_add((len & 0xFF) as u8)
        .wrapping_add((len >> 8) as u8);
    for &byte in body {
        sum = sum.wrapping_add(byte);
    }
    sum.wrapping_neg()
}

/// Incremental frame decoder
///
/// Feed received bytes one at a time; a complete valid frame is returned
/// from the `push` that consumed its checksum byte. Bytes outside a frame
/// are discarded until the next SYNC, so the decoder resynchronizes after
/// line noise or a dropped byte.
#[derive(Debug)]
pub struct LinkDecoder {
    staged: Vec<u8, MAX_BODY_LEN>,
    state: DecodeState,
    kind: u8,
    remaining: usize,
    sum: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Sync,
    Kind,
    LenLow,
    LenHigh,
    Body,
    Check,
}

impl Default for LinkDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkDecoder {
    /// Create a decoder waiting for the next SYNC byte
    pub const fn new() -> Self {
        Self {
            staged: Vec::new(),
            state: DecodeState::Sync,
            kind: 0,
            remaining: 0,
            sum: 0,
        }
    }

    /// Discard any partial frame and wait for the next SYNC byte
    pub fn reset(&mut self) {
        self.staged.clear();
        self.state = DecodeState::Sync;
        self.kind = 0;
        self.remaining = 0;
        self.sum = 0;
    }

    /// Consume one received byte
    ///
    /// Returns `Ok(Some(frame))` when the byte completed a valid frame,
    /// `Ok(None)` while a frame is still in progress, and `Err` when a
    /// frame was abandoned (the decoder has already resynchronized).
    pub fn push(&mut self, byte: u8) -> Result<Option<LinkFrame>, LinkError> {
        match self.state {
            DecodeState::Sync => {
                if byte == LINK_SYNC {
                    self.state = DecodeState::Kind;
                }
                Ok(None)
            }
            DecodeState::Kind => {
                self.kind = byte;
                self.sum = byte;
                self.state = DecodeState::LenLow;
                Ok(None)
            }
            DecodeState::LenLow => {
                self.remaining = byte as usize;
                self.sum = self.sum.wrapping_add(byte);
                self.state = DecodeState::LenHigh;
                Ok(None)
            }
            DecodeState::LenHigh => {
                self.remaining |= (byte as usize) << 8;
                self.sum = self.sum.wrapping_add(byte);
                if self.remaining > MAX_BODY_LEN {
                    self.reset();
                    return Err(LinkError::Oversize);
                }
                self.state = if self.remaining == 0 {
                    DecodeState::Check
                } else {
                    DecodeState::Body
                };
                Ok(None)
            }
            DecodeState::Body => {
                // Capacity was checked against the declared length
                let _ = self.staged.push(byte);
                self.sum = self.sum.wrapping_add(byte);
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.state = DecodeState::Check;
                }
                Ok(None)
            }
            DecodeState::Check => {
                let valid = self.sum.wrapping_add(byte) == 0;
                if !valid {
                    self.reset();
                    return Err(LinkError::Checksum);
                }
                let frame = LinkFrame {
                    kind: self.kind,
                    body: core::mem::take(&mut self.staged),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decode_all(decoder: &mut LinkDecoder, bytes: &[u8]) -> Option<LinkFrame> {
        for &byte in bytes {
            if let Ok(Some(frame)) = decoder.push(byte) {
                return Some(frame);
            }
        }
        None
    }

    #[test]
    fn test_encode_empty_body() {
        let mut out = [0u8; 8];
        let len = encode_frame(0x11, &[], &mut out).unwrap();

        assert_eq!(len, 5);
        assert_eq!(out[0], LINK_SYNC);
        assert_eq!(out[1], 0x11);
        assert_eq!(out[2], 0);
        assert_eq!(out[3], 0);
        // 0x11 + 0 + 0 + checksum == 0 (mod 256)
        assert_eq!(out[4], 0x11u8.wrapping_neg());
    }

    #[test]
    fn test_roundtrip() {
        let mut out = [0u8; 64];
        let len = encode_frame(0x12, b"hello", &mut out).unwrap();

        let mut decoder = LinkDecoder::new();
        let frame = decode_all(&mut decoder, &out[..len]).expect("frame");
        assert_eq!(frame.kind, 0x12);
        assert_eq!(&frame.body[..], b"hello");
    }

    #[test]
    fn test_resync_after_garbage() {
        let mut out = [0u8; 64];
        let len = encode_frame(0x12, b"ok", &mut out).unwrap();

        let mut stream: Vec<u8, 64> = Vec::new();
        stream.extend_from_slice(&[0x00, 0xFF, 0x42]).unwrap();
        stream.extend_from_slice(&out[..len]).unwrap();

        let mut decoder = LinkDecoder::new();
        let frame = decode_all(&mut decoder, &stream).expect("frame after garbage");
        assert_eq!(&frame.body[..], b"ok");
    }

    #[test]
    fn test_checksum_rejected() {
        let mut out = [0u8; 64];
        let len = encode_frame(0x12, b"hello", &mut out).unwrap();
        out[6] ^= 0x01; // corrupt one body byte

        let mut decoder = LinkDecoder::new();
        let mut saw_error = false;
        for &byte in &out[..len] {
            match decoder.push(byte) {
                Ok(Some(_)) => panic!("corrupt frame accepted"),
                Ok(None) => {}
                Err(LinkError::Checksum) => saw_error = true,
                Err(e) => panic!("unexpected error {e:?}"),
            }
        }
        assert!(saw_error);
    }

    #[test]
    fn test_oversize_declared_length() {
        let mut decoder = LinkDecoder::new();
        let header = [LINK_SYNC, 0x12, 0xFF, 0xFF]; // 65535 byte body
        let mut result = Ok(None);
        for &byte in &header {
            result = decoder.push(byte);
        }
        assert_eq!(result, Err(LinkError::Oversize));

        // Decoder recovered: a valid frame still parses afterwards
        let mut out = [0u8; 16];
        let len = encode_frame(0x11, &[], &mut out).unwrap();
        assert!(decode_all(&mut decoder, &out[..len]).is_some());
    }

    proptest! {
        /// Any body survives the wire, including ones containing SYNC bytes
        #[test]
        fn test_roundtrip_arbitrary_bodies(
            kind in any::<u8>(),
            body in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let mut wire = std::vec![0u8; body.len() + FRAME_OVERHEAD];
            let len = encode_frame(kind, &body, &mut wire).unwrap();

            let mut decoder = LinkDecoder::new();
            let frame = decode_all(&mut decoder, &wire[..len]).expect("frame");
            prop_assert_eq!(frame.kind, kind);
            prop_assert_eq!(&frame.body[..], &body[..]);
        }
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut first = [0u8; 16];
        let mut second = [0u8; 16];
        let a = encode_frame(0x11, b"a", &mut first).unwrap();
        let b = encode_frame(0x12, b"bb", &mut second).unwrap();

        let mut decoder = LinkDecoder::new();
        let mut frames: Vec<LinkFrame, 4> = Vec::new();
        for &byte in first[..a].iter().chain(second[..b].iter()) {
            if let Ok(Some(frame)) = decoder.push(byte) {
                frames.push(frame).unwrap();
            }
        }
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].kind, 0x11);
        assert_eq!(frames[1].kind, 0x12);
    }
}
