//! Envelope structure and encoding/decoding

use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    constants::ENVELOPE_MAGIC,
    error::{Error, Result},
    mac::MacAddress,
};

/// Envelope wrapping every command sent to the unit
///
/// # Frame Structure
///
/// ```text
/// ┌─────────┬─────────┬──────────┬─────────┬──────────┬──────────┬───────────┐
/// │  Magic  │  Zeros  │ MAC text │  Zeros  │ Sequence │  Length  │  Payload  │
/// │ 8 bytes │ 32 bytes│ 16 bytes │ 16 bytes│ 4 bytes  │ 4 bytes  │  N bytes  │
/// │         │         │ 12 ASCII │         │ (BE u32) │ (BE u32) │           │
/// │         │         │ + 4 zero │         │          │          │           │
/// └─────────┴─────────┴──────────┴─────────┴──────────┴──────────┴───────────┘
/// ```
///
/// The sequence field is always `00 00 00 seq`.
///
/// # Examples
///
/// ```
/// use zenkeo_core::{Command, Envelope, MacAddress};
///
/// let mac = MacAddress::parse("AA:BB:CC:DD:EE:FF").unwrap();
/// let envelope = Envelope::new(mac, 7, Command::Hello.payload().unwrap());
/// let encoded = envelope.encode().unwrap();
///
/// assert_eq!(encoded.len(), Envelope::HEADER_SIZE + 13);
/// assert_eq!(Envelope::decode(&encoded).unwrap(), envelope);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Unit the frame is addressed to
    pub mac: MacAddress,

    /// Per-session sequence number
    pub sequence: u8,

    /// Command payload
    pub payload: Bytes,
}

impl Envelope {
    /// Zero padding after the magic
    const LEADING_PADDING: usize = 32;

    /// Zero padding after the MAC block
    const TRAILING_PADDING: usize = 16;

    /// Offset of the sequence field
    pub const SEQUENCE_OFFSET: usize =
        ENVELOPE_MAGIC.len() + Self::LEADING_PADDING + MacAddress::BLOCK_SIZE + Self::TRAILING_PADDING;

    /// Bytes before the payload
    pub const HEADER_SIZE: usize = Self::SEQUENCE_OFFSET + 4 + 4;

    /// Maximum payload size
    pub const MAX_PAYLOAD_SIZE: usize = u32::MAX as usize;

    pub fn new(mac: MacAddress, sequence: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            mac,
            sequence,
            payload: payload.into(),
        }
    }

    /// Encode the envelope to bytes
    pub fn encode(&self) -> Result<BytesMut> {
        if self.payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: self.payload.len(),
                max: Self::MAX_PAYLOAD_SIZE,
            });
        }

        let mut buf = BytesMut::with_capacity(self.size());

        buf.put_slice(&ENVELOPE_MAGIC);
        buf.put_bytes(0, Self::LEADING_PADDING);
        buf.put_slice(&self.mac.block());
        buf.put_bytes(0, Self::TRAILING_PADDING);
        buf.put_u32(self.sequence as u32);
        buf.put_u32(self.payload.len() as u32);
        buf.put_slice(&self.payload);

        Ok(buf)
    }

    /// Decode an envelope from bytes
    ///
    /// The unit never answers with a well-formed envelope of its own, so this
    /// is for inspecting frames we produced (diagnostics, test doubles).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Buffer is shorter than the header or the declared payload
    /// - Magic bytes do not match
    /// - MAC block is not valid
    pub fn decode(frame: &[u8]) -> Result<Self> {
        if frame.len() < Self::HEADER_SIZE {
            return Err(Error::FrameTooShort {
                expected: Self::HEADER_SIZE,
                actual: frame.len(),
            });
        }

        let mut buf = frame;

        let mut magic = [0u8; 8];
        buf.copy_to_slice(&mut magic);
        if magic != ENVELOPE_MAGIC {
            return Err(Error::BadMagic(magic));
        }
        buf.advance(Self::LEADING_PADDING);

        let mac = MacAddress::from_block(&buf[..MacAddress::BLOCK_SIZE])?;
        buf.advance(MacAddress::BLOCK_SIZE + Self::TRAILING_PADDING);

        let sequence = (buf.get_u32() & 0xFF) as u8;
        let length = buf.get_u32() as usize;

        if buf.remaining() < length {
            return Err(Error::FrameTooShort {
                expected: Self::HEADER_SIZE + length,
                actual: frame.len(),
            });
        }

        Ok(Self {
            mac,
            sequence,
            payload: Bytes::copy_from_slice(&buf[..length]),
        })
    }

    /// Get total frame size
    pub fn size(&self) -> usize {
        Self::HEADER_SIZE + self.payload.len()
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("mac", &self.mac.to_string())
            .field("sequence", &self.sequence)
            .field("payload", &hex::encode(&self.payload))
            .finish()
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Envelope[{}](seq={}, len={})",
            self.mac,
            self.sequence,
            self.payload.len()
        )
    }
}
