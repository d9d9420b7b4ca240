//! Bit level framing of the watermark payload.
//!
//! A frame is every payload byte, most significant bit first, followed by a
//! terminator of 8 zero bits. The terminator only counts on a byte boundary.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};
use log::debug;

use super::Record;
use crate::result::Result;

pub const TERMINATOR: u8 = 0;

/// Ordered bits of one frame, terminator included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream(Vec<bool>);

impl BitStream {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Outcome of reading a frame back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unframed {
    /// The terminator was found, the bytes before it.
    Terminated(Vec<u8>),
    /// The scan limit was hit first, all complete bytes read so far.
    NotTerminated(Vec<u8>),
}

impl Unframed {
    pub fn content(&self) -> &[u8] {
        match self {
            Unframed::Terminated(content) | Unframed::NotTerminated(content) => content,
        }
    }

    pub fn into_content(self) -> Vec<u8> {
        match self {
            Unframed::Terminated(content) | Unframed::NotTerminated(content) => content,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, Unframed::Terminated(_))
    }

    /// Maps every byte to the character with that code.
    pub fn to_text(&self) -> String {
        decode_text(self.content())
    }
}

/// Frames a record, see [`frame_bytes`].
pub fn frame(record: &Record) -> Result<BitStream> {
    let payload = record.to_payload()?;
    Ok(frame_bytes(payload.as_bytes()))
}

/// Frames raw payload bytes: 8 bits per byte, MSB first, then the terminator.
pub fn frame_bytes(payload: &[u8]) -> BitStream {
    let total_bits = (payload.len() + 1) << 3;
    let mut bits = Vec::with_capacity(total_bits);
    let mut reader = BitReader::endian(Cursor::new(payload), BigEndian);

    while let Ok(bit) = reader.read_bit() {
        bits.push(bit);
    }
    bits.extend(std::iter::repeat(false).take(8));
    debug!("framed {} payload bytes into {total_bits} bits", payload.len());

    BitStream(bits)
}

/// Reads at most `scan_limit` bits and collects bytes until the terminator.
pub fn unframe<I>(bits: I, scan_limit: usize) -> Unframed
where
    I: IntoIterator<Item = bool>,
{
    let mut content = Vec::new();
    let mut byte = 0u8;
    let mut bits_in_byte = 0;

    for bit in bits.into_iter().take(scan_limit) {
        byte = (byte << 1) | u8::from(bit);
        bits_in_byte += 1;

        if bits_in_byte == 8 {
            if byte == TERMINATOR {
                return Unframed::Terminated(content);
            }
            content.push(byte);
            byte = 0;
            bits_in_byte = 0;
        }
    }

    Unframed::NotTerminated(content)
}

/// Bytes to text, one character per byte code.
pub fn decode_text(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
