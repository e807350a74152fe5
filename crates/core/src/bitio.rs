//! Bit-level packing and unpacking.
//!
//! `BitWriter` concatenates variable-length codes into bytes and `BitReader`
//! walks them back one bit at a time. Both operate MSB-first: the first
//! code bit lands in the most significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: zero-fills the unused low bits of the final byte and reports
//!   how many there are (0-7) in [`PackedBuffer::padding`]
//! - BitReader: given that padding, stops before the filler bits instead of
//!   treating them as data
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! // Total: 10111 -> padded to 10111000, 3 padding bits
//!
//! let packed = writer.finish();
//! assert_eq!(packed.bytes, vec![0b1011_1000]);
//! assert_eq!(packed.padding, 3);
//!
//! let mut reader = BitReader::with_padding(&packed.bytes, packed.padding).unwrap();
//! let bits: Vec<bool> = std::iter::from_fn(|| reader.read_bit()).collect();
//! assert_eq!(bits, [true, false, true, true, true]);
//! assert!(reader.is_empty());
//! ```

use crate::error::{BitIoError, CorruptionError, Result};

/// Packed bytes plus the number of unused low bits in the final byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBuffer {
    pub bytes: Vec<u8>,
    /// Unused low bits of the last byte (0-7). Always 0 for an empty buffer.
    pub padding: u8,
}

impl PackedBuffer {
    /// Number of data bits, excluding padding.
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding as usize)
    }
}

/// Padding needed to complete the final byte of a `total_bits` stream.
pub fn padding_for(total_bits: usize) -> u8 {
    ((8 - total_bits % 8) % 8) as u8
}

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - unused bits of `bit_buffer` are zero
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer whose output buffer can hold `bytes` without growing.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.bit_count as usize;
            let take = remaining.min(free);
            let shift = remaining - take;

            let bits = ((value >> shift) & ((1u64 << take) - 1)) as u8;
            self.bit_buffer |= bits << (free - take);
            self.bit_count += take as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining = shift;
        }

        Ok(())
    }

    /// Flush the partial byte (zero-filled) and return the packed output.
    pub fn finish(mut self) -> PackedBuffer {
        let padding = padding_for(self.bit_count as usize);
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        PackedBuffer {
            bytes: self.bytes,
            padding,
        }
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer, up to a fixed bit limit.
///
/// # Invariants
/// - `bit_position <= bit_limit <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
    /// First bit position that is not data
    bit_limit: usize,
}

impl<'a> BitReader<'a> {
    /// Read `data` excluding the `padding` low bits of its last byte.
    ///
    /// # Errors
    /// `CorruptionError::PaddingExceedsStream` if the padding is larger
    /// than the buffer itself.
    pub fn with_padding(data: &'a [u8], padding: u8) -> Result<Self> {
        let total_bits = data.len() * 8;
        let bit_limit = total_bits.checked_sub(padding as usize).ok_or(
            CorruptionError::PaddingExceedsStream {
                padding,
                total_bits,
            },
        )?;
        Ok(Self {
            data,
            bit_position: 0,
            bit_limit,
        })
    }

    /// Read a single bit, or `None` once the data bits are used up.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.is_empty() {
            return None;
        }
        let byte = self.data[self.bit_position / 8];
        let bit = (byte >> (7 - self.bit_position % 8)) & 1;
        self.bit_position += 1;
        Some(bit == 1)
    }

    pub fn bits_remaining(&self) -> usize {
        self.bit_limit - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use test_case::test_case;

    #[test]
    fn test_partial_byte_reports_padding() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        assert_eq!(writer.bit_len(), 5);

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b1011_1000]);
        assert_eq!(packed.padding, 3);
        assert_eq!(packed.bit_len(), 5);
    }

    #[test]
    fn test_full_byte_has_no_padding() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1011_0011, 8).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b1011_0011]);
        assert_eq!(packed.padding, 0);
    }

    #[test]
    fn test_empty_writer() {
        let packed = BitWriter::new().finish();
        assert!(packed.bytes.is_empty());
        assert_eq!(packed.padding, 0);
    }

    #[test]
    fn test_write_spanning_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1, 1).unwrap();
        writer.write_bits(0b0101_0101_1, 9).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b1010_1010, 0b1100_0000]);
        assert_eq!(packed.padding, 6);
    }

    #[test]
    fn test_64_bit_values() {
        let mut writer = BitWriter::new();
        let val = 0x1234_5678_9ABC_DEF0u64;
        writer.write_bits(val, 64).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.bytes, val.to_be_bytes());
        assert_eq!(packed.padding, 0);

        let mut reader = BitReader::with_padding(&packed.bytes, packed.padding).unwrap();
        let mut read = 0u64;
        while let Some(bit) = reader.read_bit() {
            read = (read << 1) | bit as u64;
        }
        assert_eq!(read, val);
        assert_eq!(reader.position(), 64);
    }

    #[test]
    fn test_too_many_bits() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            writer.write_bits(0, 65),
            Err(Error::BitIo(BitIoError::InvalidBitCount(65)))
        ));
    }

    #[test_case(0, 0; "no bits")]
    #[test_case(1, 7; "one bit")]
    #[test_case(7, 1; "seven bits")]
    #[test_case(8, 0; "whole byte")]
    #[test_case(13, 3; "thirteen bits")]
    fn test_padding_for(total_bits: usize, expected: u8) {
        assert_eq!(padding_for(total_bits), expected);
    }

    #[test]
    fn test_reader_stops_at_padding() {
        let data = [0b1010_0000];
        let mut reader = BitReader::with_padding(&data, 5).unwrap();

        assert_eq!(reader.bits_remaining(), 3);
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), None);
        assert!(reader.is_empty());
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_padding_larger_than_buffer() {
        let result = BitReader::with_padding(&[], 4);
        assert!(matches!(
            result,
            Err(Error::StreamCorruption(
                CorruptionError::PaddingExceedsStream { padding: 4, total_bits: 0 }
            ))
        ));
    }

    #[test]
    fn test_read_past_end() {
        let data = [0b1010_1010];
        let mut reader = BitReader::with_padding(&data, 0).unwrap();

        for expected in [true, false, true, false, true, false, true, false] {
            assert_eq!(reader.read_bit(), Some(expected));
        }
        assert_eq!(reader.read_bit(), None);
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.bits_remaining(), 0);
    }
}
