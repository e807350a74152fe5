//! Metadata sidecar serialization and parsing.
//!
//! The packed payload has no header of its own; everything needed to decode
//! it lives in this record, persisted separately from the payload.
//!
//! # Record Format
//!
//! ```text
//! +---------------------+
//! | symbol_count (2)    |  u16 little-endian, 0..=256
//! +---------------------+
//! | symbol (1)          |  i8, the byte's two's-complement pattern
//! | count (4)           |  i32 little-endian, > 0
//! |   ... symbol_count  |
//! |       times         |
//! +---------------------+
//! | padding (1)         |  u8, unused low bits of the last packed byte
//! +---------------------+
//! | original_size (4)   |  u32 little-endian
//! +---------------------+
//! ```
//!
//! Entries are stored in the order the tree builder consumes them. Parsing
//! is all-or-nothing: a record that ends early is rejected, never partially
//! applied.

use std::io::{Read, Write};

use crate::error::{Error, HuffmanError, MetadataError, Result};
use crate::frequency::{FrequencyEntry, FrequencyTable};

/// Bytes taken by the symbol count header
const HEADER_SIZE: usize = 2;

/// Bytes per (symbol, count) entry
const ENTRY_SIZE: usize = 5;

/// Bytes taken by padding + original size
const TRAILER_SIZE: usize = 5;

/// Most entries a record may declare, one per byte value
pub const MAX_SYMBOLS: usize = 256;

/// The data a decoder needs besides the packed bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    table: FrequencyTable,
    padding: u8,
    original_size: u32,
}

impl MetadataRecord {
    /// Assemble a record, checking that every field fits the wire format.
    ///
    /// # Errors
    /// - `Error::InputTooLarge` if a count or the original size overflows
    ///   its field
    /// - `MetadataError::InvalidPadding` if padding is above 7
    pub fn new(table: FrequencyTable, padding: u8, original_size: usize) -> Result<Self> {
        let too_large = || Error::InputTooLarge { len: original_size };
        let original_size = u32::try_from(original_size).map_err(|_| too_large())?;
        if table
            .entries()
            .iter()
            .any(|entry| i32::try_from(entry.count).is_err())
        {
            return Err(too_large());
        }
        if padding > 7 {
            return Err(MetadataError::InvalidPadding(padding).into());
        }

        Ok(Self {
            table,
            padding,
            original_size,
        })
    }

    /// The record for an empty input.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn symbol_count(&self) -> u16 {
        self.table.len() as u16
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    pub fn original_size(&self) -> u32 {
        self.original_size
    }

    /// Size of the serialized record in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + ENTRY_SIZE * self.table.len() + TRAILER_SIZE
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.encoded_len());

        bytes.extend_from_slice(&self.symbol_count().to_le_bytes());
        for entry in self.table.entries() {
            let symbol = entry.symbol as i8;
            // Counts were range-checked in `new` or `from_bytes`.
            let count = entry.count as i32;
            bytes.extend_from_slice(&symbol.to_le_bytes());
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        bytes.push(self.padding);
        bytes.extend_from_slice(&self.original_size.to_le_bytes());

        bytes
    }

    /// Persist the record.
    ///
    /// # Errors
    /// `Error::MetadataWrite` if the writer fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer
            .write_all(&self.to_bytes())
            .and_then(|()| writer.flush())
            .map_err(Error::MetadataWrite)
    }

    /// Parse a complete record.
    ///
    /// # Errors
    /// - `MetadataError::Missing` / `MetadataError::Truncated` on a short read
    /// - the other `MetadataError` variants for a record that cannot be valid
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(MetadataError::Missing.into());
        }

        let mut reader = FieldReader::new(bytes);

        let symbol_count = u16::from_le_bytes(reader.take("symbol count")?);
        if symbol_count as usize > MAX_SYMBOLS {
            return Err(MetadataError::TooManySymbols(symbol_count).into());
        }

        let entries_len = ENTRY_SIZE * symbol_count as usize;
        if reader.remaining() < entries_len {
            return Err(MetadataError::Truncated {
                field: "frequency entries",
                required: entries_len,
                available: reader.remaining(),
            }
            .into());
        }

        let mut entries = Vec::with_capacity(symbol_count as usize);
        for _ in 0..symbol_count {
            let symbol = i8::from_le_bytes(reader.take("symbol")?) as u8;
            let count = i32::from_le_bytes(reader.take("count")?);
            let count = u32::try_from(count)
                .ok()
                .filter(|&count| count > 0)
                .ok_or(MetadataError::InvalidCount { symbol, count })?;
            entries.push(FrequencyEntry { symbol, count });
        }

        let [padding] = reader.take("padding")?;
        let original_size = u32::from_le_bytes(reader.take("original size")?);

        if reader.remaining() > 0 {
            return Err(MetadataError::TrailingBytes(reader.remaining()).into());
        }
        if padding > 7 || (symbol_count == 0 && padding != 0) {
            return Err(MetadataError::InvalidPadding(padding).into());
        }

        let table = FrequencyTable::from_entries(entries).map_err(|e| match e {
            Error::Huffman(HuffmanError::DuplicateSymbol(symbol)) => {
                MetadataError::DuplicateSymbol(symbol).into()
            }
            other => other,
        })?;

        let counted = table.total();
        if counted != original_size as u64 {
            return Err(MetadataError::SizeMismatch {
                counted,
                original_size,
            }
            .into());
        }

        Ok(Self {
            table,
            padding,
            original_size,
        })
    }

    /// Read and parse a record from `reader`, consuming it to the end.
    ///
    /// # Errors
    /// `Error::InputRead` if the reader fails, otherwise as
    /// [`MetadataRecord::from_bytes`].
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(Error::InputRead)?;
        Self::from_bytes(&bytes)
    }
}

/// Fixed-width field reader over a record buffer.
struct FieldReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> FieldReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    fn take<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let end = self.position + N;
        let slice = self
            .bytes
            .get(self.position..end)
            .ok_or(MetadataError::Truncated {
                field,
                required: N,
                available: self.remaining(),
            })?;

        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        self.position = end;
        Ok(out)
    }
}
