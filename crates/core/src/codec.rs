//! Compress and decompress entry points.
//!
//! [`compress`] turns a buffer into packed bytes plus the
//! [`MetadataRecord`] needed to reverse it. [`decompress`] takes both back.
//! The record travels as an explicit value between the two calls; where it
//! is stored in between is up to the caller.

use std::io::Write;

use tracing::debug;

use crate::bitio::BitWriter;
use crate::code::CodeTable;
use crate::decoder;
use crate::error::{CorruptionError, Error, HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::metadata::MetadataRecord;
use crate::tree::HuffmanTree;

/// Output of [`compress`]: the payload and its sidecar record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    pub packed: Vec<u8>,
    pub metadata: MetadataRecord,
}

impl Compressed {
    /// Persist the sidecar record.
    ///
    /// # Errors
    /// `Error::MetadataWrite` if the writer fails.
    pub fn write_sidecar<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.metadata.write_to(writer)
    }
}

/// Compress `data`.
///
/// An empty buffer short-circuits to empty packed output and the empty
/// record (no symbols, no padding, size 0).
///
/// # Errors
/// `Error::InputTooLarge` if `data` cannot be described by the 32-bit
/// fields of the metadata record.
pub fn compress(data: &[u8]) -> Result<Compressed> {
    if u32::try_from(data.len()).is_err() {
        return Err(Error::InputTooLarge { len: data.len() });
    }

    let mut table = FrequencyTable::from_bytes(data);
    if table.is_empty() {
        debug!("empty input, nothing to pack");
        return Ok(Compressed {
            packed: Vec::new(),
            metadata: MetadataRecord::empty(),
        });
    }
    table.sort_by_count();

    let tree = HuffmanTree::build(&table)?;
    let codes = CodeTable::from_tree(&tree)?;

    let total_bits = codes.encoded_bit_len(data)?;
    let mut writer = BitWriter::with_capacity(total_bits.div_ceil(8));
    for &byte in data {
        let code = codes.get(byte).ok_or(HuffmanError::MissingCode(byte))?;
        writer.write_bits(code.bits, code.len())?;
    }
    let packed = writer.finish();

    debug!(
        input_len = data.len(),
        symbols = table.len(),
        packed_len = packed.bytes.len(),
        padding = packed.padding,
        "compressed buffer"
    );

    let metadata = MetadataRecord::new(table, packed.padding, data.len())?;
    Ok(Compressed {
        packed: packed.bytes,
        metadata,
    })
}

/// Restore the buffer that produced `packed` and `metadata`.
///
/// The tree is rebuilt from the record's frequency table with the same
/// merge order [`compress`] used.
///
/// # Errors
/// `Error::StreamCorruption` if the packed bits do not decode to exactly
/// `metadata.original_size()` symbols.
pub fn decompress(packed: &[u8], metadata: &MetadataRecord) -> Result<Vec<u8>> {
    if metadata.table().is_empty() {
        if !packed.is_empty() {
            return Err(CorruptionError::UnexpectedPayload { len: packed.len() }.into());
        }
        debug!("empty record, nothing to unpack");
        return Ok(Vec::new());
    }

    let tree = HuffmanTree::build(metadata.table())?;
    let original_size = metadata.original_size() as usize;
    let output = decoder::decode(packed, &tree, metadata.padding(), original_size)?;

    debug!(
        packed_len = packed.len(),
        symbols = metadata.symbol_count(),
        output_len = output.len(),
        "decompressed buffer"
    );
    Ok(output)
}

/// Parse a serialized sidecar and decompress `packed` with it.
///
/// # Errors
/// As [`MetadataRecord::from_bytes`] and [`decompress`].
pub fn decompress_with_sidecar(packed: &[u8], sidecar: &[u8]) -> Result<Vec<u8>> {
    let metadata = MetadataRecord::from_bytes(sidecar)?;
    decompress(packed, &metadata)
}
