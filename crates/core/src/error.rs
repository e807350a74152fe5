//! Error types for the huffpack codec.
//!
//! Every codec operation returns a structured error instead of panicking.
//! The caller decides whether a failure skips one item or aborts a batch;
//! the codec itself never retries and never hands back partial output.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// The variants follow the failure domains of one compress/decompress
/// round trip:
/// - reading the source buffer
/// - parsing the metadata sidecar
/// - persisting the metadata sidecar
/// - walking the packed bit stream
/// - writing the packed or restored output
#[derive(Debug, Error)]
pub enum Error {
    /// The source buffer could not be read. Aborts that item only.
    #[error("failed to read input: {0}")]
    InputRead(#[source] std::io::Error),

    /// The metadata sidecar is missing, truncated or malformed.
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Encoding succeeded but the metadata sidecar could not be persisted.
    #[error("failed to write metadata: {0}")]
    MetadataWrite(#[source] std::io::Error),

    /// The packed payload or restored output could not be written.
    #[error("failed to write output: {0}")]
    OutputWrite(#[source] std::io::Error),

    /// The packed stream does not decode to the size the metadata promises.
    #[error("stream corruption: {0}")]
    StreamCorruption(#[from] CorruptionError),

    /// Bit I/O operation failed (e.g., too many bits in one write)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Tree or code table construction failed
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// The input does not fit the 32-bit size field of the metadata record
    #[error("input of {len} bytes exceeds the 4 GiB limit of the metadata record")]
    InputTooLarge { len: usize },
}

impl Error {
    /// True when decoding could not start because the sidecar was absent
    /// or cut short.
    pub fn is_metadata_missing_or_truncated(&self) -> bool {
        matches!(self, Error::Metadata(e) if e.is_missing_or_truncated())
    }
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Huffman tree and code table errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// No symbols with non-zero frequency (cannot build a tree)
    #[error("empty frequency table: cannot build tree")]
    EmptyFrequencyTable,

    /// A symbol appears twice in the frequency table
    #[error("symbol {0:#04x} appears more than once in the frequency table")]
    DuplicateSymbol(u8),

    /// A symbol was given a zero count
    #[error("symbol {0:#04x} has a zero count")]
    ZeroCount(u8),

    /// Code length exceeds what the bit packer can emit in one write
    #[error("code length {length} exceeds maximum 64")]
    CodeLengthTooLong { length: usize },

    /// The input contains a byte that has no code in the table
    #[error("symbol {0:#04x} has no code in the table")]
    MissingCode(u8),
}

/// Metadata sidecar parse errors.
///
/// `Missing` and `Truncated` form the "missing or truncated" category: the
/// record ended before the layout it declares was complete. The remaining
/// variants describe a complete record whose contents cannot be valid.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// No bytes at all where a record was expected
    #[error("metadata record is missing")]
    Missing,

    /// The record ended before a declared field
    #[error("metadata truncated while reading {field}: need {required} bytes, got {available}")]
    Truncated {
        field: &'static str,
        required: usize,
        available: usize,
    },

    /// symbolCount exceeds the 256 possible byte values
    #[error("symbol count {0} exceeds 256")]
    TooManySymbols(u16),

    /// The same symbol has two entries
    #[error("symbol {0:#04x} listed more than once")]
    DuplicateSymbol(u8),

    /// A count is zero or negative
    #[error("symbol {symbol:#04x} has non-positive count {count}")]
    InvalidCount { symbol: u8, count: i32 },

    /// Padding is outside 0..=7
    #[error("padding {0} is outside 0..=7")]
    InvalidPadding(u8),

    /// The counts do not add up to originalSize
    #[error("frequency counts sum to {counted} but original size is {original_size}")]
    SizeMismatch { counted: u64, original_size: u32 },

    /// Bytes remain after originalSize
    #[error("{0} unexpected trailing bytes after metadata record")]
    TrailingBytes(usize),
}

impl MetadataError {
    /// True for the short-read failures (missing header or missing entries).
    pub fn is_missing_or_truncated(&self) -> bool {
        matches!(self, MetadataError::Missing | MetadataError::Truncated { .. })
    }
}

/// Packed stream corruption detected while decoding.
#[derive(Debug, Error)]
pub enum CorruptionError {
    /// The usable bits ran out before all symbols were emitted
    #[error("bit stream exhausted after {decoded} of {expected} symbols")]
    Exhausted { decoded: usize, expected: usize },

    /// The usable bits ended partway down the tree
    #[error("bit stream ended mid-code at bit {position}")]
    EndedOffLeaf { position: usize },

    /// A bit sequence that is not any symbol's code
    #[error("invalid code at bit position {position}")]
    InvalidCode { position: usize },

    /// The padding claims more bits than the packed buffer holds
    #[error("padding of {padding} bits exceeds packed length of {total_bits} bits")]
    PaddingExceedsStream { padding: u8, total_bits: usize },

    /// Data bits remain after all symbols were emitted
    #[error("{remaining} unused data bits after {expected} symbols")]
    TrailingBits { remaining: usize, expected: usize },

    /// Packed data was supplied for an empty original
    #[error("{len} packed bytes supplied for an empty original")]
    UnexpectedPayload { len: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
