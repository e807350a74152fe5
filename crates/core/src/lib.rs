//! huffpack-core: Huffman compression with a separate metadata sidecar
//!
//! Compressing a buffer produces two artifacts:
//! - the packed payload, a raw run of MSB-first code bits with no header
//! - a small [`MetadataRecord`] holding the frequency table, the padding
//!   of the last payload byte and the original size
//!
//! The decoder rebuilds the Huffman tree from the frequency table alone, so
//! tree construction is fully deterministic (see [`tree`]).
//!
//! # Architecture
//!
//! - `frequency`: symbol counting
//! - `tree`: arena-backed tree construction
//! - `code`: code table derivation
//! - `bitio`: bit packing and unpacking with padding accounting
//! - `metadata`: sidecar record format
//! - `decoder`: bit stream to symbol state machine
//! - `codec`: `compress` / `decompress` entry points
//! - `metrics`: size and timing statistics
//!
//! # Example
//! ```
//! let compressed = huffpack_core::compress(b"aaab").unwrap();
//! assert_eq!(compressed.packed.len(), 1);
//! assert_eq!(compressed.metadata.padding(), 4);
//!
//! let restored = huffpack_core::decompress(&compressed.packed, &compressed.metadata).unwrap();
//! assert_eq!(restored, b"aaab");
//! ```

pub mod bitio;
pub mod code;
pub mod codec;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod metadata;
pub mod metrics;
pub mod tree;

// Re-export commonly used types
pub use codec::{compress, decompress, decompress_with_sidecar, Compressed};
pub use error::{Error, Result};
pub use metadata::MetadataRecord;
