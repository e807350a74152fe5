//! Packed bit stream decoding.
//!
//! The decoder is a two-state machine over the rebuilt tree. In `AtRoot`
//! no code is in progress. Each bit moves to a child node. Reaching a leaf
//! emits its symbol and returns to `AtRoot`; reaching an internal node
//! leaves the machine `Descending`.
//!
//! A stream is accepted only if it yields exactly `original_size` symbols
//! and every data bit before the padding is consumed by a complete code.

use crate::bitio::BitReader;
use crate::error::{CorruptionError, Result};
use crate::tree::{HuffmanTree, Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AtRoot,
    Descending(NodeId),
}

/// Decode `original_size` symbols from `packed` using `tree`.
///
/// # Errors
/// - `CorruptionError::PaddingExceedsStream` if `padding` is larger than
///   the packed buffer
/// - `CorruptionError::EndedOffLeaf` if the data bits stop mid-code
/// - `CorruptionError::Exhausted` if the data bits stop before
///   `original_size` symbols
/// - `CorruptionError::InvalidCode` if a one-symbol stream holds a `1` bit
/// - `CorruptionError::TrailingBits` if data bits remain afterwards
pub fn decode(
    packed: &[u8],
    tree: &HuffmanTree,
    padding: u8,
    original_size: usize,
) -> Result<Vec<u8>> {
    let mut reader = BitReader::with_padding(packed, padding)?;
    let mut output = Vec::with_capacity(original_size);

    // A lone leaf has no edges; its code is the single bit `0`.
    if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
        while output.len() < original_size {
            match reader.read_bit() {
                Some(false) => output.push(symbol),
                Some(true) => {
                    return Err(CorruptionError::InvalidCode {
                        position: reader.position() - 1,
                    }
                    .into())
                }
                None => return Err(exhausted(output.len(), original_size)),
            }
        }
        return finish(reader, output);
    }

    let mut state = State::AtRoot;
    while output.len() < original_size {
        let from = match state {
            State::AtRoot => tree.root(),
            State::Descending(id) => id,
        };

        let Some(bit) = reader.read_bit() else {
            return Err(match state {
                State::AtRoot => exhausted(output.len(), original_size),
                State::Descending(_) => CorruptionError::EndedOffLeaf {
                    position: reader.position(),
                }
                .into(),
            });
        };

        // `from` is never a leaf: the root is internal here and the
        // machine leaves `Descending` as soon as it lands on a leaf.
        let Some(next) = tree.child(from, bit) else {
            return Err(CorruptionError::EndedOffLeaf {
                position: reader.position(),
            }
            .into());
        };

        state = match *tree.node(next) {
            Node::Leaf { symbol, .. } => {
                output.push(symbol);
                State::AtRoot
            }
            Node::Internal { .. } => State::Descending(next),
        };
    }

    finish(reader, output)
}

fn exhausted(decoded: usize, expected: usize) -> crate::error::Error {
    CorruptionError::Exhausted { decoded, expected }.into()
}

fn finish(reader: BitReader<'_>, output: Vec<u8>) -> Result<Vec<u8>> {
    if !reader.is_empty() {
        return Err(CorruptionError::TrailingBits {
            remaining: reader.bits_remaining(),
            expected: output.len(),
        }
        .into());
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frequency::{FrequencyEntry, FrequencyTable};

    fn tree(entries: &[(u8, u32)]) -> HuffmanTree {
        let table = FrequencyTable::from_entries(
            entries
                .iter()
                .map(|&(symbol, count)| FrequencyEntry { symbol, count })
                .collect(),
        )
        .unwrap();
        HuffmanTree::build(&table).unwrap()
    }

    #[test]
    fn test_two_symbols() {
        // b = 0, a = 1; "aaab" -> 1110 + 4 padding bits
        let t = tree(&[(b'b', 1), (b'a', 3)]);
        let out = decode(&[0b1110_0000], &t, 4, 4).unwrap();
        assert_eq!(out, b"aaab");
    }

    #[test]
    fn test_single_symbol() {
        let t = tree(&[(b'z', 10)]);
        let out = decode(&[0, 0], &t, 6, 10).unwrap();
        assert_eq!(out, vec![b'z'; 10]);
    }

    #[test]
    fn test_exhausted() {
        let t = tree(&[(b'b', 1), (b'a', 3)]);
        let err = decode(&[0b1110_0000], &t, 4, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::StreamCorruption(CorruptionError::Exhausted { decoded: 4, expected: 5 })
        ));
    }

    #[test]
    fn test_single_symbol_exhausted() {
        let t = tree(&[(b'z', 10)]);
        let err = decode(&[0], &t, 0, 10).unwrap_err();
        assert!(matches!(
            err,
            Error::StreamCorruption(CorruptionError::Exhausted { decoded: 8, expected: 10 })
        ));
    }

    #[test]
    fn test_single_symbol_rejects_one_bits() {
        let t = tree(&[(b'z', 4)]);
        let err = decode(&[0b0010_0000], &t, 4, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::StreamCorruption(CorruptionError::InvalidCode { position: 2 })
        ));
    }

    #[test]
    fn test_ends_off_leaf() {
        // a = 0, b = 10, c = 11; stream "0 1" stops inside b/c
        let t = tree(&[(b'a', 2), (b'b', 1), (b'c', 1)]);
        let err = decode(&[0b0100_0000], &t, 6, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::StreamCorruption(CorruptionError::EndedOffLeaf { position: 2 })
        ));
    }

    #[test]
    fn test_trailing_bits() {
        let t = tree(&[(b'b', 1), (b'a', 3)]);
        let err = decode(&[0b1110_0000], &t, 0, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::StreamCorruption(CorruptionError::TrailingBits { remaining: 4, expected: 4 })
        ));
    }

    #[test]
    fn test_padding_exceeds_stream() {
        let t = tree(&[(b'b', 1), (b'a', 3)]);
        let err = decode(&[], &t, 3, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::StreamCorruption(CorruptionError::PaddingExceedsStream { .. })
        ));
    }
}
