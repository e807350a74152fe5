//! Code table derivation.
//!
//! Walking the tree from the root, a left edge appends `0` and a right edge
//! appends `1`; the path to each leaf is that symbol's code. A tree whose
//! root is a leaf (one distinct symbol) gets the one-bit code `0`.

use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanTree, Node, NodeId};

/// Longest code the bit packer can emit in a single write.
pub const MAX_CODE_LEN: usize = 64;

/// A prefix code: the low `len` bits of `bits`, most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `self` is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = other.len - self.len;
        shift == 64 || other.bits >> shift == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shift in (0..self.len).rev() {
            let bit = (self.bits >> shift) & 1;
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

/// Symbol to code mapping, indexed by byte value.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Derive the code of every leaf in `tree`.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if a leaf is deeper than
    /// [`MAX_CODE_LEN`].
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut codes = [None; 256];

        if let Node::Leaf { symbol, .. } = *tree.node(tree.root()) {
            codes[symbol as usize] = Some(Code { bits: 0, len: 1 });
            return Ok(Self { codes });
        }

        let mut stack: Vec<(NodeId, u64, usize)> = vec![(tree.root(), 0, 0)];
        while let Some((id, bits, len)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    codes[symbol as usize] = Some(Code {
                        bits,
                        len: len as u8,
                    });
                }
                Node::Internal { left, right, .. } => {
                    let depth = len + 1;
                    if depth > MAX_CODE_LEN {
                        return Err(HuffmanError::CodeLengthTooLong { length: depth }.into());
                    }
                    // Right first so the left subtree is visited first.
                    stack.push((right, (bits << 1) | 1, depth));
                    stack.push((left, bits << 1, depth));
                }
            }
        }

        Ok(Self { codes })
    }

    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|code| (symbol as u8, code)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Number of bits needed to encode `data`.
    ///
    /// # Errors
    /// `HuffmanError::MissingCode` if `data` contains an unknown symbol.
    pub fn encoded_bit_len(&self, data: &[u8]) -> Result<usize> {
        data.iter().try_fold(0usize, |total, &byte| {
            let code = self.get(byte).ok_or(HuffmanError::MissingCode(byte))?;
            Ok(total + code.len())
        })
    }
}
