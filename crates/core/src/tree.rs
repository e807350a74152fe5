//! Huffman tree construction.
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by
//! [`NodeId`]. Leaves occupy ids `0..N` in frequency-table order and every
//! merge appends its parent, so ids also record insertion order.
//!
//! # Merge order
//!
//! Each step removes the two candidates with the smallest `(weight, id)`
//! key: lowest weight first, and among equal weights the node inserted
//! first. The first one removed becomes the left child. The metadata
//! sidecar carries only the frequency table, so decode must reproduce this
//! exact order from the same table to get the same codes.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: u8, weight: u64 },
    Internal { left: NodeId, right: NodeId, weight: u64 },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match *self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A Huffman tree owned by a single encode or decode call.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for `table` using the merge order described in the
    /// module docs.
    ///
    /// A single-entry table produces a tree whose root is that leaf.
    ///
    /// # Errors
    /// `HuffmanError::EmptyFrequencyTable` if the table has no entries.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let leaf_count = table.len();
        if leaf_count == 0 {
            return Err(HuffmanError::EmptyFrequencyTable.into());
        }

        let mut nodes = Vec::with_capacity(2 * leaf_count - 1);
        let mut queue = BinaryHeap::with_capacity(leaf_count);

        for entry in table.entries() {
            let id = NodeId(nodes.len());
            let weight = entry.count as u64;
            nodes.push(Node::Leaf {
                symbol: entry.symbol,
                weight,
            });
            queue.push(Reverse((weight, id)));
        }

        while let Some(Reverse((left_weight, left))) = queue.pop() {
            let Some(Reverse((right_weight, right))) = queue.pop() else {
                // Last remaining candidate is the root.
                let tree = Self { nodes, root: left };
                trace!(
                    leaves = leaf_count,
                    nodes = tree.nodes.len(),
                    root_weight = left_weight,
                    "built huffman tree"
                );
                return Ok(tree);
            };

            let weight = left_weight + right_weight;
            let parent = NodeId(nodes.len());
            nodes.push(Node::Internal {
                left,
                right,
                weight,
            });
            queue.push(Reverse((weight, parent)));
        }

        // The queue starts non-empty and every merge pushes one node back.
        Err(HuffmanError::EmptyFrequencyTable.into())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Follow one bit from `id`: `false` goes left, `true` goes right.
    ///
    /// Returns `None` when `id` is a leaf.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match *self.node(id) {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.len().div_ceil(2)
    }

    /// Total weight, equal to the number of symbols the tree encodes.
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }
}
