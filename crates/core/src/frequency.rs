//! Symbol frequency analysis.
//!
//! A [`FrequencyTable`] holds one [`FrequencyEntry`] per distinct byte in
//! first-seen order. [`FrequencyTable::sort_by_count`] reorders it by
//! ascending count with a stable sort, so equal counts keep their first-seen
//! order. The sorted order is what gets persisted and what the tree builder
//! consumes on both sides of a round trip.

use crate::error::{HuffmanError, Result};

/// One distinct byte and how many times it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub symbol: u8,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Count every byte of `data`.
    ///
    /// Entries appear in the order their symbol is first seen. An empty
    /// buffer yields an empty table.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u32; 256];
        let mut order = Vec::new();

        for &byte in data {
            let slot = &mut counts[byte as usize];
            if *slot == 0 {
                order.push(byte);
            }
            *slot += 1;
        }

        let entries = order
            .into_iter()
            .map(|symbol| FrequencyEntry {
                symbol,
                count: counts[symbol as usize],
            })
            .collect();

        Self { entries }
    }

    /// Build a table from explicit entries, keeping their order.
    ///
    /// # Errors
    /// - `HuffmanError::DuplicateSymbol` if a symbol repeats
    /// - `HuffmanError::ZeroCount` if an entry has a zero count
    pub fn from_entries(entries: Vec<FrequencyEntry>) -> Result<Self> {
        let mut seen = [false; 256];
        for entry in &entries {
            if entry.count == 0 {
                return Err(HuffmanError::ZeroCount(entry.symbol).into());
            }
            if std::mem::replace(&mut seen[entry.symbol as usize], true) {
                return Err(HuffmanError::DuplicateSymbol(entry.symbol).into());
            }
        }
        Ok(Self { entries })
    }

    /// Stable sort by ascending count.
    pub fn sort_by_count(&mut self) {
        self.entries.sort_by_key(|entry| entry.count);
    }

    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the analyzed buffer.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count as u64).sum()
    }

    /// Count for `symbol`, or 0 if it never occurs.
    pub fn count_of(&self, symbol: u8) -> u32 {
        self.entries
            .iter()
            .find(|entry| entry.symbol == symbol)
            .map_or(0, |entry| entry.count)
    }
}
