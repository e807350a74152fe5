//! Size and timing statistics for compress/decompress runs.
//!
//! [`Metrics`] describes one item; [`BatchMetrics`] totals a run over many
//! items, counting failures alongside successes.
//!
//! # Thread Safety
//!
//! Neither struct synchronizes. Parallel callers keep per-item metrics and
//! record them into one `BatchMetrics` at the end.

use std::time::{Duration, Instant};

use crate::codec::Compressed;

/// Statistics for one compressed or restored item.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// When work on the item started
    pub start_time: Instant,

    /// When work on the item ended (set on completion)
    pub end_time: Option<Instant>,

    /// Uncompressed size
    pub original_bytes: u64,

    /// Packed payload size
    pub packed_bytes: u64,

    /// Serialized metadata record size
    pub sidecar_bytes: u64,

    /// Distinct symbols in the frequency table
    pub distinct_symbols: u16,

    /// Unused low bits of the final packed byte
    pub padding_bits: u8,
}

impl Metrics {
    /// Start timing a new item.
    pub fn start() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            original_bytes: 0,
            packed_bytes: 0,
            sidecar_bytes: 0,
            distinct_symbols: 0,
            padding_bits: 0,
        }
    }

    /// Fill in sizes from a compression result.
    pub fn record_compressed(&mut self, compressed: &Compressed) {
        let metadata = &compressed.metadata;
        self.original_bytes = metadata.original_size() as u64;
        self.packed_bytes = compressed.packed.len() as u64;
        self.sidecar_bytes = metadata.encoded_len() as u64;
        self.distinct_symbols = metadata.symbol_count();
        self.padding_bits = metadata.padding();
    }

    /// Mark the item as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Packed payload size relative to the original (packed / original).
    ///
    /// Returns 0.0 for an empty original.
    pub fn packed_ratio(&self) -> f64 {
        ratio(self.packed_bytes, self.original_bytes)
    }

    /// Payload plus sidecar relative to the original.
    pub fn total_ratio(&self) -> f64 {
        ratio(self.stored_bytes(), self.original_bytes)
    }

    /// Bytes that must be kept to restore the item.
    pub fn stored_bytes(&self) -> u64 {
        self.packed_bytes + self.sidecar_bytes
    }

    /// Original bytes processed per second.
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.duration().as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.original_bytes as f64 / secs
        }
    }

    /// Print the compression report for this item.
    pub fn print_compression(&self) {
        println!(
            "      Original:    {} bytes ({:.2} KB)",
            self.original_bytes,
            kib(self.original_bytes)
        );
        println!(
            "      Packed:      {} bytes ({:.2} KB) - {:.1}%",
            self.packed_bytes,
            kib(self.packed_bytes),
            self.packed_ratio() * 100.0
        );
        println!(
            "      +Sidecar:    {} bytes ({:.2} KB)",
            self.sidecar_bytes,
            kib(self.sidecar_bytes)
        );
        println!(
            "      Total:       {} bytes ({:.2} KB) - {:.1}%",
            self.stored_bytes(),
            kib(self.stored_bytes()),
            self.total_ratio() * 100.0
        );
        println!(
            "      Symbols: {}, padding bits: {}, {} ms ({:.2} MB/s)",
            self.distinct_symbols,
            self.padding_bits,
            self.duration().as_millis(),
            self.throughput_bps() / (1024.0 * 1024.0)
        );
    }

    /// Print the restoration report for this item.
    pub fn print_restoration(&self) {
        println!(
            "      Restored:    {} bytes ({:.2} KB)",
            self.original_bytes,
            kib(self.original_bytes)
        );
        println!(
            "      Ratio:       {:.1}% (expansion)",
            ratio(self.original_bytes, self.stored_bytes()) * 100.0
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::start()
    }
}

/// Totals across a batch of items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchMetrics {
    pub items_ok: u64,
    pub items_failed: u64,
    pub original_bytes: u64,
    pub stored_bytes: u64,
}

impl BatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, item: &Metrics) {
        self.items_ok += 1;
        self.original_bytes += item.original_bytes;
        self.stored_bytes += item.stored_bytes();
    }

    pub fn record_failure(&mut self) {
        self.items_failed += 1;
    }

    pub fn all_ok(&self) -> bool {
        self.items_failed == 0
    }

    pub fn print_summary(&self) {
        println!("\n=== Summary ===");
        println!("Items processed: {}", self.items_ok);
        println!("Items failed:    {}", self.items_failed);
        println!(
            "Original: {} bytes, stored: {} bytes ({:.1}%)",
            self.original_bytes,
            self.stored_bytes,
            ratio(self.stored_bytes, self.original_bytes) * 100.0
        );
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compress;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::start();
        assert!(metrics.end_time.is_none());
        assert_eq!(metrics.packed_ratio(), 0.0);
    }

    #[test]
    fn test_record_compressed() {
        let compressed = compress(b"aaab").unwrap();
        let mut metrics = Metrics::start();
        metrics.record_compressed(&compressed);
        metrics.complete();

        assert_eq!(metrics.original_bytes, 4);
        assert_eq!(metrics.packed_bytes, 1);
        assert_eq!(metrics.sidecar_bytes, 17);
        assert_eq!(metrics.distinct_symbols, 2);
        assert_eq!(metrics.padding_bits, 4);
        assert_eq!(metrics.packed_ratio(), 0.25);
        assert_eq!(metrics.total_ratio(), 4.5);
        assert!(metrics.end_time.is_some());
    }

    #[test]
    fn test_batch_totals() {
        let mut item = Metrics::start();
        item.original_bytes = 1000;
        item.packed_bytes = 600;
        item.sidecar_bytes = 100;

        let mut batch = BatchMetrics::new();
        batch.record_success(&item);
        batch.record_failure();
        assert!(!batch.all_ok());

        batch.record_success(&item);

        assert_eq!(batch.items_ok, 2);
        assert_eq!(batch.items_failed, 1);
        assert_eq!(batch.original_bytes, 2000);
        assert_eq!(batch.stored_bytes, 1400);
    }

    #[test]
    fn test_throughput() {
        let mut metrics = Metrics::start();
        metrics.original_bytes = 4096;
        metrics.end_time = Some(metrics.start_time + Duration::from_millis(500));
        assert_eq!(metrics.throughput_bps(), 8192.0);

        metrics.end_time = Some(metrics.start_time);
        assert_eq!(metrics.throughput_bps(), 0.0);
    }
}
