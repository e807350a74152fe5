//! In-memory round trip over generated sample data.

use anyhow::ensure;
use huffpack_core::metrics::Metrics;
use huffpack_core::{compress, decompress_with_sidecar};
use tracing::info;

use crate::config::DemoArgs;
use crate::sample::generate_sample_data;

/// Compress sample data, serialize its sidecar, restore from both and
/// verify the result matches.
pub fn run_demo(args: &DemoArgs, report: bool) -> anyhow::Result<Metrics> {
    let seed = args.resolve_seed();
    info!(seed, size = args.size, "generating sample data");
    let data = generate_sample_data(seed, args.size);

    let mut metrics = Metrics::start();
    let compressed = compress(&data)?;

    let mut sidecar = Vec::with_capacity(compressed.metadata.encoded_len());
    compressed.write_sidecar(&mut sidecar)?;
    let restored = decompress_with_sidecar(&compressed.packed, &sidecar)?;

    metrics.record_compressed(&compressed);
    metrics.complete();

    ensure!(
        restored == data,
        "round trip mismatch: {} bytes in, {} bytes out",
        data.len(),
        restored.len()
    );

    if report {
        println!("=== Demo (seed {seed}) ===");
        metrics.print_compression();
        println!("Verification: PASSED");
    }
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_round_trip() {
        let args = DemoArgs {
            seed: Some(7),
            size: 20_000,
        };
        let metrics = run_demo(&args, false).unwrap();
        assert_eq!(metrics.original_bytes, 20_000);
        assert!(metrics.distinct_symbols > 0);
    }

    #[test]
    fn test_demo_empty() {
        let args = DemoArgs {
            seed: Some(7),
            size: 0,
        };
        let metrics = run_demo(&args, false).unwrap();
        assert_eq!(metrics.stored_bytes(), 7);
    }
}
