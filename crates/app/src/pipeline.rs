//! Per-file compress and decompress jobs.
//!
//! Each job handles one file end to end and returns its [`Metrics`]. A
//! failure aborts only that file; [`run_batch`] logs it, counts it and moves
//! on to the next one.

use std::path::{Path, PathBuf};

use anyhow::Context;
use huffpack_core::error::MetadataError;
use huffpack_core::metrics::{BatchMetrics, Metrics};
use huffpack_core::{compress, decompress, Error};
use tracing::{error, info, instrument};

use crate::storage;

/// Paths produced by a successful compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOutput {
    pub packed: PathBuf,
    pub sidecar: PathBuf,
}

/// Compress `source` into `<source>.huf` and `<source>.freq`.
///
/// The payload is only written after the sidecar has been persisted, so a
/// sidecar write failure never leaves an undecodable payload behind.
#[instrument(skip_all, fields(source = %source.display()))]
pub fn compress_file(source: &Path) -> anyhow::Result<(CompressOutput, Metrics)> {
    let mut metrics = Metrics::start();

    let data = storage::read_bytes(source)
        .with_context(|| format!("reading {}", source.display()))?;
    let compressed =
        compress(&data).with_context(|| format!("compressing {}", source.display()))?;

    let output = CompressOutput {
        packed: storage::packed_path(source),
        sidecar: storage::sidecar_path(source),
    };
    storage::write_sidecar(&output.sidecar, &compressed.metadata)
        .with_context(|| format!("writing {}", output.sidecar.display()))?;
    storage::write_bytes(&output.packed, &compressed.packed)
        .with_context(|| format!("writing {}", output.packed.display()))?;

    metrics.record_compressed(&compressed);
    metrics.complete();
    info!(
        original = metrics.original_bytes,
        stored = metrics.stored_bytes(),
        "compressed"
    );
    Ok((output, metrics))
}

/// Restore `packed` into `<packed>.restored` using its sidecar.
#[instrument(skip_all, fields(packed = %packed.display()))]
pub fn decompress_file(packed: &Path) -> anyhow::Result<(PathBuf, Metrics)> {
    let mut metrics = Metrics::start();

    let sidecar = storage::find_sidecar(packed)
        .ok_or(Error::Metadata(MetadataError::Missing))
        .with_context(|| format!("no sidecar found for {}", packed.display()))?;
    let record = storage::read_sidecar(&sidecar)
        .with_context(|| format!("reading {}", sidecar.display()))?;
    let payload = storage::read_bytes(packed)
        .with_context(|| format!("reading {}", packed.display()))?;
    let restored =
        decompress(&payload, &record).with_context(|| format!("decoding {}", packed.display()))?;

    let destination = storage::restored_path(packed);
    storage::write_bytes(&destination, &restored)
        .with_context(|| format!("writing {}", destination.display()))?;

    metrics.original_bytes = restored.len() as u64;
    metrics.packed_bytes = payload.len() as u64;
    metrics.sidecar_bytes = record.encoded_len() as u64;
    metrics.distinct_symbols = record.symbol_count();
    metrics.padding_bits = record.padding();
    metrics.complete();
    info!(
        sidecar = %sidecar.display(),
        restored = metrics.original_bytes,
        "decompressed"
    );
    Ok((destination, metrics))
}

/// Which direction a batch runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

/// Run `mode` over every file, continuing past failures.
pub fn run_batch(mode: Mode, files: &[PathBuf], report: bool) -> BatchMetrics {
    let mut batch = BatchMetrics::new();

    for file in files {
        if report {
            println!("\n[+] {}", file.display());
        }

        let result = match mode {
            Mode::Compress => compress_file(file).map(|(output, metrics)| {
                if report {
                    println!("   Packed  -> {}", output.packed.display());
                    metrics.print_compression();
                }
                metrics
            }),
            Mode::Decompress => decompress_file(file).map(|(destination, metrics)| {
                if report {
                    println!("   Restored -> {}", destination.display());
                    metrics.print_restoration();
                }
                metrics
            }),
        };

        match result {
            Ok(metrics) => batch.record_success(&metrics),
            Err(e) => {
                error!(file = %file.display(), "{e:#}");
                batch.record_failure();
            }
        }
    }

    batch
}
