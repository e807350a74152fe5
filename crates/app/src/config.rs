//! Command-line configuration for the huffpack tool.
//!
//! Every subcommand works on an explicit list of files; there is no
//! directory walking. `demo` needs no files at all and uses seeded sample
//! data, printing the seed so a run can be reproduced.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default demo payload size (64 KiB)
pub const DEFAULT_DEMO_BYTES: usize = 65536;

#[derive(Debug, Parser)]
#[command(name = "huffpack", version, about = "Huffman compression with a frequency-table sidecar")]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON instead of human-readable text
    #[arg(long, global = true, env = "HUFFPACK_JSON_LOGS")]
    pub json_logs: bool,

    /// Don't print size reports
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress each file to `<file>.huf` plus a `<file>.freq` sidecar
    Compress(FileArgs),

    /// Restore each `.huf` file to `<file>.restored`
    Decompress(FileArgs),

    /// Round-trip generated sample data in memory
    Demo(DemoArgs),
}

#[derive(Debug, Args)]
pub struct FileArgs {
    /// Files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Random seed for the sample data (default: time-based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size of the sample data in bytes
    #[arg(long, default_value_t = DEFAULT_DEMO_BYTES)]
    pub size: usize,
}

impl DemoArgs {
    /// The explicit seed, or one derived from the clock.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |t| t.as_millis() as u64)
        })
    }
}
