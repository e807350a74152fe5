use std::process::ExitCode;

use clap::Parser;
use huffpack::config::{Command, Config};
use huffpack::demo::run_demo;
use huffpack::logging::setup_logging;
use huffpack::pipeline::{run_batch, Mode};
use tracing::error;

fn main() -> ExitCode {
    let config = Config::parse();
    setup_logging(config.json_logs);
    let report = !config.quiet;

    let ok = match &config.command {
        Command::Compress(args) => {
            let batch = run_batch(Mode::Compress, &args.files, report);
            if report {
                batch.print_summary();
            }
            batch.all_ok()
        }
        Command::Decompress(args) => {
            let batch = run_batch(Mode::Decompress, &args.files, report);
            if report {
                batch.print_summary();
            }
            batch.all_ok()
        }
        Command::Demo(args) => match run_demo(args, report) {
            Ok(_) => true,
            Err(e) => {
                error!("{e:#}");
                false
            }
        },
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
