//! CLI entry point for texture resynthesis

use clap::Parser;
use resynth::io::cli::{Cli, FileProcessor};
use resynth::io::logging::init_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let mut processor = FileProcessor::new(cli);
    let summary = processor.process();

    if summary.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
