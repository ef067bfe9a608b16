#![forbid(unsafe_code)]

//! afterglow binary entry point.

use std::path::Path;

use afterglow::{cli, logging, runner};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = logging::init(opts.log_file.as_deref().map(Path::new)) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = runner::run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
