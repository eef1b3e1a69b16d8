// src/bin/eb-save-artifact.rs

use clap::Parser;
use eb::cli::SaveArtifactArgs;
use eb::env::snapshot_process_env;
use eb::{logging, run_save_artifact};

fn main() {
    if let Err(err) = run_main() {
        eprintln!("eb-save-artifact error: {err}");
        std::process::exit(1);
    }
}

fn run_main() -> anyhow::Result<()> {
    let args = SaveArtifactArgs::parse();
    let process_env = snapshot_process_env();
    logging::init_logging(args.log_level, &process_env)?;
    run_save_artifact(args, process_env)?;
    Ok(())
}
