// src/bin/undodb.rs

use clap::Parser;
use eb::cli::UndoDbArgs;
use eb::env::snapshot_process_env;
use eb::{logging, run_undodb};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run_main().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("undodb error: {err}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<i32> {
    let args = UndoDbArgs::parse();
    let process_env = snapshot_process_env();
    logging::init_logging(args.log_level, &process_env)?;
    let cwd = std::env::current_dir()?;
    Ok(run_undodb(args, &cwd, process_env).await?)
}
