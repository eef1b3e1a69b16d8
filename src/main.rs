// src/main.rs

use eb::env::snapshot_process_env;
use eb::{cli, logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("eb error: {err}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    let process_env = snapshot_process_env();
    logging::init_logging(args.log_level, &process_env)?;
    run(args, process_env).await?;
    Ok(())
}
