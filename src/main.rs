// src/main.rs

use eely::errors::EelyError;
use eely::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("eely error: {err:?}");
        std::process::exit(exit_code(&err));
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}

/// A failed renderer's own exit code, 1 for everything else.
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<EelyError>() {
        Some(EelyError::RenderError {
            code: Some(code), ..
        }) if *code != 0 => *code,
        _ => 1,
    }
}
