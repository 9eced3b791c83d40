use clap::Parser;
use connections_smoke::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so SMOKE_* overrides are picked up
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match connections_smoke::cli::run(cli).await {
        Ok(status) => std::process::exit(status.code()),
        Err(e) => {
            match std::env::var("CLI_VERBOSE").as_deref() {
                Ok("true") | Ok("1") => eprintln!("Error: {e:?}"),
                _ => eprintln!("Error: {e}"),
            }
            // Could not even start the run; treat as the highest severity
            std::process::exit(2);
        }
    }
}
