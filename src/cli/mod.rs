use clap::Parser;

use crate::config::SmokeConfig;
use crate::runner::{ExitStatus, TestRunner};

pub use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "connections-smoke")]
#[command(about = "Smoke-test the Connections gateway, backend, scraper and stats endpoints")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Output in human-readable text format (wins over --json)")]
    pub text: bool,

    #[arg(long, help = "Output the final report in JSON format")]
    pub json: bool,

    #[arg(long, short, help = "Only print the summary")]
    pub quiet: bool,

    #[arg(long, help = "Gateway base URL (overrides SMOKE_GATEWAY_URL)")]
    pub gateway_url: Option<String>,

    #[arg(long, help = "Backend base URL (overrides SMOKE_BACKEND_URL)")]
    pub backend_url: Option<String>,

    #[arg(long, help = "Scraper base URL (overrides SMOKE_SCRAPER_URL)")]
    pub scraper_url: Option<String>,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl Cli {
    /// Layer command-line overrides on top of the environment-derived config
    pub fn apply(&self, mut config: SmokeConfig) -> SmokeConfig {
        if let Some(url) = &self.gateway_url {
            config.endpoints.gateway_url = url.clone();
        }
        if let Some(url) = &self.backend_url {
            config.endpoints.backend_url = url.clone();
        }
        if let Some(url) = &self.scraper_url {
            config.endpoints.scraper_url = url.clone();
        }
        config
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitStatus> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = cli.apply(crate::config::config().clone());

    let mut runner = TestRunner::new(config)?
        .format(output_format)
        .quiet(cli.quiet);
    let report = runner.run_all().await;

    if output_format == OutputFormat::Json {
        crate::report::print_json(&report)?;
    }

    Ok(report.status)
}
