mod common;

use anyhow::Result;
use clap::Parser;

use connections_smoke::cli::{self, Cli};
use connections_smoke::report;
use connections_smoke::runner::{ExitStatus, TestRunner};

#[tokio::test]
async fn json_run_reports_critical_backend_failure() -> Result<()> {
    let gateway = common::spawn(common::healthy_gateway(10)).await?;
    let scraper = common::spawn(common::healthy_scraper()).await?;
    let backend = common::dead_url()?;

    let cli = Cli::parse_from([
        "connections-smoke",
        "--json",
        "--gateway-url",
        gateway.base_url.as_str(),
        "--backend-url",
        backend.as_str(),
        "--scraper-url",
        scraper.base_url.as_str(),
    ]);

    let status = cli::run(cli).await?;
    assert_eq!(status, ExitStatus::Critical);
    assert_eq!(status.code(), 2);
    Ok(())
}

#[tokio::test]
async fn quiet_text_run_with_short_listing_degrades() -> Result<()> {
    let gateway = common::spawn(common::healthy_gateway(2)).await?;
    let backend = common::spawn(common::healthy_backend()).await?;
    let scraper = common::spawn(common::healthy_scraper()).await?;

    let cli = Cli::parse_from([
        "connections-smoke",
        "--quiet",
        "--gateway-url",
        gateway.base_url.as_str(),
        "--backend-url",
        backend.base_url.as_str(),
        "--scraper-url",
        scraper.base_url.as_str(),
    ]);
    assert!(cli.quiet);

    let status = cli::run(cli).await?;
    assert_eq!(status, ExitStatus::Degraded);
    Ok(())
}

#[tokio::test]
async fn json_report_is_a_single_document() -> Result<()> {
    let gateway = common::spawn(common::healthy_gateway(10)).await?;
    let backend = common::spawn(common::healthy_backend()).await?;
    let scraper = common::spawn(common::healthy_scraper()).await?;
    let config = common::config_for(&gateway.base_url, &backend.base_url, &scraper.base_url);

    let mut runner = TestRunner::new(config)?.format(cli::OutputFormat::Json);
    assert!(!runner.prints_check_lines());
    assert!(!runner.prints_summary());
    let run = runner.run_all().await;

    let rendered = report::render_json(&run)?;
    let parsed: serde_json::Value = serde_json::from_str(&rendered)?;
    assert_eq!(parsed["exit_code"], 0);
    assert_eq!(parsed["status"], "clean");
    assert_eq!(parsed["summary"]["passed"], 6);
    assert_eq!(parsed["results"].as_array().map(Vec::len), Some(6));
    Ok(())
}
