use serde::{Deserialize, Serialize};

use crate::checks::{CheckKind, CheckResult};
use crate::runner::{RunReport, RunSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

const RULE_WIDTH: usize = 50;

pub fn print_banner() {
    println!("🔍 FOMO Connections Module Backend Testing");
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn print_section(index: usize, kind: CheckKind) {
    println!("\n{}. {}", index, kind.section());
}

/// One status line, plus diagnostic lines when the check failed
pub fn print_result(result: &CheckResult) {
    for line in result_lines(result) {
        println!("{}", line);
    }
}

pub fn result_lines(result: &CheckResult) -> Vec<String> {
    if result.success {
        return vec![format!("✅ {}", result.name)];
    }

    let mut lines = vec![format!("❌ {}", result.name)];
    if !result.details.is_empty() {
        lines.push(format!("   Details: {}", result.details));
    }
    if !result.expected.is_empty() && !result.actual.is_empty() {
        lines.push(format!("   Expected: {}", result.expected));
        lines.push(format!("   Actual: {}", result.actual));
    }
    lines
}

pub fn print_summary(summary: &RunSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!("\n{}", "=".repeat(RULE_WIDTH)),
        format!("📊 Test Results: {}/{} passed", summary.passed, summary.attempted),
    ];

    if summary.all_passed() {
        lines.push("🎉 All tests passed!".to_string());
        return lines;
    }

    lines.push("❌ Some tests failed!".to_string());
    if !summary.failed_critical.is_empty() {
        lines.push(format!(
            "\n🚨 Critical service failures: {}",
            summary.failed_critical.join(", ")
        ));
    }
    lines
}

pub fn render_json(report: &RunReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn print_json(report: &RunReport) -> anyhow::Result<()> {
    println!("{}", render_json(report)?);
    Ok(())
}
