//! Sequential runner: executes each check once, in order, and folds the
//! results into a summary and an exit status.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::checks::{CheckKind, CheckResult};
use crate::client::Probe;
use crate::config::SmokeConfig;
use crate::report::{self, OutputFormat};

/// Process exit status, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitStatus {
    Clean,
    Degraded,
    Critical,
}

impl ExitStatus {
    pub fn code(&self) -> i32 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::Degraded => 1,
            ExitStatus::Critical => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub attempted: usize,
    pub passed: usize,
    /// Names of failed critical checks, in execution order
    pub failed_critical: Vec<String>,
}

impl RunSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        results.iter().fold(RunSummary::default(), |mut summary, result| {
            summary.attempted += 1;
            if result.success {
                summary.passed += 1;
            } else if result.critical {
                summary.failed_critical.push(result.name.clone());
            }
            summary
        })
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.attempted
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.all_passed() {
            ExitStatus::Clean
        } else if !self.failed_critical.is_empty() {
            ExitStatus::Critical
        } else {
            ExitStatus::Degraded
        }
    }
}

/// Everything a finished run produced, serializable for `--json`
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<CheckResult>,
    pub summary: RunSummary,
    pub status: ExitStatus,
    pub exit_code: i32,
}

pub struct TestRunner {
    probe: Probe,
    config: SmokeConfig,
    results: Vec<CheckResult>,
    format: OutputFormat,
    quiet: bool,
}

impl TestRunner {
    pub fn new(config: SmokeConfig) -> anyhow::Result<Self> {
        Ok(Self {
            probe: Probe::new()?,
            config,
            results: Vec::new(),
            format: OutputFormat::Text,
            quiet: false,
        })
    }

    /// JSON output keeps stdout free of the text report
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Suppress per-check lines; the summary is still printed
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Banner, section headers and per-check lines
    pub fn prints_check_lines(&self) -> bool {
        self.format == OutputFormat::Text && !self.quiet
    }

    pub fn prints_summary(&self) -> bool {
        self.format == OutputFormat::Text
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }

    /// Run one check, record exactly one result for it, and report pass/fail.
    pub async fn run_check(&mut self, kind: CheckKind) -> bool {
        let started = Instant::now();
        let outcome = kind.execute(&self.probe, &self.config).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let result = CheckResult::from_outcome(kind, &outcome, duration_ms);
        if let Err(e) = &outcome {
            tracing::warn!(check = kind.name(), code = e.error_code(), "check failed: {}", e);
        }
        if self.prints_check_lines() {
            report::print_result(&result);
        }

        let success = result.success;
        self.results.push(result);
        success
    }

    /// Run every check in order and print the summary.
    pub async fn run_all(&mut self) -> RunReport {
        let started_at = Utc::now();
        tracing::info!(checks = CheckKind::ALL.len(), "starting smoke run");

        if self.prints_check_lines() {
            report::print_banner();
        }
        for (index, kind) in CheckKind::ALL.iter().enumerate() {
            if self.prints_check_lines() {
                report::print_section(index + 1, *kind);
            }
            self.run_check(*kind).await;
        }

        let summary = self.summary();
        if self.prints_summary() {
            report::print_summary(&summary);
        }

        let status = summary.exit_status();
        tracing::info!(passed = summary.passed, attempted = summary.attempted, ?status, "smoke run finished");

        RunReport {
            started_at,
            finished_at: Utc::now(),
            results: self.results.clone(),
            summary,
            status,
            exit_code: status.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckError;

    fn pass(kind: CheckKind) -> CheckResult {
        CheckResult::passed(kind, "ok", 1)
    }

    fn fail(kind: CheckKind) -> CheckResult {
        CheckResult::failed(kind, &CheckError::transport("operation timed out"), 1)
    }

    #[test]
    fn test_all_passed_is_clean() {
        let results: Vec<_> = CheckKind::ALL.iter().map(|k| pass(*k)).collect();
        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.attempted, 6);
        assert_eq!(summary.passed, 6);
        assert_eq!(summary.exit_status(), ExitStatus::Clean);
        assert_eq!(summary.exit_status().code(), 0);
    }

    #[test]
    fn test_non_critical_failure_is_degraded() {
        let results: Vec<_> = CheckKind::ALL
            .iter()
            .map(|k| if *k == CheckKind::UnifiedListing { fail(*k) } else { pass(*k) })
            .collect();
        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.passed, 5);
        assert!(summary.failed_critical.is_empty());
        assert_eq!(summary.exit_status().code(), 1);
    }

    #[test]
    fn test_any_critical_failure_is_critical() {
        let results: Vec<_> = CheckKind::ALL
            .iter()
            .map(|k| match k {
                CheckKind::ScraperHealth | CheckKind::ModuleHealth => fail(*k),
                _ => pass(*k),
            })
            .collect();
        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.failed_critical, vec!["Twitter Parser Health".to_string()]);
        assert_eq!(summary.exit_status(), ExitStatus::Critical);
        assert_eq!(summary.exit_status().code(), 2);
    }

    #[test]
    fn test_output_gates_follow_format_and_quiet() -> anyhow::Result<()> {
        let text = TestRunner::new(SmokeConfig::default())?;
        assert!(text.prints_check_lines());
        assert!(text.prints_summary());

        let quiet = TestRunner::new(SmokeConfig::default())?.quiet(true);
        assert!(!quiet.prints_check_lines());
        assert!(quiet.prints_summary());

        // stdout carries nothing but the JSON document
        let json = TestRunner::new(SmokeConfig::default())?.format(OutputFormat::Json);
        assert!(!json.prints_check_lines());
        assert!(!json.prints_summary());
        Ok(())
    }

    #[test]
    fn test_empty_run_is_clean() {
        let summary = RunSummary::from_results(&[]);
        assert!(summary.passed <= summary.attempted);
        assert_eq!(summary.exit_status(), ExitStatus::Clean);
    }
}
