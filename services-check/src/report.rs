//! Check outcomes and the validation summary.

use chrono::{DateTime, Utc};
use colored::*;
use serde_json::{json, Value};

const SEPARATOR_WIDTH: usize = 50;

/// Result of a single dependency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The dependency answered as expected.
    Pass,
    /// The dependency failed; counts against the run.
    Fail(String),
    /// The check was not run; counts as a pass.
    Skipped(String),
    /// The dependency is degraded but tolerated; counts as a pass.
    Warn(String),
}

impl CheckOutcome {
    /// Whether this outcome counts as a pass for the exit code.
    pub fn counts_as_pass(&self) -> bool {
        !matches!(self, CheckOutcome::Fail(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckOutcome::Pass => "pass",
            CheckOutcome::Fail(_) => "fail",
            CheckOutcome::Skipped(_) => "skipped",
            CheckOutcome::Warn(_) => "warn",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            CheckOutcome::Pass => None,
            CheckOutcome::Fail(reason)
            | CheckOutcome::Skipped(reason)
            | CheckOutcome::Warn(reason) => Some(reason),
        }
    }

    /// Status line printed right after a check finishes.
    pub fn line(&self, name: &str) -> String {
        match self {
            CheckOutcome::Pass => format!("[SUCCESS] {}: SUCCESS", name),
            CheckOutcome::Fail(reason) => format!("[FAILED] {}: FAILED - {}", name, reason),
            CheckOutcome::Skipped(reason) => format!("[WARNING] {}: SKIPPED ({})", name, reason),
            CheckOutcome::Warn(reason) => format!("[WARNING] {}: {}", name, reason),
        }
    }

    fn print_line(&self, name: &str) {
        let line = self.line(name);
        match self {
            CheckOutcome::Pass => println!("{}", line.green()),
            CheckOutcome::Fail(_) => println!("{}", line.red()),
            CheckOutcome::Skipped(_) | CheckOutcome::Warn(_) => println!("{}", line.yellow()),
        }
    }
}

/// One named check and how it went.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub outcome: CheckOutcome,
    pub duration_ms: i64,
}

/// Collected outcomes of one harness run.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    started_at: DateTime<Utc>,
    results: Vec<CheckResult>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            results: Vec::new(),
        }
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    /// Look up a result by check name.
    pub fn outcome(&self, name: &str) -> Option<&CheckOutcome> {
        self.results
            .iter()
            .find(|result| result.name == name)
            .map(|result| &result.outcome)
    }

    /// Announce a check before it runs.
    pub fn start(&self, name: &str) {
        println!("Testing {}...", name);
    }

    /// Record a finished check and print its status line.
    pub fn record(&mut self, name: &str, outcome: CheckOutcome, duration_ms: i64) {
        outcome.print_line(name);
        self.results.push(CheckResult {
            name: name.to_string(),
            outcome,
            duration_ms,
        });
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|result| result.outcome.counts_as_pass())
    }

    /// 0 if every check counts as a pass, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    /// Plain-text summary table.
    pub fn render_summary(&self) -> String {
        let separator = "=".repeat(SEPARATOR_WIDTH);
        let mut out = String::new();

        out.push_str(&separator);
        out.push('\n');
        out.push_str("SERVICE VALIDATION SUMMARY:\n");
        for result in &self.results {
            let mark = if result.outcome.counts_as_pass() {
                "[PASS]"
            } else {
                "[FAIL]"
            };
            out.push_str(&format!("{}: {}\n", result.name, mark));
        }
        out.push_str(&separator);
        out.push('\n');

        out
    }

    /// Print the summary table followed by the overall verdict.
    pub fn print_summary(&self) {
        println!();
        print!("{}", self.render_summary());
        println!();
        if self.all_passed() {
            println!(
                "{}",
                "[SUCCESS] All services are configured correctly!".green().bold()
            );
        } else {
            println!(
                "{}",
                "[FAILED] Some services have issues that need attention."
                    .red()
                    .bold()
            );
        }
    }

    /// Machine-readable form of the run.
    pub fn to_json(&self) -> Value {
        json!({
            "started_at": self.started_at.to_rfc3339(),
            "passed": self.all_passed(),
            "checks": self.results.iter().map(|result| json!({
                "name": result.name,
                "outcome": result.outcome.label(),
                "reason": result.outcome.reason(),
                "duration_ms": result.duration_ms,
            })).collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcomes: Vec<(&str, CheckOutcome)>) -> ValidationReport {
        let mut report = ValidationReport::new();
        for (name, outcome) in outcomes {
            report.record(name, outcome, 0);
        }
        report
    }

    #[test]
    fn test_skipped_and_warn_count_as_pass() {
        let report = report(vec![
            ("PostgreSQL", CheckOutcome::Pass),
            ("Context7 API", CheckOutcome::Skipped("API key not configured".into())),
            ("Qdrant Service", CheckOutcome::Warn("may be unavailable".into())),
        ]);

        assert!(report.all_passed());
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_any_failure_sets_exit_code() {
        let report = report(vec![
            ("PostgreSQL", CheckOutcome::Fail("connection refused".into())),
            ("Context7 API", CheckOutcome::Pass),
        ]);

        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_empty_report_passes() {
        assert_eq!(ValidationReport::new().exit_code(), 0);
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            CheckOutcome::Pass.line("PostgreSQL"),
            "[SUCCESS] PostgreSQL: SUCCESS"
        );
        assert_eq!(
            CheckOutcome::Fail("timeout".into()).line("PostgreSQL"),
            "[FAILED] PostgreSQL: FAILED - timeout"
        );
        assert_eq!(
            CheckOutcome::Skipped("API key not configured".into()).line("Context7 API"),
            "[WARNING] Context7 API: SKIPPED (API key not configured)"
        );
    }

    #[test]
    fn test_render_summary() {
        let report = report(vec![
            ("PostgreSQL", CheckOutcome::Pass),
            ("Context7 API", CheckOutcome::Fail("HTTP error: 500".into())),
        ]);

        let summary = report.render_summary();

        assert!(summary.starts_with(&"=".repeat(50)));
        assert!(summary.contains("SERVICE VALIDATION SUMMARY:\n"));
        assert!(summary.contains("PostgreSQL: [PASS]\n"));
        assert!(summary.contains("Context7 API: [FAIL]\n"));
    }

    #[test]
    fn test_to_json() {
        let report = report(vec![(
            "Qdrant Service",
            CheckOutcome::Warn("unreachable".into()),
        )]);

        let json = report.to_json();

        assert_eq!(json["passed"], true);
        assert_eq!(json["checks"][0]["name"], "Qdrant Service");
        assert_eq!(json["checks"][0]["outcome"], "warn");
        assert_eq!(json["checks"][0]["reason"], "unreachable");
        assert_eq!(report.outcome("Qdrant Service").map(|o| o.label()), Some("warn"));
    }
}
