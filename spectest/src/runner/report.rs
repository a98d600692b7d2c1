//! Run report
//!
//! Collects per-case results and renders them as JSON, JUnit XML or a
//! human-readable summary.

use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};

use crate::compare::FieldDiff;

/// Case status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    Pass,
    Fail,
}

/// Result of one case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    pub name: String,
    pub status: TestStatus,
    pub duration_ms: u64,
    /// Failure message if failed
    pub error: Option<String>,
    /// Differing fields when the post state did not match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diff: Vec<FieldDiff>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Pass
    }
}

/// Report of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Suite name, `<config>/<category>`
    pub suite: String,
    pub timestamp: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    pub results: Vec<CaseResult>,
}

impl RunReport {
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            timestamp: Utc::now(),
            total: 0,
            passed: 0,
            failed: 0,
            duration: Duration::ZERO,
            results: Vec::new(),
        }
    }

    /// Add a case result
    pub fn add_result(&mut self, result: CaseResult) {
        self.total += 1;
        match result.status {
            TestStatus::Pass => {
                self.passed += 1;
                counter!("spectest_cases_passed").increment(1);
            }
            TestStatus::Fail => {
                self.failed += 1;
                counter!("spectest_cases_failed").increment(1);
            }
        }
        histogram!("spectest_case_duration_ms").record(result.duration_ms as f64);

        self.results.push(result);
    }

    /// Order results by case name, whatever order they completed in
    pub fn sort(&mut self) {
        self.results.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn get(&self, name: &str) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Check if all cases passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to JUnit XML format
    pub fn to_junit_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"0\" skipped=\"0\" time=\"{:.3}\" timestamp=\"{}\">\n",
            escape_xml(&self.suite),
            self.total,
            self.failed,
            self.duration.as_secs_f64(),
            self.timestamp.to_rfc3339()
        ));

        for result in &self.results {
            xml.push_str(&format!(
                "  <testcase classname=\"{}\" name=\"{}\" time=\"{:.3}\"",
                escape_xml(&self.suite),
                escape_xml(&result.name),
                result.duration_ms as f64 / 1000.0
            ));

            match result.status {
                TestStatus::Pass => {
                    xml.push_str(" />\n");
                }
                TestStatus::Fail => {
                    xml.push_str(">\n");
                    let message = result.error.as_deref().unwrap_or("Case failed");
                    xml.push_str(&format!(
                        "    <failure message=\"{}\">",
                        escape_xml(message)
                    ));
                    for diff in &result.diff {
                        xml.push_str(&escape_xml(&diff.to_string()));
                        xml.push('\n');
                    }
                    xml.push_str("</failure>\n");
                    xml.push_str("  </testcase>\n");
                }
            }
        }

        xml.push_str("</testsuite>\n");
        xml
    }

    /// Print human-readable summary
    pub fn print_summary(&self) {
        println!("\n=== {} ===\n", self.suite);
        println!(
            "Total: {} | Passed: {} | Failed: {}",
            self.total, self.passed, self.failed
        );
        println!("Duration: {:.2}s\n", self.duration.as_secs_f64());

        if self.failed > 0 {
            println!("Failed cases:");
            for result in self.results.iter().filter(|r| !r.passed()) {
                println!("  - {}", result.name);
                if let Some(error) = &result.error {
                    println!("    Error: {}", error);
                }
                for diff in &result.diff {
                    println!("    {}", diff);
                }
            }
            println!();
        }

        println!(
            "Result: {}",
            if self.all_passed() { "PASS" } else { "FAIL" }
        );
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Custom serialization for Duration
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
