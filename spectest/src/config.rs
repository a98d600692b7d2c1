use std::path::PathBuf;

use beacon_common::config::ConfigName;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DEFAULT_CATEGORY: &str = "block_header";
// Environment variable holding the fixture root
pub const ROOT_ENV: &str = "SPECTEST_ROOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Summary,
    Json,
    Junit,
}

/// Settings of one conformance run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub root: PathBuf,
    pub config: ConfigName,
    pub category: String,
    // 0 runs the cases sequentially on the calling thread
    pub workers: usize,
    // Only run cases whose name contains this
    pub filter: Option<String>,
    pub format: ReportFormat,
}

impl RunnerConfig {
    pub fn new(root: impl Into<PathBuf>, config: ConfigName) -> Self {
        Self {
            root: root.into(),
            config,
            category: DEFAULT_CATEGORY.to_string(),
            workers: 0,
            filter: None,
            format: ReportFormat::default(),
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.workers > 0
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_config_json() {
        let config = RunnerConfig::new("/tmp/fixtures", ConfigName::Mainnet);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"config\":\"mainnet\""));
        assert!(json.contains("\"format\":\"summary\""));
        assert_eq!(serde_json::from_str::<RunnerConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!(ReportFormat::from_str("junit").unwrap(), ReportFormat::Junit);
        assert!(ReportFormat::from_str("xml").is_err());
    }
}
