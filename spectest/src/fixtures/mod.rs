// Fixture tree layout:
// <root>/<config>/phase0/operations/<category>/pyspec_tests/<case>/

mod case;

pub use case::{TestCase, BLOCK_FILE, POST_STATE_FILE, PRE_STATE_FILE};

use std::path::{Path, PathBuf};

use beacon_common::config::ConfigName;
use log::{debug, info};
use walkdir::WalkDir;

use crate::error::DiscoveryError;

pub const FORK: &str = "phase0";
pub const RUNNER: &str = "operations";
pub const SUITE: &str = "pyspec_tests";

/// Read-only view over a fixture root.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    root: PathBuf,
}

impl FixtureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_path(&self, config: ConfigName, category: &str) -> PathBuf {
        self.root
            .join(config.to_string())
            .join(FORK)
            .join(RUNNER)
            .join(category)
            .join(SUITE)
    }

    /// Every case directory of a category, sorted by name.
    pub fn list_cases(
        &self,
        config: ConfigName,
        category: &str,
    ) -> Result<Vec<TestCase>, DiscoveryError> {
        let path = self.category_path(config, category);
        if !path.is_dir() {
            return Err(DiscoveryError::NotFound(path));
        }

        let mut cases = Vec::new();
        for entry in WalkDir::new(&path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| DiscoveryError::Io {
                path: path.clone(),
                source: e.into(),
            })?;
            if !entry.file_type().is_dir() {
                debug!("Skipping non directory entry {}", entry.path().display());
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            cases.push(TestCase::new(name, entry.into_path()));
        }

        if cases.is_empty() {
            return Err(DiscoveryError::Empty(path));
        }

        info!(
            "Found {} {}/{} cases for {}",
            cases.len(),
            RUNNER,
            category,
            config
        );
        Ok(cases)
    }
}
