//! Conformance runner
//!
//! Discovers the cases of a category, runs each of them against the block
//! header transition and collects a [`RunReport`].

mod case;
mod report;

pub use case::{CaseRunner, CaseStage};
pub use report::{CaseResult, RunReport, TestStatus};

use std::{sync::Arc, time::Instant};

use beacon_chain::{ChainContext, HelperCache};
use beacon_common::config::Preset;
use log::{info, warn};
use rayon::prelude::*;

use crate::{
    config::RunnerConfig,
    error::DiscoveryError,
    fixtures::{FixtureStore, TestCase},
    invoker::{BlockHeaderTransition, Transition},
};

pub struct SpecRunner {
    config: RunnerConfig,
    preset: Preset,
    store: FixtureStore,
    transition: Arc<dyn Transition>,
}

impl SpecRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_transition(config, Arc::new(BlockHeaderTransition))
    }

    /// Runner exercising another transition than block header processing.
    pub fn with_transition(config: RunnerConfig, transition: Arc<dyn Transition>) -> Self {
        // The preset is fixed before any fixture is read
        let preset = config.config.preset();
        let store = FixtureStore::new(config.root.clone());
        Self {
            config,
            preset,
            store,
            transition,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn suite_name(&self) -> String {
        format!("{}/{}", self.config.config, self.config.category)
    }

    /// Cases to run, after applying the name filter.
    pub fn discover(&self) -> Result<Vec<TestCase>, DiscoveryError> {
        let cases = self
            .store
            .list_cases(self.config.config, &self.config.category)?;

        Ok(match &self.config.filter {
            Some(filter) => {
                let selected: Vec<TestCase> = cases
                    .into_iter()
                    .filter(|case| case.name().contains(filter.as_str()))
                    .collect();
                info!("{} cases match filter '{}'", selected.len(), filter);
                selected
            }
            None => cases,
        })
    }

    /// Case runner owning a fresh helper cache.
    pub fn case_runner(&self) -> CaseRunner {
        self.case_runner_with(Arc::new(HelperCache::default()))
    }

    /// Case runner on an injected helper cache.
    pub fn case_runner_with(&self, cache: Arc<HelperCache>) -> CaseRunner {
        let ctx = ChainContext::with_cache(self.preset.clone(), cache);
        CaseRunner::new(ctx, self.transition.clone())
    }

    /// Discover and run every case.
    pub fn run(&self) -> Result<RunReport, DiscoveryError> {
        let cases = self.discover()?;
        Ok(if self.config.is_parallel() {
            self.run_parallel(&cases)
        } else {
            self.run_cases(&self.case_runner(), &cases)
        })
    }

    /// Run `cases` in order with a single case runner.
    pub fn run_cases(&self, runner: &CaseRunner, cases: &[TestCase]) -> RunReport {
        let start = Instant::now();
        let mut report = RunReport::new(self.suite_name());
        for case in cases {
            report.add_result(runner.run(case));
        }
        report.duration = start.elapsed();
        report.sort();
        report
    }

    fn run_parallel(&self, cases: &[TestCase]) -> RunReport {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Cannot start {} workers, running sequentially: {}", self.config.workers, e);
                return self.run_cases(&self.case_runner(), cases);
            }
        };

        let start = Instant::now();
        // One case runner, and so one helper cache, per worker
        let results: Vec<CaseResult> = pool.install(|| {
            cases
                .par_iter()
                .map_init(|| self.case_runner(), |runner, case| runner.run(case))
                .collect()
        });

        let mut report = RunReport::new(self.suite_name());
        for result in results {
            report.add_result(result);
        }
        report.duration = start.elapsed();
        report.sort();
        report
    }
}
