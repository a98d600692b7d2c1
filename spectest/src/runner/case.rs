use std::{
    fmt::{Display, Error, Formatter},
    sync::Arc,
    time::Instant,
};

use beacon_chain::ChainContext;
use beacon_common::config::Preset;
use log::{debug, info, trace, warn};

use crate::{
    compare::{compare, ComparisonResult},
    decoder::{decode_block, decode_state},
    error::CaseError,
    fixtures::{TestCase, BLOCK_FILE, PRE_STATE_FILE},
    invoker::Transition,
    outcome::{classify, Outcome},
};

use super::report::{CaseResult, TestStatus};

/// Stages a case goes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStage {
    Loaded,
    Classified,
    Invoked,
    Passed,
    Failed,
}

impl Display for CaseStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let name = match self {
            CaseStage::Loaded => "loaded",
            CaseStage::Classified => "classified",
            CaseStage::Invoked => "invoked",
            CaseStage::Passed => "passed",
            CaseStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Runs cases one after the other against its own transition context.
pub struct CaseRunner {
    ctx: ChainContext,
    transition: Arc<dyn Transition>,
}

impl CaseRunner {
    pub fn new(ctx: ChainContext, transition: Arc<dyn Transition>) -> Self {
        Self { ctx, transition }
    }

    pub fn context(&self) -> &ChainContext {
        &self.ctx
    }

    fn preset(&self) -> &Preset {
        self.ctx.preset()
    }

    /// Run one case and time it.
    pub fn run(&self, case: &TestCase) -> CaseResult {
        debug!("Running case {}", case.name());
        let start = Instant::now();
        let result = self.execute(case);
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                trace!("Case {} {}", case.name(), CaseStage::Passed);
                CaseResult {
                    name: case.name().to_string(),
                    status: TestStatus::Pass,
                    duration_ms,
                    error: None,
                    diff: Vec::new(),
                }
            }
            Err(e) => {
                warn!("Case {} {}: {}", case.name(), CaseStage::Failed, e);
                CaseResult {
                    name: case.name().to_string(),
                    status: TestStatus::Fail,
                    duration_ms,
                    error: Some(e.to_string()),
                    diff: e.diff().to_vec(),
                }
            }
        }
    }

    fn execute(&self, case: &TestCase) -> Result<(), CaseError> {
        // Helper caches are keyed by slot and epoch, never by state
        self.ctx.cache().clear_caches();

        let block = decode_block(&case.read_file(BLOCK_FILE)?, self.preset())?;
        let pre = decode_state(&case.read_file(PRE_STATE_FILE)?, self.preset())?;
        trace!("Case {} {}", case.name(), CaseStage::Loaded);

        let outcome = classify(case, self.preset())?;
        trace!("Case {} {}", case.name(), CaseStage::Classified);

        // Invoked whatever the outcome
        let result = self.transition.apply(&self.ctx, pre, &block);
        trace!("Case {} {}", case.name(), CaseStage::Invoked);

        match (outcome, result) {
            (Outcome::ExpectFailure, Err(e)) => {
                info!("Expected failure; failure reason = {}", e);
                Ok(())
            }
            (Outcome::ExpectFailure, Ok(_)) => Err(CaseError::UnexpectedSuccess),
            (Outcome::ExpectSuccess(_), Err(e)) => Err(CaseError::Transition(e)),
            (Outcome::ExpectSuccess(post), Ok(state)) => match compare(&state, post.as_ref()) {
                ComparisonResult::Equal => Ok(()),
                ComparisonResult::Unequal(diff) => {
                    for entry in &diff {
                        warn!("{}: {}", case.name(), entry);
                    }
                    Err(CaseError::Mismatch(diff))
                }
            },
        }
    }
}
