use beacon_common::{config::Preset, state::BeaconState};
use log::debug;

use crate::{
    decoder::decode_state,
    error::{CaseError, ReadError},
    fixtures::{TestCase, POST_STATE_FILE},
};

/// What a case expects from the transition, fixed before it is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ExpectSuccess(Box<BeaconState>),
    ExpectFailure,
}

/// Classify a case from its post state file.
///
/// Only a post state that does not exist means the transition must fail;
/// any other read error is returned.
pub fn classify(case: &TestCase, preset: &Preset) -> Result<Outcome, CaseError> {
    match case.read_file(POST_STATE_FILE) {
        Ok(bytes) => {
            let post = decode_state(&bytes, preset)?;
            Ok(Outcome::ExpectSuccess(Box::new(post)))
        }
        Err(ReadError::Absent(path)) => {
            debug!("No post state at {}, expecting failure", path.display());
            Ok(Outcome::ExpectFailure)
        }
        Err(e) => Err(e.into()),
    }
}
