mod misc;
mod state;
mod validator;

pub use misc::{Checkpoint, Eth1Data, Fork};
pub use state::BeaconState;
pub use validator::{Validator, VALIDATOR_SIZE};
