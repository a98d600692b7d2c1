mod bls;
mod hash;

pub use bls::*;
pub use hash::*;
