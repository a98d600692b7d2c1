pub mod context;
pub mod core;

pub use context::ChainContext;
pub use crate::core::{process_block_header, process_block_header_no_verify, BlockError, HelperCache};
