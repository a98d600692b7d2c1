mod block_header;
mod cache;
mod error;
pub mod helpers;

pub use block_header::{process_block_header, process_block_header_no_verify};
pub use cache::{HelperCache, DEFAULT_CACHE_SIZE};
pub use error::BlockError;
