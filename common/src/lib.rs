// Allow some clippy lints shared with the rest of the workspace
#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::upper_case_acronyms)]

pub mod bitfield;
pub mod block;
pub mod config;
pub mod crypto;
pub mod merkle;
pub mod serializer;
pub mod state;
