//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from robot-domain and the
//! block store port from robot-usecase.

pub mod in_memory;
pub mod json_file;
