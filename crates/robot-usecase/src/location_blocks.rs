//! Location Block Port - Shared knowledge of blocked locations
//!
//! A robot holds its location by value, so a block raised by one robot
//! is published here and read back before another robot tries to leave.
//! Nothing in this crate ever clears a block; `release` exists for the
//! caller that owns the reset policy.

use robot_domain::{LocationId, RepositoryError};

pub trait LocationBlockStore: Send + Sync {
    fn is_blocked(&self, location: &LocationId) -> Result<bool, RepositoryError>;

    fn mark_blocked(&self, location: &LocationId) -> Result<(), RepositoryError>;

    fn release(&self, location: &LocationId) -> Result<(), RepositoryError>;
}
