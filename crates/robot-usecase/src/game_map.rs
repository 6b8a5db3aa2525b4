//! Game Map Port - Asking the map service where a robot may go
//!
//! The map service answers one question: is `target` adjacent to
//! `start`, and if so what does it cost to get there? Implementations
//! block for at most a fixed timeout and never touch the robot.

use robot_domain::{Location, LocationError, LocationId, LocationType, PlayerId};
use thiserror::Error;

/// Descriptor of a reachable target location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLocation {
    pub id: LocationId,
    pub movement_cost: u32,
    pub kind: LocationType,
    pub owner: Option<PlayerId>,
}

impl TargetLocation {
    /// Build the domain Location, enforcing the spawn/owner rule
    pub fn to_location(&self) -> Result<Location, LocationError> {
        Location::new(self.id.clone(), self.kind, self.owner.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameMapError {
    /// The two locations are not neighbours
    #[error("The robot cannot move to the location with id {target}")]
    TargetUnreachable { target: LocationId },

    /// Transport failure, timeout, or an unexpected response
    #[error("{message}")]
    Client { message: String },
}

/// Game Map Client Trait
///
/// This is a PORT in hexagonal architecture.
pub trait GameMapClient: Send + Sync {
    fn retrieve_target_if_reachable(
        &self,
        start: &LocationId,
        target: &LocationId,
    ) -> Result<TargetLocation, GameMapError>;
}

impl<T: GameMapClient + ?Sized> GameMapClient for Box<T> {
    fn retrieve_target_if_reachable(
        &self,
        start: &LocationId,
        target: &LocationId,
    ) -> Result<TargetLocation, GameMapError> {
        (**self).retrieve_target_if_reachable(start, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_with_owner_must_be_spawn() {
        let target = TargetLocation {
            id: LocationId::new("l-1"),
            movement_cost: 2,
            kind: LocationType::Standard,
            owner: Some(PlayerId::new("p-1")),
        };
        assert!(target.to_location().is_err());

        let spawn = TargetLocation {
            kind: LocationType::Spawn,
            ..target
        };
        assert_eq!(spawn.to_location().unwrap().kind(), LocationType::Spawn);
    }
}
