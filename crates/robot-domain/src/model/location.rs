//! Location - A place on the map a robot can stand on
//!
//! Location is a Value Object supplied by the map service. Its identity,
//! type and owner never change. The only mutable part is the `blocked`
//! flag, which a robot raises with `block` and the caller clears.

use super::robot::PlayerId;

/// Unique identifier for a Location
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LocationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationType {
    Standard,
    /// Where a player's robots appear; always owned by that player
    Spawn,
    SpaceStation,
}

impl LocationType {
    pub fn name(&self) -> &'static str {
        match self {
            LocationType::Standard => "STANDARD",
            LocationType::Spawn => "SPAWN",
            LocationType::SpaceStation => "SPACE_STATION",
        }
    }
}

impl core::fmt::Display for LocationType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    id: LocationId,
    kind: LocationType,
    owner: Option<PlayerId>,
    blocked: bool,
}

impl Location {
    /// Create a location. Spawns must have an owner; nothing else may.
    pub fn new(
        id: LocationId,
        kind: LocationType,
        owner: Option<PlayerId>,
    ) -> Result<Self, LocationError> {
        match (kind, &owner) {
            (LocationType::Spawn, None) => return Err(LocationError::SpawnWithoutOwner { id }),
            (LocationType::Standard | LocationType::SpaceStation, Some(_)) => {
                return Err(LocationError::OwnerOnNonSpawn { id, kind })
            }
            _ => {}
        }
        Ok(Self {
            id,
            kind,
            owner,
            blocked: false,
        })
    }

    /// Shorthand for an unowned standard location
    pub fn standard(id: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(id),
            kind: LocationType::Standard,
            owner: None,
            blocked: false,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &LocationId {
        &self.id
    }

    pub fn kind(&self) -> LocationType {
        self.kind
    }

    pub fn owner(&self) -> Option<&PlayerId> {
        self.owner.as_ref()
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    // ========== Mutations ==========

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }
}

/// Construction-time violations of the spawn/owner rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    SpawnWithoutOwner { id: LocationId },
    OwnerOnNonSpawn { id: LocationId, kind: LocationType },
}

impl core::fmt::Display for LocationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LocationError::SpawnWithoutOwner { id } => {
                write!(f, "Spawn location {} must have an owner", id)
            }
            LocationError::OwnerOnNonSpawn { id, kind } => write!(
                f,
                "Only spawns can have an owner, but {} location {} has one",
                kind, id
            ),
        }
    }
}

impl std::error::Error for LocationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_requires_owner() {
        let result = Location::new(LocationId::new("l-1"), LocationType::Spawn, None);
        assert!(matches!(result, Err(LocationError::SpawnWithoutOwner { .. })));

        let spawn = Location::new(
            LocationId::new("l-1"),
            LocationType::Spawn,
            Some(PlayerId::new("p-1")),
        )
        .unwrap();
        assert_eq!(spawn.owner(), Some(&PlayerId::new("p-1")));
    }

    #[test]
    fn test_only_spawn_has_owner() {
        let result = Location::new(
            LocationId::new("l-2"),
            LocationType::SpaceStation,
            Some(PlayerId::new("p-1")),
        );
        assert!(matches!(
            result,
            Err(LocationError::OwnerOnNonSpawn {
                kind: LocationType::SpaceStation,
                ..
            })
        ));
    }

    #[test]
    fn test_new_location_is_not_blocked() {
        let location = Location::new(LocationId::new("l-3"), LocationType::Standard, None).unwrap();
        assert!(!location.is_blocked());
    }
}
