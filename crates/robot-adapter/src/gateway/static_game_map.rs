//! Static Game Map - A fixed neighbour graph held in memory
//!
//! Stands in for the map service in the demo and in tests.

use std::collections::HashMap;

use robot_domain::{LocationId, LocationType, PlayerId};
use robot_usecase::{GameMapClient, GameMapError, TargetLocation};

#[derive(Debug, Clone)]
struct LocationInfo {
    kind: LocationType,
    owner: Option<PlayerId>,
}

#[derive(Debug, Clone, Default)]
pub struct StaticGameMap {
    locations: HashMap<LocationId, LocationInfo>,
    edges: HashMap<LocationId, HashMap<LocationId, u32>>,
}

impl StaticGameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe a location; undescribed ones are treated as standard
    pub fn with_location(
        mut self,
        id: impl Into<String>,
        kind: LocationType,
        owner: Option<PlayerId>,
    ) -> Self {
        self.locations
            .insert(LocationId::new(id), LocationInfo { kind, owner });
        self
    }

    /// Connect two locations in both directions
    pub fn connect(mut self, a: impl Into<String>, b: impl Into<String>, cost: u32) -> Self {
        let a = LocationId::new(a);
        let b = LocationId::new(b);
        self.edges
            .entry(a.clone())
            .or_default()
            .insert(b.clone(), cost);
        self.edges.entry(b).or_default().insert(a, cost);
        self
    }

    /// A small ring of planets around a spawn point, used by the demo
    pub fn demo(spawn_owner: PlayerId) -> Self {
        Self::new()
            .with_location("spawn", LocationType::Spawn, Some(spawn_owner))
            .with_location("station", LocationType::SpaceStation, None)
            .connect("spawn", "planet-a", 1)
            .connect("planet-a", "planet-b", 2)
            .connect("planet-b", "station", 3)
            .connect("station", "spawn", 4)
    }
}

impl GameMapClient for StaticGameMap {
    fn retrieve_target_if_reachable(
        &self,
        start: &LocationId,
        target: &LocationId,
    ) -> Result<TargetLocation, GameMapError> {
        let cost = self
            .edges
            .get(start)
            .and_then(|neighbours| neighbours.get(target))
            .copied()
            .ok_or_else(|| GameMapError::TargetUnreachable {
                target: target.clone(),
            })?;

        let (kind, owner) = match self.locations.get(target) {
            Some(info) => (info.kind, info.owner.clone()),
            None => (LocationType::Standard, None),
        };

        Ok(TargetLocation {
            id: target.clone(),
            movement_cost: cost,
            kind,
            owner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_symmetric() {
        let map = StaticGameMap::new().connect("a", "b", 3);

        let forward = map
            .retrieve_target_if_reachable(&LocationId::new("a"), &LocationId::new("b"))
            .unwrap();
        let back = map
            .retrieve_target_if_reachable(&LocationId::new("b"), &LocationId::new("a"))
            .unwrap();

        assert_eq!(forward.movement_cost, 3);
        assert_eq!(back.movement_cost, 3);
        assert_eq!(forward.kind, LocationType::Standard);
    }

    #[test]
    fn test_non_neighbour_unreachable() {
        let map = StaticGameMap::new().connect("a", "b", 1).connect("b", "c", 1);

        let result = map.retrieve_target_if_reachable(&LocationId::new("a"), &LocationId::new("c"));

        assert_eq!(
            result,
            Err(GameMapError::TargetUnreachable {
                target: LocationId::new("c")
            })
        );
    }

    #[test]
    fn test_demo_spawn_carries_owner() {
        let map = StaticGameMap::demo(PlayerId::new("p-001"));

        let target = map
            .retrieve_target_if_reachable(&LocationId::new("planet-a"), &LocationId::new("spawn"))
            .unwrap();

        assert_eq!(target.kind, LocationType::Spawn);
        assert_eq!(target.owner, Some(PlayerId::new("p-001")));
        assert!(target.to_location().is_ok());
    }
}
