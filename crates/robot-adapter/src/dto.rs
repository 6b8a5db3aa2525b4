//! Wire and storage representations
//!
//! The domain crate has no serde; these types carry the serialized shape
//! and convert to and from domain values at the adapter boundary.

use std::collections::{BTreeMap, HashMap};

use robot_domain::{
    Location, LocationId, LocationType, PlayerId, RepositoryError, ResourceKind, Robot, RobotId,
    RobotSnapshot, UpgradeType,
};
use robot_usecase::TargetLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationTypeDto {
    Standard,
    Spawn,
    SpaceStation,
}

impl From<LocationTypeDto> for LocationType {
    fn from(dto: LocationTypeDto) -> Self {
        match dto {
            LocationTypeDto::Standard => LocationType::Standard,
            LocationTypeDto::Spawn => LocationType::Spawn,
            LocationTypeDto::SpaceStation => LocationType::SpaceStation,
        }
    }
}

impl From<LocationType> for LocationTypeDto {
    fn from(kind: LocationType) -> Self {
        match kind {
            LocationType::Standard => LocationTypeDto::Standard,
            LocationType::Spawn => LocationTypeDto::Spawn,
            LocationType::SpaceStation => LocationTypeDto::SpaceStation,
        }
    }
}

/// Body of a successful `getNeighbor` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMapLocationDto {
    pub id: String,
    pub movement_cost: u32,
    #[serde(rename = "type")]
    pub kind: LocationTypeDto,
    #[serde(default)]
    pub player_id: Option<String>,
}

impl From<GameMapLocationDto> for TargetLocation {
    fn from(dto: GameMapLocationDto) -> Self {
        TargetLocation {
            id: LocationId::new(dto.id),
            movement_cost: dto.movement_cost,
            kind: dto.kind.into(),
            owner: dto.player_id.map(PlayerId::new),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LocationTypeDto,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub blocked: bool,
}

/// A stored robot. Level and resource maps are keyed by upper-case name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotRecord {
    pub id: String,
    pub owner: String,
    pub location: LocationRecord,
    pub alive: bool,
    pub health: u32,
    pub energy: u32,
    #[serde(default)]
    pub levels: BTreeMap<String, u8>,
    #[serde(default)]
    pub resources: BTreeMap<String, u32>,
}

impl From<&Robot> for RobotRecord {
    fn from(robot: &Robot) -> Self {
        let snapshot = robot.snapshot();
        RobotRecord {
            id: snapshot.id.as_str().to_string(),
            owner: snapshot.owner.as_str().to_string(),
            location: LocationRecord {
                id: snapshot.location.id().as_str().to_string(),
                kind: snapshot.location.kind().into(),
                owner: snapshot
                    .location
                    .owner()
                    .map(|owner| owner.as_str().to_string()),
                blocked: snapshot.location.is_blocked(),
            },
            alive: snapshot.alive,
            health: snapshot.health,
            energy: snapshot.energy,
            levels: snapshot
                .levels
                .iter()
                .map(|(kind, level)| (kind.name().to_string(), *level))
                .collect(),
            resources: snapshot
                .quantities
                .iter()
                .map(|(kind, amount)| (kind.name().to_string(), *amount))
                .collect(),
        }
    }
}

impl RobotRecord {
    /// Rebuild the aggregate, rejecting records that break its invariants
    pub fn into_robot(self) -> Result<Robot, RepositoryError> {
        let corrupt = |message: String| RepositoryError::PersistenceError {
            message: format!("corrupt record for robot {}: {}", self.id, message),
        };

        let mut location = Location::new(
            LocationId::new(self.location.id.clone()),
            self.location.kind.into(),
            self.location.owner.clone().map(PlayerId::new),
        )
        .map_err(|e| corrupt(e.to_string()))?;
        location.set_blocked(self.location.blocked);

        let mut levels = HashMap::new();
        for (name, level) in &self.levels {
            let kind = name
                .parse::<UpgradeType>()
                .map_err(|e| corrupt(e.to_string()))?;
            levels.insert(kind, *level);
        }
        let mut quantities = HashMap::new();
        for (name, amount) in &self.resources {
            let kind = name
                .parse::<ResourceKind>()
                .map_err(|e| corrupt(e.to_string()))?;
            quantities.insert(kind, *amount);
        }

        let snapshot = RobotSnapshot {
            id: RobotId::new(self.id.clone()),
            owner: PlayerId::new(self.owner.clone()),
            location,
            alive: self.alive,
            health: self.health,
            energy: self.energy,
            levels,
            quantities,
        };
        Robot::restore(snapshot).map_err(|e| corrupt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game_map_response() {
        let json = r#"{
            "id": "8b0b5f6e-0000-4000-8000-000000000001",
            "movementCost": 3,
            "type": "SPACE_STATION",
            "playerId": null
        }"#;

        let dto: GameMapLocationDto = serde_json::from_str(json).unwrap();
        let target: TargetLocation = dto.into();

        assert_eq!(target.movement_cost, 3);
        assert_eq!(target.kind, LocationType::SpaceStation);
        assert!(target.owner.is_none());
    }

    #[test]
    fn test_record_keeps_levels_and_resources() {
        let mut robot = Robot::spawn(
            RobotId::new("r-1"),
            PlayerId::new("p-1"),
            Location::standard("l-1"),
        );
        robot.upgrade(UpgradeType::Storage).unwrap();
        robot.add_resource(ResourceKind::Iron, 42).unwrap();

        let json = serde_json::to_string(&RobotRecord::from(&robot)).unwrap();
        let restored = serde_json::from_str::<RobotRecord>(&json)
            .unwrap()
            .into_robot()
            .unwrap();

        assert_eq!(restored.level(UpgradeType::Storage), 1);
        assert_eq!(restored.inventory().storage_usage_for(ResourceKind::Iron), 42);
    }

    #[test]
    fn test_record_with_unknown_track_is_corrupt() {
        let robot = Robot::spawn(
            RobotId::new("r-1"),
            PlayerId::new("p-1"),
            Location::standard("l-1"),
        );
        let mut record = RobotRecord::from(&robot);
        record.levels.insert("WINGS".to_string(), 1);

        let result = record.into_robot();

        assert!(matches!(
            result,
            Err(RepositoryError::PersistenceError { message }) if message.contains("WINGS")
        ));
    }

    #[test]
    fn test_record_with_wrapping_quantities_is_corrupt() {
        let robot = Robot::spawn(
            RobotId::new("r-1"),
            PlayerId::new("p-1"),
            Location::standard("l-1"),
        );
        let mut record = RobotRecord::from(&robot);
        record.resources.insert("COAL".to_string(), u32::MAX);
        record.resources.insert("IRON".to_string(), 1);

        let result = record.into_robot();

        assert!(matches!(
            result,
            Err(RepositoryError::PersistenceError { message }) if message.contains("capacity is 20")
        ));
    }
}
