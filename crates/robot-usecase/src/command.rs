//! Commands - A player's request to make a robot do something
//!
//! Every command names the robot, the issuing player, and carries a
//! transaction id so that the outcome can be correlated with it later.

use robot_domain::{LocationId, PlayerId, RobotId, UpgradeType};
use uuid::Uuid;

/// Move a robot to a neighbouring location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub transaction_id: Uuid,
    pub robot_id: RobotId,
    pub issuer: PlayerId,
    pub target: LocationId,
}

impl MoveCommand {
    pub fn new(robot_id: RobotId, issuer: PlayerId, target: LocationId) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            robot_id,
            issuer,
            target,
        }
    }
}

/// Block the robot's current location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCommand {
    pub transaction_id: Uuid,
    pub robot_id: RobotId,
    pub issuer: PlayerId,
}

impl BlockCommand {
    pub fn new(robot_id: RobotId, issuer: PlayerId) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            robot_id,
            issuer,
        }
    }
}

/// Regenerate the robot's energy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerateEnergyCommand {
    pub transaction_id: Uuid,
    pub robot_id: RobotId,
    pub issuer: PlayerId,
}

impl RegenerateEnergyCommand {
    pub fn new(robot_id: RobotId, issuer: PlayerId) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            robot_id,
            issuer,
        }
    }
}

/// Upgrade one of the robot's tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeCommand {
    pub transaction_id: Uuid,
    pub robot_id: RobotId,
    pub issuer: PlayerId,
    pub upgrade: UpgradeType,
}

impl UpgradeCommand {
    pub fn new(robot_id: RobotId, issuer: PlayerId, upgrade: UpgradeType) -> Self {
        Self {
            transaction_id: Uuid::new_v4(),
            robot_id,
            issuer,
            upgrade,
        }
    }
}
