//! Error types for the robot use cases

use robot_domain::{
    InventoryError, LocationError, LocationId, PlayerId, RepositoryError, RobotAccessError,
    RobotError, RobotId, UpgradeError,
};
use thiserror::Error;

use crate::game_map::GameMapError;

/// Why a command was rejected
///
/// None of these are fatal to the process; each one is a rejected
/// command that the caller reports back to the issuing player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RobotServiceError {
    #[error("Can't find robot with id {robot_id}")]
    NotFound { robot_id: RobotId },

    #[error("Player {issuer} does not own robot {robot_id}")]
    OwnershipMismatch { robot_id: RobotId, issuer: PlayerId },

    #[error("The robot cannot move to the location with id {target}")]
    TargetUnreachable { target: LocationId },

    #[error("Game map client error: {message}")]
    ClientError { message: String },

    #[error("Game map returned an invalid location: {0}")]
    InvalidTargetLocation(#[source] LocationError),

    #[error(transparent)]
    Robot(#[from] RobotError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RobotServiceError {
    /// Stable name of the failure kind, for outcome reports
    pub fn kind(&self) -> &'static str {
        match self {
            RobotServiceError::NotFound { .. } => "NotFound",
            RobotServiceError::OwnershipMismatch { .. } => "OwnershipMismatch",
            RobotServiceError::TargetUnreachable { .. } => "TargetUnreachable",
            RobotServiceError::ClientError { .. } => "ClientError",
            RobotServiceError::InvalidTargetLocation(_) => "ClientError",
            RobotServiceError::Robot(e) => match e {
                RobotError::InsufficientEnergy { .. } => "InsufficientEnergy",
                RobotError::LocationBlocked { .. } => "LocationBlocked",
                RobotError::Inventory(InventoryError::InventoryFull { .. }) => "InventoryFull",
                RobotError::Inventory(InventoryError::InsufficientResources { .. }) => {
                    "InsufficientResources"
                }
                RobotError::Upgrade(UpgradeError::UpgradeCapReached { .. }) => "UpgradeCapReached",
                RobotError::Upgrade(_) => "InvalidLevelTransition",
            },
            RobotServiceError::Repository(RepositoryError::NotFound { .. }) => "NotFound",
            RobotServiceError::Repository(_) => "PersistenceError",
        }
    }
}

impl From<RobotAccessError> for RobotServiceError {
    fn from(e: RobotAccessError) -> Self {
        match e {
            RobotAccessError::NotFound { robot_id } => RobotServiceError::NotFound { robot_id },
            RobotAccessError::OwnershipMismatch { robot_id, issuer } => {
                RobotServiceError::OwnershipMismatch { robot_id, issuer }
            }
            RobotAccessError::Repository(e) => RobotServiceError::Repository(e),
        }
    }
}

impl From<GameMapError> for RobotServiceError {
    fn from(e: GameMapError) -> Self {
        match e {
            GameMapError::TargetUnreachable { target } => {
                RobotServiceError::TargetUnreachable { target }
            }
            GameMapError::Client { message } => RobotServiceError::ClientError { message },
        }
    }
}
