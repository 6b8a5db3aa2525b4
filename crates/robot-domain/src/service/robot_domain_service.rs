//! Robot Domain Service - Resolving robots and checking who may command them
//!
//! Every player command starts the same way: find the robot, then make
//! sure the issuer owns it. This service holds those two steps so that
//! each use case doesn't repeat them.

use crate::model::robot::{PlayerId, Robot, RobotId};
use crate::repository::robot_repository::{RepositoryError, RobotRepository};

/// Stateless; all state lives in the repository and the Robot.
#[derive(Debug, Clone, Copy, Default)]
pub struct RobotDomainService;

impl RobotDomainService {
    pub fn new() -> Self {
        Self
    }

    /// Load a robot, failing with `NotFound` if the id is unknown
    pub fn get_robot<R: RobotRepository + ?Sized>(
        &self,
        repository: &R,
        robot_id: &RobotId,
    ) -> Result<Robot, RobotAccessError> {
        repository
            .find_by_id(robot_id)?
            .ok_or_else(|| RobotAccessError::NotFound {
                robot_id: robot_id.clone(),
            })
    }

    /// Ensure `issuer` controls `robot`
    pub fn check_owner(&self, robot: &Robot, issuer: &PlayerId) -> Result<(), RobotAccessError> {
        if robot.owner() != issuer {
            return Err(RobotAccessError::OwnershipMismatch {
                robot_id: robot.id().clone(),
                issuer: issuer.clone(),
            });
        }
        Ok(())
    }

    /// Load a robot and check ownership in one step
    pub fn get_owned_robot<R: RobotRepository + ?Sized>(
        &self,
        repository: &R,
        robot_id: &RobotId,
        issuer: &PlayerId,
    ) -> Result<Robot, RobotAccessError> {
        let robot = self.get_robot(repository, robot_id)?;
        self.check_owner(&robot, issuer)?;
        Ok(robot)
    }

    pub fn save_robot<R: RobotRepository + ?Sized>(
        &self,
        repository: &R,
        robot: &Robot,
    ) -> Result<(), RobotAccessError> {
        repository.save(robot)?;
        Ok(())
    }
}

/// Errors raised while resolving a robot for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotAccessError {
    NotFound { robot_id: RobotId },
    OwnershipMismatch { robot_id: RobotId, issuer: PlayerId },
    Repository(RepositoryError),
}

impl core::fmt::Display for RobotAccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RobotAccessError::NotFound { robot_id } => {
                write!(f, "Can't find robot with id {}", robot_id)
            }
            RobotAccessError::OwnershipMismatch { robot_id, issuer } => write!(
                f,
                "Player {} does not own robot {}",
                issuer, robot_id
            ),
            RobotAccessError::Repository(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RobotAccessError {}

impl From<RepositoryError> for RobotAccessError {
    fn from(e: RepositoryError) -> Self {
        RobotAccessError::Repository(e)
    }
}
