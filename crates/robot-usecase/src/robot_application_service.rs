//! Robot Application Service - Executes player commands
//!
//! Each command runs the same sequence:
//! 1. Serialize: take the robot's command lock
//! 2. Resolve: load the robot and check the issuer owns it
//! 3. Consult: ask the game map (movement only)
//! 4. Apply: run exactly one operation on the aggregate
//! 5. Persist: save the robot, or surface a typed failure
//!
//! A rejected operation is not saved. The one exception is a move out of
//! a blocked location: its energy has already been spent, so the robot
//! is saved before the error is returned.

use robot_domain::{
    Location, PlayerId, Robot, RobotDomainService, RobotError, RobotId, RobotRepository,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::command::{BlockCommand, MoveCommand, RegenerateEnergyCommand, UpgradeCommand};
use crate::command_locks::RobotCommandLocks;
use crate::error::RobotServiceError;
use crate::game_map::GameMapClient;
use crate::location_blocks::LocationBlockStore;

pub struct RobotApplicationService<R, M, B> {
    repository: R,
    game_map: M,
    blocks: B,
    domain: RobotDomainService,
    locks: RobotCommandLocks,
}

impl<R, M, B> RobotApplicationService<R, M, B>
where
    R: RobotRepository,
    M: GameMapClient,
    B: LocationBlockStore,
{
    pub fn new(repository: R, game_map: M, blocks: B) -> Self {
        Self {
            repository,
            game_map,
            blocks,
            domain: RobotDomainService::new(),
            locks: RobotCommandLocks::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn blocks(&self) -> &B {
        &self.blocks
    }

    /// Create a new level-0 robot for `owner` at `location`
    pub fn spawn_robot(
        &self,
        owner: PlayerId,
        location: Location,
    ) -> Result<Robot, RobotServiceError> {
        let robot = Robot::spawn(RobotId::new(Uuid::new_v4().to_string()), owner, location);
        self.domain.save_robot(&self.repository, &robot)?;
        info!(
            robot_id = %robot.id(),
            owner = %robot.owner(),
            location = %robot.location().id(),
            "robot spawned"
        );
        Ok(robot)
    }

    /// Move a robot to an adjacent location
    pub fn move_robot(&self, command: &MoveCommand) -> Result<Robot, RobotServiceError> {
        let result = self.with_owned_robot(&command.robot_id, &command.issuer, |robot| {
            let target = self
                .game_map
                .retrieve_target_if_reachable(robot.location().id(), &command.target)?;
            debug!(
                destination = %target.id,
                cost = target.movement_cost,
                "game map confirmed adjacency"
            );
            let destination = target
                .to_location()
                .map_err(RobotServiceError::InvalidTargetLocation)?;

            let blocked = self.blocks.is_blocked(robot.location().id())?;
            robot.set_location_blocked(blocked);

            match robot.move_to(destination, target.movement_cost) {
                Ok(()) => Ok(Persist::Yes),
                Err(e @ RobotError::LocationBlocked { .. }) => {
                    // The escape attempt still cost energy
                    Ok(Persist::AndFail(e.into()))
                }
                Err(e) => Err(e.into()),
            }
        });
        report("move", command.transaction_id, &command.robot_id, result)
    }

    /// Block the robot's current location
    pub fn block(&self, command: &BlockCommand) -> Result<Robot, RobotServiceError> {
        let result = self.with_owned_robot(&command.robot_id, &command.issuer, |robot| {
            robot.block()?;
            self.blocks.mark_blocked(robot.location().id())?;
            Ok(Persist::Yes)
        });
        report("block", command.transaction_id, &command.robot_id, result)
    }

    /// Restore energy by the robot's regen rate
    pub fn regenerate_energy(
        &self,
        command: &RegenerateEnergyCommand,
    ) -> Result<Robot, RobotServiceError> {
        let result = self.with_owned_robot(&command.robot_id, &command.issuer, |robot| {
            let restored = robot.regenerate_energy();
            debug!(restored, energy = robot.energy(), "energy regenerated");
            Ok(Persist::Yes)
        });
        report("regenerate", command.transaction_id, &command.robot_id, result)
    }

    /// Advance one upgrade track by a single level
    pub fn upgrade(&self, command: &UpgradeCommand) -> Result<Robot, RobotServiceError> {
        let result = self.with_owned_robot(&command.robot_id, &command.issuer, |robot| {
            let level = robot.upgrade(command.upgrade)?;
            debug!(upgrade = %command.upgrade, level, "track upgraded");
            Ok(Persist::Yes)
        });
        report("upgrade", command.transaction_id, &command.robot_id, result)
    }

    /// Hold the robot's lock, load it, check ownership, apply `operation`,
    /// and save according to its verdict.
    fn with_owned_robot<F>(
        &self,
        robot_id: &RobotId,
        issuer: &PlayerId,
        operation: F,
    ) -> Result<Robot, RobotServiceError>
    where
        F: FnOnce(&mut Robot) -> Result<Persist, RobotServiceError>,
    {
        self.locks.with_lock(robot_id, || {
            let mut robot = self
                .domain
                .get_owned_robot(&self.repository, robot_id, issuer)?;

            match operation(&mut robot)? {
                Persist::Yes => {
                    self.domain.save_robot(&self.repository, &robot)?;
                    Ok(robot)
                }
                Persist::AndFail(error) => {
                    self.domain.save_robot(&self.repository, &robot)?;
                    Err(error)
                }
            }
        })
    }
}

/// What to do with the robot after an operation
enum Persist {
    Yes,
    /// Save the partially applied state, then report the failure
    AndFail(RobotServiceError),
}

fn report(
    command: &'static str,
    transaction_id: Uuid,
    robot_id: &RobotId,
    result: Result<Robot, RobotServiceError>,
) -> Result<Robot, RobotServiceError> {
    match &result {
        Ok(robot) => info!(
            command,
            %transaction_id,
            %robot_id,
            energy = robot.energy(),
            location = %robot.location().id(),
            "command succeeded"
        ),
        Err(e) => warn!(
            command,
            %transaction_id,
            %robot_id,
            kind = e.kind(),
            error = %e,
            "command rejected"
        ),
    }
    result
}
