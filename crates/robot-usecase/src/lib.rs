//! # Robot Use Case Layer
//!
//! Application-specific business rules.
//! This layer orchestrates the flow of a player command: resolve the
//! robot, check ownership, consult the game map when moving, apply one
//! aggregate operation, then persist the result.
//!
//! ## Ports
//!
//! - [`GameMapClient`] - adjacency and movement cost lookups
//! - [`LocationBlockStore`] - which locations are currently blocked
//! - [`robot_domain::RobotRepository`] - persistence of the aggregate

pub use robot_domain;

pub mod command;
pub mod command_locks;
pub mod error;
pub mod game_map;
pub mod location_blocks;
pub mod robot_application_service;

pub use command::{BlockCommand, MoveCommand, RegenerateEnergyCommand, UpgradeCommand};
pub use command_locks::RobotCommandLocks;
pub use error::RobotServiceError;
pub use game_map::{GameMapClient, GameMapError, TargetLocation};
pub use location_blocks::LocationBlockStore;
pub use robot_application_service::RobotApplicationService;
