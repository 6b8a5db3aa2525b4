//! # Robot Domain Layer
//!
//! The Robot aggregate and everything it owns. Pure business logic,
//! zero external dependencies.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Robot aggregate, Inventory, UpgradeTrack,     ││
//! │  │               Location and the value objects around them    ││
//! │  │  repository/- Trait definitions (not implementations)       ││
//! │  │  service/   - Domain services (RobotDomainService)          ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency boundary
//!
//! A [`Robot`] and its [`Inventory`] form one aggregate. Every operation
//! is a synchronous state transition that either succeeds or returns a
//! typed error. The aggregate is not internally synchronized; callers
//! must hold at most one in-flight command per robot.

pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    inventory::{Inventory, InventoryError},
    location::{Location, LocationError, LocationId, LocationType},
    resource::{ParseResourceKindError, ResourceKind},
    robot::{PlayerId, RestoreError, Robot, RobotError, RobotId, RobotSnapshot},
    upgrade::{ParseUpgradeTypeError, UpgradeError, UpgradeTrack, UpgradeType},
};

pub use repository::robot_repository::{RepositoryError, RobotRepository};

pub use service::robot_domain_service::{RobotAccessError, RobotDomainService};
