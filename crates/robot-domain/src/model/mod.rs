//! Domain Models - The vocabulary of the robot service
//!
//! These types represent the "Ubiquitous Language" of the game:
//! robots move between locations, fight, mine and store resources,
//! and grow stronger through upgrades.

pub mod inventory;
pub mod location;
pub mod resource;
pub mod robot;
pub mod upgrade;
pub mod upgrade_values;
