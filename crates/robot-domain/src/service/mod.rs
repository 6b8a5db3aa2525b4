//! Domain Services - Business logic that doesn't belong to a single entity
//!
//! Services operate on repositories and aggregates together.

pub mod robot_domain_service;
