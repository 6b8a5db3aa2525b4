//! # Robot Adapter Layer
//!
//! External system integrations (Hexagonal Architecture adapters).
//!
//! ## Structure
//!
//! - `gateway/` - Outbound adapters (game map service)
//! - `repository/` - Persistence implementations
//! - `config` - Configuration loading for the wiring in the app crate

pub mod config;
pub mod dto;
pub mod gateway;
pub mod repository;
