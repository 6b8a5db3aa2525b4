//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define HOW the domain wants to persist robots,
//! but NOT how it's actually done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait RobotRepository │  InMemoryRobotRepository
//!   fn save()           │  JsonFileRobotRepository
//!   fn find_by_id()     │
//! ```

pub mod robot_repository;
