//! Gateway Adapters - Clients for other services
//!
//! Implementations of the `GameMapClient` port.

pub mod http_game_map;
pub mod static_game_map;
