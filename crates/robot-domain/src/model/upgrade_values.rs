//! Upgrade Values - Per-level stat tables
//!
//! Each table is indexed by upgrade level. The highest valid level of a
//! track is the last index of its table. Values are fixed game balance
//! data; nothing interpolates between levels.

/// Inventory capacity by storage level
pub const STORAGE_BY_LEVEL: [u32; 6] = [20, 50, 100, 200, 400, 1000];

/// Maximum health by health level
pub const MAX_HEALTH_BY_LEVEL: [u32; 6] = [10, 25, 50, 100, 200, 500];

/// Damage dealt per attack by damage level
pub const ATTACK_DAMAGE_BY_LEVEL: [u32; 6] = [1, 2, 5, 10, 20, 50];

/// Mining speed by mining-speed level
pub const MINING_SPEED_BY_LEVEL: [u32; 6] = [2, 5, 10, 15, 20, 40];

/// Maximum energy by energy level
pub const MAX_ENERGY_BY_LEVEL: [u32; 6] = [20, 30, 40, 60, 100, 200];

/// Energy restored per regeneration by energy-regen level
pub const ENERGY_REGEN_BY_LEVEL: [u32; 6] = [4, 6, 8, 10, 15, 20];

/// Mining level is its own value: the highest resource tier it unlocks
pub const MINING_BY_LEVEL: [u32; 5] = [0, 1, 2, 3, 4];
