//! Upgrade - The seven progression tracks of a robot
//!
//! An [`UpgradeTrack`] is a bounded, monotonic counter. It only ever
//! moves one level up at a time and stops at the last level of its
//! value table. Levels are never written directly; every change goes
//! through [`UpgradeTrack::try_advance`] or [`UpgradeTrack::advance_to`],
//! which return a typed error instead of silently clamping.

use super::upgrade_values::{
    ATTACK_DAMAGE_BY_LEVEL, ENERGY_REGEN_BY_LEVEL, MAX_ENERGY_BY_LEVEL, MAX_HEALTH_BY_LEVEL,
    MINING_BY_LEVEL, MINING_SPEED_BY_LEVEL, STORAGE_BY_LEVEL,
};

/// The progression tracks a robot can be upgraded on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UpgradeType {
    /// Inventory capacity (owned by the inventory)
    Storage,
    /// Maximum health
    Health,
    /// Damage dealt per attack
    Damage,
    /// Mining speed
    MiningSpeed,
    /// Highest resource tier the robot can mine
    Mining,
    /// Maximum energy
    MaxEnergy,
    /// Energy restored per regeneration
    EnergyRegen,
}

impl UpgradeType {
    /// Canonical upper-case name, as used in commands
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeType::Storage => "STORAGE",
            UpgradeType::Health => "HEALTH",
            UpgradeType::Damage => "DAMAGE",
            UpgradeType::MiningSpeed => "MINING_SPEED",
            UpgradeType::Mining => "MINING",
            UpgradeType::MaxEnergy => "MAX_ENERGY",
            UpgradeType::EnergyRegen => "ENERGY_REGEN",
        }
    }

    /// Get all upgrade types (useful for iteration)
    pub fn all() -> &'static [UpgradeType] {
        &[
            UpgradeType::Storage,
            UpgradeType::Health,
            UpgradeType::Damage,
            UpgradeType::MiningSpeed,
            UpgradeType::Mining,
            UpgradeType::MaxEnergy,
            UpgradeType::EnergyRegen,
        ]
    }

    /// The stat table for this track, indexed by level
    pub fn values(&self) -> &'static [u32] {
        match self {
            UpgradeType::Storage => &STORAGE_BY_LEVEL,
            UpgradeType::Health => &MAX_HEALTH_BY_LEVEL,
            UpgradeType::Damage => &ATTACK_DAMAGE_BY_LEVEL,
            UpgradeType::MiningSpeed => &MINING_SPEED_BY_LEVEL,
            UpgradeType::Mining => &MINING_BY_LEVEL,
            UpgradeType::MaxEnergy => &MAX_ENERGY_BY_LEVEL,
            UpgradeType::EnergyRegen => &ENERGY_REGEN_BY_LEVEL,
        }
    }

    /// Highest reachable level (5 for every track except mining, which stops at 4)
    pub fn max_level(&self) -> u8 {
        u8::try_from(self.values().len() - 1).unwrap_or(u8::MAX)
    }
}

impl core::fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl core::str::FromStr for UpgradeType {
    type Err = ParseUpgradeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UpgradeType::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseUpgradeTypeError {
                input: s.to_string(),
            })
    }
}

/// Returned when a string names no known upgrade track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUpgradeTypeError {
    pub input: String,
}

impl core::fmt::Display for ParseUpgradeTypeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Unknown upgrade type: {}", self.input)
    }
}

impl std::error::Error for ParseUpgradeTypeError {}

/// A single bounded progression counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeTrack {
    kind: UpgradeType,
    level: u8,
}

impl UpgradeTrack {
    /// Create a track at level 0
    pub fn new(kind: UpgradeType) -> Self {
        Self { kind, level: 0 }
    }

    /// Rebuild a track at a known level (e.g. when loading a saved robot)
    pub fn at_level(kind: UpgradeType, level: u8) -> Result<Self, UpgradeError> {
        if level > kind.max_level() {
            return Err(UpgradeError::LevelOutOfRange { kind, level });
        }
        Ok(Self { kind, level })
    }

    // ========== Getters ==========

    pub fn kind(&self) -> UpgradeType {
        self.kind
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn max_level(&self) -> u8 {
        self.kind.max_level()
    }

    pub fn is_maxed(&self) -> bool {
        self.level == self.max_level()
    }

    /// The stat value for the current level
    pub fn value(&self) -> u32 {
        self.kind.values()[usize::from(self.level)]
    }

    // ========== State Transitions ==========

    /// Move up exactly one level
    pub fn try_advance(&mut self) -> Result<u8, UpgradeError> {
        self.advance_to(self.level + 1)
    }

    /// Move to `target`, which must be the level directly above the current one
    pub fn advance_to(&mut self, target: u8) -> Result<u8, UpgradeError> {
        if target > self.max_level() {
            return Err(UpgradeError::UpgradeCapReached {
                kind: self.kind,
                max_level: self.max_level(),
            });
        }
        if target != self.level + 1 {
            return Err(UpgradeError::InvalidLevelTransition {
                kind: self.kind,
                from: self.level,
                to: target,
            });
        }
        self.level = target;
        Ok(self.level)
    }
}

/// Errors raised by upgrade tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeError {
    /// The track is already at its highest level
    UpgradeCapReached { kind: UpgradeType, max_level: u8 },
    /// A skip or a downgrade was attempted
    InvalidLevelTransition { kind: UpgradeType, from: u8, to: u8 },
    /// A stored level lies outside the track's table
    LevelOutOfRange { kind: UpgradeType, level: u8 },
}

impl core::fmt::Display for UpgradeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UpgradeError::UpgradeCapReached { kind, max_level } => write!(
                f,
                "Max {} level {} has been reached. Upgrade not possible.",
                kind, max_level
            ),
            UpgradeError::InvalidLevelTransition { kind, from, to } if to > from => write!(
                f,
                "Cannot skip {} upgrade levels. Tried to upgrade from level {} to level {}",
                kind, from, to
            ),
            UpgradeError::InvalidLevelTransition { kind, from, to } => write!(
                f,
                "Cannot downgrade {}. Tried to go from level {} to level {}",
                kind, from, to
            ),
            UpgradeError::LevelOutOfRange { kind, level } => {
                write!(f, "Level {} is out of range for {}", level, kind)
            }
        }
    }
}

impl std::error::Error for UpgradeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_starts_at_zero() {
        let track = UpgradeTrack::new(UpgradeType::Health);
        assert_eq!(track.level(), 0);
        assert_eq!(track.value(), 10);
    }

    #[test]
    fn test_try_advance_moves_one_level() {
        let mut track = UpgradeTrack::new(UpgradeType::MaxEnergy);
        assert_eq!(track.try_advance(), Ok(1));
        assert_eq!(track.value(), 30);
    }

    #[test]
    fn test_cap_reached_leaves_level_unchanged() {
        let mut track = UpgradeTrack::new(UpgradeType::Damage);
        for _ in 0..5 {
            track.try_advance().unwrap();
        }
        assert!(track.is_maxed());

        let result = track.try_advance();
        assert_eq!(
            result,
            Err(UpgradeError::UpgradeCapReached {
                kind: UpgradeType::Damage,
                max_level: 5
            })
        );
        assert_eq!(track.level(), 5);
    }

    #[test]
    fn test_mining_track_stops_at_four() {
        let mut track = UpgradeTrack::new(UpgradeType::Mining);
        for _ in 0..4 {
            track.try_advance().unwrap();
        }
        assert!(matches!(
            track.try_advance(),
            Err(UpgradeError::UpgradeCapReached { max_level: 4, .. })
        ));
        assert_eq!(track.level(), 4);
    }

    #[test]
    fn test_skip_is_rejected() {
        let mut track = UpgradeTrack::new(UpgradeType::Storage);
        let result = track.advance_to(2);
        assert_eq!(
            result,
            Err(UpgradeError::InvalidLevelTransition {
                kind: UpgradeType::Storage,
                from: 0,
                to: 2
            })
        );
        assert_eq!(track.level(), 0);
    }

    #[test]
    fn test_downgrade_is_rejected() {
        let mut track = UpgradeTrack::at_level(UpgradeType::Health, 3).unwrap();
        let err = track.advance_to(2).unwrap_err();
        assert!(err.to_string().starts_with("Cannot downgrade"));
        assert_eq!(track.level(), 3);
    }

    #[test]
    fn test_at_level_out_of_range() {
        assert_eq!(
            UpgradeTrack::at_level(UpgradeType::Mining, 5),
            Err(UpgradeError::LevelOutOfRange {
                kind: UpgradeType::Mining,
                level: 5
            })
        );
    }

    #[test]
    fn test_parse_upgrade_type() {
        assert_eq!("MINING_SPEED".parse(), Ok(UpgradeType::MiningSpeed));
        assert_eq!("energy_regen".parse(), Ok(UpgradeType::EnergyRegen));
        assert!("WINGS".parse::<UpgradeType>().is_err());
    }
}
