//! Robot - The aggregate root of the robot service
//!
//! A Robot is an Entity: the same RobotId is the same robot, whatever its
//! stats. It owns one Inventory and holds its current Location by value.
//!
//! Every energy-costing operation charges first and acts second. When the
//! charge fails nothing else happens; when the charge succeeds the energy
//! is spent even if a later check rejects the action (see [`Robot::move_to`]).

use std::collections::HashMap;

use super::inventory::{Inventory, InventoryError};
use super::location::{Location, LocationId};
use super::resource::ResourceKind;
use super::upgrade::{UpgradeError, UpgradeTrack, UpgradeType};

/// Unique identifier for a Robot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobotId(String);

impl RobotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RobotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the player controlling a robot
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Robot - A player-owned game unit
#[derive(Debug, Clone)]
pub struct Robot {
    /// Unique identifier (Entity identity)
    id: RobotId,
    /// Controlling player
    owner: PlayerId,
    /// Where the robot currently stands
    location: Location,
    /// Becomes false once, when health reaches 0
    alive: bool,
    health: u32,
    energy: u32,
    health_level: UpgradeTrack,
    max_energy_level: UpgradeTrack,
    energy_regen_level: UpgradeTrack,
    damage_level: UpgradeTrack,
    mining_speed_level: UpgradeTrack,
    mining_level: UpgradeTrack,
    /// Also owns the storage track
    inventory: Inventory,
}

impl Robot {
    /// Spawn a fresh level-0 robot with full health and energy
    pub fn spawn(id: RobotId, owner: PlayerId, location: Location) -> Self {
        let health_level = UpgradeTrack::new(UpgradeType::Health);
        let max_energy_level = UpgradeTrack::new(UpgradeType::MaxEnergy);
        Self {
            id,
            owner,
            location,
            alive: true,
            health: health_level.value(),
            energy: max_energy_level.value(),
            health_level,
            max_energy_level,
            energy_regen_level: UpgradeTrack::new(UpgradeType::EnergyRegen),
            damage_level: UpgradeTrack::new(UpgradeType::Damage),
            mining_speed_level: UpgradeTrack::new(UpgradeType::MiningSpeed),
            mining_level: UpgradeTrack::new(UpgradeType::Mining),
            inventory: Inventory::new(),
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &RobotId {
        &self.id
    }

    pub fn owner(&self) -> &PlayerId {
        &self.owner
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    // ========== Derived Stats ==========

    pub fn max_health(&self) -> u32 {
        self.health_level.value()
    }

    pub fn max_energy(&self) -> u32 {
        self.max_energy_level.value()
    }

    pub fn energy_regen(&self) -> u32 {
        self.energy_regen_level.value()
    }

    pub fn attack_damage(&self) -> u32 {
        self.damage_level.value()
    }

    pub fn mining_speed(&self) -> u32 {
        self.mining_speed_level.value()
    }

    /// Current level of the given track
    pub fn level(&self, kind: UpgradeType) -> u8 {
        self.track(kind)
            .map_or_else(|| self.inventory.storage_level(), UpgradeTrack::level)
    }

    /// Energy needed to block the current location
    pub fn block_cost(&self) -> u32 {
        // round(2 + 0.1 * max_energy) in integer arithmetic
        (20 + self.max_energy() + 5) / 10
    }

    /// Energy needed for one attack
    pub fn attack_cost(&self) -> u32 {
        u32::from(self.damage_level.level()) + 1
    }

    // ========== Capability Checks ==========

    pub fn can_mine(&self, kind: ResourceKind) -> bool {
        self.mining_level.level() >= kind.required_mining_level()
    }

    /// Sum of all seven upgrade levels
    pub fn total_upgrades(&self) -> u32 {
        UpgradeType::all()
            .iter()
            .map(|&kind| u32::from(self.level(kind)))
            .sum()
    }

    // ========== Movement ==========

    /// Move to `target`, paying `cost` energy.
    ///
    /// Energy is charged before the blocked check and is not refunded
    /// when the current location turns out to be blocked. Entering a
    /// blocked location is always allowed.
    pub fn move_to(&mut self, target: Location, cost: u32) -> Result<(), RobotError> {
        self.reduce_energy(cost)?;
        if self.location.is_blocked() {
            return Err(RobotError::LocationBlocked {
                location: self.location.id().clone(),
            });
        }
        self.location = target;
        Ok(())
    }

    /// Block the current location so no robot can leave it
    pub fn block(&mut self) -> Result<u32, RobotError> {
        let cost = self.block_cost();
        self.reduce_energy(cost)?;
        self.location.set_blocked(true);
        Ok(cost)
    }

    /// Caller-managed view of whether the current location is blocked
    pub fn set_location_blocked(&mut self, blocked: bool) {
        self.location.set_blocked(blocked);
    }

    // ========== Combat ==========

    /// Attack another robot. No damage is dealt unless the energy cost is paid.
    pub fn attack(&mut self, other: &mut Robot) -> Result<u32, RobotError> {
        self.reduce_energy(self.attack_cost())?;
        let damage = self.attack_damage();
        other.receive_damage(damage);
        Ok(damage)
    }

    pub fn receive_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
        }
    }

    // ========== Energy ==========

    /// Restore energy by the regen rate, clamped to the maximum.
    /// Returns the amount actually restored.
    pub fn regenerate_energy(&mut self) -> u32 {
        let before = self.energy;
        self.energy = (self.energy + self.energy_regen()).min(self.max_energy());
        self.energy - before
    }

    fn reduce_energy(&mut self, amount: u32) -> Result<(), RobotError> {
        if amount > self.energy {
            return Err(RobotError::InsufficientEnergy {
                required: amount,
                available: self.energy,
            });
        }
        self.energy -= amount;
        Ok(())
    }

    // ========== Progression ==========

    /// Advance one track by a single level
    pub fn upgrade(&mut self, kind: UpgradeType) -> Result<u8, RobotError> {
        let level = match self.track_mut(kind) {
            Some(track) => track.try_advance()?,
            None => self.inventory.upgrade_storage()?,
        };
        Ok(level)
    }

    /// The storage track lives in the inventory, so it has no entry here
    fn track(&self, kind: UpgradeType) -> Option<&UpgradeTrack> {
        match kind {
            UpgradeType::Health => Some(&self.health_level),
            UpgradeType::MaxEnergy => Some(&self.max_energy_level),
            UpgradeType::EnergyRegen => Some(&self.energy_regen_level),
            UpgradeType::Damage => Some(&self.damage_level),
            UpgradeType::MiningSpeed => Some(&self.mining_speed_level),
            UpgradeType::Mining => Some(&self.mining_level),
            UpgradeType::Storage => None,
        }
    }

    fn track_mut(&mut self, kind: UpgradeType) -> Option<&mut UpgradeTrack> {
        match kind {
            UpgradeType::Health => Some(&mut self.health_level),
            UpgradeType::MaxEnergy => Some(&mut self.max_energy_level),
            UpgradeType::EnergyRegen => Some(&mut self.energy_regen_level),
            UpgradeType::Damage => Some(&mut self.damage_level),
            UpgradeType::MiningSpeed => Some(&mut self.mining_speed_level),
            UpgradeType::Mining => Some(&mut self.mining_level),
            UpgradeType::Storage => None,
        }
    }

    // ========== Resources ==========

    pub fn add_resource(&mut self, kind: ResourceKind, amount: u32) -> Result<(), RobotError> {
        Ok(self.inventory.add_resource(kind, amount)?)
    }

    pub fn take_resource(&mut self, kind: ResourceKind, amount: u32) -> Result<u32, RobotError> {
        Ok(self.inventory.take_resource(kind, amount)?)
    }

    // ========== Persistence Support ==========

    /// Flatten the aggregate into plain data
    pub fn snapshot(&self) -> RobotSnapshot {
        RobotSnapshot {
            id: self.id.clone(),
            owner: self.owner.clone(),
            location: self.location.clone(),
            alive: self.alive,
            health: self.health,
            energy: self.energy,
            levels: UpgradeType::all()
                .iter()
                .map(|&kind| (kind, self.level(kind)))
                .collect(),
            quantities: self.inventory.quantities().clone(),
        }
    }

    /// Rebuild the aggregate, rejecting data that breaks any invariant
    pub fn restore(snapshot: RobotSnapshot) -> Result<Self, RestoreError> {
        let track = |kind: UpgradeType| {
            let level = snapshot.levels.get(&kind).copied().unwrap_or(0);
            UpgradeTrack::at_level(kind, level).map_err(RestoreError::Upgrade)
        };

        // Stored quantities are untrusted; sum wide so they cannot wrap
        let storage = track(UpgradeType::Storage)?;
        let used: u64 = snapshot.quantities.values().map(|&q| u64::from(q)).sum();
        if used > u64::from(storage.value()) {
            return Err(RestoreError::InventoryOverCapacity {
                used,
                max: storage.value(),
            });
        }
        let inventory = Inventory::from_parts(storage, snapshot.quantities);

        let robot = Self {
            health_level: track(UpgradeType::Health)?,
            max_energy_level: track(UpgradeType::MaxEnergy)?,
            energy_regen_level: track(UpgradeType::EnergyRegen)?,
            damage_level: track(UpgradeType::Damage)?,
            mining_speed_level: track(UpgradeType::MiningSpeed)?,
            mining_level: track(UpgradeType::Mining)?,
            inventory,
            id: snapshot.id,
            owner: snapshot.owner,
            location: snapshot.location,
            alive: snapshot.alive,
            health: snapshot.health,
            energy: snapshot.energy,
        };

        if robot.health > robot.max_health() {
            return Err(RestoreError::HealthOutOfRange {
                health: robot.health,
                max: robot.max_health(),
            });
        }
        if robot.energy > robot.max_energy() {
            return Err(RestoreError::EnergyOutOfRange {
                energy: robot.energy,
                max: robot.max_energy(),
            });
        }
        if robot.alive != (robot.health > 0) {
            return Err(RestoreError::AliveFlagMismatch {
                alive: robot.alive,
                health: robot.health,
            });
        }
        Ok(robot)
    }
}

impl PartialEq for Robot {
    fn eq(&self, other: &Self) -> bool {
        // Entity equality: same ID = same entity
        self.id == other.id
    }
}

impl Eq for Robot {}

/// Plain data view of a Robot, used by persistence adapters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotSnapshot {
    pub id: RobotId,
    pub owner: PlayerId,
    pub location: Location,
    pub alive: bool,
    pub health: u32,
    pub energy: u32,
    /// Missing tracks are read as level 0
    pub levels: HashMap<UpgradeType, u8>,
    pub quantities: HashMap<ResourceKind, u32>,
}

/// Errors that can occur during Robot operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotError {
    InsufficientEnergy { required: u32, available: u32 },
    LocationBlocked { location: LocationId },
    Inventory(InventoryError),
    Upgrade(UpgradeError),
}

impl core::fmt::Display for RobotError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RobotError::InsufficientEnergy {
                required,
                available,
            } => write!(
                f,
                "Tried to reduce energy by {} but only has {} energy",
                required, available
            ),
            RobotError::LocationBlocked { location } => {
                write!(f, "Location {} is blocked and cannot be left", location)
            }
            RobotError::Inventory(e) => write!(f, "{}", e),
            RobotError::Upgrade(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RobotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RobotError::Inventory(e) => Some(e),
            RobotError::Upgrade(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InventoryError> for RobotError {
    fn from(e: InventoryError) -> Self {
        RobotError::Inventory(e)
    }
}

impl From<UpgradeError> for RobotError {
    fn from(e: UpgradeError) -> Self {
        RobotError::Upgrade(e)
    }
}

/// Reasons a snapshot cannot become a Robot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreError {
    Upgrade(UpgradeError),
    HealthOutOfRange { health: u32, max: u32 },
    EnergyOutOfRange { energy: u32, max: u32 },
    InventoryOverCapacity { used: u64, max: u32 },
    AliveFlagMismatch { alive: bool, health: u32 },
}

impl core::fmt::Display for RestoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RestoreError::Upgrade(e) => write!(f, "{}", e),
            RestoreError::HealthOutOfRange { health, max } => {
                write!(f, "Health {} exceeds maximum {}", health, max)
            }
            RestoreError::EnergyOutOfRange { energy, max } => {
                write!(f, "Energy {} exceeds maximum {}", energy, max)
            }
            RestoreError::InventoryOverCapacity { used, max } => {
                write!(f, "Inventory holds {} but capacity is {}", used, max)
            }
            RestoreError::AliveFlagMismatch { alive, health } => {
                write!(f, "Robot marked alive={} with health {}", alive, health)
            }
        }
    }
}

impl std::error::Error for RestoreError {}
