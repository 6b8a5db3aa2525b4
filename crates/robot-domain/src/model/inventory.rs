//! Inventory - The resources a robot carries
//!
//! The inventory is owned by exactly one robot. Its capacity is a pure
//! function of the storage upgrade level, and the sum of all held
//! resources never exceeds that capacity.

use std::collections::HashMap;

use super::resource::ResourceKind;
use super::upgrade::{UpgradeError, UpgradeTrack, UpgradeType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    storage: UpgradeTrack,
    quantities: HashMap<ResourceKind, u32>,
}

impl Inventory {
    /// Create an empty level-0 inventory
    pub fn new() -> Self {
        Self {
            storage: UpgradeTrack::new(UpgradeType::Storage),
            quantities: ResourceKind::all().iter().map(|&r| (r, 0)).collect(),
        }
    }

    /// Rebuild an inventory from stored parts
    pub(crate) fn from_parts(storage: UpgradeTrack, quantities: HashMap<ResourceKind, u32>) -> Self {
        let mut inventory = Self {
            storage,
            quantities,
        };
        for kind in ResourceKind::all() {
            inventory.quantities.entry(*kind).or_insert(0);
        }
        inventory
    }

    // ========== Getters ==========

    pub fn storage_level(&self) -> u8 {
        self.storage.level()
    }

    /// Capacity at the current storage level
    pub fn max(&self) -> u32 {
        self.storage.value()
    }

    pub fn used(&self) -> u32 {
        self.quantities.values().sum()
    }

    pub fn free(&self) -> u32 {
        self.max().saturating_sub(self.used())
    }

    pub fn storage_usage_for(&self, kind: ResourceKind) -> u32 {
        self.quantities.get(&kind).copied().unwrap_or(0)
    }

    pub fn quantities(&self) -> &HashMap<ResourceKind, u32> {
        &self.quantities
    }

    // ========== Mutations ==========

    /// Store `amount` of `kind`.
    ///
    /// If the whole amount does not fit, the part that fits is stored
    /// anyway and `InventoryFull` reports how much of it was kept.
    pub fn add_resource(&mut self, kind: ResourceKind, amount: u32) -> Result<(), InventoryError> {
        let stored = amount.min(self.free());
        *self.quantities.entry(kind).or_insert(0) += stored;

        if stored < amount {
            return Err(InventoryError::InventoryFull {
                kind,
                requested: amount,
                stored,
            });
        }
        Ok(())
    }

    /// Remove exactly `amount` of `kind`, or nothing at all
    pub fn take_resource(&mut self, kind: ResourceKind, amount: u32) -> Result<u32, InventoryError> {
        let held = self.storage_usage_for(kind);
        if held < amount {
            return Err(InventoryError::InsufficientResources {
                kind,
                requested: amount,
                held,
            });
        }
        self.quantities.insert(kind, held - amount);
        Ok(amount)
    }

    /// Raise the storage level by one; capacity follows the new level
    pub fn upgrade_storage(&mut self) -> Result<u8, UpgradeError> {
        self.storage.try_advance()
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during Inventory operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Only `stored` of `requested` fit; the rest was dropped
    InventoryFull {
        kind: ResourceKind,
        requested: u32,
        stored: u32,
    },
    InsufficientResources {
        kind: ResourceKind,
        requested: u32,
        held: u32,
    },
}

impl core::fmt::Display for InventoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InventoryError::InventoryFull {
                kind,
                requested,
                stored,
            } => write!(
                f,
                "Inventory full: stored {} of {} {}",
                stored, requested, kind
            ),
            InventoryError::InsufficientResources {
                kind,
                requested,
                held,
            } => write!(
                f,
                "Tried to take {} {} but only {} are held",
                requested, kind, held
            ),
        }
    }
}

impl std::error::Error for InventoryError {}
