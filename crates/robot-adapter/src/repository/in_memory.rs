//! In-Memory Repository Implementations
//!
//! Simple in-memory implementations of the persistence ports.
//! Useful for testing and development.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use robot_domain::{LocationId, PlayerId, RepositoryError, Robot, RobotId, RobotRepository};
use robot_usecase::LocationBlockStore;

fn read_lock_failed() -> RepositoryError {
    RepositoryError::PersistenceError {
        message: "Failed to acquire read lock".to_string(),
    }
}

fn write_lock_failed() -> RepositoryError {
    RepositoryError::PersistenceError {
        message: "Failed to acquire write lock".to_string(),
    }
}

/// In-memory Robot Repository
///
/// Thread-safe implementation using RwLock. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRobotRepository {
    robots: Arc<RwLock<HashMap<RobotId, Robot>>>,
}

impl InMemoryRobotRepository {
    pub fn new() -> Self {
        Self {
            robots: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl RobotRepository for InMemoryRobotRepository {
    fn save(&self, robot: &Robot) -> Result<(), RepositoryError> {
        let mut robots = self.robots.write().map_err(|_| write_lock_failed())?;
        robots.insert(robot.id().clone(), robot.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &RobotId) -> Result<Option<Robot>, RepositoryError> {
        let robots = self.robots.read().map_err(|_| read_lock_failed())?;
        Ok(robots.get(id).cloned())
    }

    fn find_by_owner(&self, owner: &PlayerId) -> Result<Vec<Robot>, RepositoryError> {
        let robots = self.robots.read().map_err(|_| read_lock_failed())?;
        Ok(robots
            .values()
            .filter(|r| r.owner() == owner)
            .cloned()
            .collect())
    }

    fn delete(&self, id: &RobotId) -> Result<(), RepositoryError> {
        let mut robots = self.robots.write().map_err(|_| write_lock_failed())?;
        robots
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound {
                id: id.as_str().to_string(),
            })
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let robots = self.robots.read().map_err(|_| read_lock_failed())?;
        Ok(robots.len())
    }
}

/// In-memory set of blocked locations
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocationBlockStore {
    blocked: Arc<RwLock<HashSet<LocationId>>>,
}

impl InMemoryLocationBlockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationBlockStore for InMemoryLocationBlockStore {
    fn is_blocked(&self, location: &LocationId) -> Result<bool, RepositoryError> {
        let blocked = self.blocked.read().map_err(|_| read_lock_failed())?;
        Ok(blocked.contains(location))
    }

    fn mark_blocked(&self, location: &LocationId) -> Result<(), RepositoryError> {
        let mut blocked = self.blocked.write().map_err(|_| write_lock_failed())?;
        blocked.insert(location.clone());
        Ok(())
    }

    fn release(&self, location: &LocationId) -> Result<(), RepositoryError> {
        let mut blocked = self.blocked.write().map_err(|_| write_lock_failed())?;
        blocked.remove(location);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robot_domain::Location;

    #[test]
    fn test_robot_repository() {
        let repo = InMemoryRobotRepository::new();

        let robot = Robot::spawn(
            RobotId::new("r-001"),
            PlayerId::new("p-001"),
            Location::standard("l-001"),
        );
        repo.save(&robot).unwrap();

        let found = repo.find_by_id(&RobotId::new("r-001")).unwrap();
        assert!(found.is_some());
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.find_by_owner(&PlayerId::new("p-001")).unwrap().len(), 1);
        assert!(repo.find_by_owner(&PlayerId::new("p-002")).unwrap().is_empty());

        repo.delete(&RobotId::new("r-001")).unwrap();
        assert!(!repo.exists(&RobotId::new("r-001")).unwrap());
        assert_eq!(
            repo.delete(&RobotId::new("r-001")),
            Err(RepositoryError::NotFound {
                id: "r-001".to_string()
            })
        );
    }

    #[test]
    fn test_saved_copy_is_detached() {
        let repo = InMemoryRobotRepository::new();
        let mut robot = Robot::spawn(
            RobotId::new("r-001"),
            PlayerId::new("p-001"),
            Location::standard("l-001"),
        );
        repo.save(&robot).unwrap();

        robot.block().unwrap();

        let stored = repo.find_by_id(&RobotId::new("r-001")).unwrap().unwrap();
        assert_eq!(stored.energy(), 20);
    }

    #[test]
    fn test_clones_share_store() {
        let repo = InMemoryRobotRepository::new();
        let other = repo.clone();
        other
            .save(&Robot::spawn(
                RobotId::new("r-001"),
                PlayerId::new("p-001"),
                Location::standard("l-001"),
            ))
            .unwrap();

        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_block_store_mark_and_release() {
        let blocks = InMemoryLocationBlockStore::new();
        let location = LocationId::new("l-001");

        assert!(!blocks.is_blocked(&location).unwrap());
        blocks.mark_blocked(&location).unwrap();
        assert!(blocks.is_blocked(&location).unwrap());
        assert!(!blocks.is_blocked(&LocationId::new("l-002")).unwrap());

        blocks.release(&location).unwrap();
        assert!(!blocks.is_blocked(&location).unwrap());
    }
}
