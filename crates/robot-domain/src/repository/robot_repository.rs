//! Robot Repository - Abstract persistence for Robots
//!
//! The whole aggregate is loaded and saved as one unit.
//! How it's stored (memory, files, a database) is not our concern here.

use crate::model::robot::{PlayerId, Robot, RobotId};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Robot not found
    NotFound { id: String },
    /// Failed to persist or read back
    PersistenceError { message: String },
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { id } => {
                write!(f, "Robot not found: {}", id)
            }
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Robot Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// The domain defines what it needs; adapters provide implementations.
///
/// Methods take `&self` so one repository can serve commands for
/// different robots at the same time. Implementations handle their own
/// interior locking.
pub trait RobotRepository: Send + Sync {
    /// Save a robot (create or update)
    fn save(&self, robot: &Robot) -> Result<(), RepositoryError>;

    /// Find a robot by ID
    fn find_by_id(&self, id: &RobotId) -> Result<Option<Robot>, RepositoryError>;

    /// Find all robots controlled by a player
    fn find_by_owner(&self, owner: &PlayerId) -> Result<Vec<Robot>, RepositoryError>;

    /// Delete a robot. `NotFound` if there is nothing to delete.
    fn delete(&self, id: &RobotId) -> Result<(), RepositoryError>;

    /// Check if a robot exists
    fn exists(&self, id: &RobotId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }

    /// Count all robots
    fn count(&self) -> Result<usize, RepositoryError>;
}

/// Lets the backend be picked at runtime (`Box<dyn RobotRepository>`)
impl<T: RobotRepository + ?Sized> RobotRepository for Box<T> {
    fn save(&self, robot: &Robot) -> Result<(), RepositoryError> {
        (**self).save(robot)
    }

    fn find_by_id(&self, id: &RobotId) -> Result<Option<Robot>, RepositoryError> {
        (**self).find_by_id(id)
    }

    fn find_by_owner(&self, owner: &PlayerId) -> Result<Vec<Robot>, RepositoryError> {
        (**self).find_by_owner(owner)
    }

    fn delete(&self, id: &RobotId) -> Result<(), RepositoryError> {
        (**self).delete(id)
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        (**self).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::location::Location;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory implementation for testing
    struct InMemoryRobotRepo {
        robots: Mutex<HashMap<String, Robot>>,
    }

    impl InMemoryRobotRepo {
        fn new() -> Self {
            Self {
                robots: Mutex::new(HashMap::new()),
            }
        }
    }

    impl RobotRepository for InMemoryRobotRepo {
        fn save(&self, robot: &Robot) -> Result<(), RepositoryError> {
            self.robots
                .lock()
                .unwrap()
                .insert(robot.id().as_str().to_string(), robot.clone());
            Ok(())
        }

        fn find_by_id(&self, id: &RobotId) -> Result<Option<Robot>, RepositoryError> {
            Ok(self.robots.lock().unwrap().get(id.as_str()).cloned())
        }

        fn find_by_owner(&self, owner: &PlayerId) -> Result<Vec<Robot>, RepositoryError> {
            Ok(self
                .robots
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.owner() == owner)
                .cloned()
                .collect())
        }

        fn delete(&self, id: &RobotId) -> Result<(), RepositoryError> {
            self.robots
                .lock()
                .unwrap()
                .remove(id.as_str())
                .map(|_| ())
                .ok_or_else(|| RepositoryError::NotFound {
                    id: id.as_str().to_string(),
                })
        }

        fn count(&self) -> Result<usize, RepositoryError> {
            Ok(self.robots.lock().unwrap().len())
        }
    }

    #[test]
    fn test_in_memory_repo() {
        let repo = InMemoryRobotRepo::new();

        let robot = Robot::spawn(
            RobotId::new("r-001"),
            PlayerId::new("p-001"),
            Location::standard("l-001"),
        );
        repo.save(&robot).unwrap();

        assert!(repo.exists(&RobotId::new("r-001")).unwrap());
        assert!(!repo.exists(&RobotId::new("r-404")).unwrap());
        assert_eq!(repo.find_by_owner(&PlayerId::new("p-001")).unwrap().len(), 1);
        assert_eq!(repo.count().unwrap(), 1);

        repo.delete(&RobotId::new("r-001")).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }
}
