//! JSON File Repository
//!
//! One pretty-printed JSON document per robot, `<robot id>.json`, in a
//! single directory. Writes go to a temporary file first and are renamed
//! into place so a reader never sees half a record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use robot_domain::{PlayerId, RepositoryError, Robot, RobotId, RobotRepository};
use tracing::{debug, warn};

use crate::dto::RobotRecord;

const EXTENSION: &str = "json";

fn persistence_error(context: &str, err: impl core::fmt::Display) -> RepositoryError {
    RepositoryError::PersistenceError {
        message: format!("{context}: {err}"),
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileRobotRepository {
    directory: PathBuf,
}

impl JsonFileRobotRepository {
    /// Open (and create if needed) the storage directory
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|e| {
            persistence_error(&format!("cannot create {}", directory.display()), e)
        })?;
        debug!(directory = %directory.display(), "📁 JSON robot repository opened");
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Ids become file names, so only a conservative character set is accepted
    fn path_for(&self, id: &RobotId) -> Result<PathBuf, RepositoryError> {
        let raw = id.as_str();
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::PersistenceError {
                message: format!("robot id not usable as a file name: {raw:?}"),
            });
        }
        Ok(self.directory.join(format!("{raw}.{EXTENSION}")))
    }

    fn read_record(path: &Path) -> Result<Robot, RepositoryError> {
        let bytes = fs::read(path)
            .map_err(|e| persistence_error(&format!("cannot read {}", path.display()), e))?;
        let record: RobotRecord = serde_json::from_slice(&bytes)
            .map_err(|e| persistence_error(&format!("cannot parse {}", path.display()), e))?;
        record.into_robot()
    }

    fn load_all(&self) -> Result<Vec<Robot>, RepositoryError> {
        let entries = fs::read_dir(&self.directory).map_err(|e| {
            persistence_error(&format!("cannot list {}", self.directory.display()), e)
        })?;

        let mut robots = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| persistence_error("cannot read directory entry", e))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            robots.push(Self::read_record(&path)?);
        }
        Ok(robots)
    }
}

impl RobotRepository for JsonFileRobotRepository {
    fn save(&self, robot: &Robot) -> Result<(), RepositoryError> {
        let path = self.path_for(robot.id())?;
        let tmp = path.with_extension(format!("{EXTENSION}.tmp"));

        let bytes = serde_json::to_vec_pretty(&RobotRecord::from(robot))
            .map_err(|e| persistence_error("cannot encode robot", e))?;
        fs::write(&tmp, bytes)
            .map_err(|e| persistence_error(&format!("cannot write {}", tmp.display()), e))?;
        fs::rename(&tmp, &path).map_err(|e| {
            warn!(robot_id = %robot.id(), error = %e, "Failed to move robot record into place");
            persistence_error(&format!("cannot replace {}", path.display()), e)
        })?;

        debug!(robot_id = %robot.id(), "💾 Robot saved");
        Ok(())
    }

    fn find_by_id(&self, id: &RobotId) -> Result<Option<Robot>, RepositoryError> {
        let path = self.path_for(id)?;
        match fs::metadata(&path) {
            Ok(_) => Self::read_record(&path).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(persistence_error(
                &format!("cannot stat {}", path.display()),
                e,
            )),
        }
    }

    fn find_by_owner(&self, owner: &PlayerId) -> Result<Vec<Robot>, RepositoryError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.owner() == owner)
            .collect())
    }

    fn delete(&self, id: &RobotId) -> Result<(), RepositoryError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RepositoryError::NotFound {
                id: id.as_str().to_string(),
            }),
            Err(e) => Err(persistence_error(
                &format!("cannot delete {}", path.display()),
                e,
            )),
        }
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.load_all()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robot_domain::{Location, ResourceKind, UpgradeType};
    use tempfile::TempDir;

    fn robot(id: &str, owner: &str) -> Robot {
        Robot::spawn(
            RobotId::new(id),
            PlayerId::new(owner),
            Location::standard("l-001"),
        )
    }

    #[test]
    fn test_save_and_reload_survives_new_instance() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRobotRepository::open(dir.path()).unwrap();

        let mut original = robot("r-001", "p-001");
        original.upgrade(UpgradeType::MaxEnergy).unwrap();
        original.add_resource(ResourceKind::Coal, 7).unwrap();
        original.block().unwrap();
        repo.save(&original).unwrap();

        let reopened = JsonFileRobotRepository::open(dir.path()).unwrap();
        let loaded = reopened
            .find_by_id(&RobotId::new("r-001"))
            .unwrap()
            .unwrap();

        assert_eq!(loaded.snapshot(), original.snapshot());
        assert!(loaded.location().is_blocked());
    }

    #[test]
    fn test_missing_robot_is_none() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRobotRepository::open(dir.path()).unwrap();

        assert!(repo.find_by_id(&RobotId::new("r-404")).unwrap().is_none());
        assert_eq!(
            repo.delete(&RobotId::new("r-404")),
            Err(RepositoryError::NotFound {
                id: "r-404".to_string()
            })
        );
    }

    #[test]
    fn test_find_by_owner_and_count() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRobotRepository::open(dir.path()).unwrap();
        repo.save(&robot("r-001", "p-001")).unwrap();
        repo.save(&robot("r-002", "p-001")).unwrap();
        repo.save(&robot("r-003", "p-002")).unwrap();

        assert_eq!(repo.count().unwrap(), 3);
        assert_eq!(repo.find_by_owner(&PlayerId::new("p-001")).unwrap().len(), 2);

        repo.delete(&RobotId::new("r-001")).unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRobotRepository::open(dir.path()).unwrap();
        let mut r = robot("r-001", "p-001");
        repo.save(&r).unwrap();

        r.block().unwrap();
        repo.save(&r).unwrap();

        let loaded = repo.find_by_id(&RobotId::new("r-001")).unwrap().unwrap();
        assert_eq!(loaded.energy(), r.energy());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_path_like_id_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRobotRepository::open(dir.path()).unwrap();

        let result = repo.find_by_id(&RobotId::new("../escape"));

        assert!(matches!(
            result,
            Err(RepositoryError::PersistenceError { .. })
        ));
    }

    #[test]
    fn test_tampered_record_rejected() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRobotRepository::open(dir.path()).unwrap();
        repo.save(&robot("r-001", "p-001")).unwrap();

        // Energy above the level-0 maximum of 20
        let path = dir.path().join("r-001.json");
        let text = fs::read_to_string(&path).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["energy"] = serde_json::json!(500);
        fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

        let result = repo.find_by_id(&RobotId::new("r-001"));

        assert!(matches!(
            result,
            Err(RepositoryError::PersistenceError { .. })
        ));
    }
}
