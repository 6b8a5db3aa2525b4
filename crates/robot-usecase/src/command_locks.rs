//! Per-robot command serialization
//!
//! The Robot aggregate is not synchronized. Two commands for the same
//! robot must not interleave their load / mutate / save sequences, while
//! commands for different robots may run in parallel.
//!
//! A robot's mutex only lives while some command holds or awaits it, so
//! the map stays as small as the set of robots currently being commanded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use robot_domain::RobotId;

type LockMap = HashMap<RobotId, Arc<Mutex<()>>>;

/// One mutex per robot id, created on first use and dropped after last use
#[derive(Debug, Default)]
pub struct RobotCommandLocks {
    locks: Mutex<LockMap>,
}

impl RobotCommandLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `operation` while holding the mutex of `robot_id`
    pub fn with_lock<T>(&self, robot_id: &RobotId, operation: impl FnOnce() -> T) -> T {
        let lease = Lease {
            locks: &self.locks,
            robot_id,
            lock: self.acquire(robot_id),
        };
        // The guard protects no data of its own
        let _guard = lease.lock.lock().unwrap_or_else(PoisonError::into_inner);
        operation()
    }

    /// Robots that currently have a command holding or awaiting their mutex
    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn acquire(&self, robot_id: &RobotId) -> Arc<Mutex<()>> {
        Arc::clone(self.map().entry(robot_id.clone()).or_default())
    }

    fn map(&self) -> std::sync::MutexGuard<'_, LockMap> {
        // The map holds no invariant a panic could break
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A claim on one robot's mutex. The last claim to go removes the entry.
struct Lease<'a> {
    locks: &'a Mutex<LockMap>,
    robot_id: &'a RobotId,
    lock: Arc<Mutex<()>>,
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Claims are only cloned under the map lock, so a count of two
        // (map + this lease) means nobody else holds or awaits the mutex
        let last = locks
            .get(self.robot_id)
            .is_some_and(|entry| Arc::ptr_eq(entry, &self.lock) && Arc::strong_count(entry) == 2);
        if last {
            locks.remove(self.robot_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_entry_removed_after_use() {
        let locks = RobotCommandLocks::new();

        let inside = locks.with_lock(&RobotId::new("r-1"), || locks.len());

        assert_eq!(inside, 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_entry_removed_after_panic() {
        let locks = RobotCommandLocks::new();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            locks.with_lock(&RobotId::new("r-1"), || panic!("command failed"))
        }));

        assert!(result.is_err());
        assert!(locks.is_empty());
        assert_eq!(locks.with_lock(&RobotId::new("r-1"), || 7), 7);
    }

    #[test]
    fn test_different_robots_do_not_contend() {
        let locks = RobotCommandLocks::new();

        let nested = locks.with_lock(&RobotId::new("r-1"), || {
            locks.with_lock(&RobotId::new("r-2"), || locks.len())
        });

        assert_eq!(nested, 2);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_waiter_keeps_entry_alive() {
        let locks = RobotCommandLocks::new();
        let robot_id = RobotId::new("r-1");
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let (locks_ref, id_ref) = (&locks, &robot_id);

        thread::scope(|scope| {
            scope.spawn(move || {
                locks_ref.with_lock(id_ref, || {
                    entered_tx.send(()).unwrap();
                    release_rx.recv().unwrap();
                });
            });
            entered_rx.recv().unwrap();

            let waiter = scope.spawn(|| locks.with_lock(&robot_id, || locks.len()));
            // Give the waiter time to queue on the held mutex
            thread::sleep(std::time::Duration::from_millis(50));
            release_tx.send(()).unwrap();

            assert_eq!(waiter.join().unwrap(), 1);
        });

        assert!(locks.is_empty());
    }

    #[test]
    fn test_same_robot_commands_never_overlap() {
        let locks = RobotCommandLocks::new();
        let robot_id = RobotId::new("r-1");
        let active = Mutex::new(0_u32);
        let overlaps = Mutex::new(0_u32);

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        locks.with_lock(&robot_id, || {
                            let mut now = active.lock().unwrap();
                            *now += 1;
                            if *now > 1 {
                                *overlaps.lock().unwrap() += 1;
                            }
                            drop(now);
                            thread::yield_now();
                            *active.lock().unwrap() -= 1;
                        });
                    }
                });
            }
        });

        assert_eq!(*overlaps.lock().unwrap(), 0);
        assert!(locks.is_empty());
    }
}
