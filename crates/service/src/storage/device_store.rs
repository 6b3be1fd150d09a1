use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use thiserror::Error;

use crate::devices::domain::Device;

/// Default number of records a store accepts before rejecting writes.
pub const DEFAULT_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store is full ({capacity} devices)")]
    CapacityExceeded { capacity: usize },
    #[error("device id {0} already exists")]
    DuplicateId(String),
}

/// What an insert does when the id is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    #[default]
    Overwrite,
    Reject,
}

/// In-memory device store bounded by a fixed capacity.
///
/// Reads take the shared side of the lock, inserts and deletes the
/// exclusive side, so the capacity check and the write of an insert happen
/// in one critical section. Every record handed out is a clone; nothing
/// outside the store can reach the map.
#[derive(Debug)]
pub struct DeviceStore {
    inner: RwLock<HashMap<String, Device>>,
    capacity: usize,
    duplicates: DuplicatePolicy,
}

impl Default for DeviceStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl DeviceStore {
    /// Create an empty store that overwrites on duplicate ids.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, DuplicatePolicy::Overwrite)
    }

    #[must_use]
    pub fn with_policy(capacity: usize, duplicates: DuplicatePolicy) -> Self {
        Self { inner: RwLock::new(HashMap::new()), capacity, duplicates }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of the device stored under `id`.
    pub fn get(&self, id: &str) -> Option<Device> {
        self.read().get(id).cloned()
    }

    /// Store `device` under its id and return a copy of what was stored.
    ///
    /// A full store rejects the insert even when the id is already present.
    pub fn insert(&self, device: Device) -> Result<Device, StoreError> {
        let mut map = self.write();
        if map.len() >= self.capacity {
            return Err(StoreError::CapacityExceeded { capacity: self.capacity });
        }
        if self.duplicates == DuplicatePolicy::Reject && map.contains_key(&device.id) {
            return Err(StoreError::DuplicateId(device.id));
        }
        map.insert(device.id.clone(), device.clone());
        Ok(device)
    }

    /// Remove the device stored under `id` and return it.
    pub fn delete(&self, id: &str) -> Option<Device> {
        self.write().remove(id)
    }

    // A panic while holding the guard cannot leave the map half-updated:
    // every critical section is a single HashMap call.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Device>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Device>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
