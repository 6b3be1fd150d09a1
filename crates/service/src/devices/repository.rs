use super::domain::Device;
use crate::storage::{DeviceStore, StoreError};

/// Storage seam between the device service and the backing store.
pub trait DeviceRepository: Send + Sync {
    fn get(&self, id: &str) -> Option<Device>;
    fn insert(&self, device: Device) -> Result<Device, StoreError>;
    fn delete(&self, id: &str) -> Option<Device>;
    fn count(&self) -> usize;
}

impl DeviceRepository for DeviceStore {
    fn get(&self, id: &str) -> Option<Device> {
        DeviceStore::get(self, id)
    }

    fn insert(&self, device: Device) -> Result<Device, StoreError> {
        DeviceStore::insert(self, device)
    }

    fn delete(&self, id: &str) -> Option<Device> {
        DeviceStore::delete(self, id)
    }

    fn count(&self) -> usize {
        DeviceStore::len(self)
    }
}
