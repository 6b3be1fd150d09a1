use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{Device, NewDevice};
use super::ids::IdGenerator;
use super::repository::DeviceRepository;
use crate::errors::ServiceError;
use crate::storage::StoreError;

/// Device business service independent of web framework
#[derive(Clone)]
pub struct DeviceService {
    repo: Arc<dyn DeviceRepository>,
    ids: Arc<dyn IdGenerator>,
}

impl DeviceService {
    pub fn new(repo: Arc<dyn DeviceRepository>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    /// Validate the input, assign a fresh id and store the device.
    ///
    /// # Examples
    /// ```
    /// use service::devices::{DeviceService, NewDevice, SequentialIds};
    /// use service::storage::DeviceStore;
    /// use std::sync::Arc;
    /// let svc = DeviceService::new(Arc::new(DeviceStore::new(10)), Arc::new(SequentialIds::default()));
    /// let input = NewDevice { name: "Phone".into(), brand: "Apple".into(), model: "13 Pro Max".into() };
    /// let device = svc.create(input).unwrap();
    /// assert_eq!(device.id, "1");
    /// assert_eq!(svc.get("1").unwrap(), device);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name, brand = %input.brand))]
    pub fn create(&self, input: NewDevice) -> Result<Device, ServiceError> {
        if let Err(e) = input.validate() {
            debug!(error = %e, "device_rejected");
            return Err(e);
        }
        let device = input.into_device(self.ids.next_id());
        match self.repo.insert(device) {
            Ok(stored) => {
                info!(id = %stored.id, "device_created");
                Ok(stored)
            }
            Err(e @ StoreError::CapacityExceeded { .. }) => {
                warn!(error = %e, "device_store_full");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Result<Device, ServiceError> {
        let id = require_id(id)?;
        self.repo.get(id).ok_or_else(|| ServiceError::not_found("device", id))
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<Device, ServiceError> {
        let id = require_id(id)?;
        let removed = self.repo.delete(id).ok_or_else(|| ServiceError::not_found("device", id))?;
        info!(id = %removed.id, "device_deleted");
        Ok(removed)
    }

    /// Number of devices currently stored.
    pub fn stored(&self) -> usize {
        self.repo.count()
    }
}

fn require_id(id: &str) -> Result<&str, ServiceError> {
    if id.trim().is_empty() {
        return Err(ServiceError::Validation("device id must not be empty".into()));
    }
    Ok(id)
}
