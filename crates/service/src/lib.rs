//! Service layer for the device API.
//! - `storage` holds the capacity-bounded in-memory device store.
//! - `devices` holds the domain types and the framework-independent device service.
//! - Provides clear error types and documented interfaces.

pub mod devices;
pub mod errors;
pub mod storage;
