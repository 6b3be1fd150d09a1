//! Storage abstractions for the service layer.
//!
//! Contains the in-memory, capacity-bounded device store shared by all
//! request handlers for the lifetime of the process.

pub mod device_store;

pub use device_store::{DeviceStore, DuplicatePolicy, StoreError};
