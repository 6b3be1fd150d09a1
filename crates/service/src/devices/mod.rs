//! Devices module: domain types, repository seam, identifier generation and
//! the device service the HTTP layer calls into.

pub mod domain;
pub mod ids;
pub mod repository;
pub mod service;

pub use domain::{Device, NewDevice};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use repository::DeviceRepository;
pub use service::DeviceService;
