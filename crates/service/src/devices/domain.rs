use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

static WORD_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").expect("compile word token pattern"));

/// Stored device record. `id` is assigned once, when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub model: String,
}

/// Create input. Any client-supplied `id` is dropped during decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDevice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
}

impl NewDevice {
    /// Name and brand must be non-empty word tokens; model is free-form.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errs = Vec::new();
        if !WORD_TOKEN.is_match(&self.name) {
            errs.push(format!("invalid device name {:?}", self.name));
        }
        if !WORD_TOKEN.is_match(&self.brand) {
            errs.push(format!("invalid device brand {:?}", self.brand));
        }
        if errs.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(errs.join("; ")))
        }
    }

    pub fn into_device(self, id: String) -> Device {
        Device { id, name: self.name, brand: self.brand, model: self.model }
    }
}
