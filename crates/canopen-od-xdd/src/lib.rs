// crates/canopen-od-xdd/src/lib.rs

#![no_std]
#![doc = "Reads and writes CANopen XDD (device description) and XDC (device configuration) files."]
#![doc = ""]
#![doc = "This `no_std + alloc` library converts between the CiA 311 XML schema and"]
#![doc = "the `canopen_od::Device` model."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_xdd_from_str`: Parsing an XDD or XDC document into a `Device`."]
#![doc = "- `load_multi_from_str`: Parsing an `ISO15745ProfileContainerList`."]
#![doc = "- `save_xdd_to_string` / `save_xdc_to_string`: Serializing a `Device`."]
#![doc = "- `save_multi_to_string`: Serializing several devices into one container list."]

extern crate alloc;

// --- Crate Modules ---

mod access;
mod builder;
mod datatype;
mod error;
mod model;
mod parser;
mod properties;
mod resolver;
mod timestamp;

use alloc::string::String;
use canopen_od::{Device, Diagnostics};

// --- Public API Re-exports ---

pub use builder::{baud_rate_text, object_unique_id, save_multi_to_string, save_to_string, sub_unique_id};
pub use error::XddError;
pub use parser::{load_multi_from_str, load_xdd_from_str};

/// Which flavour of document to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XddKind {
    /// Device description: default values only.
    #[default]
    Xdd,
    /// Device configuration: adds actual values and `<deviceCommissioning>`.
    Xdc,
}

/// Serializes a device as an XDD.
pub fn save_xdd_to_string(device: &Device, diag: &mut Diagnostics) -> Result<String, XddError> {
    save_to_string(device, XddKind::Xdd, diag)
}

/// Serializes a device as an XDC.
pub fn save_xdc_to_string(device: &Device, diag: &mut Diagnostics) -> Result<String, XddError> {
    save_to_string(device, XddKind::Xdc, diag)
}
