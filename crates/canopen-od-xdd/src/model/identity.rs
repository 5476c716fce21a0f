// crates/canopen-od-xdd/src/model/identity.rs

//! Contains model structs related to `<DeviceIdentity>`.
//! (Schema: `ProfileBody_Device_CANopen.xsd`)

use super::common::Glabels;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents a `<version>` element within `<DeviceIdentity>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Version {
    /// "SW", "FW" or "HW".
    #[serde(rename = "@versionType")]
    pub version_type: String,

    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Represents the `<DeviceIdentity>` block in the Device Profile.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DeviceIdentity {
    #[serde(rename = "vendorName", default)]
    pub vendor_name: String,

    /// Hex with `0x` prefix, e.g. "0x000001A5".
    #[serde(rename = "vendorID", default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,

    #[serde(rename = "productName", default)]
    pub product_name: String,

    #[serde(rename = "productID", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(
        rename = "productText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_text: Option<Glabels>,

    #[serde(rename = "orderNumber", default, skip_serializing_if = "Vec::is_empty")]
    pub order_number: Vec<String>,

    #[serde(rename = "version", default, skip_serializing_if = "Vec::is_empty")]
    pub version: Vec<Version>,
}
