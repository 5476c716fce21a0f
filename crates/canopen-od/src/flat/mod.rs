// crates/canopen-od/src/flat/mod.rs
//! Flat device tree: `objects[hexIndex].sub_objects[hexSubIndex]`, used to
//! store or ship a device outside the EDS/XDD formats.
//!
//! The tree derives serde; JSON helpers are provided, any other serde
//! format can be used on [`FlatDevice`] directly.

mod mapper;
mod timestamp;

pub use mapper::{from_device, index_key, parse_index_key, parse_sub_key, sub_key, to_device};
pub use timestamp::{combine_date_time, split_date_time};

use crate::od::{AccessPdo, AccessSdo, AccessSrdo, DataType};
use crate::OdError;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Object type as seen by the flat tree. DOMAIN, DEFTYPE, DEFSTRUCT, NULL
/// and unknown objects all become `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatObjectType {
    #[default]
    Unspecified,
    Var,
    Array,
    Record,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatFileInfo {
    pub file_name: String,
    pub file_version: u8,
    pub file_revision: u8,
    pub eds_version: String,
    pub description: String,
    pub creation_time: Option<NaiveDateTime>,
    pub created_by: String,
    pub modification_time: Option<NaiveDateTime>,
    pub modified_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatDeviceInfo {
    pub vendor_name: String,
    pub vendor_number: u32,
    pub product_name: String,
    pub product_number: u32,
    pub revision_number: u32,
    pub order_code: String,
    /// Supported bit rates in kbit/s.
    pub baud_rates: Vec<u16>,
    pub simple_boot_up_master: bool,
    pub simple_boot_up_slave: bool,
    pub granularity: u8,
    pub dynamic_channels_supported: u8,
    pub compact_pdo: u8,
    pub group_messaging: bool,
    pub lss_supported: bool,
    pub ng_slave: bool,
    pub ng_master: bool,
    pub nr_of_ng_monitored_nodes: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatDeviceCommissioning {
    pub node_id: u8,
    pub node_name: String,
    pub baudrate: u16,
    pub net_number: u32,
    pub network_name: String,
    pub canopen_manager: bool,
    pub lss_serial_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatSubObject {
    pub name: String,
    pub data_type: DataType,
    pub sdo: AccessSdo,
    pub pdo: AccessPdo,
    /// Set for `const` entries, which otherwise read back as `ro`.
    pub constant: bool,
    pub srdo: AccessSrdo,
    pub default_value: String,
    pub actual_value: String,
    pub low_limit: String,
    pub high_limit: String,
    pub string_length_min: u32,
}

impl Default for FlatSubObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_type: DataType::Unknown,
            sdo: AccessSdo::No,
            pdo: AccessPdo::No,
            constant: false,
            srdo: AccessSrdo::No,
            default_value: String::new(),
            actual_value: String::new(),
            low_limit: String::new(),
            high_limit: String::new(),
            string_length_min: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatObject {
    pub disabled: bool,
    pub name: String,
    pub description: String,
    pub object_type: FlatObjectType,
    pub count_label: String,
    pub storage_group: String,
    pub flags_pdo: bool,
    /// Keyed by `"0x{:02X}"`. A VAR keeps its value in `"0x00"`.
    pub sub_objects: BTreeMap<String, FlatSubObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlatDevice {
    pub file_info: FlatFileInfo,
    pub device_info: FlatDeviceInfo,
    pub device_commissioning: FlatDeviceCommissioning,
    /// Keyed by `"0x{:04X}"`.
    pub objects: BTreeMap<String, FlatObject>,
}

// --- JSON wire form ---

pub fn to_json(device: &FlatDevice) -> Result<String, OdError> {
    Ok(serde_json::to_string(device)?)
}

pub fn to_json_pretty(device: &FlatDevice) -> Result<String, OdError> {
    Ok(serde_json::to_string_pretty(device)?)
}

pub fn from_json(text: &str) -> Result<FlatDevice, OdError> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_json_bytes(device: &FlatDevice) -> Result<Vec<u8>, OdError> {
    Ok(serde_json::to_vec(device)?)
}

pub fn from_json_bytes(bytes: &[u8]) -> Result<FlatDevice, OdError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let mut device = FlatDevice::default();
        let mut object = FlatObject {
            name: "Heartbeat".into(),
            object_type: FlatObjectType::Var,
            ..Default::default()
        };
        object.sub_objects.insert(
            "0x00".into(),
            FlatSubObject {
                data_type: DataType::Unsigned16,
                sdo: AccessSdo::Rw,
                ..Default::default()
            },
        );
        device.objects.insert("0x1017".into(), object);

        let json = to_json(&device).unwrap();
        assert!(json.contains("\"0x1017\""));
        assert!(json.contains("\"subObjects\""));
        assert!(json.contains("\"dataType\":\"UNSIGNED16\""));
        assert!(json.contains("\"sdo\":\"rw\""));
        assert!(json.contains("\"objectType\":\"var\""));
        assert_eq!(from_json(&json).unwrap(), device);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let device = from_json_bytes(br#"{"objects":{"0x2000":{"name":"X"}}}"#).unwrap();
        let object = &device.objects["0x2000"];
        assert_eq!(object.object_type, FlatObjectType::Unspecified);
        assert!(object.sub_objects.is_empty());
        assert!(device.file_info.creation_time.is_none());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(from_json("{\"objects\": 3}"), Err(OdError::Json(_))));
    }
}
