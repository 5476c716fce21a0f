// crates/canopen-od-xdd/src/model/app_layers.rs

//! Contains model structs related to `<ApplicationLayers>`.
//! (Schema: `ProfileBody_CommunicationNetwork_CANopen.xsd`)

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Identity, Object Dictionary and dummy usage of the device.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ApplicationLayers {
    #[serde(rename = "identity", default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<CanOpenIdentity>,

    #[serde(rename = "CANopenObjectList", default)]
    pub object_list: CanOpenObjectList,

    #[serde(rename = "dummyUsage", default, skip_serializing_if = "Option::is_none")]
    pub dummy_usage: Option<DummyUsage>,
}

/// Represents `<identity>`: the values of object 0x1018.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CanOpenIdentity {
    #[serde(rename = "vendorID", default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,

    #[serde(rename = "productID", default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    #[serde(
        rename = "revisionNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub revision_number: Option<String>,
}

/// A list of all Object Dictionary entries.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CanOpenObjectList {
    #[serde(rename = "CANopenObject", default)]
    pub object: Vec<CanOpenObject>,
}

/// Access types of an object / subobject (`t_accessType`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAccessType {
    #[serde(rename = "ro")]
    ReadOnly,
    #[serde(rename = "wo")]
    WriteOnly,
    #[serde(rename = "rw")]
    ReadWrite,
    #[serde(rename = "rwr")]
    ReadWriteTpdo,
    #[serde(rename = "rww")]
    ReadWriteRpdo,
    #[serde(rename = "const")]
    Constant,
}

/// Ability to map an object / subobject to a PDO (`t_PDOmapping`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ObjectPdoMapping {
    #[serde(rename = "no")]
    No,
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "optional")]
    Optional,
    #[serde(rename = "TPDO")]
    Tpdo,
    #[serde(rename = "RPDO")]
    Rpdo,
}

/// Represents `<CANopenObject index="1018" .../>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CanOpenObject {
    /// The OD index as a hex string (e.g., "1018").
    #[serde(rename = "@index")]
    pub index: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    /// The object code in decimal (e.g., "9" for RECORD).
    #[serde(rename = "@objectType", default)]
    pub object_type: String,

    /// The data type code as hex (e.g., "0007").
    #[serde(rename = "@dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(rename = "@lowLimit", default, skip_serializing_if = "Option::is_none")]
    pub low_limit: Option<String>,

    #[serde(
        rename = "@highLimit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub high_limit: Option<String>,

    #[serde(
        rename = "@accessType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_type: Option<ObjectAccessType>,

    #[serde(
        rename = "@defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    /// Only written to XDC files.
    #[serde(
        rename = "@actualValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_value: Option<String>,

    #[serde(
        rename = "@PDOmapping",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pdo_mapping: Option<ObjectPdoMapping>,

    /// Object flags as hex (e.g., "0002").
    #[serde(rename = "@objFlags", default, skip_serializing_if = "Option::is_none")]
    pub obj_flags: Option<String>,

    /// References a parameter's uniqueID in the ApplicationProcess.
    #[serde(
        rename = "@uniqueIDRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unique_id_ref: Option<String>,

    /// Number of sub-objects, for ARRAY and RECORD.
    #[serde(
        rename = "@subNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_number: Option<u16>,

    #[serde(rename = "CANopenSubObject", default, skip_serializing_if = "Vec::is_empty")]
    pub sub_object: Vec<CanOpenSubObject>,
}

/// Represents `<CANopenSubObject subIndex="01" .../>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CanOpenSubObject {
    /// The OD sub-index as a hex string (e.g., "01").
    #[serde(rename = "@subIndex")]
    pub sub_index: String,

    #[serde(rename = "@name", default)]
    pub name: String,

    #[serde(rename = "@objectType", default)]
    pub object_type: String,

    #[serde(rename = "@dataType", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(rename = "@lowLimit", default, skip_serializing_if = "Option::is_none")]
    pub low_limit: Option<String>,

    #[serde(
        rename = "@highLimit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub high_limit: Option<String>,

    #[serde(
        rename = "@accessType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_type: Option<ObjectAccessType>,

    #[serde(
        rename = "@defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    #[serde(
        rename = "@actualValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_value: Option<String>,

    #[serde(
        rename = "@PDOmapping",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pdo_mapping: Option<ObjectPdoMapping>,

    #[serde(rename = "@objFlags", default, skip_serializing_if = "Option::is_none")]
    pub obj_flags: Option<String>,

    #[serde(
        rename = "@uniqueIDRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unique_id_ref: Option<String>,
}

/// Represents `<dummyUsage>` with its `<dummy entry="Dummy0002=1"/>` children.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DummyUsage {
    #[serde(rename = "dummy", default)]
    pub dummy: Vec<Dummy>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Dummy {
    #[serde(rename = "@entry")]
    pub entry: String,
}
