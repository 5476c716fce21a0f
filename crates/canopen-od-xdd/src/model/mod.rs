// crates/canopen-od-xdd/src/model/mod.rs

//! Internal `serde` data structures that map directly to the CiA 311 XDD/XDC schema.
//!
//! These structs are annotated for `quick-xml` and are not intended for
//! direct public use; the resolver and builder translate them from and to
//! a `canopen_od::Device`.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub mod app_layers;
pub mod app_process;
pub mod common;
pub mod header;
pub mod identity;
pub mod net_mgmt;
pub mod transport;

pub use app_layers::ApplicationLayers;
pub use app_process::ApplicationProcess;
pub use header::ProfileHeader;
pub use identity::DeviceIdentity;
pub use net_mgmt::NetworkManagement;
pub use transport::TransportLayers;

pub const XSI_TYPE_DEVICE: &str = "ProfileBody_Device_CANopen";
pub const XSI_TYPE_COMM: &str = "ProfileBody_CommunicationNetwork_CANopen";

/// The root element of an XDD/XDC file.
///
/// Represents the `<ISO15745ProfileContainer>` element defined in `ISO15745ProfileContainer.xsd`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "ISO15745ProfileContainer")]
pub struct Iso15745ProfileContainer {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: String,

    #[serde(rename = "@xmlns:xsi", default)]
    pub xmlns_xsi: String,

    #[serde(rename = "@xsi:schemaLocation", default)]
    pub xsi_schema_location: String,

    /// Usually one Device Profile and one Communication Profile.
    #[serde(rename = "ISO15745Profile", default)]
    pub profile: Vec<Iso15745Profile>,
}

impl Default for Iso15745ProfileContainer {
    fn default() -> Self {
        Self {
            xmlns: "http://www.canopen.org/xml/1.1".into(),
            xmlns_xsi: "http://www.w3.org/2001/XMLSchema-instance".into(),
            xsi_schema_location: "http://www.canopen.org/xml/1.1 CANopen.xsd".into(),
            profile: Vec::new(),
        }
    }
}

/// `<ISO15745ProfileContainerList>`: several device descriptions in one file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename = "ISO15745ProfileContainerList")]
pub struct Iso15745ProfileContainerList {
    #[serde(rename = "@version", default)]
    pub version: String,

    #[serde(rename = "ISO15745ProfileContainer", default)]
    pub container: Vec<Iso15745ProfileContainer>,
}

impl Default for Iso15745ProfileContainerList {
    fn default() -> Self {
        Self {
            version: "1.1".into(),
            container: Vec::new(),
        }
    }
}

/// Represents a single profile within the container.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Iso15745Profile {
    #[serde(rename = "ProfileHeader", default)]
    pub profile_header: ProfileHeader,

    #[serde(rename = "ProfileBody")]
    pub profile_body: ProfileBody,
}

/// The body of a profile, holding either the Device or the
/// CommunicationNetwork part. Both kinds carry the file attributes.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProfileBody {
    /// Identifies the type of profile body (e.g., "ProfileBody_Device_CANopen").
    #[serde(rename = "@xsi:type", default, skip_serializing_if = "Option::is_none")]
    pub xsi_type: Option<String>,

    #[serde(rename = "@fileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(rename = "@fileCreator", default, skip_serializing_if = "Option::is_none")]
    pub file_creator: Option<String>,

    /// xsd:date, e.g. "2021-03-14".
    #[serde(
        rename = "@fileCreationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub file_creation_date: Option<String>,

    /// xsd:time, e.g. "21:05:00".
    #[serde(
        rename = "@fileCreationTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub file_creation_time: Option<String>,

    #[serde(
        rename = "@fileModificationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub file_modification_date: Option<String>,

    #[serde(
        rename = "@fileModificationTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub file_modification_time: Option<String>,

    #[serde(
        rename = "@fileModifiedBy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub file_modified_by: Option<String>,

    /// "<version>.<revision>"
    #[serde(rename = "@fileVersion", default, skip_serializing_if = "Option::is_none")]
    pub file_version: Option<String>,

    #[serde(
        rename = "@supportedLanguages",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub supported_languages: Option<String>,

    /// Present in Device Profiles.
    #[serde(
        rename = "DeviceIdentity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_identity: Option<DeviceIdentity>,

    /// Present in Device Profiles (holds the parameter list).
    #[serde(
        rename = "ApplicationProcess",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub application_process: Option<ApplicationProcess>,

    /// Present in Communication Network Profiles (holds the object list).
    #[serde(
        rename = "ApplicationLayers",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub application_layers: Option<ApplicationLayers>,

    #[serde(
        rename = "TransportLayers",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transport_layers: Option<TransportLayers>,

    #[serde(
        rename = "NetworkManagement",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub network_management: Option<NetworkManagement>,
}
