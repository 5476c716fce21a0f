// crates/canopen-od-xdd/src/model/transport.rs

//! Contains model structs related to `<TransportLayers>`.
//! (Schema: `ProfileBody_CommunicationNetwork_CANopen.xsd`)

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TransportLayers {
    #[serde(rename = "PhysicalLayer", default)]
    pub physical_layer: PhysicalLayer,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct PhysicalLayer {
    #[serde(rename = "baudRate", default)]
    pub baud_rate: BaudRate,
}

/// Represents `<baudRate>` and the bit rates the device supports.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct BaudRate {
    #[serde(
        rename = "@defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    #[serde(rename = "supportedBaudRate", default)]
    pub supported_baud_rate: Vec<SupportedBaudRate>,
}

/// `<supportedBaudRate value="250 Kbps"/>`
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SupportedBaudRate {
    #[serde(rename = "@value")]
    pub value: String,
}
