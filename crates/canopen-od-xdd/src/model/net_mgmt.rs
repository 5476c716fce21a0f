// crates/canopen-od-xdd/src/model/net_mgmt.rs

//! Contains model structs related to `<NetworkManagement>`.
//! (Schema: `ProfileBody_CommunicationNetwork_CANopen.xsd`)

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Represents the `<NetworkManagement>` block.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct NetworkManagement {
    #[serde(rename = "CANopenGeneralFeatures", default)]
    pub general_features: CanOpenGeneralFeatures,

    #[serde(
        rename = "CANopenMasterFeatures",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub master_features: Option<CanOpenMasterFeatures>,

    /// Present in XDC files only.
    #[serde(
        rename = "deviceCommissioning",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_commissioning: Option<DeviceCommissioning>,
}

/// Represents `<CANopenGeneralFeatures>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CanOpenGeneralFeatures {
    #[serde(rename = "@groupMessaging", default)]
    pub group_messaging: bool,

    #[serde(rename = "@dynamicChannels", default)]
    pub dynamic_channels: u8,

    #[serde(rename = "@granularity", default)]
    pub granularity: u8,

    #[serde(rename = "@nrOfRxPDO", default)]
    pub nr_of_rx_pdo: u16,

    #[serde(rename = "@nrOfTxPDO", default)]
    pub nr_of_tx_pdo: u16,

    #[serde(rename = "@bootUpSlave", default)]
    pub boot_up_slave: bool,

    #[serde(rename = "@layerSettingServiceSlave", default)]
    pub layer_setting_service_slave: bool,

    #[serde(rename = "@ngSlave", default)]
    pub ng_slave: bool,

    #[serde(rename = "@ngMaster", default)]
    pub ng_master: bool,

    #[serde(rename = "@NrOfNG_MonitoredNodes", default)]
    pub nr_of_ng_monitored_nodes: u8,
}

/// Represents `<CANopenMasterFeatures>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CanOpenMasterFeatures {
    #[serde(rename = "@bootUpMaster", default)]
    pub boot_up_master: bool,
}

/// Represents `<deviceCommissioning>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DeviceCommissioning {
    #[serde(rename = "@nodeID", default)]
    pub node_id: u8,

    #[serde(rename = "@nodeName", default)]
    pub node_name: String,

    /// e.g. "250 Kbps"
    #[serde(rename = "@actualBaudRate", default)]
    pub actual_baud_rate: String,

    #[serde(rename = "@networkNumber", default)]
    pub network_number: u32,

    #[serde(rename = "@networkName", default)]
    pub network_name: String,

    #[serde(rename = "@CANopenManager", default)]
    pub canopen_manager: bool,
}
