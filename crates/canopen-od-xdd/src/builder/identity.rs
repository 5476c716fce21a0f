// crates/canopen-od-xdd/src/builder/identity.rs

//! Device level data: file attributes, identity, dummy usage, bit rates and
//! network management features.

use crate::model::app_layers::{CanOpenIdentity, Dummy, DummyUsage};
use crate::model::common::Glabels;
use crate::model::identity::DeviceIdentity;
use crate::model::net_mgmt::{
    CanOpenGeneralFeatures, CanOpenMasterFeatures, DeviceCommissioning, NetworkManagement,
};
use crate::model::transport::{BaudRate, PhysicalLayer, SupportedBaudRate, TransportLayers};
use crate::model::ProfileBody;
use crate::timestamp::to_xsd;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use canopen_od::device::BaudRates;
use canopen_od::{DeviceInfo, Diagnostics, FileInfo};

/// The file attributes written on both profile bodies.
#[derive(Debug, Clone, Default)]
pub(super) struct FileAttributes {
    file_name: Option<String>,
    file_creator: Option<String>,
    creation_date: Option<String>,
    creation_time: Option<String>,
    modification_date: Option<String>,
    modification_time: Option<String>,
    modified_by: Option<String>,
    file_version: Option<String>,
}

impl FileAttributes {
    pub(super) fn new(info: &FileInfo, diag: &mut Diagnostics) -> Self {
        let (creation_date, creation_time) = to_xsd(&info.creation_date, &info.creation_time, diag);
        let (modification_date, modification_time) =
            to_xsd(&info.modification_date, &info.modification_time, diag);
        Self {
            file_name: non_empty(&info.file_name),
            file_creator: non_empty(&info.created_by),
            creation_date,
            creation_time,
            modification_date,
            modification_time,
            modified_by: non_empty(&info.modified_by),
            file_version: Some(format!("{}.{}", info.file_version, info.file_revision)),
        }
    }

    /// An otherwise empty profile body of type `xsi_type`.
    pub(super) fn body(&self, xsi_type: &str) -> ProfileBody {
        let attrs = self.clone();
        ProfileBody {
            xsi_type: Some(xsi_type.into()),
            file_name: attrs.file_name,
            file_creator: attrs.file_creator,
            file_creation_date: attrs.creation_date,
            file_creation_time: attrs.creation_time,
            file_modification_date: attrs.modification_date,
            file_modification_time: attrs.modification_time,
            file_modified_by: attrs.modified_by,
            file_version: attrs.file_version,
            supported_languages: Some("en".into()),
            ..Default::default()
        }
    }
}

pub(super) fn build_device_identity(file_info: &FileInfo, info: &DeviceInfo) -> DeviceIdentity {
    DeviceIdentity {
        vendor_name: info.vendor_name.clone(),
        vendor_id: Some(format!("0x{:08X}", info.vendor_number)),
        product_name: info.product_name.clone(),
        product_id: Some(format!("0x{:08X}", info.product_number)),
        product_text: (!file_info.description.is_empty())
            .then(|| Glabels::description(&file_info.description)),
        order_number: if info.order_code.is_empty() {
            Vec::new()
        } else {
            vec![info.order_code.clone()]
        },
        version: Vec::new(),
    }
}

pub(super) fn build_comm_identity(info: &DeviceInfo) -> CanOpenIdentity {
    CanOpenIdentity {
        vendor_id: Some(format!("0x{:08X}", info.vendor_number)),
        product_id: Some(format!("0x{:08X}", info.product_number)),
        revision_number: Some(format!("0x{:08X}", info.revision_number)),
    }
}

pub(super) fn build_dummy_usage(usage: &BTreeMap<u16, bool>) -> Option<DummyUsage> {
    if usage.is_empty() {
        return None;
    }
    let dummy = usage
        .iter()
        .map(|(index, used)| Dummy {
            entry: format!("Dummy{:04X}={}", index, u8::from(*used)),
        })
        .collect();
    Some(DummyUsage { dummy })
}

pub fn baud_rate_text(kbit: u16) -> String {
    format!("{} Kbps", kbit)
}

pub(super) fn build_transport_layers(rates: &BaudRates) -> TransportLayers {
    let supported_baud_rate = BaudRates::RATES
        .iter()
        .filter(|kbit| rates.get(**kbit))
        .map(|kbit| SupportedBaudRate {
            value: baud_rate_text(*kbit),
        })
        .collect();
    TransportLayers {
        physical_layer: PhysicalLayer {
            baud_rate: BaudRate {
                default_value: None,
                supported_baud_rate,
            },
        },
    }
}

/// `nr_of_rx_pdo`/`nr_of_tx_pdo` are expected to be up to date; the caller
/// recounts them from the Object Dictionary.
pub(super) fn build_network_management(
    info: &DeviceInfo,
    commissioning: Option<&canopen_od::DeviceCommissioning>,
) -> NetworkManagement {
    NetworkManagement {
        general_features: CanOpenGeneralFeatures {
            group_messaging: info.group_messaging,
            dynamic_channels: info.dynamic_channels_supported,
            granularity: info.granularity,
            nr_of_rx_pdo: info.nr_of_rx_pdo,
            nr_of_tx_pdo: info.nr_of_tx_pdo,
            boot_up_slave: info.simple_boot_up_slave,
            layer_setting_service_slave: info.lss_supported,
            ng_slave: info.ng_slave,
            ng_master: info.ng_master,
            nr_of_ng_monitored_nodes: info.nr_of_ng_monitored_nodes,
        },
        master_features: Some(CanOpenMasterFeatures {
            boot_up_master: info.simple_boot_up_master,
        }),
        device_commissioning: commissioning.map(|c| DeviceCommissioning {
            node_id: c.node_id,
            node_name: c.node_name.clone(),
            actual_baud_rate: if c.baudrate == 0 {
                String::new()
            } else {
                baud_rate_text(c.baudrate)
            },
            network_number: c.net_number,
            network_name: c.network_name.clone(),
            canopen_manager: c.canopen_manager,
        }),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.into())
}
