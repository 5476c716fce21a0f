// crates/canopen-od-xdd/src/resolver/identity.rs

use super::utils::{parse_baud_rate, parse_u32};
use crate::model::app_layers::{CanOpenIdentity, DummyUsage};
use crate::model::common::first_description;
use crate::model::identity::DeviceIdentity;
use crate::model::net_mgmt::{self, NetworkManagement};
use crate::model::transport::TransportLayers;
use crate::model::ProfileBody;
use crate::timestamp::from_xsd;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use canopen_od::device::BaudRates;
use canopen_od::{DeviceCommissioning, DeviceInfo, Diagnostics, FileInfo, WarningKind};
use log::debug;

/// File attributes of a profile body. `@fileVersion` is "<version>.<revision>".
pub(super) fn resolve_file_info(
    body: &ProfileBody,
    identity: Option<&DeviceIdentity>,
    diag: &mut Diagnostics,
) -> FileInfo {
    let (creation_date, creation_time) = from_xsd(
        body.file_creation_date.as_deref(),
        body.file_creation_time.as_deref(),
        diag,
    );
    let (modification_date, modification_time) = from_xsd(
        body.file_modification_date.as_deref(),
        body.file_modification_time.as_deref(),
        diag,
    );

    let mut info = FileInfo {
        file_name: body.file_name.clone().unwrap_or_default(),
        created_by: body.file_creator.clone().unwrap_or_default(),
        modified_by: body.file_modified_by.clone().unwrap_or_default(),
        creation_date,
        creation_time,
        modification_date,
        modification_time,
        description: identity
            .and_then(|i| i.product_text.as_ref())
            .and_then(|t| first_description(&t.description))
            .map(String::from)
            .unwrap_or_default(),
        ..FileInfo::default()
    };

    if let Some(text) = body.file_version.as_deref() {
        let mut parts = text.trim().splitn(2, '.');
        let version = parts.next().and_then(|v| v.trim().parse::<u8>().ok());
        let revision = parts.next().map(|r| r.trim().parse::<u8>().ok());
        match (version, revision) {
            (Some(v), None) => info.file_version = v,
            (Some(v), Some(Some(r))) => {
                info.file_version = v;
                info.file_revision = r;
            }
            _ => diag.push(
                WarningKind::ValueConversion,
                format!("fileVersion '{}' is not <version>.<revision>", text),
            ),
        }
    }
    info
}

/// Identity, bit rates and network features. Numbers in `<DeviceIdentity>`
/// win over those in the communication profile's `<identity>`.
pub(super) fn resolve_device_info(
    identity: Option<&DeviceIdentity>,
    comm_identity: Option<&CanOpenIdentity>,
    transport: Option<&TransportLayers>,
    net: Option<&NetworkManagement>,
    diag: &mut Diagnostics,
) -> DeviceInfo {
    let mut info = DeviceInfo::default();

    if let Some(identity) = identity {
        info.vendor_name = identity.vendor_name.clone();
        info.product_name = identity.product_name.clone();
        info.order_code = identity.order_number.first().cloned().unwrap_or_default();
    }

    let vendor_id = identity
        .and_then(|i| i.vendor_id.as_deref())
        .or_else(|| comm_identity.and_then(|c| c.vendor_id.as_deref()));
    if let Some(text) = vendor_id {
        info.vendor_number = parse_u32(text, "vendorID", diag);
    }
    let product_id = identity
        .and_then(|i| i.product_id.as_deref())
        .or_else(|| comm_identity.and_then(|c| c.product_id.as_deref()));
    if let Some(text) = product_id {
        info.product_number = parse_u32(text, "productID", diag);
    }
    if let Some(text) = comm_identity.and_then(|c| c.revision_number.as_deref()) {
        info.revision_number = parse_u32(text, "revisionNumber", diag);
    }

    if let Some(transport) = transport {
        info.baud_rates = resolve_baud_rates(transport);
    }

    if let Some(net) = net {
        let general = &net.general_features;
        info.group_messaging = general.group_messaging;
        info.dynamic_channels_supported = general.dynamic_channels;
        info.granularity = general.granularity;
        info.nr_of_rx_pdo = general.nr_of_rx_pdo;
        info.nr_of_tx_pdo = general.nr_of_tx_pdo;
        info.simple_boot_up_slave = general.boot_up_slave;
        info.lss_supported = general.layer_setting_service_slave;
        info.ng_slave = general.ng_slave;
        info.ng_master = general.ng_master;
        info.nr_of_ng_monitored_nodes = general.nr_of_ng_monitored_nodes;
        info.simple_boot_up_master = net
            .master_features
            .as_ref()
            .is_some_and(|m| m.boot_up_master);
    }
    info
}

fn resolve_baud_rates(transport: &TransportLayers) -> BaudRates {
    let mut rates = BaudRates::default();
    for supported in &transport.physical_layer.baud_rate.supported_baud_rate {
        match parse_baud_rate(&supported.value) {
            Some(kbit) if BaudRates::RATES.contains(&kbit) => rates.set(kbit, true),
            _ => debug!("XDD: skipping supportedBaudRate '{}'", supported.value),
        }
    }
    rates
}

/// `<deviceCommissioning>` of an XDC. `lss_serial_number` has no XML
/// counterpart and stays 0.
pub(super) fn resolve_commissioning(
    commissioning: Option<&net_mgmt::DeviceCommissioning>,
) -> DeviceCommissioning {
    let Some(c) = commissioning else {
        return DeviceCommissioning::default();
    };
    DeviceCommissioning {
        node_id: c.node_id,
        node_name: c.node_name.clone(),
        baudrate: parse_baud_rate(&c.actual_baud_rate).unwrap_or(0),
        net_number: c.network_number,
        network_name: c.network_name.clone(),
        canopen_manager: c.canopen_manager,
        lss_serial_number: 0,
    }
}

/// Parses each "Dummy0002=1" entry.
pub(super) fn resolve_dummy_usage(
    usage: Option<&DummyUsage>,
    diag: &mut Diagnostics,
) -> BTreeMap<u16, bool> {
    let mut out = BTreeMap::new();
    let Some(usage) = usage else {
        return out;
    };
    for dummy in &usage.dummy {
        let parsed = dummy
            .entry
            .trim()
            .strip_prefix("Dummy")
            .and_then(|rest| rest.split_once('='))
            .and_then(|(index, flag)| {
                let index = u16::from_str_radix(index.trim(), 16).ok()?;
                match flag.trim() {
                    "0" => Some((index, false)),
                    "1" => Some((index, true)),
                    _ => None,
                }
            });
        match parsed {
            Some((index, used)) => {
                out.insert(index, used);
            }
            None => diag.push(
                WarningKind::ValueConversion,
                format!("dummyUsage entry '{}' is not DummyXXXX=0|1", dummy.entry),
            ),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::app_layers::Dummy;
    use crate::model::common::Glabels;
    use crate::model::transport::{BaudRate, PhysicalLayer, SupportedBaudRate};
    use alloc::vec;

    #[test]
    fn test_file_info() {
        let body = ProfileBody {
            file_name: Some("node.xdd".into()),
            file_creator: Some("jdoe".into()),
            file_creation_date: Some("2021-03-14".into()),
            file_creation_time: Some("21:05:00".into()),
            file_version: Some("2.3".into()),
            ..Default::default()
        };
        let identity = DeviceIdentity {
            product_text: Some(Glabels::description("8 channel IO")),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let info = resolve_file_info(&body, Some(&identity), &mut diag);
        assert_eq!(info.file_name, "node.xdd");
        assert_eq!(info.created_by, "jdoe");
        assert_eq!(info.creation_date, "03-14-2021");
        assert_eq!(info.creation_time, "9:05PM");
        assert_eq!(info.modification_date, "");
        assert_eq!((info.file_version, info.file_revision), (2, 3));
        assert_eq!(info.description, "8 channel IO");
        assert!(diag.is_empty());
    }

    #[test]
    fn test_bad_file_version() {
        let body = ProfileBody {
            file_version: Some("v2".into()),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let info = resolve_file_info(&body, None, &mut diag);
        assert_eq!((info.file_version, info.file_revision), (1, 0));
        assert_eq!(diag.count(WarningKind::ValueConversion), 1);
    }

    #[test]
    fn test_identity_fallback_and_rates() {
        let comm = CanOpenIdentity {
            vendor_id: Some("0x000001A5".into()),
            product_id: Some("0x00000010".into()),
            revision_number: Some("0x00020001".into()),
        };
        let identity = DeviceIdentity {
            vendor_name: "Example Devices".into(),
            product_id: Some("0x00000011".into()),
            order_number: vec!["IO-8-A".into()],
            ..Default::default()
        };
        let transport = TransportLayers {
            physical_layer: PhysicalLayer {
                baud_rate: BaudRate {
                    default_value: None,
                    supported_baud_rate: vec![
                        SupportedBaudRate { value: "250 Kbps".into() },
                        SupportedBaudRate { value: "1000 Kbps".into() },
                        SupportedBaudRate { value: "auto-baudRate".into() },
                    ],
                },
            },
        };
        let mut diag = Diagnostics::new();
        let info = resolve_device_info(Some(&identity), Some(&comm), Some(&transport), None, &mut diag);
        assert_eq!(info.vendor_number, 0x1A5);
        assert_eq!(info.product_number, 0x11);
        assert_eq!(info.revision_number, 0x0002_0001);
        assert_eq!(info.order_code, "IO-8-A");
        assert!(info.baud_rates.br_250 && info.baud_rates.br_1000);
        assert!(!info.baud_rates.br_500);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_dummy_usage() {
        let usage = DummyUsage {
            dummy: vec![
                Dummy { entry: "Dummy0002=1".into() },
                Dummy { entry: "Dummy0005=0".into() },
                Dummy { entry: "Dummy0007".into() },
            ],
        };
        let mut diag = Diagnostics::new();
        let map = resolve_dummy_usage(Some(&usage), &mut diag);
        assert_eq!(map.get(&0x0002), Some(&true));
        assert_eq!(map.get(&0x0005), Some(&false));
        assert_eq!(map.len(), 2);
        assert_eq!(diag.count(WarningKind::ValueConversion), 1);
    }

    #[test]
    fn test_commissioning() {
        let c = net_mgmt::DeviceCommissioning {
            node_id: 5,
            node_name: "io8".into(),
            actual_baud_rate: "500 Kbps".into(),
            network_number: 1,
            network_name: "line".into(),
            canopen_manager: false,
        };
        let dc = resolve_commissioning(Some(&c));
        assert_eq!(dc.node_id, 5);
        assert_eq!(dc.baudrate, 500);
        assert_eq!(dc.net_number, 1);
        assert_eq!(resolve_commissioning(None), DeviceCommissioning::default());
    }
}
