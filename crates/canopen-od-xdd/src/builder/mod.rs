// crates/canopen-od-xdd/src/builder/mod.rs

//! Serializes a `Device` into XDD/XDC XML.
//!
//! The device is first converted into the internal `model` structs, which
//! `quick-xml` then writes out in schema order.

mod identity;
mod od;

use crate::error::XddError;
use crate::model::app_layers::{ApplicationLayers, CanOpenObjectList};
use crate::model::app_process::{ApplicationProcess, ParameterList};
use crate::model::header::{ProfileClassId, ProfileHeader};
use crate::model::{
    self, Iso15745Profile, Iso15745ProfileContainer, Iso15745ProfileContainerList,
};
use crate::XddKind;
use alloc::string::String;
use alloc::vec;
use canopen_od::od::constants::{
    IDX_RPDO_COMM_END, IDX_RPDO_COMM_START, IDX_TPDO_COMM_END, IDX_TPDO_COMM_START,
};
use canopen_od::od::ObjectDictionary;
use canopen_od::{Device, DeviceInfo, Diagnostics};
use core::fmt::Write;
use core::ops::RangeInclusive;
use log::debug;
use serde::Serialize;

pub use self::identity::baud_rate_text;
pub use self::od::{object_unique_id, sub_unique_id};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r\n";

/// Serializes a device as a single `ISO15745ProfileContainer` document.
///
/// Warnings about values that could not be converted (timestamps,
/// byte-encoded defaults) are added to `diag`.
pub fn save_to_string(
    device: &Device,
    kind: XddKind,
    diag: &mut Diagnostics,
) -> Result<String, XddError> {
    let container = build_container(device, kind, diag);
    serialize_document(&container)
}

/// Serializes several devices into one `ISO15745ProfileContainerList`.
pub fn save_multi_to_string(
    devices: &[Device],
    kind: XddKind,
    diag: &mut Diagnostics,
) -> Result<String, XddError> {
    let list = Iso15745ProfileContainerList {
        container: devices
            .iter()
            .map(|device| build_container(device, kind, diag))
            .collect(),
        ..Default::default()
    };
    serialize_document(&list)
}

fn serialize_document<T: Serialize>(root: &T) -> Result<String, XddError> {
    let mut buffer = String::new();
    write!(&mut buffer, "{}", XML_DECLARATION)?;

    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 2);

    root.serialize(serializer)?;
    debug!("XDD: wrote {} bytes", buffer.len());
    Ok(buffer)
}

/// Constructs the container with its Device and CommunicationNetwork profiles.
pub(crate) fn build_container(
    device: &Device,
    kind: XddKind,
    diag: &mut Diagnostics,
) -> Iso15745ProfileContainer {
    let files = identity::FileAttributes::new(&device.file_info, diag);
    let (objects, parameters) = od::build_objects(&device.od, kind, diag);

    let device_info = DeviceInfo {
        nr_of_rx_pdo: count_enabled(&device.od, IDX_RPDO_COMM_START..=IDX_RPDO_COMM_END),
        nr_of_tx_pdo: count_enabled(&device.od, IDX_TPDO_COMM_START..=IDX_TPDO_COMM_END),
        ..device.device_info.clone()
    };

    let mut device_body = files.body(model::XSI_TYPE_DEVICE);
    device_body.device_identity = Some(identity::build_device_identity(
        &device.file_info,
        &device_info,
    ));
    device_body.application_process = Some(ApplicationProcess {
        parameter_list: ParameterList {
            parameter: parameters,
        },
    });

    let commissioning = match kind {
        XddKind::Xdc => Some(&device.device_commissioning),
        XddKind::Xdd => None,
    };
    let mut comm_body = files.body(model::XSI_TYPE_COMM);
    comm_body.application_layers = Some(ApplicationLayers {
        identity: Some(identity::build_comm_identity(&device_info)),
        object_list: CanOpenObjectList { object: objects },
        dummy_usage: identity::build_dummy_usage(&device.dummy_usage),
    });
    comm_body.transport_layers = Some(identity::build_transport_layers(&device_info.baud_rates));
    comm_body.network_management = Some(identity::build_network_management(
        &device_info,
        commissioning,
    ));

    Iso15745ProfileContainer {
        profile: vec![
            Iso15745Profile {
                profile_header: build_header(
                    "CANopen device profile",
                    &device_info.product_name,
                    ProfileClassId::Device,
                ),
                profile_body: device_body,
            },
            Iso15745Profile {
                profile_header: build_header(
                    "CANopen communication network profile",
                    &device_info.product_name,
                    ProfileClassId::CommunicationNetwork,
                ),
                profile_body: comm_body,
            },
        ],
        ..Default::default()
    }
}

fn build_header(identification: &str, name: &str, class: ProfileClassId) -> ProfileHeader {
    ProfileHeader {
        profile_identification: identification.into(),
        profile_revision: "1".into(),
        profile_name: name.into(),
        profile_source: String::new(),
        profile_class_id: class,
        ..Default::default()
    }
}

fn count_enabled(od: &ObjectDictionary, range: RangeInclusive<u16>) -> u16 {
    let n = od
        .objects()
        .filter(|(i, e)| range.contains(i) && !e.is_disabled())
        .count();
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopen_od::{AccessType, DataType, ObjectType, OdEntry};

    fn device() -> Device {
        let mut device = Device::new();
        device.file_info.file_name = "node.xdd".into();
        device.file_info.creation_date = "03-14-2021".into();
        device.file_info.creation_time = "9:05PM".into();
        device.device_info.vendor_name = "Example Devices".into();
        device.device_info.product_name = "IO-8".into();
        device.device_info.baud_rates.set(250, true);
        device.device_info.nr_of_tx_pdo = 9;
        device
            .od
            .insert_object(0x1000, OdEntry::var("Device type", DataType::Unsigned32, AccessType::Ro, "0"))
            .unwrap();
        device
            .od
            .insert_object(0x1800, OdEntry::container("TPDO communication parameter", ObjectType::Record))
            .unwrap();
        device
    }

    #[test]
    fn test_container_layout() {
        let mut diag = Diagnostics::new();
        let container = build_container(&device(), XddKind::Xdd, &mut diag);
        assert_eq!(container.profile.len(), 2);

        let device_body = &container.profile[0].profile_body;
        assert_eq!(device_body.xsi_type.as_deref(), Some(model::XSI_TYPE_DEVICE));
        assert_eq!(device_body.file_creation_date.as_deref(), Some("2021-03-14"));
        assert_eq!(device_body.file_version.as_deref(), Some("1.0"));
        assert!(device_body.application_layers.is_none());

        let comm_body = &container.profile[1].profile_body;
        let features = &comm_body.network_management.as_ref().unwrap().general_features;
        assert_eq!(features.nr_of_tx_pdo, 1);
        assert!(comm_body
            .network_management
            .as_ref()
            .unwrap()
            .device_commissioning
            .is_none());
        let rates = &comm_body.transport_layers.as_ref().unwrap().physical_layer.baud_rate;
        assert_eq!(rates.supported_baud_rate.len(), 1);
        assert_eq!(rates.supported_baud_rate[0].value, "250 Kbps");
    }

    #[test]
    fn test_save_to_string() {
        let mut diag = Diagnostics::new();
        let xml = save_to_string(&device(), XddKind::Xdc, &mut diag).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<ISO15745ProfileContainer"));
        assert!(xml.contains("xsi:type=\"ProfileBody_Device_CANopen\""));
        assert!(xml.contains("uniqueIDRef=\"UID_OBJ_1000\""));
        assert!(xml.contains("<deviceCommissioning"));
        assert!(xml.contains("<UDINT/>"));
        assert!(diag.is_empty());
    }
}
