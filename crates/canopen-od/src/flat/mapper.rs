// crates/canopen-od/src/flat/mapper.rs

use super::timestamp::{combine_date_time, split_date_time};
use super::{
    FlatDevice, FlatDeviceCommissioning, FlatDeviceInfo, FlatFileInfo, FlatObject,
    FlatObjectType, FlatSubObject,
};
use crate::device::{BaudRates, Device, DeviceCommissioning, DeviceInfo, FileInfo};
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::od::{
    AccessType, CustomProperties, DataType, EntryKey, ObjectDictionary, ObjectType, OdEntry,
    PdoMapping, DEFAULT_STORAGE_GROUP,
};
use crate::OdError;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use log::debug;

pub fn index_key(index: u16) -> String {
    format!("0x{:04X}", index)
}

pub fn sub_key(subindex: u8) -> String {
    format!("0x{:02X}", subindex)
}

fn strip_hex_prefix(key: &str) -> &str {
    let key = key.trim();
    key.strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key)
}

/// Reads an object key, with or without `0x`.
pub fn parse_index_key(key: &str) -> Option<u16> {
    u16::from_str_radix(strip_hex_prefix(key), 16).ok()
}

/// Reads a sub-object key, with or without `0x`.
pub fn parse_sub_key(key: &str) -> Option<u8> {
    u8::from_str_radix(strip_hex_prefix(key), 16).ok()
}

impl From<ObjectType> for FlatObjectType {
    fn from(t: ObjectType) -> Self {
        match t {
            ObjectType::Var => FlatObjectType::Var,
            ObjectType::Array => FlatObjectType::Array,
            ObjectType::Record => FlatObjectType::Record,
            _ => FlatObjectType::Unspecified,
        }
    }
}

impl From<FlatObjectType> for ObjectType {
    fn from(t: FlatObjectType) -> Self {
        match t {
            FlatObjectType::Var => ObjectType::Var,
            FlatObjectType::Array => ObjectType::Array,
            FlatObjectType::Record => ObjectType::Record,
            FlatObjectType::Unspecified => ObjectType::Unknown,
        }
    }
}

// --- Device -> flat ---

/// Builds the flat tree of a device. Disabled objects are kept and flagged.
///
/// Unreadable file timestamps become the epoch and are reported to `diag`.
pub fn from_device(device: &Device, diag: &mut Diagnostics) -> FlatDevice {
    let objects = device
        .od
        .objects()
        .map(|(index, entry)| (index_key(index), flat_object(&device.od, index, entry)))
        .collect();

    FlatDevice {
        file_info: flat_file_info(&device.file_info, diag),
        device_info: flat_device_info(&device.device_info),
        device_commissioning: flat_commissioning(&device.device_commissioning),
        objects,
    }
}

fn flat_object(od: &ObjectDictionary, index: u16, entry: &OdEntry) -> FlatObject {
    let props = &entry.custom_properties;
    let mut sub_objects = BTreeMap::new();

    if entry.object_type.has_sub_entries() {
        for (sub, sub_entry) in od.sub_entries(index) {
            let data_type = od.resolved_data_type(EntryKey::sub(index, sub));
            sub_objects.insert(sub_key(sub), flat_sub_object(sub_entry, data_type));
        }
    } else {
        sub_objects.insert(sub_key(0), flat_sub_object(entry, entry.data_type));
    }

    FlatObject {
        disabled: props.disabled,
        name: entry.parameter_name.clone(),
        description: entry.description.clone(),
        object_type: entry.object_type.into(),
        count_label: props.count_label.clone(),
        storage_group: props.storage_group.clone(),
        flags_pdo: props.flags_pdo,
        sub_objects,
    }
}

fn flat_sub_object(entry: &OdEntry, data_type: DataType) -> FlatSubObject {
    FlatSubObject {
        name: entry.parameter_name.clone(),
        data_type,
        sdo: entry.access_type.access_sdo(),
        pdo: entry.access_type.access_pdo(entry.pdo_mapping),
        constant: entry.access_type == AccessType::Const,
        srdo: entry.custom_properties.access_srdo,
        default_value: entry.default_value.clone(),
        actual_value: entry.actual_value.clone(),
        low_limit: entry.low_limit.clone(),
        high_limit: entry.high_limit.clone(),
        string_length_min: entry.custom_properties.string_length_min,
    }
}

fn flat_file_info(info: &FileInfo, diag: &mut Diagnostics) -> FlatFileInfo {
    FlatFileInfo {
        file_name: info.file_name.clone(),
        file_version: info.file_version,
        file_revision: info.file_revision,
        eds_version: info.eds_version.clone(),
        description: info.description.clone(),
        creation_time: combine_date_time(&info.creation_date, &info.creation_time, diag),
        created_by: info.created_by.clone(),
        modification_time: combine_date_time(
            &info.modification_date,
            &info.modification_time,
            diag,
        ),
        modified_by: info.modified_by.clone(),
    }
}

fn flat_device_info(info: &DeviceInfo) -> FlatDeviceInfo {
    FlatDeviceInfo {
        vendor_name: info.vendor_name.clone(),
        vendor_number: info.vendor_number,
        product_name: info.product_name.clone(),
        product_number: info.product_number,
        revision_number: info.revision_number,
        order_code: info.order_code.clone(),
        baud_rates: BaudRates::RATES
            .iter()
            .copied()
            .filter(|r| info.baud_rates.get(*r))
            .collect(),
        simple_boot_up_master: info.simple_boot_up_master,
        simple_boot_up_slave: info.simple_boot_up_slave,
        granularity: info.granularity,
        dynamic_channels_supported: info.dynamic_channels_supported,
        compact_pdo: info.compact_pdo,
        group_messaging: info.group_messaging,
        lss_supported: info.lss_supported,
        ng_slave: info.ng_slave,
        ng_master: info.ng_master,
        nr_of_ng_monitored_nodes: info.nr_of_ng_monitored_nodes,
    }
}

fn flat_commissioning(c: &DeviceCommissioning) -> FlatDeviceCommissioning {
    FlatDeviceCommissioning {
        node_id: c.node_id,
        node_name: c.node_name.clone(),
        baudrate: c.baudrate,
        net_number: c.net_number,
        network_name: c.network_name.clone(),
        canopen_manager: c.canopen_manager,
        lss_serial_number: c.lss_serial_number,
    }
}

// --- flat -> Device ---

/// Rebuilds a device from a flat tree.
///
/// Keys that are not hex numbers are reported and skipped; two keys naming
/// the same index are an error.
pub fn to_device(flat: &FlatDevice, diag: &mut Diagnostics) -> Result<Device, OdError> {
    let mut device = Device::new();
    device.file_info = file_info(&flat.file_info);
    device.device_info = device_info(&flat.device_info);
    device.device_commissioning = commissioning(&flat.device_commissioning);

    for (key, object) in &flat.objects {
        let Some(index) = parse_index_key(key) else {
            diag.push(
                WarningKind::ValueConversion,
                format!("Object key '{}' is not a hex index, skipped", key),
            );
            continue;
        };
        insert_object(&mut device.od, index, object, diag)?;
    }

    debug!("Flat: rebuilt {} objects", device.od.len());
    Ok(device)
}

fn insert_object(
    od: &mut ObjectDictionary,
    index: u16,
    object: &FlatObject,
    diag: &mut Diagnostics,
) -> Result<(), OdError> {
    let object_type = ObjectType::from(object.object_type);
    let props = CustomProperties {
        disabled: object.disabled,
        count_label: object.count_label.clone(),
        storage_group: storage_group(&object.storage_group),
        flags_pdo: object.flags_pdo,
        ..Default::default()
    };

    if !object_type.has_sub_entries() {
        // A VAR-like object is its own value entry.
        let value = object
            .sub_objects
            .iter()
            .find(|(k, _)| parse_sub_key(k) == Some(0))
            .or_else(|| object.sub_objects.iter().next())
            .map(|(_, s)| s);
        let mut entry = match value {
            Some(sub) => entry_from(sub),
            None => OdEntry::default(),
        };
        entry.parameter_name = object.name.clone();
        entry.object_type = object_type;
        entry.description = object.description.clone();
        entry.custom_properties = CustomProperties {
            access_srdo: entry.custom_properties.access_srdo,
            string_length_min: entry.custom_properties.string_length_min,
            ..props
        };
        return od.insert_object(index, entry);
    }

    let mut parent = OdEntry::container(object.name.clone(), object_type);
    parent.description = object.description.clone();
    parent.custom_properties = props;
    od.insert_object(index, parent)?;

    for (key, sub) in &object.sub_objects {
        let Some(subindex) = parse_sub_key(key) else {
            diag.push(
                WarningKind::ValueConversion,
                format!("Sub-object key '{}' of {} is not a hex sub-index, skipped", key, index_key(index)),
            );
            continue;
        };
        let mut entry = entry_from(sub);
        entry.custom_properties.storage_group = storage_group(&object.storage_group);
        od.insert_sub(index, subindex, entry)?;
    }

    // An ARRAY carries the element type of its entries.
    if object_type == ObjectType::Array {
        let element_type = od
            .sub_entries(index)
            .find(|(s, _)| *s > 0)
            .map(|(_, e)| e.data_type);
        if let (Some(dt), Some(parent)) = (element_type, od.get_mut(index)) {
            parent.data_type = dt;
        }
    }
    Ok(())
}

fn entry_from(sub: &FlatSubObject) -> OdEntry {
    OdEntry {
        parameter_name: sub.name.clone(),
        object_type: ObjectType::Var,
        data_type: sub.data_type,
        access_type: AccessType::from_sdo_pdo_const(sub.sdo, sub.pdo, sub.constant),
        pdo_mapping: PdoMapping::from_access_pdo(sub.pdo),
        default_value: sub.default_value.clone(),
        actual_value: sub.actual_value.clone(),
        low_limit: sub.low_limit.clone(),
        high_limit: sub.high_limit.clone(),
        custom_properties: CustomProperties {
            access_srdo: sub.srdo,
            string_length_min: sub.string_length_min,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn storage_group(group: &str) -> String {
    if group.is_empty() {
        DEFAULT_STORAGE_GROUP.into()
    } else {
        group.into()
    }
}

fn file_info(flat: &FlatFileInfo) -> FileInfo {
    let (creation_date, creation_time) = split_date_time(flat.creation_time);
    let (modification_date, modification_time) = split_date_time(flat.modification_time);
    FileInfo {
        file_name: flat.file_name.clone(),
        file_version: flat.file_version,
        file_revision: flat.file_revision,
        eds_version: if flat.eds_version.is_empty() {
            FileInfo::default().eds_version
        } else {
            flat.eds_version.clone()
        },
        description: flat.description.clone(),
        creation_time,
        creation_date,
        created_by: flat.created_by.clone(),
        modification_time,
        modification_date,
        modified_by: flat.modified_by.clone(),
    }
}

fn device_info(flat: &FlatDeviceInfo) -> DeviceInfo {
    let mut baud_rates = BaudRates::default();
    for rate in &flat.baud_rates {
        baud_rates.set(*rate, true);
    }
    DeviceInfo {
        vendor_name: flat.vendor_name.clone(),
        vendor_number: flat.vendor_number,
        product_name: flat.product_name.clone(),
        product_number: flat.product_number,
        revision_number: flat.revision_number,
        order_code: flat.order_code.clone(),
        baud_rates,
        simple_boot_up_master: flat.simple_boot_up_master,
        simple_boot_up_slave: flat.simple_boot_up_slave,
        granularity: flat.granularity,
        dynamic_channels_supported: flat.dynamic_channels_supported,
        compact_pdo: flat.compact_pdo,
        group_messaging: flat.group_messaging,
        nr_of_rx_pdo: 0,
        nr_of_tx_pdo: 0,
        lss_supported: flat.lss_supported,
        ng_slave: flat.ng_slave,
        ng_master: flat.ng_master,
        nr_of_ng_monitored_nodes: flat.nr_of_ng_monitored_nodes,
    }
}

fn commissioning(flat: &FlatDeviceCommissioning) -> DeviceCommissioning {
    DeviceCommissioning {
        node_id: flat.node_id,
        node_name: flat.node_name.clone(),
        baudrate: flat.baudrate,
        net_number: flat.net_number,
        network_name: flat.network_name.clone(),
        canopen_manager: flat.canopen_manager,
        lss_serial_number: flat.lss_serial_number,
    }
}
