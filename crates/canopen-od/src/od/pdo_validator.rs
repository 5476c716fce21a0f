// crates/canopen-od/src/od/pdo_validator.rs
use super::constants::{
    IDX_RPDO_MAPPING_END, IDX_RPDO_MAPPING_START, IDX_TPDO_MAPPING_END, IDX_TPDO_MAPPING_START,
};
use super::value::parse_unsigned;
use super::{EntryKey, OdEntry};
use crate::Device;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, trace};

/// One decoded 32-bit mapping value: target index, sub-index and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdoMappingEntry {
    pub index: u16,
    pub sub_index: u8,
    pub length_bits: u8,
}

impl PdoMappingEntry {
    pub fn from_u32(raw: u32) -> Self {
        Self {
            index: (raw >> 16) as u16,
            sub_index: (raw >> 8) as u8,
            length_bits: raw as u8,
        }
    }

    pub fn to_u32(self) -> u32 {
        (u32::from(self.index) << 16) | (u32::from(self.sub_index) << 8) | u32::from(self.length_bits)
    }
}

/// Checks every PDO mapping record of the device and returns one message
/// per problem found. The device is not changed.
///
/// A mapping value is reported when it cannot be read as a number, when
/// its target does not exist, when the target cannot be mapped in the
/// direction of the PDO, or when its length differs from the target's
/// data type.
pub fn verify_pdo_mapping(device: &Device) -> Vec<String> {
    let mut errors = Vec::new();
    let node_id = device.node_id();

    for (index, object) in device.od.objects() {
        let is_rpdo = (IDX_RPDO_MAPPING_START..=IDX_RPDO_MAPPING_END).contains(&index);
        let is_tpdo = (IDX_TPDO_MAPPING_START..=IDX_TPDO_MAPPING_END).contains(&index);
        if !(is_rpdo || is_tpdo) || object.is_disabled() {
            continue;
        }

        let count = device
            .od
            .get_sub(index, 0)
            .and_then(|sub0| parse_unsigned(value_of(sub0), node_id))
            .unwrap_or(0);
        trace!("Verifying {} mapping entries of {:#06X}", count, index);

        for sub in 1..=count.min(u64::from(u8::MAX)) as u8 {
            let Some(slot) = device.od.get_sub(index, sub) else {
                errors.push(format!(
                    "{:#06X}sub{:X}: mapping entry is missing",
                    index, sub
                ));
                continue;
            };
            let text = value_of(slot);
            let Some(raw) = parse_unsigned(text, node_id).and_then(|v| u32::try_from(v).ok())
            else {
                errors.push(format!(
                    "{:#06X}sub{:X}: mapping value '{}' is not a valid number",
                    index, sub, text
                ));
                continue;
            };
            if raw == 0 {
                continue;
            }

            let mapping = PdoMappingEntry::from_u32(raw);
            if let Some(message) = check_target(device, mapping, is_tpdo) {
                errors.push(format!("{:#06X}sub{:X}: {}", index, sub, message));
            }
        }
    }

    debug!("PDO mapping verification found {} problem(s)", errors.len());
    errors
}

fn value_of(entry: &OdEntry) -> &str {
    if entry.actual_value.trim().is_empty() {
        &entry.default_value
    } else {
        &entry.actual_value
    }
}

fn check_target(device: &Device, mapping: PdoMappingEntry, is_tpdo: bool) -> Option<String> {
    if let Some(dummy) = device.dummy_ods.get(mapping.index) {
        if mapping.sub_index != 0 {
            return Some(format!(
                "dummy {:#06X} mapped with sub-index {}",
                mapping.index, mapping.sub_index
            ));
        }
        return length_mismatch(dummy.data_type.bit_size(), mapping);
    }

    let Some((key, entry)) = device.od.lookup(mapping.index, mapping.sub_index) else {
        return Some(format!(
            "mapped entry {:#06X}sub{:X} does not exist",
            mapping.index, mapping.sub_index
        ));
    };

    let pdo = entry.access_type.access_pdo(entry.pdo_mapping);
    if is_tpdo && !pdo.can_transmit() {
        return Some(format!(
            "entry {:#06X}sub{:X} cannot be mapped to a TPDO",
            mapping.index, mapping.sub_index
        ));
    }
    if !is_tpdo && !pdo.can_receive() {
        return Some(format!(
            "entry {:#06X}sub{:X} cannot be mapped to an RPDO",
            mapping.index, mapping.sub_index
        ));
    }

    length_mismatch(target_bits(device, key), mapping)
}

fn target_bits(device: &Device, key: EntryKey) -> Option<u32> {
    device.od.resolved_data_type(key).bit_size()
}

fn length_mismatch(bits: Option<u32>, mapping: PdoMappingEntry) -> Option<String> {
    match bits {
        Some(bits) if bits != u32::from(mapping.length_bits) => Some(format!(
            "length {} does not match {} bits of {:#06X}sub{:X}",
            mapping.length_bits, bits, mapping.index, mapping.sub_index
        )),
        _ => None,
    }
}
