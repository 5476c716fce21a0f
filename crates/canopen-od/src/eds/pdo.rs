// crates/canopen-od/src/eds/pdo.rs
//! PDO records an EDS implies without listing them.

use crate::device::Device;
use crate::od::constants::{
    IDX_RPDO_COMM_END, IDX_RPDO_COMM_START, IDX_TPDO_COMM_END, IDX_TPDO_COMM_START,
    PDO_MAPPING_OFFSET, PDO_MAPPING_SLOTS,
};
use crate::od::value::{parse_unsigned, NumberBase};
use crate::od::{AccessType, DataType, ObjectDictionary, ObjectType, OdEntry};
use crate::OdError;
use alloc::format;
use alloc::string::String;
use core::ops::RangeInclusive;
use log::{debug, trace};

/// Bits of `DeviceInfo.compact_pdo`.
pub const COMPACT_PDO_COB_ID: u8 = 1 << 0;
pub const COMPACT_PDO_TRANSMISSION_TYPE: u8 = 1 << 1;
pub const COMPACT_PDO_INHIBIT_TIME: u8 = 1 << 2;
pub const COMPACT_PDO_COMPATIBILITY: u8 = 1 << 3;
pub const COMPACT_PDO_EVENT_TIMER: u8 = 1 << 4;

const DEFAULT_TRANSMISSION_TYPE: &str = "254";
const DISABLED_COB_ID: &str = "0x80000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Rx,
    Tx,
}

impl Direction {
    fn comm_range(self) -> RangeInclusive<u16> {
        match self {
            Direction::Rx => IDX_RPDO_COMM_START..=IDX_RPDO_COMM_END,
            Direction::Tx => IDX_TPDO_COMM_START..=IDX_TPDO_COMM_END,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Direction::Rx => "RPDO",
            Direction::Tx => "TPDO",
        }
    }

    /// COB-ID of the pre-defined connection set for PDO number `n`
    /// (0-based). Only the first four PDOs of each kind have one.
    fn default_cob_id(self, n: u16) -> String {
        let base: u16 = match self {
            Direction::Rx => 0x200,
            Direction::Tx => 0x180,
        };
        if n < 4 {
            format!("$NODEID+0x{:X}", base + n * 0x100)
        } else {
            DISABLED_COB_ID.into()
        }
    }
}

/// Adds the communication and mapping records that `NrOfRXPDO` and
/// `NrOfTXPDO` announce but the dictionary does not contain.
///
/// A new PDO takes the lowest free communication index whose mapping index
/// is free as well. Running this twice changes nothing the second time.
pub fn apply_implicit_pdo(device: &mut Device) -> Result<(), OdError> {
    let wanted = [
        (Direction::Rx, device.device_info.nr_of_rx_pdo),
        (Direction::Tx, device.device_info.nr_of_tx_pdo),
    ];
    for (direction, wanted) in wanted {
        let range = direction.comm_range();
        let present = device.od.count_in_range(range.clone());
        let missing = usize::from(wanted).saturating_sub(present);
        if missing > 0 {
            debug!(
                "{} of {} {}s are implicit, synthesizing them",
                missing,
                wanted,
                direction.label()
            );
        }

        for _ in 0..missing {
            let Some(comm) = range
                .clone()
                .find(|i| free_pair(&device.od, *i))
            else {
                debug!("No free index left for another {}", direction.label());
                break;
            };
            synthesize_pdo(&mut device.od, direction, comm)?;
        }
    }
    Ok(())
}

fn free_pair(od: &ObjectDictionary, comm: u16) -> bool {
    !od.contains_index(comm) && !od.contains_index(comm + PDO_MAPPING_OFFSET)
}

fn synthesize_pdo(
    od: &mut ObjectDictionary,
    direction: Direction,
    comm: u16,
) -> Result<(), OdError> {
    let number = comm - *direction.comm_range().start();
    trace!("Synthesizing {} {} at {:#06X}", direction.label(), number + 1, comm);

    let comm_entries: &[(&str, DataType, String)] = &[
        ("COB-ID used by PDO", DataType::Unsigned32, direction.default_cob_id(number)),
        ("Transmission type", DataType::Unsigned8, DEFAULT_TRANSMISSION_TYPE.into()),
        ("Inhibit time", DataType::Unsigned16, "0".into()),
        ("Compatibility entry", DataType::Unsigned8, "0".into()),
        ("Event timer", DataType::Unsigned16, "0".into()),
        ("SYNC start value", DataType::Unsigned8, "0".into()),
    ];
    let used = match direction {
        Direction::Rx => 2,
        Direction::Tx => comm_entries.len(),
    };

    let mut record = OdEntry::container(
        format!("{} communication parameter", direction.label()),
        ObjectType::Record,
    );
    record.data_type = DataType::PdoCommunicationParameter;
    od.insert_object(comm, record)?;
    od.insert_sub(
        comm,
        0,
        OdEntry::var(
            "Highest sub-index supported",
            DataType::Unsigned8,
            AccessType::Ro,
            format!("0x{:02X}", used),
        ),
    )?;
    for (sub, (name, data_type, default)) in comm_entries.iter().take(used).enumerate() {
        od.insert_sub(
            comm,
            sub as u8 + 1,
            OdEntry::var(*name, *data_type, AccessType::Rw, default.clone()),
        )?;
    }

    let mapping_index = comm + PDO_MAPPING_OFFSET;
    let mut mapping = OdEntry::container(
        format!("{} mapping parameter", direction.label()),
        ObjectType::Record,
    );
    mapping.data_type = DataType::PdoMapping;
    od.insert_object(mapping_index, mapping)?;
    od.insert_sub(
        mapping_index,
        0,
        OdEntry::var(
            "Number of mapped application objects in PDO",
            DataType::Unsigned8,
            AccessType::Rw,
            "0",
        ),
    )?;
    for slot in 1..=PDO_MAPPING_SLOTS {
        od.insert_sub(
            mapping_index,
            slot,
            OdEntry::var(
                format!("Application object {}", slot),
                DataType::Unsigned32,
                AccessType::Rw,
                "0x00000000",
            ),
        )?;
    }
    Ok(())
}

/// Fills in communication sub-entries left out of existing PDO records,
/// as allowed by the `CompactPDO` bits of `[DeviceInfo]`.
///
/// Compatibility entry and event timer only exist for TPDOs.
pub fn apply_compact_pdo(device: &mut Device) -> Result<(), OdError> {
    let bits = device.device_info.compact_pdo;
    if bits == 0 {
        return Ok(());
    }

    for direction in [Direction::Rx, Direction::Tx] {
        let range = direction.comm_range();
        let records: alloc::vec::Vec<u16> = device
            .od
            .objects()
            .filter(|(i, e)| range.contains(i) && e.object_type.has_sub_entries())
            .map(|(i, _)| i)
            .collect();

        for comm in records {
            let number = comm - *range.start();
            let candidates: [(u8, u8, &str, DataType, String); 5] = [
                (COMPACT_PDO_COB_ID, 1, "COB-ID used by PDO", DataType::Unsigned32, direction.default_cob_id(number)),
                (COMPACT_PDO_TRANSMISSION_TYPE, 2, "Transmission type", DataType::Unsigned8, DEFAULT_TRANSMISSION_TYPE.into()),
                (COMPACT_PDO_INHIBIT_TIME, 3, "Inhibit time", DataType::Unsigned16, "0".into()),
                (COMPACT_PDO_COMPATIBILITY, 4, "Compatibility entry", DataType::Unsigned8, "0".into()),
                (COMPACT_PDO_EVENT_TIMER, 5, "Event timer", DataType::Unsigned16, "0".into()),
            ];

            let mut added = false;
            for (bit, sub, name, data_type, default) in candidates {
                if bits & bit == 0 || device.od.get_sub(comm, sub).is_some() {
                    continue;
                }
                if direction == Direction::Rx && sub >= 4 {
                    continue;
                }
                trace!("CompactPDO: adding {:#06X}sub{:X} '{}'", comm, sub, name);
                device
                    .od
                    .insert_sub(comm, sub, OdEntry::var(name, data_type, AccessType::Rw, default))?;
                added = true;
            }

            if added {
                update_sub_zero(&mut device.od, comm)?;
            }
        }
    }
    Ok(())
}

/// Sets sub-index 0 to the highest sub-index in use, keeping its base.
fn update_sub_zero(od: &mut ObjectDictionary, index: u16) -> Result<(), OdError> {
    let highest = od
        .sub_entries(index)
        .map(|(s, _)| s)
        .filter(|s| *s != 0)
        .last()
        .unwrap_or(0);
    match od.get_sub_mut(index, 0) {
        Some(sub0) => {
            if parse_unsigned(&sub0.default_value, 0) != Some(u64::from(highest)) {
                let base = NumberBase::of(&sub0.default_value);
                sub0.default_value = base.format(u64::from(highest));
            }
        }
        None => {
            od.insert_sub(
                index,
                0,
                OdEntry::var(
                    "Highest sub-index supported",
                    DataType::Unsigned8,
                    AccessType::Ro,
                    format!("0x{:02X}", highest),
                ),
            )?;
        }
    }
    Ok(())
}
