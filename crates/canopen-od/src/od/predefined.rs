// crates/canopen-od/src/od/predefined.rs

use super::{AccessType, DataType, ObjectDictionary, ObjectType, OdEntry, PdoMapping};
use log::error;

/// Standard dummy mapping entries (CiA 301, data type area 0x0002-0x0007).
/// PDO mappings may reference them to pad a PDO.
const DUMMIES: [(u16, DataType); 6] = [
    (0x0002, DataType::Integer8),
    (0x0003, DataType::Integer16),
    (0x0004, DataType::Integer32),
    (0x0005, DataType::Unsigned8),
    (0x0006, DataType::Unsigned16),
    (0x0007, DataType::Unsigned32),
];

/// Builds the read-only dictionary of dummy entries every device carries.
pub fn dummy_objects() -> ObjectDictionary {
    let mut od = ObjectDictionary::new();
    for (index, data_type) in DUMMIES {
        let entry = OdEntry {
            parameter_name: data_type.name().into(),
            object_type: ObjectType::DefType,
            data_type,
            access_type: AccessType::Ro,
            pdo_mapping: PdoMapping::Optional,
            default_value: "0".into(),
            ..Default::default()
        };
        if let Err(e) = od.insert_object(index, entry) {
            error!("Failed to insert dummy object {:#06X}: {}", index, e);
        }
    }
    od
}
