// crates/canopen-od-xdd/src/builder/od.rs

//! Flattens the Object Dictionary into `<CANopenObject>` elements and the
//! `<parameter>` entries they reference.

use crate::access::{to_object_access, to_object_pdo_mapping, to_parameter_access};
use crate::datatype::{encode_bytes, is_byte_encoded, to_iec, written_code};
use crate::model::app_layers::{
    CanOpenObject, CanOpenSubObject, ObjectAccessType, ObjectPdoMapping,
};
use crate::model::app_process::{Parameter, Value};
use crate::model::common::{en_description, en_label, Glabels};
use crate::properties::to_properties;
use crate::XddKind;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use canopen_od::od::{EntryKey, ObjectDictionary};
use canopen_od::{DataType, Diagnostics, OdEntry, WarningKind};
use log::trace;

pub fn object_unique_id(index: u16) -> String {
    format!("UID_OBJ_{:04X}", index)
}

pub fn sub_unique_id(index: u16, subindex: u8) -> String {
    format!("UID_SUB_{:04X}{:02X}", index, subindex)
}

/// The attributes shared by `<CANopenObject>` and `<CANopenSubObject>`.
struct Attributes {
    name: String,
    object_type: String,
    data_type: Option<String>,
    low_limit: Option<String>,
    high_limit: Option<String>,
    access_type: Option<ObjectAccessType>,
    default_value: Option<String>,
    actual_value: Option<String>,
    pdo_mapping: Option<ObjectPdoMapping>,
    obj_flags: Option<String>,
    unique_id_ref: Option<String>,
}

/// Builds the object list and the parameter list. Disabled entries are
/// written too; they carry `CO_disabled`.
pub(super) fn build_objects(
    od: &ObjectDictionary,
    kind: XddKind,
    diag: &mut Diagnostics,
) -> (Vec<CanOpenObject>, Vec<Parameter>) {
    let mut objects = Vec::new();
    let mut parameters = Vec::new();

    for (index, entry) in od.objects() {
        let uid = object_unique_id(index);
        let (attrs, parameter) = build_entry(od, entry, EntryKey::object(index), uid, kind, diag);

        let sub_object = od
            .sub_entries(index)
            .map(|(sub, sub_entry)| {
                let uid = sub_unique_id(index, sub);
                let (attrs, parameter) =
                    build_entry(od, sub_entry, EntryKey::sub(index, sub), uid, kind, diag);
                parameters.push(parameter);
                sub_object(format!("{:02X}", sub), attrs)
            })
            .collect::<Vec<_>>();

        let sub_number = entry
            .object_type
            .has_sub_entries()
            .then(|| u16::try_from(sub_object.len()).unwrap_or(u16::MAX));

        // The object's parameter goes before those of its sub-entries.
        let at = parameters.len() - sub_object.len();
        parameters.insert(at, parameter);

        objects.push(object(format!("{:04X}", index), attrs, sub_number, sub_object));
    }

    trace!(
        "XDD: built {} objects and {} parameters",
        objects.len(),
        parameters.len()
    );
    (objects, parameters)
}

/// An ARRAY element without a type of its own is written with the
/// ARRAY's type.
fn build_entry(
    od: &ObjectDictionary,
    entry: &OdEntry,
    key: EntryKey,
    uid: String,
    kind: XddKind,
    diag: &mut Diagnostics,
) -> (Attributes, Parameter) {
    let data_type = od.resolved_data_type(key);
    let default_value = xml_value(data_type, &entry.default_value, key, diag);
    let actual_value = match kind {
        XddKind::Xdc => xml_value(data_type, &entry.actual_value, key, diag),
        XddKind::Xdd => String::new(),
    };

    let attrs = Attributes {
        name: entry.parameter_name.clone(),
        object_type: entry.object_type.code().to_string(),
        data_type: (data_type != DataType::Unknown)
            .then(|| format!("{:04X}", written_code(data_type))),
        low_limit: non_empty(&entry.low_limit),
        high_limit: non_empty(&entry.high_limit),
        access_type: to_object_access(entry.access_type),
        default_value: non_empty(&default_value),
        actual_value: non_empty(&actual_value),
        pdo_mapping: Some(to_object_pdo_mapping(entry.pdo_mapping)),
        obj_flags: (entry.obj_flags != 0).then(|| format!("{:04X}", entry.obj_flags)),
        unique_id_ref: Some(uid.clone()),
    };

    let mut parameter = Parameter {
        unique_id: uid,
        access: to_parameter_access(entry.access_type, entry.pdo_mapping),
        label: en_label(&entry.parameter_name),
        description: if entry.description.is_empty() {
            Vec::new()
        } else {
            en_description(&entry.description)
        },
        denotation: (!entry.denotation.is_empty()).then(|| Glabels::label(&entry.denotation)),
        actual_value: non_empty(&actual_value).map(|value| Value { value }),
        default_value: non_empty(&default_value).map(|value| Value { value }),
        property: to_properties(&entry.custom_properties),
        ..Default::default()
    };
    if let Some(iec) = to_iec(data_type) {
        parameter.set_iec_type(iec);
    }

    (attrs, parameter)
}

/// The value as written to XML. Types without an IEC counterpart carry
/// their value as a byte string.
fn xml_value(data_type: DataType, value: &str, key: EntryKey, diag: &mut Diagnostics) -> String {
    if !is_byte_encoded(data_type) {
        return value.into();
    }
    match encode_bytes(data_type, value) {
        Some(bytes) => bytes,
        None => {
            diag.push(
                WarningKind::ValueConversion,
                format!(
                    "{}: '{}' is not a number, written unchanged",
                    describe(key),
                    value
                ),
            );
            value.into()
        }
    }
}

fn describe(key: EntryKey) -> String {
    match key.subindex {
        Some(sub) => format!("0x{:04X}sub{:X}", key.index, sub),
        None => format!("0x{:04X}", key.index),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.into())
}

fn object(
    index: String,
    a: Attributes,
    sub_number: Option<u16>,
    sub_object: Vec<CanOpenSubObject>,
) -> CanOpenObject {
    CanOpenObject {
        index,
        name: a.name,
        object_type: a.object_type,
        data_type: a.data_type,
        low_limit: a.low_limit,
        high_limit: a.high_limit,
        access_type: a.access_type,
        default_value: a.default_value,
        actual_value: a.actual_value,
        pdo_mapping: a.pdo_mapping,
        obj_flags: a.obj_flags,
        unique_id_ref: a.unique_id_ref,
        sub_number,
        sub_object,
    }
}

fn sub_object(sub_index: String, a: Attributes) -> CanOpenSubObject {
    CanOpenSubObject {
        sub_index,
        name: a.name,
        object_type: a.object_type,
        data_type: a.data_type,
        low_limit: a.low_limit,
        high_limit: a.high_limit,
        access_type: a.access_type,
        default_value: a.default_value,
        actual_value: a.actual_value,
        pdo_mapping: a.pdo_mapping,
        obj_flags: a.obj_flags,
        unique_id_ref: a.unique_id_ref,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::IecType;
    use crate::model::app_process::ParameterAccess;
    use canopen_od::{AccessType, ObjectType, PdoMapping};

    fn od() -> ObjectDictionary {
        let mut od = ObjectDictionary::new();
        let mut counter = OdEntry::var("Counter", DataType::Integer24, AccessType::Rww, "255");
        counter.actual_value = "16".into();
        counter.custom_properties.storage_group = "PERSIST_COMM".into();
        od.insert_object(0x2000, counter).unwrap();

        od.insert_object(0x1018, OdEntry::container("Identity", ObjectType::Record))
            .unwrap();
        od.insert_sub(
            0x1018,
            0,
            OdEntry::var("Highest sub-index supported", DataType::Unsigned8, AccessType::Const, "1"),
        )
        .unwrap();
        od.insert_sub(
            0x1018,
            1,
            OdEntry::var("Vendor-ID", DataType::Unsigned32, AccessType::Ro, "0x1A5")
                .with_pdo_mapping(PdoMapping::Optional),
        )
        .unwrap();
        od
    }

    #[test]
    fn test_unique_ids() {
        assert_eq!(object_unique_id(0x1018), "UID_OBJ_1018");
        assert_eq!(sub_unique_id(0x1018, 0x0A), "UID_SUB_10180A");
    }

    #[test]
    fn test_objects_and_parameters() {
        let mut diag = Diagnostics::new();
        let (objects, parameters) = build_objects(&od(), XddKind::Xdd, &mut diag);
        assert!(diag.is_empty());

        assert_eq!(objects.len(), 2);
        let identity = &objects[0];
        assert_eq!(identity.index, "1018");
        assert_eq!(identity.object_type, "9");
        assert_eq!(identity.sub_number, Some(2));
        assert_eq!(identity.sub_object[1].sub_index, "01");
        assert_eq!(identity.sub_object[1].pdo_mapping, Some(ObjectPdoMapping::Optional));
        assert_eq!(identity.sub_object[0].access_type, Some(ObjectAccessType::Constant));

        let uids: Vec<&str> = parameters.iter().map(|p| p.unique_id.as_str()).collect();
        assert_eq!(uids, ["UID_OBJ_1018", "UID_SUB_101800", "UID_SUB_101801", "UID_OBJ_2000"]);
        assert_eq!(parameters[2].iec_type(), Some(IecType::UDInt));
        assert_eq!(parameters[2].access, Some(ParameterAccess::Read));
    }

    #[test]
    fn test_integer24_is_written_as_bytes() {
        let mut diag = Diagnostics::new();
        let (objects, parameters) = build_objects(&od(), XddKind::Xdc, &mut diag);

        let counter = &objects[1];
        assert_eq!(counter.data_type.as_deref(), Some("000A"));
        assert_eq!(counter.default_value.as_deref(), Some("FF 00 00"));
        assert_eq!(counter.actual_value.as_deref(), Some("10 00 00"));
        assert_eq!(counter.access_type, Some(ObjectAccessType::ReadWrite));

        let param = &parameters[3];
        assert_eq!(param.iec_type(), Some(IecType::BitString));
        assert_eq!(param.access, Some(ParameterAccess::ReadWriteInput));
        assert_eq!(param.default_value.as_ref().unwrap().value, "FF 00 00");
        assert_eq!(param.property("CO_storageGroup"), Some("PERSIST_COMM"));
    }

    #[test]
    fn test_array_element_gets_the_array_type() {
        let mut od = ObjectDictionary::new();
        let mut array = OdEntry::container("Counters", ObjectType::Array);
        array.data_type = DataType::Integer24;
        od.insert_object(0x2100, array).unwrap();
        od.insert_sub(0x2100, 1, OdEntry::var("c1", DataType::Unknown, AccessType::Ro, "255"))
            .unwrap();

        let mut diag = Diagnostics::new();
        let (objects, parameters) = build_objects(&od, XddKind::Xdd, &mut diag);
        assert!(diag.is_empty());

        let element = &objects[0].sub_object[0];
        assert_eq!(element.data_type.as_deref(), Some("000A"));
        assert_eq!(element.default_value.as_deref(), Some("FF 00 00"));

        let param = &parameters[1];
        assert_eq!(param.unique_id, "UID_SUB_210001");
        assert_eq!(param.iec_type(), Some(IecType::BitString));
        assert_eq!(param.default_value.as_ref().unwrap().value, "FF 00 00");
    }

    #[test]
    fn test_xdd_has_no_actual_values() {
        let mut diag = Diagnostics::new();
        let (objects, parameters) = build_objects(&od(), XddKind::Xdd, &mut diag);
        assert!(objects[1].actual_value.is_none());
        assert!(parameters.iter().all(|p| p.actual_value.is_none()));
    }
}
