// crates/canopen-od-xdd/src/resolver/od.rs

//! Rebuilds the Object Dictionary from `<CANopenObjectList>`, pulling
//! descriptions, values and properties from the referenced parameters.

use super::utils::{parse_hex_u32, parse_index, parse_sub_index};
use crate::access::{from_object_access, from_object_pdo_mapping, from_parameter_access};
use crate::datatype::from_iec;
use crate::error::XddError;
use crate::model::app_layers::{
    CanOpenObject, CanOpenObjectList, CanOpenSubObject, ObjectAccessType, ObjectPdoMapping,
};
use crate::model::app_process::Parameter;
use crate::model::common::{first_description, first_label};
use crate::properties::from_properties;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use canopen_od::od::value::parse_number;
use canopen_od::od::{AccessType, CustomProperties, DataType, ObjectDictionary, ObjectType, PdoMapping};
use canopen_od::{Diagnostics, OdEntry, OdError, WarningKind};
use log::{debug, trace};

/// Parameters by `uniqueID`.
pub(super) type ParameterMap<'a> = BTreeMap<&'a str, &'a Parameter>;

/// The attributes shared by `<CANopenObject>` and `<CANopenSubObject>`.
struct Attributes<'a> {
    name: &'a str,
    object_type: &'a str,
    data_type: Option<&'a str>,
    low_limit: Option<&'a str>,
    high_limit: Option<&'a str>,
    access_type: Option<ObjectAccessType>,
    default_value: Option<&'a str>,
    actual_value: Option<&'a str>,
    pdo_mapping: Option<ObjectPdoMapping>,
    obj_flags: Option<&'a str>,
    unique_id_ref: Option<&'a str>,
}

impl<'a> From<&'a CanOpenObject> for Attributes<'a> {
    fn from(o: &'a CanOpenObject) -> Self {
        Self {
            name: &o.name,
            object_type: &o.object_type,
            data_type: o.data_type.as_deref(),
            low_limit: o.low_limit.as_deref(),
            high_limit: o.high_limit.as_deref(),
            access_type: o.access_type,
            default_value: o.default_value.as_deref(),
            actual_value: o.actual_value.as_deref(),
            pdo_mapping: o.pdo_mapping,
            obj_flags: o.obj_flags.as_deref(),
            unique_id_ref: o.unique_id_ref.as_deref(),
        }
    }
}

impl<'a> From<&'a CanOpenSubObject> for Attributes<'a> {
    fn from(o: &'a CanOpenSubObject) -> Self {
        Self {
            name: &o.name,
            object_type: &o.object_type,
            data_type: o.data_type.as_deref(),
            low_limit: o.low_limit.as_deref(),
            high_limit: o.high_limit.as_deref(),
            access_type: o.access_type,
            default_value: o.default_value.as_deref(),
            actual_value: o.actual_value.as_deref(),
            pdo_mapping: o.pdo_mapping,
            obj_flags: o.obj_flags.as_deref(),
            unique_id_ref: o.unique_id_ref.as_deref(),
        }
    }
}

/// Builds the Object Dictionary. A bad `@index`/`@subIndex` or object type
/// aborts; a duplicate index is an [`OdError::DuplicateIndex`]. Sub-objects
/// of a VAR are reported and dropped.
pub(super) fn resolve_objects(
    list: &CanOpenObjectList,
    params: &ParameterMap<'_>,
    diag: &mut Diagnostics,
) -> Result<ObjectDictionary, XddError> {
    let mut od = ObjectDictionary::new();

    for object in &list.object {
        let index = parse_index(&object.index)?;
        let owner = format!("0x{:04X}", index);
        let entry = resolve_entry(Attributes::from(object), &owner, params, diag)?;
        od.insert_object(index, entry)?;

        for sub_object in &object.sub_object {
            let sub = parse_sub_index(&sub_object.sub_index)?;
            let owner = format!("0x{:04X}sub{:X}", index, sub);
            let entry = resolve_entry(Attributes::from(sub_object), &owner, params, diag)?;
            match od.insert_sub(index, sub, entry) {
                Ok(None) => {}
                Ok(Some(_)) => diag.push(
                    WarningKind::DuplicateKey,
                    format!("{} is listed twice, the last one is kept", owner),
                ),
                Err(OdError::NotAnArrayOrRecord(_)) => diag.push(
                    WarningKind::UnresolvedReference,
                    format!("{} skipped, its parent object is a VAR", owner),
                ),
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(declared) = object.sub_number {
            let found = od.sub_count(index);
            if usize::from(declared) != found {
                debug!(
                    "XDD: {} declares subNumber={} but lists {} sub-objects",
                    owner, declared, found
                );
            }
        }
    }

    trace!("XDD: resolved {} objects", od.len());
    Ok(od)
}

fn resolve_entry(
    attrs: Attributes<'_>,
    owner: &str,
    params: &ParameterMap<'_>,
    diag: &mut Diagnostics,
) -> Result<OdEntry, XddError> {
    let param = match attrs.unique_id_ref {
        Some(uid) => {
            let found = params.get(uid).copied();
            if found.is_none() {
                diag.push(
                    WarningKind::UnresolvedReference,
                    format!("{} refers to missing parameter '{}'", owner, uid),
                );
            }
            found
        }
        None => None,
    };

    let default_value: String = param
        .and_then(|p| p.default_value.as_ref())
        .map(|v| v.value.clone())
        .or_else(|| attrs.default_value.map(String::from))
        .unwrap_or_default();
    let actual_value: String = param
        .and_then(|p| p.actual_value.as_ref())
        .map(|v| v.value.clone())
        .or_else(|| attrs.actual_value.map(String::from))
        .unwrap_or_default();

    let mut name = String::from(attrs.name);
    if name.is_empty() {
        if let Some(label) = param.and_then(|p| first_label(&p.label)) {
            name = label.into();
        }
    }

    let access_type = match (param.and_then(|p| p.access), attrs.access_type) {
        (Some(access), _) => from_parameter_access(access),
        (None, Some(access)) => from_object_access(access),
        (None, None) => AccessType::Unknown,
    };

    let custom_properties = match param {
        Some(p) => from_properties(p, owner, diag),
        None => CustomProperties::default(),
    };

    Ok(OdEntry {
        parameter_name: name,
        object_type: resolve_object_type(attrs.object_type)?,
        data_type: resolve_data_type(attrs.data_type, param, &default_value, owner, diag),
        access_type,
        pdo_mapping: attrs
            .pdo_mapping
            .map(from_object_pdo_mapping)
            .unwrap_or(PdoMapping::No),
        default_value,
        actual_value,
        low_limit: attrs.low_limit.map(String::from).unwrap_or_default(),
        high_limit: attrs.high_limit.map(String::from).unwrap_or_default(),
        description: param
            .and_then(|p| first_description(&p.description))
            .map(String::from)
            .unwrap_or_default(),
        denotation: param
            .and_then(|p| p.denotation.as_ref())
            .and_then(|d| first_label(&d.label))
            .map(String::from)
            .unwrap_or_default(),
        obj_flags: resolve_obj_flags(attrs.obj_flags, owner, diag),
        custom_properties,
    })
}

/// `@objectType` is a decimal object code. Missing means VAR.
fn resolve_object_type(text: &str) -> Result<ObjectType, XddError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(ObjectType::Var);
    }
    parse_number(text, 0)
        .and_then(|code| u8::try_from(code).ok())
        .and_then(ObjectType::from_code)
        .ok_or_else(|| XddError::UnknownEnumValue {
            attribute: "objectType",
            value: text.into(),
        })
}

/// The `@dataType` attribute wins; otherwise the parameter's IEC element.
fn resolve_data_type(
    attr: Option<&str>,
    param: Option<&Parameter>,
    default_value: &str,
    owner: &str,
    diag: &mut Diagnostics,
) -> DataType {
    if let Some(text) = attr {
        let code = parse_hex_u32(text).and_then(|c| u16::try_from(c).ok());
        match code.and_then(DataType::from_code) {
            Some(data_type) => return data_type,
            None => diag.push(
                WarningKind::EnumOutOfRange,
                format!("{}: dataType '{}' is not a CANopen data type", owner, text),
            ),
        }
    }
    param
        .and_then(Parameter::iec_type)
        .map(|iec| from_iec(iec, default_value))
        .unwrap_or(DataType::Unknown)
}

fn resolve_obj_flags(text: Option<&str>, owner: &str, diag: &mut Diagnostics) -> u32 {
    let Some(text) = text else {
        return 0;
    };
    parse_hex_u32(text).unwrap_or_else(|| {
        diag.push(
            WarningKind::ValueConversion,
            format!("{}: objFlags '{}' is not a hex number", owner, text),
        );
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::app_process::{ParameterAccess, Property, Value};
    use alloc::vec;

    fn parameter(uid: &str) -> Parameter {
        let mut p = Parameter {
            unique_id: uid.into(),
            access: Some(ParameterAccess::ReadWriteOutput),
            default_value: Some(Value { value: "7".into() }),
            property: vec![Property {
                name: "CO_flagsPDO".into(),
                value: "true".into(),
            }],
            ..Default::default()
        };
        p.set_iec_type(crate::datatype::IecType::UInt);
        p
    }

    fn object(uid: Option<&str>) -> CanOpenObject {
        CanOpenObject {
            index: "2000".into(),
            name: "Status".into(),
            object_type: "7".into(),
            access_type: Some(ObjectAccessType::ReadWrite),
            default_value: Some("3".into()),
            pdo_mapping: Some(ObjectPdoMapping::Optional),
            unique_id_ref: uid.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_parameter_wins_over_attributes() {
        let param = parameter("UID_OBJ_2000");
        let mut params = ParameterMap::new();
        params.insert("UID_OBJ_2000", &param);
        let list = CanOpenObjectList {
            object: vec![object(Some("UID_OBJ_2000"))],
        };

        let mut diag = Diagnostics::new();
        let od = resolve_objects(&list, &params, &mut diag).unwrap();
        let entry = od.get(0x2000).unwrap();
        assert_eq!(entry.access_type, AccessType::Rwr);
        assert_eq!(entry.default_value, "7");
        assert_eq!(entry.data_type, DataType::Unsigned16);
        assert_eq!(entry.pdo_mapping, PdoMapping::Optional);
        assert!(entry.custom_properties.flags_pdo);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_unresolved_reference_falls_back_to_attributes() {
        let list = CanOpenObjectList {
            object: vec![object(Some("UID_OBJ_9999"))],
        };
        let mut diag = Diagnostics::new();
        let od = resolve_objects(&list, &ParameterMap::new(), &mut diag).unwrap();
        let entry = od.get(0x2000).unwrap();
        assert_eq!(entry.access_type, AccessType::Rw);
        assert_eq!(entry.default_value, "3");
        assert_eq!(entry.data_type, DataType::Unknown);
        assert_eq!(diag.count(WarningKind::UnresolvedReference), 1);
    }

    #[test]
    fn test_bad_object_type_is_an_error() {
        let mut bad = object(None);
        bad.object_type = "3".into();
        let list = CanOpenObjectList { object: vec![bad] };
        let mut diag = Diagnostics::new();
        let err = resolve_objects(&list, &ParameterMap::new(), &mut diag).unwrap_err();
        assert!(matches!(
            err,
            XddError::UnknownEnumValue {
                attribute: "objectType",
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_index_is_an_error() {
        let list = CanOpenObjectList {
            object: vec![object(None), object(None)],
        };
        let mut diag = Diagnostics::new();
        let err = resolve_objects(&list, &ParameterMap::new(), &mut diag).unwrap_err();
        assert!(matches!(
            err,
            XddError::Od(OdError::DuplicateIndex(0x2000))
        ));
    }

    #[test]
    fn test_unknown_data_type_code_is_reported() {
        let mut odd = object(None);
        odd.data_type = Some("0FFF".into());
        let list = CanOpenObjectList { object: vec![odd] };
        let mut diag = Diagnostics::new();
        let od = resolve_objects(&list, &ParameterMap::new(), &mut diag).unwrap();
        assert_eq!(od.get(0x2000).unwrap().data_type, DataType::Unknown);
        assert_eq!(diag.count(WarningKind::EnumOutOfRange), 1);
    }

    #[test]
    fn test_sub_object_under_var_is_skipped() {
        let mut var = object(None);
        var.sub_object = vec![CanOpenSubObject {
            sub_index: "01".into(),
            name: "Stray".into(),
            object_type: "7".into(),
            data_type: Some("0005".into()),
            ..Default::default()
        }];
        let list = CanOpenObjectList { object: vec![var] };
        let mut diag = Diagnostics::new();
        let od = resolve_objects(&list, &ParameterMap::new(), &mut diag).unwrap();
        assert_eq!(od.get(0x2000).unwrap().default_value, "3");
        assert_eq!(od.sub_count(0x2000), 0);
        assert_eq!(diag.count(WarningKind::UnresolvedReference), 1);
    }
}
