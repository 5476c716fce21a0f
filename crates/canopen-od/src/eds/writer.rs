// crates/canopen-od/src/eds/writer.rs

use super::fields::{self, Field, ENTRY_FIELDS};
use super::InfoType;
use crate::device::{Device, DeviceInfo, Module};
use crate::od::constants::{
    IDX_MANUFACTURER_END, IDX_MANUFACTURER_START, IDX_RPDO_COMM_END, IDX_RPDO_COMM_START,
    IDX_TPDO_COMM_END, IDX_TPDO_COMM_START, MANDATORY_OBJECTS,
};
use crate::od::{EntryKey, ObjectDictionary, OdEntry};
use crate::OdError;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;
use log::debug;

/// The three object lists of an EDS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectList {
    Mandatory,
    Optional,
    Manufacturer,
}

impl ObjectList {
    pub fn of(index: u16) -> ObjectList {
        if MANDATORY_OBJECTS.contains(&index) {
            ObjectList::Mandatory
        } else if (IDX_MANUFACTURER_START..=IDX_MANUFACTURER_END).contains(&index) {
            ObjectList::Manufacturer
        } else {
            ObjectList::Optional
        }
    }

    fn section_name(self) -> &'static str {
        match self {
            ObjectList::Mandatory => "MandatoryObjects",
            ObjectList::Optional => "OptionalObjects",
            ObjectList::Manufacturer => "ManufacturerObjects",
        }
    }
}

/// Serializes a device as EDS or DCF text.
///
/// Disabled objects are left out. `NrOfRXPDO`/`NrOfTXPDO` are taken from
/// the PDO records actually present.
pub fn write_string(device: &Device, info: InfoType) -> Result<String, OdError> {
    let mut out = String::new();

    write_table(&mut out, "FileInfo", fields::FILE_INFO_FIELDS, &device.file_info, info)?;

    let device_info = DeviceInfo {
        nr_of_rx_pdo: count_enabled(&device.od, IDX_RPDO_COMM_START..=IDX_RPDO_COMM_END),
        nr_of_tx_pdo: count_enabled(&device.od, IDX_TPDO_COMM_START..=IDX_TPDO_COMM_END),
        ..device.device_info.clone()
    };
    write_table(&mut out, "DeviceInfo", fields::DEVICE_INFO_FIELDS, &device_info, info)?;

    if info == InfoType::Dcf {
        write_table(
            &mut out,
            "DeviceComissioning",
            fields::DEVICE_COMMISSIONING_FIELDS,
            &device.device_commissioning,
            info,
        )?;
    }

    writeln!(out, "[DummyUsage]")?;
    for (index, used) in &device.dummy_usage {
        writeln!(out, "Dummy{:04X}={}", index, u8::from(*used))?;
    }
    writeln!(out)?;

    write_comments(&mut out, "Comments", &device.comments)?;

    for list in [ObjectList::Mandatory, ObjectList::Optional, ObjectList::Manufacturer] {
        let indices: Vec<u16> = device
            .od
            .objects()
            .filter(|(i, e)| !e.is_disabled() && ObjectList::of(*i) == list)
            .map(|(i, _)| i)
            .collect();
        write_list(&mut out, list.section_name(), "SupportedObjects", &indices)?;
        for index in indices {
            write_object(&mut out, &device.od, "", index, info)?;
        }
    }

    if !device.modules.is_empty() {
        writeln!(out, "[SupportedModules]")?;
        writeln!(out, "NrOfEntries={}", device.modules.len())?;
        writeln!(out)?;
        for (n, module) in &device.modules {
            write_module(&mut out, *n, module, info)?;
        }
    }

    debug!("EDS: wrote {} bytes ({:?})", out.len(), info);
    Ok(out)
}

fn count_enabled(od: &ObjectDictionary, range: core::ops::RangeInclusive<u16>) -> u16 {
    let n = od
        .objects()
        .filter(|(i, e)| range.contains(i) && !e.is_disabled())
        .count();
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn write_table<T>(
    out: &mut String,
    name: &str,
    table: &[Field<T>],
    value: &T,
    info: InfoType,
) -> Result<(), OdError> {
    writeln!(out, "[{}]", name)?;
    write_fields(out, table, value, info)?;
    writeln!(out)?;
    Ok(())
}

fn write_fields<T>(
    out: &mut String,
    table: &[Field<T>],
    value: &T,
    info: InfoType,
) -> Result<(), OdError> {
    for field in table.iter().filter(|f| f.exported_in(info)) {
        if let Some(v) = (field.get)(value) {
            writeln!(out, "{}={}", field.written_key(), v)?;
        }
    }
    Ok(())
}

fn write_comments(out: &mut String, name: &str, lines: &[String]) -> Result<(), OdError> {
    writeln!(out, "[{}]", name)?;
    writeln!(out, "Lines={}", lines.len())?;
    for (i, line) in lines.iter().enumerate() {
        writeln!(out, "Line{}={}", i + 1, line)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_list(out: &mut String, name: &str, count_key: &str, indices: &[u16]) -> Result<(), OdError> {
    writeln!(out, "[{}]", name)?;
    writeln!(out, "{}={}", count_key, indices.len())?;
    for (i, index) in indices.iter().enumerate() {
        writeln!(out, "{}=0x{:04X}", i + 1, index)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Writes one object section and its sub-entry sections. `prefix` carries
/// the `M<n>Fixed`/`M<n>SubExt` part for module objects.
fn write_object(
    out: &mut String,
    od: &ObjectDictionary,
    prefix: &str,
    index: u16,
    info: InfoType,
) -> Result<(), OdError> {
    let Some(object) = od.get(index) else {
        return Ok(());
    };

    writeln!(out, "[{}{:04X}]", prefix, index)?;
    write_entry(out, od, EntryKey::object(index), object, info)?;
    if object.object_type.has_sub_entries() {
        writeln!(out, "SubNumber=0x{:X}", od.sub_count(index))?;
    }
    writeln!(out)?;

    for (sub, entry) in od.sub_entries(index) {
        writeln!(out, "[{}{:04X}sub{:X}]", prefix, index, sub)?;
        write_entry(out, od, EntryKey::sub(index, sub), entry, info)?;
        writeln!(out)?;
    }
    Ok(())
}

/// An ARRAY element without a type of its own is written with the
/// ARRAY's type, since `DataType` is mandatory in every entry section.
fn write_entry(
    out: &mut String,
    od: &ObjectDictionary,
    key: EntryKey,
    entry: &OdEntry,
    info: InfoType,
) -> Result<(), OdError> {
    let data_type = od.resolved_data_type(key);
    if data_type == entry.data_type {
        return write_fields(out, ENTRY_FIELDS, entry, info);
    }
    let resolved = OdEntry {
        data_type,
        ..entry.clone()
    };
    write_fields(out, ENTRY_FIELDS, &resolved, info)
}

fn write_module(out: &mut String, n: u16, module: &Module, info: InfoType) -> Result<(), OdError> {
    write_table(
        out,
        &alloc::format!("M{}ModuleInfo", n),
        fields::MODULE_INFO_FIELDS,
        &module.info,
        info,
    )?;

    let fixed: Vec<u16> = module.fixed_objects.indices().collect();
    write_list(out, &alloc::format!("M{}FixedObjects", n), "NrOfEntries", &fixed)?;
    let prefix = alloc::format!("M{}Fixed", n);
    for index in fixed {
        write_object(out, &module.fixed_objects, &prefix, index, info)?;
    }

    let sub_ext: Vec<u16> = module.sub_extends.indices().collect();
    write_list(out, &alloc::format!("M{}SubExtends", n), "NrOfEntries", &sub_ext)?;
    let prefix = alloc::format!("M{}SubExt", n);
    for index in sub_ext {
        write_object(out, &module.sub_extends, &prefix, index, info)?;
    }

    if !module.comments.is_empty() {
        write_comments(out, &alloc::format!("M{}Comments", n), &module.comments)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::od::{AccessType, DataType, ObjectType, PdoMapping};

    fn sample_device() -> Device {
        let mut device = Device::new();
        device.file_info.file_name = "sample.eds".into();
        device.device_info.nr_of_tx_pdo = 7;
        device
            .od
            .insert_object(0x1000, OdEntry::var("Device type", DataType::Unsigned32, AccessType::Ro, "0"))
            .unwrap();
        device
            .od
            .insert_object(0x1017, OdEntry::var("Heartbeat", DataType::Unsigned16, AccessType::Rw, "0"))
            .unwrap();
        let mut hidden = OdEntry::var("Hidden", DataType::Unsigned8, AccessType::Rw, "1")
            .with_pdo_mapping(PdoMapping::Optional);
        hidden.custom_properties.disabled = true;
        device.od.insert_object(0x2001, hidden).unwrap();
        let mut value = OdEntry::var("Value", DataType::Integer32, AccessType::Rww, "-1");
        value.actual_value = "5".into();
        device.od.insert_object(0x2000, value).unwrap();
        device
            .od
            .insert_object(0x1800, OdEntry::container("TPDO", ObjectType::Record))
            .unwrap();
        device
    }

    #[test]
    fn test_object_list_buckets() {
        assert_eq!(ObjectList::of(0x1018), ObjectList::Mandatory);
        assert_eq!(ObjectList::of(0x1017), ObjectList::Optional);
        assert_eq!(ObjectList::of(0x2000), ObjectList::Manufacturer);
        assert_eq!(ObjectList::of(0x5FFF), ObjectList::Manufacturer);
        assert_eq!(ObjectList::of(0x6000), ObjectList::Optional);
    }

    #[test]
    fn test_write_eds() {
        let text = write_string(&sample_device(), InfoType::Eds).unwrap();
        assert!(text.contains("[MandatoryObjects]\nSupportedObjects=1\n1=0x1000\n"));
        assert!(text.contains("[OptionalObjects]\nSupportedObjects=2\n1=0x1017\n2=0x1800\n"));
        assert!(text.contains("[ManufacturerObjects]\nSupportedObjects=1\n1=0x2000\n"));
        assert!(text.contains("NrOfTXPDO=1\n"));
        assert!(text.contains("[2000]\nParameterName=Value\nObjectType=0x7\nDataType=0x0004\nAccessType=rww\nDefaultValue=-1\nPDOMapping=0\n"));
        assert!(!text.contains("[2001]"));
        assert!(!text.contains("ParameterValue"));
        assert!(!text.contains("[DeviceComissioning]"));
    }

    #[test]
    fn test_array_element_gets_the_array_type() {
        let mut device = Device::new();
        let mut array = OdEntry::container("Values", ObjectType::Array);
        array.data_type = DataType::Integer16;
        device.od.insert_object(0x2100, array).unwrap();
        device
            .od
            .insert_sub(0x2100, 1, OdEntry::var("x", DataType::Unknown, AccessType::Ro, "0"))
            .unwrap();

        let text = write_string(&device, InfoType::Eds).unwrap();
        assert!(text.contains("[2100sub1]\nParameterName=x\nObjectType=0x7\nDataType=0x0003\n"));
        assert_eq!(device.od.get_sub(0x2100, 1).unwrap().data_type, DataType::Unknown);
    }

    #[test]
    fn test_write_dcf_adds_dcf_fields() {
        let text = write_string(&sample_device(), InfoType::Dcf).unwrap();
        assert!(text.contains("ParameterValue=5\n"));
        assert!(text.contains("[DeviceComissioning]\nNodeID=0\n"));
    }
}
