// crates/canopen-od/tests/eds_round_trip.rs

use canopen_od::eds::{self, InfoType};
use canopen_od::od::pdo_validator::verify_pdo_mapping;
use canopen_od::{
    AccessType, DataType, Device, Diagnostics, EntryKey, ObjectType, OdEntry, OdError, PdoMapping,
};
use std::fs;
use std::path::PathBuf;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Loads a file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

fn load_sample() -> Device {
    let mut diag = Diagnostics::new();
    let device = eds::parse_str(&load_test_file("sample.eds"), &mut diag)
        .expect("sample.eds should parse");
    assert!(diag.is_empty(), "unexpected warnings: {:?}", diag.warnings());
    device
}

#[test]
fn test_sample_is_loaded() {
    init_logger();
    let device = load_sample();

    assert_eq!(device.file_info.file_revision, 3);
    assert_eq!(device.device_info.vendor_number, 0x1A5);
    assert!(device.device_info.baud_rates.get(250));
    assert!(!device.device_info.baud_rates.get(800));
    assert_eq!(device.comments, ["Generated for tests", "Do not edit by hand"]);
    assert_eq!(device.dummy_usage.get(&0x0005), Some(&true));

    let heartbeat = device.od.get(0x1017).unwrap();
    assert_eq!(heartbeat.custom_properties.storage_group, "PERSIST_COMM");
    assert_eq!(heartbeat.high_limit, "0xFFFF");

    let setpoint = device.od.get(0x2100).unwrap();
    assert_eq!(setpoint.access_type, AccessType::Rww);
    assert_eq!(setpoint.obj_flags, 2);
    assert!(device.od.get_sub(0x2000, 1).unwrap().custom_properties.flags_pdo);
}

#[test]
fn test_record_sub_entry_keeps_pdo_mapping() {
    init_logger();
    let device = load_sample();

    let record = device.od.get(0x2000).unwrap();
    assert_eq!(record.object_type, ObjectType::Record);
    let status = device.od.get_sub(0x2000, 1).unwrap();
    assert_eq!(status.pdo_mapping, PdoMapping::Optional);
    assert_eq!(status.access_type, AccessType::Rwr);

    let text = eds::write_string(&device, InfoType::Eds).unwrap();
    let mut diag = Diagnostics::new();
    let reloaded = eds::parse_str(&text, &mut diag).unwrap();
    assert_eq!(
        reloaded.od.get_sub(0x2000, 1).unwrap().pdo_mapping,
        PdoMapping::Optional
    );
}

#[test]
fn test_compact_sub_obj_expansion() {
    init_logger();
    let device = load_sample();

    assert_eq!(device.od.sub_count(0x6000), 5);
    let count = device.od.get_sub(0x6000, 0).unwrap();
    assert_eq!(count.parameter_name, "NrOfObjects");
    assert_eq!(count.default_value, "4");
    assert_eq!(device.od.get_sub(0x6000, 1).unwrap().parameter_name, "Digital input01");
    assert_eq!(device.od.get_sub(0x6000, 4).unwrap().parameter_name, "Spare input");
    assert_eq!(device.od.get_sub(0x6000, 3).unwrap().data_type, DataType::Unsigned8);
}

#[test]
fn test_implicit_and_compact_pdo() {
    init_logger();
    let device = load_sample();

    // NrOfRXPDO=1 without any RPDO section.
    let rpdo = device.od.get(0x1400).unwrap();
    assert_eq!(rpdo.object_type, ObjectType::Record);
    assert_eq!(
        device.od.get_sub(0x1400, 1).unwrap().default_value,
        "$NODEID+0x200"
    );
    assert_eq!(device.od.sub_count(0x1600), 9);

    // CompactPDO=0x03 adds the missing transmission type.
    let transmission = device.od.get_sub(0x1800, 2).unwrap();
    assert_eq!(transmission.default_value, "254");
    assert_eq!(device.od.get_sub(0x1800, 0).unwrap().default_value, "0x02");
    assert!(device.od.get_sub(0x1800, 3).is_none());
}

#[test]
fn test_sample_pdo_mapping_is_valid() {
    init_logger();
    let device = load_sample();
    assert!(verify_pdo_mapping(&device).is_empty());
}

#[test]
fn test_eds_round_trip() {
    init_logger();
    let device = load_sample();

    let text = eds::write_string(&device, InfoType::Eds).unwrap();
    let mut diag = Diagnostics::new();
    let reloaded = eds::parse_str(&text, &mut diag).unwrap();

    assert!(diag.is_empty(), "unexpected warnings: {:?}", diag.warnings());
    assert_eq!(reloaded, device);
    assert_eq!(eds::write_string(&reloaded, InfoType::Eds).unwrap(), text);
}

#[test]
fn test_untyped_array_element_round_trip() {
    init_logger();
    let mut device = Device::new();
    let mut array = OdEntry::container("Values", ObjectType::Array);
    array.data_type = DataType::Integer16;
    device.od.insert_object(0x2100, array).unwrap();
    device
        .od
        .insert_sub(0x2100, 1, OdEntry::var("x", DataType::Unknown, AccessType::Ro, "0"))
        .unwrap();

    let text = eds::write_string(&device, InfoType::Eds).unwrap();
    let mut diag = Diagnostics::new();
    let reloaded = eds::parse_str(&text, &mut diag).expect("written EDS should parse");
    assert!(diag.is_empty(), "unexpected warnings: {:?}", diag.warnings());

    let element = reloaded.od.get_sub(0x2100, 1).unwrap();
    assert_eq!(element.data_type, DataType::Integer16);
    assert_eq!(element.parameter_name, "x");
    assert_eq!(element.default_value, "0");
    assert_eq!(
        reloaded.od.resolved_data_type(EntryKey::sub(0x2100, 1)),
        device.od.resolved_data_type(EntryKey::sub(0x2100, 1))
    );
}

#[test]
fn test_dcf_round_trip_keeps_commissioning_and_values() {
    init_logger();
    let mut device = load_sample();
    device.device_commissioning.node_id = 0x22;
    device.device_commissioning.node_name = "io-left".into();
    device.device_commissioning.baudrate = 500;
    device.od.get_mut(0x1017).unwrap().actual_value = "250".into();
    device.od.get_sub_mut(0x6000, 2).unwrap().denotation = "Door switch".into();

    let eds_text = eds::write_string(&device, InfoType::Eds).unwrap();
    assert!(!eds_text.contains("ParameterValue"));
    assert!(!eds_text.contains("NodeID"));

    let dcf_text = eds::write_string(&device, InfoType::Dcf).unwrap();
    let mut diag = Diagnostics::new();
    let reloaded = eds::parse_str(&dcf_text, &mut diag).unwrap();
    assert_eq!(reloaded.device_commissioning, device.device_commissioning);
    assert_eq!(reloaded.od.get(0x1017).unwrap().actual_value, "250");
    assert_eq!(reloaded.od.get_sub(0x6000, 2).unwrap().denotation, "Door switch");
}

#[test]
fn test_value_section_sets_actual_values() {
    init_logger();
    let text = format!(
        "{}\n[6000Value]\nNrOfEntries=2\n1=0x01\n3=0x07\n",
        load_test_file("sample.eds")
    );
    let mut diag = Diagnostics::new();
    let device = eds::parse_str(&text, &mut diag).unwrap();
    assert_eq!(device.od.get_sub(0x6000, 1).unwrap().actual_value, "0x01");
    assert_eq!(device.od.get_sub(0x6000, 3).unwrap().actual_value, "0x07");
    assert!(device.od.get_sub(0x6000, 2).unwrap().actual_value.is_empty());
}

#[test]
fn test_disabled_objects_are_not_written() {
    init_logger();
    let mut device = load_sample();
    device.od.get_mut(0x2100).unwrap().custom_properties.disabled = true;

    let text = eds::write_string(&device, InfoType::Eds).unwrap();
    assert!(!text.contains("[2100]"));
    assert!(text.contains("[ManufacturerObjects]\nSupportedObjects=1\n1=0x2000\n"));
}

#[test]
fn test_malformed_input_is_rejected() {
    init_logger();
    let cases = [
        "stray line\n[1000]\n",
        "[1000]\nParameterName=x\nno separator here\n",
    ];
    for text in cases {
        let result = eds::parse_str(text, &mut Diagnostics::new());
        assert!(
            matches!(result, Err(OdError::MalformedSection { .. })),
            "{:?} for {:?}",
            result,
            text
        );
    }

    let bad_access = "[1000]\nParameterName=x\nDataType=0x0007\nAccessType=readonly\n";
    assert!(matches!(
        eds::parse_str(bad_access, &mut Diagnostics::new()),
        Err(OdError::UnknownEnumValue { .. })
    ));
}

#[test]
fn test_duplicates_are_warnings() {
    init_logger();
    let text = "\
[1000]
ParameterName=first
DataType=0x0007
AccessType=ro
ParameterName=second

[1000]
DefaultValue=0x191
";
    let mut diag = Diagnostics::new();
    let device = eds::parse_str(text, &mut diag).unwrap();
    let entry = device.od.get(0x1000).unwrap();
    assert_eq!(entry.parameter_name, "second");
    assert_eq!(entry.default_value, "0x191");
    assert_eq!(diag.len(), 2);
}
