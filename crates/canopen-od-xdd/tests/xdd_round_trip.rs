// crates/canopen-od-xdd/tests/xdd_round_trip.rs

use canopen_od::eds;
use canopen_od::od::AccessSrdo;
use canopen_od::{AccessType, DataType, Device, Diagnostics, ObjectType, OdEntry, WarningKind};
use canopen_od_xdd::{
    XddKind, load_multi_from_str, load_xdd_from_str, save_multi_to_string, save_to_string,
    save_xdc_to_string, save_xdd_to_string,
};
use std::fs;
use std::path::PathBuf;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Loads the EDS shared with the core crate's tests.
fn load_sample() -> Device {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../canopen-od/tests/data/sample.eds");
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e));

    let mut diag = Diagnostics::new();
    eds::parse_str(&text, &mut diag).expect("sample.eds should parse")
}

fn reload(xml: &str) -> Device {
    let mut diag = Diagnostics::new();
    let device = load_xdd_from_str(xml, &mut diag).expect("written XML should parse");
    assert!(diag.is_empty(), "unexpected warnings: {:?}", diag.warnings());
    device
}

#[test]
fn test_xdd_round_trip_keeps_the_dictionary() {
    init_logger();
    let device = load_sample();

    let mut diag = Diagnostics::new();
    let xml = save_xdd_to_string(&device, &mut diag).unwrap();
    assert!(diag.is_empty(), "unexpected warnings: {:?}", diag.warnings());
    assert!(!xml.contains("deviceCommissioning"));

    let loaded = reload(&xml);
    assert_eq!(loaded.od, device.od);
    assert_eq!(loaded.dummy_usage, device.dummy_usage);

    let setpoint = loaded.od.get(0x2100).unwrap();
    assert_eq!(setpoint.access_type, AccessType::Rww);
    assert_eq!(setpoint.obj_flags, 2);
    assert_eq!(setpoint.low_limit, "-1000");
}

#[test]
fn test_xdd_round_trip_keeps_device_data() {
    init_logger();
    let device = load_sample();

    let mut diag = Diagnostics::new();
    let loaded = reload(&save_xdd_to_string(&device, &mut diag).unwrap());

    let file = &loaded.file_info;
    assert_eq!(file.file_name, "sample.eds");
    assert_eq!((file.file_version, file.file_revision), (1, 3));
    assert_eq!(file.description, "I/O node used by the integration tests");
    assert_eq!(file.creation_date, "03-14-2021");
    assert_eq!(file.creation_time, "9:05PM");
    assert_eq!(file.modification_date, "11-02-2023");
    assert_eq!(file.modification_time, "10:30AM");
    assert_eq!(file.created_by, "Test Bench");

    let info = &loaded.device_info;
    let original = &device.device_info;
    assert_eq!(info.vendor_name, original.vendor_name);
    assert_eq!(info.vendor_number, 0x1A5);
    assert_eq!(info.product_number, 0x10);
    assert_eq!(info.revision_number, 0x0001_0002);
    assert_eq!(info.order_code, "IO8-A");
    assert_eq!(info.baud_rates, original.baud_rates);
    assert!(info.simple_boot_up_slave);
    assert!(info.lss_supported);
    assert_eq!(info.granularity, 8);
    // Recounted from the enabled PDO communication objects; 0x1400 is the
    // implicit RPDO added while reading the EDS.
    assert!(loaded.od.contains_index(0x1400));
    assert_eq!(info.nr_of_tx_pdo, 1);
    assert_eq!(info.nr_of_rx_pdo, 1);
}

#[test]
fn test_xdc_carries_actual_values_and_commissioning() {
    init_logger();
    let mut device = load_sample();
    device.od.get_mut(0x2100).unwrap().actual_value = "-50".into();
    device.device_commissioning.node_id = 5;
    device.device_commissioning.node_name = "io8".into();
    device.device_commissioning.baudrate = 250;
    device.device_commissioning.net_number = 1;
    device.device_commissioning.network_name = "line A".into();
    device.device_commissioning.canopen_manager = true;

    let mut diag = Diagnostics::new();
    let xdd = save_xdd_to_string(&device, &mut diag).unwrap();
    assert!(!xdd.contains("actualValue"));

    let xdc = save_xdc_to_string(&device, &mut diag).unwrap();
    assert!(xdc.contains("actualBaudRate=\"250 Kbps\""));

    let loaded = reload(&xdc);
    assert_eq!(loaded.od.get(0x2100).unwrap().actual_value, "-50");
    let dc = &loaded.device_commissioning;
    assert_eq!(dc.node_id, 5);
    assert_eq!(dc.node_name, "io8");
    assert_eq!(dc.baudrate, 250);
    assert_eq!(dc.net_number, 1);
    assert_eq!(dc.network_name, "line A");
    assert!(dc.canopen_manager);
}

#[test]
fn test_byte_encoded_types_reload_as_octet_string() {
    init_logger();
    let mut device = Device::new();
    let mut counter = OdEntry::var("Counter", DataType::Integer24, AccessType::Rw, "255");
    counter.actual_value = "16".into();
    device.od.insert_object(0x2200, counter).unwrap();

    let mut diag = Diagnostics::new();
    let xml = save_to_string(&device, XddKind::Xdc, &mut diag).unwrap();
    assert!(xml.contains("dataType=\"000A\""));
    assert!(xml.contains("defaultValue=\"FF 00 00\""));

    let loaded = reload(&xml);
    let counter = loaded.od.get(0x2200).unwrap();
    assert_eq!(counter.data_type, DataType::OctetString);
    assert_eq!(counter.default_value, "FF 00 00");
    assert_eq!(counter.actual_value, "10 00 00");
}

#[test]
fn test_untyped_array_element_round_trip() {
    init_logger();
    let mut device = Device::new();
    let mut counters = OdEntry::container("Counters", ObjectType::Array);
    counters.data_type = DataType::Integer24;
    device.od.insert_object(0x2100, counters).unwrap();
    device
        .od
        .insert_sub(0x2100, 1, OdEntry::var("c1", DataType::Unknown, AccessType::Ro, "255"))
        .unwrap();
    let mut values = OdEntry::container("Values", ObjectType::Array);
    values.data_type = DataType::Integer16;
    device.od.insert_object(0x2101, values).unwrap();
    device
        .od
        .insert_sub(0x2101, 1, OdEntry::var("v1", DataType::Unknown, AccessType::Rw, "-3"))
        .unwrap();

    let mut diag = Diagnostics::new();
    let xml = save_xdd_to_string(&device, &mut diag).unwrap();
    assert!(diag.is_empty(), "unexpected warnings: {:?}", diag.warnings());
    assert!(xml.contains(r#"subIndex="01" name="c1" objectType="7" dataType="000A""#));
    assert!(xml.contains("<BITSTRING/>"));
    assert!(xml.contains(r#"defaultValue="FF 00 00""#));

    let loaded = reload(&xml);
    let c1 = loaded.od.get_sub(0x2100, 1).unwrap();
    assert_eq!(c1.data_type, DataType::OctetString);
    assert_eq!(c1.default_value, "FF 00 00");
    let v1 = loaded.od.get_sub(0x2101, 1).unwrap();
    assert_eq!(v1.data_type, DataType::Integer16);
    assert_eq!(v1.default_value, "-3");
}

#[test]
fn test_non_numeric_byte_value_is_reported() {
    init_logger();
    let mut device = Device::new();
    device
        .od
        .insert_object(
            0x2300,
            OdEntry::var("Offset", DataType::Unsigned40, AccessType::Ro, "n/a"),
        )
        .unwrap();

    let mut diag = Diagnostics::new();
    let xml = save_xdd_to_string(&device, &mut diag).unwrap();
    assert_eq!(diag.count(WarningKind::ValueConversion), 1);
    assert!(xml.contains("defaultValue=\"n/a\""));
}

#[test]
fn test_custom_properties_round_trip() {
    init_logger();
    let mut device = Device::new();
    let mut entry = OdEntry::var("Safety word", DataType::VisibleString, AccessType::Rw, "ab");
    entry.custom_properties.disabled = true;
    entry.custom_properties.count_label = "SAFE".into();
    entry.custom_properties.storage_group = "PERSIST_APP".into();
    entry.custom_properties.flags_pdo = true;
    entry.custom_properties.access_srdo = AccessSrdo::Trx;
    entry.custom_properties.string_length_min = 8;
    entry.description = "Checked by the safety layer".into();
    entry.denotation = "SW1".into();
    device.od.insert_object(0x2400, entry.clone()).unwrap();

    let mut diag = Diagnostics::new();
    let xml = save_xdd_to_string(&device, &mut diag).unwrap();
    assert!(xml.contains("CO_disabled"));

    let loaded = reload(&xml);
    let back = loaded.od.get(0x2400).unwrap();
    assert_eq!(back.custom_properties, entry.custom_properties);
    assert_eq!(back.description, entry.description);
    assert_eq!(back.denotation, entry.denotation);
}

#[test]
fn test_container_list_round_trip() {
    init_logger();
    let first = load_sample();
    let mut second = Device::new();
    second.device_info.product_name = "Gateway".into();
    second
        .od
        .insert_object(0x1000, OdEntry::var("Device type", DataType::Unsigned32, AccessType::Ro, "0"))
        .unwrap();

    let mut diag = Diagnostics::new();
    let xml = save_multi_to_string(&[first.clone(), second], XddKind::Xdd, &mut diag).unwrap();
    assert!(xml.contains("<ISO15745ProfileContainerList"));

    let devices = load_multi_from_str(&xml, &mut diag).unwrap();
    assert!(diag.is_empty(), "unexpected warnings: {:?}", diag.warnings());
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].od, first.od);
    assert_eq!(devices[1].device_info.product_name, "Gateway");
    assert_eq!(devices[1].od.len(), 1);
}
