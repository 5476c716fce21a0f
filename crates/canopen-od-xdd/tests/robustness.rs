//! Integration tests focused on error handling and edge cases.
//!
//! These tests ensure the reader reports malformed XML, invalid attributes,
//! missing mandatory elements and inconsistent object lists without
//! panicking, and that recoverable problems end up as warnings.

use canopen_od::{DataType, Diagnostics, OdError, WarningKind};
use canopen_od_xdd::{XddError, load_xdd_from_str};

const DEVICE_PROFILE: &str = r#"
  <ISO15745Profile>
    <ProfileHeader>
      <ProfileIdentification>CANopen device profile</ProfileIdentification>
      <ProfileRevision>1</ProfileRevision>
      <ProfileName>Test</ProfileName>
      <ProfileSource/>
      <ProfileClassID>Device</ProfileClassID>
    </ProfileHeader>
    <ProfileBody xsi:type="ProfileBody_Device_CANopen" fileName="test.xdd" fileCreationDate="2024-01-01" fileVersion="1.0">
      <DeviceIdentity>
        <vendorName>TestVendor</vendorName>
        <productName>TestProduct</productName>
      </DeviceIdentity>
    </ProfileBody>
  </ISO15745Profile>"#;

/// Wraps a communication profile body into a full document.
fn document(comm_body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ISO15745ProfileContainer xmlns="http://www.canopen.org/xml/1.1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{}
  <ISO15745Profile>
    <ProfileHeader>
      <ProfileIdentification>CANopen communication network profile</ProfileIdentification>
      <ProfileRevision>1</ProfileRevision>
      <ProfileName>Test</ProfileName>
      <ProfileSource/>
      <ProfileClassID>CommunicationNetwork</ProfileClassID>
    </ProfileHeader>
    <ProfileBody xsi:type="ProfileBody_CommunicationNetwork_CANopen">{}
    </ProfileBody>
  </ISO15745Profile>
</ISO15745ProfileContainer>"#,
        DEVICE_PROFILE, comm_body
    )
}

fn object_list(objects: &str) -> String {
    document(&format!(
        "<ApplicationLayers><CANopenObjectList>{}</CANopenObjectList></ApplicationLayers>",
        objects
    ))
}

#[test]
fn test_missing_application_layers() {
    let xml = document("<NetworkManagement><CANopenGeneralFeatures/></NetworkManagement>");
    let mut diag = Diagnostics::new();
    let result = load_xdd_from_str(&xml, &mut diag);
    assert!(matches!(
        result,
        Err(XddError::MissingElement {
            element: "ApplicationLayers"
        })
    ));
}

#[test]
fn test_malformed_xml() {
    let mut diag = Diagnostics::new();
    let result = load_xdd_from_str("<ISO15745ProfileContainer><ISO15745Profile>", &mut diag);
    assert!(matches!(result, Err(XddError::XmlParsing(_))));
}

#[test]
fn test_invalid_index() {
    let xml = object_list(r#"<CANopenObject index="10G0" name="Bad" objectType="7"/>"#);
    let mut diag = Diagnostics::new();
    let result = load_xdd_from_str(&xml, &mut diag);
    assert!(matches!(
        result,
        Err(XddError::InvalidAttributeFormat { .. })
    ));
}

#[test]
fn test_invalid_sub_index() {
    let xml = object_list(
        r#"<CANopenObject index="1018" name="Identity" objectType="9" subNumber="1">
             <CANopenSubObject subIndex="1FF" name="Bad" objectType="7" dataType="0005"/>
           </CANopenObject>"#,
    );
    let mut diag = Diagnostics::new();
    let result = load_xdd_from_str(&xml, &mut diag);
    assert!(matches!(
        result,
        Err(XddError::InvalidAttributeFormat { .. })
    ));
}

#[test]
fn test_unknown_object_type() {
    let xml = object_list(r#"<CANopenObject index="2000" name="Odd" objectType="12"/>"#);
    let mut diag = Diagnostics::new();
    let result = load_xdd_from_str(&xml, &mut diag);
    match result {
        Err(XddError::UnknownEnumValue { attribute, value }) => {
            assert_eq!(attribute, "objectType");
            assert_eq!(value, "12");
        }
        other => panic!("expected UnknownEnumValue, got {:?}", other),
    }
}

#[test]
fn test_duplicate_index() {
    let xml = object_list(
        r#"<CANopenObject index="2000" name="A" objectType="7" dataType="0005"/>
           <CANopenObject index="2000" name="B" objectType="7" dataType="0005"/>"#,
    );
    let mut diag = Diagnostics::new();
    let result = load_xdd_from_str(&xml, &mut diag);
    assert!(matches!(
        result,
        Err(XddError::Od(OdError::DuplicateIndex(0x2000)))
    ));
}

#[test]
fn test_recoverable_problems_are_warnings() {
    let xml = object_list(
        r#"<CANopenObject index="2000" name="A" objectType="7" dataType="0FFF" objFlags="zz" uniqueIDRef="UID_MISSING"/>
           <CANopenObject index="2001" name="B" objectType="9" subNumber="2">
             <CANopenSubObject subIndex="00" name="Count" objectType="7" dataType="0005" defaultValue="1"/>
             <CANopenSubObject subIndex="00" name="Count again" objectType="7" dataType="0005" defaultValue="2"/>
           </CANopenObject>"#,
    );
    let mut diag = Diagnostics::new();
    let device = load_xdd_from_str(&xml, &mut diag).unwrap();

    let a = device.od.get(0x2000).unwrap();
    assert_eq!(a.data_type, DataType::Unknown);
    assert_eq!(a.obj_flags, 0);
    assert_eq!(device.od.get_sub(0x2001, 0).unwrap().default_value, "2");

    assert_eq!(diag.count(WarningKind::EnumOutOfRange), 1);
    assert_eq!(diag.count(WarningKind::ValueConversion), 1);
    assert_eq!(diag.count(WarningKind::UnresolvedReference), 1);
    assert_eq!(diag.count(WarningKind::DuplicateKey), 1);
}

#[test]
fn test_malformed_timestamp_falls_back_to_epoch() {
    let xml = object_list("").replace("2024-01-01", "01/01/2024");
    let mut diag = Diagnostics::new();
    let device = load_xdd_from_str(&xml, &mut diag).unwrap();
    assert_eq!(device.file_info.creation_date, "01-01-1970");
    assert_eq!(diag.count(WarningKind::MalformedTimestamp), 1);
}

#[test]
fn test_sub_object_under_var_is_a_warning() {
    let xml = object_list(
        r#"<CANopenObject index="2000" name="Plain" objectType="7" dataType="0005" defaultValue="1">
             <CANopenSubObject subIndex="01" name="Stray" objectType="7" dataType="0005"/>
           </CANopenObject>"#,
    );
    let mut diag = Diagnostics::new();
    let device = load_xdd_from_str(&xml, &mut diag).unwrap();
    assert_eq!(device.od.get(0x2000).unwrap().default_value, "1");
    assert_eq!(device.od.sub_count(0x2000), 0);
    assert_eq!(diag.count(WarningKind::UnresolvedReference), 1);
}
