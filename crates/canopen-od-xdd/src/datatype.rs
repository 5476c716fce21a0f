// crates/canopen-od-xdd/src/datatype.rs

//! Mapping between CANopen data types and the IEC 61131 type elements used
//! inside a `<parameter>`.
//!
//! CANopen types without an IEC counterpart are written as `BITSTRING`; their
//! default value becomes the little-endian byte string of the type width and
//! the `dataType` attribute is written as OCTET_STRING.

use alloc::string::String;
use alloc::vec::Vec;
use canopen_od::od::value::parse_number;
use canopen_od::DataType;

/// The IEC 61131 elementary types a CANopen parameter can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IecType {
    Bool,
    BitString,
    Byte,
    Char,
    Word,
    DWord,
    LWord,
    SInt,
    Int,
    DInt,
    LInt,
    USInt,
    UInt,
    UDInt,
    ULInt,
    Real,
    LReal,
    String,
    WString,
}

/// IEC element for a CANopen type. `None` for the structured types and
/// `Unknown`, which are written without a type element.
pub fn to_iec(data_type: DataType) -> Option<IecType> {
    let iec = match data_type {
        DataType::Boolean => IecType::Bool,
        DataType::Integer8 => IecType::SInt,
        DataType::Integer16 => IecType::Int,
        DataType::Integer32 => IecType::DInt,
        DataType::Integer64 => IecType::LInt,
        DataType::Unsigned8 => IecType::USInt,
        DataType::Unsigned16 => IecType::UInt,
        DataType::Unsigned32 => IecType::UDInt,
        DataType::Unsigned64 => IecType::ULInt,
        DataType::Real32 => IecType::Real,
        DataType::Real64 => IecType::LReal,
        DataType::VisibleString => IecType::String,
        DataType::UnicodeString => IecType::WString,
        DataType::OctetString
        | DataType::Domain
        | DataType::Integer24
        | DataType::Integer40
        | DataType::Integer48
        | DataType::Integer56
        | DataType::Unsigned24
        | DataType::Unsigned40
        | DataType::Unsigned48
        | DataType::Unsigned56
        | DataType::TimeOfDay
        | DataType::TimeDifference => IecType::BitString,
        DataType::Unknown
        | DataType::PdoCommunicationParameter
        | DataType::PdoMapping
        | DataType::SdoParameter
        | DataType::Identity => return None,
    };
    Some(iec)
}

/// CANopen type for an IEC element. `default_value` decides between DOMAIN
/// (empty) and OCTET_STRING for a `BITSTRING`.
pub fn from_iec(iec: IecType, default_value: &str) -> DataType {
    match iec {
        IecType::Bool => DataType::Boolean,
        IecType::SInt => DataType::Integer8,
        IecType::Int => DataType::Integer16,
        IecType::DInt => DataType::Integer32,
        IecType::LInt => DataType::Integer64,
        IecType::USInt | IecType::Byte | IecType::Char => DataType::Unsigned8,
        IecType::UInt | IecType::Word => DataType::Unsigned16,
        IecType::UDInt | IecType::DWord => DataType::Unsigned32,
        IecType::ULInt | IecType::LWord => DataType::Unsigned64,
        IecType::Real => DataType::Real32,
        IecType::LReal => DataType::Real64,
        IecType::String => DataType::VisibleString,
        IecType::WString => DataType::UnicodeString,
        IecType::BitString if default_value.trim().is_empty() => DataType::Domain,
        IecType::BitString => DataType::OctetString,
    }
}

/// Whether the type is carried as a byte string and written as OCTET_STRING.
pub fn is_byte_encoded(data_type: DataType) -> bool {
    matches!(
        data_type,
        DataType::Integer24
            | DataType::Integer40
            | DataType::Integer48
            | DataType::Integer56
            | DataType::Unsigned24
            | DataType::Unsigned40
            | DataType::Unsigned48
            | DataType::Unsigned56
            | DataType::TimeOfDay
            | DataType::TimeDifference
    )
}

/// The `dataType` code written for a type.
pub fn written_code(data_type: DataType) -> u16 {
    if is_byte_encoded(data_type) {
        DataType::OctetString.code()
    } else {
        data_type.code()
    }
}

/// Rewrites a numeric value as space separated little-endian hex bytes of
/// the type width, `INTEGER24 "255"` giving `"FF 00 00"`.
///
/// Returns `None` if the value is not a number. Empty stays empty.
pub fn encode_bytes(data_type: DataType, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(String::new());
    }
    let width = data_type.byte_size()?;
    let number = parse_number(value, 0)?;
    let bytes = number.to_le_bytes();
    let parts: Vec<String> = bytes[..width.min(bytes.len())]
        .iter()
        .map(|b| hex::encode_upper([*b]))
        .collect();
    Some(parts.join(" "))
}
