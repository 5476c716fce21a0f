// crates/canopen-od/src/od/datatype.rs

use serde::{Deserialize, Serialize};

/// CiA 301 data types (Table 44), identified by their 16-bit index in the
/// data type area of the Object Dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Placeholder. On a sub-entry of an ARRAY it means "use the parent's type".
    #[default]
    Unknown,
    Boolean,
    Integer8,
    Integer16,
    Integer32,
    Unsigned8,
    Unsigned16,
    Unsigned32,
    Real32,
    VisibleString,
    OctetString,
    UnicodeString,
    TimeOfDay,
    TimeDifference,
    Domain,
    Integer24,
    Real64,
    Integer40,
    Integer48,
    Integer56,
    Integer64,
    Unsigned24,
    Unsigned40,
    Unsigned48,
    Unsigned56,
    Unsigned64,
    PdoCommunicationParameter,
    PdoMapping,
    SdoParameter,
    Identity,
}

impl DataType {
    /// All concrete data types, in code order.
    pub const ALL: [DataType; 29] = [
        DataType::Boolean,
        DataType::Integer8,
        DataType::Integer16,
        DataType::Integer32,
        DataType::Unsigned8,
        DataType::Unsigned16,
        DataType::Unsigned32,
        DataType::Real32,
        DataType::VisibleString,
        DataType::OctetString,
        DataType::UnicodeString,
        DataType::TimeOfDay,
        DataType::TimeDifference,
        DataType::Domain,
        DataType::Integer24,
        DataType::Real64,
        DataType::Integer40,
        DataType::Integer48,
        DataType::Integer56,
        DataType::Integer64,
        DataType::Unsigned24,
        DataType::Unsigned40,
        DataType::Unsigned48,
        DataType::Unsigned56,
        DataType::Unsigned64,
        DataType::PdoCommunicationParameter,
        DataType::PdoMapping,
        DataType::SdoParameter,
        DataType::Identity,
    ];

    /// The data type index as written in EDS `DataType=` and XDD `@dataType`.
    pub fn code(self) -> u16 {
        match self {
            DataType::Unknown => 0x0000,
            DataType::Boolean => 0x0001,
            DataType::Integer8 => 0x0002,
            DataType::Integer16 => 0x0003,
            DataType::Integer32 => 0x0004,
            DataType::Unsigned8 => 0x0005,
            DataType::Unsigned16 => 0x0006,
            DataType::Unsigned32 => 0x0007,
            DataType::Real32 => 0x0008,
            DataType::VisibleString => 0x0009,
            DataType::OctetString => 0x000A,
            DataType::UnicodeString => 0x000B,
            DataType::TimeOfDay => 0x000C,
            DataType::TimeDifference => 0x000D,
            DataType::Domain => 0x000F,
            DataType::Integer24 => 0x0010,
            DataType::Real64 => 0x0011,
            DataType::Integer40 => 0x0012,
            DataType::Integer48 => 0x0013,
            DataType::Integer56 => 0x0014,
            DataType::Integer64 => 0x0015,
            DataType::Unsigned24 => 0x0016,
            DataType::Unsigned40 => 0x0018,
            DataType::Unsigned48 => 0x0019,
            DataType::Unsigned56 => 0x001A,
            DataType::Unsigned64 => 0x001B,
            DataType::PdoCommunicationParameter => 0x0020,
            DataType::PdoMapping => 0x0021,
            DataType::SdoParameter => 0x0022,
            DataType::Identity => 0x0023,
        }
    }

    /// Reverse of [`DataType::code`]. Returns `None` for reserved or
    /// manufacturer-specific codes.
    pub fn from_code(code: u16) -> Option<DataType> {
        DataType::ALL.iter().copied().find(|dt| dt.code() == code)
    }

    /// Size in bits for fixed-size types, `None` for strings, domains and
    /// the structured types.
    pub fn bit_size(self) -> Option<u32> {
        match self {
            DataType::Boolean => Some(1),
            DataType::Integer8 | DataType::Unsigned8 => Some(8),
            DataType::Integer16 | DataType::Unsigned16 => Some(16),
            DataType::Integer24 | DataType::Unsigned24 => Some(24),
            DataType::Integer32 | DataType::Unsigned32 | DataType::Real32 => Some(32),
            DataType::Integer40 | DataType::Unsigned40 => Some(40),
            DataType::Integer48 | DataType::Unsigned48 => Some(48),
            DataType::TimeOfDay | DataType::TimeDifference => Some(48),
            DataType::Integer56 | DataType::Unsigned56 => Some(56),
            DataType::Integer64 | DataType::Unsigned64 | DataType::Real64 => Some(64),
            DataType::Unknown
            | DataType::VisibleString
            | DataType::OctetString
            | DataType::UnicodeString
            | DataType::Domain
            | DataType::PdoCommunicationParameter
            | DataType::PdoMapping
            | DataType::SdoParameter
            | DataType::Identity => None,
        }
    }

    /// Size in whole bytes, rounding BOOLEAN up to one byte.
    pub fn byte_size(self) -> Option<usize> {
        self.bit_size().map(|bits| bits.div_ceil(8) as usize)
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            DataType::Integer8
                | DataType::Integer16
                | DataType::Integer24
                | DataType::Integer32
                | DataType::Integer40
                | DataType::Integer48
                | DataType::Integer56
                | DataType::Integer64
        )
    }

    /// The CiA 301 name, e.g. `UNSIGNED32`.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Unknown => "UNKNOWN",
            DataType::Boolean => "BOOLEAN",
            DataType::Integer8 => "INTEGER8",
            DataType::Integer16 => "INTEGER16",
            DataType::Integer32 => "INTEGER32",
            DataType::Unsigned8 => "UNSIGNED8",
            DataType::Unsigned16 => "UNSIGNED16",
            DataType::Unsigned32 => "UNSIGNED32",
            DataType::Real32 => "REAL32",
            DataType::VisibleString => "VISIBLE_STRING",
            DataType::OctetString => "OCTET_STRING",
            DataType::UnicodeString => "UNICODE_STRING",
            DataType::TimeOfDay => "TIME_OF_DAY",
            DataType::TimeDifference => "TIME_DIFFERENCE",
            DataType::Domain => "DOMAIN",
            DataType::Integer24 => "INTEGER24",
            DataType::Real64 => "REAL64",
            DataType::Integer40 => "INTEGER40",
            DataType::Integer48 => "INTEGER48",
            DataType::Integer56 => "INTEGER56",
            DataType::Integer64 => "INTEGER64",
            DataType::Unsigned24 => "UNSIGNED24",
            DataType::Unsigned40 => "UNSIGNED40",
            DataType::Unsigned48 => "UNSIGNED48",
            DataType::Unsigned56 => "UNSIGNED56",
            DataType::Unsigned64 => "UNSIGNED64",
            DataType::PdoCommunicationParameter => "PDO_COMMUNICATION_PARAMETER",
            DataType::PdoMapping => "PDO_MAPPING",
            DataType::SdoParameter => "SDO_PARAMETER",
            DataType::Identity => "IDENTITY",
        }
    }
}
