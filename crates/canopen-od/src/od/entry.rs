use super::datatype::DataType;
use alloc::string::String;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// Object code of an OD entry (CiA 301, Table 42).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectType {
    Null,
    Domain,
    DefType,
    DefStruct,
    #[default]
    Var,
    Array,
    Record,
    /// No distinction available in the source representation.
    Unknown,
}

impl ObjectType {
    /// The numeric object code written to EDS `ObjectType=` and XDD `@objectType`.
    /// `Unknown` is written as VAR, which is what CiA 306 assumes for a
    /// missing `ObjectType`.
    pub fn code(self) -> u8 {
        match self {
            ObjectType::Null => 0,
            ObjectType::Domain => 2,
            ObjectType::DefType => 5,
            ObjectType::DefStruct => 6,
            ObjectType::Var | ObjectType::Unknown => 7,
            ObjectType::Array => 8,
            ObjectType::Record => 9,
        }
    }

    pub fn from_code(code: u8) -> Option<ObjectType> {
        match code {
            0 => Some(ObjectType::Null),
            2 => Some(ObjectType::Domain),
            5 => Some(ObjectType::DefType),
            6 => Some(ObjectType::DefStruct),
            7 => Some(ObjectType::Var),
            8 => Some(ObjectType::Array),
            9 => Some(ObjectType::Record),
            _ => None,
        }
    }

    /// ARRAY and RECORD are the only types that own sub-entries.
    pub fn has_sub_entries(self) -> bool {
        matches!(self, ObjectType::Array | ObjectType::Record)
    }
}

/// EDS access type. `Rwr`/`Rww` are `Rw` refined with TPDO/RPDO mappability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessType {
    Ro,
    Wo,
    Rw,
    /// read/write, mappable to a TPDO
    Rwr,
    /// read/write, mappable to an RPDO
    Rww,
    Const,
    #[default]
    Unknown,
}

impl AccessType {
    pub const CONCRETE: [AccessType; 6] = [
        AccessType::Ro,
        AccessType::Wo,
        AccessType::Rw,
        AccessType::Rwr,
        AccessType::Rww,
        AccessType::Const,
    ];

    /// The lowercase token used in EDS files.
    pub fn eds_token(self) -> &'static str {
        match self {
            AccessType::Ro => "ro",
            AccessType::Wo => "wo",
            AccessType::Rw => "rw",
            AccessType::Rwr => "rwr",
            AccessType::Rww => "rww",
            AccessType::Const => "const",
            AccessType::Unknown => "",
        }
    }

    /// Parses an EDS token, case-insensitively.
    pub fn from_eds_token(token: &str) -> Option<AccessType> {
        let token = token.trim();
        AccessType::CONCRETE
            .iter()
            .copied()
            .find(|a| a.eds_token().eq_ignore_ascii_case(token))
    }
}

/// PDO mapping capability of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdoMapping {
    #[default]
    No,
    Optional,
    Rpdo,
    Tpdo,
    Default,
}

impl PdoMapping {
    pub fn is_mappable(self) -> bool {
        self != PdoMapping::No
    }
}

/// SRDO access of an entry (CANopenNode extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessSrdo {
    #[default]
    No,
    Tx,
    Rx,
    Trx,
}

impl AccessSrdo {
    pub fn token(self) -> &'static str {
        match self {
            AccessSrdo::No => "no",
            AccessSrdo::Tx => "tx",
            AccessSrdo::Rx => "rx",
            AccessSrdo::Trx => "trx",
        }
    }

    pub fn from_token(token: &str) -> Option<AccessSrdo> {
        match token.trim().to_ascii_lowercase().as_str() {
            "no" => Some(AccessSrdo::No),
            "tx" => Some(AccessSrdo::Tx),
            "rx" => Some(AccessSrdo::Rx),
            "trx" => Some(AccessSrdo::Trx),
            _ => None,
        }
    }
}

pub const DEFAULT_STORAGE_GROUP: &str = "RAM";

/// CANopenNode specific properties carried next to the standard fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomProperties {
    /// Entry is kept in the model but never exported.
    pub disabled: bool,
    pub count_label: String,
    pub storage_group: String,
    /// Detect change-of-state for TPDO mapped variables.
    pub flags_pdo: bool,
    pub access_srdo: AccessSrdo,
    pub string_length_min: u32,
}

impl Default for CustomProperties {
    fn default() -> Self {
        Self {
            disabled: false,
            count_label: String::new(),
            storage_group: DEFAULT_STORAGE_GROUP.into(),
            flags_pdo: false,
            access_srdo: AccessSrdo::No,
            string_length_min: 0,
        }
    }
}

/// Arena key of an entry. `subindex == None` addresses the object itself,
/// `Some(n)` its sub-entry `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub index: u16,
    pub subindex: Option<u8>,
}

impl EntryKey {
    pub const fn object(index: u16) -> Self {
        Self {
            index,
            subindex: None,
        }
    }

    pub const fn sub(index: u16, subindex: u8) -> Self {
        Self {
            index,
            subindex: Some(subindex),
        }
    }

    /// The owning object, or `None` if this key already is an object.
    pub fn parent(self) -> Option<EntryKey> {
        self.subindex.map(|_| EntryKey::object(self.index))
    }

    pub fn is_sub_entry(self) -> bool {
        self.subindex.is_some()
    }
}

impl Ord for EntryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // The object sorts directly before its own sub-entries.
        self.index
            .cmp(&other.index)
            .then_with(|| self.subindex.cmp(&other.subindex))
    }
}

impl PartialOrd for EntryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single Object Dictionary entry, either an object or one of its
/// sub-entries. Its address lives in the [`EntryKey`] it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OdEntry {
    pub parameter_name: String,
    pub object_type: ObjectType,
    pub data_type: DataType,
    pub access_type: AccessType,
    pub pdo_mapping: PdoMapping,
    pub default_value: String,
    pub actual_value: String,
    pub low_limit: String,
    pub high_limit: String,
    pub description: String,
    pub denotation: String,
    pub obj_flags: u32,
    pub custom_properties: CustomProperties,
}

impl OdEntry {
    /// Creates a VAR entry with the given name, type and access.
    pub fn var(
        name: impl Into<String>,
        data_type: DataType,
        access_type: AccessType,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            parameter_name: name.into(),
            object_type: ObjectType::Var,
            data_type,
            access_type,
            default_value: default_value.into(),
            ..Default::default()
        }
    }

    /// Creates an empty ARRAY or RECORD object.
    pub fn container(name: impl Into<String>, object_type: ObjectType) -> Self {
        Self {
            parameter_name: name.into(),
            object_type,
            ..Default::default()
        }
    }

    pub fn with_pdo_mapping(mut self, pdo_mapping: PdoMapping) -> Self {
        self.pdo_mapping = pdo_mapping;
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.custom_properties.disabled
    }
}
