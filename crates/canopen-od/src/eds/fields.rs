// crates/canopen-od/src/eds/fields.rs
//! Static field tables for every EDS section type. Each row names the key,
//! where it is exported and how it is read from and written to the model.

use super::InfoType;
use crate::device::{DeviceCommissioning, DeviceInfo, FileInfo, ModuleInfo};
use crate::diagnostics::WarningKind;
use crate::od::value::parse_number;
use crate::od::{AccessType, DataType, ObjectType, OdEntry, PdoMapping};
use alloc::format;
use alloc::string::{String, ToString};

/// Where a field is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTier {
    /// Written to EDS and DCF.
    Both,
    /// Written to DCF only.
    DcfOnly,
    /// Written as `;Key=value`, read either way.
    Comment,
}

/// Why a value could not be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Not a number where one is required.
    NotANumber,
    /// Not one of the accepted tokens.
    InvalidToken,
    /// A fallback value was stored instead; reported as a warning.
    Fallback(WarningKind),
}

pub struct Field<T> {
    pub key: &'static str,
    pub tier: ExportTier,
    /// `None` leaves the key out of the output.
    pub get: fn(&T) -> Option<String>,
    pub set: fn(&mut T, &str) -> Result<(), FieldError>,
}

impl<T> Field<T> {
    pub fn exported_in(&self, info: InfoType) -> bool {
        match self.tier {
            ExportTier::Both | ExportTier::Comment => true,
            ExportTier::DcfOnly => info == InfoType::Dcf,
        }
    }

    /// The key as written, with the comment marker for `Comment` fields.
    pub fn written_key(&self) -> String {
        match self.tier {
            ExportTier::Comment => format!(";{}", self.key),
            _ => self.key.to_string(),
        }
    }
}

/// Finds the row for a key, ignoring case.
pub fn find<T: 'static>(table: &'static [Field<T>], key: &str) -> Option<&'static Field<T>> {
    table.iter().find(|f| f.key.eq_ignore_ascii_case(key))
}

// --- Value helpers ---

/// Parses an integer that has to fit into `N`. An empty value leaves the
/// target untouched.
fn number<N: TryFrom<i64>>(value: &str) -> Result<Option<N>, FieldError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let n = parse_number(value, 0).ok_or(FieldError::NotANumber)?;
    N::try_from(n)
        .map(Some)
        .map_err(|_| FieldError::Fallback(WarningKind::ValueConversion))
}

fn flag(value: &str) -> Result<Option<bool>, FieldError> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("true") {
        return Ok(Some(true));
    }
    if v.eq_ignore_ascii_case("false") {
        return Ok(Some(false));
    }
    Ok(number::<i64>(v)?.map(|n| n != 0))
}

fn flag_str(b: bool) -> Option<String> {
    Some(if b { "1" } else { "0" }.to_string())
}

fn hex32(n: u32) -> Option<String> {
    Some(format!("0x{:08X}", n))
}

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

// --- [FileInfo] ---

pub static FILE_INFO_FIELDS: &[Field<FileInfo>] = &[
    Field {
        key: "FileName",
        tier: ExportTier::Both,
        get: |f| text(&f.file_name),
        set: |f, v| {
            f.file_name = v.into();
            Ok(())
        },
    },
    Field {
        key: "FileVersion",
        tier: ExportTier::Both,
        get: |f| Some(f.file_version.to_string()),
        set: |f, v| {
            if let Some(n) = number(v)? {
                f.file_version = n;
            }
            Ok(())
        },
    },
    Field {
        key: "FileRevision",
        tier: ExportTier::Both,
        get: |f| Some(f.file_revision.to_string()),
        set: |f, v| {
            if let Some(n) = number(v)? {
                f.file_revision = n;
            }
            Ok(())
        },
    },
    Field {
        key: "EDSVersion",
        tier: ExportTier::Both,
        get: |f| text(&f.eds_version),
        set: |f, v| {
            f.eds_version = v.into();
            Ok(())
        },
    },
    Field {
        key: "Description",
        tier: ExportTier::Both,
        get: |f| text(&f.description),
        set: |f, v| {
            f.description = v.into();
            Ok(())
        },
    },
    Field {
        key: "CreationTime",
        tier: ExportTier::Both,
        get: |f| text(&f.creation_time),
        set: |f, v| {
            f.creation_time = v.into();
            Ok(())
        },
    },
    Field {
        key: "CreationDate",
        tier: ExportTier::Both,
        get: |f| text(&f.creation_date),
        set: |f, v| {
            f.creation_date = v.into();
            Ok(())
        },
    },
    Field {
        key: "CreatedBy",
        tier: ExportTier::Both,
        get: |f| text(&f.created_by),
        set: |f, v| {
            f.created_by = v.into();
            Ok(())
        },
    },
    Field {
        key: "ModificationTime",
        tier: ExportTier::Both,
        get: |f| text(&f.modification_time),
        set: |f, v| {
            f.modification_time = v.into();
            Ok(())
        },
    },
    Field {
        key: "ModificationDate",
        tier: ExportTier::Both,
        get: |f| text(&f.modification_date),
        set: |f, v| {
            f.modification_date = v.into();
            Ok(())
        },
    },
    Field {
        key: "ModifiedBy",
        tier: ExportTier::Both,
        get: |f| text(&f.modified_by),
        set: |f, v| {
            f.modified_by = v.into();
            Ok(())
        },
    },
];

// --- [DeviceInfo] ---

pub static DEVICE_INFO_FIELDS: &[Field<DeviceInfo>] = &[
    Field {
        key: "VendorName",
        tier: ExportTier::Both,
        get: |d| text(&d.vendor_name),
        set: |d, v| {
            d.vendor_name = v.into();
            Ok(())
        },
    },
    Field {
        key: "VendorNumber",
        tier: ExportTier::Both,
        get: |d| hex32(d.vendor_number),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.vendor_number = n;
            }
            Ok(())
        },
    },
    Field {
        key: "ProductName",
        tier: ExportTier::Both,
        get: |d| text(&d.product_name),
        set: |d, v| {
            d.product_name = v.into();
            Ok(())
        },
    },
    Field {
        key: "ProductNumber",
        tier: ExportTier::Both,
        get: |d| hex32(d.product_number),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.product_number = n;
            }
            Ok(())
        },
    },
    Field {
        key: "RevisionNumber",
        tier: ExportTier::Both,
        get: |d| hex32(d.revision_number),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.revision_number = n;
            }
            Ok(())
        },
    },
    Field {
        key: "OrderCode",
        tier: ExportTier::Both,
        get: |d| text(&d.order_code),
        set: |d, v| {
            d.order_code = v.into();
            Ok(())
        },
    },
    Field {
        key: "BaudRate_10",
        tier: ExportTier::Both,
        get: |d| flag_str(d.baud_rates.br_10),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.baud_rates.br_10 = b;
            }
            Ok(())
        },
    },
    Field {
        key: "BaudRate_20",
        tier: ExportTier::Both,
        get: |d| flag_str(d.baud_rates.br_20),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.baud_rates.br_20 = b;
            }
            Ok(())
        },
    },
    Field {
        key: "BaudRate_50",
        tier: ExportTier::Both,
        get: |d| flag_str(d.baud_rates.br_50),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.baud_rates.br_50 = b;
            }
            Ok(())
        },
    },
    Field {
        key: "BaudRate_125",
        tier: ExportTier::Both,
        get: |d| flag_str(d.baud_rates.br_125),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.baud_rates.br_125 = b;
            }
            Ok(())
        },
    },
    Field {
        key: "BaudRate_250",
        tier: ExportTier::Both,
        get: |d| flag_str(d.baud_rates.br_250),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.baud_rates.br_250 = b;
            }
            Ok(())
        },
    },
    Field {
        key: "BaudRate_500",
        tier: ExportTier::Both,
        get: |d| flag_str(d.baud_rates.br_500),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.baud_rates.br_500 = b;
            }
            Ok(())
        },
    },
    Field {
        key: "BaudRate_800",
        tier: ExportTier::Both,
        get: |d| flag_str(d.baud_rates.br_800),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.baud_rates.br_800 = b;
            }
            Ok(())
        },
    },
    Field {
        key: "BaudRate_1000",
        tier: ExportTier::Both,
        get: |d| flag_str(d.baud_rates.br_1000),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.baud_rates.br_1000 = b;
            }
            Ok(())
        },
    },
    Field {
        key: "SimpleBootUpMaster",
        tier: ExportTier::Both,
        get: |d| flag_str(d.simple_boot_up_master),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.simple_boot_up_master = b;
            }
            Ok(())
        },
    },
    Field {
        key: "SimpleBootUpSlave",
        tier: ExportTier::Both,
        get: |d| flag_str(d.simple_boot_up_slave),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.simple_boot_up_slave = b;
            }
            Ok(())
        },
    },
    Field {
        key: "Granularity",
        tier: ExportTier::Both,
        get: |d| Some(d.granularity.to_string()),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.granularity = n;
            }
            Ok(())
        },
    },
    Field {
        key: "DynamicChannelsSupported",
        tier: ExportTier::Both,
        get: |d| Some(d.dynamic_channels_supported.to_string()),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.dynamic_channels_supported = n;
            }
            Ok(())
        },
    },
    Field {
        key: "CompactPDO",
        tier: ExportTier::Both,
        get: |d| Some(format!("0x{:02X}", d.compact_pdo)),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.compact_pdo = n;
            }
            Ok(())
        },
    },
    Field {
        key: "GroupMessaging",
        tier: ExportTier::Both,
        get: |d| flag_str(d.group_messaging),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.group_messaging = b;
            }
            Ok(())
        },
    },
    Field {
        key: "NrOfRXPDO",
        tier: ExportTier::Both,
        get: |d| Some(d.nr_of_rx_pdo.to_string()),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.nr_of_rx_pdo = n;
            }
            Ok(())
        },
    },
    Field {
        key: "NrOfTXPDO",
        tier: ExportTier::Both,
        get: |d| Some(d.nr_of_tx_pdo.to_string()),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.nr_of_tx_pdo = n;
            }
            Ok(())
        },
    },
    Field {
        key: "LSS_Supported",
        tier: ExportTier::Both,
        get: |d| flag_str(d.lss_supported),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.lss_supported = b;
            }
            Ok(())
        },
    },
    Field {
        key: "NG_Slave",
        tier: ExportTier::Both,
        get: |d| flag_str(d.ng_slave),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.ng_slave = b;
            }
            Ok(())
        },
    },
    Field {
        key: "NG_Master",
        tier: ExportTier::Both,
        get: |d| flag_str(d.ng_master),
        set: |d, v| {
            if let Some(b) = flag(v)? {
                d.ng_master = b;
            }
            Ok(())
        },
    },
    Field {
        key: "NrOfNG_MonitoredNodes",
        tier: ExportTier::Both,
        get: |d| Some(d.nr_of_ng_monitored_nodes.to_string()),
        set: |d, v| {
            if let Some(n) = number(v)? {
                d.nr_of_ng_monitored_nodes = n;
            }
            Ok(())
        },
    },
];

// --- [DeviceComissioning] ---

pub static DEVICE_COMMISSIONING_FIELDS: &[Field<DeviceCommissioning>] = &[
    Field {
        key: "NodeID",
        tier: ExportTier::DcfOnly,
        get: |c| Some(c.node_id.to_string()),
        set: |c, v| {
            if let Some(n) = number(v)? {
                c.node_id = n;
            }
            Ok(())
        },
    },
    Field {
        key: "NodeName",
        tier: ExportTier::DcfOnly,
        get: |c| text(&c.node_name),
        set: |c, v| {
            c.node_name = v.into();
            Ok(())
        },
    },
    Field {
        key: "Baudrate",
        tier: ExportTier::DcfOnly,
        get: |c| Some(c.baudrate.to_string()),
        set: |c, v| {
            if let Some(n) = number(v)? {
                c.baudrate = n;
            }
            Ok(())
        },
    },
    Field {
        key: "NetNumber",
        tier: ExportTier::DcfOnly,
        get: |c| Some(c.net_number.to_string()),
        set: |c, v| {
            if let Some(n) = number(v)? {
                c.net_number = n;
            }
            Ok(())
        },
    },
    Field {
        key: "NetworkName",
        tier: ExportTier::DcfOnly,
        get: |c| text(&c.network_name),
        set: |c, v| {
            c.network_name = v.into();
            Ok(())
        },
    },
    Field {
        key: "CANopenManager",
        tier: ExportTier::DcfOnly,
        get: |c| flag_str(c.canopen_manager),
        set: |c, v| {
            if let Some(b) = flag(v)? {
                c.canopen_manager = b;
            }
            Ok(())
        },
    },
    Field {
        key: "LSS_SerialNumber",
        tier: ExportTier::DcfOnly,
        get: |c| Some(c.lss_serial_number.to_string()),
        set: |c, v| {
            if let Some(n) = number(v)? {
                c.lss_serial_number = n;
            }
            Ok(())
        },
    },
];

// --- [M<n>ModuleInfo] ---

pub static MODULE_INFO_FIELDS: &[Field<ModuleInfo>] = &[
    Field {
        key: "ProductName",
        tier: ExportTier::Both,
        get: |m| text(&m.product_name),
        set: |m, v| {
            m.product_name = v.into();
            Ok(())
        },
    },
    Field {
        key: "ProductVersion",
        tier: ExportTier::Both,
        get: |m| Some(m.product_version.to_string()),
        set: |m, v| {
            if let Some(n) = number(v)? {
                m.product_version = n;
            }
            Ok(())
        },
    },
    Field {
        key: "ProductRevision",
        tier: ExportTier::Both,
        get: |m| Some(m.product_revision.to_string()),
        set: |m, v| {
            if let Some(n) = number(v)? {
                m.product_revision = n;
            }
            Ok(())
        },
    },
    Field {
        key: "OrderCode",
        tier: ExportTier::Both,
        get: |m| text(&m.order_code),
        set: |m, v| {
            m.order_code = v.into();
            Ok(())
        },
    },
];

// --- Object and sub-entry sections ---

fn is_container(e: &OdEntry) -> bool {
    e.object_type.has_sub_entries()
}

pub static ENTRY_FIELDS: &[Field<OdEntry>] = &[
    Field {
        key: "ParameterName",
        tier: ExportTier::Both,
        get: |e| text(&e.parameter_name),
        set: |e, v| {
            e.parameter_name = v.into();
            Ok(())
        },
    },
    Field {
        key: "ObjectType",
        tier: ExportTier::Both,
        get: |e| Some(format!("0x{:X}", e.object_type.code())),
        set: |e, v| {
            let Some(code) = number::<i64>(v)? else {
                return Ok(());
            };
            match u8::try_from(code).ok().and_then(ObjectType::from_code) {
                Some(t) => {
                    e.object_type = t;
                    Ok(())
                }
                None => {
                    e.object_type = ObjectType::Unknown;
                    Err(FieldError::Fallback(WarningKind::EnumOutOfRange))
                }
            }
        },
    },
    Field {
        key: "DataType",
        tier: ExportTier::Both,
        get: |e| match e.data_type {
            DataType::Unknown => None,
            dt => Some(format!("0x{:04X}", dt.code())),
        },
        set: |e, v| {
            let Some(code) = number::<i64>(v)? else {
                return Ok(());
            };
            match u16::try_from(code).ok().and_then(DataType::from_code) {
                Some(dt) => {
                    e.data_type = dt;
                    Ok(())
                }
                None => {
                    e.data_type = DataType::Unknown;
                    Err(FieldError::Fallback(WarningKind::EnumOutOfRange))
                }
            }
        },
    },
    Field {
        key: "AccessType",
        tier: ExportTier::Both,
        get: |e| match e.access_type {
            AccessType::Unknown => None,
            a => text(a.eds_token()),
        },
        set: |e, v| {
            e.access_type = AccessType::from_eds_token(v).ok_or(FieldError::InvalidToken)?;
            Ok(())
        },
    },
    Field {
        key: "DefaultValue",
        tier: ExportTier::Both,
        get: |e| {
            if is_container(e) {
                non_empty(&e.default_value)
            } else {
                text(&e.default_value)
            }
        },
        set: |e, v| {
            e.default_value = v.into();
            Ok(())
        },
    },
    Field {
        key: "PDOMapping",
        tier: ExportTier::Both,
        get: |e| {
            if is_container(e) && !e.pdo_mapping.is_mappable() {
                None
            } else {
                flag_str(e.pdo_mapping.is_mappable())
            }
        },
        set: |e, v| {
            if let Some(b) = flag(v)? {
                e.pdo_mapping = if b { PdoMapping::Optional } else { PdoMapping::No };
            }
            Ok(())
        },
    },
    Field {
        key: "LowLimit",
        tier: ExportTier::Both,
        get: |e| non_empty(&e.low_limit),
        set: |e, v| {
            e.low_limit = v.into();
            Ok(())
        },
    },
    Field {
        key: "HighLimit",
        tier: ExportTier::Both,
        get: |e| non_empty(&e.high_limit),
        set: |e, v| {
            e.high_limit = v.into();
            Ok(())
        },
    },
    Field {
        key: "ObjFlags",
        tier: ExportTier::Both,
        get: |e| (e.obj_flags != 0).then(|| format!("0x{:X}", e.obj_flags)),
        set: |e, v| {
            if let Some(n) = number(v)? {
                e.obj_flags = n;
            }
            Ok(())
        },
    },
    Field {
        key: "ParameterValue",
        tier: ExportTier::DcfOnly,
        get: |e| non_empty(&e.actual_value),
        set: |e, v| {
            e.actual_value = v.into();
            Ok(())
        },
    },
    Field {
        key: "Denotation",
        tier: ExportTier::DcfOnly,
        get: |e| non_empty(&e.denotation),
        set: |e, v| {
            e.denotation = v.into();
            Ok(())
        },
    },
    Field {
        key: "StorageLocation",
        tier: ExportTier::Comment,
        get: |e| {
            let group = &e.custom_properties.storage_group;
            (group.as_str() != crate::od::DEFAULT_STORAGE_GROUP).then(|| group.clone())
        },
        set: |e, v| {
            e.custom_properties.storage_group = v.into();
            Ok(())
        },
    },
    Field {
        key: "TPDODetectCos",
        tier: ExportTier::Comment,
        get: |e| e.custom_properties.flags_pdo.then(|| "1".to_string()),
        set: |e, v| {
            if let Some(b) = flag(v)? {
                e.custom_properties.flags_pdo = b;
            }
            Ok(())
        },
    },
];
