// crates/canopen-od/src/device.rs

use crate::od::{self, ObjectDictionary};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// `[FileInfo]` of an EDS, and the ProfileBody file attributes of an XDD.
///
/// Dates are kept as `MM-dd-yyyy` and times as `h:mmAM` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub file_name: String,
    pub file_version: u8,
    pub file_revision: u8,
    pub eds_version: String,
    pub description: String,
    pub creation_time: String,
    pub creation_date: String,
    pub created_by: String,
    pub modification_time: String,
    pub modification_date: String,
    pub modified_by: String,
}

impl Default for FileInfo {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            file_version: 1,
            file_revision: 0,
            eds_version: "4.0".into(),
            description: String::new(),
            creation_time: String::new(),
            creation_date: String::new(),
            created_by: String::new(),
            modification_time: String::new(),
            modification_date: String::new(),
            modified_by: String::new(),
        }
    }
}

/// Supported bit rates, one flag per `BaudRate_<kbit>` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaudRates {
    pub br_10: bool,
    pub br_20: bool,
    pub br_50: bool,
    pub br_125: bool,
    pub br_250: bool,
    pub br_500: bool,
    pub br_800: bool,
    pub br_1000: bool,
}

impl BaudRates {
    /// kbit/s value of each flag, in key order.
    pub const RATES: [u16; 8] = [10, 20, 50, 125, 250, 500, 800, 1000];

    pub fn get(&self, kbit: u16) -> bool {
        match kbit {
            10 => self.br_10,
            20 => self.br_20,
            50 => self.br_50,
            125 => self.br_125,
            250 => self.br_250,
            500 => self.br_500,
            800 => self.br_800,
            1000 => self.br_1000,
            _ => false,
        }
    }

    pub fn set(&mut self, kbit: u16, supported: bool) {
        match kbit {
            10 => self.br_10 = supported,
            20 => self.br_20 = supported,
            50 => self.br_50 = supported,
            125 => self.br_125 = supported,
            250 => self.br_250 = supported,
            500 => self.br_500 = supported,
            800 => self.br_800 = supported,
            1000 => self.br_1000 = supported,
            _ => {}
        }
    }
}

/// `[DeviceInfo]` of an EDS.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    pub vendor_name: String,
    pub vendor_number: u32,
    pub product_name: String,
    pub product_number: u32,
    pub revision_number: u32,
    pub order_code: String,
    pub baud_rates: BaudRates,
    pub simple_boot_up_master: bool,
    pub simple_boot_up_slave: bool,
    pub granularity: u8,
    pub dynamic_channels_supported: u8,
    /// Bitmask of PDO communication sub-entries a parser has to add when
    /// they are left out (bit 0 COB-ID .. bit 4 event timer).
    pub compact_pdo: u8,
    pub group_messaging: bool,
    pub nr_of_rx_pdo: u16,
    pub nr_of_tx_pdo: u16,
    pub lss_supported: bool,
    pub ng_slave: bool,
    pub ng_master: bool,
    pub nr_of_ng_monitored_nodes: u8,
}

/// `[DeviceComissioning]` of a DCF.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceCommissioning {
    pub node_id: u8,
    pub node_name: String,
    /// kbit/s
    pub baudrate: u16,
    pub net_number: u32,
    pub network_name: String,
    pub canopen_manager: bool,
    pub lss_serial_number: u32,
}

/// `[M<n>ModuleInfo]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleInfo {
    pub product_name: String,
    pub product_version: u8,
    pub product_revision: u8,
    pub order_code: String,
}

/// A CiA 302 module description: objects it always adds and objects that
/// are extended by one sub-entry per plugged instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    pub info: ModuleInfo,
    pub comments: Vec<String>,
    pub fixed_objects: ObjectDictionary,
    pub sub_extends: ObjectDictionary,
}

/// The aggregate root: one device description with its Object Dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub file_info: FileInfo,
    pub device_info: DeviceInfo,
    pub device_commissioning: DeviceCommissioning,
    pub od: ObjectDictionary,
    /// Standard dummy entries 0x0002-0x0007; never exported as objects.
    pub dummy_ods: ObjectDictionary,
    /// `Dummy<index>=0|1` flags from `[DummyUsage]`.
    pub dummy_usage: BTreeMap<u16, bool>,
    pub comments: Vec<String>,
    /// Keyed by the 1-based module number.
    pub modules: BTreeMap<u16, Module>,
}

impl Default for Device {
    fn default() -> Self {
        Self::new()
    }
}

impl Device {
    /// An empty device that only carries the dummy entries.
    pub fn new() -> Self {
        Self {
            file_info: FileInfo::default(),
            device_info: DeviceInfo::default(),
            device_commissioning: DeviceCommissioning::default(),
            od: ObjectDictionary::new(),
            dummy_ods: od::dummy_objects(),
            dummy_usage: BTreeMap::new(),
            comments: Vec::new(),
            modules: BTreeMap::new(),
        }
    }

    /// Node id used to evaluate `$NODEID` expressions.
    pub fn node_id(&self) -> u8 {
        self.device_commissioning.node_id
    }

    /// Whether `index` is a dummy entry that may be mapped into a PDO.
    pub fn is_dummy(&self, index: u16) -> bool {
        self.dummy_ods.contains_index(index)
    }
}
