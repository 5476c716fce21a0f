// crates/canopen-od/src/od/constants.rs
//! Well-known Object Dictionary indices from CiA 301, using the
//! `IDX_` naming convention.

// --- 0x0001 - 0x0FFF: Data Type Area ---
pub const IDX_DUMMY_FIRST: u16 = 0x0002;
pub const IDX_DUMMY_LAST: u16 = 0x0007;

// --- 0x1000 - 0x1FFF: Communication Profile Area ---
pub const IDX_DEVICE_TYPE: u16 = 0x1000;
pub const IDX_ERROR_REGISTER: u16 = 0x1001;
pub const IDX_IDENTITY_OBJECT: u16 = 0x1018;

/// Entries that always go to `[MandatoryObjects]`.
pub const MANDATORY_OBJECTS: [u16; 3] = [IDX_DEVICE_TYPE, IDX_ERROR_REGISTER, IDX_IDENTITY_OBJECT];

// 0x14xx-0x15xx: RPDO Communication Parameters
pub const IDX_RPDO_COMM_START: u16 = 0x1400;
pub const IDX_RPDO_COMM_END: u16 = 0x15FF;

// 0x16xx-0x17xx: RPDO Mapping Parameters
pub const IDX_RPDO_MAPPING_START: u16 = 0x1600;
pub const IDX_RPDO_MAPPING_END: u16 = 0x17FF;

// 0x18xx-0x19xx: TPDO Communication Parameters
pub const IDX_TPDO_COMM_START: u16 = 0x1800;
pub const IDX_TPDO_COMM_END: u16 = 0x19FF;

// 0x1Axx-0x1Bxx: TPDO Mapping Parameters
pub const IDX_TPDO_MAPPING_START: u16 = 0x1A00;
pub const IDX_TPDO_MAPPING_END: u16 = 0x1BFF;

/// Offset between a PDO communication record and its mapping record.
pub const PDO_MAPPING_OFFSET: u16 = 0x200;

// --- 0x2000 - 0x5FFF: Manufacturer Specific Area ---
pub const IDX_MANUFACTURER_START: u16 = 0x2000;
pub const IDX_MANUFACTURER_END: u16 = 0x5FFF;

/// Number of mapping slots written into a synthesized PDO mapping record.
pub const PDO_MAPPING_SLOTS: u8 = 8;

/// Highest number of entries a `CompactSubObj` expansion may generate.
pub const COMPACT_SUB_OBJ_MAX: u16 = 254;
