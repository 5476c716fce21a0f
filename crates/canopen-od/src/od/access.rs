// crates/canopen-od/src/od/access.rs
//! Projection of the EDS access type onto the two independent access axes
//! used by the XML and flat formats, and the way back.
//!
//! Every codec goes through these functions; none of them carries its own
//! copy of the table.

use super::entry::{AccessType, PdoMapping};
use serde::{Deserialize, Serialize};

/// Access over SDO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessSdo {
    #[default]
    No,
    Ro,
    Wo,
    Rw,
}

/// Access over PDO: `t` transmit (readable by a TPDO), `r` receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPdo {
    #[default]
    No,
    T,
    R,
    Tr,
}

impl AccessPdo {
    pub fn can_transmit(self) -> bool {
        matches!(self, AccessPdo::T | AccessPdo::Tr)
    }

    pub fn can_receive(self) -> bool {
        matches!(self, AccessPdo::R | AccessPdo::Tr)
    }
}

impl AccessType {
    pub fn access_sdo(self) -> AccessSdo {
        match self {
            AccessType::Ro | AccessType::Const => AccessSdo::Ro,
            AccessType::Wo => AccessSdo::Wo,
            AccessType::Rw | AccessType::Rwr | AccessType::Rww => AccessSdo::Rw,
            AccessType::Unknown => AccessSdo::No,
        }
    }

    /// PDO direction of an entry. `rwr`/`rww` carry their direction in the
    /// access type itself; the others need `pdo_mapping` to be mappable.
    pub fn access_pdo(self, pdo_mapping: PdoMapping) -> AccessPdo {
        match self {
            AccessType::Rwr => return AccessPdo::T,
            AccessType::Rww => return AccessPdo::R,
            AccessType::Unknown => return AccessPdo::No,
            _ => {}
        }

        match pdo_mapping {
            PdoMapping::No => AccessPdo::No,
            PdoMapping::Tpdo => AccessPdo::T,
            PdoMapping::Rpdo => AccessPdo::R,
            PdoMapping::Optional | PdoMapping::Default => match self {
                AccessType::Ro | AccessType::Const => AccessPdo::T,
                AccessType::Wo => AccessPdo::R,
                _ => AccessPdo::Tr,
            },
        }
    }

    /// Rebuilds the access type from its two axes.
    pub fn from_sdo_pdo(sdo: AccessSdo, pdo: AccessPdo) -> AccessType {
        match (sdo, pdo) {
            (AccessSdo::Rw, AccessPdo::T) => AccessType::Rwr,
            (AccessSdo::Rw, AccessPdo::R) => AccessType::Rww,
            (AccessSdo::Rw, _) => AccessType::Rw,
            (AccessSdo::Ro, _) => AccessType::Ro,
            (AccessSdo::Wo, _) => AccessType::Wo,
            (AccessSdo::No, AccessPdo::No) => AccessType::Unknown,
            (AccessSdo::No, AccessPdo::T) => AccessType::Ro,
            (AccessSdo::No, AccessPdo::R) => AccessType::Wo,
            (AccessSdo::No, AccessPdo::Tr) => AccessType::Rw,
        }
    }

    /// Like [`AccessType::from_sdo_pdo`], with `constant` restoring `const`
    /// for read-only entries.
    pub fn from_sdo_pdo_const(sdo: AccessSdo, pdo: AccessPdo, constant: bool) -> AccessType {
        match AccessType::from_sdo_pdo(sdo, pdo) {
            AccessType::Ro if constant => AccessType::Const,
            other => other,
        }
    }
}

impl PdoMapping {
    pub fn from_access_pdo(pdo: AccessPdo) -> PdoMapping {
        match pdo {
            AccessPdo::No => PdoMapping::No,
            AccessPdo::T | AccessPdo::R | AccessPdo::Tr => PdoMapping::Optional,
        }
    }
}
