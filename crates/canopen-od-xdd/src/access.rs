// crates/canopen-od-xdd/src/access.rs

//! Access type and PDO mapping in both XML spellings: the six-valued
//! parameter `@access` and the object level `@accessType`/`@PDOmapping`.

use crate::model::app_layers::{ObjectAccessType, ObjectPdoMapping};
use crate::model::app_process::ParameterAccess;
use canopen_od::od::{AccessPdo, AccessSdo};
use canopen_od::{AccessType, PdoMapping};

/// Parameter access of an entry. The SDO/PDO pair decides between the
/// three read/write flavours; `Unknown` has no parameter access.
pub fn to_parameter_access(access: AccessType, pdo_mapping: PdoMapping) -> Option<ParameterAccess> {
    if access == AccessType::Const {
        return Some(ParameterAccess::Constant);
    }
    let access = match (access.access_sdo(), access.access_pdo(pdo_mapping)) {
        (AccessSdo::Ro, _) => ParameterAccess::Read,
        (AccessSdo::Wo, _) => ParameterAccess::Write,
        (AccessSdo::Rw, AccessPdo::R) => ParameterAccess::ReadWriteInput,
        (AccessSdo::Rw, AccessPdo::T) => ParameterAccess::ReadWriteOutput,
        (AccessSdo::Rw, _) => ParameterAccess::ReadWrite,
        (AccessSdo::No, _) => return None,
    };
    Some(access)
}

pub fn from_parameter_access(access: ParameterAccess) -> AccessType {
    match access {
        ParameterAccess::Read => AccessType::Ro,
        ParameterAccess::Write => AccessType::Wo,
        ParameterAccess::ReadWrite => AccessType::Rw,
        ParameterAccess::ReadWriteOutput => AccessType::Rwr,
        ParameterAccess::ReadWriteInput => AccessType::Rww,
        ParameterAccess::Constant => AccessType::Const,
        ParameterAccess::NoAccess => AccessType::Unknown,
    }
}

/// The object level `@accessType` is written with `ro`, `wo`, `rw` and
/// `const` only.
pub fn to_object_access(access: AccessType) -> Option<ObjectAccessType> {
    match access {
        AccessType::Ro => Some(ObjectAccessType::ReadOnly),
        AccessType::Wo => Some(ObjectAccessType::WriteOnly),
        AccessType::Rw | AccessType::Rwr | AccessType::Rww => Some(ObjectAccessType::ReadWrite),
        AccessType::Const => Some(ObjectAccessType::Constant),
        AccessType::Unknown => None,
    }
}

pub fn from_object_access(access: ObjectAccessType) -> AccessType {
    match access {
        ObjectAccessType::ReadOnly => AccessType::Ro,
        ObjectAccessType::WriteOnly => AccessType::Wo,
        ObjectAccessType::ReadWrite => AccessType::Rw,
        ObjectAccessType::ReadWriteTpdo => AccessType::Rwr,
        ObjectAccessType::ReadWriteRpdo => AccessType::Rww,
        ObjectAccessType::Constant => AccessType::Const,
    }
}

pub fn to_object_pdo_mapping(mapping: PdoMapping) -> ObjectPdoMapping {
    match mapping {
        PdoMapping::No => ObjectPdoMapping::No,
        PdoMapping::Optional => ObjectPdoMapping::Optional,
        PdoMapping::Rpdo => ObjectPdoMapping::Rpdo,
        PdoMapping::Tpdo => ObjectPdoMapping::Tpdo,
        PdoMapping::Default => ObjectPdoMapping::Default,
    }
}

pub fn from_object_pdo_mapping(mapping: ObjectPdoMapping) -> PdoMapping {
    match mapping {
        ObjectPdoMapping::No => PdoMapping::No,
        ObjectPdoMapping::Optional => PdoMapping::Optional,
        ObjectPdoMapping::Rpdo => PdoMapping::Rpdo,
        ObjectPdoMapping::Tpdo => PdoMapping::Tpdo,
        ObjectPdoMapping::Default => PdoMapping::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_access_inverse() {
        for access in AccessType::CONCRETE {
            for mapping in [PdoMapping::No, PdoMapping::Optional] {
                let xml = to_parameter_access(access, mapping).unwrap();
                assert_eq!(from_parameter_access(xml), access, "{:?}/{:?}", access, mapping);
            }
        }
    }

    #[test]
    fn test_rw_direction_comes_from_pdo_mapping() {
        assert_eq!(
            to_parameter_access(AccessType::Rw, PdoMapping::Rpdo),
            Some(ParameterAccess::ReadWriteInput)
        );
        assert_eq!(
            to_parameter_access(AccessType::Rw, PdoMapping::Tpdo),
            Some(ParameterAccess::ReadWriteOutput)
        );
        assert_eq!(
            to_parameter_access(AccessType::Rw, PdoMapping::Optional),
            Some(ParameterAccess::ReadWrite)
        );
        assert_eq!(to_parameter_access(AccessType::Unknown, PdoMapping::No), None);
        assert_eq!(from_parameter_access(ParameterAccess::NoAccess), AccessType::Unknown);
    }

    #[test]
    fn test_object_access_is_coarse() {
        assert_eq!(to_object_access(AccessType::Rww), Some(ObjectAccessType::ReadWrite));
        assert_eq!(to_object_access(AccessType::Const), Some(ObjectAccessType::Constant));
        assert_eq!(from_object_access(ObjectAccessType::ReadWriteRpdo), AccessType::Rww);
    }

    #[test]
    fn test_pdo_mapping_is_one_to_one() {
        for mapping in [
            PdoMapping::No,
            PdoMapping::Optional,
            PdoMapping::Rpdo,
            PdoMapping::Tpdo,
            PdoMapping::Default,
        ] {
            assert_eq!(from_object_pdo_mapping(to_object_pdo_mapping(mapping)), mapping);
        }
    }
}
