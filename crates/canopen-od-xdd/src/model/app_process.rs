// crates/canopen-od-xdd/src/model/app_process.rs

//! Contains model structs related to `<ApplicationProcess>` and its
//! `<parameterList>`.
//! (Schema: `ProfileBody_Device_CANopen.xsd`)

use super::common::{Description, Empty, Glabels, Label};
use crate::datatype::IecType;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Represents `<ApplicationProcess>`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ApplicationProcess {
    #[serde(rename = "parameterList", default)]
    pub parameter_list: ParameterList,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ParameterList {
    #[serde(rename = "parameter", default)]
    pub parameter: Vec<Parameter>,
}

/// Access of a parameter (`@access`).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ParameterAccess {
    #[serde(rename = "const")]
    Constant,
    #[serde(rename = "read")]
    Read,
    #[serde(rename = "write")]
    Write,
    #[serde(rename = "readWrite")]
    ReadWrite,
    #[serde(rename = "readWriteInput")]
    ReadWriteInput,
    #[serde(rename = "readWriteOutput")]
    ReadWriteOutput,
    #[serde(rename = "noAccess")]
    NoAccess,
}

/// Represents `<defaultValue value="..."/>` and `<actualValue value="..."/>`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Value {
    #[serde(rename = "@value", default)]
    pub value: String,
}

/// Represents `<property name="..." value="..."/>`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Property {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value", default)]
    pub value: String,
}

/// Represents a `<parameter>`.
///
/// The IEC 61131 type is a choice of empty elements; each possible element
/// has its own field and at most one of them is set.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Parameter {
    /// e.g. "UID_OBJ_1000" or "UID_SUB_101801".
    #[serde(rename = "@uniqueID")]
    pub unique_id: String,

    #[serde(rename = "@access", default, skip_serializing_if = "Option::is_none")]
    pub access: Option<ParameterAccess>,

    // --- Elements ---
    #[serde(rename = "label", default, skip_serializing_if = "Vec::is_empty")]
    pub label: Vec<Label>,

    #[serde(rename = "description", default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<Description>,

    #[serde(rename = "BOOL", default, skip_serializing_if = "Option::is_none")]
    pub bool_type: Option<Empty>,
    #[serde(rename = "BITSTRING", default, skip_serializing_if = "Option::is_none")]
    pub bitstring_type: Option<Empty>,
    #[serde(rename = "BYTE", default, skip_serializing_if = "Option::is_none")]
    pub byte_type: Option<Empty>,
    #[serde(rename = "CHAR", default, skip_serializing_if = "Option::is_none")]
    pub char_type: Option<Empty>,
    #[serde(rename = "WORD", default, skip_serializing_if = "Option::is_none")]
    pub word_type: Option<Empty>,
    #[serde(rename = "DWORD", default, skip_serializing_if = "Option::is_none")]
    pub dword_type: Option<Empty>,
    #[serde(rename = "LWORD", default, skip_serializing_if = "Option::is_none")]
    pub lword_type: Option<Empty>,
    #[serde(rename = "SINT", default, skip_serializing_if = "Option::is_none")]
    pub sint_type: Option<Empty>,
    #[serde(rename = "INT", default, skip_serializing_if = "Option::is_none")]
    pub int_type: Option<Empty>,
    #[serde(rename = "DINT", default, skip_serializing_if = "Option::is_none")]
    pub dint_type: Option<Empty>,
    #[serde(rename = "LINT", default, skip_serializing_if = "Option::is_none")]
    pub lint_type: Option<Empty>,
    #[serde(rename = "USINT", default, skip_serializing_if = "Option::is_none")]
    pub usint_type: Option<Empty>,
    #[serde(rename = "UINT", default, skip_serializing_if = "Option::is_none")]
    pub uint_type: Option<Empty>,
    #[serde(rename = "UDINT", default, skip_serializing_if = "Option::is_none")]
    pub udint_type: Option<Empty>,
    #[serde(rename = "ULINT", default, skip_serializing_if = "Option::is_none")]
    pub ulint_type: Option<Empty>,
    #[serde(rename = "REAL", default, skip_serializing_if = "Option::is_none")]
    pub real_type: Option<Empty>,
    #[serde(rename = "LREAL", default, skip_serializing_if = "Option::is_none")]
    pub lreal_type: Option<Empty>,
    #[serde(rename = "STRING", default, skip_serializing_if = "Option::is_none")]
    pub string_type: Option<Empty>,
    #[serde(rename = "WSTRING", default, skip_serializing_if = "Option::is_none")]
    pub wstring_type: Option<Empty>,

    #[serde(
        rename = "denotation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub denotation: Option<Glabels>,

    /// The `actualValue` element (XDC only).
    #[serde(
        rename = "actualValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actual_value: Option<Value>,

    #[serde(
        rename = "defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,

    #[serde(rename = "property", default, skip_serializing_if = "Vec::is_empty")]
    pub property: Vec<Property>,
}

impl Parameter {
    /// The IEC type element present on this parameter, if any.
    pub fn iec_type(&self) -> Option<IecType> {
        let slots = [
            (self.bool_type, IecType::Bool),
            (self.bitstring_type, IecType::BitString),
            (self.byte_type, IecType::Byte),
            (self.char_type, IecType::Char),
            (self.word_type, IecType::Word),
            (self.dword_type, IecType::DWord),
            (self.lword_type, IecType::LWord),
            (self.sint_type, IecType::SInt),
            (self.int_type, IecType::Int),
            (self.dint_type, IecType::DInt),
            (self.lint_type, IecType::LInt),
            (self.usint_type, IecType::USInt),
            (self.uint_type, IecType::UInt),
            (self.udint_type, IecType::UDInt),
            (self.ulint_type, IecType::ULInt),
            (self.real_type, IecType::Real),
            (self.lreal_type, IecType::LReal),
            (self.string_type, IecType::String),
            (self.wstring_type, IecType::WString),
        ];
        slots
            .into_iter()
            .find(|(slot, _)| slot.is_some())
            .map(|(_, iec)| iec)
    }

    pub fn set_iec_type(&mut self, iec: IecType) {
        let slot = match iec {
            IecType::Bool => &mut self.bool_type,
            IecType::BitString => &mut self.bitstring_type,
            IecType::Byte => &mut self.byte_type,
            IecType::Char => &mut self.char_type,
            IecType::Word => &mut self.word_type,
            IecType::DWord => &mut self.dword_type,
            IecType::LWord => &mut self.lword_type,
            IecType::SInt => &mut self.sint_type,
            IecType::Int => &mut self.int_type,
            IecType::DInt => &mut self.dint_type,
            IecType::LInt => &mut self.lint_type,
            IecType::USInt => &mut self.usint_type,
            IecType::UInt => &mut self.uint_type,
            IecType::UDInt => &mut self.udint_type,
            IecType::ULInt => &mut self.ulint_type,
            IecType::Real => &mut self.real_type,
            IecType::LReal => &mut self.lreal_type,
            IecType::String => &mut self.string_type,
            IecType::WString => &mut self.wstring_type,
        };
        *slot = Some(Empty {});
    }

    /// Value of the `<property>` called `name`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.property
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}
