// crates/canopen-od-xdd/src/model/common.rs

//! Contains common helper structs from CommonElements.xsd.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANG: &str = "en";

/// Represents `<label lang="en">Value</label>`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Label {
    #[serde(rename = "@lang", default)]
    pub lang: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// Represents `<description lang="en">Value</description>`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Description {
    #[serde(rename = "@lang", default)]
    pub lang: String,
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// The `g_labels` group: labels and descriptions, possibly in several languages.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Glabels {
    #[serde(rename = "label", default, skip_serializing_if = "Vec::is_empty")]
    pub label: Vec<Label>,
    #[serde(rename = "description", default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<Description>,
}

impl Glabels {
    /// A single English label.
    pub fn label(text: &str) -> Self {
        Self {
            label: en_label(text),
            description: Vec::new(),
        }
    }

    /// A single English description.
    pub fn description(text: &str) -> Self {
        Self {
            label: Vec::new(),
            description: en_description(text),
        }
    }
}

pub fn en_label(text: &str) -> Vec<Label> {
    alloc::vec![Label {
        lang: DEFAULT_LANG.into(),
        value: text.into(),
    }]
}

pub fn en_description(text: &str) -> Vec<Description> {
    alloc::vec![Description {
        lang: DEFAULT_LANG.into(),
        value: text.into(),
    }]
}

/// The English label, else the first one.
pub fn first_label(labels: &[Label]) -> Option<&str> {
    labels
        .iter()
        .find(|l| l.lang.eq_ignore_ascii_case(DEFAULT_LANG))
        .or_else(|| labels.first())
        .map(|l| l.value.as_str())
}

/// The English description, else the first one.
pub fn first_description(descriptions: &[Description]) -> Option<&str> {
    descriptions
        .iter()
        .find(|d| d.lang.eq_ignore_ascii_case(DEFAULT_LANG))
        .or_else(|| descriptions.first())
        .map(|d| d.value.as_str())
}

/// An element without content, e.g. `<UDINT/>`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct Empty {}
