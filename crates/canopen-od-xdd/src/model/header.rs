// crates/canopen-od-xdd/src/model/header.rs

//! Contains model structs related to the `<ProfileHeader>`.
//!
//! (Schema: `ISO15745ProfileContainer.xsd`)

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Classification of the profile.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileClassId {
    #[default]
    Device,
    CommunicationNetwork,
}

/// References the specific part and edition of the ISO 15745 standard.
#[derive(Debug, Serialize, Deserialize)]
pub struct Iso15745Reference {
    #[serde(rename = "ISO15745Part")]
    pub iso15745_part: u32,
    #[serde(rename = "ISO15745Edition")]
    pub iso15745_edition: u32,
    #[serde(rename = "ProfileTechnology")]
    pub profile_technology: String,
}

impl Default for Iso15745Reference {
    fn default() -> Self {
        Self {
            iso15745_part: 1,
            iso15745_edition: 1,
            profile_technology: "CANopen".into(),
        }
    }
}

/// Metadata header for the profile.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ProfileHeader {
    #[serde(rename = "ProfileIdentification", default)]
    pub profile_identification: String,

    #[serde(rename = "ProfileRevision", default)]
    pub profile_revision: String,

    #[serde(rename = "ProfileName", default)]
    pub profile_name: String,

    #[serde(rename = "ProfileSource", default)]
    pub profile_source: String,

    #[serde(rename = "ProfileClassID", default)]
    pub profile_class_id: ProfileClassId,

    #[serde(rename = "ISO15745Reference", default)]
    pub iso15745_reference: Iso15745Reference,
}
