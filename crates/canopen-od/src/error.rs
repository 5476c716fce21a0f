// crates/canopen-od/src/error.rs

use alloc::string::String;
use core::fmt;

/// Hard errors that abort a load, save or edit call.
///
/// Non-fatal findings go to [`crate::Diagnostics`] instead.
#[derive(Debug)]
pub enum OdError {
    /// A mandatory key was not present in an EDS section.
    MissingField { section: String, field: &'static str },

    /// A line could not be read as a section header or a `key=value` pair.
    MalformedSection { line: usize, content: String },

    /// A value was not a number where one is required, or was not one of
    /// the accepted tokens.
    UnknownEnumValue {
        section: String,
        key: String,
        value: String,
    },

    /// An object with this index is already in the dictionary.
    DuplicateIndex(u16),

    /// Sub-entry editing was requested on an object that is not ARRAY/RECORD.
    NotAnArrayOrRecord(u16),

    /// An ARRAY/RECORD already uses sub-index 255.
    SubIndexOverflow(u16),

    /// The addressed entry does not exist.
    EntryNotFound { index: u16, subindex: Option<u8> },

    /// The flat device tree could not be encoded or decoded as JSON.
    Json(serde_json::Error),

    /// An error occurred during string formatting.
    Fmt(fmt::Error),

    /// Reading or writing a file failed.
    #[cfg(feature = "std")]
    Io(std::io::Error),
}

impl From<serde_json::Error> for OdError {
    fn from(e: serde_json::Error) -> Self {
        OdError::Json(e)
    }
}

impl From<fmt::Error> for OdError {
    fn from(e: fmt::Error) -> Self {
        OdError::Fmt(e)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for OdError {
    fn from(e: std::io::Error) -> Self {
        OdError::Io(e)
    }
}

impl fmt::Display for OdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { section, field } => {
                write!(f, "Missing mandatory field '{}' in section [{}]", field, section)
            }
            Self::MalformedSection { line, content } => {
                write!(f, "Malformed line {}: '{}'", line, content)
            }
            Self::UnknownEnumValue {
                section,
                key,
                value,
            } => write!(
                f,
                "Invalid value '{}' for key '{}' in section [{}]",
                value, key, section
            ),
            Self::DuplicateIndex(index) => {
                write!(f, "Object {:#06X} already exists in the dictionary", index)
            }
            Self::NotAnArrayOrRecord(index) => {
                write!(f, "Object {:#06X} is not an ARRAY or RECORD", index)
            }
            Self::SubIndexOverflow(index) => {
                write!(f, "Object {:#06X} has no free sub-index left", index)
            }
            Self::EntryNotFound {
                index,
                subindex: Some(sub),
            } => write!(f, "Entry {:#06X}sub{:X} not found", index, sub),
            Self::EntryNotFound {
                index,
                subindex: None,
            } => write!(f, "Object {:#06X} not found", index),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Fmt(e) => write!(f, "Formatting error: {}", e),
            #[cfg(feature = "std")]
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OdError {}

#[cfg(test)]
mod tests {
    use super::OdError;
    use alloc::string::ToString;

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err: OdError = json_err.into();
        assert!(matches!(err, OdError::Json(_)));
    }

    #[test]
    fn test_from_fmt_error() {
        let err: OdError = core::fmt::Error.into();
        assert!(matches!(err, OdError::Fmt(_)));
    }

    #[test]
    fn test_display_names_the_location() {
        let err = OdError::MissingField {
            section: "2000sub1".to_string(),
            field: "DataType",
        };
        assert_eq!(
            err.to_string(),
            "Missing mandatory field 'DataType' in section [2000sub1]"
        );
        assert_eq!(
            OdError::DuplicateIndex(0x1018).to_string(),
            "Object 0x1018 already exists in the dictionary"
        );
    }
}
