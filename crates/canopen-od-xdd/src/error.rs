// crates/canopen-od-xdd/src/error.rs

use alloc::fmt;
use alloc::string::String;
use canopen_od::OdError;
use core::num::ParseIntError;
use quick_xml::errors::serialize::DeError;
use quick_xml::errors::serialize::SeError;
use quick_xml::Error as XmlError;

/// Errors that can occur while reading or writing an XDD/XDC document.
#[derive(Debug)]
pub enum XddError {
    /// An error from the underlying `quick-xml` deserializer.
    XmlParsing(DeError),

    /// An error from the underlying `quick-xml` serializer.
    XmlSerializing(SeError),

    /// An error from the underlying `quick-xml` writer.
    XmlWriting(XmlError),

    /// An error occurred during string formatting.
    FmtError(fmt::Error),

    /// A required XML element was missing (e.g., ApplicationLayers).
    MissingElement { element: &'static str },

    /// An attribute (e.g., @index) had an invalid format.
    InvalidAttributeFormat { attribute: &'static str },

    /// An attribute carried a value outside its enumeration (e.g., @objectType="3").
    UnknownEnumValue { attribute: &'static str, value: String },

    /// The Object Dictionary rejected the decoded data.
    Od(OdError),
}

impl From<DeError> for XddError {
    fn from(e: DeError) -> Self {
        XddError::XmlParsing(e)
    }
}

impl From<SeError> for XddError {
    fn from(e: SeError) -> Self {
        XddError::XmlSerializing(e)
    }
}

impl From<XmlError> for XddError {
    fn from(e: XmlError) -> Self {
        XddError::XmlWriting(e)
    }
}

impl From<fmt::Error> for XddError {
    fn from(e: fmt::Error) -> Self {
        XddError::FmtError(e)
    }
}

impl From<OdError> for XddError {
    fn from(e: OdError) -> Self {
        XddError::Od(e)
    }
}

/// Converts `ParseIntError` (typically from reading hex index/subindex) into a user-friendly error.
impl From<ParseIntError> for XddError {
    fn from(_: ParseIntError) -> Self {
        XddError::InvalidAttributeFormat {
            attribute: "index or subIndex",
        }
    }
}

impl fmt::Display for XddError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XddError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            XddError::XmlSerializing(e) => write!(f, "XML serializing error: {}", e),
            XddError::XmlWriting(e) => write!(f, "XML writing error: {}", e),
            XddError::FmtError(e) => write!(f, "Formatting error: {}", e),
            XddError::MissingElement { element } => {
                write!(f, "Missing required XML element: {}", element)
            }
            XddError::InvalidAttributeFormat { attribute } => {
                write!(f, "Invalid format for attribute: {}", attribute)
            }
            XddError::UnknownEnumValue { attribute, value } => {
                write!(f, "Unknown value '{}' for attribute: {}", value, attribute)
            }
            XddError::Od(e) => write!(f, "Object Dictionary error: {}", e),
        }
    }
}
