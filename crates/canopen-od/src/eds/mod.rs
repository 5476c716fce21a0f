// crates/canopen-od/src/eds/mod.rs
//! CiA 306 EDS and DCF text codec.

mod compact;
mod fields;
mod lexer;
pub mod pdo;
mod reader;
mod section;
mod writer;

#[cfg(feature = "std")]
mod file;

pub use reader::parse_str;
pub use writer::{write_string, ObjectList};

#[cfg(feature = "std")]
pub use file::{load_file, save_file};

/// Flavour of a written file. A DCF additionally carries
/// `[DeviceComissioning]`, `ParameterValue` and `Denotation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoType {
    #[default]
    Eds,
    Dcf,
}
