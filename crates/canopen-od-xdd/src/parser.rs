// crates/canopen-od-xdd/src/parser.rs

use crate::error::XddError;
use crate::model::{Iso15745ProfileContainer, Iso15745ProfileContainerList};
use crate::resolver::resolve_device;
use alloc::vec::Vec;
use canopen_od::{Device, Diagnostics};
use log::debug;

/// Parses an XDD or XDC document holding one `<ISO15745ProfileContainer>`.
///
/// Both kinds are read the same way: `actualValue` and
/// `deviceCommissioning` are taken when present.
///
/// # Errors
/// Returns an `XddError` if the XML is malformed, a mandatory element is
/// missing, an `@index`/`@subIndex` is not hex, or the object list is
/// inconsistent (e.g. a duplicate index). Recoverable problems are added to
/// `diag` instead.
pub fn load_xdd_from_str(xml_content: &str, diag: &mut Diagnostics) -> Result<Device, XddError> {
    let container: Iso15745ProfileContainer = quick_xml::de::from_str(xml_content)?;
    resolve_device(&container, diag)
}

/// Parses an `<ISO15745ProfileContainerList>` into one device per container.
pub fn load_multi_from_str(
    xml_content: &str,
    diag: &mut Diagnostics,
) -> Result<Vec<Device>, XddError> {
    let list: Iso15745ProfileContainerList = quick_xml::de::from_str(xml_content)?;
    debug!("XDD: container list with {} devices", list.container.len());
    list.container
        .iter()
        .map(|container| resolve_device(container, diag))
        .collect()
}
