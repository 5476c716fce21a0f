// crates/canopen-od/src/eds/file.rs

use super::{parse_str, write_string, InfoType};
use crate::device::Device;
use crate::diagnostics::Diagnostics;
use crate::OdError;
use log::info;
use std::fs;
use std::path::Path;

/// `.dcf` selects DCF output; anything else is written as EDS.
fn info_type_of(path: &Path) -> InfoType {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("dcf") => InfoType::Dcf,
        _ => InfoType::Eds,
    }
}

/// Reads and parses an EDS or DCF file.
pub fn load_file(path: impl AsRef<Path>, diag: &mut Diagnostics) -> Result<Device, OdError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let device = parse_str(&text, diag)?;
    info!(
        "Loaded {} with {} objects ({} warnings)",
        path.display(),
        device.od.len(),
        diag.len()
    );
    Ok(device)
}

/// Writes a device to `path`, as DCF when the extension is `.dcf`.
pub fn save_file(path: impl AsRef<Path>, device: &Device) -> Result<(), OdError> {
    let path = path.as_ref();
    let text = write_string(device, info_type_of(path))?;
    fs::write(path, text)?;
    info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_type_from_extension() {
        assert_eq!(info_type_of(Path::new("node.DCF")), InfoType::Dcf);
        assert_eq!(info_type_of(Path::new("node.eds")), InfoType::Eds);
        assert_eq!(info_type_of(Path::new("node")), InfoType::Eds);
    }
}
