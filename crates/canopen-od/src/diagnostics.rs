// crates/canopen-od/src/diagnostics.rs

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use log::warn;

/// Category of a non-fatal finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    DuplicateSection,
    DuplicateKey,
    MalformedTimestamp,
    EnumOutOfRange,
    UnknownSection,
    PdoMapping,
    UnresolvedReference,
    Unsupported,
    ValueConversion,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Collects warnings produced while loading or converting a device.
///
/// Owned by the caller and passed into each codec call; processing goes on
/// with a fallback value after every push.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: WarningKind, message: impl Into<String>) {
        let message = message.into();
        warn!("{:?}: {}", kind, message);
        self.warnings.push(Warning { kind, message });
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Counts the warnings of one kind.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&mut self) -> Vec<Warning> {
        core::mem::take(&mut self.warnings)
    }

    pub fn clear(&mut self) {
        self.warnings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_take() {
        let mut diag = Diagnostics::new();
        diag.push(WarningKind::DuplicateKey, "key 'DataType' repeated");
        diag.push(WarningKind::UnknownSection, "section [Foo] ignored");
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.count(WarningKind::DuplicateKey), 1);

        let taken = diag.take();
        assert_eq!(taken.len(), 2);
        assert!(diag.is_empty());
        assert_eq!(taken[1].kind, WarningKind::UnknownSection);
    }
}
