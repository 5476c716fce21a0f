// crates/canopen-od/src/eds/section.rs
//! Section name grammar: `(M<n>(Fixed|SubExt))?<hex-index>(sub<hex-subindex>)?`
//! plus the named sections of CiA 306.

/// The part of a module an entry section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModulePart {
    Fixed,
    SubExt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    FileInfo,
    DeviceInfo,
    DeviceCommissioning,
    DummyUsage,
    Comments,
    MandatoryObjects,
    OptionalObjects,
    ManufacturerObjects,
    SupportedModules,
    ModuleInfo(u16),
    ModuleFixedObjects(u16),
    ModuleSubExtends(u16),
    ModuleComments(u16),
    Entry {
        module: Option<(u16, ModulePart)>,
        index: u16,
        subindex: Option<u8>,
    },
    /// `[<index>Name]`: names for compact sub-objects.
    Names(u16),
    /// `[<index>Value]`: values for compact sub-objects (DCF).
    Values(u16),
    Unknown,
}

pub fn classify(name: &str) -> SectionKind {
    let lower = name.trim().to_ascii_lowercase();
    match lower.as_str() {
        "fileinfo" => return SectionKind::FileInfo,
        "deviceinfo" => return SectionKind::DeviceInfo,
        "devicecomissioning" | "devicecommissioning" => return SectionKind::DeviceCommissioning,
        "dummyusage" => return SectionKind::DummyUsage,
        "comments" => return SectionKind::Comments,
        "mandatoryobjects" => return SectionKind::MandatoryObjects,
        "optionalobjects" => return SectionKind::OptionalObjects,
        "manufacturerobjects" => return SectionKind::ManufacturerObjects,
        "supportedmodules" => return SectionKind::SupportedModules,
        _ => {}
    }

    if let Some(rest) = lower.strip_prefix('m') {
        return classify_module(rest);
    }

    let (index, rest) = match split_hex(&lower) {
        Some(parts) => parts,
        None => return SectionKind::Unknown,
    };
    match rest {
        "name" => SectionKind::Names(index),
        "value" => SectionKind::Values(index),
        _ => entry(None, index, rest),
    }
}

fn classify_module(rest: &str) -> SectionKind {
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    let Ok(module) = rest[..digits].parse::<u16>() else {
        return SectionKind::Unknown;
    };
    let rest = &rest[digits..];

    match rest {
        "moduleinfo" => return SectionKind::ModuleInfo(module),
        "fixedobjects" => return SectionKind::ModuleFixedObjects(module),
        "subextends" => return SectionKind::ModuleSubExtends(module),
        "comments" => return SectionKind::ModuleComments(module),
        _ => {}
    }

    let (part, rest) = if let Some(r) = rest.strip_prefix("fixed") {
        (ModulePart::Fixed, r)
    } else if let Some(r) = rest.strip_prefix("subext") {
        (ModulePart::SubExt, r)
    } else {
        return SectionKind::Unknown;
    };
    match split_hex(rest) {
        Some((index, tail)) => entry(Some((module, part)), index, tail),
        None => SectionKind::Unknown,
    }
}

fn entry(module: Option<(u16, ModulePart)>, index: u16, tail: &str) -> SectionKind {
    if tail.is_empty() {
        return SectionKind::Entry {
            module,
            index,
            subindex: None,
        };
    }
    match tail.strip_prefix("sub").map(|s| u8::from_str_radix(s, 16)) {
        Some(Ok(subindex)) => SectionKind::Entry {
            module,
            index,
            subindex: Some(subindex),
        },
        _ => SectionKind::Unknown,
    }
}

/// Splits a leading hex number (at most four digits) from the rest.
fn split_hex(text: &str) -> Option<(u16, &str)> {
    let digits = text.chars().take_while(|c| c.is_ascii_hexdigit()).count();
    if digits == 0 || digits > 4 {
        return None;
    }
    let index = u16::from_str_radix(&text[..digits], 16).ok()?;
    Some((index, &text[digits..]))
}
