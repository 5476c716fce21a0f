// crates/canopen-od/src/eds/reader.rs

use super::compact::{apply_names, apply_values, expand_compact_sub_obj};
use super::fields::{self, Field, FieldError, ENTRY_FIELDS};
use super::lexer::{self, Section};
use super::pdo::{apply_compact_pdo, apply_implicit_pdo};
use super::section::{classify, ModulePart, SectionKind};
use crate::device::{Device, Module};
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::od::value::parse_number;
use crate::od::{EntryKey, ObjectDictionary, ObjectType, OdEntry};
use crate::OdError;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::{debug, trace};

/// Which dictionary an entry section belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Target {
    Device,
    Module(u16, ModulePart),
}

struct EntrySection<'a> {
    target: Target,
    key: EntryKey,
    section: &'a Section,
}

/// Parses EDS or DCF text into a new [`Device`].
///
/// Implicit PDOs and compact PDO sub-entries are added before returning.
pub fn parse_str(text: &str, diag: &mut Diagnostics) -> Result<Device, OdError> {
    let sections = lexer::tokenize(text, diag)?;
    debug!("EDS: {} sections", sections.len());

    let mut device = Device::new();
    let mut entries: Vec<EntrySection> = Vec::new();
    let mut names: Vec<(u16, &Section)> = Vec::new();
    let mut values: Vec<(u16, &Section)> = Vec::new();
    let mut listed: Vec<(u16, &str)> = Vec::new();

    for section in &sections {
        match classify(&section.name) {
            SectionKind::FileInfo => {
                apply_table(fields::FILE_INFO_FIELDS, &mut device.file_info, section, diag)?
            }
            SectionKind::DeviceInfo => {
                apply_table(fields::DEVICE_INFO_FIELDS, &mut device.device_info, section, diag)?
            }
            SectionKind::DeviceCommissioning => apply_table(
                fields::DEVICE_COMMISSIONING_FIELDS,
                &mut device.device_commissioning,
                section,
                diag,
            )?,
            SectionKind::DummyUsage => read_dummy_usage(&mut device, section)?,
            SectionKind::Comments => device.comments = read_comments(section),
            SectionKind::MandatoryObjects
            | SectionKind::OptionalObjects
            | SectionKind::ManufacturerObjects => {
                for index in read_object_list(section)? {
                    listed.push((index, section.name.as_str()));
                }
            }
            SectionKind::SupportedModules => {
                let count = section
                    .get("NrOfEntries")
                    .map(|v| require_number(section, "NrOfEntries", v))
                    .transpose()?
                    .unwrap_or(0);
                for n in 1..=count.clamp(0, i64::from(u16::MAX)) as u16 {
                    device.modules.entry(n).or_default();
                }
            }
            SectionKind::ModuleInfo(n) => {
                let module = device.modules.entry(n).or_default();
                apply_table(fields::MODULE_INFO_FIELDS, &mut module.info, section, diag)?
            }
            SectionKind::ModuleComments(n) => {
                device.modules.entry(n).or_default().comments = read_comments(section)
            }
            SectionKind::ModuleFixedObjects(n) | SectionKind::ModuleSubExtends(n) => {
                // The lists are rebuilt on export; reading them only creates the module.
                read_object_list(section)?;
                device.modules.entry(n).or_default();
            }
            SectionKind::Entry {
                module,
                index,
                subindex,
            } => entries.push(EntrySection {
                target: match module {
                    Some((n, part)) => Target::Module(n, part),
                    None => Target::Device,
                },
                key: EntryKey { index, subindex },
                section,
            }),
            SectionKind::Names(index) => names.push((index, section)),
            SectionKind::Values(index) => values.push((index, section)),
            SectionKind::Unknown => diag.push(
                WarningKind::UnknownSection,
                format!("Unknown section [{}] at line {} ignored", section.name, section.line),
            ),
        }
    }

    // Objects first, so that every sub-entry finds its parent.
    entries.sort_by_key(|e| (e.key.subindex.is_some(), e.target, e.key));
    let mut compact: Vec<(Target, u16, u16)> = Vec::new();

    for entry_section in &entries {
        let (entry, compact_count) = read_entry(entry_section.section, diag)?;
        let od = dictionary_mut(&mut device, entry_section.target);
        let EntryKey { index, subindex } = entry_section.key;
        match subindex {
            None => {
                od.insert_object(index, entry)?;
                if compact_count > 0 {
                    compact.push((entry_section.target, index, compact_count));
                }
            }
            Some(sub) => {
                if let Err(e) = od.insert_sub(index, sub, entry) {
                    let reason = match e {
                        OdError::NotAnArrayOrRecord(_) => "parent object is a VAR",
                        _ => "parent object is missing",
                    };
                    diag.push(
                        WarningKind::UnresolvedReference,
                        format!(
                            "Section [{}] skipped, {} {:04X}",
                            entry_section.section.name, reason, index
                        ),
                    );
                }
            }
        }
    }

    for (target, index, count) in compact {
        expand_compact_sub_obj(dictionary_mut(&mut device, target), index, count, diag);
    }
    for (index, section) in names {
        apply_names(&mut device.od, index, section, diag);
    }
    for (index, section) in values {
        apply_values(&mut device.od, index, section, diag);
    }

    for (index, list) in listed {
        if !device.od.contains_index(index) {
            diag.push(
                WarningKind::UnresolvedReference,
                format!("[{}] lists {:#06X} but it has no section", list, index),
            );
        }
    }

    apply_implicit_pdo(&mut device)?;
    apply_compact_pdo(&mut device)?;
    debug!("EDS: {} objects loaded", device.od.len());
    Ok(device)
}

fn dictionary_mut(device: &mut Device, target: Target) -> &mut ObjectDictionary {
    match target {
        Target::Device => &mut device.od,
        Target::Module(n, part) => {
            let module: &mut Module = device.modules.entry(n).or_default();
            match part {
                ModulePart::Fixed => &mut module.fixed_objects,
                ModulePart::SubExt => &mut module.sub_extends,
            }
        }
    }
}

/// Stores every key of `section` that has a row in `table`.
fn apply_table<T: 'static>(
    table: &'static [Field<T>],
    target: &mut T,
    section: &Section,
    diag: &mut Diagnostics,
) -> Result<(), OdError> {
    for pair in &section.pairs {
        match fields::find(table, &pair.key) {
            Some(field) => store(field, target, section, &pair.key, &pair.value, diag)?,
            None => debug!("Ignoring key '{}' in [{}]", pair.key, section.name),
        }
    }
    Ok(())
}

fn store<T>(
    field: &Field<T>,
    target: &mut T,
    section: &Section,
    key: &str,
    value: &str,
    diag: &mut Diagnostics,
) -> Result<(), OdError> {
    match (field.set)(target, value) {
        Ok(()) => Ok(()),
        Err(FieldError::Fallback(kind)) => {
            diag.push(
                kind,
                format!(
                    "Value '{}' of '{}' in [{}] is out of range, using a fallback",
                    value, key, section.name
                ),
            );
            Ok(())
        }
        Err(FieldError::NotANumber) | Err(FieldError::InvalidToken) => {
            Err(unknown_value(section, key, value))
        }
    }
}

fn unknown_value(section: &Section, key: &str, value: &str) -> OdError {
    OdError::UnknownEnumValue {
        section: section.name.clone(),
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn require_number(section: &Section, key: &str, value: &str) -> Result<i64, OdError> {
    parse_number(value, 0).ok_or_else(|| unknown_value(section, key, value))
}

/// Reads one object or sub-entry section. Also returns its `CompactSubObj`.
fn read_entry(section: &Section, diag: &mut Diagnostics) -> Result<(OdEntry, u16), OdError> {
    let mut entry = OdEntry::default();
    let mut compact = 0u16;

    for pair in &section.pairs {
        if let Some(field) = fields::find(ENTRY_FIELDS, &pair.key) {
            store(field, &mut entry, section, &pair.key, &pair.value, diag)?;
            continue;
        }
        match pair.key.to_ascii_lowercase().as_str() {
            "compactsubobj" => {
                let n = require_number(section, &pair.key, &pair.value)?;
                compact = u16::try_from(n.max(0)).unwrap_or(u16::MAX);
            }
            "subnumber" => {
                require_number(section, &pair.key, &pair.value)?;
            }
            "count" if pair.value.contains(';') => diag.push(
                WarningKind::Unsupported,
                format!(
                    "Module count list '{}' in [{}] is not supported",
                    pair.value, section.name
                ),
            ),
            _ => trace!("Ignoring key '{}' in [{}]", pair.key, section.name),
        }
    }

    let missing = |field: &'static str| OdError::MissingField {
        section: section.name.clone(),
        field,
    };
    if !section.contains("ParameterName") {
        return Err(missing("ParameterName"));
    }
    if entry.object_type == ObjectType::Var {
        if !section.contains("DataType") {
            return Err(missing("DataType"));
        }
        if !section.contains("AccessType") {
            return Err(missing("AccessType"));
        }
    }

    Ok((entry, compact))
}

fn read_object_list(section: &Section) -> Result<Vec<u16>, OdError> {
    let mut list = Vec::new();
    for pair in &section.pairs {
        if pair.key.eq_ignore_ascii_case("SupportedObjects")
            || pair.key.eq_ignore_ascii_case("NrOfEntries")
        {
            require_number(section, &pair.key, &pair.value)?;
            continue;
        }
        let n = require_number(section, &pair.key, &pair.value)?;
        let index = u16::try_from(n).map_err(|_| unknown_value(section, &pair.key, &pair.value))?;
        list.push(index);
    }
    Ok(list)
}

fn read_dummy_usage(device: &mut Device, section: &Section) -> Result<(), OdError> {
    for pair in &section.pairs {
        let index = pair
            .key
            .get(..5)
            .filter(|p| p.eq_ignore_ascii_case("dummy"))
            .and_then(|_| u16::from_str_radix(&pair.key[5..], 16).ok())
            .ok_or_else(|| unknown_value(section, &pair.key, &pair.value))?;
        let used = require_number(section, &pair.key, &pair.value)? != 0;
        device.dummy_usage.insert(index, used);
    }
    Ok(())
}

/// `Lines=<n>` followed by `Line1..Line<n>`.
fn read_comments(section: &Section) -> Vec<String> {
    let mut lines: BTreeMap<u32, String> = BTreeMap::new();
    for pair in &section.pairs {
        let key = pair.key.to_ascii_lowercase();
        if let Some(n) = key.strip_prefix("line").and_then(|n| n.parse::<u32>().ok()) {
            lines.insert(n, pair.value.clone());
        }
    }
    lines.into_values().collect()
}
