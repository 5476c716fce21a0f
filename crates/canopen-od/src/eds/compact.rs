// crates/canopen-od/src/eds/compact.rs
//! `CompactSubObj` expansion and the `[<index>Name]`/`[<index>Value]`
//! sections that go with it.

use super::lexer::Section;
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::od::constants::COMPACT_SUB_OBJ_MAX;
use crate::od::value::parse_number;
use crate::od::{AccessType, DataType, ObjectDictionary, ObjectType, OdEntry};
use alloc::format;
use log::trace;

pub const COUNT_ENTRY_NAME: &str = "NrOfObjects";

/// Generates the sub-entries a `CompactSubObj=count` object stands for:
/// a count entry at sub-index 0 and `count` VAR entries that copy the
/// object's type, access, mapping, default value and limits.
///
/// Sub-entries that already exist are left alone.
pub fn expand_compact_sub_obj(
    od: &mut ObjectDictionary,
    index: u16,
    count: u16,
    diag: &mut Diagnostics,
) {
    let Some(parent) = od.get(index).cloned() else {
        return;
    };
    if count == 0 {
        return;
    }
    if !parent.object_type.has_sub_entries() {
        diag.push(
            WarningKind::Unsupported,
            format!(
                "CompactSubObj on {:#06X} ignored, object is not an ARRAY or RECORD",
                index
            ),
        );
        return;
    }

    let count = if count > COMPACT_SUB_OBJ_MAX {
        diag.push(
            WarningKind::Unsupported,
            format!(
                "CompactSubObj={} on {:#06X} capped at {}",
                count, index, COMPACT_SUB_OBJ_MAX
            ),
        );
        COMPACT_SUB_OBJ_MAX
    } else {
        count
    };

    trace!("Expanding {:#06X} into {} compact sub-entries", index, count);
    if od.get_sub(index, 0).is_none() {
        let sub0 = OdEntry::var(COUNT_ENTRY_NAME, DataType::Unsigned8, AccessType::Ro, format!("{}", count));
        insert(od, index, 0, sub0);
    }

    for i in 1..=count as u8 {
        if od.get_sub(index, i).is_some() {
            continue;
        }
        let child = OdEntry {
            parameter_name: format!("{}{:02}", parent.parameter_name, i),
            object_type: ObjectType::Var,
            data_type: parent.data_type,
            access_type: parent.access_type,
            pdo_mapping: parent.pdo_mapping,
            default_value: parent.default_value.clone(),
            low_limit: parent.low_limit.clone(),
            high_limit: parent.high_limit.clone(),
            custom_properties: parent.custom_properties.clone(),
            ..Default::default()
        };
        insert(od, index, i, child);
    }
}

fn insert(od: &mut ObjectDictionary, index: u16, subindex: u8, entry: OdEntry) {
    // The parent was checked to be an ARRAY or RECORD, so this cannot fail.
    if od.insert_sub(index, subindex, entry).is_err() {
        trace!("Object {:#06X} vanished during compact expansion", index);
    }
}

/// Applies a `[<index>Name]` section: `<n>=<name>` renames sub-entry `n`.
pub fn apply_names(od: &mut ObjectDictionary, index: u16, section: &Section, diag: &mut Diagnostics) {
    apply_numbered(od, index, section, diag, |entry, value| {
        entry.parameter_name = value.into();
    });
}

/// Applies a `[<index>Value]` section: `<n>=<value>` sets the actual value
/// of sub-entry `n`.
pub fn apply_values(od: &mut ObjectDictionary, index: u16, section: &Section, diag: &mut Diagnostics) {
    apply_numbered(od, index, section, diag, |entry, value| {
        entry.actual_value = value.into();
    });
}

fn apply_numbered(
    od: &mut ObjectDictionary,
    index: u16,
    section: &Section,
    diag: &mut Diagnostics,
    apply: impl Fn(&mut OdEntry, &str),
) {
    for pair in &section.pairs {
        if pair.key.eq_ignore_ascii_case("NrOfEntries") {
            continue;
        }
        let Some(sub) = parse_number(&pair.key, 0).and_then(|n| u8::try_from(n).ok()) else {
            diag.push(
                WarningKind::ValueConversion,
                format!("Key '{}' in [{}] is not a sub-index", pair.key, section.name),
            );
            continue;
        };
        match od.get_sub_mut(index, sub) {
            Some(entry) => apply(entry, &pair.value),
            None => diag.push(
                WarningKind::UnresolvedReference,
                format!("[{}] refers to missing sub-entry {:#06X}sub{:X}", section.name, index, sub),
            ),
        }
    }
}
