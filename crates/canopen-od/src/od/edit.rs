// crates/canopen-od/src/od/edit.rs
//! Sub-entry editing of ARRAY and RECORD objects.

use super::value::{parse_unsigned, NumberBase};
use super::{AccessType, DataType, EntryKey, ObjectDictionary, OdEntry};
use crate::OdError;
use alloc::vec::Vec;
use log::trace;

pub const HIGHEST_SUB_INDEX_NAME: &str = "Highest sub-index supported";

impl ObjectDictionary {
    /// Adds a sub-entry directly after `selected` and returns its sub-index.
    ///
    /// The new entry is a copy of `selected` (or of the first data entry when
    /// `selected` is sub-index 0). An object without data entries gets a
    /// generic `UNSIGNED32` item. Every later sub-entry moves up by one.
    pub fn add_sub_entry(&mut self, index: u16, selected: u8) -> Result<u8, OdError> {
        let object = self.get(index).ok_or(OdError::EntryNotFound {
            index,
            subindex: None,
        })?;
        if !object.object_type.has_sub_entries() {
            return Err(OdError::NotAnArrayOrRecord(index));
        }

        if self.sub_count(index) == 0 {
            trace!("Synthesizing sub-index 0 for {:#06X}", index);
            self.insert_sub(
                index,
                0,
                OdEntry::var(HIGHEST_SUB_INDEX_NAME, DataType::Unsigned8, AccessType::Ro, "0x01"),
            )?;
        }

        let data_before = self.data_entry_count(index);
        let (position, template) = if data_before == 0 {
            (
                1,
                OdEntry::var("item", DataType::Unsigned32, AccessType::Rw, "0"),
            )
        } else if selected == 0 {
            let (_, first) = self
                .sub_entries(index)
                .find(|(s, _)| *s != 0)
                .ok_or(OdError::EntryNotFound {
                    index,
                    subindex: Some(1),
                })?;
            (1, first.clone())
        } else {
            let source = self.get_sub(index, selected).ok_or(OdError::EntryNotFound {
                index,
                subindex: Some(selected),
            })?;
            let position = selected.checked_add(1).ok_or(OdError::SubIndexOverflow(index))?;
            (position, source.clone())
        };

        if self.max_subindex(index) == Some(u8::MAX) {
            return Err(OdError::SubIndexOverflow(index));
        }

        // Shift everything at or above the insertion point up by one,
        // highest first so nothing is overwritten.
        let to_shift: Vec<u8> = self
            .sub_entries(index)
            .map(|(s, _)| s)
            .filter(|s| *s >= position)
            .collect();
        for sub in to_shift.into_iter().rev() {
            if let Some(entry) = self.entries.remove(&EntryKey::sub(index, sub)) {
                self.entries.insert(EntryKey::sub(index, sub + 1), entry);
            }
        }
        self.entries.insert(EntryKey::sub(index, position), template);
        trace!("Added sub-entry {:#06X}sub{:X}", index, position);

        self.update_highest_sub_index(index, data_before);
        Ok(position)
    }

    /// Removes a sub-entry. With `renumber`, the remaining sub-entries are
    /// compacted to `0..N-1` keeping their order.
    ///
    /// Returns `false` if the object is not an ARRAY/RECORD or the entry does
    /// not exist.
    pub fn remove_sub_entry(&mut self, index: u16, subindex: u8, renumber: bool) -> bool {
        let is_container = self
            .get(index)
            .is_some_and(|o| o.object_type.has_sub_entries());
        if !is_container || self.get_sub(index, subindex).is_none() {
            return false;
        }

        let data_before = self.data_entry_count(index);
        self.entries.remove(&EntryKey::sub(index, subindex));

        if renumber {
            let remaining: Vec<u8> = self.sub_entries(index).map(|(s, _)| s).collect();
            for (new_sub, old_sub) in remaining.into_iter().enumerate() {
                let new_sub = new_sub as u8;
                if new_sub != old_sub {
                    if let Some(entry) = self.entries.remove(&EntryKey::sub(index, old_sub)) {
                        self.entries.insert(EntryKey::sub(index, new_sub), entry);
                    }
                }
            }
        }
        trace!("Removed sub-entry {:#06X}sub{:X}", index, subindex);

        self.update_highest_sub_index(index, data_before);
        true
    }

    /// Number of sub-entries other than sub-index 0.
    fn data_entry_count(&self, index: u16) -> u64 {
        self.sub_entries(index).filter(|(s, _)| *s != 0).count() as u64
    }

    /// Rewrites sub-index 0 to the current highest sub-index, but only if it
    /// held the plain entry count before the edit. A deliberate gap stays.
    fn update_highest_sub_index(&mut self, index: u16, data_before: u64) {
        let new_max = self
            .sub_entries(index)
            .map(|(s, _)| s)
            .filter(|s| *s != 0)
            .last()
            .unwrap_or(0);
        if let Some(sub0) = self.get_sub_mut(index, 0) {
            if parse_unsigned(&sub0.default_value, 0) == Some(data_before) {
                let base = NumberBase::of(&sub0.default_value);
                sub0.default_value = base.format(u64::from(new_max));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::od::ObjectType;
    use alloc::string::String;

    fn record_with_two_items() -> ObjectDictionary {
        let mut od = ObjectDictionary::new();
        od.insert_object(0x2000, OdEntry::container("Rec", ObjectType::Record))
            .unwrap();
        od.insert_sub(
            0x2000,
            0,
            OdEntry::var(HIGHEST_SUB_INDEX_NAME, DataType::Unsigned8, AccessType::Ro, "2"),
        )
        .unwrap();
        od.insert_sub(0x2000, 1, OdEntry::var("a", DataType::Unsigned16, AccessType::Rw, "1"))
            .unwrap();
        od.insert_sub(0x2000, 2, OdEntry::var("b", DataType::Integer8, AccessType::Ro, "2"))
            .unwrap();
        od
    }

    fn names(od: &ObjectDictionary, index: u16) -> Vec<(u8, String)> {
        od.sub_entries(index)
            .map(|(s, e)| (s, e.parameter_name.clone()))
            .collect()
    }

    #[test]
    fn test_add_after_selection_shifts_later_entries() {
        let mut od = record_with_two_items();
        let new_sub = od.add_sub_entry(0x2000, 1).unwrap();
        assert_eq!(new_sub, 2);

        let subs = names(&od, 0x2000);
        assert_eq!(subs.len(), 4);
        assert_eq!(subs[2], (2, String::from("a")));
        assert_eq!(subs[3], (3, String::from("b")));
        assert_eq!(od.get_sub(0x2000, 0).unwrap().default_value, "3");
    }

    #[test]
    fn test_add_on_empty_record_synthesizes_sub_zero() {
        let mut od = ObjectDictionary::new();
        od.insert_object(0x2001, OdEntry::container("Empty", ObjectType::Array))
            .unwrap();
        assert_eq!(od.add_sub_entry(0x2001, 0).unwrap(), 1);

        let sub0 = od.get_sub(0x2001, 0).unwrap();
        assert_eq!(sub0.default_value, "0x01");
        assert_eq!(sub0.data_type, DataType::Unsigned8);
        let item = od.get_sub(0x2001, 1).unwrap();
        assert_eq!(item.parameter_name, "item");
        assert_eq!(item.data_type, DataType::Unsigned32);
    }

    #[test]
    fn test_add_on_var_fails() {
        let mut od = ObjectDictionary::new();
        od.insert_object(0x2002, OdEntry::var("v", DataType::Unsigned8, AccessType::Rw, "0"))
            .unwrap();
        assert!(matches!(
            od.add_sub_entry(0x2002, 0),
            Err(OdError::NotAnArrayOrRecord(0x2002))
        ));
    }

    #[test]
    fn test_remove_after_add_restores_previous_state() {
        let mut od = record_with_two_items();
        let before = od.clone();
        let new_sub = od.add_sub_entry(0x2000, 1).unwrap();
        assert!(od.remove_sub_entry(0x2000, new_sub, true));
        assert_eq!(od, before);
    }

    #[test]
    fn test_remove_keeps_gap_in_count() {
        let mut od = record_with_two_items();
        od.get_sub_mut(0x2000, 0).unwrap().default_value = String::from("0x10");
        assert!(od.remove_sub_entry(0x2000, 1, false));
        assert_eq!(od.get_sub(0x2000, 0).unwrap().default_value, "0x10");
        assert!(od.get_sub(0x2000, 2).is_some());
    }

    #[test]
    fn test_remove_rejects_missing_and_var() {
        let mut od = record_with_two_items();
        assert!(!od.remove_sub_entry(0x2000, 9, true));
        od.insert_object(0x2003, OdEntry::var("v", DataType::Unsigned8, AccessType::Rw, "0"))
            .unwrap();
        assert!(!od.remove_sub_entry(0x2003, 0, true));
    }
}
