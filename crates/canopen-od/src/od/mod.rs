// crates/canopen-od/src/od/mod.rs

pub mod access;
pub mod constants;
mod datatype;
mod edit;
mod entry;
pub mod pdo_validator;
mod predefined;
pub mod value;

pub use access::{AccessPdo, AccessSdo};
pub use datatype::DataType;
pub use entry::{
    AccessSrdo, AccessType, CustomProperties, EntryKey, ObjectType, OdEntry, PdoMapping,
    DEFAULT_STORAGE_GROUP,
};
pub use predefined::dummy_objects;

use crate::OdError;
use alloc::collections::BTreeMap;
use log::trace;

/// The Object Dictionary: every object and sub-entry of a device, stored
/// flat and sorted by [`EntryKey`].
///
/// An object and its sub-entries share an index; the object is keyed with
/// `subindex: None`. A sub-entry is only ever stored while its object exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectDictionary {
    entries: BTreeMap<EntryKey, OdEntry>,
}

impl ObjectDictionary {
    /// Creates a new, empty OD.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts a new object. Fails if an object with the same index exists.
    pub fn insert_object(&mut self, index: u16, entry: OdEntry) -> Result<(), OdError> {
        let key = EntryKey::object(index);
        if self.entries.contains_key(&key) {
            return Err(OdError::DuplicateIndex(index));
        }
        trace!("Inserting object {:#06X} '{}'", index, entry.parameter_name);
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Inserts or replaces a sub-entry of an existing object.
    /// Returns the entry previously stored at that sub-index.
    ///
    /// A VAR holds its value itself and never takes sub-entries.
    pub fn insert_sub(
        &mut self,
        index: u16,
        subindex: u8,
        entry: OdEntry,
    ) -> Result<Option<OdEntry>, OdError> {
        let parent = self.get(index).ok_or(OdError::EntryNotFound {
            index,
            subindex: None,
        })?;
        if parent.object_type == ObjectType::Var {
            return Err(OdError::NotAnArrayOrRecord(index));
        }
        Ok(self.entries.insert(EntryKey::sub(index, subindex), entry))
    }

    /// Removes an object together with all of its sub-entries.
    pub fn remove_object(&mut self, index: u16) -> Option<OdEntry> {
        let subs: alloc::vec::Vec<u8> = self.sub_entries(index).map(|(s, _)| s).collect();
        for sub in subs {
            self.entries.remove(&EntryKey::sub(index, sub));
        }
        self.entries.remove(&EntryKey::object(index))
    }

    pub fn contains_index(&self, index: u16) -> bool {
        self.entries.contains_key(&EntryKey::object(index))
    }

    pub fn get(&self, index: u16) -> Option<&OdEntry> {
        self.entries.get(&EntryKey::object(index))
    }

    pub fn get_mut(&mut self, index: u16) -> Option<&mut OdEntry> {
        self.entries.get_mut(&EntryKey::object(index))
    }

    pub fn get_sub(&self, index: u16, subindex: u8) -> Option<&OdEntry> {
        self.entries.get(&EntryKey::sub(index, subindex))
    }

    pub fn get_sub_mut(&mut self, index: u16, subindex: u8) -> Option<&mut OdEntry> {
        self.entries.get_mut(&EntryKey::sub(index, subindex))
    }

    pub fn get_entry(&self, key: EntryKey) -> Option<&OdEntry> {
        self.entries.get(&key)
    }

    pub fn get_entry_mut(&mut self, key: EntryKey) -> Option<&mut OdEntry> {
        self.entries.get_mut(&key)
    }

    /// The value entry of an address as used in PDO mappings: sub-index 0 of a
    /// VAR is the object itself.
    pub fn lookup(&self, index: u16, subindex: u8) -> Option<(EntryKey, &OdEntry)> {
        let object = self.get(index)?;
        if object.object_type.has_sub_entries() {
            let key = EntryKey::sub(index, subindex);
            self.entries.get(&key).map(|e| (key, e))
        } else if subindex == 0 {
            Some((EntryKey::object(index), object))
        } else {
            None
        }
    }

    /// All objects in index order.
    pub fn objects(&self) -> impl Iterator<Item = (u16, &OdEntry)> + '_ {
        self.entries
            .iter()
            .filter(|(k, _)| k.subindex.is_none())
            .map(|(k, e)| (k.index, e))
    }

    /// All entries, objects directly followed by their sub-entries.
    pub fn iter(&self) -> impl Iterator<Item = (&EntryKey, &OdEntry)> + '_ {
        self.entries.iter()
    }

    pub fn indices(&self) -> impl Iterator<Item = u16> + '_ {
        self.objects().map(|(i, _)| i)
    }

    /// Sub-entries of an object in sub-index order.
    pub fn sub_entries(&self, index: u16) -> impl Iterator<Item = (u8, &OdEntry)> + '_ {
        self.entries
            .range(EntryKey::sub(index, 0)..=EntryKey::sub(index, u8::MAX))
            .filter_map(|(k, e)| k.subindex.map(|s| (s, e)))
    }

    pub fn sub_count(&self, index: u16) -> usize {
        self.sub_entries(index).count()
    }

    /// Highest sub-index present, `None` if the object has no sub-entries.
    pub fn max_subindex(&self, index: u16) -> Option<u8> {
        self.sub_entries(index).map(|(s, _)| s).last()
    }

    /// The parent key of a sub-entry, if that parent is stored.
    pub fn parent_key(&self, key: EntryKey) -> Option<EntryKey> {
        key.parent().filter(|p| self.entries.contains_key(p))
    }

    /// The data type of an entry, with `Unknown` on an ARRAY element
    /// replaced by the ARRAY's own type.
    pub fn resolved_data_type(&self, key: EntryKey) -> DataType {
        let Some(entry) = self.entries.get(&key) else {
            return DataType::Unknown;
        };
        if entry.data_type != DataType::Unknown {
            return entry.data_type;
        }
        match self.parent_key(key).and_then(|p| self.entries.get(&p)) {
            Some(parent) if parent.object_type == ObjectType::Array => parent.data_type,
            _ => DataType::Unknown,
        }
    }

    /// The numeric count stored in sub-index 0 of an ARRAY/RECORD.
    pub fn sub_count_value(&self, index: u16) -> Option<u64> {
        self.get_sub(index, 0)
            .and_then(|e| value::parse_unsigned(&e.default_value, 0))
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest index in `range` that has no object.
    pub fn first_free_index(&self, range: core::ops::RangeInclusive<u16>) -> Option<u16> {
        range.into_iter().find(|i| !self.contains_index(*i))
    }

    /// Number of objects in `range`.
    pub fn count_in_range(&self, range: core::ops::RangeInclusive<u16>) -> usize {
        self.objects().filter(|(i, _)| range.contains(i)).count()
    }
}
