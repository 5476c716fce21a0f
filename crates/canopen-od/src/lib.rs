#![cfg_attr(not(feature = "std"), no_std)]

// 'alloc' holds the dictionary arena and all lexical values.
extern crate alloc;

// --- Foundation Modules ---
pub mod diagnostics;
mod error;

// --- Object Dictionary Model ---
pub mod device;
pub mod od;

// --- Codecs ---
pub mod eds;
pub mod flat;

// --- Top-level Exports ---
pub use device::{Device, DeviceCommissioning, DeviceInfo, FileInfo, Module, ModuleInfo};
pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use error::OdError;
pub use od::{AccessType, DataType, EntryKey, ObjectDictionary, ObjectType, OdEntry, PdoMapping};
