//! Ordering, grouping and page state for a software center's list of
//! installed applications.

pub mod banner;
pub mod collate;
pub mod installed;
pub mod settings;
pub mod snapshot;
pub mod types;

pub use installed::{Boundary, Section, SortKey, section, section_boundary, sort_key};
pub use types::{AppQuirks, AppState, ApplicationRecord, ComponentKind, SpecialKind};
