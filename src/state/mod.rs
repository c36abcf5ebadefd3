// State management module.
// Collection lifecycle and list selection state for the views.

pub mod collection;
pub mod files;

pub use collection::{Collection, CollectionUpdate, Phase};
pub use files::{FileListState, PageMenu, Row};
