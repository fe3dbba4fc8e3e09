//! # Tally Core
//!
//! Core state and persistence for a personal multi-counter manager.
//!
//! This crate owns the counter collection (counters, the current-counter
//! pointer, the favorites filter and drag-and-drop ordering) and keeps it in
//! sync with a key-value storage backend. Rendering is left to whichever view
//! drives a [`CounterStore`].

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::TallyConfig;
pub use domain::{
    collection::{CollectionState, CollectionStats, EmptyState},
    counter::{Counter, CounterId},
    reorder::{DragSession, ElementBox, PositionAssignment},
    snapshot::ExportSnapshot,
};
pub use error::{Result, TallyError};
pub use storage::{KeyValueStore, MemoryStorage};
pub use store::CounterStore;
