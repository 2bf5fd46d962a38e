//! Admin-side data layer for a real-estate listings console: an in-memory
//! filter/sort/search view over tabular records, and debounced local drafts for
//! long-running edit forms.

pub mod config;
pub mod core;
pub mod draft;
pub mod features;
pub mod logging;
pub mod persistence;
pub mod property;
pub mod snapshots;
pub mod table;

pub use crate::{
    config::CariaConfig,
    core::{
        CariaError,
        FieldKind,
        FieldValue,
        Record,
        RecordId,
        RecordSchema,
    },
    draft::{
        DraftKey,
        DraftManager,
        DraftPhase,
        DraftStatus,
        EntityIdentity,
        SaveStatus,
    },
    persistence::{
        FileStore,
        KeyValueStore,
        MemoryStore,
        StoreError,
    },
    property::{
        PropertyListing,
        PropertyStatus,
    },
    snapshots::{
        Snapshot,
        SnapshotHistory,
    },
    table::{
        compute_view,
        FilterCriteria,
        FilterSelection,
        SortDirection,
        SortState,
        TableState,
    },
};
