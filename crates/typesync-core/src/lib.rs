//! Reconciliation engine: resolves declared models against persisted
//! records, applies the differences and keeps stable ids tracked across
//! runs.

pub mod editor;
pub mod entity;
pub mod error;
pub mod factory;
pub mod finder;
pub mod store;
pub mod sync;
pub mod tracking;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        editor::{EditorMapping, EditorRef, EditorTable},
        entity::{ContentTypeRecord, DataTypeRecord, Identified, PropertyTypeRecord, RuntimeId},
        error::{ErrorClass, SyncError},
        factory::{Batch, SyncCategories, SyncRunner, SynchronizerFactory},
        finder::Finder,
        store::{EntityStore, MemoryBackend, MemoryStore, SyncBackend},
        sync::{SyncContext, SyncReport, Synchronizer},
        tracking::{IdentityTracker, JsonFileTracker, MemoryTracker, TrackingScope},
    };
}
