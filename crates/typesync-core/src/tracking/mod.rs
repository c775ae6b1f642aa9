//! Durable stable-id to runtime-id tracking.
//!
//! Entries are written the first time a model with a stable id is reconciled
//! and overwritten on every later run. Nothing is ever removed: an entry whose
//! record was deleted out of band simply stops matching.
//!
//! Entity entries share one namespace. Property entries are kept per owning
//! record, since models built on a common base declare the same property ids.

mod file;
mod memory;

pub use file::JsonFileTracker;
pub use memory::MemoryTracker;

use crate::{entity::RuntimeId, error::TrackingError};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

///
/// TrackingScope
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum TrackingScope {
    #[display("entity")]
    Entity,

    /// Property types of the record with this runtime id.
    #[display("property of {_0}")]
    Property(RuntimeId),
}

///
/// IdentityTracker
///

pub trait IdentityTracker {
    fn lookup(&self, scope: TrackingScope, stable_id: Uuid)
    -> Result<Option<RuntimeId>, TrackingError>;

    /// Record or overwrite the entry for `stable_id`.
    fn set(
        &mut self,
        scope: TrackingScope,
        stable_id: Uuid,
        runtime_id: RuntimeId,
    ) -> Result<(), TrackingError>;

    fn lookup_entity(&self, stable_id: Uuid) -> Result<Option<RuntimeId>, TrackingError> {
        self.lookup(TrackingScope::Entity, stable_id)
    }

    fn set_entity(&mut self, stable_id: Uuid, runtime_id: RuntimeId) -> Result<(), TrackingError> {
        self.set(TrackingScope::Entity, stable_id, runtime_id)
    }

    fn lookup_property(
        &self,
        owner: RuntimeId,
        stable_id: Uuid,
    ) -> Result<Option<RuntimeId>, TrackingError> {
        self.lookup(TrackingScope::Property(owner), stable_id)
    }

    fn set_property(
        &mut self,
        owner: RuntimeId,
        stable_id: Uuid,
        runtime_id: RuntimeId,
    ) -> Result<(), TrackingError> {
        self.set(TrackingScope::Property(owner), stable_id, runtime_id)
    }
}

///
/// TrackingTable
/// Both scopes of tracking entries, as held in memory and on disk.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TrackingTable {
    #[serde(default)]
    pub entities: BTreeMap<Uuid, RuntimeId>,

    /// Keyed by the owning record's runtime id.
    #[serde(default)]
    pub properties: BTreeMap<RuntimeId, BTreeMap<Uuid, RuntimeId>>,
}

impl TrackingTable {
    #[must_use]
    pub fn get(&self, scope: TrackingScope, stable_id: Uuid) -> Option<RuntimeId> {
        match scope {
            TrackingScope::Entity => self.entities.get(&stable_id),
            TrackingScope::Property(owner) => self
                .properties
                .get(&owner)
                .and_then(|entries| entries.get(&stable_id)),
        }
        .copied()
    }

    /// Returns `true` when the entry changed.
    pub fn insert(&mut self, scope: TrackingScope, stable_id: Uuid, runtime_id: RuntimeId) -> bool {
        let map = match scope {
            TrackingScope::Entity => &mut self.entities,
            TrackingScope::Property(owner) => self.properties.entry(owner).or_default(),
        };

        map.insert(stable_id, runtime_id) != Some(runtime_id)
    }

    #[must_use]
    pub fn len(&self, scope: TrackingScope) -> usize {
        match scope {
            TrackingScope::Entity => self.entities.len(),
            TrackingScope::Property(owner) => self.properties.get(&owner).map_or(0, BTreeMap::len),
        }
    }
}
