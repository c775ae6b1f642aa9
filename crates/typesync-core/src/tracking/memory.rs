use super::{IdentityTracker, TrackingScope, TrackingTable};
use crate::{entity::RuntimeId, error::TrackingError};
use uuid::Uuid;

///
/// MemoryTracker
///

#[derive(Clone, Debug, Default)]
pub struct MemoryTracker {
    table: TrackingTable,
}

impl MemoryTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn table(&self) -> &TrackingTable {
        &self.table
    }
}

impl IdentityTracker for MemoryTracker {
    fn lookup(
        &self,
        scope: TrackingScope,
        stable_id: Uuid,
    ) -> Result<Option<RuntimeId>, TrackingError> {
        Ok(self.table.get(scope, stable_id))
    }

    fn set(
        &mut self,
        scope: TrackingScope,
        stable_id: Uuid,
        runtime_id: RuntimeId,
    ) -> Result<(), TrackingError> {
        self.table.insert(scope, stable_id, runtime_id);

        Ok(())
    }
}
