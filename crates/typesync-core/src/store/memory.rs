use super::{EntityStore, SyncBackend};
use crate::{
    entity::{ContentTypeRecord, DataTypeRecord, Identified, RuntimeId},
    error::StoreError,
};
use typesync_schema::alias::alias_eq;

pub const DEFAULT_CONTENT_ICON: &str = "icon-document";
pub const DEFAULT_THUMBNAIL: &str = "folder.png";
pub const DEFAULT_DATA_TYPE_ICON: &str = "icon-autofill";
pub const DEFAULT_EDITOR: &str = "Umbraco.Label";

///
/// StoredRecord
/// Records the memory store can assign runtime ids to.
///

pub trait StoredRecord: Identified + Clone {
    fn set_runtime_id(&mut self, id: RuntimeId);

    /// Assign ids to nested entries that do not have one yet.
    fn assign_nested_ids(&mut self, _next: &mut dyn FnMut() -> RuntimeId) {}
}

impl StoredRecord for DataTypeRecord {
    fn set_runtime_id(&mut self, id: RuntimeId) {
        self.id = Some(id);
    }
}

impl StoredRecord for ContentTypeRecord {
    fn set_runtime_id(&mut self, id: RuntimeId) {
        self.id = Some(id);
    }

    fn assign_nested_ids(&mut self, next: &mut dyn FnMut() -> RuntimeId) {
        for property in self.property_types_mut().filter(|p| p.id.is_none()) {
            property.id = Some(next());
        }
    }
}

///
/// MemoryStore
///
/// Reference store keeping records in insertion order. Runtime ids come from
/// one counter shared by records and their nested property types.
///

#[derive(Clone, Debug)]
pub struct MemoryStore<R> {
    records: Vec<R>,
    defaults: R,
    next_id: i64,
    saves: usize,
}

impl<R: StoredRecord> MemoryStore<R> {
    #[must_use]
    pub const fn new(defaults: R) -> Self {
        Self {
            records: Vec::new(),
            defaults,
            next_id: 1,
            saves: 0,
        }
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub const fn saves(&self) -> usize {
        self.saves
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: RuntimeId) -> Option<&R> {
        self.records.iter().find(|r| r.runtime_id() == Some(id))
    }

    /// Seed a record directly, bypassing the save counter.
    pub fn insert(&mut self, mut record: R) -> RuntimeId {
        let id = self.allocate();
        record.set_runtime_id(id);
        self.assign_nested(&mut record);
        self.records.push(record);

        id
    }

    /// Delete a record out of band.
    pub fn remove(&mut self, id: RuntimeId) -> Option<R> {
        let pos = self.records.iter().position(|r| r.runtime_id() == Some(id))?;
        Some(self.records.remove(pos))
    }

    fn allocate(&mut self) -> RuntimeId {
        let id = RuntimeId(self.next_id);
        self.next_id += 1;

        id
    }

    fn assign_nested(&mut self, record: &mut R) {
        let mut next_id = self.next_id;
        record.assign_nested_ids(&mut || {
            let id = RuntimeId(next_id);
            next_id += 1;
            id
        });
        self.next_id = next_id;
    }
}

impl MemoryStore<ContentTypeRecord> {
    /// Content-type store with the platform's default icon and thumbnail.
    #[must_use]
    pub fn content_types() -> Self {
        Self::new(ContentTypeRecord {
            icon: DEFAULT_CONTENT_ICON.to_string(),
            thumbnail: DEFAULT_THUMBNAIL.to_string(),
            ..ContentTypeRecord::default()
        })
    }
}

impl MemoryStore<DataTypeRecord> {
    /// Data-type store with the platform's default icon and editor.
    #[must_use]
    pub fn data_types() -> Self {
        Self::new(DataTypeRecord {
            icon: DEFAULT_DATA_TYPE_ICON.to_string(),
            editor_alias: DEFAULT_EDITOR.to_string(),
            ..DataTypeRecord::default()
        })
    }
}

impl<R: StoredRecord> EntityStore<R> for MemoryStore<R> {
    fn get_all(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.records.clone())
    }

    fn get_by_alias(&self, alias: &str) -> Result<Option<R>, StoreError> {
        Ok(self
            .records
            .iter()
            .find(|r| alias_eq(r.alias(), alias))
            .cloned())
    }

    fn save(&mut self, record: &R) -> Result<(), StoreError> {
        let clash = self
            .records
            .iter()
            .any(|r| alias_eq(r.alias(), record.alias()) && r.runtime_id() != record.runtime_id());
        if clash {
            return Err(StoreError::backend(format!(
                "alias '{}' is already taken",
                record.alias()
            )));
        }

        let mut record = record.clone();
        match record.runtime_id() {
            Some(id) => {
                let pos = self
                    .records
                    .iter()
                    .position(|r| r.runtime_id() == Some(id))
                    .ok_or_else(|| StoreError::NotFound {
                        alias: record.alias().to_string(),
                    })?;
                self.assign_nested(&mut record);
                self.records[pos] = record;
            }
            None => {
                let id = self.allocate();
                record.set_runtime_id(id);
                self.assign_nested(&mut record);
                self.records.push(record);
            }
        }
        self.saves += 1;

        Ok(())
    }

    fn create_default(&self) -> R {
        self.defaults.clone()
    }
}

///
/// MemoryBackend
///

#[derive(Clone, Debug)]
pub struct MemoryBackend {
    pub data_types: MemoryStore<DataTypeRecord>,
    pub media_types: MemoryStore<ContentTypeRecord>,
    pub document_types: MemoryStore<ContentTypeRecord>,
    pub member_types: MemoryStore<ContentTypeRecord>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            data_types: MemoryStore::data_types(),
            media_types: MemoryStore::content_types(),
            document_types: MemoryStore::content_types(),
            member_types: MemoryStore::content_types(),
        }
    }
}

impl SyncBackend for MemoryBackend {
    fn data_types(&mut self) -> &mut dyn EntityStore<DataTypeRecord> {
        &mut self.data_types
    }

    fn media_types(&mut self) -> &mut dyn EntityStore<ContentTypeRecord> {
        &mut self.media_types
    }

    fn document_types(&mut self) -> &mut dyn EntityStore<ContentTypeRecord> {
        &mut self.document_types
    }

    fn member_types(&mut self) -> &mut dyn EntityStore<ContentTypeRecord> {
        &mut self.member_types
    }
}
