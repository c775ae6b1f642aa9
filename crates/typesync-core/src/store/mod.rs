//! Entity store boundary.
//!
//! One store per category. Stores are synchronous and assume exclusive
//! access for the duration of a run; the core never groups calls into
//! transactions.

mod memory;

pub use memory::{
    DEFAULT_CONTENT_ICON, DEFAULT_DATA_TYPE_ICON, DEFAULT_EDITOR, DEFAULT_THUMBNAIL, MemoryBackend,
    MemoryStore, StoredRecord,
};

use crate::{
    entity::{ContentTypeRecord, DataTypeRecord},
    error::StoreError,
};
use typesync_schema::types::Category;

///
/// EntityStore
///

pub trait EntityStore<R> {
    fn get_all(&self) -> Result<Vec<R>, StoreError>;

    /// Case-insensitive alias lookup.
    fn get_by_alias(&self, alias: &str) -> Result<Option<R>, StoreError>;

    /// Insert (no runtime id yet) or update (runtime id set) a record.
    fn save(&mut self, record: &R) -> Result<(), StoreError>;

    /// A fresh record carrying the platform defaults for this category.
    fn create_default(&self) -> R;
}

///
/// SyncBackend
/// Hands out the store of each category.
///

pub trait SyncBackend {
    fn data_types(&mut self) -> &mut dyn EntityStore<DataTypeRecord>;

    fn media_types(&mut self) -> &mut dyn EntityStore<ContentTypeRecord>;

    fn document_types(&mut self) -> &mut dyn EntityStore<ContentTypeRecord>;

    fn member_types(&mut self) -> &mut dyn EntityStore<ContentTypeRecord>;

    /// Content-type store for `category`; `None` for data types.
    fn content_types(
        &mut self,
        category: Category,
    ) -> Option<&mut dyn EntityStore<ContentTypeRecord>> {
        match category {
            Category::DataType => None,
            Category::MediaType => Some(self.media_types()),
            Category::DocumentType => Some(self.document_types()),
            Category::MemberType => Some(self.member_types()),
        }
    }
}
