//! Persisted records as the stores hand them out.
//!
//! Records are owned snapshots: a synchronizer mutates its copy and hands it
//! back through `EntityStore::save`. Runtime ids are assigned by the store
//! and are never equal to a model's stable id.

mod content_type;

pub use content_type::{AllowedChild, CompositionRef, ContentTypeRecord, PropertyGroup};

use crate::editor::EditorRef;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// RuntimeId
/// Store-assigned identifier, stable for the life of a record.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct RuntimeId(pub i64);

///
/// Identified
/// Anything the finder can match: a runtime id (once saved) and an alias.
///

pub trait Identified {
    fn runtime_id(&self) -> Option<RuntimeId>;

    fn alias(&self) -> &str;
}

impl<T: Identified + ?Sized> Identified for &T {
    fn runtime_id(&self) -> Option<RuntimeId> {
        (**self).runtime_id()
    }

    fn alias(&self) -> &str {
        (**self).alias()
    }
}

///
/// DataTypeRecord
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DataTypeRecord {
    pub id: Option<RuntimeId>,
    pub alias: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub editor_alias: String,
}

impl Identified for DataTypeRecord {
    fn runtime_id(&self) -> Option<RuntimeId> {
        self.id
    }

    fn alias(&self) -> &str {
        &self.alias
    }
}

///
/// PropertyTypeRecord
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PropertyTypeRecord {
    pub id: Option<RuntimeId>,
    pub alias: String,
    pub name: String,
    pub description: Option<String>,
    pub mandatory: bool,
    pub validation_pattern: Option<String>,
    pub sort_order: i32,
    pub editor: EditorRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
}

impl PropertyTypeRecord {
    #[must_use]
    pub fn new(alias: impl Into<String>, editor: EditorRef) -> Self {
        let alias = alias.into();

        Self {
            id: None,
            name: alias.clone(),
            alias,
            description: None,
            mandatory: false,
            validation_pattern: None,
            sort_order: 0,
            editor,
            default_value: None,
        }
    }
}

impl Identified for PropertyTypeRecord {
    fn runtime_id(&self) -> Option<RuntimeId> {
        self.id
    }

    fn alias(&self) -> &str {
        &self.alias
    }
}
