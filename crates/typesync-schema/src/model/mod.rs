//! In-memory models built from declarations.
//!
//! A `Model` is constructed once per annotated type at the start of a run and
//! is the source of truth a persisted entity is reconciled against. Models
//! are immutable once built; nothing in here touches persistence.

mod property;


pub use property::PropertyModel;

use crate::{
    alias::derive_alias,
    decl::TypeDecl,
    error::ModelError,
    registry::TypeRegistry,
    types::{Category, ModelKind},
};
use uuid::Uuid;

///
/// Model
///

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub category: Category,

    /// Declaring type path and ident.
    pub type_path: &'static str,
    pub type_name: &'static str,

    /// Declaring type followed by every ancestor path, nearest first.
    pub lineage: Vec<&'static str>,

    pub stable_id: Option<Uuid>,
    pub alias: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub is_container: bool,

    pub detail: ModelDetail,
}

///
/// ModelDetail
/// Kind-specific payload; the variant always matches `category.kind()`.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ModelDetail {
    Simple {
        editor: Option<String>,
    },
    Content {
        properties: Vec<PropertyModel>,
    },
    Composable {
        properties: Vec<PropertyModel>,
        hierarchy: Hierarchy,
    },
}

///
/// Hierarchy
/// Relationship declarations of a composable model, as type paths.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hierarchy {
    pub parent: Option<&'static str>,
    pub compositions: Vec<&'static str>,
    pub allowed_children: Vec<&'static str>,
    pub allowed_as_root: bool,
    pub thumbnail: Option<String>,
}

impl Model {
    /// Build the model for `decl`, which must carry the `category` marker.
    pub fn build(
        decl: &'static TypeDecl,
        category: Category,
        registry: &TypeRegistry,
    ) -> Result<Self, ModelError> {
        let marker = decl.marker.as_ref().ok_or_else(|| ModelError::NotAnnotated {
            ty: decl.path.to_string(),
        })?;
        if marker.category != category {
            return Err(ModelError::WrongCategory {
                ty: decl.path.to_string(),
                expected: category,
                found: marker.category,
            });
        }
        if marker.name.trim().is_empty() {
            return Err(ModelError::BlankName {
                ty: decl.path.to_string(),
            });
        }

        let ancestors = registry.ancestors(decl)?;
        let lineage = std::iter::once(decl.path)
            .chain(ancestors.iter().map(|a| a.path))
            .collect();

        let detail = match category.kind() {
            ModelKind::Simple => ModelDetail::Simple {
                editor: marker.editor.map(str::to_string),
            },
            ModelKind::Content => ModelDetail::Content {
                properties: property::discover(decl, &ancestors)?,
            },
            // ancestor members belong to the ancestor's own model
            ModelKind::Composable => ModelDetail::Composable {
                properties: property::discover(decl, &[])?,
                hierarchy: Hierarchy {
                    parent: ancestors
                        .iter()
                        .find(|a| a.is_annotated_as(category))
                        .map(|a| a.path),
                    compositions: marker.compositions.to_vec(),
                    allowed_children: marker.allowed_children.to_vec(),
                    allowed_as_root: marker.allowed_as_root,
                    thumbnail: marker.thumbnail.map(str::to_string),
                },
            },
        };

        Ok(Self {
            category,
            type_path: decl.path,
            type_name: decl.ident,
            lineage,
            stable_id: marker.id,
            alias: marker
                .alias
                .map_or_else(|| derive_alias(decl.ident), str::to_string),
            name: marker.name.trim().to_string(),
            description: marker.description.map(str::to_string),
            icon: marker.icon.map(str::to_string),
            is_container: marker.is_container,
            detail,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> ModelKind {
        self.category.kind()
    }

    /// Declared properties; empty for simple models.
    #[must_use]
    pub fn properties(&self) -> &[PropertyModel] {
        match &self.detail {
            ModelDetail::Simple { .. } => &[],
            ModelDetail::Content { properties } | ModelDetail::Composable { properties, .. } => {
                properties
            }
        }
    }

    #[must_use]
    pub const fn hierarchy(&self) -> Option<&Hierarchy> {
        match &self.detail {
            ModelDetail::Composable { hierarchy, .. } => Some(hierarchy),
            _ => None,
        }
    }

    #[must_use]
    pub fn editor(&self) -> Option<&str> {
        match &self.detail {
            ModelDetail::Simple { editor } => editor.as_deref(),
            _ => None,
        }
    }

    /// Whether this model's declaring type is `path` or derives from it.
    #[must_use]
    pub fn is_assignable_to(&self, path: &str) -> bool {
        self.lineage.iter().any(|p| *p == path)
    }
}

/// Build every model of `category`, in registry declaration order.
pub fn build_models(registry: &TypeRegistry, category: Category) -> Result<Vec<Model>, ModelError> {
    registry
        .model_types(category)
        .map(|decl| Model::build(decl, category, registry))
        .collect()
}
