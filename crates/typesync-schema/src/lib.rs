//! Declarative side of typesync: static declarations of annotated types, the
//! registry that resolves them, the models built from them and the
//! validation pass that gates every synchronization run.

pub mod alias;
pub mod decl;
pub mod error;
pub mod model;
pub mod registry;
pub mod types;
pub mod validate;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        decl::{Declared, MemberDecl, PropertyAttr, PropertyValue, TypeAttr, TypeDecl},
        model::{Hierarchy, Model, ModelDetail, PropertyModel, build_models},
        registry::{StaticScanner, TypeRegistry, TypeScanner},
        types::{Access, Category, ModelKind, ValueType},
    };
}

