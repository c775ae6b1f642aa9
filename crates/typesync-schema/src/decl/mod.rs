//! Static declarations of annotated types.
//!
//! A `TypeDecl` is what the derive macro emits for one struct: its path, the
//! base type it extends, the marker attribute (if any) and its members.
//! Declarations are plain `'static` data; everything that needs the wider
//! picture (base chains, cross references) goes through `TypeRegistry`.

mod value;

pub use value::PropertyValue;

use crate::types::{Access, Category, ValueType};
use uuid::Uuid;

///
/// Declared
///
/// Implemented by `#[derive(Declare)]`.
///

pub trait Declared {
    /// Fully-qualified type path, used for every cross reference.
    const PATH: &'static str;

    fn decl() -> &'static TypeDecl;
}

///
/// TypeDecl
///

#[derive(Clone, Copy, Debug)]
pub struct TypeDecl {
    pub path: &'static str,
    pub ident: &'static str,

    /// Path of the type this one extends, annotated or not.
    pub base: Option<&'static str>,

    /// Marker attribute; `None` for plain base types.
    pub marker: Option<TypeAttr>,

    /// Members declared directly on this type.
    pub members: &'static [MemberDecl],
}

impl TypeDecl {
    #[must_use]
    pub const fn new(path: &'static str, ident: &'static str) -> Self {
        Self {
            path,
            ident,
            base: None,
            marker: None,
            members: &[],
        }
    }

    #[must_use]
    pub const fn with_base(mut self, base: &'static str) -> Self {
        self.base = Some(base);
        self
    }

    #[must_use]
    pub const fn with_marker(mut self, marker: TypeAttr) -> Self {
        self.marker = Some(marker);
        self
    }

    #[must_use]
    pub const fn with_members(mut self, members: &'static [MemberDecl]) -> Self {
        self.members = members;
        self
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.marker.as_ref().map(|m| m.category)
    }

    #[must_use]
    pub fn is_annotated_as(&self, category: Category) -> bool {
        self.category() == Some(category)
    }
}

///
/// TypeAttr
/// The marker attribute placed on a synchronizable type.
///

#[derive(Clone, Copy, Debug)]
pub struct TypeAttr {
    pub category: Category,
    pub id: Option<Uuid>,
    pub name: &'static str,
    pub alias: Option<&'static str>,
    pub description: Option<&'static str>,
    pub icon: Option<&'static str>,
    pub is_container: bool,

    // composable categories
    pub allowed_as_root: bool,
    pub thumbnail: Option<&'static str>,
    pub compositions: &'static [&'static str],
    pub allowed_children: &'static [&'static str],

    // data types
    pub editor: Option<&'static str>,
}

impl TypeAttr {
    #[must_use]
    pub const fn new(category: Category, name: &'static str) -> Self {
        Self {
            category,
            id: None,
            name,
            alias: None,
            description: None,
            icon: None,
            is_container: false,
            allowed_as_root: false,
            thumbnail: None,
            compositions: &[],
            allowed_children: &[],
            editor: None,
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub const fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    #[must_use]
    pub const fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub const fn with_compositions(mut self, paths: &'static [&'static str]) -> Self {
        self.compositions = paths;
        self
    }

    #[must_use]
    pub const fn with_allowed_children(mut self, paths: &'static [&'static str]) -> Self {
        self.allowed_children = paths;
        self
    }
}

///
/// MemberDecl
///

#[derive(Clone, Copy, Debug)]
pub struct MemberDecl {
    pub ident: &'static str,
    pub value_type: ValueType,
    pub access: Access,

    /// `false` when the member is explicitly excluded from scaffolding.
    pub scaffold: bool,
    pub attr: PropertyAttr,
}

impl MemberDecl {
    #[must_use]
    pub const fn new(ident: &'static str, value_type: ValueType) -> Self {
        Self {
            ident,
            value_type,
            access: Access::ReadWrite,
            scaffold: true,
            attr: PropertyAttr::EMPTY,
        }
    }

    #[must_use]
    pub const fn with_attr(mut self, attr: PropertyAttr) -> Self {
        self.attr = attr;
        self
    }

    #[must_use]
    pub const fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    #[must_use]
    pub const fn excluded(mut self) -> Self {
        self.scaffold = false;
        self
    }

    /// Whether property discovery picks this member up.
    #[must_use]
    pub const fn is_discoverable(&self) -> bool {
        self.scaffold && self.access.is_read_write()
    }
}

///
/// PropertyAttr
/// Optional per-member overrides; every field falls back to a derived value.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct PropertyAttr {
    pub id: Option<Uuid>,
    pub alias: Option<&'static str>,
    pub name: Option<&'static str>,
    pub mandatory: bool,
    pub sort_order: Option<i32>,
    pub description: Option<&'static str>,
    pub group: Option<&'static str>,
    pub validation: Option<&'static str>,
    pub editor: Option<&'static str>,

    /// Default value as a JSON literal.
    pub default: Option<&'static str>,
}

impl PropertyAttr {
    pub const EMPTY: Self = Self {
        id: None,
        alias: None,
        name: None,
        mandatory: false,
        sort_order: None,
        description: None,
        group: None,
        validation: None,
        editor: None,
        default: None,
    };
}
