use darling::{
    FromMeta,
    util::{Flag, PathList, SpannedValue},
};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Path};

///
/// MarkerKind
/// The four marker attributes, one per category.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MarkerKind {
    DataType,
    DocumentType,
    MediaType,
    MemberType,
}

impl MarkerKind {
    const ALL: [Self; 4] = [
        Self::DataType,
        Self::DocumentType,
        Self::MediaType,
        Self::MemberType,
    ];

    pub const fn attr_name(self) -> &'static str {
        match self {
            Self::DataType => "data_type",
            Self::DocumentType => "document_type",
            Self::MediaType => "media_type",
            Self::MemberType => "member_type",
        }
    }

    pub fn of(attr: &Attribute) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| attr.path().is_ident(kind.attr_name()))
    }

    pub const fn is_composable(self) -> bool {
        matches!(self, Self::DocumentType | Self::MediaType)
    }

    pub const fn has_properties(self) -> bool {
        !matches!(self, Self::DataType)
    }

    pub fn category(self) -> TokenStream {
        let variant = match self {
            Self::DataType => quote!(DataType),
            Self::DocumentType => quote!(DocumentType),
            Self::MediaType => quote!(MediaType),
            Self::MemberType => quote!(MemberType),
        };

        quote!(::typesync::schema::types::Category::#variant)
    }
}

///
/// MarkerArgs
///

#[derive(Debug, FromMeta)]
pub struct MarkerArgs {
    pub name: String,

    #[darling(default)]
    pub id: Option<SpannedValue<String>>,

    #[darling(default)]
    pub alias: Option<String>,

    #[darling(default)]
    pub description: Option<String>,

    #[darling(default)]
    pub icon: Option<String>,

    #[darling(default)]
    pub container: Flag,

    // composable categories
    #[darling(default)]
    pub allowed_as_root: Flag,

    #[darling(default)]
    pub thumbnail: Option<String>,

    #[darling(default)]
    pub compositions: PathList,

    #[darling(default)]
    pub allowed_children: PathList,

    // data types
    #[darling(default)]
    pub editor: Option<String>,
}

impl MarkerArgs {
    /// Names of the arguments set here that `kind` does not accept.
    pub fn misplaced(&self, kind: MarkerKind) -> Vec<&'static str> {
        let mut names = Vec::new();

        if !kind.is_composable() {
            if self.allowed_as_root.is_present() {
                names.push("allowed_as_root");
            }
            if self.thumbnail.is_some() {
                names.push("thumbnail");
            }
            if !self.compositions.is_empty() {
                names.push("compositions");
            }
            if !self.allowed_children.is_empty() {
                names.push("allowed_children");
            }
        }
        if kind != MarkerKind::DataType && self.editor.is_some() {
            names.push("editor");
        }

        names
    }
}

///
/// DeclareArgs
/// `#[declare(..)]`, valid with or without a marker.
///

#[derive(Debug, Default, FromMeta)]
pub struct DeclareArgs {
    #[darling(default)]
    pub base: Option<Path>,
}

///
/// PropertyArgs
///

#[derive(Debug, Default, FromMeta)]
pub struct PropertyArgs {
    #[darling(default)]
    pub id: Option<SpannedValue<String>>,

    #[darling(default)]
    pub alias: Option<String>,

    #[darling(default)]
    pub name: Option<String>,

    #[darling(default)]
    pub mandatory: Flag,

    #[darling(default)]
    pub sort_order: Option<i32>,

    #[darling(default)]
    pub description: Option<String>,

    #[darling(default)]
    pub group: Option<String>,

    #[darling(default)]
    pub validation: Option<String>,

    #[darling(default)]
    pub editor: Option<String>,

    /// JSON literal.
    #[darling(default)]
    pub default: Option<SpannedValue<String>>,

    #[darling(default)]
    pub ignore: Flag,

    #[darling(default)]
    pub read_only: Flag,

    #[darling(default)]
    pub write_only: Flag,
}
