use crate::{
    alias::{derive_alias, derive_name},
    decl::{MemberDecl, TypeDecl},
    error::ModelError,
    types::ValueType,
};
use serde_json::Value as JsonValue;
use uuid::Uuid;

///
/// PropertyModel
/// One declared property of a content-bearing model.
///

#[derive(Clone, Debug, PartialEq)]
pub struct PropertyModel {
    pub stable_id: Option<Uuid>,
    pub alias: String,
    pub name: String,
    pub value_type: ValueType,
    pub mandatory: bool,
    pub sort_order: Option<i32>,
    pub description: Option<String>,
    pub group: Option<String>,
    pub validation_pattern: Option<String>,
    pub editor_hint: Option<String>,
    pub default_value: Option<JsonValue>,

    /// Member ident and declaring type, for diagnostics.
    pub member: &'static str,
    pub declared_on: &'static str,
}

impl PropertyModel {
    pub fn from_member(owner: &TypeDecl, member: &MemberDecl) -> Result<Self, ModelError> {
        let attr = &member.attr;

        let default_value = attr
            .default
            .map(serde_json::from_str::<JsonValue>)
            .transpose()
            .map_err(|source| ModelError::InvalidDefault {
                ty: owner.path.to_string(),
                member: member.ident.to_string(),
                source,
            })?;

        Ok(Self {
            stable_id: attr.id,
            alias: attr
                .alias
                .map_or_else(|| derive_alias(member.ident), str::to_string),
            name: attr
                .name
                .filter(|name| !name.trim().is_empty())
                .map_or_else(|| derive_name(member.ident), str::to_string),
            value_type: member.value_type,
            mandatory: attr.mandatory,
            sort_order: attr.sort_order,
            description: attr.description.map(str::to_string),
            group: attr.group.map(str::to_string),
            validation_pattern: attr.validation.map(str::to_string),
            editor_hint: attr.editor.map(str::to_string),
            default_value,
            member: member.ident,
            declared_on: owner.path,
        })
    }

    #[must_use]
    pub const fn has_default_value(&self) -> bool {
        self.default_value.is_some()
    }
}

/// Discover the properties of `decl`, followed by those inherited from
/// `ancestors` (nearest first). Excluded and non read-write members are skipped.
pub(crate) fn discover(
    decl: &'static TypeDecl,
    ancestors: &[&'static TypeDecl],
) -> Result<Vec<PropertyModel>, ModelError> {
    std::iter::once(decl)
        .chain(ancestors.iter().copied())
        .flat_map(|owner| {
            owner
                .members
                .iter()
                .filter(|member| member.is_discoverable())
                .map(move |member| PropertyModel::from_member(owner, member))
        })
        .collect()
}
