use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use typesync_schema::{alias::alias_key, types::ValueType};

///
/// EditorRef
/// The editor definition a property type is rendered and stored with.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct EditorRef {
    pub editor_alias: String,
    pub data_type: String,
}

impl EditorRef {
    pub fn new(editor_alias: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            editor_alias: editor_alias.into(),
            data_type: data_type.into(),
        }
    }
}

///
/// EditorMapping
///
/// Resolves a property's editor hint and value type to an editor definition.
/// Implementations must fail with `NoMappingFound` rather than substitute.
///

pub trait EditorMapping {
    fn resolve(&self, hint: Option<&str>, value_type: ValueType) -> Result<EditorRef, EditorError>;
}

///
/// EditorTable
///
/// Lookup table: an explicit hint is looked up by name (case-insensitive)
/// and never falls back to the value-type default.
///

#[derive(Clone, Debug, Default)]
pub struct EditorTable {
    by_hint: HashMap<String, EditorRef>,
    by_value_type: HashMap<ValueType, EditorRef>,
}

impl EditorTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hint(mut self, hint: &str, editor: EditorRef) -> Self {
        self.by_hint.insert(alias_key(hint), editor);
        self
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: ValueType, editor: EditorRef) -> Self {
        self.by_value_type.insert(value_type, editor);
        self
    }
}

impl EditorMapping for EditorTable {
    fn resolve(&self, hint: Option<&str>, value_type: ValueType) -> Result<EditorRef, EditorError> {
        let found = match hint {
            Some(hint) => self.by_hint.get(&alias_key(hint)),
            None => self.by_value_type.get(&value_type),
        };

        found.cloned().ok_or_else(|| EditorError::NoMappingFound {
            hint: hint.map(str::to_string),
            value_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EditorTable {
        EditorTable::new()
            .with_value_type(ValueType::Text, EditorRef::new("Umbraco.TextBox", "Textstring"))
            .with_hint("richtext", EditorRef::new("Umbraco.TinyMCE", "Richtext editor"))
    }

    #[test]
    fn value_type_default_applies_without_hint() {
        let editor = table().resolve(None, ValueType::Text).unwrap();
        assert_eq!(editor.editor_alias, "Umbraco.TextBox");
    }

    #[test]
    fn hint_is_case_insensitive() {
        let editor = table().resolve(Some("RichText"), ValueType::Text).unwrap();
        assert_eq!(editor.editor_alias, "Umbraco.TinyMCE");
    }

    #[test]
    fn unknown_hint_does_not_fall_back() {
        let err = table().resolve(Some("markdown"), ValueType::Text).unwrap_err();
        assert!(matches!(
            err,
            EditorError::NoMappingFound { hint: Some(_), value_type: ValueType::Text }
        ));
    }

    #[test]
    fn unmapped_value_type_fails() {
        assert!(table().resolve(None, ValueType::Date).is_err());
    }
}
