use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};

///
/// Category
///
/// One synchronizable family of persisted types. Each category is reconciled
/// by its own synchronizer against its own store.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Category {
    #[serde(rename = "DataTypes")]
    DataType,
    #[serde(rename = "MediaTypes")]
    MediaType,
    #[serde(rename = "DocumentTypes")]
    DocumentType,
    #[serde(rename = "MemberTypes")]
    MemberType,
}

impl Category {
    /// Every category, in the order a full run processes them.
    pub const ALL: [Self; 4] = [
        Self::DataType,
        Self::MediaType,
        Self::DocumentType,
        Self::MemberType,
    ];

    #[must_use]
    pub const fn kind(self) -> ModelKind {
        match self {
            Self::DataType => ModelKind::Simple,
            Self::MemberType => ModelKind::Content,
            Self::DocumentType | Self::MediaType => ModelKind::Composable,
        }
    }
}

///
/// ModelKind
///
/// Closed capability tag. Content kinds own properties; composable kinds also
/// take part in inheritance, composition and allowed-child relationships.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ModelKind {
    Simple,
    Content,
    Composable,
}

impl ModelKind {
    #[must_use]
    pub const fn has_properties(self) -> bool {
        matches!(self, Self::Content | Self::Composable)
    }

    #[must_use]
    pub const fn is_composable(self) -> bool {
        matches!(self, Self::Composable)
    }
}

///
/// ValueType
///
/// Semantic type of a declared property. Editor mappings key off this
/// together with the optional editor hint.
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[remain::sorted]
pub enum ValueType {
    Bool,
    Date,
    DateTime,
    Decimal,
    Integer,
    Json,
    Reference,
    Tags,
    Text,
}

impl ValueType {
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Decimal | Self::Integer)
    }

    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }
}

///
/// Access
/// Member accessibility as seen by property discovery.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Access {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl Access {
    #[must_use]
    pub const fn is_read_write(self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_kinds() {
        assert_eq!(Category::DataType.kind(), ModelKind::Simple);
        assert_eq!(Category::MemberType.kind(), ModelKind::Content);
        assert!(Category::DocumentType.kind().is_composable());
        assert!(Category::MediaType.kind().has_properties());
        assert!(!Category::DataType.kind().has_properties());
    }

    #[test]
    fn value_type_parses_from_display() {
        for ty in [ValueType::Text, ValueType::DateTime, ValueType::Tags] {
            assert_eq!(ty.to_string().parse::<ValueType>().unwrap(), ty);
        }
    }

    #[test]
    fn category_uses_plural_config_labels() {
        let json = serde_json::to_string(&Category::DocumentType).unwrap();
        assert_eq!(json, "\"DocumentTypes\"");
    }
}
