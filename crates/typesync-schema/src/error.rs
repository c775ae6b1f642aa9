use crate::types::Category;
use thiserror::Error as ThisError;

///
/// ModelError
/// Raised while turning a declaration into a `Model`.
///

#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("type '{ty}' is not annotated as a synchronizable type")]
    NotAnnotated { ty: String },

    #[error("type '{ty}' is annotated as {found}, expected {expected}")]
    WrongCategory {
        ty: String,
        expected: Category,
        found: Category,
    },

    #[error("type '{ty}' declares a blank display name")]
    BlankName { ty: String },

    #[error("type '{ty}' extends unknown type '{base}'")]
    UnknownBase { ty: String, base: String },

    #[error("type '{ty}' has a cyclic inheritance chain")]
    InheritanceCycle { ty: String },

    #[error("member '{member}' of '{ty}' has an invalid default value: {source}")]
    InvalidDefault {
        ty: String,
        member: String,
        #[source]
        source: serde_json::Error,
    },
}
