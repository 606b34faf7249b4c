//! Class declarations.
//!
//! - **Deserialization layer** (`RawClass`, `RawMethod`): 1:1 mapping to the
//!   `classes` array of a declaration document.
//! - **Analysis layer** (`ClassTable`): names interned, type signatures parsed
//!   and validated, ready for reflection queries.

mod table;

#[cfg(test)]
mod table_tests;

use indexmap::IndexMap;

pub use table::ClassTable;

use crate::TypeSigError;

/// Raw class definition.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawClass {
    pub name: String,
    #[serde(default)]
    pub templates: Vec<String>,
    /// Parent clause, e.g. `Relation<TRelatedModel, TDeclaringModel>`.
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub methods: IndexMap<String, RawMethod>,
}

/// Raw method signature.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawMethod {
    pub returns: String,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Declared only through annotations (`@method`, mixins), not in code.
    #[serde(default)]
    pub magic: bool,
}

/// Parse a JSON array of class declarations.
pub fn parse_declarations(json: &str) -> Result<Vec<RawClass>, serde_json::Error> {
    serde_json::from_str(json)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclError {
    #[error("malformed declarations: {0}")]
    Json(String),

    #[error("class `{0}` is declared more than once")]
    DuplicateClass(String),

    #[error("`{context}` refers to undeclared class `{name}`")]
    UnknownClass { name: String, context: String },

    #[error("invalid type `{sig}` in `{context}`: {source}")]
    InvalidType {
        sig: String,
        context: String,
        source: TypeSigError,
    },

    #[error("`{context}` gives `{class}` {got} type arguments, expected {expected}")]
    ArityMismatch {
        class: String,
        context: String,
        expected: usize,
        got: usize,
    },

    #[error("`{class}` can only extend or implement a class, got `{sig}`")]
    InvalidParent { class: String, sig: String },

    #[error("inheritance cycle through `{0}`")]
    InheritanceCycle(String),
}
