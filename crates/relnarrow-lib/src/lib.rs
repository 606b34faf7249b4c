//! Relnarrow: closure parameter narrowing for relation-querying builder calls.
//!
//! Given a call such as `$users->whereHas('posts.comments', fn ($query) => ...)`,
//! infers the builder type the callback receives by walking the relation
//! path through the declared model classes.
//!
//! # Example
//!
//! ```
//! use relnarrow_lib::Project;
//!
//! let project = Project::from_json(r#"{ "classes": [
//!     { "name": "Model", "methods": { "query": { "static": true, "returns": "Builder<static>" } } },
//!     { "name": "Builder", "templates": ["TModel"] },
//!     { "name": "Relation", "templates": ["TRelatedModel", "TDeclaringModel"] },
//!     { "name": "User", "extends": "Model",
//!       "methods": { "posts": { "returns": "Relation<Post, $this>" } } },
//!     { "name": "Post", "extends": "Model" }
//! ] }"#).unwrap();
//!
//! let extension = project.extension().unwrap();
//! let user = project.class("User").unwrap();
//! let ty = extension.narrow_builder(&[user], "posts").unwrap();
//! assert_eq!(extension.describe(&ty), "Closure(Builder<Post>): mixed");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod builder;
pub mod call;
pub mod capability;
pub mod config;
pub mod extension;
pub mod extract;
pub mod path;
pub mod project;
pub mod registry;
pub mod synth;
pub mod walk;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod synth_tests;

pub use builder::{BuilderKey, BuilderResolver};
pub use call::{
    Arg, Argument, FunctionCall, FunctionRef, MethodCall, MethodRef, ParameterRef, Scope,
    StaticCall, TypedScope,
};
pub use capability::{Capabilities, Capability};
pub use config::Config;
pub use extension::{
    FunctionParameterClosureTypeExtension, MethodParameterClosureTypeExtension,
    RelationClosureExtension, StaticMethodParameterClosureTypeExtension,
};
pub use path::RelationPath;
pub use project::Project;
pub use registry::ExtensionRegistry;
pub use synth::{ClosureVariant, Synthesizer};
pub use walk::{Walk, Walker};

pub use relnarrow_core::{ClassId, ClassTable, DeclError, Reflection, Type};

/// Errors raised while loading a project or wiring an extension.
///
/// Narrowing itself never fails: an unresolvable call site yields no
/// refinement instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Declarations(#[from] DeclError),

    #[error("malformed project: {0}")]
    Json(String),

    /// A class named in the configuration is not declared.
    #[error("configured class `{0}` is not declared")]
    UnknownClass(String),

    #[error("class `{class}` has no template parameter `{template}`")]
    UnknownTemplate { class: String, template: String },
}

pub type Result<T> = std::result::Result<T, Error>;
