//! Model to builder resolution.

use std::collections::HashMap;

use relnarrow_core::{ClassId, Reflection, Type};
use tracing::debug;

/// Which builder queries a model.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuilderKey {
    /// The base builder or a custom builder class.
    Resolved(ClassId),
    /// The factory returns something that is not a single class, such as a
    /// union of builders. Models are grouped by the description and the
    /// declared type is used as is.
    Fallback { description: String, declared: Type },
}

/// Resolves models to builder keys, memoizing per model.
///
/// Meant to live for a single resolution; answers never change for a given
/// reflection, so sharing one across resolutions is also fine.
pub struct BuilderResolver<'a, R: Reflection + ?Sized> {
    reflection: &'a R,
    builder: ClassId,
    query_method: &'a str,
    cache: HashMap<ClassId, BuilderKey>,
}

impl<'a, R: Reflection + ?Sized> BuilderResolver<'a, R> {
    pub fn new(reflection: &'a R, builder: ClassId, query_method: &'a str) -> Self {
        Self {
            reflection,
            builder,
            query_method,
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, model: ClassId) -> BuilderKey {
        if let Some(key) = self.cache.get(&model) {
            return key.clone();
        }
        let key = self.determine(model);
        self.cache.insert(model, key.clone());
        key
    }

    /// Only the native static factory counts: annotation-only overrides and
    /// instance methods of the same name do not change which builder the
    /// model really returns.
    fn determine(&self, model: ClassId) -> BuilderKey {
        let Some(returns) = self
            .reflection
            .native_static_method_return_type(model, self.query_method)
        else {
            debug!(
                model = self.reflection.class_name(model),
                method = self.query_method,
                "no native static factory method, using base builder"
            );
            return BuilderKey::Resolved(self.builder);
        };

        if returns.referenced_classes().contains(&self.builder) {
            return BuilderKey::Resolved(self.builder);
        }

        if let &[class] = returns.object_classes().as_slice() {
            return BuilderKey::Resolved(class);
        }

        let description = self.reflection.describe(&returns);
        debug!(
            model = self.reflection.class_name(model),
            returns = %description,
            "factory does not return a single builder class"
        );
        BuilderKey::Fallback {
            description,
            declared: returns,
        }
    }
}
