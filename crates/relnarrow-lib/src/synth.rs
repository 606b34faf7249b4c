//! Builder and closure type synthesis.

use indexmap::{IndexMap, IndexSet};
use relnarrow_core::{ClassId, ClosureParam, ClosureSignature, Reflection, Type};

use crate::builder::{BuilderKey, BuilderResolver};
use crate::walk::Walk;

/// Shape of the synthesized callback parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosureVariant {
    /// The callback receives the related builder.
    Narrow,
    /// The callback receives the related builder or one of the relations.
    WithRelation,
}

pub struct Synthesizer<'a, R: Reflection + ?Sized> {
    reflection: &'a R,
    resolver: BuilderResolver<'a, R>,
}

impl<'a, R: Reflection + ?Sized> Synthesizer<'a, R> {
    pub fn new(reflection: &'a R, builder: ClassId, query_method: &'a str) -> Self {
        Self {
            reflection,
            resolver: BuilderResolver::new(reflection, builder, query_method),
        }
    }

    /// Builder type for a set of models.
    ///
    /// Models sharing a builder are grouped. A generic builder is
    /// instantiated over the union of its models, a fixed one is used as is.
    /// The groups are then unioned; no models yields `never`.
    pub fn builder_type(&mut self, models: impl IntoIterator<Item = ClassId>) -> Type {
        let models: IndexSet<ClassId> = models.into_iter().collect();

        let mut groups: IndexMap<BuilderKey, Vec<Type>> = IndexMap::new();
        for model in models {
            groups
                .entry(self.resolver.resolve(model))
                .or_default()
                .push(Type::object(model));
        }

        Type::union(groups.into_iter().map(|(key, models)| match key {
            BuilderKey::Resolved(builder) if self.reflection.is_generic(builder) => {
                Type::generic(builder, vec![Type::union(models)])
            }
            BuilderKey::Resolved(builder) => Type::object(builder),
            BuilderKey::Fallback { declared, .. } => declared,
        }))
    }

    /// Callback type for a walk, `None` when the walk reached no model.
    pub fn closure_type(&mut self, variant: ClosureVariant, walk: &Walk, parameter: &str) -> Option<Type> {
        if walk.models.is_empty() {
            return None;
        }

        let mut ty = self.builder_type(walk.models.iter().copied());
        if variant == ClosureVariant::WithRelation {
            ty = Type::union(std::iter::once(ty).chain(walk.relations.iter().cloned()));
        }

        Some(Type::closure(ClosureSignature {
            params: vec![ClosureParam::required(parameter, ty)],
            return_type: Type::Mixed,
        }))
    }
}
