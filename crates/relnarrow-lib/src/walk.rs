//! Relation-path walking.
//!
//! Each segment is a method looked up on every currently reachable model.
//! Methods returning a relation move the walk to the relation's related
//! models; anything else drops that branch silently. The walk is bounded by
//! the path length, so cyclic relation graphs need no special handling.

use indexmap::IndexSet;
use relnarrow_core::{ClassId, Reflection, Type};
use tracing::{debug, trace};

use crate::capability::{Capabilities, Capability};
use crate::path::RelationPath;

/// Outcome of walking one or more paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Walk {
    /// Relation types returned along the way, prefixes included.
    pub relations: IndexSet<Type>,
    /// Models reached by consuming a whole path.
    pub models: IndexSet<ClassId>,
}

impl Walk {
    pub fn merge(&mut self, other: Walk) {
        self.relations.extend(other.relations);
        self.models.extend(other.models);
    }
}

pub struct Walker<'a, R: Reflection + ?Sized> {
    reflection: &'a R,
    capabilities: Capabilities,
    related_template: &'a str,
}

impl<'a, R: Reflection + ?Sized> Walker<'a, R> {
    pub fn new(reflection: &'a R, capabilities: Capabilities, related_template: &'a str) -> Self {
        Self {
            reflection,
            capabilities,
            related_template,
        }
    }

    pub fn walk(&self, start: &[ClassId], path: &RelationPath<'_>) -> Walk {
        let mut walk = Walk::default();
        let mut current: IndexSet<ClassId> = start.iter().copied().collect();

        for &segment in path.segments() {
            if segment.is_empty() {
                debug!(%path, "empty relation segment");
                current.clear();
                break;
            }

            let mut next = IndexSet::new();
            for &model in &current {
                self.step(model, segment, &mut walk.relations, &mut next);
            }

            current = next;
            if current.is_empty() {
                debug!(%path, segment, "relation path reaches no model");
                break;
            }
        }

        walk.models = current;
        walk
    }

    /// Walk every path from the same start and merge the results.
    pub fn walk_all<'p>(
        &self,
        start: &[ClassId],
        paths: impl IntoIterator<Item = &'p str>,
    ) -> Walk {
        let mut walk = Walk::default();
        for path in paths {
            walk.merge(self.walk(start, &RelationPath::parse(path)));
        }
        walk
    }

    fn step(
        &self,
        model: ClassId,
        segment: &str,
        relations: &mut IndexSet<Type>,
        next: &mut IndexSet<ClassId>,
    ) {
        let model_name = self.reflection.class_name(model);

        let Some(returns) = self.reflection.method_return_type(model, segment) else {
            trace!(model = model_name, segment, "no such method");
            return;
        };

        let relation = match self.capabilities.classify(self.reflection, &returns) {
            Capability::Relation(relation) => relation,
            Capability::Model(_) => {
                trace!(model = model_name, segment, "method returns a model, not a relation");
                return;
            }
            Capability::Builder(_) => {
                trace!(model = model_name, segment, "method returns a builder, not a relation");
                return;
            }
            Capability::Unresolved(returns) => {
                trace!(
                    model = model_name,
                    segment,
                    returns = %self.reflection.describe(&returns),
                    "method does not return a relation"
                );
                return;
            }
        };

        let related = self
            .reflection
            .template_type(&relation, self.capabilities.relation, self.related_template)
            .unwrap_or(Type::Never);

        for class in related.object_classes() {
            if self.capabilities.is_model_class(self.reflection, class) {
                next.insert(class);
            } else {
                trace!(class = self.reflection.class_name(class), "related type is not a model");
            }
        }

        relations.insert(relation);
    }
}
