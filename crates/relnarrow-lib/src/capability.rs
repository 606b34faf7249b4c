//! What a type can do for the engine: be a model, a relation, or a builder.

use relnarrow_core::{ClassId, Reflection, Type};

use crate::{Config, Error, Result};

/// Classification of a type against the configured base classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capability {
    Model(ClassId),
    /// Every member is a relation.
    Relation(Type),
    /// Every member is a builder.
    Builder(Type),
    Unresolved(Type),
}

/// Base classes resolved from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub model: ClassId,
    pub relation: ClassId,
    pub builder: ClassId,
}

impl Capabilities {
    /// Look up the configured base classes and their templates.
    pub fn resolve<R: Reflection + ?Sized>(reflection: &R, config: &Config) -> Result<Self> {
        let lookup = |name: &str| {
            reflection
                .class_by_name(name)
                .ok_or_else(|| Error::UnknownClass(name.to_string()))
        };
        let require_template = |class: ClassId, template: &str| {
            if reflection.templates(class).iter().any(|t| t == template) {
                return Ok(());
            }
            Err(Error::UnknownTemplate {
                class: reflection.class_name(class).to_string(),
                template: template.to_string(),
            })
        };

        let model = lookup(&config.model_class)?;
        let relation = lookup(&config.relation_class)?;
        let builder = lookup(&config.builder_class)?;
        require_template(relation, &config.related_model_template)?;
        require_template(builder, &config.builder_model_template)?;

        Ok(Self {
            model,
            relation,
            builder,
        })
    }

    pub fn classify<R: Reflection + ?Sized>(&self, reflection: &R, ty: &Type) -> Capability {
        if let Type::Object(obj) = ty
            && reflection.is_subclass_of(obj.class, self.model)
        {
            return Capability::Model(obj.class);
        }
        if reflection.is_subtype_of(ty, self.relation) {
            return Capability::Relation(ty.clone());
        }
        if reflection.is_subtype_of(ty, self.builder) {
            return Capability::Builder(ty.clone());
        }
        Capability::Unresolved(ty.clone())
    }

    pub fn is_model_class<R: Reflection + ?Sized>(&self, reflection: &R, class: ClassId) -> bool {
        reflection.is_subclass_of(class, self.model)
    }
}
