//! Names the engine looks for in the analysed program.

use serde::Deserialize;

use crate::synth::ClosureVariant;

/// Engine configuration.
///
/// Every field has a default matching the conventional ORM layout, so a
/// project file only lists what differs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base query builder, generic over the model it queries.
    pub(crate) builder_class: String,
    /// Base relation class.
    pub(crate) relation_class: String,
    /// Base model class.
    pub(crate) model_class: String,
    /// Builder template bound to the queried model.
    pub(crate) builder_model_template: String,
    /// Relation template bound to the related model.
    pub(crate) related_model_template: String,
    /// Static factory method that opens a query on a model.
    pub(crate) query_method: String,
    /// Name of the argument carrying the relation path.
    pub(crate) relation_argument: String,
    /// Name of the callback argument whose closure type is inferred.
    pub(crate) callback_argument: String,
    /// Parameter name given to the synthesized closure.
    pub(crate) closure_parameter: String,
    /// Methods whose callback receives the related builder.
    pub(crate) methods: Vec<String>,
    /// Methods whose callback receives the related builder or the relation.
    pub(crate) combined_methods: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            builder_class: "Builder".to_string(),
            relation_class: "Relation".to_string(),
            model_class: "Model".to_string(),
            builder_model_template: "TModel".to_string(),
            related_model_template: "TRelatedModel".to_string(),
            query_method: "query".to_string(),
            relation_argument: "relation".to_string(),
            callback_argument: "callback".to_string(),
            closure_parameter: "query".to_string(),
            methods: ["whereHas", "orWhereHas", "whereDoesntHave", "orWhereDoesntHave"]
                .map(String::from)
                .to_vec(),
            combined_methods: vec!["withWhereHas".to_string()],
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder_class(mut self, name: impl Into<String>) -> Self {
        self.builder_class = name.into();
        self
    }

    pub fn relation_class(mut self, name: impl Into<String>) -> Self {
        self.relation_class = name.into();
        self
    }

    pub fn model_class(mut self, name: impl Into<String>) -> Self {
        self.model_class = name.into();
        self
    }

    pub fn builder_model_template(mut self, name: impl Into<String>) -> Self {
        self.builder_model_template = name.into();
        self
    }

    pub fn related_model_template(mut self, name: impl Into<String>) -> Self {
        self.related_model_template = name.into();
        self
    }

    pub fn query_method(mut self, name: impl Into<String>) -> Self {
        self.query_method = name.into();
        self
    }

    pub fn relation_argument(mut self, name: impl Into<String>) -> Self {
        self.relation_argument = name.into();
        self
    }

    pub fn callback_argument(mut self, name: impl Into<String>) -> Self {
        self.callback_argument = name.into();
        self
    }

    pub fn closure_parameter(mut self, name: impl Into<String>) -> Self {
        self.closure_parameter = name.into();
        self
    }

    /// Replace the narrowing methods.
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the combined ("with relation") methods.
    pub fn combined_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.combined_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Which closure shape a method call gets, if the method is handled.
    ///
    /// A name listed under both kinds is treated as combined.
    pub fn variant(&self, method: &str) -> Option<ClosureVariant> {
        if self.combined_methods.iter().any(|m| m == method) {
            return Some(ClosureVariant::WithRelation);
        }
        if self.methods.iter().any(|m| m == method) {
            return Some(ClosureVariant::Narrow);
        }
        None
    }

    pub fn relation_argument_name(&self) -> &str {
        &self.relation_argument
    }

    pub fn callback_argument_name(&self) -> &str {
        &self.callback_argument
    }

    pub fn query_method_name(&self) -> &str {
        &self.query_method
    }
}
