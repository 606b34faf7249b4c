//! Closure type extensions for relation-querying methods.

use relnarrow_core::{ClassId, Reflection, Type};
use tracing::debug;

use crate::call::{
    FunctionCall, FunctionRef, MethodCall, MethodRef, ParameterRef, Scope, StaticCall,
};
use crate::capability::Capabilities;
use crate::config::Config;
use crate::extract;
use crate::synth::{ClosureVariant, Synthesizer};
use crate::walk::{Walk, Walker};
use crate::Result;

/// Infers closure parameter types for free function calls.
pub trait FunctionParameterClosureTypeExtension<S: Scope + ?Sized> {
    fn is_function_supported(&self, function: &FunctionRef, parameter: &ParameterRef) -> bool;

    fn type_from_function_call(
        &self,
        function: &FunctionRef,
        call: &FunctionCall<S::Expr>,
        parameter: &ParameterRef,
        scope: &S,
    ) -> Option<Type>;
}

/// Infers closure parameter types for instance method calls.
pub trait MethodParameterClosureTypeExtension<S: Scope + ?Sized> {
    fn is_method_supported(&self, method: &MethodRef, parameter: &ParameterRef) -> bool;

    /// Closure type for `parameter`, or `None` to keep the declared one.
    fn type_from_method_call(
        &self,
        method: &MethodRef,
        call: &MethodCall<S::Expr>,
        parameter: &ParameterRef,
        scope: &S,
    ) -> Option<Type>;
}

/// Infers closure parameter types for static method calls.
pub trait StaticMethodParameterClosureTypeExtension<S: Scope + ?Sized> {
    fn is_static_method_supported(&self, method: &MethodRef, parameter: &ParameterRef) -> bool;

    fn type_from_static_method_call(
        &self,
        method: &MethodRef,
        call: &StaticCall<S::Expr>,
        parameter: &ParameterRef,
        scope: &S,
    ) -> Option<Type>;
}

/// Narrows the callback of `whereHas`-style methods to the builder of the
/// related model.
///
/// ```text
/// User::query()->whereHas('posts', function ($query) { ... });
///                                            ^^^^^^ PostBuilder
/// ```
#[derive(Debug)]
pub struct RelationClosureExtension<R> {
    reflection: R,
    config: Config,
    capabilities: Capabilities,
}

impl<R: Reflection> RelationClosureExtension<R> {
    /// Fails when a configured class or template is not declared.
    pub fn new(reflection: R, config: Config) -> Result<Self> {
        let capabilities = Capabilities::resolve(&reflection, &config)?;
        Ok(Self {
            reflection,
            config,
            capabilities,
        })
    }

    pub fn reflection(&self) -> &R {
        &self.reflection
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn describe(&self, ty: &Type) -> String {
        self.reflection.describe(ty)
    }

    /// Models a builder of type `receiver` queries.
    pub fn start_models(&self, receiver: &Type) -> Vec<ClassId> {
        let Some(model) = self.reflection.template_type(
            receiver,
            self.capabilities.builder,
            &self.config.builder_model_template,
        ) else {
            debug!(receiver = %self.describe(receiver), "receiver is not a builder");
            return Vec::new();
        };

        model
            .object_classes()
            .into_iter()
            .filter(|&class| self.capabilities.is_model_class(&self.reflection, class))
            .collect()
    }

    pub fn walker(&self) -> Walker<'_, R> {
        Walker::new(
            &self.reflection,
            self.capabilities,
            &self.config.related_model_template,
        )
    }

    pub fn synthesizer(&self) -> Synthesizer<'_, R> {
        Synthesizer::new(
            &self.reflection,
            self.capabilities.builder,
            &self.config.query_method,
        )
    }

    pub fn walk<'p>(&self, start: &[ClassId], paths: impl IntoIterator<Item = &'p str>) -> Walk {
        self.walker().walk_all(start, paths)
    }

    /// Closure type for `paths` walked from `start`, `None` when nothing
    /// can be narrowed.
    pub fn narrow(&self, variant: ClosureVariant, start: &[ClassId], paths: &[String]) -> Option<Type> {
        if paths.is_empty() {
            debug!("relation argument is not a literal string");
            return None;
        }

        let walk = self.walk(start, paths.iter().map(String::as_str));
        let ty = self
            .synthesizer()
            .closure_type(variant, &walk, &self.config.closure_parameter);
        if ty.is_none() {
            debug!(?paths, "no related model reached, keeping declared type");
        }
        ty
    }

    /// Callback type of a narrowing call such as `whereHas`.
    pub fn narrow_builder(&self, start: &[ClassId], path: &str) -> Option<Type> {
        self.narrow(ClosureVariant::Narrow, start, &[path.to_string()])
    }

    /// Callback type of a combined call such as `withWhereHas`.
    pub fn narrow_builder_or_relation(&self, start: &[ClassId], path: &str) -> Option<Type> {
        self.narrow(ClosureVariant::WithRelation, start, &[path.to_string()])
    }

    /// Instance calls on a builder.
    pub fn supports_method(&self, method: &MethodRef, parameter: &ParameterRef) -> bool {
        self.supports(method, parameter, &[self.capabilities.builder])
    }

    /// Static calls on a builder or a model.
    pub fn supports_static_method(&self, method: &MethodRef, parameter: &ParameterRef) -> bool {
        self.supports(
            method,
            parameter,
            &[self.capabilities.builder, self.capabilities.model],
        )
    }

    fn supports(&self, method: &MethodRef, parameter: &ParameterRef, owner: &[ClassId]) -> bool {
        parameter.name == self.config.callback_argument
            && self.config.variant(&method.name).is_some()
            && owner
                .iter()
                .any(|&class| self.reflection.is_subclass_of(method.declaring_class, class))
    }
}

impl<R: Reflection, S: Scope + ?Sized> MethodParameterClosureTypeExtension<S>
    for RelationClosureExtension<R>
{
    fn is_method_supported(&self, method: &MethodRef, parameter: &ParameterRef) -> bool {
        self.supports_method(method, parameter)
    }

    fn type_from_method_call(
        &self,
        method: &MethodRef,
        call: &MethodCall<S::Expr>,
        _parameter: &ParameterRef,
        scope: &S,
    ) -> Option<Type> {
        let variant = self.config.variant(&method.name)?;
        let paths = extract::relation_paths(scope, &call.args, &self.config.relation_argument);
        let start = self.start_models(&scope.type_of(&call.receiver));
        self.narrow(variant, &start, &paths)
    }
}

/// `User::whereHas('posts', ...)`: models forward static calls to a fresh
/// query, so the called class is the start model.
impl<R: Reflection, S: Scope + ?Sized> StaticMethodParameterClosureTypeExtension<S>
    for RelationClosureExtension<R>
{
    fn is_static_method_supported(&self, method: &MethodRef, parameter: &ParameterRef) -> bool {
        self.supports_static_method(method, parameter)
    }

    fn type_from_static_method_call(
        &self,
        method: &MethodRef,
        call: &StaticCall<S::Expr>,
        _parameter: &ParameterRef,
        scope: &S,
    ) -> Option<Type> {
        let variant = self.config.variant(&method.name)?;
        if !self.capabilities.is_model_class(&self.reflection, call.class) {
            debug!(class = self.reflection.class_name(call.class), "static call on a non-model");
            return None;
        }
        let paths = extract::relation_paths(scope, &call.args, &self.config.relation_argument);
        self.narrow(variant, &[call.class], &paths)
    }
}
