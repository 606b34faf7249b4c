//! Explicitly assembled set of closure type extensions.

use std::sync::Arc;

use relnarrow_core::Type;

use crate::call::{
    FunctionCall, FunctionRef, MethodCall, MethodRef, ParameterRef, Scope, StaticCall,
};
use crate::extension::{
    FunctionParameterClosureTypeExtension, MethodParameterClosureTypeExtension,
    StaticMethodParameterClosureTypeExtension,
};

type FunctionExtension<S> = Arc<dyn FunctionParameterClosureTypeExtension<S> + Send + Sync>;
type MethodExtension<S> = Arc<dyn MethodParameterClosureTypeExtension<S> + Send + Sync>;
type StaticMethodExtension<S> = Arc<dyn StaticMethodParameterClosureTypeExtension<S> + Send + Sync>;

/// Extensions consulted in registration order.
///
/// The first extension that supports the call and produces a type wins.
pub struct ExtensionRegistry<S: Scope + ?Sized> {
    function: Vec<FunctionExtension<S>>,
    method: Vec<MethodExtension<S>>,
    static_method: Vec<StaticMethodExtension<S>>,
}

impl<S: Scope + ?Sized> Default for ExtensionRegistry<S> {
    fn default() -> Self {
        Self {
            function: Vec::new(),
            method: Vec::new(),
            static_method: Vec::new(),
        }
    }
}

impl<S: Scope + ?Sized> ExtensionRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function_extension(mut self, extension: FunctionExtension<S>) -> Self {
        self.function.push(extension);
        self
    }

    pub fn with_method_extension(mut self, extension: MethodExtension<S>) -> Self {
        self.method.push(extension);
        self
    }

    pub fn with_static_method_extension(mut self, extension: StaticMethodExtension<S>) -> Self {
        self.static_method.push(extension);
        self
    }

    pub fn function_extensions(&self) -> &[FunctionExtension<S>] {
        &self.function
    }

    pub fn method_extensions(&self) -> &[MethodExtension<S>] {
        &self.method
    }

    pub fn static_method_extensions(&self) -> &[StaticMethodExtension<S>] {
        &self.static_method
    }

    pub fn closure_type_for_function_call(
        &self,
        function: &FunctionRef,
        call: &FunctionCall<S::Expr>,
        parameter: &ParameterRef,
        scope: &S,
    ) -> Option<Type> {
        self.function
            .iter()
            .filter(|ext| ext.is_function_supported(function, parameter))
            .find_map(|ext| ext.type_from_function_call(function, call, parameter, scope))
    }

    pub fn closure_type_for_method_call(
        &self,
        method: &MethodRef,
        call: &MethodCall<S::Expr>,
        parameter: &ParameterRef,
        scope: &S,
    ) -> Option<Type> {
        self.method
            .iter()
            .filter(|ext| ext.is_method_supported(method, parameter))
            .find_map(|ext| ext.type_from_method_call(method, call, parameter, scope))
    }

    pub fn closure_type_for_static_method_call(
        &self,
        method: &MethodRef,
        call: &StaticCall<S::Expr>,
        parameter: &ParameterRef,
        scope: &S,
    ) -> Option<Type> {
        self.static_method
            .iter()
            .filter(|ext| ext.is_static_method_supported(method, parameter))
            .find_map(|ext| ext.type_from_static_method_call(method, call, parameter, scope))
    }
}
