use std::sync::Arc;

use relnarrow_core::Type;

use crate::call::{
    Arg, FunctionCall, FunctionRef, MethodCall, MethodRef, ParameterRef, StaticCall, TypedScope,
};
use crate::extension::{FunctionParameterClosureTypeExtension, MethodParameterClosureTypeExtension};
use crate::registry::ExtensionRegistry;
use crate::test_utils::{blog, builder_of, class};

/// Supports every call and always answers with the same type.
struct Fixed(Option<Type>);

impl MethodParameterClosureTypeExtension<TypedScope> for Fixed {
    fn is_method_supported(&self, _method: &MethodRef, _parameter: &ParameterRef) -> bool {
        true
    }

    fn type_from_method_call(
        &self,
        _method: &MethodRef,
        _call: &MethodCall<Type>,
        _parameter: &ParameterRef,
        _scope: &TypedScope,
    ) -> Option<Type> {
        self.0.clone()
    }
}

/// Answers only for calls to the named function.
struct OnFunction(&'static str, Type);

impl FunctionParameterClosureTypeExtension<TypedScope> for OnFunction {
    fn is_function_supported(&self, function: &FunctionRef, _parameter: &ParameterRef) -> bool {
        function.name == self.0
    }

    fn type_from_function_call(
        &self,
        _function: &FunctionRef,
        _call: &FunctionCall<Type>,
        _parameter: &ParameterRef,
        _scope: &TypedScope,
    ) -> Option<Type> {
        Some(self.1.clone())
    }
}

fn where_has_posts() -> (MethodRef, MethodCall<Type>) {
    let project = blog();
    let method = MethodRef::new("whereHas", class(&project, "Builder"));
    let call = MethodCall::new(
        builder_of(&project, &["User"]),
        [Arg::positional(Type::constant_string("posts")).into()],
    );
    (method, call)
}

#[test]
fn empty_registry_keeps_declared_type() {
    let registry = ExtensionRegistry::<TypedScope>::new();
    let (method, call) = where_has_posts();

    let ty = registry.closure_type_for_method_call(
        &method,
        &call,
        &ParameterRef::new("callback"),
        &TypedScope,
    );
    assert_eq!(ty, None);
    assert!(registry.method_extensions().is_empty());
}

#[test]
fn first_answer_wins() {
    let project = blog();
    let extension = Arc::new(project.extension().unwrap());
    let registry = ExtensionRegistry::<TypedScope>::new()
        .with_method_extension(Arc::new(Fixed(None)))
        .with_method_extension(extension.clone())
        .with_method_extension(Arc::new(Fixed(Some(Type::Null))));
    let (method, call) = where_has_posts();

    let ty = registry
        .closure_type_for_method_call(&method, &call, &ParameterRef::new("callback"), &TypedScope)
        .unwrap();
    assert_eq!(extension.describe(&ty), "Closure(PostBuilder): mixed");
}

#[test]
fn unsupported_extensions_are_skipped() {
    let project = blog();
    let extension = Arc::new(project.extension().unwrap());
    let registry = ExtensionRegistry::<TypedScope>::new()
        .with_method_extension(extension)
        .with_method_extension(Arc::new(Fixed(Some(Type::Null))));
    let (method, call) = where_has_posts();

    let ty = registry.closure_type_for_method_call(
        &method,
        &call,
        &ParameterRef::new("relation"),
        &TypedScope,
    );
    assert_eq!(ty, Some(Type::Null));
}

#[test]
fn static_calls_use_their_own_list() {
    let project = blog();
    let extension = Arc::new(project.extension().unwrap());
    let user = class(&project, "User");
    let call = StaticCall::new(user, [Arg::positional(Type::constant_string("posts")).into()]);
    let method = MethodRef::new("whereHas", user);
    let callback = ParameterRef::new("callback");

    let methods_only = ExtensionRegistry::<TypedScope>::new().with_method_extension(extension.clone());
    assert_eq!(
        methods_only.closure_type_for_static_method_call(&method, &call, &callback, &TypedScope),
        None
    );

    let registry = ExtensionRegistry::<TypedScope>::new().with_static_method_extension(extension.clone());
    let ty = registry
        .closure_type_for_static_method_call(&method, &call, &callback, &TypedScope)
        .unwrap();
    assert_eq!(extension.describe(&ty), "Closure(PostBuilder): mixed");
    assert_eq!(registry.static_method_extensions().len(), 1);
}

#[test]
fn independent_instances() {
    let first = blog().extension().unwrap();
    let second = blog().extension().unwrap();
    let user = class(&blog(), "User");

    assert_eq!(
        first.narrow_builder(&[user], "posts"),
        second.narrow_builder(&[user], "posts")
    );
}

#[test]
fn function_calls_use_their_own_list() {
    let registry = ExtensionRegistry::<TypedScope>::new()
        .with_function_extension(Arc::new(OnFunction("tap", Type::Null)))
        .with_function_extension(Arc::new(OnFunction("retry", Type::String)));
    let call = FunctionCall::new([Arg::positional(Type::Mixed).into()]);
    let callback = ParameterRef::new("callback");

    let ty = registry.closure_type_for_function_call(
        &FunctionRef::new("retry"),
        &call,
        &callback,
        &TypedScope,
    );
    assert_eq!(ty, Some(Type::String));

    let ty = registry.closure_type_for_function_call(
        &FunctionRef::new("optional"),
        &call,
        &callback,
        &TypedScope,
    );
    assert_eq!(ty, None);
    assert_eq!(registry.function_extensions().len(), 2);
    assert!(registry.method_extensions().is_empty());
}
