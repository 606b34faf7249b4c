#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for relnarrow.
//!
//! Two layers:
//! - **Type layer**: host-side type values (`Type`, `ClassId`) and their
//!   textual rendering.
//! - **Declaration layer**: static class declarations loaded from JSON
//!   (`RawClass`) and validated into a `ClassTable`, which answers the
//!   reflection queries the relation engine asks through `Reflection`.

pub mod decls;
mod interner;
pub mod printer;
mod types;
pub mod typesig;


pub use decls::{ClassTable, DeclError, RawClass, RawMethod, parse_declarations};
pub use interner::{Interner, Symbol};
pub use printer::TypePrinter;
pub use types::{ClassId, ClosureParam, ClosureSignature, ObjectType, Type};
pub use typesig::{TypeSig, TypeSigError, parse_type_sig};

/// Static reflection over declared classes.
///
/// Everything the relation engine knows about the analysed program comes
/// through this trait. Answers must depend only on declarations, never on
/// runtime state.
pub trait Reflection {
    fn class_by_name(&self, name: &str) -> Option<ClassId>;
    fn class_name(&self, class: ClassId) -> &str;

    /// Template parameter names declared by the class, in order.
    fn templates(&self, class: ClassId) -> &[String];

    fn is_generic(&self, class: ClassId) -> bool {
        !self.templates(class).is_empty()
    }

    /// Whether `class` is `ancestor` or inherits from it.
    fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool;

    /// Whether the class declares or inherits a method, magic ones included.
    fn has_method(&self, class: ClassId, method: &str) -> bool;

    /// Declared return type of a method as seen from `class`.
    ///
    /// `static` and `$this` bind to `class`.
    fn method_return_type(&self, class: ClassId, method: &str) -> Option<Type>;

    /// Like `method_return_type`, but ignores magic (annotation-only) methods.
    fn native_method_return_type(&self, class: ClassId, method: &str) -> Option<Type>;

    /// Like `native_method_return_type`, restricted to static methods.
    /// Instance methods of the same name are skipped, not matched.
    fn native_static_method_return_type(&self, class: ClassId, method: &str) -> Option<Type>;

    /// Argument bound to `ancestor`'s template `param` when `ty` is viewed
    /// as an `ancestor`. Unions resolve member-wise; `None` when no member
    /// is an `ancestor`.
    fn template_type(&self, ty: &Type, ancestor: ClassId, param: &str) -> Option<Type>;

    /// Whether every member of `ty` is an instance of `class`.
    fn is_subtype_of(&self, ty: &Type, class: ClassId) -> bool {
        if ty.is_never() {
            return false;
        }
        ty.members().iter().all(|member| match member {
            Type::Object(obj) => self.is_subclass_of(obj.class, class),
            _ => false,
        })
    }

    fn describe(&self, ty: &Type) -> String {
        TypePrinter::new(self).render(ty)
    }
}

impl<T: Reflection + ?Sized> Reflection for &T {
    fn class_by_name(&self, name: &str) -> Option<ClassId> {
        (*self).class_by_name(name)
    }
    fn class_name(&self, class: ClassId) -> &str {
        (*self).class_name(class)
    }
    fn templates(&self, class: ClassId) -> &[String] {
        (*self).templates(class)
    }
    fn is_generic(&self, class: ClassId) -> bool {
        (*self).is_generic(class)
    }
    fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        (*self).is_subclass_of(class, ancestor)
    }
    fn has_method(&self, class: ClassId, method: &str) -> bool {
        (*self).has_method(class, method)
    }
    fn method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        (*self).method_return_type(class, method)
    }
    fn native_method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        (*self).native_method_return_type(class, method)
    }
    fn native_static_method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        (*self).native_static_method_return_type(class, method)
    }
    fn template_type(&self, ty: &Type, ancestor: ClassId, param: &str) -> Option<Type> {
        (*self).template_type(ty, ancestor, param)
    }
    fn is_subtype_of(&self, ty: &Type, class: ClassId) -> bool {
        (*self).is_subtype_of(ty, class)
    }
    fn describe(&self, ty: &Type) -> String {
        (*self).describe(ty)
    }
}

impl<T: Reflection + ?Sized> Reflection for std::sync::Arc<T> {
    fn class_by_name(&self, name: &str) -> Option<ClassId> {
        (**self).class_by_name(name)
    }
    fn class_name(&self, class: ClassId) -> &str {
        (**self).class_name(class)
    }
    fn templates(&self, class: ClassId) -> &[String] {
        (**self).templates(class)
    }
    fn is_generic(&self, class: ClassId) -> bool {
        (**self).is_generic(class)
    }
    fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        (**self).is_subclass_of(class, ancestor)
    }
    fn has_method(&self, class: ClassId, method: &str) -> bool {
        (**self).has_method(class, method)
    }
    fn method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        (**self).method_return_type(class, method)
    }
    fn native_method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        (**self).native_method_return_type(class, method)
    }
    fn native_static_method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        (**self).native_static_method_return_type(class, method)
    }
    fn template_type(&self, ty: &Type, ancestor: ClassId, param: &str) -> Option<Type> {
        (**self).template_type(ty, ancestor, param)
    }
    fn is_subtype_of(&self, ty: &Type, class: ClassId) -> bool {
        (**self).is_subtype_of(ty, class)
    }
    fn describe(&self, ty: &Type) -> String {
        (**self).describe(ty)
    }
}
