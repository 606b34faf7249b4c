//! Call sites as the engine sees them.
//!
//! The engine never inspects syntax. A call is a receiver plus an argument
//! list of host expressions, and a [`Scope`] answers what type an
//! expression has.

use relnarrow_core::{ClassId, Type};

/// Static typing context of the call site.
pub trait Scope {
    type Expr;

    /// Statically known type of an expression.
    fn type_of(&self, expr: &Self::Expr) -> Type;
}

/// Scope whose expressions are already types.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypedScope;

impl Scope for TypedScope {
    type Expr = Type;

    fn type_of(&self, expr: &Type) -> Type {
        expr.clone()
    }
}

/// A passed argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arg<E> {
    /// Set for named arguments (`relation: 'posts'`).
    pub name: Option<String>,
    pub value: E,
    /// Spread argument (`...$args`).
    pub unpack: bool,
}

impl<E> Arg<E> {
    pub fn positional(value: E) -> Self {
        Self {
            name: None,
            value,
            unpack: false,
        }
    }

    pub fn named(name: impl Into<String>, value: E) -> Self {
        Self {
            name: Some(name.into()),
            value,
            unpack: false,
        }
    }

    pub fn spread(value: E) -> Self {
        Self {
            name: None,
            value,
            unpack: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Argument<E> {
    Value(Arg<E>),
    /// `...` in first-class callable syntax (`$query->whereHas(...)`).
    VariadicPlaceholder,
}

impl<E> From<Arg<E>> for Argument<E> {
    fn from(arg: Arg<E>) -> Self {
        Self::Value(arg)
    }
}

/// Instance call: `$receiver->method(args)`.
#[derive(Clone, Debug)]
pub struct MethodCall<E> {
    pub receiver: E,
    pub args: Vec<Argument<E>>,
}

impl<E> MethodCall<E> {
    pub fn new(receiver: E, args: impl IntoIterator<Item = Argument<E>>) -> Self {
        Self {
            receiver,
            args: args.into_iter().collect(),
        }
    }
}

/// Static call on a named class: `Class::method(args)`.
#[derive(Clone, Debug)]
pub struct StaticCall<E> {
    pub class: ClassId,
    pub args: Vec<Argument<E>>,
}

impl<E> StaticCall<E> {
    pub fn new(class: ClassId, args: impl IntoIterator<Item = Argument<E>>) -> Self {
        Self {
            class,
            args: args.into_iter().collect(),
        }
    }
}

/// Free function call: `function(args)`.
#[derive(Clone, Debug)]
pub struct FunctionCall<E> {
    pub args: Vec<Argument<E>>,
}

impl<E> FunctionCall<E> {
    pub fn new(args: impl IntoIterator<Item = Argument<E>>) -> Self {
        Self {
            args: args.into_iter().collect(),
        }
    }
}

/// The function a call resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionRef {
    pub name: String,
}

impl FunctionRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The method a call resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodRef {
    pub name: String,
    pub declaring_class: ClassId,
}

impl MethodRef {
    pub fn new(name: impl Into<String>, declaring_class: ClassId) -> Self {
        Self {
            name: name.into(),
            declaring_class,
        }
    }
}

/// The parameter whose closure type is being inferred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterRef {
    pub name: String,
}

impl ParameterRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
