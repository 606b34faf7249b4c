//! Relation-path argument extraction.

use relnarrow_core::Type;

use crate::call::{Argument, Scope};

/// The argument carrying the relation path: the first one that is unnamed
/// or named `relation_argument`.
///
/// Placeholders and spread arguments never qualify.
pub fn relation_argument<'a, E>(args: &'a [Argument<E>], relation_argument: &str) -> Option<&'a E> {
    args.iter().find_map(|arg| match arg {
        Argument::Value(arg) if !arg.unpack => match &arg.name {
            None => Some(&arg.value),
            Some(name) if name == relation_argument => Some(&arg.value),
            Some(_) => None,
        },
        _ => None,
    })
}

/// Literal relation paths passed to the call.
///
/// Empty when there is no relation argument or its type is not made of
/// string literals only.
pub fn relation_paths<S: Scope + ?Sized>(
    scope: &S,
    args: &[Argument<S::Expr>],
    relation_argument_name: &str,
) -> Vec<String> {
    let Some(expr) = relation_argument(args, relation_argument_name) else {
        return Vec::new();
    };
    literal_values(&scope.type_of(expr))
}

pub fn literal_values(ty: &Type) -> Vec<String> {
    ty.constant_strings().into_iter().map(str::to_owned).collect()
}
