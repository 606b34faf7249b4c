//! Host-side type values.
//!
//! `Type` is a plain value: two types are the same type exactly when they
//! compare equal. Unions are kept canonical (flat, deduplicated, sorted) by
//! constructing them through [`Type::union`], which makes structural equality
//! the identity the engine deduplicates by.

/// Handle to a declared class.
///
/// Assigned in declaration order when a [`ClassTable`](crate::ClassTable) is
/// built. Names are resolved through the owning [`Reflection`](crate::Reflection).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ClassId(u32);

impl ClassId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Type {
    /// Empty union. Produced when nothing is known to flow.
    Never,
    Mixed,
    Null,
    String,
    /// Compile-time string literal.
    ConstantString(String),
    Object(ObjectType),
    /// Two or more members, flat, sorted and deduplicated.
    Union(Vec<Type>),
    Closure(Box<ClosureSignature>),
}

/// Instance of a class, optionally with generic arguments.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ObjectType {
    pub class: ClassId,
    pub args: Vec<Type>,
}

impl ObjectType {
    pub fn new(class: ClassId) -> Self {
        Self {
            class,
            args: Vec::new(),
        }
    }

    pub fn generic(class: ClassId, args: Vec<Type>) -> Self {
        Self { class, args }
    }
}

/// Signature of a synthesized callback.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ClosureSignature {
    pub params: Vec<ClosureParam>,
    pub return_type: Type,
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ClosureParam {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
    pub variadic: bool,
    pub by_reference: bool,
}

impl ClosureParam {
    /// A required, by-value, non-variadic parameter.
    pub fn required(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            variadic: false,
            by_reference: false,
        }
    }
}

impl Type {
    pub fn object(class: ClassId) -> Self {
        Self::Object(ObjectType::new(class))
    }

    pub fn generic(class: ClassId, args: Vec<Type>) -> Self {
        Self::Object(ObjectType::generic(class, args))
    }

    pub fn constant_string(value: impl Into<String>) -> Self {
        Self::ConstantString(value.into())
    }

    pub fn closure(signature: ClosureSignature) -> Self {
        Self::Closure(Box::new(signature))
    }

    /// Build a canonical union.
    ///
    /// Nested unions are flattened, `never` members vanish, and `mixed`
    /// absorbs everything. Zero members yield `never`; one member is returned
    /// unwrapped.
    pub fn union(types: impl IntoIterator<Item = Type>) -> Self {
        let mut members = Vec::new();
        for ty in types {
            match ty {
                Type::Union(inner) => members.extend(inner),
                Type::Never => {}
                other => members.push(other),
            }
        }

        if members.contains(&Type::Mixed) {
            return Type::Mixed;
        }

        members.sort();
        members.dedup();

        match members.len() {
            0 => Type::Never,
            1 => members.pop().unwrap_or(Type::Never),
            _ => Type::Union(members),
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }

    /// Members of this type: the union members, or the type itself.
    pub fn members(&self) -> &[Type] {
        match self {
            Type::Union(members) => members,
            other => std::slice::from_ref(other),
        }
    }

    /// Literal string values this type can take.
    ///
    /// Empty unless every member is a literal string.
    pub fn constant_strings(&self) -> Vec<&str> {
        let mut values = Vec::new();
        for member in self.members() {
            match member {
                Type::ConstantString(value) => {
                    if !values.contains(&value.as_str()) {
                        values.push(value.as_str());
                    }
                }
                _ => return Vec::new(),
            }
        }
        values
    }

    /// Classes of the object members, in member order.
    pub fn object_classes(&self) -> Vec<ClassId> {
        let mut classes = Vec::new();
        for member in self.members() {
            if let Type::Object(obj) = member
                && !classes.contains(&obj.class)
            {
                classes.push(obj.class);
            }
        }
        classes
    }

    /// Every class mentioned anywhere in this type, generic arguments and
    /// closure signatures included.
    pub fn referenced_classes(&self) -> Vec<ClassId> {
        let mut classes = Vec::new();
        self.collect_referenced(&mut classes);
        classes
    }

    fn collect_referenced(&self, out: &mut Vec<ClassId>) {
        match self {
            Type::Object(obj) => {
                if !out.contains(&obj.class) {
                    out.push(obj.class);
                }
                for arg in &obj.args {
                    arg.collect_referenced(out);
                }
            }
            Type::Union(members) => {
                for member in members {
                    member.collect_referenced(out);
                }
            }
            Type::Closure(sig) => {
                for param in &sig.params {
                    param.ty.collect_referenced(out);
                }
                sig.return_type.collect_referenced(out);
            }
            Type::Never | Type::Mixed | Type::Null | Type::String | Type::ConstantString(_) => {}
        }
    }
}
