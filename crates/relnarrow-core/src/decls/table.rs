//! Validated class declarations answering reflection queries.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;

use super::{DeclError, RawClass};
use crate::{ClassId, Interner, ObjectType, Reflection, Symbol, Type, TypeSig, parse_type_sig};

#[derive(Debug, Clone)]
struct ClassInfo {
    name: Symbol,
    templates: Vec<String>,
    parent: Option<TypeSig>,
    interfaces: Vec<TypeSig>,
    methods: IndexMap<String, MethodInfo>,
}

#[derive(Debug, Clone)]
struct MethodInfo {
    returns: TypeSig,
    is_static: bool,
    magic: bool,
}

/// Which declared methods a lookup accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lookup {
    Any,
    Native,
    NativeStatic,
}

impl Lookup {
    fn accepts(self, method: &MethodInfo) -> bool {
        match self {
            Lookup::Any => true,
            Lookup::Native => !method.magic,
            Lookup::NativeStatic => !method.magic && method.is_static,
        }
    }
}

/// Template bindings in effect while resolving a signature.
struct Binding<'a> {
    templates: &'a [String],
    args: &'a [Type],
    /// Class `static` and `$this` stand for.
    called: Option<ClassId>,
}

const NO_BINDING: Binding<'static> = Binding {
    templates: &[],
    args: &[],
    called: None,
};

/// Class declarations indexed by `ClassId`.
///
/// Built once from raw declarations; every signature is checked at build
/// time so reflection queries never meet an unknown name.
#[derive(Debug, Clone)]
pub struct ClassTable {
    names: Interner,
    classes: Vec<ClassInfo>,
}

impl ClassTable {
    /// Parse and build from a JSON array of class declarations.
    pub fn from_json(json: &str) -> Result<Self, DeclError> {
        let raw = super::parse_declarations(json).map_err(|e| DeclError::Json(e.to_string()))?;
        Self::build(&raw)
    }

    pub fn build(raw_classes: &[RawClass]) -> Result<Self, DeclError> {
        let mut names = Interner::new();
        for raw in raw_classes {
            if names.get(&raw.name).is_some() {
                return Err(DeclError::DuplicateClass(raw.name.clone()));
            }
            names.intern(&raw.name);
        }

        let mut classes = Vec::with_capacity(raw_classes.len());
        for raw in raw_classes {
            let parent = raw
                .extends
                .as_deref()
                .map(|sig| parse_sig(sig, || format!("{} extends", raw.name)))
                .transpose()?;

            let interfaces = raw
                .implements
                .iter()
                .map(|sig| parse_sig(sig, || format!("{} implements", raw.name)))
                .collect::<Result<Vec<_>, _>>()?;

            let mut methods = IndexMap::with_capacity(raw.methods.len());
            for (method, raw_method) in &raw.methods {
                let returns = parse_sig(&raw_method.returns, || format!("{}::{}", raw.name, method))?;
                methods.insert(
                    method.clone(),
                    MethodInfo {
                        returns,
                        is_static: raw_method.is_static,
                        magic: raw_method.magic,
                    },
                );
            }

            classes.push(ClassInfo {
                name: names.intern(&raw.name),
                templates: raw.templates.clone(),
                parent,
                interfaces,
                methods,
            });
        }

        let table = Self { names, classes };
        table.validate()?;
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All classes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(|i| ClassId::from_raw(i as u32))
    }

    /// Parse a free-standing signature (no template or `static` context).
    pub fn resolve_type(&self, input: &str) -> Result<Type, DeclError> {
        let sig = parse_sig(input, || "input".to_string())?;
        self.check_sig(&sig, &[], "input")?;
        Ok(self.resolve(&sig, &NO_BINDING))
    }

    fn info(&self, class: ClassId) -> &ClassInfo {
        &self.classes[class.index()]
    }

    fn validate(&self) -> Result<(), DeclError> {
        for class in self.iter() {
            let info = self.info(class);
            let class_name = self.class_name(class);

            let supers = info.parent.iter().chain(info.interfaces.iter());
            for sig in supers {
                let is_class = matches!(
                    sig,
                    TypeSig::Named { name, .. } if !info.templates.contains(name)
                );
                if !is_class {
                    return Err(DeclError::InvalidParent {
                        class: class_name.to_string(),
                        sig: sig.to_string(),
                    });
                }
                self.check_sig(sig, &info.templates, class_name)?;
            }

            for (method, method_info) in &info.methods {
                self.check_sig(
                    &method_info.returns,
                    &info.templates,
                    &format!("{class_name}::{method}"),
                )?;
            }
        }

        for class in self.iter() {
            self.check_acyclic(class)?;
        }
        Ok(())
    }

    fn check_sig(&self, sig: &TypeSig, templates: &[String], context: &str) -> Result<(), DeclError> {
        match sig {
            TypeSig::Named { name, args } => {
                if args.is_empty() && templates.contains(name) {
                    return Ok(());
                }

                let Some(class) = self.class_by_name(name) else {
                    return Err(DeclError::UnknownClass {
                        name: name.clone(),
                        context: context.to_string(),
                    });
                };

                let expected = self.info(class).templates.len();
                if !args.is_empty() && args.len() != expected {
                    return Err(DeclError::ArityMismatch {
                        class: name.clone(),
                        context: context.to_string(),
                        expected,
                        got: args.len(),
                    });
                }

                for arg in args {
                    self.check_sig(arg, templates, context)?;
                }
                Ok(())
            }
            TypeSig::Union(members) => {
                for member in members {
                    self.check_sig(member, templates, context)?;
                }
                Ok(())
            }
            TypeSig::Mixed
            | TypeSig::Never
            | TypeSig::Null
            | TypeSig::String
            | TypeSig::Static
            | TypeSig::Literal(_) => Ok(()),
        }
    }

    fn direct_supers(&self, class: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        let info = self.info(class);
        info.parent
            .iter()
            .chain(info.interfaces.iter())
            .filter_map(|sig| match sig {
                TypeSig::Named { name, .. } => self.class_by_name(name),
                _ => None,
            })
    }

    fn check_acyclic(&self, class: ClassId) -> Result<(), DeclError> {
        let mut seen = HashSet::new();
        let mut stack: Vec<ClassId> = self.direct_supers(class).collect();

        while let Some(current) = stack.pop() {
            if current == class {
                return Err(DeclError::InheritanceCycle(self.class_name(class).to_string()));
            }
            if seen.insert(current) {
                stack.extend(self.direct_supers(current));
            }
        }
        Ok(())
    }

    fn resolve(&self, sig: &TypeSig, binding: &Binding<'_>) -> Type {
        match sig {
            TypeSig::Mixed => Type::Mixed,
            TypeSig::Never => Type::Never,
            TypeSig::Null => Type::Null,
            TypeSig::String => Type::String,
            TypeSig::Static => binding.called.map(Type::object).unwrap_or(Type::Mixed),
            TypeSig::Literal(value) => Type::constant_string(value.as_str()),
            TypeSig::Named { name, args } => {
                if args.is_empty()
                    && let Some(index) = binding.templates.iter().position(|t| t == name)
                {
                    // Unbound templates (raw generic usage) widen to mixed.
                    return binding.args.get(index).cloned().unwrap_or(Type::Mixed);
                }

                match self.class_by_name(name) {
                    Some(class) => Type::generic(
                        class,
                        args.iter().map(|arg| self.resolve(arg, binding)).collect(),
                    ),
                    None => Type::Mixed,
                }
            }
            TypeSig::Union(members) => {
                Type::union(members.iter().map(|member| self.resolve(member, binding)))
            }
        }
    }

    /// The object itself followed by every ancestor, with template arguments
    /// substituted along the way. Parent chain first, then interfaces.
    fn supertypes(&self, start: ObjectType) -> Vec<ObjectType> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);

        while let Some(obj) = queue.pop_front() {
            if obj.class.index() >= self.classes.len() || !seen.insert(obj.class) {
                continue;
            }

            let info = self.info(obj.class);
            let binding = Binding {
                templates: &info.templates,
                args: &obj.args,
                called: Some(obj.class),
            };

            if let Some(parent) = &info.parent
                && let Type::Object(parent) = self.resolve(parent, &binding)
            {
                queue.push_front(parent);
            }
            for interface in &info.interfaces {
                if let Type::Object(interface) = self.resolve(interface, &binding) {
                    queue.push_back(interface);
                }
            }

            result.push(obj);
        }
        result
    }

    /// First accepted declaration of `method`, nearest ancestor first.
    fn find_method(&self, class: ClassId, method: &str, lookup: Lookup) -> Option<Type> {
        for ancestor in self.supertypes(ObjectType::new(class)) {
            let info = self.info(ancestor.class);
            let Some(found) = info.methods.get(method) else {
                continue;
            };
            if !lookup.accepts(found) {
                continue;
            }

            let binding = Binding {
                templates: &info.templates,
                args: &ancestor.args,
                called: Some(class),
            };
            return Some(self.resolve(&found.returns, &binding));
        }
        None
    }
}

fn parse_sig(sig: &str, context: impl FnOnce() -> String) -> Result<TypeSig, DeclError> {
    parse_type_sig(sig).map_err(|source| DeclError::InvalidType {
        sig: sig.to_string(),
        context: context(),
        source,
    })
}

impl Reflection for ClassTable {
    fn class_by_name(&self, name: &str) -> Option<ClassId> {
        let name = name.trim_start_matches('\\');
        self.names.get(name).map(|sym| ClassId::from_raw(sym.as_u32()))
    }

    fn class_name(&self, class: ClassId) -> &str {
        self.names.resolve(self.info(class).name)
    }

    fn templates(&self, class: ClassId) -> &[String] {
        self.classes
            .get(class.index())
            .map(|info| info.templates.as_slice())
            .unwrap_or(&[])
    }

    fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        self.supertypes(ObjectType::new(class))
            .iter()
            .any(|obj| obj.class == ancestor)
    }

    fn has_method(&self, class: ClassId, method: &str) -> bool {
        self.supertypes(ObjectType::new(class))
            .iter()
            .any(|obj| self.info(obj.class).methods.contains_key(method))
    }

    fn method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        self.find_method(class, method, Lookup::Any)
    }

    fn native_method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        self.find_method(class, method, Lookup::Native)
    }

    fn native_static_method_return_type(&self, class: ClassId, method: &str) -> Option<Type> {
        self.find_method(class, method, Lookup::NativeStatic)
    }

    fn template_type(&self, ty: &Type, ancestor: ClassId, param: &str) -> Option<Type> {
        let index = self.templates(ancestor).iter().position(|t| t == param)?;

        let mut found = Vec::new();
        for member in ty.members() {
            let Type::Object(obj) = member else {
                continue;
            };
            let view = self
                .supertypes(obj.clone())
                .into_iter()
                .find(|sup| sup.class == ancestor);
            if let Some(view) = view {
                found.push(view.args.get(index).cloned().unwrap_or(Type::Mixed));
            }
        }

        if found.is_empty() {
            return None;
        }
        Some(Type::union(found))
    }
}
