use std::path::PathBuf;
use std::sync::Arc;

use relnarrow_lib::{
    Arg, ExtensionRegistry, MethodCall, MethodRef, ParameterRef, Project, Reflection, StaticCall,
    Type, TypedScope,
};

use super::fail;
use super::project_loader::load_project;

/// What the method is called on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallTarget {
    /// `$receiver->method(...)`, given as a type signature.
    Receiver(String),
    /// `Model::method(...)`
    Model(String),
}

/// The relation argument of the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelationInput {
    /// One literal string per path, unioned.
    Literals(Vec<String>),
    /// A type signature such as `'posts'|'comments'` or `string`.
    Type(String),
}

pub struct ResolveArgs {
    pub project_path: PathBuf,
    pub method: String,
    pub target: CallTarget,
    pub relation: RelationInput,
}

pub fn run(args: ResolveArgs) {
    let project = load_project(&args.project_path).unwrap_or_else(|msg| fail(msg));

    match resolve(&project, &args) {
        Ok(Some(ty)) => println!("{}", ty),
        Ok(None) => println!("no refinement"),
        Err(msg) => fail(msg),
    }
}

/// Rendered closure type for the call, `None` when it is not refined.
pub fn resolve(project: &Project, args: &ResolveArgs) -> Result<Option<String>, String> {
    let extension = Arc::new(project.extension().map_err(|e| e.to_string())?);
    let registry = ExtensionRegistry::<TypedScope>::new()
        .with_method_extension(extension.clone())
        .with_static_method_extension(extension.clone());

    let table = project.table();
    let relation = match &args.relation {
        RelationInput::Literals(paths) => {
            Type::union(paths.iter().map(|path| Type::constant_string(path.as_str())))
        }
        RelationInput::Type(sig) => table.resolve_type(sig).map_err(|e| e.to_string())?,
    };
    let call_args = [
        Arg::positional(relation).into(),
        Arg::positional(Type::Mixed).into(),
    ];
    let parameter = ParameterRef::new(project.config().callback_argument_name());

    let ty = match &args.target {
        CallTarget::Receiver(sig) => {
            let receiver = table.resolve_type(sig).map_err(|e| e.to_string())?;
            let method = MethodRef::new(&args.method, extension.capabilities().builder);
            let call = MethodCall::new(receiver, call_args);
            registry.closure_type_for_method_call(&method, &call, &parameter, &TypedScope)
        }
        CallTarget::Model(name) => {
            let class = table
                .class_by_name(name)
                .ok_or_else(|| format!("class `{}` is not declared", name))?;
            let method = MethodRef::new(&args.method, class);
            let call = StaticCall::new(class, call_args);
            registry.closure_type_for_static_method_call(&method, &call, &parameter, &TypedScope)
        }
    };

    Ok(ty.map(|ty| extension.describe(&ty)))
}
