use std::fmt::Write;
use std::path::PathBuf;

use relnarrow_lib::{BuilderKey, BuilderResolver, Project, Reflection};

use super::fail;
use super::project_loader::load_project;

pub struct BuildersArgs {
    pub project_path: PathBuf,
}

pub fn run(args: BuildersArgs) {
    let project = load_project(&args.project_path).unwrap_or_else(|msg| fail(msg));

    match builders(&project) {
        Ok(report) => print!("{}", report),
        Err(msg) => fail(msg),
    }
}

/// One `Model -> Builder` line per model class, in declaration order.
pub fn builders(project: &Project) -> Result<String, String> {
    let extension = project.extension().map_err(|e| e.to_string())?;
    let capabilities = extension.capabilities();
    let table = project.table();
    let mut resolver =
        BuilderResolver::new(table, capabilities.builder, project.config().query_method_name());

    let mut out = String::new();
    for class in table.iter() {
        if class == capabilities.model || !capabilities.is_model_class(table, class) {
            continue;
        }
        let name = table.class_name(class);
        let _ = match resolver.resolve(class) {
            BuilderKey::Resolved(builder) => {
                writeln!(out, "{} -> {}", name, table.class_name(builder))
            }
            BuilderKey::Fallback { description, .. } => {
                writeln!(out, "{} -> {} (declared)", name, description)
            }
        };
    }
    Ok(out)
}
