use std::fmt::Write;
use std::path::PathBuf;

use relnarrow_lib::{Project, Reflection};

use super::fail;
use super::project_loader::load_project;

pub struct WalkArgs {
    pub project_path: PathBuf,
    pub models: Vec<String>,
    pub path: String,
}

pub fn run(args: WalkArgs) {
    let project = load_project(&args.project_path).unwrap_or_else(|msg| fail(msg));

    match walk(&project, &args) {
        Ok(report) => print!("{}", report),
        Err(msg) => fail(msg),
    }
}

/// Relations visited and models reached, one per line under each heading.
pub fn walk(project: &Project, args: &WalkArgs) -> Result<String, String> {
    let extension = project.extension().map_err(|e| e.to_string())?;
    let table = project.table();

    let mut start = Vec::with_capacity(args.models.len());
    for name in &args.models {
        let class = table
            .class_by_name(name)
            .ok_or_else(|| format!("class `{}` is not declared", name))?;
        if !extension.capabilities().is_model_class(table, class) {
            return Err(format!("class `{}` is not a model", name));
        }
        start.push(class);
    }

    let walk = extension.walk(&start, [args.path.as_str()]);

    let mut out = String::new();
    out.push_str("relations:\n");
    for relation in &walk.relations {
        let _ = writeln!(out, "  {}", extension.describe(relation));
    }
    out.push_str("models:\n");
    for &model in &walk.models {
        let _ = writeln!(out, "  {}", table.class_name(model));
    }
    Ok(out)
}
