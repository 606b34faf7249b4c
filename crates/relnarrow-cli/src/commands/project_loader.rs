use std::fs;
use std::io::{self, Read};
use std::path::Path;

use relnarrow_lib::Project;

/// Load a project from a file, or from stdin when `path` is `-`.
pub fn load_project(path: &Path) -> Result<Project, String> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        buf
    } else {
        fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?
    };

    Project::from_json(&json).map_err(|e| format!("{}: {}", display_name(path), e))
}

fn display_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
