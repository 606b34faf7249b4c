//! Project documents: configuration plus class declarations.

use std::sync::Arc;

use relnarrow_core::{ClassId, ClassTable, RawClass, Reflection};
use serde::Deserialize;

use crate::config::Config;
use crate::extension::RelationClosureExtension;
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProject {
    #[serde(default)]
    config: Config,
    classes: Vec<RawClass>,
}

/// Loaded declarations with the configuration to analyse them under.
///
/// ```json
/// {
///   "config": { "methods": ["whereHas"] },
///   "classes": [{ "name": "Model" }, ...]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Project {
    table: Arc<ClassTable>,
    config: Config,
}

impl Project {
    pub fn new(table: ClassTable, config: Config) -> Self {
        Self {
            table: Arc::new(table),
            config,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawProject = serde_json::from_str(json).map_err(|e| Error::Json(e.to_string()))?;
        let table = ClassTable::build(&raw.classes)?;
        Ok(Self::new(table, raw.config))
    }

    pub fn table(&self) -> &ClassTable {
        &self.table
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn class(&self, name: &str) -> Option<ClassId> {
        self.table.class_by_name(name)
    }

    /// Extension sharing this project's declarations.
    pub fn extension(&self) -> Result<RelationClosureExtension<Arc<ClassTable>>> {
        RelationClosureExtension::new(Arc::clone(&self.table), self.config.clone())
    }
}
