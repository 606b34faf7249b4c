//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::builders::BuildersArgs;
use crate::commands::resolve::{CallTarget, RelationInput, ResolveArgs};
use crate::commands::walk::WalkArgs;

pub struct ResolveParams {
    pub project_path: PathBuf,
    pub method: String,
    pub receiver: Option<String>,
    pub model: Option<String>,
    pub relations: Vec<String>,
    pub relation_type: Option<String>,
}

impl ResolveParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            project_path: project_path(m),
            method: m.get_one::<String>("method").cloned().unwrap_or_default(),
            receiver: m.get_one::<String>("receiver").cloned(),
            model: m.get_one::<String>("model").cloned(),
            relations: strings(m, "relation"),
            relation_type: m.get_one::<String>("relation_type").cloned(),
        }
    }
}

impl From<ResolveParams> for ResolveArgs {
    fn from(p: ResolveParams) -> Self {
        // The arg groups guarantee exactly one of each pair.
        let target = match (p.receiver, p.model) {
            (Some(receiver), _) => CallTarget::Receiver(receiver),
            (None, model) => CallTarget::Model(model.unwrap_or_default()),
        };
        let relation = match p.relation_type {
            Some(ty) => RelationInput::Type(ty),
            None => RelationInput::Literals(p.relations),
        };
        Self {
            project_path: p.project_path,
            method: p.method,
            target,
            relation,
        }
    }
}

pub struct WalkParams {
    pub project_path: PathBuf,
    pub models: Vec<String>,
    pub path: String,
}

impl WalkParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            project_path: project_path(m),
            models: strings(m, "model"),
            path: m.get_one::<String>("path").cloned().unwrap_or_default(),
        }
    }
}

impl From<WalkParams> for WalkArgs {
    fn from(p: WalkParams) -> Self {
        Self {
            project_path: p.project_path,
            models: p.models,
            path: p.path,
        }
    }
}

pub struct BuildersParams {
    pub project_path: PathBuf,
}

impl BuildersParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            project_path: project_path(m),
        }
    }
}

impl From<BuildersParams> for BuildersArgs {
    fn from(p: BuildersParams) -> Self {
        Self {
            project_path: p.project_path,
        }
    }
}

fn project_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("project_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn strings(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
