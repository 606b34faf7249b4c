//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Project file with class declarations (positional, `-` for stdin).
pub fn project_path_arg() -> Arg {
    Arg::new("project_path")
        .value_name("PROJECT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Project file (JSON), or - for stdin")
}

/// Called method (--method).
pub fn method_arg() -> Arg {
    Arg::new("method")
        .long("method")
        .value_name("NAME")
        .default_value("whereHas")
        .help("Called method")
}

/// Receiver type of a method call (--receiver).
pub fn receiver_arg() -> Arg {
    Arg::new("receiver")
        .long("receiver")
        .value_name("TYPE")
        .help("Receiver type, e.g. 'Builder<User>'")
}

/// Called model class of a static call (--model).
pub fn model_arg() -> Arg {
    Arg::new("model")
        .short('m')
        .long("model")
        .value_name("CLASS")
        .help("Model class")
}

/// Model classes to start from (--model, repeatable).
pub fn models_arg() -> Arg {
    model_arg()
        .required(true)
        .action(ArgAction::Append)
        .help("Model class to start from (repeatable)")
}

/// Literal relation paths (--relation, repeatable).
pub fn relation_arg() -> Arg {
    Arg::new("relation")
        .short('r')
        .long("relation")
        .value_name("PATH")
        .action(ArgAction::Append)
        .help("Literal relation path, e.g. posts.comments (repeatable)")
}

/// Relation argument given as a type (--relation-type).
pub fn relation_type_arg() -> Arg {
    Arg::new("relation_type")
        .long("relation-type")
        .value_name("TYPE")
        .help("Relation argument type, e.g. \"'posts'|'comments'\"")
}

/// Single relation path (--path).
pub fn path_arg() -> Arg {
    Arg::new("path")
        .short('p')
        .long("path")
        .value_name("PATH")
        .required(true)
        .help("Relation path, e.g. posts.comments")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .global(true)
        .help("Log engine decisions to stderr (-vv for more)")
}
