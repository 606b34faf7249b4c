//! Command builders for the CLI.

use clap::{ArgGroup, Command};

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("relnarrow")
        .about("Closure parameter narrowing for relation queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(resolve_command())
        .subcommand(walk_command())
        .subcommand(builders_command())
}

/// Infer the callback type of a single call.
pub fn resolve_command() -> Command {
    Command::new("resolve")
        .about("Infer the callback parameter type of a relation query call")
        .override_usage(
            "\
  relnarrow resolve <PROJECT> [--method <NAME>] --receiver <TYPE> --relation <PATH>...
  relnarrow resolve <PROJECT> [--method <NAME>] --model <CLASS> --relation-type <TYPE>",
        )
        .after_help(
            r#"EXAMPLES:
  relnarrow resolve app.json --receiver 'Builder<User>' -r posts.comments
  relnarrow resolve app.json --method withWhereHas --model Post -r user
  relnarrow resolve app.json --model User --relation-type "'posts'|'comments'""#,
        )
        .arg(project_path_arg())
        .arg(method_arg())
        .arg(receiver_arg())
        .arg(model_arg())
        .arg(relation_arg())
        .arg(relation_type_arg())
        .group(
            ArgGroup::new("call")
                .args(["receiver", "model"])
                .required(true),
        )
        .group(
            ArgGroup::new("relation_argument")
                .args(["relation", "relation_type"])
                .required(true),
        )
}

/// Walk a relation path.
pub fn walk_command() -> Command {
    Command::new("walk")
        .about("Show the relations and models a relation path visits")
        .override_usage("  relnarrow walk <PROJECT> --model <CLASS>... --path <PATH>")
        .after_help(
            r#"EXAMPLES:
  relnarrow walk app.json -m User -p posts.comments
  relnarrow walk app.json -m Comment -m Tag -p commentable"#,
        )
        .arg(project_path_arg())
        .arg(models_arg())
        .arg(path_arg())
}

/// List model builders.
pub fn builders_command() -> Command {
    Command::new("builders")
        .about("Show the builder each model class resolves to")
        .override_usage("  relnarrow builders <PROJECT>")
        .after_help(
            r#"EXAMPLES:
  relnarrow builders app.json
  cat app.json | relnarrow builders -"#,
        )
        .arg(project_path_arg())
}
