mod cli;
mod commands;

use cli::{BuildersParams, ResolveParams, WalkParams, build_cli, init_logging};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("resolve", m)) => {
            let params = ResolveParams::from_matches(m);
            commands::resolve::run(params.into());
        }
        Some(("walk", m)) => {
            let params = WalkParams::from_matches(m);
            commands::walk::run(params.into());
        }
        Some(("builders", m)) => {
            let params = BuildersParams::from_matches(m);
            commands::builders::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
