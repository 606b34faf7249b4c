pub mod builders;
pub mod project_loader;
pub mod resolve;
pub mod walk;


/// Print `msg` to stderr and exit with status 1.
pub fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
