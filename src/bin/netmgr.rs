//! netmgr - Cross-platform network management tool
//!
//! Parses the global option prefix and command, gates on privileges and
//! external tool availability, then dispatches to one command handler.

use libnetmgr::{cli, dispatch, platform, system, Executor};
use std::process;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_ansi(atty::is(atty::Stream::Stdout))
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let opts = match cli::parse(&args) {
        Ok(cli::Parsed::Run(opts)) => opts,
        Ok(cli::Parsed::Help) => {
            println!("{}", cli::help_text());
            return;
        }
        Ok(cli::Parsed::Version) => {
            println!("{}", cli::version_text());
            return;
        }
        Ok(cli::Parsed::NoCommand) => {
            eprintln!("{}", cli::help_text());
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    init_logging(opts.verbose);

    let platform = platform::detect();

    // Dry-run executes nothing, so neither gate applies there.
    if !opts.dry_run {
        if let Err(err) = system::check_privileges() {
            eprintln!("{}", err);
            process::exit(1);
        }
        if let Err(err) = system::check_dependencies(platform.as_ref()) {
            eprintln!("{}", err);
            process::exit(1);
        }
    }

    let executor = Executor::new(opts.dry_run);
    process::exit(dispatch(&opts, platform.as_ref(), &executor));
}
