//! netmgr - Cross-Platform Network Management Library
//!
//! A thin dispatch layer over platform-native network tooling:
//! - Interface management (`ip`, `ifconfig`, `netsh`)
//! - Routing tables (`ip route`, `route`)
//! - Firewall rules (`iptables`, `pfctl`, `netsh advfirewall`)
//! - Port forwarding (iptables NAT, pf anchors, portproxy)
//! - Traffic shaping (`tc`, `ipfw`, NetQos)
//! - Tunnels (`ip tunnel`, netsh)
//! - Diagnostics (ping, traceroute, port probes, throughput sampling)
//!
//! Handlers are platform-agnostic: every operation is expressed as an
//! [`platform::Invocation`] built by the active [`platform::Platform`]
//! strategy and executed through [`exec::Executor`].

pub mod error;
pub mod cli;
pub mod validation;
pub mod platform;
pub mod exec;
pub mod system;

pub mod interface;
pub mod route;
pub mod firewall;
pub mod forward;
pub mod dns;
pub mod bandwidth;
pub mod tunnel;
pub mod diagnostic;

// Re-export commonly used types
pub use cli::{Command, GlobalOptions, Parsed, SubCommand};
pub use error::{NetmgrError, NetmgrResult};
pub use exec::Executor;
pub use platform::{Invocation, Platform, RuleAction};

/// Route parsed options to exactly one command handler and map the outcome
/// to a process exit code: the child's status on success, 1 with a message
/// on standard error otherwise.
pub fn dispatch(opts: &GlobalOptions, platform: &dyn Platform, exec: &Executor) -> i32 {
    let result = match opts.command {
        Command::Interface => interface::handle(opts, platform, exec),
        Command::Route => route::handle(opts, platform, exec),
        Command::Firewall => firewall::handle(opts, platform, exec),
        Command::Forward => forward::handle(opts, platform, exec),
        Command::Dns => dns::handle(opts, platform, exec),
        Command::Bandwidth => bandwidth::handle(opts, platform, exec),
        Command::Tunnel => tunnel::handle(opts, platform, exec),
        Command::Diagnostic => diagnostic::handle(opts, platform, exec),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Linux;

    #[test]
    fn dispatch_maps_usage_errors_to_exit_code_one() {
        let opts = GlobalOptions {
            verbose: false,
            dry_run: true,
            force: false,
            command: Command::Route,
            subcommand: SubCommand::Add,
            args: Vec::new(),
        };
        let exec = Executor::new(true);
        assert_eq!(dispatch(&opts, &Linux, &exec), 1);
    }

    #[test]
    fn dispatch_propagates_dry_run_success() {
        let opts = GlobalOptions {
            verbose: false,
            dry_run: true,
            force: false,
            command: Command::Firewall,
            subcommand: SubCommand::Show,
            args: Vec::new(),
        };
        let exec = Executor::new(true);
        assert_eq!(dispatch(&opts, &Linux, &exec), 0);
    }
}
