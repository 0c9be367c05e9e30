//! Platform strategy selection
//!
//! Each platform family (Linux, macOS, Windows) speaks a different dialect
//! of network tooling. The [`Platform`] trait turns every operation into an
//! [`Invocation`] (program name plus ordered argument list), keeping the
//! command handlers platform-agnostic. One strategy is selected at startup;
//! tests can instantiate any family directly regardless of the host OS.

mod linux;
mod macos;
mod windows;

pub use linux::Linux;
pub use macos::MacOs;
pub use windows::Windows;

use crate::error::NetmgrResult;

/// A fully-assembled external command: program name and argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The command line as a single display string, used for logging and
    /// dry-run output.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Firewall rule disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    Allow,
    Deny,
}

/// One platform family's tool and argument conventions.
///
/// Methods return invocations only; nothing here executes a process. When
/// an operation needs several steps the method returns them in execution
/// order and the handler decides the continue/stop-on-failure policy.
/// Operations a family cannot express return `NetmgrError::NotSupported`.
pub trait Platform {
    fn name(&self) -> &'static str;

    /// External tools that must be resolvable before dispatch.
    fn required_tools(&self) -> &'static [&'static str];

    // === interface ===

    /// Stream a listing of all interfaces via the native tool.
    fn list_interfaces(&self) -> Invocation;

    /// Machine-readable interface listing, where the family has one.
    /// The handler falls back to [`Platform::list_interfaces`] otherwise.
    fn list_interfaces_json(&self) -> Option<Invocation> {
        None
    }

    fn show_interface(&self, name: &str) -> Invocation;
    fn set_interface_state(&self, name: &str, up: bool) -> Invocation;
    fn set_interface_address(&self, name: &str, address: &str, prefix: &str) -> Invocation;
    fn set_interface_mtu(&self, name: &str, mtu: &str) -> Invocation;

    // === route ===

    fn show_routes(&self) -> Invocation;
    fn add_route(&self, dest: &str, via: Option<&str>, dev: Option<&str>) -> Invocation;
    fn delete_route(&self, dest: &str) -> Invocation;

    // === firewall ===

    fn show_firewall_rules(&self) -> Invocation;
    fn add_firewall_rule(&self, action: RuleAction, port: &str, protocol: &str) -> Invocation;
    fn flush_firewall_rules(&self) -> Invocation;
    fn save_firewall_rules(&self, file: &str) -> Invocation;
    fn restore_firewall_rules(&self, file: &str) -> Invocation;

    // === forward ===

    fn show_forwards(&self) -> Invocation;

    /// Steps to install a port forward, in order. Prep steps (enabling IP
    /// forwarding) come first; the handler runs all steps and reports the
    /// last status.
    fn add_forward(
        &self,
        name: &str,
        src_port: &str,
        dest_ip: &str,
        dest_port: &str,
        protocol: &str,
    ) -> Vec<Invocation>;

    /// Remove a named forward. A real capability gap on families without
    /// rule tracking: Linux and Windows cannot know what to remove.
    fn remove_forward(&self, name: &str) -> NetmgrResult<Invocation>;

    // === bandwidth ===

    fn show_bandwidth(&self, interface: Option<&str>) -> Invocation;

    /// Tear down existing shaping on the interface, where the family needs
    /// an explicit step. Its result is ignored by the handler.
    fn clear_bandwidth_limit(&self, interface: &str) -> Option<Invocation> {
        let _ = interface;
        None
    }

    fn limit_bandwidth(&self, interface: &str, rate: &str) -> Invocation;

    // === tunnel ===

    fn create_tunnel(
        &self,
        name: &str,
        tunnel_type: &str,
        local_ip: &str,
        remote_ip: &str,
    ) -> NetmgrResult<Vec<Invocation>>;

    fn delete_tunnel(&self, name: &str) -> NetmgrResult<Vec<Invocation>>;

    // === diagnostics ===

    fn ping(&self, target: &str, count: &str) -> Invocation;
    fn traceroute(&self, target: &str) -> Invocation;

    /// Secondary path tracer to try when [`Platform::traceroute`] fails.
    fn traceroute_fallback(&self, target: &str) -> Option<Invocation> {
        let _ = target;
        None
    }

    /// Single TCP connect probe against one port.
    fn probe_port(&self, target: &str, port: &str) -> Invocation;

    /// External throughput sampler, for families without readable
    /// interface counters. Linux returns `None` and the handler samples
    /// sysfs counters natively.
    fn sample_bandwidth(&self, interface: &str, duration_secs: u64) -> Option<Invocation> {
        let _ = (interface, duration_secs);
        None
    }
}

/// Select the strategy for the running OS. Unrecognized unix-likes get the
/// Linux dialect.
pub fn detect() -> Box<dyn Platform> {
    if cfg!(target_os = "windows") {
        Box::new(Windows)
    } else if cfg!(target_os = "macos") {
        Box::new(MacOs)
    } else {
        Box::new(Linux)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_joins_program_and_args() {
        let inv = Invocation::new("ip", ["route", "show"]);
        assert_eq!(inv.command_line(), "ip route show");

        let bare = Invocation::new("ifconfig", Vec::<String>::new());
        assert_eq!(bare.command_line(), "ifconfig");
    }

    #[test]
    fn detect_returns_a_strategy() {
        let platform = detect();
        assert!(!platform.required_tools().is_empty());
    }
}
