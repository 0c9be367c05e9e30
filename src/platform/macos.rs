//! macOS/BSD tool dialect: ifconfig, route, pfctl, ipfw
//!
//! pf has no one-shot rule syntax, so rule installs go through an anchor
//! fed on stdin via `sh -c`. Inputs reaching those pipelines are validated
//! by the handlers before an invocation is built.

use super::{Invocation, Platform, RuleAction};
use crate::error::{NetmgrError, NetmgrResult};

pub struct MacOs;

impl Platform for MacOs {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["ifconfig", "route", "pfctl"]
    }

    fn list_interfaces(&self) -> Invocation {
        Invocation::new("ifconfig", Vec::<String>::new())
    }

    fn show_interface(&self, name: &str) -> Invocation {
        Invocation::new("ifconfig", [name])
    }

    fn set_interface_state(&self, name: &str, up: bool) -> Invocation {
        let state = if up { "up" } else { "down" };
        Invocation::new("ifconfig", [name, state])
    }

    fn set_interface_address(&self, name: &str, address: &str, prefix: &str) -> Invocation {
        let addr = format!("{}/{}", address, prefix);
        Invocation::new("ifconfig", [name, "inet", addr.as_str()])
    }

    fn set_interface_mtu(&self, name: &str, mtu: &str) -> Invocation {
        Invocation::new("ifconfig", [name, "mtu", mtu])
    }

    fn show_routes(&self) -> Invocation {
        Invocation::new("netstat", ["-nr", "-f", "inet"])
    }

    fn add_route(&self, dest: &str, via: Option<&str>, _dev: Option<&str>) -> Invocation {
        let mut args = vec!["add".to_string(), "-net".to_string(), dest.to_string()];
        if let Some(gateway) = via {
            args.push(gateway.to_string());
        }
        Invocation::new("route", args)
    }

    fn delete_route(&self, dest: &str) -> Invocation {
        Invocation::new("route", ["delete", dest])
    }

    fn show_firewall_rules(&self) -> Invocation {
        Invocation::new("pfctl", ["-s", "rules"])
    }

    fn add_firewall_rule(&self, action: RuleAction, port: &str, protocol: &str) -> Invocation {
        let disposition = match action {
            RuleAction::Allow => "pass",
            RuleAction::Deny => "block",
        };
        let rule = format!(
            "{} in proto {} from any to any port {}",
            disposition, protocol, port
        );
        let script = format!("echo '{}' | pfctl -a com.netmgr/rules -f -", rule);
        Invocation::new("sh", ["-c", script.as_str()])
    }

    fn flush_firewall_rules(&self) -> Invocation {
        Invocation::new("pfctl", ["-F", "rules"])
    }

    fn save_firewall_rules(&self, file: &str) -> Invocation {
        let script = format!("pfctl -sr > {}", file);
        Invocation::new("sh", ["-c", script.as_str()])
    }

    fn restore_firewall_rules(&self, file: &str) -> Invocation {
        Invocation::new("pfctl", ["-f", file])
    }

    fn show_forwards(&self) -> Invocation {
        Invocation::new("pfctl", ["-s", "nat"])
    }

    fn add_forward(
        &self,
        name: &str,
        src_port: &str,
        dest_ip: &str,
        dest_port: &str,
        protocol: &str,
    ) -> Vec<Invocation> {
        let rule = format!(
            "rdr pass on lo0 proto {} from any to any port {} -> {} port {}",
            protocol, src_port, dest_ip, dest_port
        );
        let script = format!("echo '{}' | pfctl -a com.netmgr/{} -f -", rule, name);
        vec![Invocation::new("sh", ["-c", script.as_str()])]
    }

    fn remove_forward(&self, name: &str) -> NetmgrResult<Invocation> {
        let anchor = format!("com.netmgr/{}", name);
        Ok(Invocation::new(
            "pfctl",
            ["-a", anchor.as_str(), "-F", "all"],
        ))
    }

    fn show_bandwidth(&self, _interface: Option<&str>) -> Invocation {
        Invocation::new("ipfw", ["pipe", "show"])
    }

    fn limit_bandwidth(&self, _interface: &str, rate: &str) -> Invocation {
        Invocation::new("ipfw", ["pipe", "1", "config", "bw", rate])
    }

    fn create_tunnel(
        &self,
        _name: &str,
        _tunnel_type: &str,
        _local_ip: &str,
        _remote_ip: &str,
    ) -> NetmgrResult<Vec<Invocation>> {
        Err(NetmgrError::NotSupported(
            "tunnel creation not implemented for macOS".to_string(),
        ))
    }

    fn delete_tunnel(&self, _name: &str) -> NetmgrResult<Vec<Invocation>> {
        Err(NetmgrError::NotSupported(
            "tunnel deletion not implemented for macOS".to_string(),
        ))
    }

    fn ping(&self, target: &str, count: &str) -> Invocation {
        Invocation::new("ping", ["-c", count, target])
    }

    fn traceroute(&self, target: &str) -> Invocation {
        Invocation::new("traceroute", [target])
    }

    fn probe_port(&self, target: &str, port: &str) -> Invocation {
        Invocation::new("nc", ["-z", "-w", "3", target, port])
    }

    fn sample_bandwidth(&self, interface: &str, duration_secs: u64) -> Option<Invocation> {
        let secs = duration_secs.to_string();
        Some(Invocation::new(
            "netstat",
            ["-I", interface, "-b", "-w", secs.as_str()],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firewall_allow_feeds_a_pass_rule_into_the_anchor() {
        let inv = MacOs.add_firewall_rule(RuleAction::Allow, "8080", "tcp");
        assert_eq!(inv.program, "sh");
        assert!(inv.args[1].contains("pass in proto tcp from any to any port 8080"));
        assert!(inv.args[1].contains("pfctl -a com.netmgr/rules -f -"));
    }

    #[test]
    fn forward_remove_flushes_the_named_anchor() {
        let inv = MacOs.remove_forward("web").unwrap();
        assert_eq!(inv.command_line(), "pfctl -a com.netmgr/web -F all");
    }

    #[test]
    fn tunnels_are_unsupported() {
        assert!(matches!(
            MacOs.create_tunnel("tun0", "gre", "10.0.0.1", "10.0.0.2"),
            Err(NetmgrError::NotSupported(_))
        ));
        assert!(matches!(
            MacOs.delete_tunnel("tun0"),
            Err(NetmgrError::NotSupported(_))
        ));
    }

    #[test]
    fn route_add_uses_net_form_and_ignores_device() {
        let inv = MacOs.add_route("10.0.0.0/24", Some("192.168.1.1"), Some("en0"));
        assert_eq!(inv.command_line(), "route add -net 10.0.0.0/24 192.168.1.1");
    }
}
