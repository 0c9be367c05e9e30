//! Linux tool dialect: iproute2, iptables, tc

use super::{Invocation, Platform, RuleAction};
use crate::error::{NetmgrError, NetmgrResult};

pub struct Linux;

impl Platform for Linux {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["ip", "iptables", "tc"]
    }

    fn list_interfaces(&self) -> Invocation {
        Invocation::new("ip", ["link", "show"])
    }

    fn list_interfaces_json(&self) -> Option<Invocation> {
        Some(Invocation::new("ip", ["-json", "addr", "show"]))
    }

    fn show_interface(&self, name: &str) -> Invocation {
        Invocation::new("ip", ["addr", "show", name])
    }

    fn set_interface_state(&self, name: &str, up: bool) -> Invocation {
        let state = if up { "up" } else { "down" };
        Invocation::new("ip", ["link", "set", "dev", name, state])
    }

    fn set_interface_address(&self, name: &str, address: &str, prefix: &str) -> Invocation {
        let addr = format!("{}/{}", address, prefix);
        Invocation::new("ip", ["addr", "add", addr.as_str(), "dev", name])
    }

    fn set_interface_mtu(&self, name: &str, mtu: &str) -> Invocation {
        Invocation::new("ip", ["link", "set", "dev", name, "mtu", mtu])
    }

    fn show_routes(&self) -> Invocation {
        Invocation::new("ip", ["route", "show"])
    }

    fn add_route(&self, dest: &str, via: Option<&str>, dev: Option<&str>) -> Invocation {
        let mut args = vec!["route".to_string(), "add".to_string(), dest.to_string()];
        if let Some(gateway) = via {
            args.push("via".to_string());
            args.push(gateway.to_string());
        }
        if let Some(device) = dev {
            args.push("dev".to_string());
            args.push(device.to_string());
        }
        Invocation::new("ip", args)
    }

    fn delete_route(&self, dest: &str) -> Invocation {
        Invocation::new("ip", ["route", "del", dest])
    }

    fn show_firewall_rules(&self) -> Invocation {
        Invocation::new("iptables", ["-L", "-n", "-v", "--line-numbers"])
    }

    fn add_firewall_rule(&self, action: RuleAction, port: &str, protocol: &str) -> Invocation {
        let target = match action {
            RuleAction::Allow => "ACCEPT",
            RuleAction::Deny => "DROP",
        };
        Invocation::new(
            "iptables",
            ["-A", "INPUT", "-p", protocol, "--dport", port, "-j", target],
        )
    }

    fn flush_firewall_rules(&self) -> Invocation {
        Invocation::new("iptables", ["-F"])
    }

    fn save_firewall_rules(&self, file: &str) -> Invocation {
        let script = format!("iptables-save > {}", file);
        Invocation::new("sh", ["-c", script.as_str()])
    }

    fn restore_firewall_rules(&self, file: &str) -> Invocation {
        let script = format!("iptables-restore < {}", file);
        Invocation::new("sh", ["-c", script.as_str()])
    }

    fn show_forwards(&self) -> Invocation {
        Invocation::new(
            "iptables",
            ["-t", "nat", "-L", "PREROUTING", "-n", "--line-numbers"],
        )
    }

    fn add_forward(
        &self,
        _name: &str,
        src_port: &str,
        dest_ip: &str,
        dest_port: &str,
        protocol: &str,
    ) -> Vec<Invocation> {
        let destination = format!("{}:{}", dest_ip, dest_port);
        vec![
            Invocation::new("sysctl", ["-w", "net.ipv4.ip_forward=1"]),
            Invocation::new(
                "iptables",
                [
                    "-t",
                    "nat",
                    "-A",
                    "PREROUTING",
                    "-p",
                    protocol,
                    "--dport",
                    src_port,
                    "-j",
                    "DNAT",
                    "--to-destination",
                    destination.as_str(),
                ],
            ),
            Invocation::new(
                "iptables",
                [
                    "-A", "FORWARD", "-p", protocol, "-d", dest_ip, "--dport", dest_port,
                    "-j", "ACCEPT",
                ],
            ),
        ]
    }

    fn remove_forward(&self, _name: &str) -> NetmgrResult<Invocation> {
        // No rule tracking exists, so there is nothing to look up.
        Err(NetmgrError::NotSupported(
            "rule removal requires manual iptables management on Linux".to_string(),
        ))
    }

    fn show_bandwidth(&self, interface: Option<&str>) -> Invocation {
        match interface {
            Some(dev) => Invocation::new("tc", ["qdisc", "show", "dev", dev]),
            None => Invocation::new("tc", ["qdisc", "show"]),
        }
    }

    fn clear_bandwidth_limit(&self, interface: &str) -> Option<Invocation> {
        Some(Invocation::new(
            "tc",
            ["qdisc", "del", "dev", interface, "root"],
        ))
    }

    fn limit_bandwidth(&self, interface: &str, rate: &str) -> Invocation {
        Invocation::new(
            "tc",
            [
                "qdisc", "add", "dev", interface, "root", "handle", "1:", "tbf", "rate",
                rate, "burst", "32kbit", "latency", "400ms",
            ],
        )
    }

    fn create_tunnel(
        &self,
        name: &str,
        tunnel_type: &str,
        local_ip: &str,
        remote_ip: &str,
    ) -> NetmgrResult<Vec<Invocation>> {
        Ok(vec![
            Invocation::new(
                "ip",
                [
                    "tunnel",
                    "add",
                    name,
                    "mode",
                    tunnel_type,
                    "remote",
                    remote_ip,
                    "local",
                    local_ip,
                ],
            ),
            Invocation::new("ip", ["link", "set", name, "up"]),
        ])
    }

    fn delete_tunnel(&self, name: &str) -> NetmgrResult<Vec<Invocation>> {
        Ok(vec![
            Invocation::new("ip", ["link", "set", name, "down"]),
            Invocation::new("ip", ["tunnel", "del", name]),
        ])
    }

    fn ping(&self, target: &str, count: &str) -> Invocation {
        Invocation::new("ping", ["-c", count, target])
    }

    fn traceroute(&self, target: &str) -> Invocation {
        Invocation::new("traceroute", [target])
    }

    fn traceroute_fallback(&self, target: &str) -> Option<Invocation> {
        Some(Invocation::new("tracepath", [target]))
    }

    fn probe_port(&self, target: &str, port: &str) -> Invocation {
        Invocation::new("nc", ["-z", "-w", "3", target, port])
    }
}
