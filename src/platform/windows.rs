//! Windows tool dialect: netsh, route, powershell

use super::{Invocation, Platform, RuleAction};
use crate::error::{NetmgrError, NetmgrResult};

pub struct Windows;

impl Platform for Windows {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn required_tools(&self) -> &'static [&'static str] {
        &["netsh", "route"]
    }

    fn list_interfaces(&self) -> Invocation {
        Invocation::new("netsh", ["interface", "show", "interface"])
    }

    fn show_interface(&self, name: &str) -> Invocation {
        Invocation::new("netsh", ["interface", "ip", "show", "addresses", name])
    }

    fn set_interface_state(&self, name: &str, up: bool) -> Invocation {
        let state = if up { "enable" } else { "disable" };
        Invocation::new("netsh", ["interface", "set", "interface", name, state])
    }

    fn set_interface_address(&self, name: &str, address: &str, prefix: &str) -> Invocation {
        Invocation::new(
            "netsh",
            ["interface", "ip", "set", "address", name, "static", address, prefix],
        )
    }

    fn set_interface_mtu(&self, name: &str, mtu: &str) -> Invocation {
        let mtu_arg = format!("mtu={}", mtu);
        Invocation::new(
            "netsh",
            [
                "interface",
                "ipv4",
                "set",
                "subinterface",
                name,
                mtu_arg.as_str(),
                "store=persistent",
            ],
        )
    }

    fn show_routes(&self) -> Invocation {
        Invocation::new("route", ["print", "-4"])
    }

    fn add_route(&self, dest: &str, via: Option<&str>, _dev: Option<&str>) -> Invocation {
        let mut args = vec!["add".to_string(), dest.to_string()];
        if let Some(gateway) = via {
            args.push("mask".to_string());
            args.push("255.255.255.0".to_string());
            args.push(gateway.to_string());
        }
        Invocation::new("route", args)
    }

    fn delete_route(&self, dest: &str) -> Invocation {
        Invocation::new("route", ["delete", dest])
    }

    fn show_firewall_rules(&self) -> Invocation {
        Invocation::new(
            "netsh",
            ["advfirewall", "firewall", "show", "rule", "name=all"],
        )
    }

    fn add_firewall_rule(&self, action: RuleAction, port: &str, protocol: &str) -> Invocation {
        let (label, disposition) = match action {
            RuleAction::Allow => ("allow", "allow"),
            RuleAction::Deny => ("deny", "block"),
        };
        let name = format!("name=NetMgr-{}-{}-{}", label, protocol, port);
        let protocol_arg = format!("protocol={}", protocol);
        let port_arg = format!("localport={}", port);
        let action_arg = format!("action={}", disposition);
        Invocation::new(
            "netsh",
            [
                "advfirewall",
                "firewall",
                "add",
                "rule",
                name.as_str(),
                protocol_arg.as_str(),
                port_arg.as_str(),
                "dir=in",
                action_arg.as_str(),
            ],
        )
    }

    fn flush_firewall_rules(&self) -> Invocation {
        Invocation::new("netsh", ["advfirewall", "reset"])
    }

    fn save_firewall_rules(&self, file: &str) -> Invocation {
        Invocation::new("netsh", ["advfirewall", "export", file])
    }

    fn restore_firewall_rules(&self, file: &str) -> Invocation {
        Invocation::new("netsh", ["advfirewall", "import", file])
    }

    fn show_forwards(&self) -> Invocation {
        Invocation::new("netsh", ["interface", "portproxy", "show", "all"])
    }

    fn add_forward(
        &self,
        _name: &str,
        src_port: &str,
        dest_ip: &str,
        dest_port: &str,
        _protocol: &str,
    ) -> Vec<Invocation> {
        let listen = format!("listenport={}", src_port);
        let connect_port = format!("connectport={}", dest_port);
        let connect_addr = format!("connectaddress={}", dest_ip);
        vec![Invocation::new(
            "netsh",
            [
                "interface",
                "portproxy",
                "add",
                "v4tov4",
                listen.as_str(),
                "listenaddress=0.0.0.0",
                connect_port.as_str(),
                connect_addr.as_str(),
            ],
        )]
    }

    fn remove_forward(&self, _name: &str) -> NetmgrResult<Invocation> {
        // portproxy entries are keyed by port, not by name; nothing maps
        // the name back to the listen port.
        Err(NetmgrError::NotSupported(
            "forward removal requires specifying port details on Windows".to_string(),
        ))
    }

    fn show_bandwidth(&self, _interface: Option<&str>) -> Invocation {
        Invocation::new("powershell", ["-Command", "Get-NetQosPolicy"])
    }

    fn limit_bandwidth(&self, interface: &str, rate: &str) -> Invocation {
        let script = format!(
            "New-NetQosPolicy -Name 'NetMgr-{}' -NetworkProfile {} -ThrottleRateActionBitsPerSecond {}",
            interface, interface, rate
        );
        Invocation::new("powershell", ["-Command", script.as_str()])
    }

    fn create_tunnel(
        &self,
        name: &str,
        tunnel_type: &str,
        local_ip: &str,
        remote_ip: &str,
    ) -> NetmgrResult<Vec<Invocation>> {
        if tunnel_type != "gre" {
            return Err(NetmgrError::NotSupported(format!(
                "tunnel type {} not supported on Windows",
                tunnel_type
            )));
        }
        let source = format!("source={}", local_ip);
        let destination = format!("destination={}", remote_ip);
        Ok(vec![Invocation::new(
            "netsh",
            [
                "interface",
                "ipv4",
                "add",
                "interface",
                name,
                "type=tunnel",
                source.as_str(),
                destination.as_str(),
            ],
        )])
    }

    fn delete_tunnel(&self, name: &str) -> NetmgrResult<Vec<Invocation>> {
        Ok(vec![Invocation::new(
            "netsh",
            ["interface", "ipv4", "delete", "interface", name],
        )])
    }

    fn ping(&self, target: &str, count: &str) -> Invocation {
        Invocation::new("ping", ["-n", count, target])
    }

    fn traceroute(&self, target: &str) -> Invocation {
        Invocation::new("tracert", [target])
    }

    fn probe_port(&self, target: &str, port: &str) -> Invocation {
        let script = format!(
            "$c = New-Object System.Net.Sockets.TcpClient; try {{ $c.Connect('{}', {}); exit 0 }} catch {{ exit 1 }} finally {{ $c.Close() }}",
            target, port
        );
        Invocation::new("powershell", ["-Command", script.as_str()])
    }

    fn sample_bandwidth(&self, interface: &str, duration_secs: u64) -> Option<Invocation> {
        let script = format!(
            "$a = Get-NetAdapter | Where-Object {{$_.Name -eq '{iface}'}} | Select-Object -First 1; \
             $s = $a | Get-NetAdapterStatistics; Start-Sleep -Seconds {dur}; \
             $e = $a | Get-NetAdapterStatistics; \
             Write-Host ('RX: ' + [math]::Round(($e.ReceivedBytes - $s.ReceivedBytes) / {dur} / 1KB, 2) + ' KB/s'); \
             Write-Host ('TX: ' + [math]::Round(($e.SentBytes - $s.SentBytes) / {dur} / 1KB, 2) + ' KB/s')",
            iface = interface,
            dur = duration_secs
        );
        Some(Invocation::new("powershell", ["-Command", script.as_str()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_state_maps_to_enable_disable() {
        let up = Windows.set_interface_state("Ethernet0", true);
        assert_eq!(
            up.command_line(),
            "netsh interface set interface Ethernet0 enable"
        );
        let down = Windows.set_interface_state("Ethernet0", false);
        assert!(down.command_line().ends_with("disable"));
    }

    #[test]
    fn only_gre_tunnels_are_supported() {
        assert!(Windows
            .create_tunnel("tun0", "gre", "10.0.0.1", "10.0.0.2")
            .is_ok());
        assert!(matches!(
            Windows.create_tunnel("tun0", "ipip", "10.0.0.1", "10.0.0.2"),
            Err(NetmgrError::NotSupported(_))
        ));
    }

    #[test]
    fn forward_add_is_a_single_portproxy_call() {
        let steps = Windows.add_forward("web", "8080", "10.0.0.5", "80", "tcp");
        assert_eq!(steps.len(), 1);
        assert_eq!(
            steps[0].command_line(),
            "netsh interface portproxy add v4tov4 listenport=8080 listenaddress=0.0.0.0 connectport=80 connectaddress=10.0.0.5"
        );
    }

    #[test]
    fn forward_remove_is_a_capability_gap() {
        assert!(matches!(
            Windows.remove_forward("web"),
            Err(NetmgrError::NotSupported(_))
        ));
    }
}
