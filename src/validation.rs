//! Input validation and sanitization
//!
//! Arguments are rejected here before any invocation is built. This matters
//! most for the macOS strategy, where firewall and forward rules travel
//! through `sh -c` pipelines.

use crate::error::{NetmgrError, NetmgrResult};
use std::net::IpAddr;

/// Maximum length for interface names (Linux kernel limit is 15)
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Validate an interface name: alphanumeric plus dash, underscore, dot.
pub fn validate_interface_name(name: &str) -> NetmgrResult<()> {
    if name.is_empty() {
        return Err(NetmgrError::InvalidParameter(
            "Interface name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(NetmgrError::InvalidParameter(format!(
            "Interface name too long (max {} characters)",
            MAX_INTERFACE_NAME_LEN
        )));
    }

    if name.starts_with('-') {
        return Err(NetmgrError::InvalidParameter(
            "Interface name cannot start with dash".to_string(),
        ));
    }

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
            return Err(NetmgrError::InvalidParameter(format!(
                "Invalid interface name '{}': contains invalid character '{}'",
                name, c
            )));
        }
    }

    Ok(())
}

/// Validate an IP address with the standard library parser.
pub fn validate_ip_address(addr: &str) -> NetmgrResult<IpAddr> {
    addr.parse::<IpAddr>()
        .map_err(|_| NetmgrError::InvalidParameter(format!("Invalid IP address: {}", addr)))
}

/// Validate a TCP/UDP port number.
pub fn validate_port(port: &str) -> NetmgrResult<u16> {
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(NetmgrError::InvalidParameter(format!(
            "Invalid port: {}",
            port
        ))),
    }
}

/// Validate a protocol keyword.
pub fn validate_protocol(protocol: &str) -> NetmgrResult<()> {
    match protocol {
        "tcp" | "udp" => Ok(()),
        other => Err(NetmgrError::InvalidParameter(format!(
            "Invalid protocol '{}' (expected tcp or udp)",
            other
        ))),
    }
}

/// Validate a forward name; it becomes part of a pf anchor path on macOS.
pub fn validate_forward_name(name: &str) -> NetmgrResult<()> {
    if name.is_empty() || name.len() > 64 {
        return Err(NetmgrError::InvalidParameter(
            "Forward name must be 1-64 characters".to_string(),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(NetmgrError::InvalidParameter(format!(
            "Invalid forward name: {}",
            name
        )));
    }
    Ok(())
}

/// Validate a traffic rate string such as `10mbit` or `500kbit`.
pub fn validate_rate(rate: &str) -> NetmgrResult<()> {
    if rate.is_empty() || !rate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(NetmgrError::InvalidParameter(format!(
            "Invalid rate: {}",
            rate
        )));
    }
    Ok(())
}

/// Validate a file path destined for an `sh -c` redirection.
pub fn validate_rule_file(path: &str) -> NetmgrResult<()> {
    if path.is_empty() {
        return Err(NetmgrError::InvalidParameter(
            "File path cannot be empty".to_string(),
        ));
    }
    for c in path.chars() {
        if c.is_whitespace() || "';|&$`<>(){}".contains(c) {
            return Err(NetmgrError::InvalidParameter(format!(
                "Invalid character '{}' in file path",
                c
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interface_names() {
        assert!(validate_interface_name("eth0").is_ok());
        assert!(validate_interface_name("br-lan").is_ok());
        assert!(validate_interface_name("vlan.10").is_ok());
        assert!(validate_interface_name("").is_err());
        assert!(validate_interface_name("-eth0").is_err());
        assert!(validate_interface_name("eth0; rm -rf /").is_err());
        assert!(validate_interface_name("averyverylongname").is_err());
    }

    #[test]
    fn ip_addresses() {
        assert!(validate_ip_address("192.168.1.1").is_ok());
        assert!(validate_ip_address("fe80::1").is_ok());
        assert!(validate_ip_address("256.1.1.1").is_err());
        assert!(validate_ip_address("10.0.0.5;reboot").is_err());
    }

    #[test]
    fn ports() {
        assert!(validate_port("22").is_ok());
        assert!(validate_port("65535").is_ok());
        assert!(validate_port("0").is_err());
        assert!(validate_port("65536").is_err());
        assert!(validate_port("ssh").is_err());
    }

    #[test]
    fn protocols() {
        assert!(validate_protocol("tcp").is_ok());
        assert!(validate_protocol("udp").is_ok());
        assert!(validate_protocol("icmp").is_err());
    }

    #[test]
    fn forward_names() {
        assert!(validate_forward_name("web").is_ok());
        assert!(validate_forward_name("my_fwd-1").is_ok());
        assert!(validate_forward_name("").is_err());
        assert!(validate_forward_name("a'b").is_err());
    }

    #[test]
    fn rates() {
        assert!(validate_rate("10mbit").is_ok());
        assert!(validate_rate("500kbit").is_ok());
        assert!(validate_rate("").is_err());
        assert!(validate_rate("10mbit; reboot").is_err());
    }

    #[test]
    fn rule_files() {
        assert!(validate_rule_file("/etc/netmgr/rules.v4").is_ok());
        assert!(validate_rule_file("rules > /dev/null").is_err());
        assert!(validate_rule_file("rules;id").is_err());
        assert!(validate_rule_file("").is_err());
    }
}
