//! Network interface management

use crate::cli::{GlobalOptions, SubCommand};
use crate::error::{NetmgrError, NetmgrResult};
use crate::exec::Executor;
use crate::platform::Platform;
use crate::validation;
use serde::Deserialize;
use tracing::info;

/// One link record from `ip -json addr show`.
#[derive(Debug, Deserialize)]
struct LinkRecord {
    ifname: String,
    #[serde(default)]
    operstate: Option<String>,
    /// MAC address
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    mtu: Option<u32>,
    #[serde(default)]
    addr_info: Vec<AddrInfo>,
}

#[derive(Debug, Deserialize)]
struct AddrInfo {
    #[serde(default)]
    local: Option<String>,
    #[serde(default)]
    family: Option<String>,
    #[serde(default)]
    prefixlen: Option<u8>,
}

pub fn handle(
    opts: &GlobalOptions,
    platform: &dyn Platform,
    exec: &Executor,
) -> NetmgrResult<i32> {
    match opts.subcommand {
        SubCommand::Show => match opts.args.first() {
            None => show_all(platform, exec),
            Some(name) => show_one(name, platform, exec),
        },
        SubCommand::Set => set(&opts.args, platform, exec),
        _ => Err(NetmgrError::Usage(
            "Unknown interface subcommand".to_string(),
        )),
    }
}

fn show_all(platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    info!("All network interfaces:");

    if !exec.dry_run() {
        if let Some(inv) = platform.list_interfaces_json() {
            let text = exec.capture(&inv);
            if let Ok(links) = serde_json::from_str::<Vec<LinkRecord>>(&text) {
                print_table(&links);
                return Ok(0);
            }
        }
    }

    // No machine-readable listing on this family (or it failed to parse);
    // stream the native tool's output instead.
    exec.run(&platform.list_interfaces())
}

fn print_table(links: &[LinkRecord]) {
    println!(
        "{:<15} {:<10} {:<20} {:<20} {:<6}",
        "INTERFACE", "STATE", "IP ADDRESS", "MAC ADDRESS", "MTU"
    );
    for link in links {
        let state = link
            .operstate
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| "-".to_string());
        let ip = link
            .addr_info
            .iter()
            .find(|a| a.family.as_deref() == Some("inet"))
            .and_then(|a| {
                a.local
                    .as_deref()
                    .map(|l| format!("{}/{}", l, a.prefixlen.unwrap_or(32)))
            })
            .unwrap_or_else(|| "-".to_string());
        let mac = link.address.as_deref().unwrap_or("-");
        let mtu = link
            .mtu
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<15} {:<10} {:<20} {:<20} {:<6}",
            link.ifname, state, ip, mac, mtu
        );
    }
}

fn show_one(name: &str, platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    validation::validate_interface_name(name)?;
    info!("Interface details for: {}", name);
    exec.run(&platform.show_interface(name))
}

fn set(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.len() < 2 {
        return Err(NetmgrError::Usage(
            "Usage: netmgr interface set <interface> <property> [value...]".to_string(),
        ));
    }

    let name = &args[0];
    let property = args[1].as_str();
    validation::validate_interface_name(name)?;

    match property {
        "up" => exec.run(&platform.set_interface_state(name, true)),
        "down" => exec.run(&platform.set_interface_state(name, false)),
        "ip" if args.len() >= 3 => {
            let address = &args[2];
            let prefix = args.get(3).map(String::as_str).unwrap_or("24");
            validation::validate_ip_address(address)?;
            prefix.parse::<u8>().map_err(|_| {
                NetmgrError::InvalidParameter(format!("Invalid prefix length: {}", prefix))
            })?;
            exec.run(&platform.set_interface_address(name, address, prefix))
        }
        "mtu" if args.len() >= 3 => {
            let mtu = &args[2];
            mtu.parse::<u32>().map_err(|_| {
                NetmgrError::InvalidParameter(format!("Invalid MTU: {}", mtu))
            })?;
            exec.run(&platform.set_interface_mtu(name, mtu))
        }
        other => Err(NetmgrError::Usage(format!(
            "Unknown property or insufficient arguments: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Linux;

    fn opts(sub: SubCommand, args: &[&str]) -> GlobalOptions {
        GlobalOptions {
            verbose: false,
            dry_run: true,
            force: false,
            command: crate::cli::Command::Interface,
            subcommand: sub,
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn set_without_enough_arguments_is_a_usage_error() {
        let exec = Executor::new(true);
        let err = handle(&opts(SubCommand::Set, &["eth0"]), &Linux, &exec).unwrap_err();
        assert!(err.to_string().starts_with("Usage:"));
    }

    #[test]
    fn set_rejects_a_malformed_address() {
        let exec = Executor::new(true);
        let err = handle(
            &opts(SubCommand::Set, &["eth0", "ip", "999.0.0.1"]),
            &Linux,
            &exec,
        )
        .unwrap_err();
        assert!(matches!(err, NetmgrError::InvalidParameter(_)));
    }

    #[test]
    fn set_up_succeeds_in_dry_run() {
        let exec = Executor::new(true);
        let code = handle(&opts(SubCommand::Set, &["eth0", "up"]), &Linux, &exec).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn parses_ip_json_records() {
        let text = r#"[{"ifname":"eth0","operstate":"UP","address":"aa:bb:cc:dd:ee:ff",
            "mtu":1500,"addr_info":[{"local":"10.0.0.2","family":"inet","prefixlen":24}]}]"#;
        let links: Vec<LinkRecord> = serde_json::from_str(text).unwrap();
        assert_eq!(links[0].ifname, "eth0");
        assert_eq!(links[0].addr_info[0].local.as_deref(), Some("10.0.0.2"));
    }
}
