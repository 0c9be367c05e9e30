//! Tunnel interface management

use crate::cli::{GlobalOptions, SubCommand};
use crate::error::{NetmgrError, NetmgrResult};
use crate::exec::Executor;
use crate::platform::Platform;
use crate::validation;
use tracing::info;

const TUNNEL_TYPES: &[&str] = &["gre", "ipip", "sit"];

pub fn handle(
    opts: &GlobalOptions,
    platform: &dyn Platform,
    exec: &Executor,
) -> NetmgrResult<i32> {
    match opts.subcommand {
        // "create" is not a subcommand keyword and arrives as args[0].
        SubCommand::Show if opts.args.first().map(String::as_str) == Some("create") => {
            create(&opts.args[1..], platform, exec)
        }
        SubCommand::Add => create(&opts.args, platform, exec),
        SubCommand::Delete | SubCommand::Remove => delete(&opts.args, platform, exec),
        _ => Err(NetmgrError::Usage(
            "Usage: netmgr tunnel <create|delete> ...".to_string(),
        )),
    }
}

fn create(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.len() < 4 {
        return Err(NetmgrError::Usage(
            "Usage: netmgr tunnel create <name> <type> <local_ip> <remote_ip>".to_string(),
        ));
    }

    let name = &args[0];
    let tunnel_type = &args[1];
    let local_ip = &args[2];
    let remote_ip = &args[3];

    validation::validate_interface_name(name)?;
    if !TUNNEL_TYPES.contains(&tunnel_type.as_str()) {
        return Err(NetmgrError::InvalidParameter(format!(
            "Invalid tunnel type '{}' (expected one of: {})",
            tunnel_type,
            TUNNEL_TYPES.join(", ")
        )));
    }
    validation::validate_ip_address(local_ip)?;
    validation::validate_ip_address(remote_ip)?;

    info!("Creating {} tunnel: {}", tunnel_type, name);

    // Later steps (bringing the interface up) only make sense once the
    // tunnel exists: stop at the first failure.
    for inv in platform.create_tunnel(name, tunnel_type, local_ip, remote_ip)? {
        let status = exec.run(&inv)?;
        if status != 0 {
            return Ok(status);
        }
    }
    Ok(0)
}

fn delete(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.is_empty() {
        return Err(NetmgrError::Usage(
            "Usage: netmgr tunnel delete <name>".to_string(),
        ));
    }

    let name = &args[0];
    validation::validate_interface_name(name)?;

    info!("Deleting tunnel: {}", name);

    // The link-down step may fail on an already-down tunnel; the final
    // teardown step's status is the result.
    let mut last = 0;
    for inv in platform.delete_tunnel(name)? {
        last = exec.run(&inv)?;
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use crate::platform::{Linux, MacOs};

    fn opts(sub: SubCommand, args: &[&str]) -> GlobalOptions {
        GlobalOptions {
            verbose: false,
            dry_run: true,
            force: false,
            command: Command::Tunnel,
            subcommand: sub,
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn create_requires_all_four_arguments() {
        let exec = Executor::new(true);
        let err = handle(
            &opts(SubCommand::Show, &["create", "tun0", "gre"]),
            &Linux,
            &exec,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Usage: netmgr tunnel create"));
    }

    #[test]
    fn create_rejects_an_unknown_type() {
        let exec = Executor::new(true);
        assert!(handle(
            &opts(
                SubCommand::Show,
                &["create", "tun0", "vxlan", "10.0.0.1", "10.0.0.2"]
            ),
            &Linux,
            &exec
        )
        .is_err());
    }

    #[test]
    fn create_succeeds_in_dry_run_on_linux() {
        let exec = Executor::new(true);
        let code = handle(
            &opts(
                SubCommand::Show,
                &["create", "tun0", "gre", "192.168.1.10", "203.0.113.5"],
            ),
            &Linux,
            &exec,
        )
        .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn create_is_unsupported_on_macos() {
        let exec = Executor::new(true);
        assert!(matches!(
            handle(
                &opts(
                    SubCommand::Show,
                    &["create", "tun0", "gre", "10.0.0.1", "10.0.0.2"]
                ),
                &MacOs,
                &exec
            ),
            Err(NetmgrError::NotSupported(_))
        ));
    }

    #[test]
    fn delete_routes_through_the_delete_subcommand() {
        let exec = Executor::new(true);
        assert_eq!(
            handle(&opts(SubCommand::Delete, &["tun0"]), &Linux, &exec).unwrap(),
            0
        );
    }

    #[test]
    fn bare_tunnel_command_is_a_usage_error() {
        let exec = Executor::new(true);
        assert!(handle(&opts(SubCommand::Show, &[]), &Linux, &exec).is_err());
    }
}
