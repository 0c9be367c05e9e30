//! Firewall rules management

use crate::cli::{GlobalOptions, SubCommand};
use crate::error::{NetmgrError, NetmgrResult};
use crate::exec::Executor;
use crate::platform::{Platform, RuleAction};
use crate::validation;
use tracing::info;

pub fn handle(
    opts: &GlobalOptions,
    platform: &dyn Platform,
    exec: &Executor,
) -> NetmgrResult<i32> {
    match opts.subcommand {
        SubCommand::Show => {
            info!("Firewall rules:");
            exec.run(&platform.show_firewall_rules())
        }
        SubCommand::Add => add(&opts.args, platform, exec),
        SubCommand::Flush => {
            info!("Flushing firewall rules");
            exec.run(&platform.flush_firewall_rules())
        }
        SubCommand::Save => save(&opts.args, platform, exec),
        SubCommand::Restore => restore(&opts.args, platform, exec),
        _ => Err(NetmgrError::Usage(
            "Unknown firewall subcommand".to_string(),
        )),
    }
}

fn add(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.len() < 3 {
        return Err(NetmgrError::Usage(
            "Usage: netmgr firewall add <action> <port> <protocol>".to_string(),
        ));
    }

    let action = match args[0].as_str() {
        "allow" => RuleAction::Allow,
        "deny" | "block" => RuleAction::Deny,
        other => {
            return Err(NetmgrError::InvalidParameter(format!(
                "Invalid action '{}' (expected allow or deny)",
                other
            )))
        }
    };
    let port = &args[1];
    let protocol = &args[2];
    validation::validate_port(port)?;
    validation::validate_protocol(protocol)?;

    info!("Adding firewall rule: {} {}/{}", args[0], port, protocol);
    exec.run(&platform.add_firewall_rule(action, port, protocol))
}

fn save(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.is_empty() {
        return Err(NetmgrError::Usage(
            "Usage: netmgr firewall save <file>".to_string(),
        ));
    }
    let file = &args[0];
    validation::validate_rule_file(file)?;

    info!("Saving firewall rules to {}", file);
    exec.run(&platform.save_firewall_rules(file))
}

fn restore(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.is_empty() {
        return Err(NetmgrError::Usage(
            "Usage: netmgr firewall restore <file>".to_string(),
        ));
    }
    let file = &args[0];
    validation::validate_rule_file(file)?;

    info!("Restoring firewall rules from {}", file);
    exec.run(&platform.restore_firewall_rules(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use crate::platform::Linux;

    fn opts(sub: SubCommand, args: &[&str]) -> GlobalOptions {
        GlobalOptions {
            verbose: false,
            dry_run: true,
            force: false,
            command: Command::Firewall,
            subcommand: sub,
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn add_requires_three_arguments() {
        let exec = Executor::new(true);
        let err = handle(&opts(SubCommand::Add, &["allow", "8080"]), &Linux, &exec).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Usage: netmgr firewall add <action> <port> <protocol>"
        );
    }

    #[test]
    fn add_rejects_an_unknown_action() {
        let exec = Executor::new(true);
        let err = handle(
            &opts(SubCommand::Add, &["maybe", "8080", "tcp"]),
            &Linux,
            &exec,
        )
        .unwrap_err();
        assert!(matches!(err, NetmgrError::InvalidParameter(_)));
    }

    #[test]
    fn add_rejects_a_bad_port() {
        let exec = Executor::new(true);
        assert!(handle(
            &opts(SubCommand::Add, &["allow", "http", "tcp"]),
            &Linux,
            &exec
        )
        .is_err());
    }

    #[test]
    fn save_requires_a_clean_file_path() {
        let exec = Executor::new(true);
        assert!(handle(
            &opts(SubCommand::Save, &["/tmp/rules;id"]),
            &Linux,
            &exec
        )
        .is_err());
        assert_eq!(
            handle(&opts(SubCommand::Save, &["/tmp/rules.v4"]), &Linux, &exec).unwrap(),
            0
        );
    }

    #[test]
    fn flush_runs_in_dry_run() {
        let exec = Executor::new(true);
        assert_eq!(handle(&opts(SubCommand::Flush, &[]), &Linux, &exec).unwrap(), 0);
    }
}
