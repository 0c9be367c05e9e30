//! Traffic shaping and QoS

use crate::cli::{GlobalOptions, SubCommand};
use crate::error::{NetmgrError, NetmgrResult};
use crate::exec::Executor;
use crate::platform::Platform;
use crate::validation;
use tracing::info;

pub fn handle(
    opts: &GlobalOptions,
    platform: &dyn Platform,
    exec: &Executor,
) -> NetmgrResult<i32> {
    match opts.subcommand {
        // "limit" is not a subcommand keyword, so it arrives as args[0].
        SubCommand::Show if opts.args.first().map(String::as_str) == Some("limit") => {
            limit(&opts.args, platform, exec)
        }
        SubCommand::Show => show(&opts.args, platform, exec),
        _ => Err(NetmgrError::Usage(
            "Unknown bandwidth subcommand".to_string(),
        )),
    }
}

fn show(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    let interface = args.first().map(String::as_str);
    match interface {
        Some(dev) => {
            validation::validate_interface_name(dev)?;
            info!("Bandwidth configuration for {}:", dev);
        }
        None => info!("All interface bandwidth configurations:"),
    }
    exec.run(&platform.show_bandwidth(interface))
}

fn limit(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    // args[0] is the "limit" keyword itself.
    if args.len() < 3 {
        return Err(NetmgrError::Usage(
            "Usage: netmgr bandwidth limit <interface> <rate>".to_string(),
        ));
    }

    let interface = &args[1];
    let rate = &args[2];
    validation::validate_interface_name(interface)?;
    validation::validate_rate(rate)?;

    info!("Setting bandwidth limit on {}: {}", interface, rate);

    // Replace any existing shaping rule: tear down first, ignoring the
    // result (there may be nothing to remove).
    if let Some(clear) = platform.clear_bandwidth_limit(interface) {
        let _ = exec.run_quiet(&clear);
    }

    exec.run(&platform.limit_bandwidth(interface, rate))
}
