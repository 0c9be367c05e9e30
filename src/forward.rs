//! Port forwarding management

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
        SubCommand::Show => {
            info!("Active port forwards:");
            exec.run(&platform.show_forwards())
        }
        SubCommand::Add => add(&opts.args, platform, exec),
        SubCommand::Remove => remove(&opts.args, platform, exec),
        _ => Err(NetmgrError::Usage("Unknown forward subcommand".to_string())),
    }
}

fn add(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.len() < 4 {
        return Err(NetmgrError::Usage(
            "Usage: netmgr forward add <name> <src_port> <dest_ip> <dest_port> [protocol]"
                .to_string(),
        ));
    }

    let name = &args[0];
    let src_port = &args[1];
    let dest_ip = &args[2];
    let dest_port = &args[3];
    let protocol = args.get(4).map(String::as_str).unwrap_or("tcp");

    validation::validate_forward_name(name)?;
    validation::validate_port(src_port)?;
    validation::validate_ip_address(dest_ip)?;
    validation::validate_port(dest_port)?;
    validation::validate_protocol(protocol)?;

    info!(
        "Adding port forward: {} ({} -> {}:{})",
        name, src_port, dest_ip, dest_port
    );

    // The prep step (enabling IP forwarding) is allowed to fail without
    // stopping the rule installs; the last step's status is the result.
    let mut last = 0;
    for inv in platform.add_forward(name, src_port, dest_ip, dest_port, protocol) {
        last = exec.run(&inv)?;
    }
    Ok(last)
}

fn remove(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.is_empty() {
        return Err(NetmgrError::Usage(
            "Usage: netmgr forward remove <name>".to_string(),
        ));
    }

    let name = &args[0];
    validation::validate_forward_name(name)?;

    info!("Removing port forward: {}", name);
    let inv = platform.remove_forward(name)?;
    exec.run(&inv)
}
