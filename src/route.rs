//! Routing table management

use crate::cli::{GlobalOptions, SubCommand};
use crate::error::{NetmgrError, NetmgrResult};
use crate::exec::Executor;
use crate::platform::Platform;
use tracing::info;

pub fn handle(
    opts: &GlobalOptions,
    platform: &dyn Platform,
    exec: &Executor,
) -> NetmgrResult<i32> {
    match opts.subcommand {
        SubCommand::Show => {
            info!("Routing table:");
            exec.run(&platform.show_routes())
        }
        SubCommand::Add => add(&opts.args, platform, exec),
        SubCommand::Delete => delete(&opts.args, platform, exec),
        _ => Err(NetmgrError::Usage("Unknown route subcommand".to_string())),
    }
}

fn add(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.is_empty() {
        return Err(NetmgrError::Usage(
            "Usage: netmgr route add <destination> [--via <gateway>] [--dev <interface>]"
                .to_string(),
        ));
    }

    let destination = &args[0];
    let mut gateway: Option<&str> = None;
    let mut device: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--via" if i + 1 < args.len() => {
                gateway = Some(&args[i + 1]);
                i += 1;
            }
            "--dev" if i + 1 < args.len() => {
                device = Some(&args[i + 1]);
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }

    info!("Adding route: {}", destination);
    exec.run(&platform.add_route(destination, gateway, device))
}

fn delete(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    if args.is_empty() {
        return Err(NetmgrError::Usage(
            "Usage: netmgr route delete <destination>".to_string(),
        ));
    }

    let destination = &args[0];
    info!("Deleting route: {}", destination);
    exec.run(&platform.delete_route(destination))
}
