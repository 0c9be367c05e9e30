//! Network diagnostics

use crate::cli::GlobalOptions;
use crate::error::{NetmgrError, NetmgrResult};
use crate::exec::Executor;
use crate::platform::Platform;
use crate::validation;
use std::fs;
use std::thread;
use std::time::Duration;
use tracing::info;

pub fn handle(
    opts: &GlobalOptions,
    platform: &dyn Platform,
    exec: &Executor,
) -> NetmgrResult<i32> {
    // The action keyword arrives as args[0] via the show fallback.
    match opts.args.first().map(String::as_str) {
        Some("connectivity") => connectivity(&opts.args, platform, exec),
        Some("ports") => ports(&opts.args, platform, exec),
        Some("bandwidth") => monitor_bandwidth(&opts.args, platform, exec),
        _ => Err(NetmgrError::Usage(
            "Usage: netmgr diagnostic <connectivity|ports|bandwidth> ...".to_string(),
        )),
    }
}

fn connectivity(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    let target = args.get(1).map(String::as_str).unwrap_or("8.8.8.8");
    let count = args.get(2).map(String::as_str).unwrap_or("3");
    count.parse::<u32>().map_err(|_| {
        NetmgrError::InvalidParameter(format!("Invalid ping count: {}", count))
    })?;

    info!("Testing connectivity to {}", target);

    println!("=== Ping Test ===");
    let _ = exec.run(&platform.ping(target, count));

    println!();
    println!("=== Traceroute ===");
    let traced = match exec.run(&platform.traceroute(target)) {
        Ok(status) => status == 0,
        // Tracer missing entirely; try the fallback before giving up.
        Err(_) => false,
    };
    if !traced {
        if let Some(fallback) = platform.traceroute_fallback(target) {
            let _ = exec.run(&fallback);
        }
    }

    Ok(0)
}

fn ports(args: &[String], platform: &dyn Platform, exec: &Executor) -> NetmgrResult<i32> {
    let target = match args.get(1) {
        Some(target) => target,
        None => {
            return Err(NetmgrError::Usage(
                "Usage: netmgr diagnostic ports <target> [ports]".to_string(),
            ))
        }
    };
    let port_list = args.get(2).map(String::as_str).unwrap_or("22,80,443");

    info!("Testing ports on {}: {}", target, port_list);

    for port in port_list.split(',') {
        let port = port.trim();
        validation::validate_port(port)?;

        let status = exec.run_quiet(&platform.probe_port(target, port))?;
        if status == 0 {
            println!("Port {} is open", port);
        } else {
            println!("Port {} is closed or filtered", port);
        }
    }

    Ok(0)
}

fn monitor_bandwidth(
    args: &[String],
    platform: &dyn Platform,
    exec: &Executor,
) -> NetmgrResult<i32> {
    let interface = args.get(1).map(String::as_str).unwrap_or("eth0");
    let duration_str = args.get(2).map(String::as_str).unwrap_or("10");
    let duration: u64 = duration_str.parse().map_err(|_| {
        NetmgrError::InvalidParameter(format!("Invalid duration: {}", duration_str))
    })?;
    validation::validate_interface_name(interface)?;

    info!("Monitoring bandwidth on {} for {}s", interface, duration);

    if let Some(inv) = platform.sample_bandwidth(interface, duration) {
        return exec.run(&inv);
    }

    // Linux: sample the sysfs byte counters directly.
    if exec.dry_run() {
        info!(
            "would sample /sys/class/net/{}/statistics for {}s",
            interface, duration
        );
        return Ok(0);
    }

    let (rx_start, tx_start) = read_interface_counters(interface)?;
    thread::sleep(Duration::from_secs(duration));
    let (rx_end, tx_end) = read_interface_counters(interface)?;

    let seconds = duration.max(1);
    println!("RX: {}/s", format_bytes(rx_end.saturating_sub(rx_start) / seconds));
    println!("TX: {}/s", format_bytes(tx_end.saturating_sub(tx_start) / seconds));

    Ok(0)
}

fn read_interface_counters(interface: &str) -> NetmgrResult<(u64, u64)> {
    let read = |counter: &str| -> NetmgrResult<u64> {
        let path = format!("/sys/class/net/{}/statistics/{}", interface, counter);
        let text = fs::read_to_string(&path).map_err(|_| {
            NetmgrError::InvalidParameter(format!("Interface not found: {}", interface))
        })?;
        text.trim()
            .parse()
            .map_err(|e| NetmgrError::ParseError(format!("{}: {}", path, e)))
    };
    Ok((read("rx_bytes")?, read("tx_bytes")?))
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    }
}
