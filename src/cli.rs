//! Command-line parsing
//!
//! The grammar is deliberately simple: a contiguous prefix of global flags,
//! one command token, an optional subcommand token, then free arguments.
//! Flags cannot appear after the command; whatever follows the command is
//! forwarded verbatim to the selected handler.

use crate::error::{NetmgrError, NetmgrResult};

/// Top-level CLI verb selecting a network subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Interface,
    Route,
    Firewall,
    Forward,
    Dns,
    Bandwidth,
    Tunnel,
    Diagnostic,
}

impl Command {
    /// Match a command token against the known long and short aliases.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "interface" | "int" => Some(Command::Interface),
            "route" | "rt" => Some(Command::Route),
            "firewall" | "fw" => Some(Command::Firewall),
            "forward" | "fwd" => Some(Command::Forward),
            "dns" => Some(Command::Dns),
            "bandwidth" | "bw" => Some(Command::Bandwidth),
            "tunnel" | "tun" => Some(Command::Tunnel),
            "diagnostic" | "diag" => Some(Command::Diagnostic),
            _ => None,
        }
    }
}

/// Action verb within a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubCommand {
    Show,
    Set,
    Add,
    Remove,
    Delete,
    Flush,
    Save,
    Restore,
}

impl SubCommand {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "show" => Some(SubCommand::Show),
            "set" => Some(SubCommand::Set),
            "add" => Some(SubCommand::Add),
            "remove" => Some(SubCommand::Remove),
            "delete" => Some(SubCommand::Delete),
            "flush" => Some(SubCommand::Flush),
            "save" => Some(SubCommand::Save),
            "restore" => Some(SubCommand::Restore),
            _ => None,
        }
    }
}

/// Parsed global options, created once per invocation and passed by
/// reference to exactly one handler.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub verbose: bool,
    pub dry_run: bool,
    pub force: bool,
    pub command: Command,
    pub subcommand: SubCommand,
    pub args: Vec<String>,
}

/// Outcome of parsing the raw argument vector.
///
/// `Help` and `Version` terminate the process with status 0 before any
/// further parsing; `NoCommand` means the vector ran out of tokens after
/// the flag prefix and maps to usage output with status 1.
#[derive(Debug)]
pub enum Parsed {
    Run(GlobalOptions),
    Help,
    Version,
    NoCommand,
}

/// Parse the raw argument vector (without the program name).
///
/// Deterministic and total: every input vector produces either a `Parsed`
/// value or an error, with no I/O.
pub fn parse<S: AsRef<str>>(args: &[S]) -> NetmgrResult<Parsed> {
    let mut verbose = false;
    let mut dry_run = false;
    let mut force = false;

    // Scan the contiguous flag prefix; stop at the first unrecognized token.
    let mut pos = 0;
    while pos < args.len() {
        match args[pos].as_ref() {
            "-v" | "--verbose" => verbose = true,
            "-n" | "--dry-run" => dry_run = true,
            "-f" | "--force" => force = true,
            "-h" | "--help" => return Ok(Parsed::Help),
            "--version" => return Ok(Parsed::Version),
            _ => break,
        }
        pos += 1;
    }

    let cmd_token = match args.get(pos) {
        Some(token) => token.as_ref(),
        None => return Ok(Parsed::NoCommand),
    };

    let command = Command::from_token(cmd_token).ok_or_else(|| {
        NetmgrError::Usage(format!("Unknown command: {}", cmd_token))
    })?;
    pos += 1;

    // An unrecognized subcommand token is not an error: the subcommand
    // defaults to show and the token is forwarded as the first free
    // argument, where handlers re-interpret it as an action keyword
    // (e.g. "tunnel create", "diagnostic connectivity").
    let mut subcommand = SubCommand::Show;
    let mut free_args: Vec<String> = Vec::new();

    if let Some(token) = args.get(pos) {
        match SubCommand::from_token(token.as_ref()) {
            Some(sub) => subcommand = sub,
            None => free_args.push(token.as_ref().to_string()),
        }
        pos += 1;
        free_args.extend(args[pos..].iter().map(|a| a.as_ref().to_string()));
    }

    Ok(Parsed::Run(GlobalOptions {
        verbose,
        dry_run,
        force,
        command,
        subcommand,
        args: free_args,
    }))
}

pub fn help_text() -> &'static str {
    "netmgr - Cross-platform network management tool

USAGE:
    netmgr [OPTIONS] <COMMAND> [SUBCOMMAND] [ARGS...]

OPTIONS:
    -v, --verbose    Enable verbose output
    -n, --dry-run    Show what would be done without executing
    -f, --force      Force operations without confirmation
    -h, --help       Print help information
        --version    Print version information

COMMANDS:
    interface, int   Network interface management
    route, rt        Routing table management
    firewall, fw     Firewall rules management
    forward, fwd     Port forwarding management
    dns              DNS configuration
    bandwidth, bw    Traffic shaping and QoS
    tunnel, tun      Tunnel interfaces
    diagnostic, diag Network diagnostics

EXAMPLES:
    netmgr interface show
    netmgr interface set eth0 ip 192.168.1.100 24
    netmgr route add 10.0.0.0/24 --via 192.168.1.1 --dev eth0
    netmgr firewall add allow 8080 tcp
    netmgr forward add web 8080 10.0.0.5 80
    netmgr bandwidth limit eth0 10mbit
    netmgr tunnel create tun0 gre 192.168.1.10 203.0.113.5
    netmgr diagnostic connectivity 8.8.8.8
    netmgr diagnostic ports 192.168.1.1 22,80,443"
}

pub fn version_text() -> String {
    format!("netmgr {}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> GlobalOptions {
        match parse(args).unwrap() {
            Parsed::Run(opts) => opts,
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn long_and_short_aliases_map_to_the_same_command() {
        let pairs = [
            ("interface", "int", Command::Interface),
            ("route", "rt", Command::Route),
            ("firewall", "fw", Command::Firewall),
            ("forward", "fwd", Command::Forward),
            ("bandwidth", "bw", Command::Bandwidth),
            ("tunnel", "tun", Command::Tunnel),
            ("diagnostic", "diag", Command::Diagnostic),
        ];
        for (long, short, expected) in pairs {
            assert_eq!(parse_opts(&[long]).command, expected);
            assert_eq!(parse_opts(&[short]).command, expected);
        }
        assert_eq!(parse_opts(&["dns"]).command, Command::Dns);
    }

    #[test]
    fn unknown_command_is_an_error() {
        let err = parse(&["frobnicate"]).unwrap_err();
        assert!(err.to_string().contains("Unknown command: frobnicate"));
    }

    #[test]
    fn flag_prefix_is_consumed_before_the_command() {
        let opts = parse_opts(&["-v", "-n", "--force", "route", "show"]);
        assert!(opts.verbose);
        assert!(opts.dry_run);
        assert!(opts.force);
        assert_eq!(opts.command, Command::Route);
        assert_eq!(opts.subcommand, SubCommand::Show);
        assert!(opts.args.is_empty());
    }

    #[test]
    fn flags_after_the_command_become_free_arguments() {
        let opts = parse_opts(&["route", "add", "10.0.0.0/24", "--via", "192.168.1.1"]);
        assert_eq!(opts.subcommand, SubCommand::Add);
        assert_eq!(opts.args, vec!["10.0.0.0/24", "--via", "192.168.1.1"]);
    }

    #[test]
    fn unrecognized_subcommand_falls_back_to_show_and_is_retained() {
        let opts = parse_opts(&["tunnel", "create", "tun0", "gre", "10.0.0.1", "10.0.0.2"]);
        assert_eq!(opts.command, Command::Tunnel);
        assert_eq!(opts.subcommand, SubCommand::Show);
        assert_eq!(opts.args[0], "create");
        assert_eq!(opts.args.len(), 5);
    }

    #[test]
    fn missing_subcommand_defaults_to_show_with_empty_args() {
        let opts = parse_opts(&["interface"]);
        assert_eq!(opts.subcommand, SubCommand::Show);
        assert!(opts.args.is_empty());
    }

    #[test]
    fn unknown_flag_stops_the_flag_scan() {
        // The unrecognized token is then matched as a command and rejected.
        let err = parse(&["-x", "route", "show"]).unwrap_err();
        assert!(err.to_string().contains("Unknown command: -x"));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert!(matches!(parse(&["--help"]).unwrap(), Parsed::Help));
        assert!(matches!(parse(&["-h", "route"]).unwrap(), Parsed::Help));
        assert!(matches!(parse(&["--version"]).unwrap(), Parsed::Version));
    }

    #[test]
    fn empty_vector_yields_no_command() {
        let empty: [&str; 0] = [];
        assert!(matches!(parse(&empty).unwrap(), Parsed::NoCommand));
        assert!(matches!(parse(&["-v"]).unwrap(), Parsed::NoCommand));
    }

    #[test]
    fn all_subcommand_keywords_are_recognized() {
        let cases = [
            ("show", SubCommand::Show),
            ("set", SubCommand::Set),
            ("add", SubCommand::Add),
            ("remove", SubCommand::Remove),
            ("delete", SubCommand::Delete),
            ("flush", SubCommand::Flush),
            ("save", SubCommand::Save),
            ("restore", SubCommand::Restore),
        ];
        for (token, expected) in cases {
            let opts = parse_opts(&["firewall", token]);
            assert_eq!(opts.subcommand, expected);
            assert!(opts.args.is_empty());
        }
    }
}
