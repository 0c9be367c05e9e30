//! Synchronous process execution with dry-run support
//!
//! Every external invocation in the program funnels through [`Executor`].
//! In dry-run mode nothing is spawned: each call logs the fully-assembled
//! command line and reports synthetic success.

use crate::error::{NetmgrError, NetmgrResult};
use crate::platform::Invocation;
use std::process::{Command, Stdio};
use tracing::{debug, info};

pub struct Executor {
    dry_run: bool,
}

impl Executor {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Run an invocation with inherited stdio, returning the child's exit
    /// status. Failure to start the child is an error; a non-zero exit is
    /// not — the status propagates to the caller unchanged.
    pub fn run(&self, inv: &Invocation) -> NetmgrResult<i32> {
        let line = inv.command_line();
        if self.dry_run {
            info!("would execute: {}", line);
            return Ok(0);
        }

        debug!("executing: {}", line);
        let status = Command::new(&inv.program)
            .args(&inv.args)
            .status()
            .map_err(|e| NetmgrError::CommandFailed { cmd: line, source: e })?;
        Ok(status.code().unwrap_or(1))
    }

    /// Like [`Executor::run`] but with suppressed output, for probes whose
    /// exit status is the only interesting result.
    pub fn run_quiet(&self, inv: &Invocation) -> NetmgrResult<i32> {
        let line = inv.command_line();
        if self.dry_run {
            info!("would execute: {}", line);
            return Ok(0);
        }

        debug!("executing: {}", line);
        let status = Command::new(&inv.program)
            .args(&inv.args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| NetmgrError::CommandFailed { cmd: line, source: e })?;
        Ok(status.code().unwrap_or(1))
    }

    /// Execute and capture the child's combined output as text, for
    /// show-style handlers that parse it afterwards. A child that cannot
    /// be started yields an empty string.
    pub fn capture(&self, inv: &Invocation) -> String {
        let line = inv.command_line();
        if self.dry_run {
            info!("would execute: {}", line);
            return String::new();
        }

        debug!("executing: {}", line);
        match Command::new(&inv.program).args(&inv.args).output() {
            Ok(output) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                text
            }
            Err(_) => String::new(),
        }
    }
}
