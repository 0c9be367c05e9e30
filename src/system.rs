//! Privilege and dependency gating, run before dispatch
//!
//! Both gates are skipped in dry-run mode: nothing is executed there, so
//! neither elevated privileges nor the external tools are needed.

use crate::error::{NetmgrError, NetmgrResult};
use crate::platform::Platform;

/// Check if the current process is running as root.
pub fn is_root() -> bool {
    #[cfg(unix)]
    {
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        // Windows privilege checks are delegated to the wrapped tools,
        // which report access errors themselves.
        true
    }
}

/// Verify elevated privileges for mutating operation families.
pub fn check_privileges() -> NetmgrResult<()> {
    if is_root() {
        return Ok(());
    }
    Err(NetmgrError::PermissionDenied(
        "this tool requires administrator privileges (run with sudo, or use --dry-run)"
            .to_string(),
    ))
}

/// Verify the platform's required external tools resolve on the search path.
pub fn check_dependencies(platform: &dyn Platform) -> NetmgrResult<()> {
    for tool in platform.required_tools() {
        which::which(tool)
            .map_err(|_| NetmgrError::MissingDependency((*tool).to_string()))?;
    }
    Ok(())
}
