//! DNS configuration
//!
//! The command is declared and dispatchable, but resolver management is
//! delegated to the platform's resolver service and no handlers are
//! implemented here.

use crate::cli::GlobalOptions;
use crate::error::{NetmgrError, NetmgrResult};
use crate::exec::Executor;
use crate::platform::Platform;

pub fn handle(
    _opts: &GlobalOptions,
    _platform: &dyn Platform,
    _exec: &Executor,
) -> NetmgrResult<i32> {
    Err(NetmgrError::NotSupported(
        "DNS configuration is delegated to the platform resolver service".to_string(),
    ))
}
