//! Error types for netmgr

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetmgrError {
    /// Missing or malformed arguments; the message is the usage line
    #[error("{0}")]
    Usage(String),
    /// Child process could not be started
    #[error("Command '{cmd}' failed: {source}")]
    CommandFailed { cmd: String, source: io::Error },
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Feature not available on the current platform family
    #[error("Not supported: {0}")]
    NotSupported(String),
    /// Required external tool absent from the search path
    #[error("Required tool not found: {0}")]
    MissingDependency(String),
    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<serde_json::Error> for NetmgrError {
    fn from(error: serde_json::Error) -> Self {
        NetmgrError::ParseError(error.to_string())
    }
}

pub type NetmgrResult<T> = Result<T, NetmgrError>;
