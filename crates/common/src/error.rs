//! Common error types.

use thiserror::Error;

/// Main error type for the browser shell.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not determine platform for os.name={os_name} and os.arch={os_arch}")]
    UnsupportedPlatform { os_name: String, os_arch: String },

    #[error("Native bundle not found: {0}")]
    BundleNotFound(String),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Window error: {0}")]
    Window(String),
}

pub type ShellResult<T> = Result<T, ShellError>;

impl ShellError {
    pub fn unsupported_platform(os_name: impl Into<String>, os_arch: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            os_name: os_name.into(),
            os_arch: os_arch.into(),
        }
    }

    pub fn bundle_not_found(msg: impl Into<String>) -> Self {
        Self::BundleNotFound(msg.into())
    }

    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }
}
