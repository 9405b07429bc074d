//! Embedded browser shell.
//!
//! This crate puts an embedded browser and an address field into one
//! window:
//! - Startup and shutdown sequencing
//! - Routing of browser and toolkit notifications
//! - Shell configuration
//! - A winit host driving the shell

pub mod app;
pub mod config;
pub mod events;
pub mod host;

pub use app::Shell;
pub use config::ShellConfig;
pub use events::ShellEvent;
pub use host::ShellHost;

/// Shell version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
