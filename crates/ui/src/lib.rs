//! Browser shell UI.
//!
//! This crate provides the toolkit side of the shell:
//! - Focus arbitration between address field and browser
//! - Address field
//! - Border layout
//! - Shell window

pub mod address_field;
pub mod focus;
pub mod layout;
pub mod window;

pub use address_field::{AddressField, AddressFieldAction, Key};
pub use focus::{FocusArbiter, FocusOwner, FocusSink};
pub use layout::{BorderLayout, Component, Slot, Widget};
pub use window::{ShellWindow, ToolkitEvent, WindowDimensions};
