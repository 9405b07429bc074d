//! Common utilities and types shared by the shell crates.

pub mod error;
pub mod geometry;

pub use error::{ShellError, ShellResult};
pub use geometry::{Point, Rect, Size};
