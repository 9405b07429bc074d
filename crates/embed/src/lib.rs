//! Browser embedding layer.
//!
//! This crate describes the contract the shell consumes from a native
//! browser-embedding library and provides:
//! - Application, client and browser traits
//! - Display and focus notification handlers
//! - Platform detection and native bundle installation
//! - A thread-safe application builder
//! - An in-process headless engine implementing the contract

pub mod app;
pub mod browser;
pub mod builder;
pub mod client;
pub mod handler;
pub mod headless;
pub mod installer;
pub mod platform;
pub mod settings;

pub use app::{AppState, EmbeddingApp};
pub use browser::{Browser, BrowserId, BrowserKey, Frame, UiSurface};
pub use builder::{AppBuilder, EngineInitializer};
pub use client::{Client, MessageRouterConfig};
pub use handler::{DisplayHandler, FocusHandler};
pub use headless::{HeadlessApp, HeadlessInitializer};
pub use installer::NativeBundle;
pub use platform::{Arch, Os, Platform};
pub use settings::{EmbedSettings, LogSeverity};
