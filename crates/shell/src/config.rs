//! Shell configuration.

use std::path::PathBuf;

use embed::builder::DEFAULT_INSTALL_DIR;
use embed::{AppBuilder, EmbedSettings, NativeBundle};
use ui::address_field::DEFAULT_COLUMNS;

/// Page shown when no URL is given.
pub const DEFAULT_START_URL: &str = "https://www.google.com";

/// Shell configuration.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// First page to load.
    pub start_url: String,
    /// Render the browser off-screen.
    pub use_offscreen_rendering: bool,
    /// Render the browser with a transparent background.
    pub transparent: bool,
    /// Window title.
    pub title: String,
    /// Window width.
    pub window_width: u32,
    /// Window height.
    pub window_height: u32,
    /// Address field width in columns.
    pub address_columns: usize,
    /// Directory the engine natives are installed into.
    pub install_dir: PathBuf,
    /// Extra engine command-line arguments.
    pub engine_args: Vec<String>,
    /// Native archives to install on first run.
    pub bundle: Option<NativeBundle>,
    /// Engine settings.
    pub settings: EmbedSettings,
}

impl ShellConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start URL.
    pub fn with_start_url(mut self, url: &str) -> Self {
        self.start_url = url.to_string();
        self
    }

    /// Set off-screen rendering.
    pub fn with_offscreen_rendering(mut self, enabled: bool) -> Self {
        self.use_offscreen_rendering = enabled;
        self
    }

    /// Set transparency.
    pub fn with_transparency(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Set window size.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set the install directory.
    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = dir.into();
        self
    }

    /// Add an engine argument.
    pub fn with_engine_arg(mut self, arg: &str) -> Self {
        self.engine_args.push(arg.to_string());
        self
    }

    /// Set the native bundle.
    pub fn with_bundle(mut self, bundle: NativeBundle) -> Self {
        self.bundle = Some(bundle);
        self
    }

    /// Set the engine settings.
    pub fn with_settings(mut self, settings: EmbedSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder for the embedding application described by this config.
    pub fn app_builder(&self) -> AppBuilder {
        let mut builder = AppBuilder::new();
        builder.set_install_dir(&self.install_dir);
        builder.add_args(self.engine_args.iter().cloned());
        *builder.settings_mut() = self.settings.clone();
        if let Some(bundle) = &self.bundle {
            builder.set_bundle(bundle.clone());
        }
        builder
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            use_offscreen_rendering: false,
            transparent: false,
            title: "Embedded Browser".to_string(),
            window_width: 800,
            window_height: 600,
            address_columns: DEFAULT_COLUMNS,
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            engine_args: Vec::new(),
            bundle: None,
            settings: EmbedSettings::default(),
        }
    }
}
