//! Construction of the embedding application.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::ShellResult;
use once_cell::sync::OnceCell;
use tracing::info;

use crate::app::EmbeddingApp;
use crate::installer::{self, NativeBundle};
use crate::platform::Platform;
use crate::settings::EmbedSettings;

/// Default installation directory for native bundles.
pub const DEFAULT_INSTALL_DIR: &str = "cef-bundle";

/// Brings up a concrete engine once its native files are in place.
pub trait EngineInitializer {
    fn initialize(
        &self,
        install_dir: &Path,
        args: &[String],
        settings: &EmbedSettings,
    ) -> ShellResult<Arc<dyn EmbeddingApp>>;
}

/// Configures and builds the process-wide [`EmbeddingApp`].
///
/// ```no_run
/// use embed::{AppBuilder, HeadlessInitializer};
///
/// let mut builder = AppBuilder::new();
/// builder.set_install_dir("natives");
/// builder.add_args(["--disable-gpu"]);
/// builder.settings_mut().windowless_rendering_enabled = true;
///
/// let app = builder.build(&HeadlessInitializer)?;
/// # Ok::<(), common::ShellError>(())
/// ```
pub struct AppBuilder {
    install_dir: PathBuf,
    args: Vec<String>,
    settings: EmbedSettings,
    bundle: Option<NativeBundle>,
    platform: Option<Platform>,
    instance: OnceCell<Arc<dyn EmbeddingApp>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            args: Vec::new(),
            settings: EmbedSettings::default(),
            bundle: None,
            platform: None,
            instance: OnceCell::new(),
        }
    }

    pub fn set_install_dir(&mut self, install_dir: impl Into<PathBuf>) {
        self.install_dir = install_dir.into();
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Add engine command-line arguments. Arguments may contain spaces.
    pub fn add_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn settings(&self) -> &EmbedSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EmbedSettings {
        &mut self.settings
    }

    /// Install natives from `bundle` before initializing.
    pub fn set_bundle(&mut self, bundle: NativeBundle) {
        self.bundle = Some(bundle);
    }

    /// Override platform detection for bundle selection.
    pub fn set_platform(&mut self, platform: Platform) {
        self.platform = Some(platform);
    }

    /// Whether an instance has already been built.
    pub fn is_built(&self) -> bool {
        self.instance.get().is_some()
    }

    /// Build the application, or return the one built earlier.
    ///
    /// Concurrent callers block until the first build completes and then
    /// share its result. A failed build may be retried.
    pub fn build(&self, initializer: &dyn EngineInitializer) -> ShellResult<Arc<dyn EmbeddingApp>> {
        self.instance
            .get_or_try_init(|| self.initialize(initializer))
            .map(Arc::clone)
    }

    fn initialize(&self, initializer: &dyn EngineInitializer) -> ShellResult<Arc<dyn EmbeddingApp>> {
        if let Some(bundle) = &self.bundle {
            if installer::is_installed(&self.install_dir) {
                info!(install_dir = %self.install_dir.display(), "Native bundle already installed");
            } else {
                let platform = match self.platform {
                    Some(platform) => platform,
                    None => Platform::current()?,
                };
                installer::install(bundle, &platform, &self.install_dir)?;
            }
        }

        info!(args = ?self.args, "Initializing embedding engine");
        initializer.initialize(&self.install_dir, &self.args, &self.settings)
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
