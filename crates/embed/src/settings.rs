//! Engine settings passed at initialization.

use std::path::PathBuf;

/// Log severity of the embedded engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogSeverity {
    #[default]
    Default,
    Verbose,
    Info,
    Warning,
    Error,
    Disable,
}

/// Engine settings.
#[derive(Clone, Debug)]
pub struct EmbedSettings {
    /// Allow browsers to render off-screen.
    pub windowless_rendering_enabled: bool,
    /// Engine log severity.
    pub log_severity: LogSeverity,
    /// Locale, e.g. `en-US`. Engine default when unset.
    pub locale: Option<String>,
    /// Persistent cache directory. In-memory cache when unset.
    pub cache_path: Option<PathBuf>,
    /// User agent override.
    pub user_agent: Option<String>,
}

impl EmbedSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_windowless_rendering(mut self, enabled: bool) -> Self {
        self.windowless_rendering_enabled = enabled;
        self
    }

    pub fn with_log_severity(mut self, severity: LogSeverity) -> Self {
        self.log_severity = severity;
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            windowless_rendering_enabled: true,
            log_severity: LogSeverity::Default,
            locale: None,
            cache_path: None,
            user_agent: None,
        }
    }
}
