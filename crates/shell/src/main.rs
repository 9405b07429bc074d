//! Embedded browser shell.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use embed::{EmbedSettings, HeadlessInitializer, LogSeverity, NativeBundle};
use shell::config::DEFAULT_START_URL;
use shell::{Shell, ShellConfig, ShellHost};

/// Embedded browser shell - an address field over a browser view
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL to open
    #[arg(default_value = DEFAULT_START_URL)]
    url: String,

    /// Render the browser off-screen
    #[arg(long)]
    offscreen: bool,

    /// Render the browser with a transparent background
    #[arg(long)]
    transparent: bool,

    /// Window width
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height
    #[arg(long, default_value = "600")]
    height: u32,

    /// Directory the engine natives are installed into
    #[arg(long)]
    install_dir: Option<PathBuf>,

    /// Directory holding the native archives
    #[arg(long, requires = "release_tag")]
    bundle_dir: Option<PathBuf>,

    /// Release tag of the native archives
    #[arg(long, requires = "bundle_dir")]
    release_tag: Option<String>,

    /// Extra engine argument (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Engine locale, e.g. en-US
    #[arg(long)]
    locale: Option<String>,

    /// Persistent cache directory
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// User agent override
    #[arg(long)]
    user_agent: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> ShellConfig {
        let mut config = ShellConfig::new()
            .with_start_url(&self.url)
            .with_offscreen_rendering(self.offscreen)
            .with_transparency(self.transparent)
            .with_window_size(self.width, self.height);

        if let Some(dir) = &self.install_dir {
            config = config.with_install_dir(dir);
        }
        if let (Some(dir), Some(tag)) = (&self.bundle_dir, &self.release_tag) {
            config = config.with_bundle(NativeBundle::new(dir, tag));
        }
        for arg in &self.engine_args {
            config = config.with_engine_arg(arg);
        }
        config.with_settings(self.settings())
    }

    fn settings(&self) -> EmbedSettings {
        let mut settings = EmbedSettings::new();
        if self.verbose {
            settings = settings.with_log_severity(LogSeverity::Verbose);
        }
        if let Some(locale) = &self.locale {
            settings = settings.with_locale(locale);
        }
        if let Some(path) = &self.cache_path {
            settings = settings.with_cache_path(path);
        }
        if let Some(user_agent) = &self.user_agent {
            settings = settings.with_user_agent(user_agent);
        }
        settings
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Embedded browser shell v{}", shell::VERSION);

    let config = args.config();
    let builder = config.app_builder();
    info!(install_dir = %builder.install_dir().display(), "Initializing engine...");
    let app = builder.build(&HeadlessInitializer)?;

    let shell = Shell::start(app, &config)?;
    ShellHost::run(shell)?;

    info!("Shell shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["cef-shell"]);
        assert_eq!(args.url, DEFAULT_START_URL);
        assert!(!args.offscreen);
        assert!(!args.transparent);
        assert_eq!((args.width, args.height), (800, 600));
    }

    #[test]
    fn test_args_with_url() {
        let args = Args::parse_from(["cef-shell", "https://example.com"]);
        assert_eq!(args.config().start_url, "https://example.com");
    }

    #[test]
    fn test_args_bundle_requires_tag() {
        assert!(Args::try_parse_from(["cef-shell", "--bundle-dir", "natives"]).is_err());

        let args = Args::parse_from([
            "cef-shell",
            "--bundle-dir",
            "natives",
            "--release-tag",
            "v1.0",
        ]);
        let bundle = args.config().bundle.unwrap();
        assert_eq!(bundle.bundle_dir, Path::new("natives"));
        assert_eq!(bundle.release_tag, "v1.0");
    }

    #[test]
    fn test_args_engine_args() {
        let args = Args::parse_from([
            "cef-shell",
            "--offscreen",
            "--engine-arg",
            "--disable-gpu",
            "--engine-arg",
            "--lang=en",
        ]);
        let config = args.config();
        assert!(config.use_offscreen_rendering);
        assert_eq!(config.engine_args, ["--disable-gpu", "--lang=en"]);
    }

    #[test]
    fn test_args_engine_settings() {
        let args = Args::parse_from([
            "cef-shell",
            "-v",
            "--locale",
            "nl-NL",
            "--user-agent",
            "cef-shell/0.1",
            "--cache-path",
            "cache",
        ]);
        let settings = args.config().settings;
        assert_eq!(settings.log_severity, LogSeverity::Verbose);
        assert_eq!(settings.locale.as_deref(), Some("nl-NL"));
        assert_eq!(settings.user_agent.as_deref(), Some("cef-shell/0.1"));
        assert_eq!(settings.cache_path.as_deref(), Some(Path::new("cache")));
    }
}
