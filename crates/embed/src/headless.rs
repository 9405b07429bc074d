//! In-process headless engine.
//!
//! Implements the embedding contract without a native library: browsers
//! keep their navigation and focus state in memory and raise the same
//! notifications a native engine would. The shell uses it when no native
//! engine is linked in, and tests use it to drive the event flow.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use common::{ShellError, ShellResult};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace, warn};
use url::Url;

use crate::app::{AppState, EmbeddingApp};
use crate::browser::{Browser, BrowserId, BrowserKey, Frame, UiSurface};
use crate::builder::EngineInitializer;
use crate::client::{Client, MessageRouterConfig};
use crate::handler::{DisplayHandler, FocusHandler};
use crate::settings::EmbedSettings;

/// Initializer producing a [`HeadlessApp`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessInitializer;

impl EngineInitializer for HeadlessInitializer {
    fn initialize(
        &self,
        install_dir: &Path,
        args: &[String],
        settings: &EmbedSettings,
    ) -> ShellResult<Arc<dyn EmbeddingApp>> {
        debug!(install_dir = %install_dir.display(), "Starting headless engine");
        if let Some(cache_path) = &settings.cache_path {
            fs::create_dir_all(cache_path)?;
        }
        Ok(Arc::new(HeadlessApp::new(settings.clone(), args.to_vec())))
    }
}

struct AppInner {
    settings: EmbedSettings,
    args: Vec<String>,
    state: RwLock<AppState>,
    browsers: Mutex<Vec<Arc<HeadlessBrowser>>>,
    next_browser_id: AtomicU64,
}

/// Headless embedding application.
pub struct HeadlessApp {
    inner: Arc<AppInner>,
}

impl HeadlessApp {
    pub fn new(settings: EmbedSettings, args: Vec<String>) -> Self {
        let inner = Arc::new(AppInner {
            settings,
            args,
            state: RwLock::new(AppState::New),
            browsers: Mutex::new(Vec::new()),
            next_browser_id: AtomicU64::new(1),
        });

        *inner.state.write() = AppState::Initializing;
        *inner.state.write() = AppState::Initialized;

        let settings = &inner.settings;
        info!(
            locale = settings.locale.as_deref().unwrap_or("default"),
            log_severity = ?settings.log_severity,
            windowless = settings.windowless_rendering_enabled,
            "Headless engine initialized"
        );
        if let Some(cache_path) = &settings.cache_path {
            debug!(cache_path = %cache_path.display(), "Using persistent cache");
        }
        if let Some(user_agent) = &settings.user_agent {
            debug!(user_agent = %user_agent, "User agent override");
        }

        Self { inner }
    }

    /// Engine arguments the application was started with.
    pub fn args(&self) -> &[String] {
        &self.inner.args
    }

    /// Number of browsers still open.
    pub fn browser_count(&self) -> usize {
        self.inner.browsers.lock().len()
    }
}

impl EmbeddingApp for HeadlessApp {
    fn state(&self) -> AppState {
        *self.inner.state.read()
    }

    fn create_client(&self) -> ShellResult<Box<dyn Client>> {
        let state = self.state();
        if !state.is_running() {
            return Err(ShellError::invalid(format!(
                "cannot create a client while the engine is {:?}",
                state
            )));
        }

        Ok(Box::new(HeadlessClient {
            app: Arc::clone(&self.inner),
            handlers: Arc::new(Mutex::new(HandlerSet::default())),
            routers: Vec::new(),
        }))
    }

    fn dispose(&self) {
        {
            let mut state = self.inner.state.write();
            if matches!(*state, AppState::ShuttingDown | AppState::Terminated) {
                debug!("Headless engine already disposed");
                return;
            }
            *state = AppState::ShuttingDown;
        }

        let browsers: Vec<_> = self.inner.browsers.lock().drain(..).collect();
        for browser in &browsers {
            browser.close();
        }

        *self.inner.state.write() = AppState::Terminated;
        info!(closed = browsers.len(), "Headless engine disposed");
    }
}

impl Drop for HeadlessApp {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[derive(Default)]
struct HandlerSet {
    display: Vec<Arc<dyn DisplayHandler>>,
    focus: Vec<Arc<dyn FocusHandler>>,
}

struct HeadlessClient {
    app: Arc<AppInner>,
    handlers: Arc<Mutex<HandlerSet>>,
    routers: Vec<MessageRouterConfig>,
}

impl Client for HeadlessClient {
    fn add_message_router(&mut self, config: MessageRouterConfig) {
        debug!(query = %config.js_query_function, "Message router added");
        self.routers.push(config);
    }

    fn add_display_handler(&mut self, handler: Box<dyn DisplayHandler>) {
        self.handlers.lock().display.push(Arc::from(handler));
    }

    fn add_focus_handler(&mut self, handler: Box<dyn FocusHandler>) {
        self.handlers.lock().focus.push(Arc::from(handler));
    }

    fn create_browser(
        &mut self,
        url: &str,
        offscreen: bool,
        transparent: bool,
    ) -> ShellResult<Arc<dyn Browser>> {
        if !self.app.state.read().is_running() {
            return Err(ShellError::invalid("engine is not running"));
        }
        if offscreen && !self.app.settings.windowless_rendering_enabled {
            return Err(ShellError::invalid(
                "off-screen browsers require windowless rendering to be enabled",
            ));
        }

        let id = BrowserId(self.app.next_browser_id.fetch_add(1, Ordering::SeqCst));
        let browser = Arc::new(HeadlessBrowser {
            id,
            surface: UiSurface {
                browser: id,
                offscreen,
                transparent,
            },
            url: RwLock::new(normalize(url)),
            focused: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            handlers: Arc::clone(&self.handlers),
        });
        self.app.browsers.lock().push(Arc::clone(&browser));

        info!(browser = id.0, url, offscreen, transparent, "Browser created");
        Ok(browser)
    }
}

/// Headless browser.
pub struct HeadlessBrowser {
    id: BrowserId,
    surface: UiSurface,
    url: RwLock<String>,
    focused: AtomicBool,
    closed: AtomicBool,
    handlers: Arc<Mutex<HandlerSet>>,
}

impl HeadlessBrowser {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.focused.store(false, Ordering::SeqCst);
        debug!(browser = self.id.0, "Browser closed");
    }

    fn display_handlers(&self) -> Vec<Arc<dyn DisplayHandler>> {
        self.handlers.lock().display.clone()
    }

    fn focus_handlers(&self) -> Vec<Arc<dyn FocusHandler>> {
        self.handlers.lock().focus.clone()
    }
}

impl Browser for HeadlessBrowser {
    fn id(&self) -> BrowserId {
        self.id
    }

    fn ui_surface(&self) -> UiSurface {
        self.surface
    }

    fn url(&self) -> String {
        self.url.read().clone()
    }

    fn load_url(&self, url: &str) {
        if self.is_closed() {
            warn!(browser = self.id.0, url, "Ignoring navigation of a closed browser");
            return;
        }

        let address = normalize(url);
        *self.url.write() = address.clone();
        debug!(browser = self.id.0, %address, "Navigated");

        let frame = Frame::main();
        for handler in self.display_handlers() {
            handler.on_address_change(self, &frame, &address);
        }
    }

    fn set_focus(&self, focus: bool) {
        if self.is_closed() {
            return;
        }
        let was_focused = self.focused.swap(focus, Ordering::SeqCst);
        if focus && !was_focused {
            trace!(browser = self.id.0, "Got focus");
            for handler in self.focus_handlers() {
                handler.on_got_focus(self);
            }
        }
    }

    fn has_focus(&self) -> bool {
        self.focused.load(Ordering::SeqCst)
    }

    fn send_key_event(&self, key: BrowserKey) {
        if !self.has_focus() {
            return;
        }
        match key {
            BrowserKey::Tab { shift } => {
                // Tabbing past the last element hands focus back to the host.
                self.focused.store(false, Ordering::SeqCst);
                trace!(browser = self.id.0, next = !shift, "Taking focus");
                for handler in self.focus_handlers() {
                    handler.on_take_focus(self, !shift);
                }
            }
            other => trace!(browser = self.id.0, key = ?other, "Key event"),
        }
    }
}

/// Canonical form of an address, as a native engine would report it.
fn normalize(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.to_string(),
        Err(err) => {
            warn!(url, %err, "Loading unparsed address");
            url.to_string()
        }
    }
}
