//! Application shell.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use common::{Point, ShellResult};
use embed::{Browser, BrowserKey, Client, EmbeddingApp, MessageRouterConfig};
use tracing::{debug, info, trace};
use ui::{
    AddressField, AddressFieldAction, Component, FocusArbiter, FocusOwner, FocusSink, Key,
    ShellWindow, Slot, ToolkitEvent, Widget,
};

use crate::config::ShellConfig;
use crate::events::{EventForwarder, ShellEvent};

/// Focus calls issued by the arbiter since startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FocusCalls {
    pub clear_global: usize,
    pub address_field: usize,
    pub browser: usize,
}

/// One window holding an address field and a browser.
pub struct Shell {
    app: Arc<dyn EmbeddingApp>,
    // Keeps the handlers registered for the browser's lifetime.
    _client: Box<dyn Client>,
    browser: Arc<dyn Browser>,
    window: ShellWindow,
    address: AddressField,
    arbiter: FocusArbiter,
    focus_calls: FocusCalls,
    events: Receiver<ShellEvent>,
    closed: bool,
}

impl Shell {
    /// Create the client, browser and window, and show the window.
    ///
    /// Any failure aborts startup; there is no partial shell.
    pub fn start(app: Arc<dyn EmbeddingApp>, config: &ShellConfig) -> ShellResult<Self> {
        let mut client = app.create_client()?;
        client.add_message_router(MessageRouterConfig::default());

        let browser = client.create_browser(
            &config.start_url,
            config.use_offscreen_rendering,
            config.transparent,
        )?;
        let surface = browser.ui_surface();

        let address = AddressField::new(&config.start_url, config.address_columns);

        let (tx, events) = mpsc::channel();
        client.add_display_handler(Box::new(EventForwarder::new(tx.clone())));
        client.add_focus_handler(Box::new(EventForwarder::new(tx)));

        let mut window = ShellWindow::new(&config.title);
        window.add(
            Component::AddressField {
                columns: address.columns(),
            },
            Slot::North,
        );
        window.add(Component::BrowserSurface(surface), Slot::Center);
        window.attach_native_view(Arc::clone(&browser));
        window.pack();
        window.set_size(config.window_width, config.window_height);
        window.show();

        // The browser view starts out with keyboard focus.
        browser.set_focus(true);

        info!(url = %config.start_url, browser = browser.id().0, "Shell started");

        let mut shell = Self {
            app,
            _client: client,
            browser,
            window,
            address,
            arbiter: FocusArbiter::new(),
            focus_calls: FocusCalls::default(),
            events,
            closed: false,
        };
        shell.pump();
        Ok(shell)
    }

    pub fn address(&self) -> &AddressField {
        &self.address
    }

    pub fn window(&self) -> &ShellWindow {
        &self.window
    }

    pub fn browser(&self) -> &dyn Browser {
        self.browser.as_ref()
    }

    pub fn app(&self) -> &Arc<dyn EmbeddingApp> {
        &self.app
    }

    /// Widget the arbiter considers focused.
    pub fn focus_owner(&self) -> FocusOwner {
        self.arbiter.owner()
    }

    pub fn focus_calls(&self) -> FocusCalls {
        self.focus_calls
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Handle `event` and everything it triggers.
    pub fn handle_event(&mut self, event: ShellEvent) {
        self.dispatch(event);
        self.pump();
    }

    /// Handle queued notifications until none remain.
    ///
    /// Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let event = match self.window.poll_event() {
                Some(event) => ShellEvent::Toolkit(event),
                None => match self.events.try_recv() {
                    Ok(event) => event,
                    Err(_) => break,
                },
            };
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Navigate the browser.
    pub fn load_url(&mut self, url: &str) {
        if self.closed {
            return;
        }
        info!(url, "Loading");
        self.browser.load_url(url);
        self.pump();
    }

    /// Route a key press to the focused widget.
    pub fn key_pressed(&mut self, key: Key) {
        if self.closed {
            return;
        }

        if self.window.focus_owner() == Some(Widget::AddressField) {
            match self.address.on_key(key) {
                Some(AddressFieldAction::Submit(url)) => {
                    info!(%url, "Loading");
                    self.browser.load_url(&url);
                }
                Some(AddressFieldAction::FocusNext { forward }) => {
                    self.window.transfer_focus(Widget::AddressField, forward);
                }
                None => {}
            }
        } else if let Some(key) = browser_key(key) {
            self.browser.send_key_event(key);
        }

        self.pump();
    }

    /// Handle a primary click at `point` in window coordinates.
    pub fn click(&mut self, point: Point) {
        match self.window.layout().hit_test(self.window.size(), point) {
            Some(Slot::North) => self.address_clicked(),
            Some(Slot::Center) => self.surface_clicked(),
            None => {}
        }
    }

    /// The user clicked into the address field.
    pub fn address_clicked(&mut self) {
        if self.closed {
            return;
        }
        self.window.request_focus(Widget::AddressField);
        self.pump();
    }

    /// The user clicked into the browser view.
    pub fn surface_clicked(&mut self) {
        if self.closed {
            return;
        }
        self.browser.set_focus(true);
        self.pump();
    }

    /// The window was resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.window.set_size(width, height);
    }

    /// Close the window and shut the browser down.
    pub fn close(&mut self) {
        self.handle_event(ShellEvent::WindowClosing);
    }

    fn dispatch(&mut self, event: ShellEvent) {
        if self.closed {
            trace!(?event, "Shell closed, dropping event");
            return;
        }
        trace!(?event, "Dispatching");

        let browser_id = self.browser.id();
        match event {
            ShellEvent::AddressChanged { browser, url, .. } => {
                if browser == browser_id {
                    self.address.set_text(&url);
                }
            }
            ShellEvent::BrowserGotFocus(browser) => {
                if browser == browser_id {
                    let mut sink = WindowFocusSink {
                        window: &mut self.window,
                        browser: self.browser.as_ref(),
                        calls: &mut self.focus_calls,
                    };
                    self.arbiter.on_browser_got_focus(&mut sink);
                }
            }
            ShellEvent::BrowserTakeFocus { browser, next } => {
                if browser == browser_id {
                    self.arbiter.on_browser_take_focus(next);
                    self.window.transfer_focus(Widget::BrowserView, next);
                }
            }
            ShellEvent::Toolkit(ToolkitEvent::FocusGained(Widget::AddressField)) => {
                let mut sink = WindowFocusSink {
                    window: &mut self.window,
                    browser: self.browser.as_ref(),
                    calls: &mut self.focus_calls,
                };
                self.arbiter.on_address_field_focus_gained(&mut sink);
            }
            ShellEvent::Toolkit(ToolkitEvent::FocusGained(Widget::BrowserView)) => {
                self.browser.set_focus(true);
            }
            ShellEvent::WindowClosing => self.shutdown(),
        }
    }

    fn shutdown(&mut self) {
        info!("Window closing, disposing browser");
        self.app.dispose();
        self.window.dispose();
        self.closed = true;
        debug!("Shell closed");
    }
}

/// Focus calls applied to the shell window and browser.
struct WindowFocusSink<'a> {
    window: &'a mut ShellWindow,
    browser: &'a dyn Browser,
    calls: &'a mut FocusCalls,
}

impl FocusSink for WindowFocusSink<'_> {
    fn clear_global_focus_owner(&mut self) {
        self.calls.clear_global += 1;
        self.window.clear_global_focus_owner();
    }

    fn focus_address_field(&mut self) {
        self.calls.address_field += 1;
        self.window.request_focus(Widget::AddressField);
    }

    fn focus_browser(&mut self) {
        self.calls.browser += 1;
        self.browser.set_focus(true);
    }
}

fn browser_key(key: Key) -> Option<BrowserKey> {
    match key {
        Key::Char(c) => Some(BrowserKey::Char(c)),
        Key::Enter => Some(BrowserKey::Enter),
        Key::Backspace => Some(BrowserKey::Backspace),
        Key::Tab => Some(BrowserKey::Tab { shift: false }),
        Key::BackTab => Some(BrowserKey::Tab { shift: true }),
        _ => None,
    }
}
