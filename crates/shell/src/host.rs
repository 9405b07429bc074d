//! winit host driving the shell.

use common::{Point, ShellError, ShellResult};
use tracing::{debug, error, info};
use ui::Key;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key as LogicalKey, ModifiersState, NamedKey},
    window::{Window, WindowId},
};

use crate::app::Shell;

/// Native window host forwarding input into a [`Shell`].
pub struct ShellHost {
    shell: Shell,
    window: Option<Window>,
    cursor: Point,
    modifiers: ModifiersState,
    title: String,
    error: Option<ShellError>,
}

impl ShellHost {
    pub fn new(shell: Shell) -> Self {
        Self {
            shell,
            window: None,
            cursor: Point::ZERO,
            modifiers: ModifiersState::empty(),
            title: String::new(),
            error: None,
        }
    }

    /// Run the event loop until the window is closed.
    pub fn run(shell: Shell) -> ShellResult<()> {
        let event_loop = EventLoop::new().map_err(|e| ShellError::window(e.to_string()))?;
        let mut host = Self::new(shell);
        event_loop
            .run_app(&mut host)
            .map_err(|e| ShellError::window(e.to_string()))?;

        match host.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, Window::scale_factor)
    }

    fn refresh_title(&mut self) {
        let title = window_title(self.shell.window().title(), self.shell.address().text());
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }
}

impl ApplicationHandler for ShellHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let dimensions = self.shell.window().dimensions();
        let attributes = Window::default_attributes()
            .with_title(self.shell.window().title())
            .with_inner_size(LogicalSize::new(dimensions.width, dimensions.height));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                info!("Native window created");
                self.window = Some(window);
                self.refresh_title();
            }
            Err(err) => {
                error!(%err, "Failed to create window");
                self.error = Some(ShellError::window(err.to_string()));
                self.shell.close();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shell.close();
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(size) => {
                let size: LogicalSize<f64> = size.to_logical(self.scale_factor());
                debug!(width = size.width, height = size.height, "Resized");
                self.shell
                    .resize(size.width.round() as u32, size.height.round() as u32);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = logical_point(position, self.scale_factor());
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.shell.click(self.cursor);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let Some(key) = translate_key(&event.logical_key, self.modifiers) {
                        self.shell.key_pressed(key);
                    }
                }
            }
            _ => {}
        }

        self.shell.pump();
        self.refresh_title();
    }
}

fn logical_point(position: PhysicalPosition<f64>, scale_factor: f64) -> Point {
    let position = position.to_logical::<f64>(scale_factor);
    Point::new(position.x as f32, position.y as f32)
}

fn window_title(title: &str, address: &str) -> String {
    if address.is_empty() {
        title.to_string()
    } else {
        format!("{} - {}", title, address)
    }
}

/// Map a native key press onto shell input.
fn translate_key(key: &LogicalKey, modifiers: ModifiersState) -> Option<Key> {
    match key {
        LogicalKey::Named(named) => match named {
            NamedKey::Enter => Some(Key::Enter),
            NamedKey::Backspace => Some(Key::Backspace),
            NamedKey::Delete => Some(Key::Delete),
            NamedKey::ArrowLeft => Some(Key::Left),
            NamedKey::ArrowRight => Some(Key::Right),
            NamedKey::Home => Some(Key::Home),
            NamedKey::End => Some(Key::End),
            NamedKey::Space => Some(Key::Char(' ')),
            NamedKey::Tab if modifiers.shift_key() => Some(Key::BackTab),
            NamedKey::Tab => Some(Key::Tab),
            _ => None,
        },
        LogicalKey::Character(text) => {
            let c = text.chars().next()?;
            if modifiers.control_key() || modifiers.super_key() {
                c.eq_ignore_ascii_case(&'a').then_some(Key::SelectAll)
            } else {
                Some(Key::Char(c))
            }
        }
        _ => None,
    }
}
