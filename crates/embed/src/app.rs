//! Process-wide embedding application.

use common::ShellResult;

use crate::client::Client;

/// Lifecycle state of the embedding application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    New,
    Initializing,
    Initialized,
    ShuttingDown,
    Terminated,
}

impl AppState {
    /// Whether clients may still be created.
    pub fn is_running(self) -> bool {
        self == AppState::Initialized
    }
}

/// The global context of the embedding library.
///
/// There is one instance per process. It is obtained from an
/// [`AppBuilder`](crate::AppBuilder) and passed explicitly to whoever needs
/// it. Disposing it shuts down every client and browser created from it.
pub trait EmbeddingApp: Send + Sync {
    /// Current lifecycle state.
    fn state(&self) -> AppState;

    /// Create a client grouping one or more browsers.
    fn create_client(&self) -> ShellResult<Box<dyn Client>>;

    /// Shut down all browsers and the library itself.
    ///
    /// Calling this more than once has no further effect.
    fn dispose(&self);
}
