//! Interfaces the coordinator consumes from the rest of the application.
//!
//! The window, presence integration, user notices and the UI thread all
//! live outside this crate. The coordinator only ever talks to them through
//! these traits.

use std::path::Path;
use std::sync::Arc;

use crate::Result;
use crate::api::models::{DeliveryError, Endpoint, PresenceContext, PresenceError};
use crate::util::report::ErrorReport;

/// The application window.
///
/// One window exists per process. Once installed it is shared with every
/// thread that asks to open a file, so it must be `Send + Sync`.
pub trait Window: Send + Sync {
    /// Opens `path`. Safe to call repeatedly with different paths.
    fn load_file(&self, path: &Path) -> std::result::Result<(), DeliveryError>;

    fn set_visible(&self, visible: bool);

    /// Runs the window's own exit procedure.
    fn on_exit(&self);
}

/// Builds the window. Called at most once per process, on the UI thread.
///
/// The window starts empty. The coordinator opens the command-line file
/// through [`Window::load_file`] right after, so a bad file is reported like
/// any other.
pub trait WindowFactory: Send + Sync {
    fn create(&self) -> Arc<dyn Window>;
}

/// Rich presence / status integration.
///
/// Calls are fire-and-forget: errors are logged by the coordinator and have
/// no effect on the queue or the lock.
pub trait Presence: Send + Sync {
    fn init(&self) -> std::result::Result<(), PresenceError>;
    fn update(&self, context: Option<&PresenceContext>) -> std::result::Result<(), PresenceError>;
    fn stop(&self) -> std::result::Result<(), PresenceError>;
}

/// User-facing notices.
pub trait Notifier: Send + Sync {
    /// Tells the user another instance owns the application. Shown once,
    /// right before the process exits.
    fn already_running(&self, endpoint: &Endpoint);

    /// Reports an error that did not stop the application.
    fn report_error(&self, report: &ErrorReport);
}

/// A unit of work for the UI thread.
pub type UiJob = Box<dyn FnOnce() + Send + 'static>;

/// Schedules work on the UI thread.
pub trait UiThread: Send + Sync {
    /// Queues `job` to run later on the UI thread, after any work already
    /// queued.
    fn invoke_later(&self, job: UiJob) -> Result<()>;
}

/// Everything the coordinator needs from outside.
pub struct Collaborators {
    pub window_factory: Box<dyn WindowFactory>,
    pub presence: Box<dyn Presence>,
    pub notifier: Box<dyn Notifier>,
    pub ui_thread: Box<dyn UiThread>,
}
