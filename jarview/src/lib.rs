//! Single-instance coordination for the jarview decompiler viewer.
//!
//! This crate makes sure one process owns the application and that every
//! request to open a file ends up in that process's window exactly once:
//!
//! - Taking an exclusive, machine-wide lock on a loopback port or lock file
//! - Queueing file-open requests that arrive before the window exists
//! - Building the window once, on the UI thread, and flushing the queue into it
//! - Shutting down the window and presence integration on quit
//!
//! The window itself, presence integration and user notices are supplied by
//! the application through the traits in [`collaborators`].
//!
//! # Example
//!
//! ```no_run
//! use jarview::{EventLoop, InstanceConfig, InstanceCoordinator};
//!
//! # fn collaborators(ui: jarview::UiHandle) -> jarview::Collaborators { unimplemented!() }
//! # fn example() -> jarview::Result<()> {
//! let (ui, event_loop) = EventLoop::new();
//! let instance = InstanceCoordinator::new(InstanceConfig::load()?, collaborators(ui));
//!
//! match instance.start(std::env::args().nth(1).as_deref()) {
//!     Err(e) if e.is_already_running() => std::process::exit(1),
//!     other => other?,
//! }
//!
//! // Any thread may ask for more files.
//! instance.open_file_in_instance(Some("/tmp/Other.class".into()));
//!
//! event_loop.run();
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Startup returns `Result<T, InstanceError>`. Only a lost lock is meant to
//! end the process. Problems with a single file are [`DeliveryError`]s; they
//! are logged, reported through the [`Notifier`] and never stop other files
//! from loading.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`.

// Internal implementation modules
mod types;

// Public API modules
pub mod api;
pub mod core;
pub mod util;

pub use crate::api::collaborators::{
    self, Collaborators, Notifier, Presence, UiJob, UiThread, Window, WindowFactory,
};
pub use crate::api::config::InstanceConfig;
pub use crate::api::instance::InstanceCoordinator;
pub use crate::api::models::{
    DeliveryError, Endpoint, InstanceError, InstanceState, PathResolutionError, PresenceContext,
    PresenceError,
};
pub use crate::core::event_loop::{EventLoop, UiHandle};
pub use crate::core::lock::InstanceLock;
pub use crate::core::queue::PendingFileQueue;
pub use crate::util::paths::resolve_command_line_file;
pub use crate::util::report::ErrorReport;

/// A specialized `Result` type for instance coordination.
pub type Result<T> = std::result::Result<T, InstanceError>;

/// The crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
