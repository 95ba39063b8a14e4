use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::constants::{endpoint, paths};

/// The resource that marks a process as the running instance.
///
/// Only one process on the machine can hold a given endpoint at a time. The
/// default is a loopback TCP port; a lock file works the same way where
/// binding a port is undesirable.
///
/// # Example
///
/// ```
/// use jarview::Endpoint;
///
/// let ep = Endpoint::default();
/// assert_eq!(ep, Endpoint::Loopback { port: 9988 });
/// assert_eq!(ep.to_string(), "127.0.0.1:9988");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Endpoint {
    /// A TCP port bound on `127.0.0.1`. Nothing is ever read from it.
    Loopback { port: u16 },
    /// An advisory exclusive lock on a file.
    LockFile { path: PathBuf },
}

impl Endpoint {
    /// Lock file endpoint at the default location.
    ///
    /// Lives in the platform's local data directory, falling back to the
    /// temp dir when there is none.
    pub fn default_lock_file() -> Self {
        let mut path = dirs::data_local_dir().unwrap_or(std::env::temp_dir());
        path.push(paths::APP_DIR);
        path.push(paths::LOCK_FILE);
        Self::LockFile { path }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::Loopback {
            port: endpoint::DEFAULT_PORT,
        }
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loopback { port } => write!(f, "{}:{port}", endpoint::LOOPBACK_ADDR),
            Self::LockFile { path } => write!(f, "lock file {}", path.display()),
        }
    }
}

/// Startup state of the coordinator.
///
/// `Starting` moves to either `LockFailed` (terminal) or
/// `PrimaryWindowCreating`, and from there to `PrimaryReady` once the window
/// is visible. Open-file requests after that are handled without a state
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Starting,
    LockFailed,
    PrimaryWindowCreating,
    PrimaryReady,
}

impl Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starting => write!(f, "starting"),
            Self::LockFailed => write!(f, "lock failed"),
            Self::PrimaryWindowCreating => write!(f, "creating window"),
            Self::PrimaryReady => write!(f, "ready"),
        }
    }
}

/// What the presence integration should show, if anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceContext {
    /// Name of the file currently open.
    pub file_name: Option<String>,
}

impl PresenceContext {
    /// Context describing an opened file.
    pub fn for_file(path: &Path) -> Self {
        Self {
            file_name: path.file_name().map(|n| n.to_string_lossy().into_owned()),
        }
    }
}

/// Errors from starting or running the instance coordinator.
///
/// Only [`InstanceError::AlreadyRunning`] and [`InstanceError::LockFile`]
/// are meant to end the process. Everything that goes wrong with a single
/// file is a [`DeliveryError`] and never surfaces here.
#[derive(Debug, Error)]
pub enum InstanceError {
    /// Another process already holds the exclusivity endpoint.
    #[error("another instance is already running ({endpoint})")]
    AlreadyRunning {
        endpoint: Endpoint,
        #[source]
        source: io::Error,
    },

    /// The lock file could not be created or opened.
    #[error("cannot open lock file {}", path.display())]
    LockFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be read.
    #[error("cannot read config {}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for [`crate::InstanceConfig`].
    #[error("invalid config {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `start` was called more than once.
    #[error("instance already started")]
    AlreadyStarted,

    /// The UI event loop is no longer accepting work.
    #[error("UI thread has shut down")]
    UiThreadClosed,
}

impl InstanceError {
    /// Whether this error means another instance owns the application.
    pub fn is_already_running(&self) -> bool {
        matches!(self, Self::AlreadyRunning { .. })
    }
}

/// A failure to open one file in the window.
///
/// Delivery errors are isolated per path: the coordinator reports them and
/// moves on to the next queued file.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The window refused the file.
    #[error("cannot open {}: {reason}", path.display())]
    Rejected { path: PathBuf, reason: String },

    /// Reading the file failed.
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The window panicked while loading the file.
    #[error("loading {} panicked: {message}", path.display())]
    Panicked { path: PathBuf, message: String },
}

impl DeliveryError {
    /// The path that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            Self::Rejected { path, .. } | Self::Io { path, .. } | Self::Panicked { path, .. } => {
                path
            }
        }
    }
}

/// A command-line argument that does not name a resolvable path.
#[derive(Debug, Error)]
#[error("cannot resolve {arg:?}")]
pub struct PathResolutionError {
    pub arg: String,
    #[source]
    pub source: io::Error,
}

/// Error returned by a presence integration.
#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("presence integration unavailable: {0}")]
    Unavailable(String),
}
