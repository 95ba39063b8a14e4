use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::Result;
use crate::api::collaborators::{Collaborators, Window};
use crate::api::config::InstanceConfig;
use crate::api::models::{Endpoint, InstanceError, InstanceState, PresenceContext, PresenceError};
use crate::core::delivery::deliver;
use crate::core::lock::InstanceLock;
use crate::core::queue::PendingFileQueue;
use crate::util::paths::resolve_command_line_file;

/// Owns the application for this process and routes file-open requests to
/// its one window.
///
/// The coordinator is the process-wide context: create it once in `main`,
/// keep the returned `Arc`, and hand clones to whatever needs to open files.
///
/// # Startup
///
/// [`start`](Self::start) takes the exclusivity lock on the calling thread.
/// If another process holds it, the user is told so and the error is
/// returned; the caller is expected to exit. Otherwise the window is built
/// on the UI thread, pending files are flushed into it and it is shown.
///
/// # Opening files
///
/// [`open_file_in_instance`](Self::open_file_in_instance) may be called from
/// any thread at any time. Requests made before the window exists wait in
/// the pending queue and are delivered as soon as it does. Every request is
/// delivered exactly once.
///
/// # Example
///
/// ```no_run
/// use jarview::{Collaborators, EventLoop, InstanceConfig, InstanceCoordinator};
///
/// # fn collaborators(ui: jarview::UiHandle) -> Collaborators { unimplemented!() }
/// # fn example() -> jarview::Result<()> {
/// let (ui, event_loop) = EventLoop::new();
/// let instance = InstanceCoordinator::new(InstanceConfig::load()?, collaborators(ui));
///
/// instance.start(std::env::args().nth(1).as_deref())?;
/// event_loop.run();
/// # Ok(())
/// # }
/// ```
pub struct InstanceCoordinator {
    config: InstanceConfig,
    collaborators: Collaborators,
    started: AtomicBool,
    state: Mutex<InstanceState>,
    lock: OnceLock<InstanceLock>,
    window: OnceLock<Arc<dyn Window>>,
    pending: PendingFileQueue,
}

impl InstanceCoordinator {
    pub fn new(config: InstanceConfig, collaborators: Collaborators) -> Arc<Self> {
        Arc::new(Self {
            config,
            collaborators,
            started: AtomicBool::new(false),
            state: Mutex::new(InstanceState::Starting),
            lock: OnceLock::new(),
            window: OnceLock::new(),
            pending: PendingFileQueue::new(),
        })
    }

    /// Acquires the instance lock and schedules window creation.
    ///
    /// `first_arg` is the first process argument, if any. It is resolved to
    /// a canonical path; an unresolvable argument is logged and ignored.
    ///
    /// Returns [`InstanceError::AlreadyRunning`] after showing the notice
    /// when another process owns the endpoint. No window is ever built in
    /// that case.
    pub fn start(self: &Arc<Self>, first_arg: Option<&str>) -> Result<()> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(InstanceError::AlreadyStarted);
        }

        let lock = match InstanceLock::acquire(&self.config.endpoint) {
            Ok(lock) => lock,
            Err(e) => {
                self.set_state(InstanceState::LockFailed);
                error!("Failed to start: {e}");
                if let InstanceError::AlreadyRunning { endpoint, .. } = &e {
                    self.collaborators.notifier.already_running(endpoint);
                }
                return Err(e);
            }
        };
        // `started` guarantees this is the only set.
        let _ = self.lock.set(lock);

        let file = resolve_command_line_file(first_arg);
        self.set_state(InstanceState::PrimaryWindowCreating);

        let this = Arc::clone(self);
        self.collaborators
            .ui_thread
            .invoke_later(Box::new(move || this.finish_startup(file)))
    }

    /// Queues `path` and delivers everything pending if the window exists.
    ///
    /// `None` only flushes the queue. Returns the number of paths handed to
    /// the window by this call.
    pub fn open_file_in_instance(&self, path: Option<PathBuf>) -> usize {
        if let Some(path) = &path {
            debug!("Open request for {}", path.display());
        }
        self.pending.enqueue(path);
        self.process_pending_files()
    }

    /// Delivers all pending files to the window, if there is one yet.
    ///
    /// A file that fails to load is reported and skipped; the rest are
    /// still delivered.
    pub fn process_pending_files(&self) -> usize {
        let Some(window) = self.window.get() else {
            debug!(
                "No window yet, {} file(s) stay queued",
                self.pending.len()
            );
            return 0;
        };

        self.pending
            .drain_into(|path| self.deliver_to(window.as_ref(), path))
    }

    /// Stops the presence integration, then lets the window run its exit
    /// procedure. Does nothing to the window if none exists.
    pub fn quit_instance(&self) {
        if self.config.presence {
            self.presence_result("stop", self.collaborators.presence.stop());
        }

        match self.window.get() {
            Some(window) => {
                info!("Quitting");
                window.on_exit();
            }
            None => debug!("Quit requested before a window exists"),
        }
    }

    pub fn state(&self) -> InstanceState {
        *self.state.lock()
    }

    /// The window, once it has been built.
    pub fn window(&self) -> Option<Arc<dyn Window>> {
        self.window.get().cloned()
    }

    /// The endpoint held by this process, once the lock is acquired.
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.lock.get().map(InstanceLock::endpoint)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn config(&self) -> &InstanceConfig {
        &self.config
    }

    /// Second half of startup; runs on the UI thread.
    fn finish_startup(&self, file: Option<PathBuf>) {
        if self.install_window() {
            // Opened directly, ahead of the queue, but isolated like any
            // other delivery.
            if let (Some(path), Some(window)) = (file, self.window.get()) {
                self.deliver_to(window.as_ref(), path);
            }
        } else {
            debug!("Window already installed, routing command-line file through the queue");
            self.open_file_in_instance(file);
        }

        // Flushes requests that arrived before the window existed.
        self.process_pending_files();

        if let Some(window) = self.window.get() {
            window.set_visible(true);
        }

        if self.config.presence {
            let presence = &self.collaborators.presence;
            self.presence_result("init", presence.init());
            self.presence_result("update", presence.update(None));
        }

        self.set_state(InstanceState::PrimaryReady);
        info!("Instance ready");
    }

    /// Builds and installs the window unless one is already installed.
    /// Returns whether this call built it.
    fn install_window(&self) -> bool {
        let mut built = false;
        self.window.get_or_init(|| {
            built = true;
            debug!("Creating window");
            self.collaborators.window_factory.create()
        });
        built
    }

    /// Opens one file, reporting failures, and updates presence on success.
    fn deliver_to(&self, window: &dyn Window, path: PathBuf) {
        let context = PresenceContext::for_file(&path);
        let tracker = self.config.issue_tracker.as_deref();
        let notifier = self.collaborators.notifier.as_ref();

        if deliver(window, path, notifier, tracker) && self.config.presence {
            self.presence_result("update", self.collaborators.presence.update(Some(&context)));
        }
    }

    fn set_state(&self, next: InstanceState) {
        let mut state = self.state.lock();
        debug!("Instance state: {} -> {next}", *state);
        *state = next;
    }

    fn presence_result(&self, what: &str, result: std::result::Result<(), PresenceError>) {
        if let Err(e) = result {
            warn!("Presence {what} failed: {e}");
        }
    }
}
