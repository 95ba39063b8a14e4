//! Headless stand-ins for the viewer window and user notices.

use log::{error, info};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jarview::{DeliveryError, Endpoint, ErrorReport, Notifier, UiHandle, Window, WindowFactory};

/// A window that records opened files in the log.
pub struct ConsoleWindow {
    ui: UiHandle,
    opened: Mutex<Vec<PathBuf>>,
}

impl ConsoleWindow {
    pub fn new(ui: UiHandle) -> Self {
        Self {
            ui,
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Files opened so far, oldest first.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().clone()
    }
}

impl Window for ConsoleWindow {
    fn load_file(&self, path: &Path) -> Result<(), DeliveryError> {
        let meta = fs::metadata(path).map_err(|source| DeliveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if !meta.is_file() {
            return Err(DeliveryError::Rejected {
                path: path.to_path_buf(),
                reason: "not a regular file".into(),
            });
        }

        info!("Opened {} ({} bytes)", path.display(), meta.len());
        self.opened.lock().push(path.to_path_buf());
        Ok(())
    }

    fn set_visible(&self, visible: bool) {
        if visible {
            info!("Window shown");
        } else {
            info!("Window hidden");
        }
    }

    fn on_exit(&self) {
        info!("Closing window");
        self.ui.shutdown();
    }
}

/// Builds [`ConsoleWindow`]s bound to the launcher's UI loop.
pub struct ConsoleWindowFactory {
    ui: UiHandle,
}

impl ConsoleWindowFactory {
    pub fn new(ui: UiHandle) -> Self {
        Self { ui }
    }
}

impl WindowFactory for ConsoleWindowFactory {
    fn create(&self) -> Arc<dyn Window> {
        Arc::new(ConsoleWindow::new(self.ui.clone()))
    }
}

/// Prints notices to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn already_running(&self, endpoint: &Endpoint) {
        eprintln!("The software is already running ({endpoint})");
    }

    fn report_error(&self, report: &ErrorReport) {
        error!("{}", report.message);
        eprintln!("{report}");
    }
}
