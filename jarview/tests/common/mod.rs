//! Test doubles for the coordinator's collaborators.

#![allow(dead_code)]

use jarview::{
    Collaborators, Endpoint, ErrorReport, InstanceConfig, InstanceCoordinator, Notifier,
    Presence, PresenceContext, PresenceError, UiJob, UiThread, Window, WindowFactory,
};
use parking_lot::Mutex;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Records every call. Paths containing `bad` fail, `panic` panics.
#[derive(Default)]
pub struct FakeWindow {
    pub loaded: Mutex<Vec<PathBuf>>,
    pub visible: AtomicBool,
    pub exited: AtomicBool,
}

impl FakeWindow {
    pub fn loaded(&self) -> Vec<PathBuf> {
        self.loaded.lock().clone()
    }
}

impl Window for FakeWindow {
    fn load_file(&self, path: &Path) -> Result<(), jarview::DeliveryError> {
        let text = path.to_string_lossy();
        if text.contains("panic") {
            panic!("window blew up on {text}");
        }
        if text.contains("bad") {
            return Err(jarview::DeliveryError::Rejected {
                path: path.to_path_buf(),
                reason: "unsupported".into(),
            });
        }
        self.loaded.lock().push(path.to_path_buf());
        Ok(())
    }

    fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }

    fn on_exit(&self) {
        self.exited.store(true, Ordering::SeqCst);
    }
}

pub struct CountingFactory {
    pub window: Arc<FakeWindow>,
    pub created: Arc<AtomicUsize>,
}

impl WindowFactory for CountingFactory {
    fn create(&self) -> Arc<dyn Window> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.window.clone()
    }
}

#[derive(Clone, Default)]
pub struct Notices {
    pub already_running: Arc<Mutex<Vec<Endpoint>>>,
    pub reports: Arc<Mutex<Vec<ErrorReport>>>,
}

impl Notifier for Notices {
    fn already_running(&self, endpoint: &Endpoint) {
        self.already_running.lock().push(endpoint.clone());
    }

    fn report_error(&self, report: &ErrorReport) {
        self.reports.lock().push(report.clone());
    }
}

#[derive(Clone, Default)]
pub struct FakePresence {
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl Presence for FakePresence {
    fn init(&self) -> Result<(), PresenceError> {
        self.calls.lock().push("init".into());
        Ok(())
    }

    fn update(&self, context: Option<&PresenceContext>) -> Result<(), PresenceError> {
        let name = context
            .and_then(|c| c.file_name.clone())
            .unwrap_or_else(|| "-".into());
        self.calls.lock().push(format!("update {name}"));
        Ok(())
    }

    fn stop(&self) -> Result<(), PresenceError> {
        self.calls.lock().push("stop".into());
        Ok(())
    }
}

/// Counts posted jobs and runs them on the posting thread.
#[derive(Clone, Default)]
pub struct InlineUi {
    pub jobs: Arc<AtomicUsize>,
}

impl UiThread for InlineUi {
    fn invoke_later(&self, job: UiJob) -> jarview::Result<()> {
        self.jobs.fetch_add(1, Ordering::SeqCst);
        job();
        Ok(())
    }
}

pub struct Harness {
    pub instance: Arc<InstanceCoordinator>,
    pub window: Arc<FakeWindow>,
    pub created: Arc<AtomicUsize>,
    pub notices: Notices,
    pub presence: FakePresence,
}

pub fn free_port() -> u16 {
    TcpListener::bind(("127.0.0.1", 0))
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

pub fn harness(endpoint: Endpoint, ui_thread: Box<dyn UiThread>) -> Harness {
    let window = Arc::new(FakeWindow::default());
    let created = Arc::new(AtomicUsize::new(0));
    let notices = Notices::default();
    let presence = FakePresence::default();

    let config = InstanceConfig {
        endpoint,
        ..InstanceConfig::default()
    };
    let instance = InstanceCoordinator::new(
        config,
        Collaborators {
            window_factory: Box::new(CountingFactory {
                window: window.clone(),
                created: created.clone(),
            }),
            presence: Box::new(presence.clone()),
            notifier: Box::new(notices.clone()),
            ui_thread,
        },
    );

    Harness {
        instance,
        window,
        created,
        notices,
        presence,
    }
}
