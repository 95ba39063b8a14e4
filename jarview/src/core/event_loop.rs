//! A minimal UI thread: jobs posted from any thread run one at a time, in
//! order, on whichever thread calls [`EventLoop::run`].

use log::{debug, error};
use std::panic::{self, AssertUnwindSafe};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::Result;
use crate::api::collaborators::{UiJob, UiThread};
use crate::api::models::InstanceError;
use crate::util::panic_message;

enum Message {
    Run(UiJob),
    Shutdown,
}

/// Cloneable handle for posting work to an [`EventLoop`].
#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: UnboundedSender<Message>,
}

impl UiHandle {
    /// Asks the loop to stop after the jobs already posted.
    pub fn shutdown(&self) {
        if self.tx.send(Message::Shutdown).is_err() {
            debug!("UI loop already stopped");
        }
    }
}

impl UiThread for UiHandle {
    fn invoke_later(&self, job: UiJob) -> Result<()> {
        self.tx
            .send(Message::Run(job))
            .map_err(|_| InstanceError::UiThreadClosed)
    }
}

/// Receiving side of the UI thread.
pub struct EventLoop {
    rx: UnboundedReceiver<Message>,
}

impl EventLoop {
    pub fn new() -> (UiHandle, EventLoop) {
        let (tx, rx) = mpsc::unbounded_channel();
        (UiHandle { tx }, EventLoop { rx })
    }

    /// Runs posted jobs until shutdown is requested or every handle is gone.
    ///
    /// Must not be called from inside an async runtime. A job that panics is
    /// logged and the loop keeps going. Returns the number of jobs run.
    pub fn run(mut self) -> usize {
        let mut ran = 0;
        while let Some(message) = self.rx.blocking_recv() {
            match message {
                Message::Run(job) => {
                    ran += 1;
                    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                        error!("UI job panicked: {}", panic_message(payload.as_ref()));
                    }
                }
                Message::Shutdown => {
                    debug!("UI loop shutting down");
                    break;
                }
            }
        }
        ran
    }
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Run(_) => f.write_str("Run(..)"),
            Self::Shutdown => f.write_str("Shutdown"),
        }
    }
}
