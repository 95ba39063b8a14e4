//! Open-file requests arriving from outside the UI thread.
//!
//! Each line on stdin is one request: `quit` ends the instance, anything
//! else (optionally prefixed with `open `) names a file to open.

use log::{debug, warn};
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use jarview::{InstanceCoordinator, resolve_command_line_file};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Open(String),
    Quit,
}

/// Parses one input line. Blank lines are not requests.
pub fn parse_request(line: &str) -> Option<Request> {
    let line = line.trim();
    match line {
        "" => None,
        "quit" => Some(Request::Quit),
        _ => {
            let path = line.strip_prefix("open ").unwrap_or(line).trim();
            (!path.is_empty()).then(|| Request::Open(path.to_string()))
        }
    }
}

/// Applies `request`. Returns `false` once the instance has been asked to
/// quit. A `quit` that arrives before the window exists is ignored.
pub fn handle_request(instance: &InstanceCoordinator, request: Request) -> bool {
    match request {
        Request::Open(arg) => {
            match resolve_command_line_file(Some(&arg)) {
                Some(path) => {
                    instance.open_file_in_instance(Some(path));
                }
                None => warn!("Ignoring open request for {arg:?}"),
            }
            true
        }
        Request::Quit => {
            if instance.window().is_none() {
                warn!("Ignoring quit, the window is not up yet");
                return true;
            }
            instance.quit_instance();
            false
        }
    }
}

/// Reads requests from `input` until EOF or `quit`.
pub fn serve<R: BufRead>(instance: &InstanceCoordinator, input: R) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Stopped reading requests: {e}");
                return;
            }
        };
        if let Some(request) = parse_request(&line) {
            if !handle_request(instance, request) {
                return;
            }
        }
    }
    debug!("Request input closed");
}

/// Serves requests from stdin on a background thread.
pub fn spawn_stdin_requests(instance: Arc<InstanceCoordinator>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("open-requests".into())
        .spawn(move || serve(&instance, io::stdin().lock()))
}
