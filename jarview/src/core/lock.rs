//! Process-wide exclusivity lock.
//!
//! The first process to acquire the endpoint owns the application. Any later
//! attempt fails immediately while the owner is alive; there is no waiting
//! and no retry. The endpoint is released when the handle is dropped, which
//! in practice means process exit.

use fs2::FileExt;
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::net::{SocketAddrV4, TcpListener};
use std::path::Path;

use crate::Result;
use crate::api::models::{Endpoint, InstanceError};
use crate::types::constants::endpoint::LOOPBACK_ADDR;

/// Keeps the bound listener or locked file open.
#[derive(Debug)]
#[allow(dead_code)]
enum Guard {
    // Never accepted on.
    Listener(TcpListener),
    File(File),
}

/// Exclusive ownership of an [`Endpoint`].
#[derive(Debug)]
pub struct InstanceLock {
    endpoint: Endpoint,
    _guard: Guard,
}

impl InstanceLock {
    /// Tries to take the endpoint without blocking.
    ///
    /// Fails with [`InstanceError::AlreadyRunning`] when the port is already
    /// bound or the lock file is held by someone else.
    pub fn acquire(endpoint: &Endpoint) -> Result<Self> {
        let guard = match endpoint {
            Endpoint::Loopback { port } => {
                let addr = SocketAddrV4::new(LOOPBACK_ADDR, *port);
                debug!("Binding exclusivity listener on {addr}");
                let listener =
                    TcpListener::bind(addr).map_err(|source| InstanceError::AlreadyRunning {
                        endpoint: endpoint.clone(),
                        source,
                    })?;
                Guard::Listener(listener)
            }
            Endpoint::LockFile { path } => {
                let file = open_lock_file(path)?;
                file.try_lock_exclusive()
                    .map_err(|source| InstanceError::AlreadyRunning {
                        endpoint: endpoint.clone(),
                        source,
                    })?;
                Guard::File(file)
            }
        };

        info!("Acquired instance lock on {endpoint}");
        Ok(Self {
            endpoint: endpoint.clone(),
            _guard: guard,
        })
    }

    /// The endpoint this handle owns.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

fn open_lock_file(path: &Path) -> Result<File> {
    let lock_file_error = |source| InstanceError::LockFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(lock_file_error)?;
    }

    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(lock_file_error)
}
