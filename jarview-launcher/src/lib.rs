pub mod console;
pub mod presence;
pub mod requests;

use anyhow::Context;
use clap::{ArgAction, Parser};
use log::info;
use std::path::PathBuf;

use jarview::{Collaborators, Endpoint, EventLoop, InstanceConfig, InstanceCoordinator};

use crate::console::{ConsoleWindowFactory, StderrNotifier};
use crate::presence::LogPresence;
use crate::requests::spawn_stdin_requests;

#[derive(Parser, Debug)]
#[command(name = "jarview")]
#[command(disable_version_flag = true)]
#[command(version)]
pub struct Args {
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    pub version: bool,

    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use a lock file at the default location instead of the loopback port.
    #[arg(long, conflicts_with = "port")]
    pub lock_file: bool,

    /// Use a lock file at PATH instead of the loopback port.
    #[arg(long, value_name = "PATH", conflicts_with = "port")]
    pub lock_path: Option<PathBuf>,

    /// Loopback port to hold while running.
    #[arg(long)]
    pub port: Option<u16>,

    /// File to open on startup.
    pub file: Option<String>,
}

impl Args {
    /// Endpoint chosen on the command line, overriding the config file.
    pub fn endpoint_override(&self) -> Option<Endpoint> {
        if let Some(path) = &self.lock_path {
            return Some(Endpoint::LockFile { path: path.clone() });
        }
        if self.lock_file {
            return Some(Endpoint::default_lock_file());
        }
        self.port.map(|port| Endpoint::Loopback { port })
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Args { version: true, .. } = args {
        println!("jarview {}", jarview::version());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => InstanceConfig::load_from(path),
        None => InstanceConfig::load(),
    }
    .context("loading configuration")?;
    if let Some(endpoint) = args.endpoint_override() {
        config.endpoint = endpoint;
    }

    let (ui, event_loop) = EventLoop::new();
    let instance = InstanceCoordinator::new(
        config,
        Collaborators {
            window_factory: Box::new(ConsoleWindowFactory::new(ui.clone())),
            presence: Box::new(LogPresence::default()),
            notifier: Box::new(StderrNotifier),
            ui_thread: Box::new(ui),
        },
    );

    match instance.start(args.file.as_deref()) {
        Ok(()) => {}
        // The notice has already been shown.
        Err(e) if e.is_already_running() => std::process::exit(1),
        Err(e) => {
            eprintln!("Failed to start: {e}");
            std::process::exit(1);
        }
    }

    let _requests = spawn_stdin_requests(instance.clone()).context("spawning request reader")?;

    let jobs = event_loop.run();
    info!("UI loop finished after {jobs} job(s)");
    Ok(())
}
