//! Core internal logic for instance coordination.
//!
//! This module contains the exclusivity lock, the pending-file queue, the UI
//! event loop and the per-file delivery step used by the coordinator.

pub(crate) mod delivery;
pub mod event_loop;
pub mod lock;
pub mod queue;
