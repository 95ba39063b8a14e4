//! Public API module.
//!
//! This module contains the high-level user-facing API for the `jarview` crate.

pub mod collaborators;
pub mod config;
pub mod instance;
pub mod models;
