//! Type definitions and constants.
//!
//! This module contains the fixed values shared by the lock, configuration
//! and launcher layers.

pub(crate) mod constants;
