//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the video platform core:
//! - Logging and tracing setup
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other core crates depend on.
//! It establishes the logging conventions, the fail-fast configuration
//! pattern for host-provided bridges, and the event broadcasting mechanism
//! the presentation layer subscribes to.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use error::{Error, Result};
