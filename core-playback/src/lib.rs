//! # Playback Resolution Module
//!
//! Decides what the player should actually play.
//!
//! ## Overview
//!
//! This module handles:
//! - The [`PlaybackSource`](source::PlaybackSource) directive handed to the
//!   external player
//! - The [`resolve`](resolver::resolve) policy choosing between a complete
//!   local copy, a curated catalog reference and a raw video id
//! - The [`PlaybackSlot`](slot::PlaybackSlot), the single owned cell holding
//!   the current playback intent

pub mod resolver;
pub mod slot;
pub mod source;

pub use resolver::resolve;
pub use slot::PlaybackSlot;
pub use source::PlaybackSource;
