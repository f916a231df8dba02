//! # Catalog Module
//!
//! Read-only facade over the remote catalog source.
//!
//! The catalog list is fetched in bulk, cached for the fetch cycle, and
//! looked up by the rest of the core when an item is selected. A failed fetch
//! is never fatal: the core keeps operating on its last-known (initially
//! empty) list.

pub mod error;
pub mod service;

pub use error::{CatalogError, Result};
pub use service::CatalogService;
