//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `store/` - Record store, in memory or persisted as JSON
//! - `token/` - Static bearer-token identity table

pub mod store;
pub mod token;

pub use store::{RecordStore, StorageBackend};
pub use token::{TokenDirectory, bearer_token};
