//! Core data models for the storage demonstration client.
//!
//! These types describe what the demo moves in and out of the store:
//! generated container names and upload payloads, plus the metadata
//! the backend reports back for them.

pub mod blob;
pub mod container;
