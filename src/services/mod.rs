//! Storage session layer over the external object-store client.

pub mod session;
