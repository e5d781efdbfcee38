//! Console handlers for the menu operations.

pub mod demo_handlers;
