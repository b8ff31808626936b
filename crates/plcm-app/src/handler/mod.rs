//! Command handlers.
//!
//! Handlers take the window state and the injected [`Services`] explicitly,
//! so they can be driven from the CLI, a UI event loop or a test alike.
//! [`App`](crate::App) wraps them in methods.
//!
//! [`Services`]: crate::service::Services

pub mod project;
