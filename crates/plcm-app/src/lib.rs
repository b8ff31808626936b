//! PlcMonitor - application core.
//!
//! Holds the open project of an editor window, derives its "unsaved changes"
//! flag, runs the project commands (new, open, save, save as) and hosts the
//! window's single modal dialog. Rendering is left to the embedding UI; the
//! `plc-monitor` binary drives the same commands from the command line.

pub mod app;
pub mod error;
pub mod handler;
pub mod logging;
pub mod service;
pub mod state;

pub use app::{APP_NAME, App};
pub use error::{AppError, Result};
