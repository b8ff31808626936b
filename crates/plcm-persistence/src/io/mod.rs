//! File I/O operations for project persistence.
//!
//! This module handles:
//! - Saving projects with atomic writes
//! - Loading projects with format validation

mod load;
mod save;

pub use load::{load_project, load_project_async};
pub use save::{save_project, save_project_async};
