//! Persistent storage for PlcMonitor projects.
//!
//! This crate provides functionality to save and load `.plcson` project files
//! and to convert between the in-memory [`plcm_model::Document`] and its
//! storage representation [`ProjectFile`].
//!
//! # Features
//!
//! - **Human-readable JSON** so projects diff cleanly under version control
//! - **Atomic writes** to prevent data corruption
//! - **Schema versioning** with rejection of files from newer releases
//!
//! # File Format
//!
//! `.plcson` files are pretty-printed JSON:
//!
//! ```text
//! {
//!   "schema_version": 1,
//!   "created_at": "2026-10-18T09:00:00+00:00",
//!   "last_saved_at": "2026-10-18T09:30:00+00:00",
//!   "plcs": [
//!     {
//!       "id": "5f0c...",
//!       "name": "Line 1",
//!       "address": "192.168.0.10",
//!       "variables": [
//!         { "kind": "variable", "name": "Running", "address": "DB1.DBX0.0", "data_type": "bool" },
//!         { "kind": "group", "name": "Drive", "children": [] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use plcm_persistence::{load_project, project_to_document, save_project, document_to_project};
//!
//! let mut project = document_to_project(&document);
//! save_project(&mut project, Path::new("line.plcson"))?;
//!
//! let loaded = load_project(Path::new("line.plcson"))?;
//! let document = project_to_document(Some("line.plcson".into()), loaded);
//! ```
//!
//! # Architecture
//!
//! - `types/` - Persistence types (serde snapshots)
//! - `io/` - File I/O operations (save, load)
//! - `convert.rs` - Conversion traits and helpers
//! - `error.rs` - Error types with user-friendly messages

mod convert;
mod error;
mod io;
mod types;

pub use convert::{FromSnapshot, ToSnapshot, document_to_project, project_to_document};
pub use error::{FileAction, PersistenceError, Result};
pub use io::{load_project, load_project_async, save_project, save_project_async};
pub use types::{
    CURRENT_SCHEMA_VERSION, DataTypeSnapshot, FILE_EXTENSION, FILTER_NAME, PlcSnapshot,
    ProjectFile, VariableNodeSnapshot,
};
