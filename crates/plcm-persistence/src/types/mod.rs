//! Persistence types for project serialization.
//!
//! These mirror the `plcm-model` types but carry only what is written to
//! disk. Field names are part of the `.plcson` format.

mod device;
mod project;
mod variable;

pub use device::PlcSnapshot;
pub use project::ProjectFile;
pub use variable::{DataTypeSnapshot, VariableNodeSnapshot};

/// Current schema version.
///
/// Increment this when making breaking changes to the persistence format.
/// The loader will reject files with version > CURRENT_SCHEMA_VERSION.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Extension of project files, without the leading dot.
pub const FILE_EXTENSION: &str = "plcson";

/// Name of the file-dialog filter for project files.
pub const FILTER_NAME: &str = "PlcMonitor files";
