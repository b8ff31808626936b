//! Document model for PlcMonitor projects.
//!
//! A [`Document`] is the project being edited: an optional backing file and an
//! ordered list of monitored [`Device`]s. Each device owns a tree of variable
//! groups and [`Variable`]s.
//!
//! # Change Feed
//!
//! Every structural change to a variable tree, and every change of the
//! document's backing file, is reported to the observers attached to that
//! document instance:
//!
//! ```ignore
//! use std::sync::Arc;
//! use plcm_model::{Device, Document, DocumentEvent, NodePath, Variable, DataType};
//!
//! let mut document = Document::new();
//! let id = document.add_device(Device::new("Line 1", "192.168.0.10"));
//! document.attach_observer(Arc::new(|event: &DocumentEvent| println!("{event:?}")));
//!
//! let mut editor = document.edit_device(id).unwrap();
//! editor.add_variable(&NodePath::root(), Variable::new("Speed", "DB1.DBD0", DataType::Real))?;
//! ```
//!
//! Observers are bound to one document instance. Cloning a document does not
//! carry them over.

mod change;
mod device;
mod document;
mod error;
mod variable;

pub use change::{ChangeKind, DocumentEvent, DocumentObserver, ObserverId, TreeChange};
pub use device::{Device, DeviceEditor, DeviceId};
pub use document::Document;
pub use error::{ModelError, Result};
pub use variable::{DataType, NodePath, Variable, VariableGroup, VariableNode};
