//! Conversion traits between model types and persistence types.
//!
//! The model owns ids and the tree structure; snapshots carry exactly what
//! goes into a `.plcson` file. Observers and the backing-file path are
//! runtime state and never round-trip through a snapshot.

use std::path::PathBuf;

use plcm_model::{DataType, Device, DeviceId, Document, Variable, VariableGroup, VariableNode};

use crate::types::{DataTypeSnapshot, PlcSnapshot, ProjectFile, VariableNodeSnapshot};

/// Name given to a restored device's root group.
const ROOT_GROUP_NAME: &str = "Variables";

/// Trait for types that can be converted to a persistence snapshot.
pub trait ToSnapshot {
    /// The snapshot type.
    type Snapshot;

    /// Convert to a snapshot for persistence.
    fn to_snapshot(&self) -> Self::Snapshot;
}

/// Trait for types that can be created from a persistence snapshot.
pub trait FromSnapshot: Sized {
    /// The snapshot type.
    type Snapshot;

    /// Create from a snapshot.
    fn from_snapshot(snapshot: Self::Snapshot) -> Self;
}

// =============================================================================
// DATA TYPE
// =============================================================================

impl ToSnapshot for DataType {
    type Snapshot = DataTypeSnapshot;

    fn to_snapshot(&self) -> DataTypeSnapshot {
        match self {
            DataType::Bool => DataTypeSnapshot::Bool,
            DataType::Int => DataTypeSnapshot::Int,
            DataType::DInt => DataTypeSnapshot::DInt,
            DataType::Real => DataTypeSnapshot::Real,
            DataType::String => DataTypeSnapshot::String,
        }
    }
}

impl FromSnapshot for DataType {
    type Snapshot = DataTypeSnapshot;

    fn from_snapshot(snapshot: DataTypeSnapshot) -> Self {
        match snapshot {
            DataTypeSnapshot::Bool => DataType::Bool,
            DataTypeSnapshot::Int => DataType::Int,
            DataTypeSnapshot::DInt => DataType::DInt,
            DataTypeSnapshot::Real => DataType::Real,
            DataTypeSnapshot::String => DataType::String,
        }
    }
}

// =============================================================================
// VARIABLE TREE
// =============================================================================

impl ToSnapshot for VariableNode {
    type Snapshot = VariableNodeSnapshot;

    fn to_snapshot(&self) -> VariableNodeSnapshot {
        match self {
            VariableNode::Variable(variable) => VariableNodeSnapshot::Variable {
                name: variable.name.clone(),
                address: variable.address.clone(),
                data_type: variable.data_type.to_snapshot(),
                description: variable.description.clone(),
            },
            VariableNode::Group(group) => VariableNodeSnapshot::Group {
                name: group.name.clone(),
                children: group.children().iter().map(ToSnapshot::to_snapshot).collect(),
            },
        }
    }
}

impl FromSnapshot for VariableNode {
    type Snapshot = VariableNodeSnapshot;

    fn from_snapshot(snapshot: VariableNodeSnapshot) -> Self {
        match snapshot {
            VariableNodeSnapshot::Variable {
                name,
                address,
                data_type,
                description,
            } => {
                let mut variable = Variable::new(name, address, DataType::from_snapshot(data_type));
                variable.description = description;
                VariableNode::Variable(variable)
            }
            VariableNodeSnapshot::Group { name, children } => {
                VariableNode::Group(group_from_children(name, children))
            }
        }
    }
}

fn group_from_children(name: String, children: Vec<VariableNodeSnapshot>) -> VariableGroup {
    children
        .into_iter()
        .map(VariableNode::from_snapshot)
        .fold(VariableGroup::new(name), VariableGroup::with_child)
}

// =============================================================================
// DEVICE
// =============================================================================

impl ToSnapshot for Device {
    type Snapshot = PlcSnapshot;

    fn to_snapshot(&self) -> PlcSnapshot {
        PlcSnapshot {
            id: *self.id().as_uuid(),
            name: self.name.clone(),
            address: self.address.clone(),
            variables: self
                .root()
                .children()
                .iter()
                .map(ToSnapshot::to_snapshot)
                .collect(),
        }
    }
}

impl FromSnapshot for Device {
    type Snapshot = PlcSnapshot;

    fn from_snapshot(snapshot: PlcSnapshot) -> Self {
        Device::with_id(
            DeviceId::from_uuid(snapshot.id),
            snapshot.name,
            snapshot.address,
        )
        .with_root(group_from_children(
            ROOT_GROUP_NAME.to_string(),
            snapshot.variables,
        ))
    }
}

// =============================================================================
// DOCUMENT
// =============================================================================

/// Build a project file from a document.
///
/// `created_at` comes from the document; `last_saved_at` is refreshed when
/// the file is written.
pub fn document_to_project(document: &Document) -> ProjectFile {
    let mut project = ProjectFile::new()
        .with_plcs(document.devices().iter().map(ToSnapshot::to_snapshot).collect());
    project.created_at = document.created_at().to_rfc3339();
    project
}

/// Build a document from a loaded project file.
///
/// An unreadable `created_at` is replaced by the current time.
pub fn project_to_document(file_path: Option<PathBuf>, project: ProjectFile) -> Document {
    let created_at = project.created_at();
    let devices = project
        .plcs
        .into_iter()
        .map(Device::from_snapshot)
        .collect();
    let document = Document::from_parts(file_path, devices);
    match created_at {
        Some(created_at) => document.with_created_at(created_at),
        None => {
            tracing::warn!("project has an unreadable created_at, using the current time");
            document
        }
    }
}
