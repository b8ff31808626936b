//! Monitored devices (PLCs).

use std::fmt;

use uuid::Uuid;

use crate::change::{ChangeFeed, ChangeKind, DocumentEvent, TreeChange};
use crate::error::{ModelError, Result};
use crate::variable::{NodePath, Variable, VariableGroup, VariableNode};

/// Name given to the root group of a new device.
const ROOT_GROUP_NAME: &str = "Variables";

/// Stable identifier of a device within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(Uuid);

impl DeviceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A PLC entry of the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    id: DeviceId,
    pub name: String,
    /// Network address of the PLC.
    pub address: String,
    root: VariableGroup,
}

impl Device {
    /// Create a device with a fresh id and an empty variable tree.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self::with_id(DeviceId::new(), name, address)
    }

    pub fn with_id(id: DeviceId, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            root: VariableGroup::new(ROOT_GROUP_NAME),
        }
    }

    /// Replace the variable tree while building a detached device.
    #[must_use]
    pub fn with_root(mut self, root: VariableGroup) -> Self {
        self.root = root;
        self
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn root(&self) -> &VariableGroup {
        &self.root
    }

    pub fn variable_count(&self) -> usize {
        self.root.variable_count()
    }
}

/// Mutable access to one device of a document.
///
/// Every successful edit is reported to the document's observers.
pub struct DeviceEditor<'a> {
    device: &'a mut Device,
    feed: &'a ChangeFeed,
}

impl<'a> DeviceEditor<'a> {
    pub(crate) fn new(device: &'a mut Device, feed: &'a ChangeFeed) -> Self {
        Self { device, feed }
    }

    pub fn device(&self) -> &Device {
        &*self.device
    }

    /// Append a variable to the group at `parent`.
    pub fn add_variable(&mut self, parent: &NodePath, variable: Variable) -> Result<NodePath> {
        self.add_node(parent, VariableNode::Variable(variable))
    }

    /// Append a (possibly populated) group to the group at `parent`.
    pub fn add_group(&mut self, parent: &NodePath, group: VariableGroup) -> Result<NodePath> {
        self.add_node(parent, VariableNode::Group(group))
    }

    /// Remove the node at `path`, returning it.
    pub fn remove(&mut self, path: &NodePath) -> Result<VariableNode> {
        let removed = self.device.root.remove(path)?;
        self.emit(ChangeKind::Removed, path.clone());
        Ok(removed)
    }

    /// Edit the variable at `path` in place.
    pub fn update_variable(
        &mut self,
        path: &NodePath,
        update: impl FnOnce(&mut Variable),
    ) -> Result<()> {
        match self.device.root.node_mut(path)? {
            VariableNode::Variable(variable) => update(variable),
            VariableNode::Group(_) => return Err(ModelError::NotAVariable(path.clone())),
        }
        self.emit(ChangeKind::Updated, path.clone());
        Ok(())
    }

    /// Rename a group or variable.
    pub fn rename(&mut self, path: &NodePath, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if path.is_root() {
            self.device.root.name = name;
        } else {
            match self.device.root.node_mut(path)? {
                VariableNode::Group(group) => group.name = name,
                VariableNode::Variable(variable) => variable.name = name,
            }
        }
        self.emit(ChangeKind::Updated, path.clone());
        Ok(())
    }

    fn add_node(&mut self, parent: &NodePath, node: VariableNode) -> Result<NodePath> {
        let path = self.device.root.insert(parent, node)?;
        self.emit(ChangeKind::Added, path.clone());
        Ok(path)
    }

    fn emit(&self, kind: ChangeKind, path: NodePath) {
        self.feed.emit(&DocumentEvent::Tree(TreeChange {
            device: self.device.id,
            kind,
            path,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::DataType;

    #[test]
    fn test_new_device_has_empty_root() {
        let device = Device::new("Press", "10.0.0.5");
        assert_eq!(device.root().name, "Variables");
        assert!(device.root().is_empty());
        assert_eq!(device.variable_count(), 0);
    }

    #[test]
    fn test_rename_root_and_nested() {
        let feed = ChangeFeed::default();
        let mut device = Device::new("Press", "10.0.0.5");
        let mut editor = DeviceEditor::new(&mut device, &feed);

        let group = editor
            .add_group(&NodePath::root(), VariableGroup::new("Drive"))
            .unwrap();
        editor.rename(&NodePath::root(), "Tags").unwrap();
        editor.rename(&group, "Motor").unwrap();

        assert_eq!(device.root().name, "Tags");
        assert_eq!(device.root().get(&group).unwrap().name(), "Motor");
    }

    #[test]
    fn test_update_group_is_rejected() {
        let feed = ChangeFeed::default();
        let mut device = Device::new("Press", "10.0.0.5");
        let mut editor = DeviceEditor::new(&mut device, &feed);

        let group = editor
            .add_group(&NodePath::root(), VariableGroup::new("Drive"))
            .unwrap();
        let err = editor
            .update_variable(&group, |variable| variable.data_type = DataType::Int)
            .unwrap_err();
        assert_eq!(err, ModelError::NotAVariable(group));
    }
}
