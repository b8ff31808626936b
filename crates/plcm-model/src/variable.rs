//! Variable tree of a device.

use std::fmt;

use crate::error::{ModelError, Result};

/// PLC data type of a monitored variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataType {
    #[default]
    Bool,
    Int,
    DInt,
    Real,
    String,
}

impl DataType {
    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Int => "INT",
            Self::DInt => "DINT",
            Self::Real => "REAL",
            Self::String => "STRING",
        }
    }
}

/// A monitored variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Display name.
    pub name: String,
    /// PLC address (e.g. `DB1.DBX0.0`).
    pub address: String,
    pub data_type: DataType,
    pub description: Option<String>,
}

impl Variable {
    /// Create a variable without a description.
    pub fn new(name: impl Into<String>, address: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            data_type,
            description: None,
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A node of the variable tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableNode {
    Group(VariableGroup),
    Variable(Variable),
}

impl VariableNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Group(group) => &group.name,
            Self::Variable(variable) => &variable.name,
        }
    }

    pub fn as_group(&self) -> Option<&VariableGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(variable) => Some(variable),
            Self::Group(_) => None,
        }
    }
}

impl From<Variable> for VariableNode {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<VariableGroup> for VariableNode {
    fn from(group: VariableGroup) -> Self {
        Self::Group(group)
    }
}

/// Named, ordered collection of variable nodes.
///
/// Read access is public. Mutation of a group that belongs to a document goes
/// through [`DeviceEditor`](crate::DeviceEditor) so observers see it; the
/// builder methods here are meant for trees that are not attached yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableGroup {
    pub name: String,
    children: Vec<VariableNode>,
}

impl VariableGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child while building a detached tree.
    #[must_use]
    pub fn with_child(mut self, node: impl Into<VariableNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(&self) -> &[VariableNode] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of variables in this group and all nested groups.
    pub fn variable_count(&self) -> usize {
        self.children
            .iter()
            .map(|node| match node {
                VariableNode::Group(group) => group.variable_count(),
                VariableNode::Variable(_) => 1,
            })
            .sum()
    }

    /// Look up a node by path. The root path has no node.
    pub fn get(&self, path: &NodePath) -> Option<&VariableNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.children.get(*first)?;
        for &index in rest {
            node = node.as_group()?.children.get(index)?;
        }
        Some(node)
    }

    /// Resolve the group at `path` (the root path resolves to `self`).
    pub(crate) fn group_mut(&mut self, path: &NodePath) -> Result<&mut VariableGroup> {
        let mut group = self;
        for &index in path.indices() {
            let node = group
                .children
                .get_mut(index)
                .ok_or_else(|| ModelError::NodeNotFound(path.clone()))?;
            group = match node {
                VariableNode::Group(inner) => inner,
                VariableNode::Variable(_) => return Err(ModelError::NotAGroup(path.clone())),
            };
        }
        Ok(group)
    }

    pub(crate) fn node_mut(&mut self, path: &NodePath) -> Result<&mut VariableNode> {
        let Some((parent, index)) = path.split_last() else {
            return Err(ModelError::NodeNotFound(path.clone()));
        };
        self.group_mut(&parent)?
            .children
            .get_mut(index)
            .ok_or_else(|| ModelError::NodeNotFound(path.clone()))
    }

    /// Append `node` to the group at `parent` and return the new node's path.
    pub(crate) fn insert(&mut self, parent: &NodePath, node: VariableNode) -> Result<NodePath> {
        let group = self.group_mut(parent)?;
        group.children.push(node);
        Ok(parent.child(group.children.len() - 1))
    }

    pub(crate) fn remove(&mut self, path: &NodePath) -> Result<VariableNode> {
        let Some((parent, index)) = path.split_last() else {
            return Err(ModelError::RootRemoval);
        };
        let group = self.group_mut(&parent)?;
        if index >= group.children.len() {
            return Err(ModelError::NodeNotFound(path.clone()));
        }
        Ok(group.children.remove(index))
    }
}

/// Index path from a device's root group to a node.
///
/// The empty path is the root group itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Path of the `index`-th child of this node.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Split into parent path and index within the parent.
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (last, parent) = self.0.split_last()?;
        Some((NodePath(parent.to_vec()), *last))
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}
