//! Variable tree snapshot types.

use serde::{Deserialize, Serialize};

/// A node of a persisted variable tree.
///
/// Serialized with a `kind` tag: `{"kind": "variable", ...}` or
/// `{"kind": "group", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariableNodeSnapshot {
    Variable {
        name: String,
        address: String,
        data_type: DataTypeSnapshot,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Group {
        name: String,
        #[serde(default)]
        children: Vec<VariableNodeSnapshot>,
    },
}

impl VariableNodeSnapshot {
    pub fn name(&self) -> &str {
        match self {
            Self::Variable { name, .. } | Self::Group { name, .. } => name,
        }
    }

    /// 1 for a variable, the recursive count for a group.
    pub fn variable_count(&self) -> usize {
        match self {
            Self::Variable { .. } => 1,
            Self::Group { children, .. } => children.iter().map(Self::variable_count).sum(),
        }
    }
}

/// Data type for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTypeSnapshot {
    #[default]
    Bool,
    Int,
    DInt,
    Real,
    String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_tags_on_the_wire() {
        let node = VariableNodeSnapshot::Group {
            name: "Drive".to_string(),
            children: vec![VariableNodeSnapshot::Variable {
                name: "Speed".to_string(),
                address: "DB1.DBD2".to_string(),
                data_type: DataTypeSnapshot::DInt,
                description: None,
            }],
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "group");
        assert_eq!(json["children"][0]["kind"], "variable");
        assert_eq!(json["children"][0]["data_type"], "dint");
        assert!(json["children"][0].get("description").is_none());
    }

    #[test]
    fn test_group_without_children_field() {
        let node: VariableNodeSnapshot =
            serde_json::from_str(r#"{"kind":"group","name":"Empty"}"#).unwrap();
        assert_eq!(node.variable_count(), 0);
        assert_eq!(node.name(), "Empty");
    }

    #[test]
    fn test_unknown_data_type_rejected() {
        let result: Result<VariableNodeSnapshot, _> = serde_json::from_str(
            r#"{"kind":"variable","name":"X","address":"M0.0","data_type":"lreal"}"#,
        );
        assert!(result.is_err());
    }
}
