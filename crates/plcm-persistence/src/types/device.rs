//! PLC snapshot type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::VariableNodeSnapshot;

/// One PLC entry and its variable tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlcSnapshot {
    /// Stable device id.
    pub id: Uuid,

    pub name: String,

    /// Network address of the PLC.
    pub address: String,

    /// Children of the device's root variable group.
    #[serde(default)]
    pub variables: Vec<VariableNodeSnapshot>,
}

impl PlcSnapshot {
    /// Number of variables in the whole tree.
    pub fn variable_count(&self) -> usize {
        self.variables
            .iter()
            .map(VariableNodeSnapshot::variable_count)
            .sum()
    }
}
