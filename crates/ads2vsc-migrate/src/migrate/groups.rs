//! Reconciles connection-group ids between the two documents.
//!
//! The two files number their groups independently, so a source group id is
//! mapped to its name and the name back to a target id. Duplicate names
//! inside one list resolve to the entry that comes last in document order.

use std::collections::HashMap;

use super::types::ConnectionGroup;

#[derive(Debug, Clone, Default)]
pub struct GroupResolver {
    source_id_to_name: HashMap<String, String>,
    target_name_to_id: HashMap<String, String>,
}

impl GroupResolver {
    pub fn new(source_groups: &[ConnectionGroup], target_groups: &[ConnectionGroup]) -> Self {
        let source_id_to_name = source_groups
            .iter()
            .map(|g| (g.id.clone(), g.name.clone()))
            .collect();
        let target_name_to_id = target_groups
            .iter()
            .map(|g| (g.name.clone(), g.id.clone()))
            .collect();

        Self { source_id_to_name, target_name_to_id }
    }

    /// `false` means every lookup will miss and connections land ungrouped.
    pub fn has_target_groups(&self) -> bool {
        !self.target_name_to_id.is_empty()
    }

    pub fn source_group_name(&self, source_group_id: &str) -> Option<&str> {
        self.source_id_to_name.get(source_group_id).map(String::as_str)
    }

    /// Target group id for a source group id, or `None` if either the id or
    /// its name is unknown on the respective side.
    pub fn resolve(&self, source_group_id: Option<&str>) -> Option<&str> {
        let name = self.source_group_name(source_group_id?)?;
        self.target_name_to_id.get(name).map(String::as_str)
    }
}
