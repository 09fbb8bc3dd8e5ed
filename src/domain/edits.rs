//! Node transforms used with [`update_node`](crate::domain::update_node).
//!
//! Each function is pure: it reads the addressed node and returns its
//! replacement. Children are shared, never copied.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::domain::identity::assign_ids;
use crate::domain::node::{RawNode, TagNode};

/// Name and data given to nodes created by [`add_child`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildTemplate {
    pub name: String,
    pub data: String,
}

impl Default for ChildTemplate {
    fn default() -> Self {
        Self {
            name: "New Child".into(),
            data: "Data".into(),
        }
    }
}

pub fn toggle_collapse(node: &TagNode) -> TagNode {
    TagNode {
        is_collapsed: !node.is_collapsed,
        ..node.clone()
    }
}

/// Replace the data value; children are left untouched.
pub fn update_data(node: &TagNode, data: &str) -> TagNode {
    TagNode {
        data: Some(data.to_string()),
        ..node.clone()
    }
}

/// Replace the name as given. Trimming and skipping empty or unchanged
/// names is the caller's job.
pub fn rename(node: &TagNode, name: &str) -> TagNode {
    TagNode {
        name: name.to_string(),
        ..node.clone()
    }
}

/// Append a freshly identified child built from `template`.
///
/// The target loses its `data` (a node with children carries no data) and
/// is expanded so the new child is visible.
pub fn add_child(node: &TagNode, template: &ChildTemplate) -> TagNode {
    let child = assign_ids(&RawNode::leaf(&template.name, &template.data));
    let mut children: Vec<_> = node.child_refs().iter().map(Rc::clone).collect();
    children.push(child);

    TagNode {
        id: node.id.clone(),
        name: node.name.clone(),
        children: Some(children),
        data: None,
        is_collapsed: false,
    }
}
