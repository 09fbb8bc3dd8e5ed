//! Export normalization: editable tree back to the raw shape.

use tracing::{instrument, warn};

use crate::domain::node::{RawNode, TagNode};

/// Strip ids and collapse flags and re-assert the leaf-xor-children rule.
///
/// - `data` present: `{name, data}`. Children, if any, are dropped.
/// - no `data`, at least one child: `{name, children}`.
/// - otherwise: `{name}`.
///
/// Dropping children in the first case is intended. It cannot happen through
/// the edit operations (add-child removes `data`), only through imported or
/// hand-built trees, and it is reported as a warning.
#[instrument(level = "trace", skip(node), fields(name = %node.name))]
pub fn normalize_for_export(node: &TagNode) -> RawNode {
    if let Some(data) = &node.data {
        if node.has_children() {
            warn!(
                node = %node.name,
                dropped = node.child_refs().len(),
                "node has both data and children; exporting data only"
            );
        }
        return RawNode::leaf(&node.name, data);
    }

    if node.has_children() {
        let children = node
            .child_refs()
            .iter()
            .map(|child| normalize_for_export(child))
            .collect();
        return RawNode::branch(&node.name, children);
    }

    RawNode::named(&node.name)
}
