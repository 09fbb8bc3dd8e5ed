//! Copy-on-write updates and lookups over an editable tree.

use std::rc::Rc;

use tracing::{instrument, trace};

use crate::domain::error::DomainError;
use crate::domain::node::{NodeId, TagNode, TagNodeRef};

/// Apply `transform` to the node whose id is `target_id`, returning a new root.
///
/// Only nodes on the root-to-target path are rebuilt; every other subtree is
/// the same `Rc` as in `root`. If no node matches, `root` itself is returned.
///
/// The search is pre-order with children left to right. The transformed
/// node is not descended into, and once a match is found the remaining
/// siblings are kept as they are, so at most one node is transformed even
/// when ids are duplicated.
#[instrument(level = "debug", skip(root, transform), fields(target = %target_id))]
pub fn update_node<F>(root: &TagNodeRef, target_id: &NodeId, transform: F) -> TagNodeRef
where
    F: Fn(&TagNode) -> TagNode,
{
    update_recursive(root, target_id, &transform)
}

fn update_recursive<F>(node: &TagNodeRef, target_id: &NodeId, transform: &F) -> TagNodeRef
where
    F: Fn(&TagNode) -> TagNode,
{
    if node.id == *target_id {
        trace!("match: {}", node.name);
        return Rc::new(transform(node));
    }

    let Some(children) = &node.children else {
        return Rc::clone(node);
    };

    let mut updated: Vec<TagNodeRef> = Vec::with_capacity(children.len());
    let mut changed = false;
    for child in children {
        if changed {
            updated.push(Rc::clone(child));
            continue;
        }
        let next = update_recursive(child, target_id, transform);
        changed = !Rc::ptr_eq(&next, child);
        updated.push(next);
    }

    if changed {
        Rc::new(node.with_children(updated))
    } else {
        Rc::clone(node)
    }
}

/// Find a node by id (pre-order, first match).
pub fn find_node<'a>(root: &'a TagNodeRef, target_id: &NodeId) -> Option<&'a TagNodeRef> {
    if root.id == *target_id {
        return Some(root);
    }
    root.child_refs()
        .iter()
        .find_map(|child| find_node(child, target_id))
}

/// Resolve a node by its names from the root down, e.g. `["root", "child1"]`.
///
/// The first segment must name the root. At each further step the first
/// child (left to right) with a matching name is taken.
pub fn find_by_path(root: &TagNodeRef, path: &[&str]) -> Result<TagNodeRef, DomainError> {
    let (first, rest) = path.split_first().ok_or(DomainError::EmptyPath)?;
    if root.name != *first {
        return Err(DomainError::NodeNotFound(path.join("/")));
    }

    let mut current = root;
    for segment in rest {
        current = current
            .child_refs()
            .iter()
            .find(|child| child.name == *segment)
            .ok_or_else(|| DomainError::NodeNotFound(path.join("/")))?;
    }
    Ok(Rc::clone(current))
}
