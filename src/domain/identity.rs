//! Identity assignment: turns an imported raw tree into an editable one.

use std::rc::Rc;

use tracing::instrument;

use crate::domain::node::{NodeId, RawNode, TagNode, TagNodeRef};

/// Decorate every node of `raw` with a fresh id and an expanded state.
///
/// The shape is preserved exactly, including an explicitly empty
/// `children` list.
#[instrument(level = "trace", skip(raw), fields(name = %raw.name))]
pub fn assign_ids(raw: &RawNode) -> TagNodeRef {
    let children = raw
        .children
        .as_ref()
        .map(|children| children.iter().map(assign_ids).collect());

    Rc::new(TagNode {
        id: NodeId::generate(),
        name: raw.name.clone(),
        children,
        data: raw.data.clone(),
        is_collapsed: false,
    })
}
