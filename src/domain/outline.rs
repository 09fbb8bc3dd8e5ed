//! Text outline of an editable tree, rendered with `termtree`.

use termtree::Tree;
use tracing::instrument;

use crate::domain::node::TagNode;

/// Marker shown in front of a collapsed node that hides content.
pub const COLLAPSED_MARKER: &str = "[+]";

pub trait OutlineConvert {
    fn to_outline(&self) -> Tree<String>;
}

impl OutlineConvert for TagNode {
    /// Leaves render as `name: data`. A collapsed node keeps its own line
    /// but hides its data and descendants.
    #[instrument(level = "trace", skip(self), fields(name = %self.name))]
    fn to_outline(&self) -> Tree<String> {
        let has_content = self.has_children() || self.data.is_some();
        if self.is_collapsed && has_content {
            return Tree::new(format!("{} {}", COLLAPSED_MARKER, self.name));
        }

        let label = match &self.data {
            Some(data) => format!("{}: {}", self.name, data),
            None => self.name.clone(),
        };

        let leaves: Vec<_> = self
            .child_refs()
            .iter()
            .map(|child| child.to_outline())
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}
