//! Editing session: the single owner of the current tree.

use std::rc::Rc;

use tracing::{debug, instrument};

use crate::application::codec::to_pretty_json;
use crate::application::edit_op::EditOp;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    add_child, assign_ids, find_by_path, find_node, normalize_for_export, rename, seed_tree,
    toggle_collapse, update_data, update_node, ChildTemplate, NodeId, RawNode, TagNode,
    TagNodeRef,
};

/// Holds the current root and replaces it wholesale after every edit.
///
/// Edits on an uninitialized session are no-ops. Every edit returns whether
/// the root changed, i.e. whether the target id was found.
#[derive(Debug, Default)]
pub struct EditorSession {
    root: Option<TagNodeRef>,
    template: ChildTemplate,
}

impl EditorSession {
    /// Empty session; nothing is loaded until [`load`](Self::load).
    pub fn new(template: ChildTemplate) -> Self {
        Self {
            root: None,
            template,
        }
    }

    /// Session initialized from the built-in seed tree.
    pub fn seeded() -> Self {
        Self::from_raw(&seed_tree(), ChildTemplate::default())
    }

    pub fn from_raw(raw: &RawNode, template: ChildTemplate) -> Self {
        let mut session = Self::new(template);
        session.load(raw);
        session
    }

    /// Replace the current tree with a freshly identified copy of `raw`.
    #[instrument(level = "debug", skip(self, raw), fields(name = %raw.name))]
    pub fn load(&mut self, raw: &RawNode) {
        let root = assign_ids(raw);
        debug!("load: {} nodes", root.node_count());
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<&TagNodeRef> {
        self.root.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    pub fn toggle_collapse(&mut self, id: &NodeId) -> bool {
        self.edit(id, toggle_collapse)
    }

    pub fn update_data(&mut self, id: &NodeId, data: &str) -> bool {
        self.edit(id, |node| update_data(node, data))
    }

    /// Rename after trimming; an empty or unchanged name is skipped so the
    /// tree keeps its identity.
    pub fn rename(&mut self, id: &NodeId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            debug!("rename: skipping empty name for {}", id);
            return false;
        }
        let unchanged = self
            .root
            .as_ref()
            .and_then(|root| find_node(root, id))
            .is_some_and(|node| node.name == name);
        if unchanged {
            debug!("rename: name unchanged for {}", id);
            return false;
        }
        self.edit(id, |node| rename(node, name))
    }

    pub fn add_child(&mut self, id: &NodeId) -> bool {
        let template = self.template.clone();
        self.edit(id, |node| add_child(node, &template))
    }

    /// Apply an edit addressed by name path.
    ///
    /// Unlike the id-based edits, a path that resolves to nothing is an error.
    #[instrument(level = "debug", skip(self), fields(op = %op))]
    pub fn apply(&mut self, op: &EditOp) -> ApplicationResult<bool> {
        let root = self.root.as_ref().ok_or(ApplicationError::NotInitialized)?;
        let target = find_by_path(root, &op.path().segments())?;
        let id = target.id.clone();

        let changed = match op {
            EditOp::Toggle { .. } => self.toggle_collapse(&id),
            EditOp::Rename { name, .. } => self.rename(&id, name),
            EditOp::SetData { data, .. } => self.update_data(&id, data),
            EditOp::AddChild { .. } => self.add_child(&id),
        };
        Ok(changed)
    }

    /// Normalized raw tree, or `None` when nothing is loaded.
    pub fn export(&self) -> Option<RawNode> {
        self.root.as_deref().map(normalize_for_export)
    }

    /// Normalized tree as indented JSON text.
    pub fn export_json(&self, indent: usize) -> ApplicationResult<String> {
        let raw = self.export().ok_or(ApplicationError::NotInitialized)?;
        to_pretty_json(&raw, indent)
    }

    fn edit<F>(&mut self, id: &NodeId, transform: F) -> bool
    where
        F: Fn(&TagNode) -> TagNode,
    {
        let Some(root) = self.root.as_ref() else {
            debug!("edit: no tree loaded, ignoring {}", id);
            return false;
        };
        let updated = update_node(root, id, transform);
        if Rc::ptr_eq(&updated, root) {
            debug!("edit: {} not found", id);
            return false;
        }
        self.root = Some(updated);
        true
    }
}
