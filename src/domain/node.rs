//! Tree node shapes: the raw import/export shape and the editable shape.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shared, immutable reference to an editable node.
///
/// Edits never mutate a node in place; they build new nodes along the
/// root-to-target path and clone these references for everything else.
pub type TagNodeRef = Rc<TagNode>;

/// Serialization-ready node: a name with optional children or data.
///
/// A node should carry either `children` or `data`, never both. The type
/// does not enforce this; add-child and export do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl RawNode {
    /// Bare node carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
            data: None,
        }
    }

    pub fn leaf(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: None,
            data: Some(data.into()),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<RawNode>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
            data: None,
        }
    }
}

/// Opaque node identifier, unique within an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable node: a raw node decorated with an id and a collapse flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    /// Assigned once at creation, never changed by edits
    pub id: NodeId,
    pub name: String,
    pub children: Option<Vec<TagNodeRef>>,
    pub data: Option<String>,
    /// UI visibility toggle, false (expanded) on creation
    pub is_collapsed: bool,
}

impl TagNode {
    /// Copy of this node with a replaced children sequence.
    ///
    /// The children themselves are shared, not copied.
    pub fn with_children(&self, children: Vec<TagNodeRef>) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            children: Some(children),
            data: self.data.clone(),
            is_collapsed: self.is_collapsed,
        }
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Children in order; empty when the node has none.
    pub fn child_refs(&self) -> &[TagNodeRef] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self
            .child_refs()
            .iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    /// Height of this subtree (a single node has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .child_refs()
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, children: Option<Vec<TagNodeRef>>) -> TagNodeRef {
        Rc::new(TagNode {
            id: NodeId::generate(),
            name: name.to_string(),
            children,
            data: None,
            is_collapsed: false,
        })
    }

    #[test]
    fn given_raw_leaf_when_serialized_then_omits_children_key() {
        let json = serde_json::to_string(&RawNode::leaf("a", "x")).unwrap();
        assert_eq!(json, r#"{"name":"a","data":"x"}"#);
    }

    #[test]
    fn given_json_without_optional_fields_when_deserialized_then_fields_are_none() {
        let raw: RawNode = serde_json::from_str(r#"{"name":"bare"}"#).unwrap();
        assert_eq!(raw, RawNode::named("bare"));
    }

    #[test]
    fn given_generated_ids_when_compared_then_differ() {
        assert_ne!(NodeId::generate(), NodeId::generate());
    }

    #[test]
    fn given_nested_nodes_when_counting_then_counts_whole_subtree() {
        let tree = node(
            "root",
            Some(vec![node("a", Some(vec![node("a1", None)])), node("b", None)]),
        );
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
        assert!(tree.has_children());
    }

    #[test]
    fn given_empty_children_list_when_checking_then_has_no_children() {
        let tree = node("root", Some(vec![]));
        assert!(!tree.has_children());
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn given_node_when_replacing_children_then_keeps_identity_fields() {
        let child = node("c", None);
        let parent = node("p", None);
        let rebuilt = parent.with_children(vec![Rc::clone(&child)]);
        assert_eq!(rebuilt.id, parent.id);
        assert!(Rc::ptr_eq(&rebuilt.child_refs()[0], &child));
    }
}
