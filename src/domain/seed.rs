//! Built-in starting tree for a fresh session.

use crate::domain::node::RawNode;

/// The tree every session starts from when no input file is given.
///
/// ```text
/// root
/// ├─ child1
/// │   ├─ child1-child1  data: "c1-c1 Hello"
/// │   └─ child1-child2  data: "c1-c2 JS"
/// └─ child2              data: "c2 World"
/// ```
pub fn seed_tree() -> RawNode {
    RawNode::branch(
        "root",
        vec![
            RawNode::branch(
                "child1",
                vec![
                    RawNode::leaf("child1-child1", "c1-c1 Hello"),
                    RawNode::leaf("child1-child2", "c1-c2 JS"),
                ],
            ),
            RawNode::leaf("child2", "c2 World"),
        ],
    )
}
