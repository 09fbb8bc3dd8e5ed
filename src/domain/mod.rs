//! Domain layer: tree shapes and the pure operations over them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod edits;
pub mod error;
pub mod export;
pub mod identity;
pub mod node;
pub mod outline;
pub mod seed;
pub mod update;

pub use edits::{add_child, rename, toggle_collapse, update_data, ChildTemplate};
pub use error::DomainError;
pub use export::normalize_for_export;
pub use identity::assign_ids;
pub use node::{NodeId, RawNode, TagNode, TagNodeRef};
pub use outline::{OutlineConvert, COLLAPSED_MARKER};
pub use seed::seed_tree;
pub use update::{find_by_path, find_node, update_node};
