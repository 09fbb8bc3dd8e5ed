//! tagtree: editor core for small, named trees of tagged data nodes.
//!
//! - [`domain`]: tree shapes and the pure operations over them
//!   (id assignment, copy-on-write updates, export normalization)
//! - [`application`]: editing session, JSON codec, tree service
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: command-line front end
//!
//! # Example
//!
//! ```
//! use tagtree::application::EditorSession;
//!
//! let mut session = EditorSession::seeded();
//! let child2 = session.root().unwrap().child_refs()[1].id.clone();
//! session.rename(&child2, "ChildTwo");
//!
//! let exported = session.export().unwrap();
//! assert_eq!(exported.children.unwrap()[1].name, "ChildTwo");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
