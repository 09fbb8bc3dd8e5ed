//! Application layer: editing session, text codec, and services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod codec;
pub mod edit_op;
pub mod error;
pub mod error_ext;
pub mod services;
pub mod session;

pub use codec::{parse_raw, to_pretty_json, DEFAULT_INDENT};
pub use edit_op::{EditOp, NodePath};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use session::EditorSession;
