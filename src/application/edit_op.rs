//! Edit operations addressed by name path, as typed on the command line.

use std::fmt;
use std::str::FromStr;

use crate::application::ApplicationError;

/// Separator between names in a node path (`root/child1`).
pub const PATH_SEPARATOR: char = '/';

/// One edit against the current tree.
///
/// Text form: `toggle:PATH`, `rename:PATH=NAME`, `data:PATH=VALUE`,
/// `add:PATH`. A value may itself contain `=`; only the first one splits.
/// A new name may not contain [`PATH_SEPARATOR`], so a renamed node stays
/// addressable by later edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Toggle { path: NodePath },
    Rename { path: NodePath, name: String },
    SetData { path: NodePath, data: String },
    AddChild { path: NodePath },
}

impl EditOp {
    pub fn path(&self) -> &NodePath {
        match self {
            EditOp::Toggle { path }
            | EditOp::Rename { path, .. }
            | EditOp::SetData { path, .. }
            | EditOp::AddChild { path } => path,
        }
    }
}

/// Names from the root down to the addressed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn segments(&self) -> Vec<&str> {
        self.0.iter().map(String::as_str).collect()
    }
}

impl FromStr for NodePath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s
            .split(PATH_SEPARATOR)
            .map(|segment| segment.trim().to_string())
            .collect();
        if segments.iter().any(String::is_empty) {
            return Err(format!("empty name in path '{}'", s));
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl FromStr for EditOp {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| ApplicationError::InvalidEdit {
            op: s.to_string(),
            message,
        };

        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected KIND:PATH".to_string()))?;

        let with_value = |rest: &str| -> Result<(NodePath, String), ApplicationError> {
            let (path, value) = rest
                .split_once('=')
                .ok_or_else(|| invalid("expected PATH=VALUE".to_string()))?;
            Ok((path.parse().map_err(invalid)?, value.to_string()))
        };

        match kind.trim() {
            "toggle" => Ok(EditOp::Toggle {
                path: rest.parse().map_err(invalid)?,
            }),
            "add" => Ok(EditOp::AddChild {
                path: rest.parse().map_err(invalid)?,
            }),
            "rename" => {
                let (path, name) = with_value(rest)?;
                if name.contains(PATH_SEPARATOR) {
                    return Err(invalid(format!(
                        "new name must not contain '{}'",
                        PATH_SEPARATOR
                    )));
                }
                Ok(EditOp::Rename { path, name })
            }
            "data" => {
                let (path, data) = with_value(rest)?;
                Ok(EditOp::SetData { path, data })
            }
            other => Err(invalid(format!(
                "unknown kind '{}' (expected toggle, rename, data, add)",
                other
            ))),
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOp::Toggle { path } => write!(f, "toggle:{}", path),
            EditOp::Rename { path, name } => write!(f, "rename:{}={}", path, name),
            EditOp::SetData { path, data } => write!(f, "data:{}={}", path, data),
            EditOp::AddChild { path } => write!(f, "add:{}", path),
        }
    }
}
