//! JSON text boundary: parsing imported trees and pretty-printing exports.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::RawNode;

/// Indentation used for exported JSON unless configured otherwise.
pub const DEFAULT_INDENT: usize = 2;

/// Parse a raw tree from JSON text.
///
/// `source_name` only labels the error (a file path or `"<stdin>"`).
/// Unknown keys such as `id` or `isCollapsed` are ignored.
pub fn parse_raw(json: &str, source_name: &str) -> ApplicationResult<RawNode> {
    let raw: RawNode = serde_json::from_str(json).map_err(|e| ApplicationError::Import {
        source_name: source_name.to_string(),
        source: e,
    })?;
    debug!("parse_raw: imported '{}' from {}", raw.name, source_name);
    Ok(raw)
}

/// Serialize a raw tree as indented JSON with `indent` spaces per level.
pub fn to_pretty_json(raw: &RawNode, indent: usize) -> ApplicationResult<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    raw.serialize(&mut serializer)
        .map_err(ApplicationError::Export)?;

    String::from_utf8(buf).map_err(|e| ApplicationError::OperationFailed {
        context: "encode exported JSON".to_string(),
        source: Box::new(e),
    })
}
