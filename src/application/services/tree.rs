//! Tree loading and export service
//!
//! Resolves where a session's starting tree comes from and writes exports.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::codec::parse_raw;
use crate::application::session::EditorSession;
use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{seed_tree, RawNode};
use crate::infrastructure::traits::FileSystem;

/// Service for importing raw trees and exporting sessions.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl TreeService {
    /// Create a new tree service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    /// Load the starting raw tree.
    ///
    /// Precedence: explicit `input`, then the configured `seed_file`, then
    /// the built-in seed tree.
    pub fn load_raw(&self, input: Option<&Path>) -> ApplicationResult<RawNode> {
        let source = input.or(self.settings.seed_file.as_deref());
        let Some(path) = source else {
            debug!("load_raw: using built-in seed tree");
            return Ok(seed_tree());
        };

        debug!("load_raw: path={}", path.display());
        if !self.fs.exists(path) {
            return Err(ApplicationError::FileNotFound(path.to_path_buf()));
        }
        if !self.fs.is_file(path) {
            return Err(ApplicationError::NotAFile(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree", path)?;
        parse_raw(&content, &path.display().to_string())
    }

    /// Start an editing session on the tree resolved by [`load_raw`](Self::load_raw).
    pub fn open_session(&self, input: Option<&Path>) -> ApplicationResult<EditorSession> {
        let raw = self.load_raw(input)?;
        Ok(EditorSession::from_raw(
            &raw,
            self.settings.new_child.clone(),
        ))
    }

    /// Export text for the session, using the configured indentation.
    pub fn export_text(&self, session: &EditorSession) -> ApplicationResult<String> {
        session.export_json(self.settings.export.indent)
    }

    /// Write the session's export to `path`, creating parent directories.
    pub fn write_export(&self, session: &EditorSession, path: &Path) -> ApplicationResult<()> {
        let text = self.export_text(session)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &format!("{}\n", text))
            .with_path_context("write export", path)?;
        info!("wrote export to {}", path.display());
        Ok(())
    }

    /// Parse a raw tree from already-read text, e.g. stdin.
    pub fn parse(&self, content: &str, source_name: &str) -> ApplicationResult<RawNode> {
        parse_raw(content, source_name)
    }
}
