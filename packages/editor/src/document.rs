//! # Document Handle
//!
//! One open document and its editing state.
//!
//! A Document is created on load, edited only through its command engine,
//! and dropped when the editing session ends. Saving serializes a snapshot
//! and hands it to the store; a failed save never rolls back local edits.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Deserialize → Edit → Serialize → Save
//!   ↓         ↓          ↓        ↓         ↓
//! Store  ContentTree  Commands   JSON     Store
//! ```

use crate::config::EditorConfig;
use crate::engine::{CommandEngine, CommandSink};
use crate::errors::{EditError, EditorError};
use crate::interactive::ImageResizeSession;
use crate::store::{DocumentStore, ImageUpload, UpdateInfo, UploadResponse, CODE_OK};
use crate::Command;
use folio_document::{serializer, ContentTree, FormatError, Path};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Where the initial content of a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    /// No stored content; started from the empty document
    Empty,

    /// Parsed from persisted JSON
    Persisted,

    /// Stored content was not valid JSON and was loaded as plain text
    PlainTextFallback,
}

/// Editable document
#[derive(Debug)]
pub struct Document {
    /// Backend identifier
    pub id: String,

    name: Option<String>,
    origin: ContentOrigin,
    engine: CommandEngine,

    /// Sequence number of the last revision known to be persisted
    saved_seq: Option<u64>,

    drag_timeout: Duration,
}

impl Document {
    /// Build a document from stored content.
    ///
    /// Empty content gives the empty document. Content that is not JSON at all
    /// is wrapped in a single paragraph when `plain_text_fallback` is enabled.
    /// JSON that is not a valid document is always an error, so it is never
    /// overwritten by its own text on the next save.
    pub fn from_content(
        id: impl Into<String>,
        content: &str,
        config: &EditorConfig,
    ) -> Result<Self, EditorError> {
        let id = id.into();
        let (tree, origin) = parse_content(&id, content, config)?;

        let saved_seq = match origin {
            ContentOrigin::PlainTextFallback => None,
            _ => Some(0),
        };

        Ok(Self {
            id,
            name: None,
            origin,
            engine: CommandEngine::with_history_limit(tree, config.history_limit),
            saved_seq,
            drag_timeout: config.drag_timeout(),
        })
    }

    /// Fetch and open a document from the store
    #[instrument(skip(store, config))]
    pub fn load<S>(store: &mut S, id: &str, config: &EditorConfig) -> Result<Self, EditorError>
    where
        S: DocumentStore + ?Sized,
    {
        let detail = store.get_detail(id)?;
        let doc = Self::from_content(id, &detail.content, config)?;
        info!(origin = ?doc.origin, "Document loaded");
        Ok(doc)
    }

    /// Replace local content with the stored version, dropping undo history
    #[instrument(skip(self, store, config), fields(doc_id = %self.id))]
    pub fn reload<S>(&mut self, store: &mut S, config: &EditorConfig) -> Result<(), EditorError>
    where
        S: DocumentStore + ?Sized,
    {
        let detail = store.get_detail(&self.id)?;
        let (tree, origin) = parse_content(&self.id, &detail.content, config)?;

        self.engine.reset(tree);
        self.origin = origin;
        self.saved_seq = match origin {
            ContentOrigin::PlainTextFallback => None,
            _ => Some(self.engine.revision().seq()),
        };
        info!(origin = ?origin, "Document reloaded");
        Ok(())
    }

    pub fn tree(&self) -> &ContentTree {
        self.engine.tree()
    }

    pub fn engine(&self) -> &CommandEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CommandEngine {
        &mut self.engine
    }

    pub fn origin(&self) -> ContentOrigin {
        self.origin
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn apply(&mut self, command: Command) -> Result<ContentTree, EditorError> {
        Ok(self.engine.apply(command)?)
    }

    /// Resize session for one image node view, using the configured drag timeout
    pub fn image_resize_session(&self) -> ImageResizeSession {
        ImageResizeSession::with_timeout(self.drag_timeout)
    }

    /// Whether the current revision differs from the last saved one
    pub fn is_dirty(&self) -> bool {
        self.saved_seq != Some(self.engine.revision().seq())
    }

    /// Serialized current content
    pub fn content(&self) -> String {
        serializer::serialize(self.tree())
    }

    /// Persist the current revision.
    ///
    /// On failure the document keeps every local edit and stays dirty.
    #[instrument(skip(self, store), fields(doc_id = %self.id))]
    pub fn save<S>(&mut self, store: &mut S) -> Result<(), EditorError>
    where
        S: DocumentStore + ?Sized,
    {
        let seq = self.engine.revision().seq();
        let update = UpdateInfo {
            id: self.id.clone(),
            name: None,
            content: Some(self.content()),
        };

        let response = store.update_info(update).map_err(|e| {
            warn!(error = %e, "Save failed, keeping local state");
            EditorError::Save(e.to_string())
        })?;

        if !response.is_ok() {
            let msg = response
                .msg
                .unwrap_or_else(|| format!("server answered {}", response.code));
            warn!(code = response.code, msg = %msg, "Save rejected, keeping local state");
            return Err(EditorError::Save(msg));
        }

        self.saved_seq = Some(seq);
        info!(seq, "Document saved");
        Ok(())
    }

    pub fn rename<S>(&mut self, store: &mut S, name: &str) -> Result<(), EditorError>
    where
        S: DocumentStore + ?Sized,
    {
        let response = store.update_info(UpdateInfo {
            id: self.id.clone(),
            name: Some(name.to_string()),
            content: None,
        })?;

        if !response.is_ok() {
            return Err(EditorError::Save(
                response.msg.unwrap_or_else(|| "rename rejected".to_string()),
            ));
        }

        self.name = Some(name.to_string());
        Ok(())
    }

    /// Insert an image once its upload has resolved to a URL
    pub fn insert_uploaded_image(
        &mut self,
        at: Path,
        upload: UploadResponse,
        alt: Option<String>,
    ) -> Result<ContentTree, EditorError> {
        if upload.code != CODE_OK {
            let msg = upload
                .msg
                .unwrap_or_else(|| format!("server answered {}", upload.code));
            return Err(EditorError::Upload(msg));
        }

        debug!(src = %upload.data, at = %at, "Inserting uploaded image");
        self.apply(Command::InsertImage {
            at,
            src: upload.data,
            alt,
        })
    }

    /// Upload `file` and insert the resulting image at `at`
    pub fn upload_and_insert<U>(
        &mut self,
        uploader: &mut U,
        file: &[u8],
        at: Path,
        alt: Option<String>,
    ) -> Result<ContentTree, EditorError>
    where
        U: ImageUpload + ?Sized,
    {
        let response = uploader
            .upload_image(file)
            .map_err(|e| EditorError::Upload(e.to_string()))?;
        self.insert_uploaded_image(at, response, alt)
    }
}

/// Turn stored content into a tree, applying the plain-text fallback
fn parse_content(
    id: &str,
    content: &str,
    config: &EditorConfig,
) -> Result<(ContentTree, ContentOrigin), EditorError> {
    if content.trim().is_empty() {
        return Ok((ContentTree::empty(), ContentOrigin::Empty));
    }

    match serializer::deserialize(content) {
        Ok(tree) => Ok((tree, ContentOrigin::Persisted)),
        Err(e @ FormatError::Syntax { .. }) if config.plain_text_fallback => {
            warn!(doc_id = %id, error = %e, "Content is not JSON, loading as plain text");
            Ok((ContentTree::plain_text(content), ContentOrigin::PlainTextFallback))
        }
        Err(e) => Err(e.into()),
    }
}

impl CommandSink for Document {
    fn tree(&self) -> &ContentTree {
        Document::tree(self)
    }

    fn apply(&mut self, command: Command) -> Result<ContentTree, EditError> {
        self.engine.apply(command)
    }
}
