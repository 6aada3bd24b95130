//! Collaborator interfaces for persistence and uploads.
//!
//! The editor talks to the backend only at explicit save, rename and upload
//! points; nothing here is called while an edit or a drag is in progress.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Response code the backend uses for success
pub const CODE_OK: i32 = 200;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDetail {
    /// Persisted content; may be empty, JSON, or legacy plain text
    #[serde(default)]
    pub content: String,
}

/// Partial update: `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub id: String,
    #[serde(rename = "newName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "newContent", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreResponse {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl StoreResponse {
    pub fn ok() -> Self {
        Self {
            code: CODE_OK,
            msg: None,
        }
    }

    pub fn failed(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: Some(msg.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub code: i32,
    /// Resolved image URL on success
    #[serde(default)]
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

pub trait DocumentStore {
    fn get_detail(&mut self, id: &str) -> Result<DocumentDetail, StoreError>;

    fn update_info(&mut self, update: UpdateInfo) -> Result<StoreResponse, StoreError>;
}

pub trait ImageUpload {
    fn upload_image(&mut self, file: &[u8]) -> Result<UploadResponse, StoreError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredDocument {
    pub name: String,
    pub content: String,
}

/// In-process store, for tests and offline tooling
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: HashMap<String, StoredDocument>,
    /// When set, every update is answered with this response
    reject_with: Option<StoreResponse>,
    pub update_calls: usize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.documents.insert(
            id.into(),
            StoredDocument {
                name: name.into(),
                content: content.into(),
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<&StoredDocument> {
        self.documents.get(id)
    }

    /// Make subsequent updates fail with `response`; `None` restores normal behaviour
    pub fn reject_updates(&mut self, response: Option<StoreResponse>) {
        self.reject_with = response;
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get_detail(&mut self, id: &str) -> Result<DocumentDetail, StoreError> {
        self.documents
            .get(id)
            .map(|doc| DocumentDetail {
                content: doc.content.clone(),
            })
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn update_info(&mut self, update: UpdateInfo) -> Result<StoreResponse, StoreError> {
        self.update_calls += 1;
        if let Some(response) = &self.reject_with {
            return Ok(response.clone());
        }

        let doc = self
            .documents
            .get_mut(&update.id)
            .ok_or_else(|| StoreError::NotFound(update.id.clone()))?;
        if let Some(name) = update.name {
            doc.name = name;
        }
        if let Some(content) = update.content {
            doc.content = content;
        }
        Ok(StoreResponse::ok())
    }
}
