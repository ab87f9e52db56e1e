//! Node types of the content graph.
//!
//! The graph holds three kinds of records:
//! - [`FileMetadata`] for every file discovered by ingestion
//! - [`RemoteSource`] for git remotes that files were pulled from
//! - [`ContentNode`] for documents (Markdown/MDX and notebooks)
//!
//! Content nodes reference their file by [`NodeId`]; files reference their
//! remote the same way.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for deterministic node IDs.
const NODE_NAMESPACE: Uuid = Uuid::from_u128(0x6f0c_55a1_93d4_4b8e_a1c2_0e7d_4f3b_9a15);

/// Identifier of a node in the content graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a stable identifier from a seed string.
    ///
    /// The same seed always yields the same ID (UUID v5), so re-publishing a
    /// record under the same seed replaces the previous one.
    #[must_use]
    pub fn derive(seed: &str) -> Self {
        Self(Uuid::new_v5(&NODE_NAMESPACE, seed.as_bytes()).to_string())
    }

    /// Identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Internal type tag of a content node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Markdown or MDX document.
    Mdx,
    /// Jupyter notebook.
    JupyterNotebook,
    /// Any other node type. Ignored by slug derivation and page creation.
    Other(String),
}

impl ContentKind {
    /// Type name as used by the content graph.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mdx => "Mdx",
            Self::JupyterNotebook => "JupyterNotebook",
            Self::Other(name) => name,
        }
    }

    /// Check if this kind is a document that gets a derived slug.
    #[must_use]
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Mdx | Self::JupyterNotebook)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata of a file discovered by ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Node ID of the file.
    pub id: NodeId,
    /// Base name without extension (e.g., "intro", "README", "index").
    pub name: String,
    /// Extension without the dot (e.g., "md", "ipynb").
    pub extension: String,
    /// Name of the content source instance the file was found in.
    pub source_instance_name: String,
    /// Path relative to the source root, including extension.
    pub relative_path: PathBuf,
    /// Absolute path on disk.
    pub absolute_path: PathBuf,
    /// Remote source the file was pulled from, if any.
    pub remote: Option<NodeId>,
}

/// Metadata of a git remote that content was pulled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSource {
    /// Node ID of the remote.
    pub id: NodeId,
    /// Source instance name the remote was checked out as.
    pub source_instance_name: String,
    /// Repository URL.
    pub url: String,
    /// Checked out branch, if pinned.
    pub branch: Option<String>,
}

/// A document in the content graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    /// Node ID.
    pub id: NodeId,
    /// Content kind.
    pub kind: ContentKind,
    /// Absolute path of the underlying file.
    pub file_absolute_path: PathBuf,
    /// Title from front matter.
    pub title: Option<String>,
    /// System-assigned slug attribute (MDX only).
    ///
    /// This is either the front matter `slug` or the source-relative path
    /// without extension. Distinct from the derived `slug` field.
    pub slug: Option<String>,
    /// Parent file node.
    pub parent: NodeId,
    fields: BTreeMap<String, String>,
}

impl ContentNode {
    /// Create a content node without derived fields.
    #[must_use]
    pub fn new(
        id: NodeId,
        kind: ContentKind,
        parent: NodeId,
        file_absolute_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id,
            kind,
            file_absolute_path: file_absolute_path.into(),
            title: None,
            slug: None,
            parent,
            fields: BTreeMap::new(),
        }
    }

    /// Set the front matter title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the system slug attribute.
    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Attach a derived field, replacing any previous value.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Get a derived field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All derived fields.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Absolute file path as a string, for substring matching.
    #[must_use]
    pub fn absolute_path_str(&self) -> std::borrow::Cow<'_, str> {
        self.file_absolute_path.to_string_lossy()
    }
}
