//! In-memory content graph.

use std::collections::HashMap;

use crate::lookup::NodeLookup;
use crate::node::{ContentKind, ContentNode, FileMetadata, NodeId, RemoteSource};
use crate::publish::{NodePublisher, PublishedNode};
use crate::query::{ContentQuery, ContentQueryResult, QueryError};

/// In-memory content graph populated by ingestion.
///
/// Content nodes keep their insertion order so that queries, and therefore
/// page registration, are deterministic.
#[derive(Debug, Default)]
pub struct ContentStore {
    files: HashMap<NodeId, FileMetadata>,
    remotes: HashMap<NodeId, RemoteSource>,
    content: Vec<ContentNode>,
    content_index: HashMap<NodeId, usize>,
    published: HashMap<NodeId, PublishedNode>,
}

impl ContentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace file metadata.
    pub fn add_file(&mut self, file: FileMetadata) {
        self.files.insert(file.id.clone(), file);
    }

    /// Insert or replace remote-source metadata.
    pub fn add_remote(&mut self, remote: RemoteSource) {
        self.remotes.insert(remote.id.clone(), remote);
    }

    /// Insert a content node, replacing an existing node with the same ID in place.
    pub fn add_content(&mut self, node: ContentNode) {
        if let Some(&idx) = self.content_index.get(&node.id) {
            self.content[idx] = node;
        } else {
            self.content_index.insert(node.id.clone(), self.content.len());
            self.content.push(node);
        }
    }

    /// All content nodes in insertion order.
    #[must_use]
    pub fn content_nodes(&self) -> &[ContentNode] {
        &self.content
    }

    /// Look up a content node.
    #[must_use]
    pub fn content_node(&self, id: &NodeId) -> Option<&ContentNode> {
        self.content_index.get(id).map(|&idx| &self.content[idx])
    }

    /// Look up a content node for mutation.
    pub fn content_node_mut(&mut self, id: &NodeId) -> Option<&mut ContentNode> {
        self.content_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.content[idx])
    }

    /// Look up a published record.
    #[must_use]
    pub fn published(&self, id: &NodeId) -> Option<&PublishedNode> {
        self.published.get(id)
    }

    fn nodes_of_kind(&self, kind: &ContentKind) -> Vec<ContentNode> {
        self.content
            .iter()
            .filter(|node| node.kind == *kind)
            .cloned()
            .collect()
    }
}

impl NodeLookup for ContentStore {
    fn file(&self, id: &NodeId) -> Option<&FileMetadata> {
        self.files.get(id)
    }

    fn remote(&self, id: &NodeId) -> Option<&RemoteSource> {
        self.remotes.get(id)
    }
}

impl ContentQuery for ContentStore {
    fn query_content(&self) -> Result<ContentQueryResult, QueryError> {
        Ok(ContentQueryResult {
            mdx: self.nodes_of_kind(&ContentKind::Mdx),
            notebooks: self.nodes_of_kind(&ContentKind::JupyterNotebook),
        })
    }
}

impl NodePublisher for ContentStore {
    fn create_node(&mut self, node: PublishedNode) {
        tracing::debug!(id = %node.id, node_type = %node.node_type, "Publishing node");
        self.published.insert(node.id.clone(), node);
    }
}
