//! Node lookup service.

use crate::node::{FileMetadata, NodeId, RemoteSource};

/// Resolves node references to file and remote-source metadata.
pub trait NodeLookup {
    /// Resolve a parent reference to the file it points at.
    fn file(&self, id: &NodeId) -> Option<&FileMetadata>;

    /// Resolve a file's remote reference to remote-source metadata.
    fn remote(&self, id: &NodeId) -> Option<&RemoteSource>;

    /// Resolve the remote source of a file, if it has one.
    fn remote_of(&self, file: &FileMetadata) -> Option<&RemoteSource> {
        file.remote.as_ref().and_then(|id| self.remote(id))
    }
}
