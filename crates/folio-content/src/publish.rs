//! Node publication service.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::node::NodeId;

/// A record published into the content graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedNode {
    /// Node ID. Publishing twice with the same ID replaces the first record.
    pub id: NodeId,
    /// Type name (e.g., "NavData").
    #[serde(rename = "type")]
    pub node_type: String,
    /// Record payload.
    pub payload: serde_json::Value,
    /// SHA-256 of the serialized payload, hex encoded.
    pub content_digest: String,
}

impl PublishedNode {
    /// Build a record from a serializable payload, computing its digest.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized to JSON.
    pub fn new<T: Serialize>(
        id: NodeId,
        node_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        let payload = serde_json::to_value(payload)?;
        let content_digest = content_digest(&payload);
        Ok(Self {
            id,
            node_type: node_type.into(),
            payload,
            content_digest,
        })
    }
}

/// Compute the content digest of a JSON value.
#[must_use]
pub fn content_digest(value: &serde_json::Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Accepts published records and upserts them by ID.
pub trait NodePublisher {
    /// Insert or replace a record.
    fn create_node(&mut self, node: PublishedNode);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_digest_is_stable() {
        let value = json!({"navItems": [{"id": "a", "title": "Intro"}]});
        assert_eq!(content_digest(&value), content_digest(&value.clone()));
        assert_eq!(content_digest(&value).len(), 64);
    }

    #[test]
    fn test_digest_changes_with_payload() {
        assert_ne!(
            content_digest(&json!({"navItems": []})),
            content_digest(&json!({"navItems": [{"id": "a"}]}))
        );
    }

    #[test]
    fn test_new_computes_digest() {
        let node = PublishedNode::new(NodeId::new("n1"), "NavData", &json!({"navItems": []})).unwrap();
        assert_eq!(node.node_type, "NavData");
        assert_eq!(node.content_digest, content_digest(&node.payload));
    }
}
