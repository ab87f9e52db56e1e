//! Content query service.

use crate::node::ContentNode;

/// Result of the page-creation content query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentQueryResult {
    /// All Markdown/MDX nodes, in ingestion order.
    pub mdx: Vec<ContentNode>,
    /// All notebook nodes, in ingestion order.
    pub notebooks: Vec<ContentNode>,
}

/// Error reported by the content query service.
///
/// Carries every message the query produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("content query failed: {}", .errors.join("; "))]
pub struct QueryError {
    /// Error messages.
    pub errors: Vec<String>,
}

impl QueryError {
    /// Create a query error with a single message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

/// Executes the content query against the ingested content graph.
pub trait ContentQuery {
    /// Return all MDX and notebook nodes with their derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the content graph cannot be queried.
    fn query_content(&self) -> Result<ContentQueryResult, QueryError>;
}
