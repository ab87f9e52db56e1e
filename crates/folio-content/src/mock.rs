//! Mock content query for testing.
//!
//! Provides [`MockQuery`] for exercising page creation without a populated
//! content graph, including the query failure path.

use crate::node::ContentNode;
use crate::query::{ContentQuery, ContentQueryResult, QueryError};

/// Content query returning a canned result.
///
/// # Example
///
/// ```ignore
/// use folio_content::{ContentQuery, MockQuery};
///
/// let query = MockQuery::new().with_mdx(node);
/// let result = query.query_content().unwrap();
///
/// let failing = MockQuery::failing("Cannot query field \"slug\"");
/// assert!(failing.query_content().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockQuery {
    result: Result<ContentQueryResult, QueryError>,
}

impl Default for MockQuery {
    fn default() -> Self {
        Self {
            result: Ok(ContentQueryResult::default()),
        }
    }
}

impl MockQuery {
    /// Create a query returning an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a query that always fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(QueryError::new(message)),
        }
    }

    /// Add an MDX node to the result.
    ///
    /// Has no effect on a failing query.
    #[must_use]
    pub fn with_mdx(mut self, node: ContentNode) -> Self {
        if let Ok(result) = &mut self.result {
            result.mdx.push(node);
        }
        self
    }

    /// Add a notebook node to the result.
    ///
    /// Has no effect on a failing query.
    #[must_use]
    pub fn with_notebook(mut self, node: ContentNode) -> Self {
        if let Ok(result) = &mut self.result {
            result.notebooks.push(node);
        }
        self
    }
}

impl ContentQuery for MockQuery {
    fn query_content(&self) -> Result<ContentQueryResult, QueryError> {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ContentKind, NodeId};

    #[test]
    fn test_mock_returns_nodes() {
        let node = ContentNode::new(
            NodeId::new("m1"),
            ContentKind::Mdx,
            NodeId::new("f1"),
            "/repo/docs/a.md",
        );
        let query = MockQuery::new().with_mdx(node.clone());

        let result = query.query_content().unwrap();
        assert_eq!(result.mdx, vec![node]);
        assert!(result.notebooks.is_empty());
    }

    #[test]
    fn test_mock_failing() {
        let query = MockQuery::failing("boom");
        assert_eq!(query.query_content().unwrap_err(), QueryError::new("boom"));
    }
}
