//! Page registration service.
//!
//! [`PageTable`] is the in-memory registry used by the build: one entry per
//! route, where a later registration for the same route replaces the earlier
//! one.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::node::NodeId;

/// Context passed to the page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    /// ID of the content node the page renders.
    pub id: NodeId,
    /// Slug the template uses to look the node up.
    pub slug: String,
}

/// Request to materialize one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// Route path.
    pub path: String,
    /// Template reference.
    pub component: PathBuf,
    /// Template context.
    pub context: PageContext,
}

/// Accepts page-creation requests.
pub trait PageRegistry {
    /// Register a page. A page already registered at the same path is replaced.
    fn create_page(&mut self, page: PageRequest);
}

/// In-memory page registry keyed by route path.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct PageTable {
    pages: BTreeMap<String, PageRequest>,
}

impl PageTable {
    /// Create an empty page table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the page registered at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&PageRequest> {
        self.pages.get(path)
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if no page is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over pages in route order.
    pub fn iter(&self) -> impl Iterator<Item = &PageRequest> {
        self.pages.values()
    }
}

impl PageRegistry for PageTable {
    fn create_page(&mut self, page: PageRequest) {
        if let Some(previous) = self.pages.get(&page.path) {
            tracing::warn!(
                path = %page.path,
                replaced = %previous.context.id,
                by = %page.context.id,
                "Duplicate page path, replacing earlier page"
            );
        }
        self.pages.insert(page.path.clone(), page);
    }
}
