//! Page creation from queried content nodes.
//!
//! [`PageBuilder`] turns the MDX and notebook result sets into page requests:
//!
//! - Notebooks get a page only when they carry a derived slug
//! - MDX nodes with a slug attribute route on the derived slug, falling back
//!   to the content-source mapping ([`create_page_path`])
//! - MDX nodes without a slug attribute are the site root (`/`)

use std::path::Path;

use folio_config::{Config, ContentSourceMapping, TemplatesConfig};
use folio_content::{
    ContentNode, ContentQuery, PageContext, PageRegistry, PageRequest, QueryError, join_url_path,
};

use crate::slug::SLUG_FIELD;

/// Slug attribute that maps to its directory's index page.
const README_SLUG: &str = "README";

/// Error raised while creating pages.
#[derive(Debug, thiserror::Error)]
pub enum PageBuildError {
    /// The content query failed; no pages can be created.
    #[error("Loading \"createPages\" query failed: {0}")]
    Query(#[from] QueryError),
}

/// Counts of pages registered by [`PageBuilder::create_pages`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageStats {
    /// Pages created from MDX nodes.
    pub docs: usize,
    /// Pages created from notebooks.
    pub notebooks: usize,
    /// Notebooks skipped for lack of a derived slug.
    pub skipped: usize,
}

/// Compute the fallback route of an MDX node from the content-source mapping.
///
/// The first rule whose directory pattern occurs in the node's absolute path
/// supplies the URL prefix. A slug attribute of exactly `README` collapses to
/// the prefix itself.
///
/// ```ignore
/// // mapping: [{dir: "/docs/", urlPrefix: "/documentation"}]
/// // node:    /repo/docs/intro.md, slug "intro"
/// assert_eq!(create_page_path(&mapping, &node), "/documentation/intro");
/// ```
#[must_use]
pub fn create_page_path(mapping: &ContentSourceMapping, node: &ContentNode) -> String {
    let prefix = mapping
        .find(&node.absolute_path_str())
        .and_then(|rule| rule.url_prefix())
        .unwrap_or_default();

    let slug = match node.slug.as_deref() {
        Some(README_SLUG) | None => "",
        Some(slug) => slug,
    };

    join_url_path(&["/", prefix, slug])
}

/// Derived slug field, treating an empty value as absent.
fn derived_slug(node: &ContentNode) -> Option<&str> {
    node.field(SLUG_FIELD).filter(|s| !s.is_empty())
}

/// Emits page requests for queried content.
pub struct PageBuilder<'a> {
    mapping: &'a ContentSourceMapping,
    templates: &'a TemplatesConfig,
}

impl<'a> PageBuilder<'a> {
    /// Create a page builder.
    #[must_use]
    pub fn new(mapping: &'a ContentSourceMapping, templates: &'a TemplatesConfig) -> Self {
        Self { mapping, templates }
    }

    /// Create a page builder from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &'a Config) -> Self {
        Self::new(&config.content_sources, &config.templates_resolved)
    }

    /// Query content and register one page per routable node.
    ///
    /// Notebook pages are registered before MDX pages. When two nodes share a
    /// route, the later registration replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`PageBuildError::Query`] if the content query fails. Nothing
    /// is registered in that case.
    pub fn create_pages<Q, P>(&self, query: &Q, registry: &mut P) -> Result<PageStats, PageBuildError>
    where
        Q: ContentQuery + ?Sized,
        P: PageRegistry + ?Sized,
    {
        let result = query.query_content().inspect_err(|e| {
            tracing::error!(error = %e, "Content query failed, aborting page creation");
        })?;

        let mut stats = PageStats::default();

        for node in &result.notebooks {
            match self.notebook_page(node) {
                Some(page) => {
                    registry.create_page(page);
                    stats.notebooks += 1;
                }
                None => {
                    tracing::debug!(node = %node.id, "Notebook has no slug, skipped");
                    stats.skipped += 1;
                }
            }
        }

        for node in &result.mdx {
            registry.create_page(self.doc_page(node));
            stats.docs += 1;
        }

        tracing::info!(
            docs = stats.docs,
            notebooks = stats.notebooks,
            skipped = stats.skipped,
            "Created pages"
        );
        Ok(stats)
    }

    /// Page request for a notebook, if it has a derived slug.
    fn notebook_page(&self, node: &ContentNode) -> Option<PageRequest> {
        let slug = derived_slug(node)?;
        Some(page_request(
            slug.to_owned(),
            &self.templates.notebook,
            node,
            slug.to_owned(),
        ))
    }

    /// Page request for an MDX node.
    fn doc_page(&self, node: &ContentNode) -> PageRequest {
        match node.slug.as_deref().filter(|s| !s.is_empty()) {
            Some(slug) => {
                let path = derived_slug(node)
                    .map_or_else(|| create_page_path(self.mapping, node), str::to_owned);
                page_request(path, &self.templates.doc, node, slug.to_owned())
            }
            None => page_request("/".to_owned(), &self.templates.doc, node, "/".to_owned()),
        }
    }
}

fn page_request(path: String, template: &Path, node: &ContentNode, slug: String) -> PageRequest {
    PageRequest {
        path,
        component: template.to_path_buf(),
        context: PageContext {
            id: node.id.clone(),
            slug,
        },
    }
}
