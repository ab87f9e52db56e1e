//! Navigation assembly from table-of-contents files.
//!
//! Each configured TOC file is a YAML sequence of entries:
//!
//! ```yaml
//! - title: Getting Started
//!   links:
//!     - title: Install
//!       to: /guides/install.md
//!     - id: faq
//!       title: FAQ
//!       to: /faq.md
//! ```
//!
//! Entries without an `id` (at any depth) get a fresh one from an
//! [`IdGenerator`]. The top-level entries of all files are concatenated in
//! configuration order and published once as a single `NavData` record.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use folio_config::Config;
use folio_content::{NodeId, NodePublisher, PublishedNode};
use serde::{Deserialize, Serialize};

use crate::id::IdGenerator;

/// Type name of the published navigation record.
pub const NAV_DATA_TYPE: &str = "NavData";

/// Display attributes of an entry, kept verbatim.
pub type DisplayFields = serde_json::Map<String, serde_json::Value>;

/// A table-of-contents entry as read from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Stable identifier, if already assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Nested entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<TocEntry>>,
    /// Display attributes (title, target, icon, ...).
    #[serde(flatten)]
    pub fields: DisplayFields,
}

/// A navigation entry with an identifier assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    /// Stable identifier.
    pub id: String,
    /// Nested entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<NavItem>>,
    /// Display attributes.
    #[serde(flatten)]
    pub fields: DisplayFields,
}

impl From<NavItem> for TocEntry {
    fn from(item: NavItem) -> Self {
        Self {
            id: Some(item.id),
            links: item
                .links
                .map(|links| links.into_iter().map(TocEntry::from).collect()),
            fields: item.fields,
        }
    }
}

/// Navigation data published for the site layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationData {
    /// Root entries of all TOC files, in configuration order.
    pub nav_items: Vec<NavItem>,
}

/// Error raised while assembling navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// TOC file exists but could not be read.
    #[error("Failed to read table of contents {}: {source}", path.display())]
    Io {
        /// TOC file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// TOC file is not a valid entry sequence.
    #[error("Invalid table of contents {}: {source}", path.display())]
    Parse {
        /// TOC file.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },
    /// Navigation data could not be encoded for publication.
    #[error("Failed to encode navigation data: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Assign identifiers to entries that lack one, recursively.
///
/// Entries that already have a non-empty `id` keep it. Generated identifiers
/// never collide with an existing one. The input is not modified.
pub fn annotate_entries<G>(entries: &[TocEntry], ids: &mut G) -> Vec<NavItem>
where
    G: IdGenerator + ?Sized,
{
    let mut taken = HashSet::new();
    collect_ids(entries, &mut taken);
    annotate_with(entries, ids, &mut taken)
}

/// Gather every non-empty `id` in `entries`, at any depth.
fn collect_ids(entries: &[TocEntry], taken: &mut HashSet<String>) {
    for entry in entries {
        if let Some(id) = entry.id.as_deref().filter(|id| !id.is_empty()) {
            taken.insert(id.to_owned());
        }
        if let Some(links) = &entry.links {
            collect_ids(links, taken);
        }
    }
}

fn annotate_with<G>(entries: &[TocEntry], ids: &mut G, taken: &mut HashSet<String>) -> Vec<NavItem>
where
    G: IdGenerator + ?Sized,
{
    entries
        .iter()
        .map(|entry| {
            let id = match entry.id.as_deref() {
                Some(id) if !id.is_empty() => id.to_owned(),
                _ => fresh_id(ids, taken),
            };
            NavItem {
                id,
                links: entry
                    .links
                    .as_deref()
                    .map(|links| annotate_with(links, ids, taken)),
                fields: entry.fields.clone(),
            }
        })
        .collect()
}

/// Next generated identifier not in `taken`; records it as taken.
fn fresh_id<G>(ids: &mut G, taken: &mut HashSet<String>) -> String
where
    G: IdGenerator + ?Sized,
{
    loop {
        let id = ids.next_id();
        if taken.insert(id.clone()) {
            return id;
        }
        tracing::debug!(id = %id, "Generated navigation ID already in use, retrying");
    }
}

/// Load the entries of one TOC file.
pub fn load_toc(path: &Path) -> Result<Vec<TocEntry>, NavigationError> {
    let content = std::fs::read_to_string(path).map_err(|source| NavigationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(&content).map_err(|source| NavigationError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// ID of the published navigation record.
#[must_use]
pub fn nav_data_node_id() -> NodeId {
    NodeId::derive(NAV_DATA_TYPE)
}

/// Builds navigation data from the configured TOC files.
pub struct NavigationAssembler<'a, G> {
    sources: &'a [PathBuf],
    ids: G,
}

impl<'a, G: IdGenerator> NavigationAssembler<'a, G> {
    /// Create an assembler over TOC files in processing order.
    #[must_use]
    pub fn new(sources: &'a [PathBuf], ids: G) -> Self {
        Self { sources, ids }
    }

    /// Create an assembler over the TOC files of the loaded configuration.
    #[must_use]
    pub fn from_config(config: &'a Config, ids: G) -> Self {
        Self::new(&config.toc_sources, ids)
    }

    /// Read every TOC file and merge their entries.
    ///
    /// Missing files are logged and skipped; the remaining files still
    /// contribute.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] if an existing file cannot be read or parsed.
    pub fn assemble(&mut self) -> Result<NavigationData, NavigationError> {
        let mut loaded = Vec::with_capacity(self.sources.len());
        for source in self.sources {
            if !source.exists() {
                tracing::error!(
                    path = %source.display(),
                    "Table of contents file missing, skipped"
                );
                continue;
            }
            loaded.push((source, load_toc(source)?));
        }

        // IDs written in any file are reserved before any are generated.
        let mut taken = HashSet::new();
        for (_, entries) in &loaded {
            collect_ids(entries, &mut taken);
        }

        let mut data = NavigationData::default();
        for (source, entries) in &loaded {
            let items = annotate_with(entries, &mut self.ids, &mut taken);
            tracing::debug!(path = %source.display(), entries = items.len(), "Loaded table of contents");
            data.nav_items.extend(items);
        }
        Ok(data)
    }

    /// Assemble navigation and publish it as one `NavData` record.
    ///
    /// The record is published exactly once, after all files are processed,
    /// and holds the merged entries of every file.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError`] if assembly fails or the data cannot be
    /// encoded. Nothing is published in that case.
    pub fn source_nodes<P>(&mut self, publisher: &mut P) -> Result<NavigationData, NavigationError>
    where
        P: NodePublisher + ?Sized,
    {
        let data = self.assemble()?;
        let node = PublishedNode::new(nav_data_node_id(), NAV_DATA_TYPE, &data)?;
        tracing::info!(
            items = data.nav_items.len(),
            digest = %node.content_digest,
            "Published navigation data"
        );
        publisher.create_node(node);
        Ok(data)
    }
}
