//! Content ingestion by filesystem walking.
//!
//! [`FsScanner`] walks each configured source root and adds a file node plus
//! a content node for every document it finds:
//!
//! - `.md` and `.mdx` files become [`ContentKind::Mdx`] nodes (front matter parsed)
//! - `.ipynb` files become [`ContentKind::JupyterNotebook`] nodes
//!
//! Hidden files and directories are skipped. Entries are visited in name
//! order so node insertion order is reproducible. When roots overlap, a file
//! belongs to the first root that reaches it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::frontmatter::parse_front_matter;
use crate::node::{ContentKind, ContentNode, FileMetadata, NodeId, RemoteSource};
use crate::store::ContentStore;

/// Git remote a source root was checked out from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    /// Repository URL.
    pub url: String,
    /// Checked out branch, if pinned.
    pub branch: Option<String>,
}

/// A directory to ingest as one content source instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    /// Source instance name.
    pub name: String,
    /// Directory on disk.
    pub dir: PathBuf,
    /// Remote the directory was pulled from, if any.
    pub remote: Option<RemoteRepo>,
}

/// Counts of nodes added by a scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// File nodes added.
    pub files: usize,
    /// MDX nodes added.
    pub mdx: usize,
    /// Notebook nodes added.
    pub notebooks: usize,
}

/// Error raised while ingesting content files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// File or directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Front matter is not valid YAML.
    #[error("Invalid front matter in {}: {source}", path.display())]
    FrontMatter {
        /// Document with the broken front matter.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },
}

/// Walks source roots and populates a [`ContentStore`].
pub struct FsScanner {
    roots: Vec<SourceRoot>,
}

impl FsScanner {
    /// Create a scanner over the given roots, in ingestion order.
    #[must_use]
    pub fn new(roots: Vec<SourceRoot>) -> Self {
        Self { roots }
    }

    /// Scan all roots into `store`.
    ///
    /// Roots that do not exist are skipped with a warning. Files already
    /// claimed by an earlier root are not ingested again.
    pub fn scan(&self, store: &mut ContentStore) -> Result<ScanSummary, ScanError> {
        let mut summary = ScanSummary::default();
        let mut claimed = HashSet::new();
        for root in &self.roots {
            if !root.dir.is_dir() {
                tracing::warn!(
                    source = %root.name,
                    dir = %root.dir.display(),
                    "Content source directory missing, skipped"
                );
                continue;
            }

            let remote_id = root.remote.as_ref().map(|remote| {
                let id = NodeId::derive(&format!("GitRemote {}", root.name));
                store.add_remote(RemoteSource {
                    id: id.clone(),
                    source_instance_name: root.name.clone(),
                    url: remote.url.clone(),
                    branch: remote.branch.clone(),
                });
                id
            });

            let before = summary;
            self.scan_directory(
                root,
                remote_id.as_ref(),
                &root.dir,
                &mut claimed,
                store,
                &mut summary,
            )?;
            tracing::info!(
                source = %root.name,
                mdx = summary.mdx - before.mdx,
                notebooks = summary.notebooks - before.notebooks,
                "Scanned content source"
            );
        }
        Ok(summary)
    }

    fn scan_directory(
        &self,
        root: &SourceRoot,
        remote_id: Option<&NodeId>,
        dir: &Path,
        claimed: &mut HashSet<PathBuf>,
        store: &mut ContentStore,
        summary: &mut ScanSummary,
    ) -> Result<(), ScanError> {
        let io_err = |source| ScanError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut entries = fs::read_dir(dir)
            .map_err(io_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_directory(root, remote_id, &path, claimed, store, summary)?;
                continue;
            }

            let Some(kind) = document_kind(&path) else {
                continue;
            };
            if !claimed.insert(path.clone()) {
                tracing::debug!(
                    source = %root.name,
                    path = %path.display(),
                    "Document already ingested by an earlier source, skipped"
                );
                continue;
            }
            self.add_document(root, remote_id, &path, kind, store, summary)?;
        }
        Ok(())
    }

    fn add_document(
        &self,
        root: &SourceRoot,
        remote_id: Option<&NodeId>,
        path: &Path,
        kind: ContentKind,
        store: &mut ContentStore,
        summary: &mut ScanSummary,
    ) -> Result<(), ScanError> {
        let relative_path = path.strip_prefix(&root.dir).unwrap_or(path).to_path_buf();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let file_id = NodeId::derive(&format!("File {}", path.display()));
        let node_id = NodeId::derive(&format!("{kind} {}", path.display()));
        let mut node = ContentNode::new(node_id, kind.clone(), file_id.clone(), path);

        if kind == ContentKind::Mdx {
            let content = fs::read_to_string(path).map_err(|source| ScanError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let front_matter =
                parse_front_matter(&content).map_err(|source| ScanError::FrontMatter {
                    path: path.to_path_buf(),
                    source,
                })?;
            node.title = front_matter.title;
            node.slug = front_matter
                .slug
                .or_else(|| default_mdx_slug(&relative_path))
                .filter(|s| !s.is_empty());
            summary.mdx += 1;
        } else {
            summary.notebooks += 1;
        }

        tracing::debug!(path = %path.display(), kind = %kind, "Discovered document");

        store.add_file(FileMetadata {
            id: file_id,
            name,
            extension,
            source_instance_name: root.name.clone(),
            relative_path,
            absolute_path: path.to_path_buf(),
            remote: remote_id.cloned(),
        });
        store.add_content(node);
        summary.files += 1;
        Ok(())
    }
}

/// Map a file path to the content kind it is ingested as.
fn document_kind(path: &Path) -> Option<ContentKind> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "md" | "mdx" => Some(ContentKind::Mdx),
        "ipynb" => Some(ContentKind::JupyterNotebook),
        _ => None,
    }
}

/// Slug attribute of an MDX file without an explicit front matter slug.
///
/// The source-relative path without extension, with `index` collapsed to its
/// directory. A root `index` file has no slug.
fn default_mdx_slug(relative_path: &Path) -> Option<String> {
    let stem = relative_path.file_stem()?.to_string_lossy();
    let dir = relative_path
        .parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default();

    let slug = if stem == "index" {
        dir
    } else if dir.is_empty() {
        stem.into_owned()
    } else {
        format!("{dir}/{stem}")
    };
    (!slug.is_empty()).then_some(slug)
}
