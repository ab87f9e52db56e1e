//! Slug derivation for content nodes.
//!
//! Runs once per content node at ingestion time and attaches the derived
//! `slug` field that page creation later routes on.
//!
//! | File (source-relative)    | Remote   | Slug                 |
//! |---------------------------|----------|----------------------|
//! | `guide/index.md`          | -        | `/guide`             |
//! | `guide/README.md`         | -        | `/guide`             |
//! | `guide/setup.md`          | -        | `/guide/setup.md`    |
//! | `install/config.md`       | `guides` | `guides/install/config.md` |

use folio_content::{
    ContentNode, ContentStore, FileMetadata, FilePathOptions, FilePathResolver, NodeId,
    NodeLookup, RemoteSource,
};

/// Name of the derived field holding the slug.
pub const SLUG_FIELD: &str = "slug";

/// Error raised while deriving slugs.
#[derive(Debug, thiserror::Error)]
pub enum SlugError {
    /// The node's parent file is not in the content graph.
    #[error("content node {node} references missing file node {parent}")]
    MissingParent {
        /// Content node being processed.
        node: NodeId,
        /// Parent reference that did not resolve.
        parent: NodeId,
    },
}

/// Build a slug from a file, its optional remote source and its relative path.
///
/// - Remote files are prefixed with the source instance name
/// - `index` files keep the path as computed
/// - `readme` files (any case) drop their final path segment
/// - Everything else gets `.{extension}` appended
#[must_use]
pub fn compose_slug(
    file: &FileMetadata,
    remote: Option<&RemoteSource>,
    relative_path: &str,
) -> String {
    let slug = match remote {
        Some(remote) => format!("{}{relative_path}", remote.source_instance_name),
        None => relative_path.to_owned(),
    };

    if file.name == "index" {
        slug
    } else if file.name.eq_ignore_ascii_case("readme") {
        strip_readme_segment(&slug)
    } else if file.extension.is_empty() {
        slug
    } else {
        format!("{slug}.{}", file.extension)
    }
}

/// Drop a trailing `readme` segment so the file maps to its directory.
fn strip_readme_segment(path: &str) -> String {
    let (parent, last) = path.rsplit_once('/').unwrap_or(("", path));
    if !last.eq_ignore_ascii_case("readme") {
        return path.to_owned();
    }
    if parent.is_empty() {
        "/".to_owned()
    } else {
        parent.to_owned()
    }
}

/// Derive the slug of a content node.
///
/// Returns `Ok(None)` for nodes that are not documents.
pub fn derive_slug<L, R>(
    node: &ContentNode,
    lookup: &L,
    resolver: &R,
) -> Result<Option<String>, SlugError>
where
    L: NodeLookup + ?Sized,
    R: FilePathResolver + ?Sized,
{
    if !node.kind.is_document() {
        return Ok(None);
    }

    let file = lookup
        .file(&node.parent)
        .ok_or_else(|| SlugError::MissingParent {
            node: node.id.clone(),
            parent: node.parent.clone(),
        })?;
    let remote = lookup.remote_of(file);
    let relative_path = resolver.file_path(
        file,
        &FilePathOptions {
            base_path: "",
            trailing_slash: false,
        },
    );

    Ok(Some(compose_slug(file, remote, &relative_path)))
}

/// Derive a node's slug and attach it as the `slug` field.
///
/// Returns `true` if a field was attached. Calling this again with the same
/// inputs writes the same value.
pub fn attach_slug<L, R>(node: &mut ContentNode, lookup: &L, resolver: &R) -> Result<bool, SlugError>
where
    L: NodeLookup + ?Sized,
    R: FilePathResolver + ?Sized,
{
    let Some(slug) = derive_slug(node, lookup, resolver)? else {
        return Ok(false);
    };
    tracing::debug!(node = %node.id, slug = %slug, "Derived slug");
    node.set_field(SLUG_FIELD, slug);
    Ok(true)
}

/// Derive and attach slugs for every document in the store.
///
/// Returns the number of nodes that received a slug.
pub fn derive_slugs<R>(store: &mut ContentStore, resolver: &R) -> Result<usize, SlugError>
where
    R: FilePathResolver + ?Sized,
{
    let mut derived = Vec::new();
    for node in store.content_nodes() {
        if let Some(slug) = derive_slug(node, &*store, resolver)? {
            derived.push((node.id.clone(), slug));
        }
    }

    for (id, slug) in &derived {
        if let Some(node) = store.content_node_mut(id) {
            node.set_field(SLUG_FIELD, slug.as_str());
        }
    }

    tracing::info!(count = derived.len(), "Derived slugs");
    Ok(derived.len())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use folio_content::{ContentKind, SourceRelativePath};
    use pretty_assertions::assert_eq;

    use super::*;

    fn file(relative: &str, remote: Option<&str>) -> FileMetadata {
        let path = Path::new(relative);
        FileMetadata {
            id: NodeId::new(format!("file:{relative}")),
            name: path.file_stem().unwrap().to_string_lossy().into_owned(),
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source_instance_name: remote.unwrap_or("docs").to_owned(),
            relative_path: PathBuf::from(relative),
            absolute_path: PathBuf::from("/repo/docs").join(relative),
            remote: remote.map(|r| NodeId::new(format!("remote:{r}"))),
        }
    }

    fn remote(name: &str) -> RemoteSource {
        RemoteSource {
            id: NodeId::new(format!("remote:{name}")),
            source_instance_name: name.to_owned(),
            url: format!("https://github.com/example/{name}.git"),
            branch: None,
        }
    }

    /// Store with one document per path; returns the store and node IDs in order.
    fn store_with(files: &[(&str, Option<&str>, ContentKind)]) -> (ContentStore, Vec<NodeId>) {
        let mut store = ContentStore::new();
        let mut ids = Vec::new();
        for (relative, remote_name, kind) in files {
            let f = file(relative, *remote_name);
            if let Some(name) = remote_name {
                store.add_remote(remote(name));
            }
            let id = NodeId::new(format!("node:{relative}"));
            store.add_content(ContentNode::new(
                id.clone(),
                kind.clone(),
                f.id.clone(),
                f.absolute_path.clone(),
            ));
            store.add_file(f);
            ids.push(id);
        }
        (store, ids)
    }

    fn slug_of(relative: &str, remote_name: Option<&str>) -> Option<String> {
        let (store, ids) = store_with(&[(relative, remote_name, ContentKind::Mdx)]);
        let node = store.content_node(&ids[0]).unwrap();
        derive_slug(node, &store, &SourceRelativePath).unwrap()
    }

    #[test]
    fn test_index_keeps_relative_path() {
        assert_eq!(slug_of("guide/index.md", None).as_deref(), Some("/guide"));
        assert_eq!(slug_of("index.mdx", None).as_deref(), Some("/"));
    }

    #[test]
    fn test_readme_maps_to_directory() {
        assert_eq!(slug_of("guide/README.md", None).as_deref(), Some("/guide"));
        assert_eq!(slug_of("guide/readme.md", None).as_deref(), Some("/guide"));
        assert_eq!(slug_of("a/b/ReadMe.mdx", None).as_deref(), Some("/a/b"));
        assert_eq!(slug_of("README.md", None).as_deref(), Some("/"));
    }

    #[test]
    fn test_readme_with_short_directory_name() {
        assert_eq!(slug_of("x/README.md", None).as_deref(), Some("/x"));
    }

    #[test]
    fn test_other_files_keep_extension() {
        assert_eq!(slug_of("guide/setup.md", None).as_deref(), Some("/guide/setup.md"));
        assert_eq!(slug_of("intro.mdx", None).as_deref(), Some("/intro.mdx"));
    }

    #[test]
    fn test_file_without_extension_has_no_trailing_dot() {
        assert_eq!(slug_of("notes/CHANGELOG", None).as_deref(), Some("/notes/CHANGELOG"));
    }

    #[test]
    fn test_notebook_keeps_extension() {
        let (store, ids) = store_with(&[("analysis/run.ipynb", None, ContentKind::JupyterNotebook)]);
        let node = store.content_node(&ids[0]).unwrap();
        assert_eq!(
            derive_slug(node, &store, &SourceRelativePath).unwrap().as_deref(),
            Some("/analysis/run.ipynb")
        );
    }

    #[test]
    fn test_remote_source_prefix() {
        assert_eq!(
            slug_of("install/config.md", Some("guides")).as_deref(),
            Some("guides/install/config.md")
        );
        assert_eq!(slug_of("install/index.md", Some("guides")).as_deref(), Some("guides/install"));
        assert_eq!(slug_of("install/README.md", Some("guides")).as_deref(), Some("guides/install"));
        assert_eq!(slug_of("README.md", Some("guides")).as_deref(), Some("guides"));
    }

    #[test]
    fn test_compose_slug_from_remote_and_relative_path() {
        let f = file("install/config.md", Some("guides"));
        let r = remote("guides");
        assert_eq!(compose_slug(&f, Some(&r), "/install"), "guides/install.md");
    }

    #[test]
    fn test_dangling_remote_is_ignored() {
        let mut store = ContentStore::new();
        let f = file("setup.md", Some("vanished"));
        store.add_content(ContentNode::new(
            NodeId::new("n1"),
            ContentKind::Mdx,
            f.id.clone(),
            f.absolute_path.clone(),
        ));
        store.add_file(f);

        let node = store.content_node(&NodeId::new("n1")).unwrap();
        assert_eq!(
            derive_slug(node, &store, &SourceRelativePath).unwrap().as_deref(),
            Some("/setup.md")
        );
    }

    #[test]
    fn test_other_kinds_are_ignored() {
        let (mut store, ids) = store_with(&[(
            "logo.md",
            None,
            ContentKind::Other("ImageSharp".to_owned()),
        )]);

        assert_eq!(derive_slugs(&mut store, &SourceRelativePath).unwrap(), 0);
        assert!(store.content_node(&ids[0]).unwrap().field(SLUG_FIELD).is_none());
    }

    #[test]
    fn test_missing_parent_is_error() {
        let store = ContentStore::new();
        let node = ContentNode::new(
            NodeId::new("orphan"),
            ContentKind::Mdx,
            NodeId::new("nowhere"),
            "/repo/docs/orphan.md",
        );

        let err = derive_slug(&node, &store, &SourceRelativePath).unwrap_err();
        assert!(matches!(err, SlugError::MissingParent { .. }));
    }

    #[test]
    fn test_attach_slug_is_idempotent() {
        let (store, ids) = store_with(&[("guide/setup.md", None, ContentKind::Mdx)]);
        let mut node = store.content_node(&ids[0]).unwrap().clone();

        assert!(attach_slug(&mut node, &store, &SourceRelativePath).unwrap());
        let first = node.clone();
        assert!(attach_slug(&mut node, &store, &SourceRelativePath).unwrap());

        assert_eq!(node, first);
        assert_eq!(node.field(SLUG_FIELD), Some("/guide/setup.md"));
        assert_eq!(node.fields().len(), 1);
    }

    #[test]
    fn test_derive_slugs_updates_store() {
        let (mut store, ids) = store_with(&[
            ("index.md", None, ContentKind::Mdx),
            ("guide/README.md", None, ContentKind::Mdx),
            ("guide/setup.md", None, ContentKind::Mdx),
            ("run.ipynb", None, ContentKind::JupyterNotebook),
        ]);

        assert_eq!(derive_slugs(&mut store, &SourceRelativePath).unwrap(), 4);

        let slugs: Vec<_> = ids
            .iter()
            .map(|id| store.content_node(id).unwrap().field(SLUG_FIELD).unwrap().to_owned())
            .collect();
        assert_eq!(slugs, vec!["/", "/guide", "/guide/setup.md", "/run.ipynb"]);
    }

    #[test]
    fn test_strip_readme_segment_leaves_other_paths() {
        assert_eq!(strip_readme_segment("/guide/README"), "/guide");
        assert_eq!(strip_readme_segment("/guide/overview"), "/guide/overview");
        assert_eq!(strip_readme_segment("readme"), "/");
    }
}
