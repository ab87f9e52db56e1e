//! File path resolution for content files.
//!
//! Converts a file's location inside its content source into a URL-style
//! path. This is the base every derived slug is built from.

use std::path::Path;

use crate::node::FileMetadata;
use crate::url::join_url_path;

/// Options for [`FilePathResolver::file_path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilePathOptions<'a> {
    /// Leading directory to strip from the source-relative path.
    pub base_path: &'a str,
    /// Whether the returned path ends with `/`.
    pub trailing_slash: bool,
}

/// Resolves the canonical relative path of a content file.
pub trait FilePathResolver {
    /// Compute the URL-style path of `file` inside its content source.
    fn file_path(&self, file: &FileMetadata, options: &FilePathOptions<'_>) -> String;
}

/// Path resolver following the filesystem source convention.
///
/// - Path is relative to the source root and starts with `/`
/// - The extension is removed
/// - `index` files resolve to their directory
///
/// | Source-relative file   | Result          |
/// |------------------------|-----------------|
/// | `index.md`             | `/`             |
/// | `intro.md`             | `/intro`        |
/// | `guide/index.mdx`      | `/guide`        |
/// | `guide/README.md`      | `/guide/README` |
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceRelativePath;

impl FilePathResolver for SourceRelativePath {
    fn file_path(&self, file: &FileMetadata, options: &FilePathOptions<'_>) -> String {
        let relative = file.relative_path.to_string_lossy().replace('\\', "/");
        let base = options.base_path.trim_matches('/');
        let relative = if base.is_empty() {
            relative.as_str()
        } else {
            relative
                .strip_prefix(base)
                .filter(|rest| rest.is_empty() || rest.starts_with('/'))
                .unwrap_or(relative.as_str())
        };

        let dir = Path::new(relative)
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = if file.name == "index" { "" } else { &file.name };

        let mut path = join_url_path(&["/", &dir, name]);
        if options.trailing_slash && !path.ends_with('/') {
            path.push('/');
        }
        path
    }
}
