//! Content graph for the Folio documentation site.
//!
//! This crate provides the node model and the collaborator services that
//! slug derivation, page creation and navigation assembly call into:
//!
//! - [`FilePathResolver`] - canonical relative path of a content file
//! - [`NodeLookup`] - parent file and remote-source resolution
//! - [`ContentQuery`] - MDX and notebook result sets
//! - [`NodePublisher`] - upsert of published records
//! - [`PageRegistry`] - page-creation requests
//!
//! [`ContentStore`] implements the lookup, query and publication services in
//! memory, [`FsScanner`] populates it from disk, and [`PageTable`] collects
//! page requests. [`MockQuery`] (behind the `mock` feature) stands in for a
//! failing or canned query in tests.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_content::{ContentStore, FsScanner, SourceRoot};
//!
//! let mut store = ContentStore::new();
//! let scanner = FsScanner::new(vec![SourceRoot {
//!     name: "docs".to_owned(),
//!     dir: PathBuf::from("docs"),
//!     remote: None,
//! }]);
//! let summary = scanner.scan(&mut store)?;
//! ```

mod file_path;
mod frontmatter;
mod lookup;
#[cfg(feature = "mock")]
mod mock;
mod node;
mod page;
mod publish;
mod query;
mod scanner;
mod store;
mod url;

pub use file_path::{FilePathOptions, FilePathResolver, SourceRelativePath};
pub use frontmatter::{FrontMatter, parse_front_matter};
pub use lookup::NodeLookup;
#[cfg(feature = "mock")]
pub use mock::MockQuery;
pub use node::{ContentKind, ContentNode, FileMetadata, NodeId, RemoteSource};
pub use page::{PageContext, PageRegistry, PageRequest, PageTable};
pub use publish::{NodePublisher, PublishedNode, content_digest};
pub use query::{ContentQuery, ContentQueryResult, QueryError};
pub use scanner::{FsScanner, RemoteRepo, ScanError, ScanSummary, SourceRoot};
pub use store::ContentStore;
pub use url::join_url_path;
