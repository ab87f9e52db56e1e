//! Site derivation steps for Folio.
//!
//! Three steps, each run by the build at a fixed lifecycle point:
//!
//! 1. [`slug`] - attaches a derived `slug` field to every content node
//!    (on node creation)
//! 2. [`pages`] - turns queried content into page requests (on page creation)
//! 3. [`navigation`] - merges the table-of-contents files into one published
//!    `NavData` record (on node sourcing)
//!
//! Slug derivation feeds page creation; navigation assembly is independent
//! of both.
//!
//! # Example
//!
//! ```ignore
//! use folio_config::Config;
//! use folio_content::{ContentStore, PageTable, SourceRelativePath};
//! use folio_site::{NavigationAssembler, PageBuilder, RandomIdGenerator, derive_slugs};
//!
//! let config = Config::load(None, None)?;
//! let mut store = ContentStore::new();
//! // ... ingest content into `store` ...
//!
//! NavigationAssembler::from_config(&config, RandomIdGenerator).source_nodes(&mut store)?;
//! derive_slugs(&mut store, &SourceRelativePath)?;
//!
//! let mut pages = PageTable::new();
//! PageBuilder::from_config(&config).create_pages(&store, &mut pages)?;
//! ```

mod id;
pub mod navigation;
pub mod pages;
pub mod slug;

pub use id::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use navigation::{
    NAV_DATA_TYPE, NavItem, NavigationAssembler, NavigationData, NavigationError, TocEntry,
    annotate_entries, nav_data_node_id,
};
pub use pages::{PageBuildError, PageBuilder, PageStats, create_page_path};
pub use slug::{SLUG_FIELD, SlugError, attach_slug, derive_slug, derive_slugs};
