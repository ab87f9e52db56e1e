//! CLI error types.

use folio_config::ConfigError;
use folio_content::ScanError;
use folio_site::{NavigationError, PageBuildError, SlugError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("{0}")]
    Slug(#[from] SlugError),

    #[error("{0}")]
    Pages(#[from] PageBuildError),

    #[error("Failed to write output: {0}")]
    Json(#[from] serde_json::Error),
}
