//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. The project file
//! points at two YAML files that are loaded alongside it:
//!
//! - the content-source mapping ([`ContentSourceMapping`])
//! - the table-of-contents source list
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;
mod sources;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use sources::{ContentSourceMapping, ContentSourceRule, RemoteConfig};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the root that content source directories are resolved against.
    pub content_root: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

const DEFAULT_CONTENT_SOURCES: &str = "config/content-sources.yaml";
const DEFAULT_TOC_SOURCES: &str = "config/toc-sources.yaml";
const DEFAULT_DOC_TEMPLATE: &str = "src/templates/Doc.js";
const DEFAULT_NOTEBOOK_TEMPLATE: &str = "src/templates/JupyterNotebook.js";
const DEFAULT_OUTPUT_DIR: &str = ".folio/build";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    content: ContentConfigRaw,
    navigation: NavigationConfigRaw,
    templates: TemplatesConfigRaw,
    build: BuildConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved template references (set after loading).
    #[serde(skip)]
    pub templates_resolved: TemplatesConfig,
    /// Resolved build output directory (set after loading).
    #[serde(skip)]
    pub output_dir: PathBuf,
    /// Content-source mapping loaded from YAML.
    #[serde(skip)]
    pub content_sources: ContentSourceMapping,
    /// Table-of-contents files, in processing order.
    #[serde(skip)]
    pub toc_sources: Vec<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    sources: Option<String>,
    root: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct NavigationConfigRaw {
    toc_sources: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    doc: Option<String>,
    notebook: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Path of the content-source mapping YAML file.
    pub sources_file: PathBuf,
    /// Path of the table-of-contents source list YAML file.
    pub toc_sources_file: PathBuf,
    /// Directory that content source `dir` entries are resolved against.
    pub root: PathBuf,
    /// Directory that TOC file entries are resolved against.
    pub project_dir: PathBuf,
}

/// Page template references.
///
/// Templates are opaque to Folio; they are carried on page requests for the
/// renderer to resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatesConfig {
    /// Template for Markdown/MDX documents.
    pub doc: PathBuf,
    /// Template for Jupyter notebooks.
    pub notebook: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// YAML parsing error in a mapping or source list file.
    #[error("YAML parse error in {}: {source}", path.display())]
    Yaml {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`build.output_dir`").
        field: String,
        /// Error message (e.g., "${`FOLIO_OUT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    /// The content-source mapping and TOC source list are read afterwards,
    /// so CLI settings never affect which YAML files are used.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.load_sources()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir.clone_from(output_dir);
        }
        if let Some(content_root) = &settings.content_root {
            self.content_resolved.root.clone_from(content_root);
        }
    }

    /// Read the content-source mapping and TOC source list.
    fn load_sources(&mut self) -> Result<(), ConfigError> {
        self.content_sources = sources::load_content_sources(&self.content_resolved.sources_file)?;
        self.toc_sources = sources::load_toc_sources(
            &self.content_resolved.toc_sources_file,
            &self.content_resolved.project_dir,
        )?;
        tracing::debug!(
            content_sources = self.content_sources.rules().len(),
            toc_sources = self.toc_sources.len(),
            "Loaded content and navigation sources"
        );
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            navigation: NavigationConfigRaw::default(),
            templates: TemplatesConfigRaw::default(),
            build: BuildConfigRaw::default(),
            content_resolved: ContentConfig {
                sources_file: base.join(DEFAULT_CONTENT_SOURCES),
                toc_sources_file: base.join(DEFAULT_TOC_SOURCES),
                root: base.to_path_buf(),
                project_dir: base.to_path_buf(),
            },
            templates_resolved: TemplatesConfig {
                doc: base.join(DEFAULT_DOC_TEMPLATE),
                notebook: base.join(DEFAULT_NOTEBOOK_TEMPLATE),
            },
            output_dir: base.join(DEFAULT_OUTPUT_DIR),
            content_sources: ContentSourceMapping::default(),
            toc_sources: Vec::new(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
            if let Some(v) = value {
                *v = expand::expand_env(v, field)?;
            }
            Ok(())
        }

        expand_opt(&mut self.content.sources, "content.sources")?;
        expand_opt(&mut self.content.root, "content.root")?;
        expand_opt(&mut self.navigation.toc_sources, "navigation.toc_sources")?;
        expand_opt(&mut self.templates.doc, "templates.doc")?;
        expand_opt(&mut self.templates.notebook, "templates.notebook")?;
        expand_opt(&mut self.build.output_dir, "build.output_dir")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            sources_file: resolve(self.content.sources.as_deref(), DEFAULT_CONTENT_SOURCES),
            toc_sources_file: resolve(self.navigation.toc_sources.as_deref(), DEFAULT_TOC_SOURCES),
            root: resolve(self.content.root.as_deref(), "."),
            project_dir: config_dir.to_path_buf(),
        };

        self.templates_resolved = TemplatesConfig {
            doc: resolve(self.templates.doc.as_deref(), DEFAULT_DOC_TEMPLATE),
            notebook: resolve(self.templates.notebook.as_deref(), DEFAULT_NOTEBOOK_TEMPLATE),
        };

        self.output_dir = resolve(self.build.output_dir.as_deref(), DEFAULT_OUTPUT_DIR);
    }
}
