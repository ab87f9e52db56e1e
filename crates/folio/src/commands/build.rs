//! `folio build` command implementation.
//!
//! Runs the site steps in lifecycle order:
//! 1. Source nodes: scan content directories, assemble and publish navigation
//! 2. On node creation: derive slugs
//! 3. Create pages
//!
//! and writes `pages.json` and `navigation.json` to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_content::{
    ContentStore, FsScanner, PageTable, PublishedNode, RemoteRepo, ScanSummary, SourceRelativePath,
    SourceRoot,
};
use folio_site::{
    IdGenerator, NavigationAssembler, PageBuilder, PageStats, RandomIdGenerator,
    SequentialIdGenerator, derive_slugs, nav_data_node_id,
};

use crate::error::CliError;
use crate::output::Output;

/// Page table output filename.
const PAGES_FILE: &str = "pages.json";
/// Navigation data output filename.
const NAVIGATION_FILE: &str = "navigation.json";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory (default: .folio/build/).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Directory content source `dir` entries are resolved against (overrides config).
    #[arg(long)]
    content_root: Option<PathBuf>,

    /// Assign sequential navigation IDs (nav-1, nav-2, ...) instead of random ones.
    #[arg(long)]
    sequential_ids: bool,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Everything the build produced.
pub(crate) struct SiteBuild {
    pub(crate) scan: ScanSummary,
    pub(crate) slugs: usize,
    pub(crate) stats: PageStats,
    pub(crate) pages: PageTable,
    pub(crate) navigation: Option<PublishedNode>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir.clone(),
            content_root: self.content_root.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.step("Config", path.display());
        }
        output.step("Content", config.content_resolved.root.display());
        output.step("Output", config.output_dir.display());
        if config.content_sources.is_empty() {
            output.warning("No content sources configured");
        }

        let build = if self.sequential_ids {
            build_site(&config, SequentialIdGenerator::default())?
        } else {
            build_site(&config, RandomIdGenerator)?
        };

        write_outputs(&config.output_dir, &build)?;

        output.success(format_args!(
            "Built {} pages from {} documents ({} notebooks skipped) to {}",
            build.pages.len(),
            build.scan.files,
            build.stats.skipped,
            config.output_dir.display()
        ));
        Ok(())
    }
}

/// Map content-source rules to scanner roots.
fn source_roots(config: &Config) -> Vec<SourceRoot> {
    config
        .content_sources
        .rules()
        .iter()
        .map(|rule| SourceRoot {
            name: rule.instance_name().to_owned(),
            dir: config.content_resolved.root.join(rule.relative_dir()),
            remote: rule.remote.as_ref().map(|remote| RemoteRepo {
                url: remote.url.clone(),
                branch: remote.branch.clone(),
            }),
        })
        .collect()
}

/// Run the site steps against a fresh content store.
pub(crate) fn build_site<G: IdGenerator>(config: &Config, ids: G) -> Result<SiteBuild, CliError> {
    let mut store = ContentStore::new();

    let scan = FsScanner::new(source_roots(config)).scan(&mut store)?;
    NavigationAssembler::from_config(config, ids).source_nodes(&mut store)?;

    let slugs = derive_slugs(&mut store, &SourceRelativePath)?;

    let mut pages = PageTable::new();
    let stats = PageBuilder::from_config(config).create_pages(&store, &mut pages)?;

    Ok(SiteBuild {
        scan,
        slugs,
        stats,
        pages,
        navigation: store.published(&nav_data_node_id()).cloned(),
    })
}

/// Write the page table and navigation data as pretty-printed JSON.
fn write_outputs(output_dir: &Path, build: &SiteBuild) -> Result<(), CliError> {
    fs::create_dir_all(output_dir)?;
    fs::write(
        output_dir.join(PAGES_FILE),
        serde_json::to_string_pretty(&build.pages)?,
    )?;
    if let Some(navigation) = &build.navigation {
        fs::write(
            output_dir.join(NAVIGATION_FILE),
            serde_json::to_string_pretty(navigation)?,
        )?;
    }
    tracing::info!(
        dir = %output_dir.display(),
        pages = build.pages.len(),
        slugs = build.slugs,
        "Wrote build output"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Lay out a small site and load its configuration.
    fn create_site(root: &Path) -> Config {
        fs::create_dir_all(root.join("config")).unwrap();
        fs::create_dir_all(root.join("docs/guide")).unwrap();
        fs::create_dir_all(root.join("guides/install")).unwrap();
        fs::create_dir_all(root.join("notebooks")).unwrap();

        fs::write(root.join("folio.toml"), "[build]\noutput_dir = \"public\"\n").unwrap();
        fs::write(
            root.join("config/content-sources.yaml"),
            "\
- dir: docs
  urlPrefix: /documentation
- dir: guides
  remote:
    url: https://github.com/example/guides.git
- dir: notebooks
",
        )
        .unwrap();
        fs::write(
            root.join("config/toc-sources.yaml"),
            "- config/toc.yaml\n- config/missing.yaml\n- guides/toc.yaml\n",
        )
        .unwrap();
        fs::write(
            root.join("config/toc.yaml"),
            "- title: Docs\n  links:\n    - title: Guide\n",
        )
        .unwrap();
        fs::write(root.join("guides/toc.yaml"), "- id: guides\n  title: Guides\n").unwrap();

        fs::write(root.join("docs/index.md"), "---\ntitle: Home\n---\n").unwrap();
        fs::write(root.join("docs/guide/README.md"), "# Guide").unwrap();
        fs::write(root.join("docs/guide/setup.md"), "# Setup").unwrap();
        fs::write(root.join("guides/install/config.md"), "# Config").unwrap();
        fs::write(root.join("notebooks/run.ipynb"), "{}").unwrap();

        Config::load(Some(&root.join("folio.toml")), None).unwrap()
    }

    #[test]
    fn test_source_roots_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_site(temp_dir.path());

        let roots = source_roots(&config);

        assert_eq!(roots.len(), 3);
        assert_eq!(roots[0].name, "docs");
        assert_eq!(roots[0].dir, temp_dir.path().join("docs"));
        assert!(roots[0].remote.is_none());
        assert_eq!(roots[1].name, "guides");
        assert_eq!(
            roots[1].remote.as_ref().unwrap().url,
            "https://github.com/example/guides.git"
        );
    }

    #[test]
    fn test_build_site_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_site(temp_dir.path());

        let build = build_site(&config, SequentialIdGenerator::default()).unwrap();

        assert_eq!(build.scan.files, 5);
        assert_eq!(build.slugs, 5);

        let mut paths: Vec<_> = build.pages.iter().map(|p| p.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(
            paths,
            vec![
                "/",
                "/guide",
                "/guide/setup.md",
                "/run.ipynb",
                "guides/install/config.md",
            ]
        );

        let navigation = build.navigation.unwrap();
        let items = navigation.payload["navItems"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], "nav-1");
        assert_eq!(items[0]["links"][0]["id"], "nav-2");
        assert_eq!(items[1]["id"], "guides");
    }

    #[test]
    fn test_build_site_overlapping_sources() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("config")).unwrap();
        fs::create_dir_all(root.join("docs/api")).unwrap();
        fs::write(root.join("folio.toml"), "").unwrap();
        fs::write(
            root.join("config/content-sources.yaml"),
            "\
- dir: docs
  urlPrefix: /documentation
- dir: docs/api
  urlPrefix: /api
",
        )
        .unwrap();
        fs::write(root.join("docs/api/users.md"), "# Users").unwrap();
        let config = Config::load(Some(&root.join("folio.toml")), None).unwrap();

        let build = build_site(&config, SequentialIdGenerator::default()).unwrap();

        assert_eq!(build.scan.files, 1);
        let paths: Vec<_> = build.pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/api/users.md"]);
        assert_eq!(
            build.pages.get("/api/users.md").unwrap().context.slug,
            "api/users"
        );
    }

    #[test]
    fn test_write_outputs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = create_site(temp_dir.path());
        let build = build_site(&config, SequentialIdGenerator::default()).unwrap();

        write_outputs(&config.output_dir, &build).unwrap();

        let pages: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(config.output_dir.join(PAGES_FILE)).unwrap())
                .unwrap();
        assert_eq!(pages["/guide/setup.md"]["context"]["slug"], "guide/setup");

        let navigation: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(config.output_dir.join(NAVIGATION_FILE)).unwrap(),
        )
        .unwrap();
        assert_eq!(navigation["type"], "NavData");
        assert_eq!(navigation["id"], nav_data_node_id().as_str());
    }
}
