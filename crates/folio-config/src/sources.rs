//! Content-source mapping and table-of-contents source list.
//!
//! Both files are YAML sequences that live next to `folio.toml`:
//!
//! ```yaml
//! # config/content-sources.yaml
//! - dir: docs
//!   urlPrefix: /documentation
//! - dir: guides
//!   name: guides
//!   remote:
//!     url: https://github.com/example/guides.git
//! ```
//!
//! ```yaml
//! # config/toc-sources.yaml
//! - config/toc.yaml
//! - guides/toc.yaml
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ConfigError;

/// Git remote a content source is pulled from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteConfig {
    /// Repository URL.
    pub url: String,
    /// Branch or tag checked out, if pinned.
    #[serde(default)]
    pub branch: Option<String>,
}

/// One rule of the content-source mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentSourceRule {
    /// Directory pattern, matched as a substring of absolute file paths.
    pub dir: String,
    /// URL prefix for pages found under `dir`.
    #[serde(default, rename = "urlPrefix")]
    pub url_prefix: Option<String>,
    /// Source instance name (defaults to `dir` without slashes).
    #[serde(default)]
    pub name: Option<String>,
    /// Remote repository the directory is checked out from.
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

impl ContentSourceRule {
    /// Directory pattern with exactly one leading and one trailing slash.
    ///
    /// `docs` and `/docs/` both become `/docs/`, so `/repo/docs-old/a.md`
    /// does not match a `docs` rule.
    #[must_use]
    pub fn dir_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.dir.len() + 2);
        if !self.dir.starts_with('/') {
            pattern.push('/');
        }
        pattern.push_str(&self.dir);
        if !pattern.ends_with('/') {
            pattern.push('/');
        }
        pattern
    }

    /// Check whether an absolute file path falls under this rule.
    #[must_use]
    pub fn matches(&self, absolute_path: &str) -> bool {
        absolute_path.contains(&self.dir_pattern())
    }

    /// URL prefix, treating an empty prefix as absent.
    #[must_use]
    pub fn url_prefix(&self) -> Option<&str> {
        self.url_prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Source instance name used to tag files scanned from this rule.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.dir.trim_matches('/'),
        }
    }

    /// Directory path relative to the content root.
    #[must_use]
    pub fn relative_dir(&self) -> &Path {
        Path::new(self.dir.trim_matches('/'))
    }
}

/// Ordered content-source rules. First match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ContentSourceMapping {
    rules: Vec<ContentSourceRule>,
}

impl ContentSourceMapping {
    /// Create a mapping from rules in priority order.
    #[must_use]
    pub fn new(rules: Vec<ContentSourceRule>) -> Self {
        Self { rules }
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[ContentSourceRule] {
        &self.rules
    }

    /// Check if the mapping has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Find the first rule whose directory pattern occurs in `absolute_path`.
    #[must_use]
    pub fn find(&self, absolute_path: &str) -> Option<&ContentSourceRule> {
        self.rules.iter().find(|rule| rule.matches(absolute_path))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (idx, rule) in self.rules.iter().enumerate() {
            if rule.dir.trim_matches('/').is_empty() {
                return Err(ConfigError::Validation(format!(
                    "content source #{} must have a non-empty dir",
                    idx + 1
                )));
            }
        }
        Ok(())
    }
}

/// Read a YAML sequence file, returning `None` when the file does not exist.
fn read_yaml_list<T: serde::de::DeserializeOwned>(
    path: &Path,
) -> Result<Option<Vec<T>>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Some(Vec::new()));
    }
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
}

/// Load the content-source mapping file.
///
/// A missing file yields an empty mapping: every page then falls back to an
/// unprefixed path.
pub(crate) fn load_content_sources(path: &Path) -> Result<ContentSourceMapping, ConfigError> {
    let Some(rules) = read_yaml_list::<ContentSourceRule>(path)? else {
        tracing::warn!(path = %path.display(), "Content source mapping not found, using none");
        return Ok(ContentSourceMapping::default());
    };
    let mapping = ContentSourceMapping::new(rules);
    mapping.validate()?;
    Ok(mapping)
}

/// Load the table-of-contents source list, resolving entries against `base`.
pub(crate) fn load_toc_sources(path: &Path, base: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let Some(entries) = read_yaml_list::<String>(path)? else {
        tracing::warn!(path = %path.display(), "Table of contents source list not found, using none");
        return Ok(Vec::new());
    };
    Ok(entries.iter().map(|entry| base.join(entry)).collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rule(dir: &str, url_prefix: Option<&str>) -> ContentSourceRule {
        ContentSourceRule {
            dir: dir.to_owned(),
            url_prefix: url_prefix.map(str::to_owned),
            name: None,
            remote: None,
        }
    }

    #[test]
    fn test_dir_pattern_normalization() {
        assert_eq!(rule("docs", None).dir_pattern(), "/docs/");
        assert_eq!(rule("/docs", None).dir_pattern(), "/docs/");
        assert_eq!(rule("docs/", None).dir_pattern(), "/docs/");
        assert_eq!(rule("/docs/", None).dir_pattern(), "/docs/");
        assert_eq!(rule("content/api", None).dir_pattern(), "/content/api/");
    }

    #[test]
    fn test_matches_is_substring_containment() {
        let docs = rule("docs", None);
        assert!(docs.matches("/repo/docs/intro.md"));
        assert!(docs.matches("/home/me/site/docs/nested/page.mdx"));
        assert!(!docs.matches("/repo/docs-old/intro.md"));
        assert!(!docs.matches("/repo/mydocs/intro.md"));
    }

    #[test]
    fn test_find_first_match_wins() {
        let mapping = ContentSourceMapping::new(vec![
            rule("/docs/api/", Some("/api")),
            rule("/docs/", Some("/documentation")),
        ]);

        let api = mapping.find("/repo/docs/api/users.md").unwrap();
        assert_eq!(api.url_prefix(), Some("/api"));

        let docs = mapping.find("/repo/docs/intro.md").unwrap();
        assert_eq!(docs.url_prefix(), Some("/documentation"));

        assert!(mapping.find("/repo/blog/post.md").is_none());
    }

    #[test]
    fn test_empty_url_prefix_is_absent() {
        assert_eq!(rule("docs", Some("")).url_prefix(), None);
        assert_eq!(rule("docs", None).url_prefix(), None);
    }

    #[test]
    fn test_instance_name_defaults_to_dir() {
        assert_eq!(rule("/guides/", None).instance_name(), "guides");

        let mut named = rule("vendor/guides", None);
        named.name = Some("guides".to_owned());
        assert_eq!(named.instance_name(), "guides");
    }

    #[test]
    fn test_parse_mapping_yaml() {
        let yaml = r"
- dir: /docs/
  urlPrefix: /documentation
- dir: guides
  name: guides
  remote:
    url: https://github.com/example/guides.git
    branch: main
- dir: notebooks
";
        let mapping: ContentSourceMapping = serde_yaml::from_str(yaml).unwrap();
        let rules = mapping.rules();

        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].url_prefix(), Some("/documentation"));
        assert_eq!(
            rules[1].remote,
            Some(RemoteConfig {
                url: "https://github.com/example/guides.git".to_owned(),
                branch: Some("main".to_owned()),
            })
        );
        assert_eq!(rules[2].url_prefix(), None);
    }

    #[test]
    fn test_load_content_sources_missing_file_is_empty() {
        let mapping = load_content_sources(Path::new("/nonexistent/content-sources.yaml")).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_load_content_sources_rejects_empty_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("content-sources.yaml");
        std::fs::write(&path, "- dir: /\n  urlPrefix: /x\n").unwrap();

        let err = load_content_sources(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_content_sources_malformed_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("content-sources.yaml");
        std::fs::write(&path, "- dir: [unclosed\n").unwrap();

        let err = load_content_sources(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_load_toc_sources_resolves_against_base() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("toc-sources.yaml");
        std::fs::write(&path, "- config/toc.yaml\n- guides/toc.yaml\n").unwrap();

        let sources = load_toc_sources(&path, Path::new("/project")).unwrap();
        assert_eq!(
            sources,
            vec![
                PathBuf::from("/project/config/toc.yaml"),
                PathBuf::from("/project/guides/toc.yaml"),
            ]
        );
    }

    #[test]
    fn test_load_toc_sources_empty_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("toc-sources.yaml");
        std::fs::write(&path, "\n").unwrap();

        assert!(load_toc_sources(&path, temp_dir.path()).unwrap().is_empty());
    }
}
