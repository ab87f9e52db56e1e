//! YAML front matter parsing for Markdown/MDX files.

use serde::Deserialize;

/// Front matter fields Folio reads. Other keys are ignored.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Explicit slug attribute, overriding the path-derived one.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Split the front matter block from a document.
///
/// Returns the YAML between the opening `---` line and the closing `---`
/// (or `...`) line, or `None` if the document has no complete block.
fn front_matter_block(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    if lines.next()?.trim_end() != "---" {
        return None;
    }

    let start = content.find('\n')? + 1;
    let mut offset = start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            return Some(&content[start..offset]);
        }
        offset += line.len();
    }
    None
}

/// Parse the front matter of a Markdown/MDX document.
///
/// Documents without a front matter block yield an empty [`FrontMatter`].
///
/// # Errors
///
/// Returns an error if the block is not valid YAML for the known fields.
pub fn parse_front_matter(content: &str) -> Result<FrontMatter, serde_yaml::Error> {
    match front_matter_block(content) {
        Some(block) if !block.trim().is_empty() => serde_yaml::from_str(block),
        _ => Ok(FrontMatter::default()),
    }
}
