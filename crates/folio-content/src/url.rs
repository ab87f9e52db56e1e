//! URL path joining.

/// Join URL path parts and normalize the result.
///
/// - The result is absolute if the first non-empty part starts with `/`
/// - Empty and `.` segments are dropped, `..` removes the previous segment
/// - The result never ends with `/` unless it is the root `/`
///
/// ```
/// use folio_content::join_url_path;
///
/// assert_eq!(join_url_path(&["/documentation", "intro"]), "/documentation/intro");
/// assert_eq!(join_url_path(&["/documentation/", ""]), "/documentation");
/// assert_eq!(join_url_path(&["", "guide/./setup"]), "guide/setup");
/// ```
#[must_use]
pub fn join_url_path(parts: &[&str]) -> String {
    let absolute = parts
        .iter()
        .find(|p| !p.is_empty())
        .is_some_and(|p| p.starts_with('/'));

    let mut segments: Vec<&str> = Vec::new();
    for segment in parts.iter().flat_map(|p| p.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}
