//! Path normalization used by the destination path checks.
//!
//! Paths are handled as plain strings because they come straight from text
//! fields and may mix `/` and `\` regardless of the host platform.

/// Returns true if the path ends with `/` or `\`.
#[must_use]
pub fn has_trailing_separator(path: &str) -> bool {
    path.ends_with('/') || path.ends_with('\\')
}

/// Appends `/` unless the path already ends with a separator.
///
/// Returns true if a separator was appended.
pub fn ensure_trailing_separator(path: &mut String) -> bool {
    if has_trailing_separator(path) {
        return false;
    }
    path.push('/');
    true
}

/// Returns true if the path already starts at the marker segment
/// (`<marker>/` or `<marker>\`).
#[must_use]
pub fn starts_at_marker(path: &str, marker: &str) -> bool {
    path.strip_prefix(marker)
        .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('\\'))
}

/// Index of the last segment equal to `marker`, or 0 when there is none.
///
/// A marker in the first segment is indistinguishable from "not found".
#[must_use]
pub fn find_marker(segments: &[&str], marker: &str) -> usize {
    let mut found = 0;
    for (idx, segment) in segments.iter().enumerate() {
        if *segment == marker {
            tracing::debug!(index = idx, "found root marker");
            found = idx;
        }
    }
    found
}

/// Normalizes a destination path so that it starts at the project root marker.
///
/// - A path already starting with `<marker>/` or `<marker>\` only gets a
///   trailing separator if it lacks one.
/// - Otherwise the path is split on both separators, everything before the
///   last marker segment is dropped (unless that segment is the first one),
///   and the segments are rejoined with `/` after each one.
///
/// # Examples
///
/// ```
/// use keyscene::validator::paths::normalize_project_path;
///
/// assert_eq!(
///     normalize_project_path(r"C:\Projects\Game\Assets\Scenes", "Assets"),
///     "Assets/Scenes/"
/// );
/// assert_eq!(normalize_project_path("Assets/Levels", "Assets"), "Assets/Levels/");
/// assert_eq!(normalize_project_path("out/scenes", "Assets"), "out/scenes/");
/// ```
#[must_use]
pub fn normalize_project_path(path: &str, marker: &str) -> String {
    if starts_at_marker(path, marker) {
        let mut normalized = path.to_string();
        ensure_trailing_separator(&mut normalized);
        return normalized;
    }

    let mut segments: Vec<&str> = path.split(['/', '\\']).collect();

    // A trailing separator yields one empty final segment; it is re-added on join.
    if segments.len() > 1 && segments.last() == Some(&"") {
        segments.pop();
    }

    let marker_index = find_marker(&segments, marker);
    if marker_index != 0 {
        segments.drain(..marker_index);
    }

    segments.iter().map(|segment| format!("{segment}/")).collect()
}
