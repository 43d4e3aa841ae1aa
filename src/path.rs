//! Asset path helpers
//!
//! Asset references inside documents are relative, `/`-separated strings.
//! Documents authored on Windows may use `\`, which is canonicalized here.

/// Replace every `\` with `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Directory part of `path`, including the trailing `/`.
///
/// Returns an empty string when `path` has no directory component.
///
/// # Examples
///
/// ```
/// use assetry::path::directory_of;
///
/// assert_eq!(directory_of("foo/bar/blah/file.foo"), "foo/bar/blah/");
/// assert_eq!(directory_of("file.foo"), "");
/// ```
pub fn directory_of(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(index) => &path[..=index],
        None => "",
    }
}

/// Resolve `relative` against the directory `base`.
///
/// `.` segments are dropped and `..` removes the previous segment. Leading
/// `..` segments that climb above `base` are kept. An absolute `relative`
/// (starting with `/`) is returned normalized and unchanged otherwise.
///
/// # Examples
///
/// ```
/// use assetry::path::combine_paths;
///
/// assert_eq!(combine_paths("foo/bar/blah", "../../asdf/fdsa"), "foo/asdf/fdsa");
/// assert_eq!(combine_paths("levels/", "./tiles\\grass.png"), "levels/tiles/grass.png");
/// ```
pub fn combine_paths(base: &str, relative: &str) -> String {
    let relative = normalize_separators(relative);
    if relative.starts_with('/') {
        return relative;
    }

    let base = normalize_separators(base);
    let absolute = base.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in base.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}
