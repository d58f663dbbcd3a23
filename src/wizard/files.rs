//! Uploaded file handles
//!
//! Terminals have no native drag-and-drop: dropping files onto a terminal
//! window pastes their paths instead. `parse_dropped_paths` turns such a
//! paste into paths so the drop zone and the file picker end up feeding
//! the same `FileHandle`s into the wizard.

use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// A user-selected file. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    /// Display name (final path component)
    pub name: String,
    /// Written lossily so non-UTF-8 names still produce a payload
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    /// Size in bytes when the path pointed at a readable regular file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(&path)
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len());

        Self { name, path, size }
    }

    pub fn from_paths<I, P>(paths: I) -> Vec<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths
            .into_iter()
            .map(|p| Self::from_path(p.as_ref()))
            .collect()
    }
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Split a drop/paste payload into file paths.
///
/// Accepts newline or whitespace separated entries, single or double
/// quoted paths, backslash-escaped spaces, and `file://` URIs.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    tokenize(text)
        .into_iter()
        .map(|token| normalize_uri(&token))
        .filter(|token| !token.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => quote = Some(c),
                '\\' => match chars.peek() {
                    Some(&next) if next.is_whitespace() || matches!(next, '\'' | '"' | '\\') => {
                        current.push(next);
                        chars.next();
                    }
                    _ => current.push(c),
                },
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(c),
            },
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn normalize_uri(token: &str) -> String {
    let Some(rest) = token.strip_prefix("file://") else {
        return token.to_string();
    };
    let rest = rest.strip_prefix("localhost").unwrap_or(rest);
    match urlencoding::decode(rest) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("/tmp/a.html", vec!["/tmp/a.html"])]
    #[case("/tmp/a.html /tmp/b.js", vec!["/tmp/a.html", "/tmp/b.js"])]
    #[case("/tmp/a.html\n/tmp/b.js\n", vec!["/tmp/a.html", "/tmp/b.js"])]
    #[case("'/tmp/my game/index.html'", vec!["/tmp/my game/index.html"])]
    #[case("\"/tmp/my game/a.css\" '/tmp/b c.js'", vec!["/tmp/my game/a.css", "/tmp/b c.js"])]
    #[case("/tmp/my\\ game/index.html", vec!["/tmp/my game/index.html"])]
    #[case("file:///tmp/my%20game/index.html", vec!["/tmp/my game/index.html"])]
    #[case("file://localhost/tmp/a.js", vec!["/tmp/a.js"])]
    #[case("   \n  ", vec![])]
    fn test_parse_dropped_paths(#[case] input: &str, #[case] expected: Vec<&str>) {
        let expected: Vec<PathBuf> = expected.into_iter().map(PathBuf::from).collect();
        assert_eq!(parse_dropped_paths(input), expected);
    }

    #[test]
    fn test_parse_keeps_non_escaping_backslash() {
        assert_eq!(
            parse_dropped_paths(r"C:\games\pong.js"),
            vec![PathBuf::from(r"C:\games\pong.js")]
        );
    }

    #[test]
    fn test_from_path_reads_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"<html></html>").unwrap();

        let handle = FileHandle::from_path(&path);
        assert_eq!(handle.name, "index.html");
        assert_eq!(handle.path, path);
        assert_eq!(handle.size, Some(13));
    }

    #[test]
    fn test_from_path_missing_file_has_no_size() {
        let handle = FileHandle::from_path("/definitely/not/here/game.js");
        assert_eq!(handle.name, "game.js");
        assert_eq!(handle.size, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_serializes_lossily() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("/tmp").join(OsStr::from_bytes(b"lev\xffel.js"));
        let handle = FileHandle::from_path(&path);
        assert_eq!(handle.name, "lev\u{FFFD}el.js");

        let value = serde_json::to_value(&handle).unwrap();
        assert_eq!(value["path"], "/tmp/lev\u{FFFD}el.js");
    }
}
