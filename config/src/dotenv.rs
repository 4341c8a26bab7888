//! Parse a project `.env` file into a key-value map. Applying to the process env happens in lib.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// `.env` in `override_dir`, else in the current directory. `None` when no such file.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Strips one pair of matching surrounding quotes. Double quotes honour `\"`.
fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return value[1..value.len() - 1].replace("\\\"", "\"");
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].to_string();
    }
    value.to_string()
}

/// Line-based parser: `KEY=VALUE`, optional leading `export `, `#` comment lines, blank lines.
///
/// A `#` inside a value is kept. No multiline values.
fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim())))
        })
        .collect()
}

/// Reads `.env` into a map. A missing file yields an empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    match dotenv_path(override_dir) {
        Some(path) => Ok(parse_dotenv(&std::fs::read_to_string(path)?)),
        None => Ok(HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_values() {
        let m = parse_dotenv("STRAND_MAX_CHAT_LENGTH=20\nSTRAND_PLAN_OPEN_TAG=<plan>\n");
        assert_eq!(m.get("STRAND_MAX_CHAT_LENGTH"), Some(&"20".to_string()));
        assert_eq!(m.get("STRAND_PLAN_OPEN_TAG"), Some(&"<plan>".to_string()));
    }

    #[test]
    fn comments_blank_lines_and_export_prefix() {
        let m = parse_dotenv("# settings\n\nexport KEY=val\n   \n");
        assert_eq!(m.get("KEY"), Some(&"val".to_string()));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn hash_inside_value_is_kept() {
        let m = parse_dotenv("TAG=a#b");
        assert_eq!(m.get("TAG"), Some(&"a#b".to_string()));
    }

    #[test]
    fn quoted_values() {
        let m = parse_dotenv("A=\"hello world\"\nB='single'\nC=\"say \\\"hi\\\"\"\nD=\"\"");
        assert_eq!(m.get("A"), Some(&"hello world".to_string()));
        assert_eq!(m.get("B"), Some(&"single".to_string()));
        assert_eq!(m.get("C"), Some(&"say \"hi\"".to_string()));
        assert_eq!(m.get("D"), Some(&"".to_string()));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let m = parse_dotenv("NO_EQUALS\n=value_only\nOK=1\n");
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("OK"), Some(&"1".to_string()));
    }

    #[test]
    fn missing_file_gives_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn reads_file_from_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "A=1\nB=2\n").unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m.get("A"), Some(&"1".to_string()));
        assert_eq!(m.get("B"), Some(&"2".to_string()));
    }
}
