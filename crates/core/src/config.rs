//! `nonprofit-search.toml` loading.
//!
//! ```toml
//! data_dir = "data"
//! dist = "apps/web/dist"
//! port = 8432
//! bind_all = false
//! ```
//!
//! Relative paths resolve against the directory holding the file.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::types::ServerConfig;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "nonprofit-search.toml";

/// Known keys for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["data_dir", "dist", "port", "bind_all"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Closest known key within edit distance 3.
fn suggest_key(key: &str) -> Option<&'static str> {
    KNOWN_CONFIG_KEYS
        .iter()
        .copied()
        .min_by_key(|k| edit_distance(key, k))
        .filter(|k| edit_distance(key, k) <= 3)
}

fn resolve(base: &Path, value: &str) -> PathBuf {
    let p = PathBuf::from(value);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}

/// Parse config text. `data_dir` defaults to `base`. Unknown keys and
/// ill-typed values are warned about and ignored; a file that is not valid
/// TOML yields the defaults.
pub fn parse_config(content: &str, base: &Path) -> ServerConfig {
    let mut config = ServerConfig { data_dir: base.to_path_buf(), ..ServerConfig::default() };

    let table = match content.parse::<toml::Table>() {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Failed to parse {CONFIG_FILE_NAME}");
            return config;
        }
    };

    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        match suggest_key(key) {
            Some(suggestion) => warn!(
                key = key.as_str(),
                suggestion = suggestion,
                "Unknown key in {CONFIG_FILE_NAME} — did you mean '{suggestion}'?"
            ),
            None => warn!(
                key = key.as_str(),
                "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            ),
        }
    }

    if let Some(v) = table.get("data_dir") {
        match v.as_str() {
            Some(s) => config.data_dir = resolve(base, s),
            None => warn!("'data_dir' must be a string"),
        }
    }

    if let Some(v) = table.get("dist") {
        match v.as_str() {
            Some(s) => config.dist = Some(resolve(base, s)),
            None => warn!("'dist' must be a string"),
        }
    }

    if let Some(v) = table.get("port") {
        match v.as_integer().and_then(|p| u16::try_from(p).ok()) {
            Some(p) => config.port = Some(p),
            None => warn!("'port' must be an integer between 0 and 65535"),
        }
    }

    if let Some(v) = table.get("bind_all") {
        match v.as_bool() {
            Some(b) => config.bind_all = b,
            None => warn!("'bind_all' must be a boolean"),
        }
    }

    config
}

/// Load a config file. A missing or unreadable file yields the defaults, with
/// `data_dir` pointing at the file's directory.
pub fn load_config(path: &Path) -> ServerConfig {
    let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let base = if base.as_os_str().is_empty() { PathBuf::from(".") } else { base };

    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), "Loading config");
            parse_config(&content, &base)
        }
        Err(e) => {
            if path.exists() {
                warn!(path = %path.display(), error = %e, "Could not read config file");
            }
            ServerConfig { data_dir: base, ..ServerConfig::default() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("port", "port"), 0);
        assert_eq!(edit_distance("prot", "port"), 2);
        assert_eq!(edit_distance("datadir", "data_dir"), 1);
    }

    #[test]
    fn typo_gets_a_suggestion() {
        assert_eq!(suggest_key("data-dir"), Some("data_dir"));
        assert_eq!(suggest_key("completely_unrelated_key"), None);
    }

    #[test]
    fn parses_all_keys() {
        let base = Path::new("/srv/np");
        let config = parse_config("data_dir = \"data\"\ndist = \"/opt/dist\"\nport = 9000\nbind_all = true\n", base);
        assert_eq!(config.data_dir, PathBuf::from("/srv/np/data"));
        assert_eq!(config.dist, Some(PathBuf::from("/opt/dist")));
        assert_eq!(config.port, Some(9000));
        assert!(config.bind_all);
    }

    #[test]
    fn bad_values_and_unknown_keys_are_ignored() {
        let config = parse_config("port = 99999\nbind_all = \"yes\"\nprot = 1\n", Path::new("."));
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn invalid_toml_yields_defaults() {
        assert_eq!(parse_config("port = = 1", Path::new(".")), ServerConfig::default());
    }

    #[test]
    fn load_defaults_data_dir_to_file_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "port = 8500\n").unwrap();

        let config = load_config(&path);
        assert_eq!(config.port, Some(8500));
        assert_eq!(config.data_dir, dir.path().to_path_buf());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(config.port, None);
        assert_eq!(config.data_dir, dir.path().to_path_buf());
    }
}
