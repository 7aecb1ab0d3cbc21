//! Locating `.section-store.toml`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name looked up in every search directory
pub const CONFIG_FILE: &str = ".section-store.toml";

/// Candidate config paths, highest priority first
///
/// A store is usually configured per project, so the working directory wins
/// over the user's home directory.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    paths.extend(dirs::home_dir().map(|home| home.join(CONFIG_FILE)));
    paths
}

/// Path and content of the first config file found
pub fn load_config_file() -> Option<(PathBuf, String)> {
    read_first(&config_search_paths())
}

fn read_first(paths: &[PathBuf]) -> Option<(PathBuf, String)> {
    paths
        .iter()
        .find_map(|path| read(path).map(|content| (path.clone(), content)))
}

/// Missing files are skipped quietly; unreadable ones are worth a warning
fn read(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("Cannot read config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_directory_comes_first() {
        let paths = config_search_paths();
        assert_eq!(paths[0], PathBuf::from(CONFIG_FILE));
        assert!(paths.iter().all(|path| path.ends_with(CONFIG_FILE)));
    }

    #[test]
    fn test_read_first_skips_missing_files() {
        let dir = std::env::temp_dir().join(format!("section-store-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let present = dir.join(CONFIG_FILE);
        std::fs::write(&present, "channel = \"bus\"\n").unwrap();

        let found = read_first(&[dir.join("missing.toml"), present.clone()]);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(found, Some((present, "channel = \"bus\"\n".to_string())));
        assert_eq!(read_first(&[dir.join("missing.toml")]), None);
    }
}
