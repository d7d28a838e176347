//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use directories::ProjectDirs;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "fintera";
const APPLICATION: &str = "fintera";

/// Name of the log file of the running process.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/fintera` or `~/.config/fintera`
/// - macOS: `~/Library/Application Support/com.fintera.fintera`
/// - Windows: `C:\Users\<User>\AppData\Roaming\fintera\fintera\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/fintera` or `~/.cache/fintera`
/// - macOS: `~/Library/Caches/com.fintera.fintera`
/// - Windows: `C:\Users\<User>\AppData\Local\fintera\fintera\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the settings file.
pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archives the previous run's log and prunes the archive.
///
/// Runs at startup, before `latest.log` is opened for the new run.
pub fn rotate_logs() {
    if let Some(cache) = cache_dir() {
        rotate_logs_in(&cache);
    }
}

fn rotate_logs_in(cache: &Path) {
    let latest = cache.join(LATEST_LOG);
    if latest.is_file() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        if let Err(e) = fs::rename(&latest, cache.join(format!("{}.log", stamp))) {
            log::debug!("could not archive {}: {}", latest.display(), e);
        }
    }
    cleanup_old_logs(cache);
}

/// Deletes archived logs beyond the newest `MAX_OLD_LOGS`.
fn cleanup_old_logs(cache: &Path) {
    let Ok(entries) = fs::read_dir(cache) else { return };

    let mut archived: Vec<(Option<SystemTime>, PathBuf)> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_archived_log(path))
        .map(|path| (fs::metadata(&path).and_then(|m| m.modified()).ok(), path))
        .collect();
    archived.sort_by(|a, b| b.cmp(a));

    for (_, path) in archived.into_iter().skip(MAX_OLD_LOGS) {
        let _ = fs::remove_file(path);
    }
}

fn is_archived_log(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST_LOG)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn log_count(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| is_archived_log(&e.path()))
            .count()
    }

    #[test]
    fn test_rotate_archives_latest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LATEST_LOG), "previous run").unwrap();

        rotate_logs_in(dir.path());

        assert!(!dir.path().join(LATEST_LOG).exists());
        assert_eq!(log_count(dir.path()), 1);
    }

    #[test]
    fn test_rotate_without_latest_is_noop() {
        let dir = TempDir::new().unwrap();
        rotate_logs_in(dir.path());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_keeps_newest() {
        let dir = TempDir::new().unwrap();
        for i in 0..MAX_OLD_LOGS + 3 {
            fs::write(dir.path().join(format!("old_{:03}.log", i)), "").unwrap();
        }
        fs::write(dir.path().join(LATEST_LOG), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        cleanup_old_logs(dir.path());

        assert_eq!(log_count(dir.path()), MAX_OLD_LOGS);
        assert!(dir.path().join(LATEST_LOG).exists());
        assert!(dir.path().join("notes.txt").exists());
    }
}
