// linkshelf platform paths
// Resolves where the database lives on Linux, macOS and Windows.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LINKSHELF_DATA_DIR";

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "linkshelf.db";

/// Returns the platform-specific data directory for linkshelf.
///
/// - **Linux**: `$XDG_DATA_HOME/linkshelf` or `~/.local/share/linkshelf`
/// - **macOS**: `~/Library/Application Support/linkshelf`
/// - **Windows**: `%APPDATA%/linkshelf`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("."));
        PathBuf::from(appdata).join("linkshelf")
    }
    #[cfg(target_os = "macos")]
    {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join("linkshelf")
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Ok(xdg) = env::var("XDG_DATA_HOME") {
            PathBuf::from(xdg).join("linkshelf")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
            PathBuf::from(home).join(".local").join("share").join("linkshelf")
        }
    }
}

/// Database path: `$LINKSHELF_DATA_DIR/linkshelf.db` when set, otherwise
/// inside [`get_data_dir`].
pub fn database_path() -> PathBuf {
    match env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(DATABASE_FILE),
        _ => get_data_dir().join(DATABASE_FILE),
    }
}
