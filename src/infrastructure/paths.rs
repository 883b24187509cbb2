//! Path utilities for the Zellij sandbox environment.

use std::path::PathBuf;

/// File name of the OTLP trace export.
pub const TRACE_FILE_NAME: &str = "cinesearch-otlp.json";

/// Returns the plugin's data directory, `/host/.local/share/zellij/cinesearch`.
///
/// `/host` points to the cwd of the last focused terminal (or where Zellij
/// was started), which is usually the user's home directory.
///
/// ```
/// use cinesearch::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/cinesearch"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("cinesearch")
}

/// Path of the trace export file inside [`get_data_dir`].
#[must_use]
pub fn trace_file() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Maps `~` paths from the configuration onto the `/host` mount.
///
/// ```
/// use cinesearch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dune.toml"), "/host/themes/dune.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
