//! Size-rotated file writer.
//!
//! Before each write the file's size is checked; past the limit it is renamed
//! to `<name>.json.<unix_nanos>` and a fresh file is started. Only the newest
//! backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Appends lines to a file, rotating it by size.
///
/// The file is opened lazily on the first write.
///
/// # Thread Safety
///
/// The open handle sits behind a `Mutex`, so one writer can be shared by the
/// exporter across threads.
///
/// # Rotation Strategy
///
/// 1. Check the file size before each write
/// 2. Past `max_bytes`:
///    - Close the handle
///    - Rename the file to `<name>.<unix_nanos>`
///    - Delete all but the newest `max_backups` backups
/// 3. Open a fresh file and write
///
/// # Example
///
/// ```rust,ignore
/// let writer = FileWriter::new(PathBuf::from("/data/cinesearch-otlp.json"));
/// writer.write_line(r#"{"resourceSpans":[]}"#)?;
/// ```
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer for `file_path` with the default limits (10 MB, three
    /// backups).
    ///
    /// Nothing touches the file system until the first write, so construction
    /// succeeds even when the file cannot be opened yet.
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer with explicit limits.
    ///
    /// # Parameters
    ///
    /// * `file_path` - File to append to (created if it doesn't exist)
    /// * `max_bytes` - Size past which the file is rotated before a write
    /// * `max_backups` - Number of rotated files to keep
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Writes `line` plus a newline and flushes.
    ///
    /// Rotates first when the file has grown past the limit.
    ///
    /// # Parameters
    ///
    /// * `line` - One serialized document, without a trailing newline
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is flushed
    /// - `Err(io::Error)` if rotating, opening, writing or flushing failed
    ///
    /// # Errors
    ///
    /// May fail due to:
    /// - File system permissions inside the sandbox
    /// - Disk space exhaustion
    /// - A poisoned lock (another thread panicked while writing)
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("trace writer lock poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        if writer.is_none() {
            *writer = Some(OpenOptions::new().create(true).append(true).open(&self.file_path)?);
        }
        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::other("trace file is not open"))?;

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    /// Moves the current file aside and prunes old backups.
    ///
    /// # Backup Naming
    ///
    /// `<name>.<unix_nanos>`, e.g. `cinesearch-otlp.json.1760000000123456789`.
    /// Nanoseconds keep two rotations within one second apart.
    fn rotate(&self) -> io::Result<()> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let backup_path = self.file_path.with_extension(format!("json.{stamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.remove_old_backups()
    }

    /// Deletes all but the newest `max_backups` backups. Individual deletion
    /// failures are ignored.
    fn remove_old_backups(&self) -> io::Result<()> {
        let parent = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::other("trace file has no parent directory"))?;
        let prefix = self
            .file_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::other("trace file name is not valid UTF-8"))?;

        let mut backups: Vec<(u128, PathBuf)> = fs::read_dir(parent)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter_map(|path| backup_stamp(&path, &prefix).map(|stamp| (stamp, path)))
            .collect();

        backups.sort_by(|a, b| b.0.cmp(&a.0));

        for (_, old_backup) in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

/// Timestamp suffix of a backup file named `<prefix><digits>`.
fn backup_stamp(path: &Path, prefix: &str) -> Option<u128> {
    path.file_name()?.to_str()?.strip_prefix(prefix)?.parse().ok()
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}
