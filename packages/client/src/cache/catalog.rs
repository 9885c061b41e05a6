//! Persistent Last-Modified catalog
//!
//! The catalog maps each [`ResourceKey`] to the Last-Modified instant of its
//! cached copy. It is backed by an append-only text log with one
//! `key_timestamp` record per line. Updates only ever append, so the log can
//! hold superseded records; loading reduces them by keeping the newest
//! instant per key.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use super::cache_key::ResourceKey;
use super::http_date::{HttpDateParseError, httpdate};
use crate::error::{self, Result};

/// Separator between key and timestamp in a log record
pub const RECORD_SEPARATOR: char = '_';

/// One catalog entry as read from the log or recorded after a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    raw: String,
    modified: Option<SystemTime>,
}

impl CatalogRecord {
    fn from_raw(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            modified: httpdate::parse_http_date(raw).ok(),
        }
    }

    fn from_instant(instant: SystemTime) -> Self {
        let raw = httpdate::fmt_http_date(instant);
        Self {
            modified: httpdate::parse_http_date(&raw).ok(),
            raw,
        }
    }

    /// Timestamp text as stored in the log
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parsed Last-Modified instant
    ///
    /// # Errors
    ///
    /// Returns the parse failure when the stored text is not a valid HTTP date.
    pub fn modified(&self) -> std::result::Result<SystemTime, HttpDateParseError> {
        self.modified
            .ok_or_else(|| HttpDateParseError::UnrecognizedFormat(self.raw.clone()))
    }

    /// True when `self` should replace `current` during reduction
    ///
    /// Any parseable record beats an unparseable one; ties keep `current`.
    fn supersedes(&self, current: &CatalogRecord) -> bool {
        match (self.modified, current.modified) {
            (Some(new), Some(old)) => new > old,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

/// In-memory catalog view plus the location of its backing log
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    entries: HashMap<ResourceKey, CatalogRecord>,
}

impl Catalog {
    /// Load the catalog backed by the log at `path`
    ///
    /// A missing log yields an empty catalog; the file is created on the first
    /// [`put`](Self::put).
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the log exists but cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match File::open(&path) {
            Ok(file) => {
                let mut lines = Vec::new();
                for line in BufReader::new(file).lines() {
                    lines.push(line.map_err(|e| error::io(e).with_url(path.display().to_string()))?);
                }
                reduce(lines.iter().map(String::as_str))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(error::io(e).with_url(path.display().to_string())),
        };

        tracing::debug!(
            target: "urlcache::cache::catalog",
            path = %path.display(),
            entries = entries.len(),
            "Loaded catalog"
        );

        Ok(Self { path, entries })
    }

    /// Build a catalog from log lines without touching the filesystem
    ///
    /// Subsequent [`put`](Self::put) calls append to `path`.
    pub fn from_lines<'a, I>(path: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            path: path.into(),
            entries: reduce(lines),
        }
    }

    /// Location of the backing log
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, key: &ResourceKey) -> Option<&CatalogRecord> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKey, &CatalogRecord)> {
        self.entries.iter()
    }

    /// Append a record of `instant` for `key` to the log
    ///
    /// The record is written with a single `write_all` so a crash leaves at
    /// most one torn trailing line, which the loader skips. The in-memory view
    /// then reduces the same way loading does, so it keeps the newest instant
    /// and always agrees with a reload of the log.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the log cannot be opened or written. The
    /// in-memory view is only updated after the append succeeds.
    pub fn put(&mut self, key: ResourceKey, instant: SystemTime) -> Result<()> {
        let record = CatalogRecord::from_instant(instant);
        let line = format!("{key}{RECORD_SEPARATOR}{}\n", record.raw);

        let mut log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| error::io(e).with_url(self.path.display().to_string()))?;
        log.write_all(line.as_bytes())
            .and_then(|()| log.flush())
            .map_err(|e| error::io(e).with_url(self.path.display().to_string()))?;

        tracing::trace!(
            target: "urlcache::cache::catalog",
            key = %key,
            last_modified = %record.raw,
            "Appended catalog record"
        );

        match self.entries.entry(key) {
            Entry::Occupied(mut current) => {
                if record.supersedes(current.get()) {
                    current.insert(record);
                } else {
                    tracing::debug!(
                        target: "urlcache::cache::catalog",
                        key = %current.key(),
                        recorded = %current.get().raw,
                        "Catalog already holds a newer instant"
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
        Ok(())
    }

    /// Rewrite the log with exactly one record per key
    ///
    /// The new log is written to a sibling temporary file and renamed over the
    /// old one, so the catalog on disk is always either the old or the new log.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the temporary file cannot be written or renamed.
    pub fn compact(&self) -> Result<usize> {
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        let io_err = |e: std::io::Error| error::io(e).with_url(tmp_path.display().to_string());

        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();

        let file = File::create(&tmp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        for key in &keys {
            let record = &self.entries[*key];
            writeln!(writer, "{key}{RECORD_SEPARATOR}{}", record.raw).map_err(io_err)?;
        }
        let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(&tmp_path, &self.path)
            .map_err(|e| error::io(e).with_url(self.path.display().to_string()))?;

        tracing::debug!(
            target: "urlcache::cache::catalog",
            path = %self.path.display(),
            records = keys.len(),
            "Compacted catalog log"
        );

        Ok(keys.len())
    }
}

/// Split a log line into key and timestamp text
///
/// Keys may contain the separator, timestamps never do, so the split happens
/// at the last separator.
fn parse_record(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (key, stamp) = line.rsplit_once(RECORD_SEPARATOR)?;
    if key.is_empty() {
        return None;
    }
    Some((key, stamp))
}

fn reduce<'a, I>(lines: I) -> HashMap<ResourceKey, CatalogRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut entries: HashMap<ResourceKey, CatalogRecord> = HashMap::new();

    for (number, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let Some((key, stamp)) = parse_record(line) else {
            tracing::warn!(
                target: "urlcache::cache::catalog",
                line = number + 1,
                "Skipping malformed catalog record"
            );
            continue;
        };

        let record = CatalogRecord::from_raw(stamp);
        if record.modified.is_none() {
            tracing::warn!(
                target: "urlcache::cache::catalog",
                line = number + 1,
                key,
                timestamp = stamp,
                "Catalog record has an unparseable timestamp"
            );
        }

        match entries.entry(ResourceKey::from_raw(key)) {
            Entry::Occupied(mut current) => {
                if record.supersedes(current.get()) {
                    current.insert(record);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }

    entries
}
