use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use filearc_envelope::{self as envelope, Envelope};

use crate::error::{Error, Result};
use crate::list::{capture_groups, matches_partial};
use crate::options::ListOptions;

/// A directory tree used as a lightweight archive.
///
/// Holds only the root path; every operation resolves its argument against
/// the root independently, so concurrent callers share no state and race
/// only at the filesystem level. All operations are read- or write-through
/// with no retries, no caching, and no locking.
#[derive(Debug, Clone)]
pub struct FileArchive {
    archive_path: PathBuf,
}

impl FileArchive {
    /// Create an archive over `archive_path`. The root is fixed for the
    /// lifetime of the value; the directory is not required to exist yet.
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
        }
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Lexical join against the root, then absolutization. No sandboxing:
    /// a relative path containing `..` can escape the root.
    fn resolve(&self, relative: &Path) -> Result<PathBuf> {
        Ok(std::path::absolute(self.archive_path.join(relative))?)
    }

    /// Derive structured records from the immediate children of a directory.
    ///
    /// Each child's full resolved absolute path is tested against the
    /// options' pattern; non-matching children are silently discarded.
    /// Survivors have their named capture groups run through the parse hook
    /// and, when a matcher is set, are kept only if every matcher field
    /// equals the record's field. Matching against the full path (the
    /// archive root's own filesystem location included) lets patterns
    /// capture parent-directory segments, at the cost of being sensitive to
    /// where the archive lives on disk.
    ///
    /// Records come back in directory-enumeration order, which is not
    /// guaranteed stable across platforms or filesystems.
    ///
    /// A missing directory fails with [`Error::DirectoryNotFound`]; a parse
    /// failure on any single entry aborts the whole call.
    pub async fn list<T: Serialize>(&self, options: ListOptions<T>) -> Result<Vec<T>> {
        let dir = self.resolve(&options.directory_path)?;
        debug!(directory = %dir.display(), "listing archive directory");

        let matcher = match &options.matcher {
            Some(value) => Some(value.as_object().ok_or_else(|| {
                Error::Configuration("matcher must be a JSON object".to_string())
            })?),
            None => None,
        };

        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::DirectoryNotFound { path: dir.clone() }
            } else {
                Error::Io(e)
            }
        })?;

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = dir.join(entry.file_name());
            let haystack = path.to_string_lossy();

            let Some(groups) = capture_groups(&options.pattern, &haystack) else {
                continue;
            };
            trace!(entry = %path.display(), "entry matched pattern");

            let record = (options.parse)(groups)?;

            if let Some(matcher) = matcher {
                let value = serde_json::to_value(&record).map_err(Error::Matcher)?;
                if !matches_partial(&value, matcher) {
                    continue;
                }
            }

            records.push(record);
        }

        Ok(records)
    }

    /// Read and decode the envelope stored at `file_path`.
    ///
    /// The envelope's declared format/version is returned as stamped by the
    /// writer; no compatibility check is performed against the current
    /// constants.
    pub async fn read<T: DeserializeOwned>(&self, file_path: impl AsRef<Path>) -> Result<Envelope<T>> {
        let path = self.resolve(file_path.as_ref())?;
        debug!(file = %path.display(), "reading envelope");

        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::FileNotFound { path: path.clone() }
            } else {
                Error::Io(e)
            }
        })?;

        envelope::decode(&text).map_err(|source| Error::Decode { path, source })
    }

    /// Wrap `data` in a freshly stamped envelope and write it to `file_path`,
    /// overwriting any existing file unconditionally. The write is not
    /// atomic; a crash mid-write can leave a corrupt file. Parent
    /// directories are not created. Returns the envelope actually written.
    pub async fn save<T: Serialize>(&self, file_path: impl AsRef<Path>, data: T) -> Result<Envelope<T>> {
        let path = self.resolve(file_path.as_ref())?;
        debug!(file = %path.display(), "saving envelope");

        let contents = Envelope::new(data);
        let text = envelope::encode(&contents).map_err(|source| Error::Encode {
            path: path.clone(),
            source,
        })?;

        tokio::fs::write(&path, text).await?;
        Ok(contents)
    }

    /// Remove the regular file at `file_path`.
    ///
    /// A missing file fails with [`Error::FileNotFound`] rather than
    /// returning `false`; a non-regular file fails with [`Error::NotAFile`].
    /// The existence check and the removal are two separate filesystem
    /// operations, so a racing delete surfaces as an I/O error.
    pub async fn delete(&self, file_path: impl AsRef<Path>) -> Result<bool> {
        let path = self.resolve(file_path.as_ref())?;
        debug!(file = %path.display(), "deleting file");

        let metadata = tokio::fs::metadata(&path).await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::FileNotFound { path: path.clone() }
            } else {
                Error::Io(e)
            }
        })?;
        if !metadata.is_file() {
            return Err(Error::NotAFile { path });
        }

        tokio::fs::remove_file(&path).await?;
        Ok(true)
    }
}
