//! Pattern-based directory listing and versioned JSON envelopes over a
//! directory tree used as a lightweight archive.
//!
//! # Architecture
//!
//! - `options.rs` - Per-call listing configuration with named defaults
//! - `list.rs`    - Pure stages: named-capture extraction, partial matching
//! - `archive.rs` - `FileArchive` async I/O over tokio::fs
//! - `error.rs`   - Error taxonomy
//!
//! Filenames encode structured metadata (an id/date/name-like pattern);
//! [`FileArchive::list`] derives typed records from them via a configurable
//! regular expression with named capture groups, a caller-supplied parse
//! hook, and a partial-value matcher. [`FileArchive::read`],
//! [`FileArchive::save`] and [`FileArchive::delete`] move individual
//! [`Envelope`] documents in and out of the tree.
//!
//! Everything fails fast: no retries, no partial results, no fallback
//! values. The only silent exclusion is an entry whose path does not match
//! the listing pattern.

pub use archive::FileArchive;
pub use error::{Error, ParseError, Result};
pub use filearc_envelope::{ARCHIVE_FORMAT, Envelope, Metadata, SCHEMA_VERSION};
pub use options::{CaptureMap, DEFAULT_ENTRY_PATTERN, ListOptions};

mod archive;
mod error;
mod list;
pub mod options;
