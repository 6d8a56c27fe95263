use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::ParseError;

/// Named capture groups of a matched entry path, keyed by group name.
pub type CaptureMap = HashMap<String, String>;

pub(crate) type ParseFn<T> = Arc<dyn Fn(CaptureMap) -> Result<T, ParseError> + Send + Sync>;

/// Default entry pattern: `(id) name [date].ext`.
pub static DEFAULT_ENTRY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((?<id>.*?)\)\s*(?<name>.*?)\s*\[(?<date>.*?)\]\s*\.(.*)").unwrap()
});

/// Configuration for a single `list` call.
///
/// Constructed per call and consumed by [`FileArchive::list`]; only the
/// directory path is required. `parse` rebinds the record type, so the
/// builder starts at `ListOptions<CaptureMap>` with an identity hook.
///
/// ```
/// use filearc::{CaptureMap, ListOptions};
///
/// let options = ListOptions::new("123 Made Up Lane/Internet")
///     .parse(|groups: CaptureMap| Ok(groups.get("id").cloned().unwrap_or_default()));
/// ```
///
/// [`FileArchive::list`]: crate::FileArchive::list
#[derive(Clone)]
pub struct ListOptions<T> {
    pub(crate) directory_path: PathBuf,
    pub(crate) pattern: Regex,
    pub(crate) parse: ParseFn<T>,
    pub(crate) matcher: Option<Value>,
}

impl ListOptions<CaptureMap> {
    /// Start a listing request for a directory relative to the archive root.
    ///
    /// Defaults: [`DEFAULT_ENTRY_PATTERN`], identity parse, no matcher.
    pub fn new(directory_path: impl Into<PathBuf>) -> Self {
        Self {
            directory_path: directory_path.into(),
            pattern: DEFAULT_ENTRY_PATTERN.clone(),
            parse: Arc::new(Ok),
            matcher: None,
        }
    }
}

impl<T> ListOptions<T> {
    /// Override the extraction pattern.
    ///
    /// The pattern is tested against the full resolved absolute path of each
    /// entry, not just its basename, so it may capture parent-directory
    /// segments. Pattern authors must account for whatever directory depth
    /// the full path exposes.
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }

    /// Replace the parse hook, rebinding the record type to `U`.
    ///
    /// The hook receives the named capture groups of one entry and may
    /// coerce, rename, or derive fields. A returned [`ParseError`] aborts
    /// the whole `list` call.
    pub fn parse<U>(
        self,
        parse: impl Fn(CaptureMap) -> Result<U, ParseError> + Send + Sync + 'static,
    ) -> ListOptions<U> {
        ListOptions {
            directory_path: self.directory_path,
            pattern: self.pattern,
            parse: Arc::new(parse),
            matcher: self.matcher,
        }
    }

    /// Keep only records whose fields equal every field of `matcher`.
    ///
    /// Must be a JSON object; each key constrains the record's value at that
    /// key to exact `Value` equality (no coercion). Keys absent from the
    /// matcher impose no constraint.
    pub fn matcher(mut self, matcher: Value) -> Self {
        self.matcher = Some(matcher);
        self
    }
}
