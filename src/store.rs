//! The flat-file CSV translation store.
//!
//! One store file per locale, UTF-8, one `key;value` record per non-blank
//! line with standard double-quote CSV quoting. Characters in the protected
//! set appear inside fields as two-character escape tokens; additionally the
//! literal sequence `\n` inside a value denotes an embedded newline.
//!
//! Loading builds the full key → entry mapping up front; flushing appends
//! placeholder records for keys that were requested but had no translation.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    escape::EscapeTable,
    pattern::{IcuDetector, PatternDetector},
    sink::{AtomicSink, FsSink},
    traits::TranslationStore,
    types::{Entry, PendingKeys, Store},
};

/// Prefix marking auto-generated placeholder values for untranslated keys.
///
/// A flushed key `greeting` is stored as the line `greeting;+greeting`, which
/// keeps the file syntactically valid and round-trippable. The constant is
/// stable; translators search for it to find work left to do.
pub const NOT_TRANSLATED_MARK: &str = "+";

/// A CSV-backed translation store for one locale.
///
/// Construct with [`CsvStore::builder`]; the store receives an
/// already-resolved file path and owns its own [`EscapeTable`] and
/// [`PatternDetector`], so there is no process-global configuration.
pub struct CsvStore {
    path: PathBuf,
    locale: LanguageIdentifier,
    escape: EscapeTable,
    detector: Box<dyn PatternDetector + Send + Sync>,
    sink: Box<dyn AtomicSink + Send + Sync>,
    write_back: bool,
}

impl fmt::Debug for CsvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvStore")
            .field("path", &self.path)
            .field("locale", &self.locale.to_string())
            .field("write_back", &self.write_back)
            .finish_non_exhaustive()
    }
}

impl CsvStore {
    /// Starts building a store for `path` and `locale` with default
    /// configuration.
    pub fn builder(path: impl Into<PathBuf>, locale: LanguageIdentifier) -> CsvStoreBuilder {
        CsvStoreBuilder::new(path.into(), locale)
    }

    /// A store with all defaults: default escape table, ICU detection,
    /// filesystem sink, write-back disabled.
    pub fn new(path: impl Into<PathBuf>, locale: LanguageIdentifier) -> Self {
        Self::builder(path, locale).build()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Whether this store appends untranslated keys on flush.
    pub fn write_back(&self) -> bool {
        self.write_back
    }

    /// Loads and parses the store file.
    ///
    /// A missing file yields an empty store. With write-back enabled that is
    /// the expected steady state for a brand-new locale; with write-back
    /// disabled it likely means a misconfigured path, so a warning is
    /// emitted.
    pub fn load(&self) -> Result<Store, Error> {
        if !self.path.exists() {
            if !self.write_back {
                tracing::warn!(
                    path = %self.path.display(),
                    locale = %self.locale,
                    "no translations found"
                );
            }
            return Ok(Store::new());
        }
        let content = self.read_decoded()?;
        self.parse_str(&content)
    }

    /// Parses full store-file content into a key → entry mapping.
    ///
    /// Line and row numbers in errors are 1-based. The first malformed or
    /// duplicate record aborts the whole parse.
    pub fn parse_str(&self, content: &str) -> Result<Store, Error> {
        let normalized = normalize_newlines(content);
        let mut store = Store::new();
        for (index, line) in normalized.split('\n').enumerate() {
            let row = index + 1;
            if line.trim().is_empty() {
                continue;
            }
            let (raw_key, raw_value) = self.split_record(line, row)?;
            let key = self.escape.decode(&raw_key);
            // Second unescaping layer: a literal `\n` left over after table
            // decoding denotes an embedded newline.
            let value = self.escape.decode(&raw_value).replace("\\n", "\n");
            if store.contains_key(&key) {
                return Err(Error::DuplicateKey {
                    path: self.path.clone(),
                    row,
                    key,
                });
            }
            let is_pattern = self.detector.is_pattern(&value);
            store.insert(key, Entry { value, is_pattern });
        }
        Ok(store)
    }

    /// Appends one placeholder record per pending key, atomically replacing
    /// the file content.
    ///
    /// Keys go out in first-recorded order. `pending` is cleared only after
    /// the write completed; on failure it is left intact for a retry. With
    /// write-back disabled, or with nothing pending, no filesystem operation
    /// happens at all.
    pub fn flush(&self, pending: &mut PendingKeys) -> Result<(), Error> {
        if !self.write_back || pending.is_empty() {
            return Ok(());
        }

        let existing = if self.path.exists() {
            normalize_newlines(&self.read_decoded()?).trim().to_string()
        } else {
            String::new()
        };

        let records: Vec<String> = pending
            .iter()
            .map(|key| {
                let encoded = self.escape.encode(key);
                format!("{encoded};{NOT_TRANSLATED_MARK}{encoded}")
            })
            .collect();
        let separator = if existing.is_empty() { "" } else { "\n" };
        let content = format!("{existing}{separator}{}", records.join("\n"));

        self.sink
            .write_atomic(&self.path, &content)
            .map_err(|source| Error::WriteFailure {
                path: self.path.clone(),
                source,
            })?;
        pending.clear();
        Ok(())
    }

    /// Reads the file, decoding a BOM-prefixed variant to plain UTF-8.
    fn read_decoded(&self) -> Result<String, Error> {
        let file = File::open(&self.path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);
        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
        Ok(decoded)
    }

    /// Splits one line into its key and value fields.
    ///
    /// Uses standard CSV quoting: `"` as the quote character, doubling for a
    /// literal quote. Fields beyond the second are ignored.
    fn split_record(&self, line: &str, row: usize) -> Result<(String, String), Error> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        let mut record = csv::StringRecord::new();
        let got = reader.read_record(&mut record)?;
        if !got || record.len() < 2 {
            return Err(Error::MalformedRecord {
                line: row,
                locale: self.locale.to_string(),
            });
        }
        Ok((record[0].to_string(), record[1].to_string()))
    }
}

impl TranslationStore for CsvStore {
    fn load(&self) -> Result<Store, Error> {
        CsvStore::load(self)
    }

    fn flush(&self, pending: &mut PendingKeys) -> Result<(), Error> {
        CsvStore::flush(self, pending)
    }
}

/// Normalizes `\r\n` and bare `\r` to `\n`.
fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Fluent configuration for [`CsvStore`].
///
/// # Example
///
/// ```rust,no_run
/// use langstore::{CsvStore, EscapeTable};
///
/// let store = CsvStore::builder("var/translations/de.csv", "de".parse()?)
///     .escape_table(EscapeTable::with_protected(['\n', '\t', '|']))
///     .write_back(true)
///     .build();
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CsvStoreBuilder {
    path: PathBuf,
    locale: LanguageIdentifier,
    escape: EscapeTable,
    detector: Box<dyn PatternDetector + Send + Sync>,
    sink: Box<dyn AtomicSink + Send + Sync>,
    write_back: bool,
}

impl CsvStoreBuilder {
    fn new(path: PathBuf, locale: LanguageIdentifier) -> Self {
        CsvStoreBuilder {
            path,
            locale,
            escape: EscapeTable::default(),
            detector: Box::new(IcuDetector),
            sink: Box::new(FsSink),
            write_back: false,
        }
    }

    /// Replaces the escape table. Reconfigure before loading; entries
    /// already decoded with a different table are not migrated.
    pub fn escape_table(mut self, table: EscapeTable) -> Self {
        self.escape = table;
        self
    }

    /// Replaces the pattern detector (default: [`IcuDetector`]).
    pub fn detector(mut self, detector: impl PatternDetector + Send + Sync + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Replaces the atomic write primitive (default: [`FsSink`]).
    pub fn sink(mut self, sink: impl AtomicSink + Send + Sync + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Enables or disables write-back of untranslated keys (default: off).
    pub fn write_back(mut self, enabled: bool) -> Self {
        self.write_back = enabled;
        self
    }

    pub fn build(self) -> CsvStore {
        CsvStore {
            path: self.path,
            locale: self.locale,
            escape: self.escape,
            detector: self.detector,
            sink: self.sink,
            write_back: self.write_back,
        }
    }
}
