#![forbid(unsafe_code)]
//! Flat-file CSV translation store for Rust.
//!
//! Loads `key;value` translation files into memory, tags each value as plain
//! text or as an ICU-style message pattern, and at the end of a unit of work
//! durably appends any keys that were requested but had no translation —
//! without corrupting existing content, even under concurrent writers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langstore::{CsvStore, PendingKeys};
//!
//! let store = CsvStore::builder("var/translations/en.csv", "en".parse()?)
//!     .write_back(true)
//!     .build();
//!
//! let mapping = store.load()?;
//! let mut pending = PendingKeys::new();
//!
//! match mapping.get_or_record("user.greeting", &mut pending) {
//!     Some(entry) if entry.is_pattern => { /* hand entry.value to a formatter */ }
//!     Some(entry) => println!("{}", entry.value),
//!     None => { /* fall back to the key; it is now pending */ }
//! }
//!
//! // End of the unit of work: persist what was missing.
//! store.flush(&mut pending)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # File format
//!
//! - UTF-8 text, one `key;value` record per non-blank line, standard
//!   double-quote CSV quoting on either field.
//! - Protected characters (default: newline, tab, plus the structural `\`,
//!   `;`, `"`) appear inside fields as two-character `\x` tokens; the
//!   literal sequence `\n` in a value additionally denotes an embedded
//!   newline.
//! - Auto-generated placeholder lines look like `key;+key`, with
//!   [`NOT_TRANSLATED_MARK`] prefixing the value.
//!
//! # Concurrency
//!
//! Flushes replace the whole file through a temp-file-and-rename write, so
//! readers never observe a torn file. Two racing flushes resolve by
//! last-rename-wins; a lost pending key is re-recorded by the next unit of
//! work that misses it.

pub mod error;
pub mod escape;
pub mod pattern;
pub mod sink;
pub mod store;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    escape::EscapeTable,
    pattern::{IcuDetector, PatternDetector},
    sink::{AtomicSink, FsSink},
    store::{CsvStore, CsvStoreBuilder, NOT_TRANSLATED_MARK},
    traits::TranslationStore,
    types::{Entry, PendingKeys, Store},
};
