//! The storage-backend capability trait.

use crate::{
    error::Error,
    types::{PendingKeys, Store},
};

/// A translation store backend: loads a key → entry mapping at the start of
/// a unit of work and flushes untranslated keys at its end.
///
/// Alternative storage formats implement this same surface; see
/// [`CsvStore`](crate::CsvStore) for the flat-file CSV backend.
///
/// # Example
///
/// ```rust,no_run
/// use langstore::{CsvStore, PendingKeys, TranslationStore};
///
/// let store = CsvStore::builder("var/translations/en.csv", "en".parse()?)
///     .write_back(true)
///     .build();
/// let mapping = store.load()?;
/// let mut pending = PendingKeys::new();
/// mapping.get_or_record("greeting", &mut pending);
/// store.flush(&mut pending)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TranslationStore {
    /// Loads the full store. A missing backing file yields an empty store,
    /// not an error.
    fn load(&self) -> Result<Store, Error>;

    /// Durably appends `pending` as untranslated placeholder entries.
    ///
    /// Called at most once per unit of work. Clears `pending` only after the
    /// write completed, so a failed flush can be retried by the caller.
    fn flush(&self, pending: &mut PendingKeys) -> Result<(), Error>;
}
