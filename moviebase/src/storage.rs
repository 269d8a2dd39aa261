//! Key-value storage backends.
pub mod file;
pub mod memory;

pub use file::File;
pub use memory::Memory;

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("i/o operation failed: {0}")]
    Io(Arc<io::Error>),
    #[error("storage is corrupt: {0}")]
    Corrupt(String),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Self::Io(Arc::new(error))
    }
}

/// The entries of a store, with an optional byte quota.
///
/// The size of a store is the total length of its keys and values.
#[derive(Debug, Clone, Default)]
pub(crate) struct Entries {
    map: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl Entries {
    pub fn new(map: BTreeMap<String, String>, quota: Option<usize>) -> Self {
        Self { map, quota }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if let Some(quota) = self.quota {
            let current = self.size()
                - self
                    .map
                    .get(key)
                    .map(|old| key.len() + old.len())
                    .unwrap_or_default();

            if current + key.len() + value.len() > quota {
                return Err(Error::QuotaExceeded);
            }
        }

        let _ = self.map.insert(key.to_owned(), value.to_owned());

        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.map.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn size(&self) -> usize {
        self.map
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.map
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        (**self).remove(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_counts_keys_and_values() {
        let mut entries = Entries::new(BTreeMap::new(), Some(10));

        assert!(entries.set("a", "1234").is_ok());
        assert!(entries.set("b", "1234").is_ok());
        assert!(matches!(entries.set("c", ""), Err(Error::QuotaExceeded)));
        assert_eq!(entries.size(), 10);
    }

    #[test]
    fn quota_allows_overwriting_in_place() {
        let mut entries = Entries::new(BTreeMap::new(), Some(10));

        assert!(entries.set("a", "123456789").is_ok());
        assert!(entries.set("a", "987654321").is_ok());
        assert!(matches!(
            entries.set("a", "0123456789"),
            Err(Error::QuotaExceeded)
        ));
        assert_eq!(entries.get("a").as_deref(), Some("987654321"));
    }
}
