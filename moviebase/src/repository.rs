//! Persistence of watched status and ordering preferences.
use crate::movie;
use crate::storage::{self, Storage};
use crate::watch::{self, Identifier};
use crate::{Error, Result};

const TEST_KEY: &str = "__storage_test__";

#[derive(Debug)]
pub struct Repository<S> {
    storage: S,
}

impl<S: Storage> Repository<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Only a stored `"true"` counts as watched.
    pub fn fetch_watch_data(&self, identifiers: &[Identifier]) -> Result<watch::Map> {
        self.ensure_available()?;

        let mut watched = watch::Map::new();

        for identifier in identifiers {
            let value = self.storage.get(&identifier.key)?;

            let _ = watched.insert(identifier.id, value.as_deref() == Some("true"));
        }

        Ok(watched)
    }

    pub fn fetch_current_ordering(&self, series: &str) -> Result<Option<String>> {
        self.ensure_available()?;

        Ok(self.storage.get(&ordering_key(series))?)
    }

    pub fn save_watched_status(&self, series: &str, movie: movie::Id, watched: bool) -> Result<()> {
        self.ensure_available()?;

        self.storage
            .set(&watch_key(series, movie), if watched { "true" } else { "false" })?;

        Ok(())
    }

    pub fn save_current_ordering(&self, series: &str, ordering: &str) -> Result<()> {
        self.ensure_available()?;

        self.storage.set(&ordering_key(series), ordering)?;

        Ok(())
    }

    /// A full store counts as available while it holds entries.
    pub fn is_available(&self) -> bool {
        let round_trip = self
            .storage
            .set(TEST_KEY, TEST_KEY)
            .and_then(|()| self.storage.remove(TEST_KEY));

        match round_trip {
            Ok(()) => true,
            Err(storage::Error::QuotaExceeded) => !self.storage.is_empty(),
            Err(error) => {
                log::warn!("Storage availability check failed: {error}");

                false
            }
        }
    }

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::StorageUnavailable)
        }
    }
}

pub fn watch_key(series: &str, movie: movie::Id) -> String {
    format!("{series}.{movie}")
}

pub fn ordering_key(series: &str) -> String {
    format!("{series}.ordering")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Memory;

    use std::cell::{Cell, RefCell};

    /// A store whose writes always fail, recording every key it is asked
    /// about.
    #[derive(Default)]
    struct Broken {
        touched: RefCell<Vec<String>>,
        entries: Cell<usize>,
    }

    impl Storage for Broken {
        fn get(&self, key: &str) -> Result<Option<String>, storage::Error> {
            self.touched.borrow_mut().push(key.to_owned());

            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), storage::Error> {
            self.touched.borrow_mut().push(key.to_owned());

            Err(storage::Error::Corrupt("read-only".to_owned()))
        }

        fn remove(&self, key: &str) -> Result<(), storage::Error> {
            self.touched.borrow_mut().push(key.to_owned());

            Ok(())
        }

        fn len(&self) -> usize {
            self.entries.get()
        }
    }

    fn identifiers(series: &str, ids: &[u32]) -> Vec<Identifier> {
        ids.iter()
            .map(|&id| Identifier {
                key: watch_key(series, movie::Id(id)),
                id: movie::Id(id),
            })
            .collect()
    }

    #[test]
    fn keys_are_scoped_by_series() {
        assert_eq!(watch_key("mcu", movie::Id(7)), "mcu.7");
        assert_eq!(ordering_key("mcu"), "mcu.ordering");
    }

    #[test]
    fn only_literal_true_counts_as_watched() {
        let storage = Memory::from_iter([
            ("mcu.1", "true"),
            ("mcu.2", "false"),
            ("mcu.3", "TRUE"),
            ("mcu.4", "yes"),
            ("mcu.5", ""),
        ]);
        let repository = Repository::new(storage);

        let watched = repository
            .fetch_watch_data(&identifiers("mcu", &[1, 2, 3, 4, 5, 6]))
            .unwrap();

        assert_eq!(watched.len(), 6);
        assert_eq!(watched[&movie::Id(1)], true);

        for id in 2..=6 {
            assert_eq!(watched[&movie::Id(id)], false, "movie {id}");
        }
    }

    #[test]
    fn saves_watched_status_as_text() {
        let repository = Repository::new(Memory::new());

        repository.save_watched_status("mcu", movie::Id(3), true).unwrap();
        repository.save_watched_status("mcu", movie::Id(4), false).unwrap();

        let storage = repository.storage();
        assert_eq!(storage.get("mcu.3").unwrap().as_deref(), Some("true"));
        assert_eq!(storage.get("mcu.4").unwrap().as_deref(), Some("false"));
        assert_eq!(storage.get(TEST_KEY).unwrap(), None);
    }

    #[test]
    fn ordering_round_trips() {
        let repository = Repository::new(Memory::new());

        assert_eq!(repository.fetch_current_ordering("mcu").unwrap(), None);

        repository
            .save_current_ordering("mcu", "chronological")
            .unwrap();

        assert_eq!(
            repository.fetch_current_ordering("mcu").unwrap().as_deref(),
            Some("chronological")
        );
        assert_eq!(repository.fetch_current_ordering("dceu").unwrap(), None);
    }

    #[test]
    fn borrowed_storage_is_shared_between_repositories() {
        let memory = Memory::new();
        let writer = Repository::new(&memory);
        let reader = Repository::new(&memory);

        writer.save_watched_status("mcu", movie::Id(1), true).unwrap();
        writer.save_current_ordering("mcu", "chronological").unwrap();

        assert_eq!(
            reader.fetch_watch_data(&identifiers("mcu", &[1])).unwrap()[&movie::Id(1)],
            true
        );
        assert_eq!(
            reader.fetch_current_ordering("mcu").unwrap().as_deref(),
            Some("chronological")
        );
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn unavailable_storage_fails_before_touching_data() {
        let repository = Repository::new(Broken::default());

        assert!(matches!(
            repository.fetch_watch_data(&identifiers("mcu", &[1, 2])),
            Err(Error::StorageUnavailable)
        ));
        assert!(matches!(
            repository.fetch_current_ordering("mcu"),
            Err(Error::StorageUnavailable)
        ));
        assert!(matches!(
            repository.save_watched_status("mcu", movie::Id(1), true),
            Err(Error::StorageUnavailable)
        ));
        assert!(matches!(
            repository.save_current_ordering("mcu", "release"),
            Err(Error::StorageUnavailable)
        ));

        let touched = repository.storage().touched.borrow();
        assert_eq!(touched.len(), 4);
        assert!(touched.iter().all(|key| key == TEST_KEY));
    }

    #[test]
    fn non_quota_failures_are_unavailable_even_with_entries() {
        let broken = Broken::default();
        broken.entries.set(3);

        assert!(!Repository::new(broken).is_available());
    }

    #[test]
    fn full_store_with_entries_is_available() {
        let storage = Memory::with_quota(9);
        storage.set("mcu.1", "true").unwrap();

        let repository = Repository::new(storage);

        assert!(repository.is_available());
        assert_eq!(
            repository
                .fetch_watch_data(&identifiers("mcu", &[1]))
                .unwrap()[&movie::Id(1)],
            true
        );
        assert!(matches!(
            repository.save_watched_status("mcu", movie::Id(2), true),
            Err(Error::Storage(storage::Error::QuotaExceeded))
        ));
    }

    #[test]
    fn full_empty_store_is_unavailable() {
        let repository = Repository::new(Memory::with_quota(0));

        assert!(!repository.is_available());
        assert!(matches!(
            repository.fetch_current_ordering("mcu"),
            Err(Error::StorageUnavailable)
        ));
    }
}
