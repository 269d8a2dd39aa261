use crate::storage::{Entries, Error, Storage};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A store persisted to a RON file.
///
/// The whole file is read once when opened and rewritten after every
/// mutation.
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    entries: RefCell<Entries>,
}

impl File {
    /// Opens the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::open_with(path, None)
    }

    /// Opens the store at `path`, refusing writes past `quota` bytes.
    pub fn with_quota(path: impl AsRef<Path>, quota: usize) -> Result<Self, Error> {
        Self::open_with(path, Some(quota))
    }

    /// The default location of the store, inside the user data directory.
    pub fn default_path() -> PathBuf {
        data_dir().join("storage.ron")
    }

    fn open_with(path: impl AsRef<Path>, quota: Option<usize>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        let map: BTreeMap<String, String> = match fs::read_to_string(&path) {
            Ok(contents) => {
                ron::from_str(&contents).map_err(|error| Error::Corrupt(error.to_string()))?
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(error.into()),
        };

        log::debug!("Opened storage at {} ({} entries)", path.display(), map.len());

        Ok(Self {
            path,
            entries: RefCell::new(Entries::new(map, quota)),
        })
    }

    fn save(&self, entries: &Entries) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents =
            ron::ser::to_string_pretty(entries.as_map(), ron::ser::PrettyConfig::default())
                .map_err(|error| Error::Corrupt(error.to_string()))?;

        fs::write(&self.path, contents)?;

        Ok(())
    }
}

impl Storage for File {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.borrow().get(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        let mut entries = self.entries.borrow().clone();
        entries.set(key, value)?;

        self.save(&entries)?;
        *self.entries.borrow_mut() = entries;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.borrow().clone();

        if !entries.remove(key) {
            return Ok(());
        }

        self.save(&entries)?;
        *self.entries.borrow_mut() = entries;

        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_default().join("marathon")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.ron");

        {
            let file = File::open(&path).unwrap();
            assert!(file.is_empty());

            file.set("mcu.1", "true").unwrap();
            file.set("mcu.ordering", "chronological").unwrap();
            file.remove("mcu.1").unwrap();
            file.set("mcu.2", "true").unwrap();
        }

        let file = File::open(&path).unwrap();

        assert_eq!(file.len(), 2);
        assert_eq!(file.get("mcu.1").unwrap(), None);
        assert_eq!(file.get("mcu.2").unwrap().as_deref(), Some("true"));
        assert_eq!(
            file.get("mcu.ordering").unwrap().as_deref(),
            Some("chronological")
        );
    }

    #[test]
    fn rejected_write_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.ron");

        let file = File::with_quota(&path, 12).unwrap();
        file.set("mcu.1", "true").unwrap();

        assert!(matches!(
            file.set("mcu.2", "true"),
            Err(Error::QuotaExceeded)
        ));

        let reopened = File::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.ron");
        fs::write(&path, "{ not ron").unwrap();

        assert!(matches!(File::open(&path), Err(Error::Corrupt(_))));
    }
}
