use crate::storage::{Entries, Error, Storage};

use std::cell::RefCell;
use std::collections::BTreeMap;

/// A store living only as long as the process.
#[derive(Debug, Default)]
pub struct Memory {
    entries: RefCell<Entries>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store refusing writes that would grow it past `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RefCell::new(Entries::new(BTreeMap::new(), Some(quota))),
        }
    }
}

impl Storage for Memory {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.borrow().get(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.borrow_mut().set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let _ = self.entries.borrow_mut().remove(key);

        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl<K, V> FromIterator<(K, V)> for Memory
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: RefCell::new(Entries::new(
                iter.into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_removes() {
        let memory = Memory::new();

        memory.set("mcu.1", "true").unwrap();
        assert_eq!(memory.get("mcu.1").unwrap().as_deref(), Some("true"));
        assert_eq!(memory.len(), 1);

        memory.remove("mcu.1").unwrap();
        memory.remove("mcu.1").unwrap();
        assert_eq!(memory.get("mcu.1").unwrap(), None);
        assert!(memory.is_empty());
    }

    #[test]
    fn full_store_rejects_writes() {
        let memory = Memory::with_quota(4);

        assert!(matches!(
            memory.set("mcu.1", "true"),
            Err(Error::QuotaExceeded)
        ));
        assert!(memory.is_empty());
    }
}
