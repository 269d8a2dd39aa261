use crate::Movie;
use crate::movie;

use std::collections::BTreeMap;

/// The watched status of movies, by ID.
pub type Map = BTreeMap<movie::Id, bool>;

/// Where the watched status of a movie lives in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub key: String,
    pub id: movie::Id,
}

/// A movie paired with its watched status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub movie: &'a Movie,
    pub watched: bool,
}

/// How far along a series is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub watched: usize,
    pub total: usize,
}

impl Progress {
    pub fn is_complete(self) -> bool {
        self.watched == self.total
    }

    pub fn percentage(self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }

        self.watched as f32 / self.total as f32 * 100.0
    }
}
