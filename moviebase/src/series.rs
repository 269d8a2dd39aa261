use crate::movie;
use crate::ordering;
use crate::repository::{self, Repository};
use crate::storage::Storage;
use crate::watch::{self, Entry, Identifier, Progress};
use crate::{Catalog, Movie, Result};

use std::fmt;
use std::rc::Rc;

/// A movie series, its watch orderings, and the repository holding its
/// watched status.
pub struct Series<S> {
    name: String,
    movies: movie::Map,
    orderings: ordering::Map,
    repository: Rc<Repository<S>>,
}

impl<S: Storage> Series<S> {
    pub fn new(
        name: impl Into<String>,
        movies: impl IntoIterator<Item = Movie>,
        orderings: ordering::Map,
        repository: Rc<Repository<S>>,
    ) -> Self {
        let movies: Vec<_> = movies.into_iter().collect();

        Self {
            name: name.into(),
            movies: movie::Map::new(movies, |movie| movie.id),
            orderings,
            repository,
        }
    }

    pub fn from_catalog(catalog: Catalog, repository: Rc<Repository<S>>) -> Self {
        Self::new(
            catalog.name,
            catalog.movies,
            catalog.orderings,
            repository,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn movie(&self, id: movie::Id) -> Option<&Movie> {
        self.movies.get(&id)
    }

    pub fn verify_ordering(&self, name: &str) -> bool {
        self.orderings.contains(name)
    }

    /// Unknown orderings list nothing. IDs outside the series are skipped.
    pub fn movies_by_order(&self, name: &str) -> Vec<&Movie> {
        let Some(ordering) = self.orderings.get(name) else {
            return Vec::new();
        };

        ordering
            .movies
            .iter()
            .filter_map(|id| {
                let movie = self.movies.get(id);

                if movie.is_none() {
                    log::warn!(
                        "Ordering {name} of {series} lists unknown movie {id}",
                        series = self.name
                    );
                }

                movie
            })
            .collect()
    }

    pub fn ordering_options(&self) -> Vec<&str> {
        self.orderings.names().collect()
    }

    pub fn current_ordering_name(&self) -> Result<String> {
        Ok(self
            .repository
            .fetch_current_ordering(&self.name)?
            .unwrap_or_default())
    }

    /// Falls back to `default` when nothing valid is stored.
    pub fn current_ordering_or(&self, default: &str) -> Result<String> {
        let current = self.current_ordering_name()?;

        if self.verify_ordering(&current) {
            Ok(current)
        } else {
            Ok(default.to_owned())
        }
    }

    pub fn watched_data(&self) -> Result<watch::Map> {
        self.repository.fetch_watch_data(&self.identifiers())
    }

    pub fn entries(&self, ordering: &str, watched: &watch::Map) -> Vec<Entry<'_>> {
        self.movies_by_order(ordering)
            .into_iter()
            .map(|movie| Entry {
                movie,
                watched: watched.get(&movie.id).copied().unwrap_or_default(),
            })
            .collect()
    }

    pub fn progress(&self, watched: &watch::Map) -> Progress {
        Progress {
            watched: self
                .movies
                .values()
                .iter()
                .filter(|movie| watched.get(&movie.id).copied().unwrap_or_default())
                .count(),
            total: self.len(),
        }
    }

    pub fn save_watched_status(&self, movie: movie::Id, watched: bool) -> Result<()> {
        self.repository
            .save_watched_status(&self.name, movie, watched)
    }

    pub fn save_current_ordering(&self, name: &str) -> Result<()> {
        self.repository.save_current_ordering(&self.name, name)
    }

    fn identifiers(&self) -> Vec<Identifier> {
        self.movies
            .values()
            .iter()
            .map(|movie| Identifier {
                key: repository::watch_key(&self.name, movie.id),
                id: movie.id,
            })
            .collect()
    }
}

impl<S> fmt::Debug for Series<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("name", &self.name)
            .field("movies", &self.movies.len())
            .field("orderings", &self.orderings.len())
            .finish()
    }
}
