use crate::movie;

use serde::{Deserialize, Serialize};

/// A named watch sequence, listing movies by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub name: String,
    pub movies: Vec<movie::Id>,
}

impl Ordering {
    pub fn new(name: impl Into<String>, movies: impl IntoIterator<Item = movie::Id>) -> Self {
        Self {
            name: name.into(),
            movies: movies.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// The orderings of a series, kept in the order they were declared.
///
/// Names are unique: a later ordering with a name already present replaces
/// the earlier one in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Ordering>", into = "Vec<Ordering>")]
pub struct Map(Vec<Ordering>);

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ordering: Ordering) {
        if let Some(existing) = self
            .0
            .iter_mut()
            .find(|candidate| candidate.name == ordering.name)
        {
            *existing = ordering;
        } else {
            self.0.push(ordering);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Ordering> {
        self.0.iter().find(|ordering| ordering.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|ordering| ordering.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ordering> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Ordering> for Map {
    fn from_iter<I: IntoIterator<Item = Ordering>>(iter: I) -> Self {
        let mut map = Self::new();

        for ordering in iter {
            map.insert(ordering);
        }

        map
    }
}

impl From<Vec<Ordering>> for Map {
    fn from(orderings: Vec<Ordering>) -> Self {
        Self::from_iter(orderings)
    }
}

impl From<Map> for Vec<Ordering> {
    fn from(map: Map) -> Self {
        map.0
    }
}
