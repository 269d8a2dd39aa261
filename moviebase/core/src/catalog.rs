use crate::movie;
use crate::ordering;
use crate::Movie;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The static description of a movie series: its movies and the ways to
/// watch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub name: String,
    pub title: String,
    pub default_ordering: String,
    pub movies: Vec<Movie>,
    pub orderings: ordering::Map,
}

impl Catalog {
    /// Loads every catalog embedded in the binary.
    pub fn load_all() -> Result<Vec<Self>, anywho::Error> {
        let catalogs: Vec<Self> = decompress(include_bytes!("../data/catalogs.ron.gz"))?;

        log::info!("Loaded {} catalog(s)", catalogs.len());

        Ok(catalogs)
    }

    /// Loads the embedded catalog with the given name, if any.
    pub fn load(name: &str) -> Result<Option<Self>, anywho::Error> {
        Ok(Self::load_all()?
            .into_iter()
            .find(|catalog| catalog.name == name))
    }

    pub fn movie(&self, id: movie::Id) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }
}

fn decompress<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, anywho::Error> {
    use flate2::read::GzDecoder;

    let decoder = GzDecoder::new(bytes);

    Ok(ron::de::from_reader(decoder)?)
}
