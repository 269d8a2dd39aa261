use crate::movie;
use crate::{Error, Result, Session};

use bytes::Bytes;
use serde::Deserialize;

use std::collections::BTreeMap;
use std::fmt;

/// Where to download the poster of each movie from.
///
/// Read from a JSON object mapping movie numbers to image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest(BTreeMap<movie::Id, String>);

impl Manifest {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn url(&self, movie: movie::Id) -> Option<&str> {
        self.0.get(&movie).map(String::as_str)
    }
}

impl FromIterator<(movie::Id, String)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (movie::Id, String)>>(iter: I) -> Self {
        Self(BTreeMap::from_iter(iter))
    }
}

#[derive(Clone)]
pub struct Poster {
    pub bytes: Bytes,
}

impl Poster {
    pub async fn download(movie: movie::Id, manifest: &Manifest, session: &Session) -> Result<Self> {
        let Some(url) = manifest.url(movie) else {
            return Err(Error::PosterNotListed(movie));
        };

        log::info!("Downloading poster {movie}: {url}");
        let response = session.get(url).await?;

        Ok(Self {
            bytes: response.bytes().await?,
        })
    }
}

impl fmt::Debug for Poster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poster")
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
