//! Fills a directory with the posters of a series.
//!
//! Posters are stored as `{id}.jpg`. When a poster cannot be downloaded, a
//! placeholder takes its place and an empty `{id}.jpg.retry` marker is left
//! next to it, so the next run downloads it again.
use crate::moviebase::poster::{Manifest, Poster};
use crate::moviebase::{Movie, Session, movie};

use futures_util::future;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct Fetch {
    pub directory: PathBuf,
    pub placeholder: PathBuf,
    pub offline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Skipped,
    Downloaded,
    Fallback,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub skipped: usize,
    pub downloaded: usize,
    pub fallback: usize,
}

impl Fetch {
    pub async fn run(
        &self,
        movies: &[Movie],
        manifest: &Manifest,
        session: &Session,
    ) -> Result<Report, anywho::Error> {
        if !fs::try_exists(&self.directory).await? {
            log::info!("Poster directory doesn't exist, creating it...");
            fs::create_dir_all(&self.directory).await?;
            log::info!("Poster directory {} created", self.directory.display());
        }

        let outcomes = future::join_all(
            movies
                .iter()
                .map(|movie| self.fetch(movie.id, manifest, session)),
        )
        .await;

        Ok(outcomes.into_iter().collect())
    }

    async fn fetch(&self, movie: movie::Id, manifest: &Manifest, session: &Session) -> Outcome {
        let destination = self.directory.join(format!("{movie}.jpg"));
        let marker = retry_path(&destination);

        let retry = fs::try_exists(&marker).await.unwrap_or_default();

        if !retry && fs::try_exists(&destination).await.unwrap_or_default() {
            log::info!("Poster {movie} exists, skipping...");
            return Outcome::Skipped;
        }

        if self.offline {
            self.fall_back(&destination, &marker).await;
            return Outcome::Fallback;
        }

        let poster = match Poster::download(movie, manifest, session).await {
            Ok(poster) => poster,
            Err(error) => {
                log::error!("Error downloading poster {movie}: {error}. Using fallback image.");

                self.fall_back(&destination, &marker).await;
                return Outcome::Fallback;
            }
        };

        if let Err(error) = fs::write(&destination, &poster.bytes).await {
            log::error!("Error writing poster to {}: {error}", destination.display());

            self.fall_back(&destination, &marker).await;
            return Outcome::Fallback;
        }

        log::info!("Downloaded poster to {}", destination.display());

        if retry {
            log::info!("Deleting retry file for poster {movie}");
            if let Err(error) = fs::remove_file(&marker).await {
                log::error!("Error deleting retry file {}: {error}", marker.display());
            }
        }

        Outcome::Downloaded
    }

    async fn fall_back(&self, destination: &Path, marker: &Path) {
        match fs::copy(&self.placeholder, destination).await {
            Ok(_) => log::info!("Placeholder poster copied to {}", destination.display()),
            Err(error) => log::error!(
                "Error copying placeholder poster to {}: {error}",
                destination.display()
            ),
        }

        if let Err(error) = fs::write(marker, "").await {
            log::error!("Error adding retry file {}: {error}", marker.display());
        }
    }
}

impl FromIterator<Outcome> for Report {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut report = Self::default();

        for outcome in iter {
            match outcome {
                Outcome::Skipped => report.skipped += 1,
                Outcome::Downloaded => report.downloaded += 1,
                Outcome::Fallback => report.fallback += 1,
            }
        }

        report
    }
}

fn retry_path(path: &Path) -> PathBuf {
    let mut path = path.as_os_str().to_owned();
    path.push(".retry");

    PathBuf::from(path)
}
