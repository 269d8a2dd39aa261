use moviebase;

mod poster;

use crate::moviebase::poster::Manifest;
use crate::moviebase::storage::{self, Storage};
use crate::moviebase::watch::{Entry, Progress};
use crate::moviebase::{Catalog, Error, Repository, Series, Session, movie};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::rc::Rc;
use tokio::fs;

/// Keep track of a movie marathon.
#[derive(Parser, Debug)]
#[command(name = "marathon", about = "Track your way through a movie series")]
struct Cli {
    /// Series to work on.
    #[arg(long, global = true, env = "MARATHON_SERIES", default_value = "mcu")]
    series: String,

    /// Storage file (default: <data dir>/marathon/storage.ron).
    #[arg(long, global = true, env = "MARATHON_STORAGE")]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Track(Track),
    /// Download the posters of the series.
    Posters(Posters),
}

#[derive(Subcommand, Debug)]
enum Track {
    /// List the movies of the series.
    List {
        /// Ordering to list by (default: the saved one).
        #[arg(long)]
        order: Option<String>,
    },
    /// List the available orderings.
    Orders,
    /// Mark movies as watched.
    Watch {
        #[arg(required = true)]
        movies: Vec<movie::Id>,
    },
    /// Mark movies as not watched.
    Unwatch {
        #[arg(required = true)]
        movies: Vec<movie::Id>,
    },
    /// Save the preferred ordering.
    Order { name: String },
}

#[derive(Args, Debug)]
struct Posters {
    /// Directory to store posters in (default: <cache dir>/marathon/posters).
    #[arg(long, env = "MARATHON_POSTERS")]
    directory: Option<PathBuf>,

    /// JSON file mapping movie numbers to poster URLs.
    #[arg(long, env = "MARATHON_MANIFEST", default_value = "build/movie_posters.json")]
    manifest: PathBuf,

    /// Image used when a poster cannot be downloaded.
    #[arg(long, env = "MARATHON_PLACEHOLDER", default_value = "build/placeholder.jpg")]
    placeholder: PathBuf,

    /// Use the placeholder for every missing poster without downloading.
    #[arg(long, env = "MARATHON_OFFLINE")]
    offline: bool,

    /// Immediate retries of a failed download.
    #[arg(long, default_value_t = 2)]
    retries: usize,
}

#[tokio::main]
async fn main() -> Result<(), anywho::Error> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let catalog =
        Catalog::load(&cli.series)?.ok_or_else(|| Error::SeriesNotFound(cli.series.clone()))?;

    match cli.command {
        Command::Track(command) => {
            let storage =
                storage::File::open(cli.storage.unwrap_or_else(storage::File::default_path))?;

            track(command, catalog, storage)?;
        }
        Command::Posters(posters) => fetch_posters(catalog, posters).await?,
    }

    Ok(())
}

fn track<S: Storage>(command: Track, catalog: Catalog, storage: S) -> moviebase::Result<()> {
    let title = catalog.title.clone();
    let default_ordering = catalog.default_ordering.clone();
    let series = Series::from_catalog(catalog, Rc::new(Repository::new(storage)));

    match command {
        Track::List { order } => {
            let order = match order {
                Some(order) if series.verify_ordering(&order) => order,
                Some(order) => return Err(Error::OrderingNotFound(order)),
                None => series.current_ordering_or(&default_ordering)?,
            };

            let (entries, progress) = listing(&series, &order)?;

            println!("{title} ({order})");

            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "{:>3}. [{}] {} (#{})",
                    i + 1,
                    if entry.watched { "x" } else { " " },
                    entry.movie.title,
                    entry.movie.id
                );
            }

            println!(
                "{}/{} watched ({:.0}%)",
                progress.watched,
                progress.total,
                progress.percentage()
            );
        }
        Track::Orders => {
            let current = series.current_ordering_or(&default_ordering)?;

            for name in series.ordering_options() {
                println!("{} {name}", if name == current { "*" } else { " " });
            }
        }
        Track::Watch { movies } => mark(&series, &movies, true)?,
        Track::Unwatch { movies } => mark(&series, &movies, false)?,
        Track::Order { name } => {
            if !series.verify_ordering(&name) {
                return Err(Error::OrderingNotFound(name));
            }

            series.save_current_ordering(&name)?;

            println!("Watching {title} in {name} order");
        }
    }

    Ok(())
}

fn listing<'a, S: Storage>(
    series: &'a Series<S>,
    order: &str,
) -> moviebase::Result<(Vec<Entry<'a>>, Progress)> {
    let watched = series.watched_data()?;

    Ok((series.entries(order, &watched), series.progress(&watched)))
}

async fn fetch_posters(catalog: Catalog, posters: Posters) -> Result<(), anywho::Error> {
    let manifest = if posters.offline {
        Manifest::default()
    } else {
        Manifest::parse(&fs::read_to_string(&posters.manifest).await?)?
    };

    let fetch = poster::Fetch {
        directory: posters.directory.unwrap_or_else(posters_dir),
        placeholder: posters.placeholder,
        offline: posters.offline,
    };

    let report = fetch
        .run(
            &catalog.movies,
            &manifest,
            &Session::new().retries(posters.retries),
        )
        .await?;

    println!(
        "{} downloaded, {} skipped, {} placeholder(s)",
        report.downloaded, report.skipped, report.fallback
    );

    Ok(())
}

fn mark<S: Storage>(
    series: &Series<S>,
    movies: &[movie::Id],
    watched: bool,
) -> moviebase::Result<()> {
    for &id in movies {
        let Some(movie) = series.movie(id) else {
            return Err(Error::MovieNotFound(id));
        };

        series.save_watched_status(id, watched)?;

        log::info!(
            "Marked {} as {}",
            movie.title,
            if watched { "watched" } else { "not watched" }
        );
        println!("[{}] {}", if watched { "x" } else { " " }, movie.title);
    }

    Ok(())
}

fn posters_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_default()
        .join(env!("CARGO_PKG_NAME"))
        .join("posters")
}
