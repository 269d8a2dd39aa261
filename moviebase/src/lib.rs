pub mod error;
pub mod poster;
pub mod repository;
pub mod series;
pub mod session;
pub mod storage;
pub mod watch;

pub use moviebase_core::{Catalog, Movie, Ordering, movie, ordering};

pub use error::Error;
pub use poster::Poster;
pub use repository::Repository;
pub use series::Series;
pub use session::Session;
pub use storage::Storage;

pub type Result<T, E = Error> = std::result::Result<T, E>;
