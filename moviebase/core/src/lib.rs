mod map;

pub mod catalog;
pub mod movie;
pub mod ordering;

pub use catalog::Catalog;
pub use map::Map;
pub use movie::Movie;
pub use ordering::Ordering;
