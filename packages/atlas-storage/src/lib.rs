pub mod db;
pub mod models;
pub mod patterns;
pub mod schema;
pub mod similarity;
pub mod tags;
pub mod taxonomy;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
