pub mod db;
pub mod error;
pub mod geometry;
pub mod info;
pub mod sql_dictionary;
pub mod utils;

pub use error::{Error, Result};
