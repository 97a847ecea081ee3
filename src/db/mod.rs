pub mod cache;
pub mod catalog;
pub mod connection;
pub mod connector;
pub mod data_model;
pub mod ddl;
pub mod layer;
pub mod models;
pub mod quoting;

pub use connection::*;
pub use connector::OracleConnector;
pub use quoting::TableRef;
