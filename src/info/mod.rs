//! HTML reports for the info panel.

pub mod database;
pub mod html;
pub mod table;
pub mod vector;

pub use database::{database_info, DatabaseSnapshot};
pub use html::{render, HtmlElem};
pub use table::{table_info, TableSnapshot};
pub use vector::{spatial_info, VectorSnapshot};
