//! Database-facing services.
//!
//! - `datasource` - Connection parameters and on-demand connections
//! - `schema` - Table name listing for one schema
//! - `dump` - Full-table content dumping

pub mod datasource;
pub mod dump;
pub mod schema;

pub use datasource::{DataSource, DbConnection};
pub use dump::DumpService;
pub use schema::SchemaService;
