//! Data module - table loading and schema validation

mod loader;
pub mod schema;

pub use loader::{DataLoader, DataSource, LoaderError};
pub use schema::ColumnKind;
