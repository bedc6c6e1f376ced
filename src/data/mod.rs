//! Data module - spreadsheet loading, re-keying and reshaping

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
pub use table::{NamedSeries, Table, TableError};
