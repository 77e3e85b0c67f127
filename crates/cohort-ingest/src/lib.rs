//! Survey data ingestion.
//!
//! Reads the raw tab-separated survey extracts into polars DataFrames with
//! sentinel codes normalized to null, and owns the output directory contract.

mod error;
mod extract;
mod polars_utils;
mod setup;
mod tab_table;

pub use error::{IngestError, Result};
pub use extract::{LoadOptions, ValueRecode, load_extract};
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, parse_f64};
pub use setup::{ProjectDirs, setup_directories};
pub use tab_table::{TabTable, read_tab_table};
