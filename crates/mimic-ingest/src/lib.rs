//! Cohort data ingestion: CSV loading into the column model.

pub mod csv_table;

pub use csv_table::{CsvTable, load_csv, parse_f64};
