// Feed access: raw CSV parsing and series normalization.
pub mod csv_parser;
pub mod loader;
