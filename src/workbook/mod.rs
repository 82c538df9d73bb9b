//! Spreadsheet I/O
//!
//! - [`reader`]: newest-file discovery and driving-row reading (`calamine`)
//! - [`writer`]: one workbook per exported page (`rust_xlsxwriter`)

pub mod reader;
pub mod writer;

pub use reader::{DrivingColumns, latest_file, read_driving_rows};
pub use writer::{output_file_name, write_page_workbook, write_table};
