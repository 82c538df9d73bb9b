//! Privacy scrub of the downloaded leave report.
//!
//! The first worksheet is loaded into an absolute grid (row 0 = sheet row 1,
//! column 0 = column A), the configured column runs are deleted one after
//! another, and the remainder is written to the processed directory wrapped
//! in a named Excel table.

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::{Format, Table, TableColumn, Workbook, Worksheet};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{ColumnRange, LeaveConfig};
use crate::constants::leave::DATE_CELL_FORMAT;
use crate::types::{FlowError, Result};

/// What `scrub_report` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrubOutcome {
    /// Scrubbed copy written
    Written(PathBuf),
    /// A processed copy already existed; nothing written
    AlreadyProcessed(PathBuf),
}

impl ScrubOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Written(p) | Self::AlreadyProcessed(p) => p,
        }
    }
}

/// Scrub `source` into `<processed_dir>/<file name>`
pub fn scrub_report(source: &Path, config: &LeaveConfig) -> Result<ScrubOutcome> {
    let file_name = source
        .file_name()
        .ok_or_else(|| FlowError::Config(format!("{} is not a file", source.display())))?;
    let target = config.processed_dir.join(file_name);

    if target.exists() {
        info!("{} already processed, skipping", target.display());
        return Ok(ScrubOutcome::AlreadyProcessed(target));
    }

    let (sheet_name, mut grid) = read_grid(source)?;
    delete_columns(&mut grid, &config.deleted_columns);
    debug!(
        "Scrubbed grid: {} rows x {} columns",
        grid.len(),
        grid.first().map_or(0, Vec::len)
    );

    std::fs::create_dir_all(&config.processed_dir)?;
    write_grid(&target, &sheet_name, &grid, &config.table_name)?;

    info!("Wrote scrubbed report {}", target.display());
    Ok(ScrubOutcome::Written(target))
}

/// Delete 1-based column runs in order; each run sees the columns left by
/// the previous ones
pub fn delete_columns(grid: &mut [Vec<Data>], ranges: &[ColumnRange]) {
    for range in ranges {
        let start = range.start.saturating_sub(1);
        for row in grid.iter_mut() {
            if start < row.len() {
                let end = (start + range.count).min(row.len());
                row.drain(start..end);
            }
        }
    }
}

fn read_grid(path: &Path) -> Result<(String, Vec<Vec<Data>>)> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| FlowError::EmptyWorkbook(path.display().to_string()))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let width = first_col as usize + range.width();

    let mut grid: Vec<Vec<Data>> = (0..first_row).map(|_| vec![Data::Empty; width]).collect();
    for row in range.rows() {
        let mut cells = vec![Data::Empty; first_col as usize];
        cells.extend_from_slice(row);
        grid.push(cells);
    }
    Ok((sheet_name, grid))
}

fn write_grid(path: &Path, sheet_name: &str, grid: &[Vec<Data>], table_name: &str) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name(sheet_name)?;
    let date_format = Format::new().set_num_format(DATE_CELL_FORMAT);

    for (r, row) in grid.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            write_cell(sheet, r as u32, c as u16, cell, &date_format)?;
        }
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    if width > 0 {
        let header = grid.first().map(Vec::as_slice).unwrap_or_default();
        let columns: Vec<TableColumn> = table_headers(header, width)
            .into_iter()
            .map(|h| TableColumn::new().set_header(h))
            .collect();
        // A table needs one data row below its header
        let last_row = grid.len().max(2) - 1;
        let table = Table::new().set_name(table_name).set_columns(&columns);
        sheet.add_table(0, 0, last_row as u32, (width - 1) as u16, &table)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Data, date: &Format) -> Result<()> {
    match cell {
        Data::Empty => {}
        Data::String(s) => {
            sheet.write_string(row, col, s)?;
        }
        Data::Int(i) => {
            sheet.write_number(row, col, *i as f64)?;
        }
        Data::Float(f) => {
            sheet.write_number(row, col, *f)?;
        }
        Data::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Data::DateTime(dt) => {
            sheet.write_number_with_format(row, col, dt.as_f64(), date)?;
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => {
            sheet.write_string(row, col, s)?;
        }
        Data::Error(e) => {
            sheet.write_string(row, col, e.to_string())?;
        }
    }
    Ok(())
}

/// Excel table headers must be non-blank and unique
fn table_headers(header: &[Data], width: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    (0..width)
        .map(|i| {
            let base = match header.get(i) {
                Some(Data::Empty) | None => format!("Column{}", i + 1),
                Some(cell) => cell.to_string().trim().to_string(),
            };
            let base = if base.is_empty() {
                format!("Column{}", i + 1)
            } else {
                base
            };

            let mut name = base.clone();
            let mut n = 2;
            while !seen.insert(name.to_lowercase()) {
                name = format!("{}{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}
