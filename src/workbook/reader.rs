//! Driving spreadsheet discovery and reading.

use calamine::{Data, Reader, open_workbook_auto};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

use crate::types::{DrivingRow, FlowError, Result};

/// Newest file in `dir` matching `pattern`, by modification time
pub fn latest_file(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let full = dir.join(pattern);
    let full = full.to_string_lossy();

    glob::glob(&full)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .max_by_key(|path| {
            std::fs::metadata(path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH)
        })
        .ok_or_else(|| FlowError::NoMatchingFile(full.into_owned()))
}

/// Column names of the driving spreadsheet
#[derive(Debug, Clone, Copy)]
pub struct DrivingColumns<'a> {
    pub id: &'a str,
    pub link: &'a str,
}

/// Read the first worksheet into driving rows.
///
/// Rows whose link does not contain `link_filter` are excluded; their
/// indices are still counted so diagnostics match the sheet.
pub fn read_driving_rows(
    path: &Path,
    columns: DrivingColumns<'_>,
    link_filter: Option<&str>,
) -> Result<Vec<DrivingRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FlowError::EmptyWorkbook(path.display().to_string()))??;

    let mut rows = range.rows();
    let header = rows.next().unwrap_or_default();
    let id_col = column_index(header, columns.id, path)?;
    let link_col = column_index(header, columns.link, path)?;

    let mut driving = Vec::new();
    let mut excluded = 0;
    for (index, row) in rows.enumerate() {
        let link = row.get(link_col).and_then(link_text);
        let keep = match (link_filter, link.as_deref()) {
            (None, _) => true,
            (Some(filter), Some(l)) => l.contains(filter),
            (Some(_), None) => false,
        };
        if !keep {
            excluded += 1;
            continue;
        }

        let id = row.get(id_col).map(cell_string).unwrap_or_default();
        driving.push(DrivingRow::new(index, id, link));
    }

    info!(
        "Read {} rows from {} ({} excluded by link filter)",
        driving.len(),
        path.display(),
        excluded
    );
    Ok(driving)
}

fn column_index(header: &[Data], name: &str, path: &Path) -> Result<usize> {
    header
        .iter()
        .position(|cell| cell_string(cell).trim() == name)
        .ok_or_else(|| FlowError::MissingColumn {
            column: name.to_string(),
            path: path.display().to_string(),
        })
}

/// Links are only taken from non-empty string cells
fn link_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Data::String(_) | Data::Empty => None,
        other => {
            debug!("Ignoring non-text link cell: {}", other);
            None
        }
    }
}

fn cell_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn write_driving(path: &Path, rows: &[(&str, Option<&str>)]) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Name").unwrap();
        sheet.write_string(0, 1, "ID").unwrap();
        sheet.write_string(0, 2, "DocumentationLink").unwrap();
        for (i, (id, link)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_string(r, 0, format!("item {}", i)).unwrap();
            sheet.write_string(r, 1, *id).unwrap();
            if let Some(link) = link {
                sheet.write_string(r, 2, *link).unwrap();
            }
        }
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_latest_file_picks_newest() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("List_old.xlsx");
        let new = dir.path().join("List_new.xlsx");
        std::fs::write(&old, b"old").unwrap();
        std::fs::write(&new, b"new").unwrap();

        let past = SystemTime::now() - std::time::Duration::from_secs(3600);
        std::fs::File::options()
            .write(true)
            .open(&old)
            .unwrap()
            .set_modified(past)
            .unwrap();

        assert_eq!(latest_file(dir.path(), "List_*.xlsx").unwrap(), new);
    }

    #[test]
    fn test_latest_file_none_matching() {
        let dir = TempDir::new().unwrap();
        let err = latest_file(dir.path(), "List_*.xlsx").unwrap_err();
        assert!(matches!(err, FlowError::NoMatchingFile(_)));
    }

    #[test]
    fn test_read_rows_with_filter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("List_1.xlsx");
        write_driving(
            &path,
            &[
                ("A-1", Some("https://space.confluence.com/x/AbC")),
                ("A-2", Some("https://elsewhere.example/doc")),
                ("A-3", None),
                ("A-4", Some("https://space.confluence.com/display/HR/Page")),
            ],
        );

        let columns = DrivingColumns {
            id: "ID",
            link: "DocumentationLink",
        };
        let rows = read_driving_rows(&path, columns, Some("space.confluence.com")).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A-1", "A-4"]);
        assert_eq!(rows[1].index, 3);

        let all = read_driving_rows(&path, columns, None).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[2].link, None);
    }

    #[test]
    fn test_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("List_1.xlsx");
        write_driving(&path, &[("A-1", None)]);

        let columns = DrivingColumns {
            id: "ID",
            link: "Link",
        };
        let err = read_driving_rows(&path, columns, None).unwrap_err();
        assert!(matches!(err, FlowError::MissingColumn { ref column, .. } if column == "Link"));
    }
}
