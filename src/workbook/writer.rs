//! Per-page workbook output.

use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::sheet::{MAX_CELL_CHARS, SUMMARY_SHEET, WORKBOOK_EXTENSION};
use crate::types::{Cell, Result, Table};
use crate::wiki::PageExport;

/// `<pageId>_<title>.xlsx`, spaces and path separators replaced by `_`
pub fn output_file_name(page_id: &str, title: &str) -> String {
    let title: String = title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}_{}.{}", page_id, title, WORKBOOK_EXTENSION)
}

/// Write the summary sheet followed by one sheet per section
pub fn write_page_workbook(dir: &Path, page: &PageExport) -> Result<PathBuf> {
    let path = dir.join(output_file_name(page.id.as_str(), &page.meta.title));
    let names = page.extract.sheet_names();

    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet().set_name(SUMMARY_SHEET)?;
    write_table(summary, &page.extract.summary)?;

    for (section, name) in page.extract.sections.iter().zip(&names) {
        let sheet = workbook.add_worksheet().set_name(name)?;
        write_table(sheet, &section.table)?;
    }

    std::fs::create_dir_all(dir)?;
    workbook.save(&path)?;
    debug!(
        "Wrote {} ({} section sheets)",
        path.display(),
        page.extract.sections.len()
    );
    Ok(path)
}

/// Header row then data rows; empty cells are left unwritten
pub fn write_table(sheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string(0, col as u16, fit_cell(name))?;
    }

    for (r, row) in table.rows().iter().enumerate() {
        let excel_row = r as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    sheet.write_string(excel_row, col as u16, fit_cell(text))?;
                }
                Cell::Number(n) => {
                    sheet.write_number(excel_row, col as u16, *n)?;
                }
            }
        }
    }
    Ok(())
}

fn fit_cell(text: &str) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => {
            warn!(
                "Cell text truncated to {} characters (was {})",
                MAX_CELL_CHARS,
                text.chars().count()
            );
            &text[..cut]
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{PageExtract, PageMeta};
    use crate::types::PageId;
    use calamine::{Data, Reader, open_workbook_auto};
    use tempfile::TempDir;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("123", "Leave Policy / 2024"),
            "123_Leave_Policy___2024.xlsx"
        );
    }

    #[test]
    fn test_fit_cell_truncates_by_chars() {
        let long = "é".repeat(MAX_CELL_CHARS + 5);
        assert_eq!(fit_cell(&long).chars().count(), MAX_CELL_CHARS);
        assert_eq!(fit_cell("short"), "short");
    }

    #[test]
    fn test_write_page_workbook() {
        let html = "<table><tbody><tr><th>Owner</th><td>HR</td></tr></tbody></table>\
            <ac:structured-macro ac:name=\"ui-expand\">\
            <ac:parameter ac:name=\"title\">Summary</ac:parameter>\
            <table><tbody><tr><th>K</th><th>V</th></tr><tr><td>a</td><td>1</td></tr></tbody></table>\
            </ac:structured-macro>";
        let meta = PageMeta {
            title: "Leave Policy".to_string(),
            id: "99".to_string(),
            version: Some(3),
            ..PageMeta::default()
        };
        let page = PageExport {
            id: PageId::from("99"),
            extract: PageExtract::from_html(html, &meta, None),
            meta,
        };

        let dir = TempDir::new().unwrap();
        let path = write_page_workbook(dir.path(), &page).unwrap();
        assert_eq!(path.file_name().unwrap(), "99_Leave_Policy.xlsx");

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Summary", "Summary 2"]);

        let summary = workbook.worksheet_range("Summary").unwrap();
        assert_eq!(summary.get((1, 0)), Some(&Data::String("Owner".to_string())));
        assert_eq!(summary.get((6, 1)), Some(&Data::Float(3.0)));

        let section = workbook.worksheet_range("Summary 2").unwrap();
        assert_eq!(section.height(), 2);
        assert_eq!(section.get((0, 2)), Some(&Data::String("Section".to_string())));
    }

    #[test]
    fn test_colliding_section_labels_still_write() {
        let expand = |label: &str| {
            format!(
                "<ac:structured-macro ac:name=\"ui-expand\">\
                 <ac:parameter ac:name=\"title\">{}</ac:parameter>\
                 <table><tbody><tr><th>K</th></tr><tr><td>v</td></tr></tbody></table>\
                 </ac:structured-macro>",
                label
            )
        };
        let labels = [
            "Configuration Parameters For Region A",
            "Configuration Parameters For Region B",
            "Overview",
            "Overview 2",
            "Overview",
            "'Quoted'",
        ];
        let html: String = labels.iter().map(|l| expand(l)).collect();
        let meta = PageMeta {
            title: "Collisions".to_string(),
            id: "7".to_string(),
            ..PageMeta::default()
        };
        let page = PageExport {
            id: PageId::from("7"),
            extract: PageExtract::from_html(&html, &meta, None),
            meta,
        };

        let dir = TempDir::new().unwrap();
        let path = write_page_workbook(dir.path(), &page).unwrap();

        let workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec![
                "Summary",
                "Configuration Parameters For Re",
                "Configuration Parameters For 2",
                "Overview",
                "Overview 2",
                "Overview 3",
                "Quoted",
            ]
        );
    }
}
