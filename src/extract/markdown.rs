//! Terminal renderers for nested cell content.
//!
//! Lists and tables found inside a cell are rendered to plain strings. Neither
//! renderer recurses into further nested lists or tables; nested content is
//! reduced to its text.

use scraper::ElementRef;

use super::node::{child_elements, descendant_elements, text_of};

/// Render list items as `- item` lines joined by newlines
pub fn render_list(el: ElementRef<'_>) -> String {
    let own = (el.value().name() == "li").then_some(el);
    own.into_iter()
        .chain(descendant_elements(el).filter(|d| d.value().name() == "li"))
        .map(|li| format!("- {}", text_of(li)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a nested table as a markdown pipe table.
///
/// The first row is the header; every following row becomes one body line,
/// so the body line count equals the nested table's body row count.
pub fn render_table(el: ElementRef<'_>) -> String {
    let mut rows = descendant_elements(el)
        .filter(|d| d.value().name() == "tr")
        .map(|tr| {
            child_elements(tr)
                .filter(|c| matches!(c.value().name(), "td" | "th"))
                .map(text_of)
                .collect::<Vec<_>>()
        });

    let Some(header) = rows.next() else {
        return String::new();
    };
    let body: Vec<Vec<String>> = rows.collect();

    format_markdown(&header, &body)
}

/// Format a header and body rows as an aligned markdown table
pub fn format_markdown(header: &[String], body: &[Vec<String>]) -> String {
    let width = header
        .len()
        .max(body.iter().map(Vec::len).max().unwrap_or(0));
    if width == 0 {
        return String::new();
    }

    let cell = |row: &[String], i: usize| row.get(i).map(|s| escape(s)).unwrap_or_default();

    let mut widths = vec![3usize; width];
    for row in std::iter::once(header).chain(body.iter().map(Vec::as_slice)) {
        for (i, w) in widths.iter_mut().enumerate() {
            *w = (*w).max(cell(row, i).chars().count());
        }
    }

    let line = |row: &[String]| {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| format!("{:<w$}", cell(row, i), w = *w))
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(line(header));
    lines.push(format!(
        "| {} |",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(" | ")
    ));
    lines.extend(body.iter().map(|row| line(row)));
    lines.join("\n")
}

fn escape(s: &str) -> String {
    s.replace('|', "\\|")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::node::find_descendant;
    use scraper::Html;

    #[test]
    fn test_render_list() {
        let doc = Html::parse_document("<ul><li>a</li><li> b </li></ul>");
        let ul = find_descendant(doc.root_element(), "ul").unwrap();
        assert_eq!(render_list(ul), "- a\n- b");
    }

    #[test]
    fn test_render_table_line_count_matches_body_rows() {
        let doc = Html::parse_document(
            "<table><tbody>\
             <tr><th>Key</th><th>Value</th></tr>\
             <tr><td>a</td><td>1</td></tr>\
             <tr><td>b</td><td>2</td></tr>\
             <tr><td>c</td><td>3</td></tr>\
             </tbody></table>",
        );
        let table = find_descendant(doc.root_element(), "table").unwrap();
        let md = render_table(table);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines.len() - 2, 3);
        assert_eq!(lines[0], "| Key | Value |");
        assert_eq!(lines[1], "| --- | ----- |");
        assert_eq!(lines[2], "| a   | 1     |");
    }

    #[test]
    fn test_format_markdown_escapes_pipes_and_newlines() {
        let md = format_markdown(&["h".to_string()], &[vec!["a|b\nc".to_string()]]);
        assert!(md.lines().nth(2).unwrap().contains("a\\|b c"));
    }

    #[test]
    fn test_render_table_without_rows() {
        let doc = Html::parse_document("<div><table></table></div>");
        let div = find_descendant(doc.root_element(), "div").unwrap();
        assert_eq!(render_table(div), "");
    }
}
