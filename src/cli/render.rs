//! Plain-text rendering of list snapshots: a column table, an empty-state
//! line and the pager.

use crate::listing::{EmptyState, ListSnapshot, Pager, PagerLabel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: &'static str,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub const fn left(header: &'static str) -> Self {
        Self {
            header,
            max_width: Some(32),
            alignment: Alignment::Left,
        }
    }

    pub const fn right(header: &'static str) -> Self {
        Self {
            header,
            max_width: None,
            alignment: Alignment::Right,
        }
    }
}

pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(column.header), usize::max);
                column
                    .max_width
                    .map_or(widest, |max| widest.min(max.max(column.header.len())))
            })
            .collect()
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.header.to_string())
            .collect();
        let rule = widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  ");

        let mut lines = vec![self.render_row(&header, &widths), rule];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }
}

/// Character count ignoring ANSI escape sequences.
fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for code in chars.by_ref() {
                if code.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = if visible_width(text) > width && width > 0 {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    };
    let pad = " ".repeat(width.saturating_sub(visible_width(&fitted)));
    match alignment {
        Alignment::Left => format!("{fitted}{pad}"),
        Alignment::Right => format!("{pad}{fitted}"),
    }
}

/// `< prev | 1 ... 4 [5] 6 ... 10 | next >`; a disabled control renders in
/// parentheses.
pub fn pager_line(pager: &Pager) -> String {
    let prev = if pager.has_previous() { "< prev" } else { "(< prev)" };
    let next = if pager.has_next() { "next >" } else { "(next >)" };
    let labels = pager
        .labels
        .iter()
        .map(|label| match label {
            PagerLabel::Page(_) if pager.is_current(*label) => format!("[{label}]"),
            _ => label.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{prev} | {labels} | {next}")
}

/// Everything printed for one list frame, without colour.
pub fn render_snapshot<T>(
    snapshot: &ListSnapshot<'_, T>,
    columns: Vec<TableColumn>,
    row: impl Fn(&T) -> Vec<String>,
) -> String {
    if let Some(empty) = snapshot.empty {
        let mut out = empty.message().to_string();
        if empty == EmptyState::PageOutOfRange {
            out.push_str(" Use `page 1` to go back.");
        }
        if let Some(pager) = &snapshot.pager {
            out.push('\n');
            out.push_str(&pager_line(pager));
        }
        return out;
    }

    let rows: Vec<Vec<String>> = snapshot.rows.iter().map(|record| row(record)).collect();
    let table = Table::new(columns, rows);
    let mut out = table.render();
    out.push('\n');
    out.push_str(&format!(
        "{} matching record{}",
        snapshot.matching,
        if snapshot.matching == 1 { "" } else { "s" }
    ));
    if let Some(pager) = &snapshot.pager {
        out.push_str(&format!(
            ", page {} of {}\n{}",
            pager.current_page,
            pager.total_pages,
            pager_line(pager)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Person;
    use crate::listing::ListView;

    #[test]
    fn pager_line_marks_current_page_and_disabled_edges() {
        let first = Pager::new(1, 10).expect("pager");
        assert_eq!(pager_line(&first), "(< prev) | [1] 2 3 4 ... 10 | next >");

        let middle = Pager::new(5, 10).expect("pager");
        assert_eq!(pager_line(&middle), "< prev | 1 ... 4 [5] 6 ... 10 | next >");

        let last = Pager::new(3, 3).expect("pager");
        assert_eq!(pager_line(&last), "< prev | 1 2 [3] | (next >)");
    }

    #[test]
    fn table_aligns_columns() {
        let table = Table::new(
            vec![TableColumn::left("Name"), TableColumn::right("Age")],
            vec![
                vec!["Ana".into(), "7".into()],
                vec!["Bruno".into(), "41".into()],
            ],
        );
        assert_eq!(
            table.render(),
            "Name   Age\n-----  ---\nAna      7\nBruno   41"
        );
    }

    #[test]
    fn long_cells_are_truncated() {
        let column = TableColumn::left("Description");
        let long = "x".repeat(40);
        let table = Table::new(vec![column], vec![vec![long]]);
        let rendered = table.render();
        let last = rendered.lines().last().expect("row");
        assert_eq!(last.chars().count(), 32);
        assert!(last.ends_with('…'));
    }

    #[test]
    fn snapshot_without_records_prints_empty_message() {
        let view: ListView<Person> = ListView::default();
        let rendered = render_snapshot(&view.snapshot(), vec![TableColumn::left("Name")], |p| {
            vec![p.name.clone()]
        });
        assert_eq!(rendered, "No records yet.");
    }

    #[test]
    fn snapshot_with_pages_shows_pager() {
        let people = (1..=12)
            .map(|id| Person::new(id, format!("P{id}"), 30))
            .collect();
        let view = ListView::new(people);
        let rendered = render_snapshot(&view.snapshot(), vec![TableColumn::left("Name")], |p| {
            vec![p.name.clone()]
        });
        assert!(rendered.contains("12 matching records, page 1 of 2"));
        assert!(rendered.ends_with("(< prev) | [1] 2 | next >"));
    }
}
