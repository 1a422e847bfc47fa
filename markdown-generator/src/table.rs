// Extra width every column gets beyond its header text.
const MIN_PADDING: usize = 2;

/// Renders a GitHub-flavored pipe table.
///
/// Columns are left aligned and padded to the widest of their trimmed cells,
/// but never narrower than the header plus [`MIN_PADDING`]. Rows shorter than
/// the header are filled with empty cells.
pub fn github_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| cell(row, i).chars().count())
                .fold(header.chars().count() + MIN_PADDING, usize::max)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.iter().copied(), &widths));
    lines.push(format!(
        "|{}|",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for row in rows {
        lines.push(render_row((0..headers.len()).map(|i| cell(row, i)), &widths));
    }
    lines.join("\n")
}

fn cell(row: &[String], i: usize) -> &str {
    row.get(i).map(|c| c.trim()).unwrap_or_default()
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, w)| {
            let pad = w.saturating_sub(c.chars().count());
            format!("{c}{}", " ".repeat(pad))
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn pads_columns_to_widest_cell() {
        let table = github_table(
            &["Value", "Description"],
            &[row(&["`A_VERY_LONG_VALUE`", "Short."]), row(&["`B`", ""])],
        );
        let expected = "\
| Value               | Description   |
|---------------------|---------------|
| `A_VERY_LONG_VALUE` | Short.        |
| `B`                 |               |";
        assert_eq!(table, expected);
    }

    #[test]
    fn empty_rows_still_print_header() {
        let table = github_table(&["Method", "Request"], &[]);
        assert_eq!(table, "| Method   | Request   |\n|----------|-----------|");
    }

    #[test]
    fn cells_are_trimmed() {
        let table = github_table(&["A"], &[row(&["  x  "])]);
        assert_eq!(table, "| A   |\n|-----|\n| x   |");
    }
}
