use super::compose::{Cell, CellColor};

/// Serialize a grid as color-batched `<span>` runs, one line per row.
///
/// Consecutive cells sharing a color collapse into a single span. Rows are
/// separated by `\n` with no trailing newline.
#[must_use]
pub fn grid_to_html(grid: &[Vec<Cell>]) -> String {
    let mut out = String::new();
    for (idx, row) in grid.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        push_row(&mut out, row);
    }
    out
}

fn push_row(out: &mut String, row: &[Cell]) {
    let mut run = String::new();
    let mut run_color: Option<&CellColor> = None;
    for cell in row {
        if run_color.is_some_and(|color| color != &cell.color) {
            flush_run(out, run_color, &run);
            run.clear();
        }
        run_color = Some(&cell.color);
        run.push(cell.ch);
    }
    flush_run(out, run_color, &run);
}

fn flush_run(out: &mut String, color: Option<&CellColor>, text: &str) {
    let Some(color) = color else {
        return;
    };
    let color = color.to_string();
    out.push_str(&format!(
        "<span style=\"color:{}\">{}</span>",
        html_escape::encode_double_quoted_attribute(&color),
        html_escape::encode_text(text)
    ));
}

/// Characters only, rows separated by `\n`.
#[must_use]
pub fn grid_to_text(grid: &[Vec<Cell>]) -> String {
    grid.iter()
        .map(|row| row.iter().map(|cell| cell.ch).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
