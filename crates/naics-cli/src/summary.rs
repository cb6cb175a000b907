use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use naics_cli::pipeline::RunResult;
use naics_model::FinalRecord;

/// Characters of a description shown in query results.
const DESCRIPTION_PREVIEW: usize = 80;

pub fn print_run_summary(result: &RunResult) {
    println!("Output: {}", result.output.display());
    println!("Elapsed: {:.1}s", result.elapsed.as_secs_f64());
    if result.dry_run {
        println!("Dry run: no files written");
    }

    let mut sources = Table::new();
    sources.set_header(vec![header_cell("Source"), header_cell("Rows")]);
    apply_table_style(&mut sources);
    align_column(&mut sources, 1, CellAlignment::Right);
    for (kind, rows) in &result.source_rows {
        sources.add_row(vec![Cell::new(kind.label()), Cell::new(rows)]);
    }
    println!("{sources}");

    let mut stats = Table::new();
    stats.set_header(vec![header_cell("Stage count"), header_cell("Value")]);
    apply_table_style(&mut stats);
    align_column(&mut stats, 1, CellAlignment::Right);
    for (label, value) in result.stats.entries() {
        stats.add_row(vec![Cell::new(label), count_cell(value)]);
    }
    println!("{stats}");

    if result.artifacts.is_empty() {
        return;
    }
    let mut artifacts = Table::new();
    artifacts.set_header(vec![
        header_cell("Format"),
        header_cell("Path"),
        header_cell("Rows"),
        header_cell("Bytes"),
        header_cell("SHA-256"),
    ]);
    apply_wide_table_style(&mut artifacts);
    align_column(&mut artifacts, 2, CellAlignment::Right);
    align_column(&mut artifacts, 3, CellAlignment::Right);
    for artifact in &result.artifacts {
        artifacts.add_row(vec![
            Cell::new(artifact.format)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(artifact.path.display()),
            Cell::new(artifact.rows),
            Cell::new(artifact.bytes),
            dim_cell(&artifact.sha256),
        ]);
    }
    println!("{artifacts}");
}

pub fn print_query_results(records: &[&FinalRecord]) {
    if records.is_empty() {
        println!("No matching records.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Level"),
        header_cell("Title"),
        header_cell("Description"),
        header_cell("Examples"),
        header_cell("Excluded"),
    ]);
    apply_wide_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for record in records {
        table.add_row(vec![
            Cell::new(record.code.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(record.level),
            Cell::new(&record.title),
            match &record.description {
                Some(text) => Cell::new(preview(text)),
                None => dim_cell("-"),
            },
            match &record.examples {
                Some(items) => Cell::new(items.len()),
                None => dim_cell("-"),
            },
            match &record.excluded {
                Some(_) => Cell::new("✓")
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
    println!("{} record(s)", records.len());
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_PREVIEW) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: usize) -> Cell {
    if value > 0 {
        Cell::new(value)
    } else {
        dim_cell(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(DESCRIPTION_PREVIEW + 5);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), DESCRIPTION_PREVIEW + 1);
        assert!(shown.ends_with('…'));
        assert_eq!(preview("short"), "short");
    }
}
