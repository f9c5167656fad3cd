//! Console output for processed uploads.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sauna_core::UploadOutcome;

/// One processed (or rejected) file in a batch run.
pub struct FileReport {
    pub filename: String,
    pub outcome: Result<UploadOutcome, String>,
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn print_outcome(filename: &str, outcome: &UploadOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Type"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Encoding"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(filename),
        Cell::new(outcome.data_type.to_string())
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(outcome.rows),
        Cell::new(outcome.columns),
        Cell::new(outcome.encoding),
    ]);
    println!("{table}");
}

pub fn print_batch(reports: &[FileReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Type"),
        header_cell("Rows"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut failures = 0usize;
    for report in reports {
        match &report.outcome {
            Ok(outcome) => table.add_row(vec![
                Cell::new(&report.filename),
                Cell::new(outcome.data_type.to_string()).fg(Color::Blue),
                Cell::new(outcome.rows),
                Cell::new("ok").fg(Color::Green),
            ]),
            Err(reason) => {
                failures += 1;
                table.add_row(vec![
                    Cell::new(&report.filename),
                    Cell::new("-").fg(Color::DarkGrey),
                    Cell::new("-").fg(Color::DarkGrey),
                    Cell::new(reason).fg(Color::Red),
                ])
            }
        };
    }
    println!("{table}");
    println!(
        "{} processed, {} failed",
        reports.len() - failures,
        failures
    );
}
