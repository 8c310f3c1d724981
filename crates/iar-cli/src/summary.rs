//! Run summaries printed to stderr once a command finishes.
//!
//! Standard output may carry the document stream, so tables never go there.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use iar_cli::types::{MigrateResult, UploadResult};

pub fn print_migrate_summary(result: &MigrateResult) {
    eprintln!("Input: {}", result.input.display());
    eprintln!("Output: {}", result.output.display());
    let stats = &result.stats;
    let mut table = summary_table();
    table.add_row(vec![label_cell("Assets"), Cell::new(stats.assets)]);
    table.add_row(vec![
        label_cell("Unresolved assets"),
        count_cell(stats.unresolved_assets, Color::Yellow),
    ]);
    table.add_row(vec![label_cell("Departments"), Cell::new(stats.departments)]);
    table.add_row(vec![
        label_cell("Unresolved departments"),
        count_cell(stats.unresolved_departments, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Documents written"),
        Cell::new(result.documents).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");
}

pub fn print_upload_summary(result: &UploadResult) {
    eprintln!("Endpoint: {}", result.endpoint);
    eprintln!("Output: {}", result.output.display());
    let stats = &result.stats;
    let mut table = summary_table();
    table.add_row(vec![
        label_cell("Previous mappings"),
        Cell::new(result.previous_mappings),
    ]);
    table.add_row(vec![label_cell("Created"), Cell::new(stats.created)]);
    table.add_row(vec![label_cell("Updated"), Cell::new(stats.updated)]);
    table.add_row(vec![
        label_cell("Stale mappings recreated"),
        count_cell(stats.recreated, Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Failed"),
        count_cell(stats.failed, Color::Red),
    ]);
    table.add_row(vec![
        label_cell("Total"),
        Cell::new(stats.total()).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");
}

fn summary_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Count")]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Blue)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        Cell::new(count).fg(Color::DarkGrey)
    } else {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    }
}
