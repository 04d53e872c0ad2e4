//! Terminal tables and CSV export.

use std::fs::File;
use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use places_analysis::{Correlation, MeasureSummary, PivotTable};
use places_model::{MeasureCatalogEntry, Release, Table as PlacesTable};

/// Columns shown when printing county observations.
const RECORD_COLUMNS: [&str; 6] = [
    "year",
    "stateabbr",
    "locationname",
    "locationid",
    "measureid",
    "data_value",
];

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn measures_table(measures: &[MeasureCatalogEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Measure"),
        header_cell("Short name"),
        header_cell("Full name"),
        header_cell("Category"),
    ]);
    apply_table_style(&mut table);
    for entry in measures {
        table.add_row(vec![
            Cell::new(&entry.id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&entry.short_name),
            Cell::new(&entry.full_name),
            Cell::new(&entry.category),
        ]);
    }
    table
}

/// Renders up to `limit` observations of `data`.
pub fn records_table(data: &PlacesTable, limit: usize) -> Table {
    let columns: Vec<&str> = RECORD_COLUMNS
        .into_iter()
        .filter(|column| data.has_column(column))
        .collect();

    let mut table = Table::new();
    table.set_header(columns.iter().map(|column| header_cell(column)));
    apply_table_style(&mut table);
    for row in data.iter().take(limit) {
        table.add_row(columns.iter().map(|&column| match row.number(column) {
            Some(value) => Cell::new(format_number(value)),
            None => match row.text(column) {
                Some(text) => Cell::new(text),
                None => dim_cell("-"),
            },
        }));
    }
    if let Some(index) = columns.iter().position(|&column| column == "data_value") {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

pub fn summary_table(summaries: &[MeasureSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Measure"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Std dev"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.measure_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.count),
            Cell::new(format_number(summary.mean)),
            Cell::new(format_number(summary.min)),
            Cell::new(format_number(summary.max)),
            optional_cell(summary.std_dev),
        ]);
    }
    table
}

pub fn correlation_table(correlation: &Correlation) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("X"),
        header_cell("Y"),
        header_cell("r"),
        header_cell("Counties"),
        header_cell("Mean X"),
        header_cell("Mean Y"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let coefficient = match correlation.corr_coef {
        Some(r) => Cell::new(format_number(r)).fg(correlation_color(r)),
        None => dim_cell("n/a"),
    };
    table.add_row(vec![
        Cell::new(&correlation.x),
        Cell::new(&correlation.y),
        coefficient,
        Cell::new(correlation.sample_size),
        optional_cell(correlation.mean_x),
        optional_cell(correlation.mean_y),
    ]);
    table
}

/// Renders up to `limit` locations of a pivot table.
pub fn pivot_table(pivot: &PivotTable, limit: usize) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell(pivot.index_column())];
    header.extend(pivot.measures().iter().map(|measure| header_cell(measure)));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=pivot.measures().len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for location in pivot.locations().take(limit) {
        let mut row = vec![Cell::new(location)];
        row.extend(
            pivot
                .measures()
                .iter()
                .map(|measure| optional_cell(pivot.get(location, measure))),
        );
        table.add_row(row);
    }
    table
}

pub fn releases_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Release"), header_cell("Resource")]);
    apply_table_style(&mut table);
    for release in Release::ALL {
        let label = if release == Release::latest() {
            Cell::new(format!("{release} (default)")).add_attribute(Attribute::Bold)
        } else {
            Cell::new(release)
        };
        table.add_row(vec![label, Cell::new(release.resource_id())]);
    }
    table
}

/// Writes `frame` to `path` as CSV with a header row.
pub fn write_csv(frame: &mut DataFrame, path: &Path) -> anyhow::Result<()> {
    use anyhow::Context;

    let mut file =
        File::create(path).with_context(|| format!("create output file {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)
        .with_context(|| format!("write CSV to {}", path.display()))?;
    Ok(())
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.3}")
    }
}

fn correlation_color(r: f64) -> Color {
    if r.abs() >= 0.7 {
        Color::Green
    } else if r.abs() >= 0.3 {
        Color::Yellow
    } else {
        Color::DarkGrey
    }
}

fn optional_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_number(value)),
        None => dim_cell("-"),
    }
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
