// Table preview construction
// Author: Gabriel Demetrios Lafis

use crate::data::{to_string_safe, AnalyticsResult, Row};
use super::TableModel;

/// Title of every table preview
pub const TABLE_PREVIEW_TITLE: &str = "SQL Result Preview";

/// Maximum number of rows in a preview
pub const TABLE_PREVIEW_ROW_LIMIT: usize = 20;

/// Build a preview of the first rows, keyed on the first row's columns
///
/// Returns `None` when there is nothing to show. Cells missing from a row
/// render as empty strings.
pub fn build_table_preview(rows: &[Row]) -> Option<TableModel> {
    let first = rows.first()?;
    let columns: Vec<String> = first.keys().map(str::to_string).collect();
    if columns.is_empty() {
        return None;
    }

    let rows = rows
        .iter()
        .take(TABLE_PREVIEW_ROW_LIMIT)
        .map(|row| {
            columns
                .iter()
                .map(|column| to_string_safe(row.get(column), ""))
                .collect()
        })
        .collect();

    Some(TableModel {
        title: TABLE_PREVIEW_TITLE.to_string(),
        columns,
        rows,
    })
}

/// Map an analytics result into a table preview
pub fn map_to_table(result: &AnalyticsResult) -> Option<TableModel> {
    build_table_preview(&result.rows)
}
