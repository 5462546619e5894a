//! Bounded preview of imported rows used for column inference.

use std::collections::BTreeMap;

use pairing_validate::format::is_blank;
use polars::prelude::*;
use serde_json::Value;

use crate::error::Result;

/// One parsed row: column header to raw scalar value.
pub type ImportRow = BTreeMap<String, Value>;

/// Rows inspected when inferring column compatibility.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// The first few rows of an upload plus every header seen in them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPreview {
    columns: Vec<String>,
    rows: Vec<ImportRow>,
}

impl ImportPreview {
    /// Take up to `limit` rows from already-parsed data.
    pub fn from_rows(rows: &[ImportRow], limit: usize) -> Self {
        let rows: Vec<ImportRow> = rows.iter().take(limit).cloned().collect();
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for column in row.keys() {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }
        Self { columns, rows }
    }

    /// Take up to `limit` rows from a DataFrame, rendering every cell as text.
    pub fn from_dataframe(df: &DataFrame, limit: usize) -> Result<Self> {
        let height = df.height().min(limit);
        let mut rows = vec![ImportRow::new(); height];
        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let name = col.name().to_string();
            let series = col.cast(&DataType::String)?.take_materialized_series();
            let chunked = series.str()?;
            for (idx, value) in chunked.iter().take(height).enumerate() {
                let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
                rows[idx].insert(name.clone(), value);
            }
            columns.push(name);
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[ImportRow] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Non-blank values observed for `column`.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .filter_map(move |row| row.get(column))
            .filter(|value| !is_blank(value))
    }
}
