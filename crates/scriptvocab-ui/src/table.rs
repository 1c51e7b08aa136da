use std::fmt;

use scriptvocab_types::VocabRecord;
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

use crate::Selection;

const ID_COLUMN: &str = "original_text";

/// Plain-text table of vocabulary records.
///
/// Columns are `original_text` followed by every other field in the order it
/// first appears. With a selection attached, a checkbox column is prepended.
pub struct ResultsTable<'a> {
    records: &'a [VocabRecord],
    selection: Option<&'a Selection>,
}

impl<'a> ResultsTable<'a> {
    pub fn new(records: &'a [VocabRecord]) -> Self {
        Self {
            records,
            selection: None,
        }
    }

    pub fn with_selection(mut self, selection: &'a Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    fn columns(&self) -> Vec<&'a str> {
        let mut columns = vec![ID_COLUMN];
        for record in self.records {
            for key in record.extra.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key.as_str());
                }
            }
        }
        columns
    }

    fn rows(&self, columns: &[&str]) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.records.len() + 1);

        let mut header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        if self.selection.is_some() {
            header.insert(0, String::new());
        }
        rows.push(header);

        for record in self.records {
            let mut row: Vec<String> = columns
                .iter()
                .map(|column| {
                    if *column == ID_COLUMN {
                        record.original_text.clone()
                    } else {
                        record.extra.get(*column).map(cell).unwrap_or_default()
                    }
                })
                .collect();

            if let Some(selection) = self.selection {
                let mark = if selection.contains(record.id()) { "[x]" } else { "[ ]" };
                row.insert(0, mark.to_string());
            }
            rows.push(row);
        }

        rows
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &[String], widths: &[usize]) -> fmt::Result {
    let mut line = String::new();
    for (i, (value, width)) in row.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(value);
        let pad = width.saturating_sub(value.width());
        line.extend(std::iter::repeat_n(' ', pad));
    }
    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for ResultsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self.columns();
        let rows = self.rows(&columns);

        let mut widths = vec![0usize; rows[0].len()];
        for row in &rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.width());
            }
        }

        let (header, body) = rows.split_at(1);
        write_row(f, &header[0], &widths)?;

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(f, &rule, &widths)?;

        for row in body {
            write_row(f, row, &widths)?;
        }

        Ok(())
    }
}
