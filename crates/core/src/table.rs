//! Tabular interval data as returned by the service's interval data providers.

use thiserror::Error;

/// Column holding interval start times.
pub const START_TIME: &str = "Start Time";
/// Column holding interval stop times.
pub const STOP_TIME: &str = "Stop Time";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("column `{0}` not present in access table")]
    MissingColumn(String),
    #[error("column index {index} out of range for a table with {width} columns")]
    ColumnIndex { index: usize, width: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Named columns plus string rows; cells keep the service's textual formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl AccessTable {
    /// Build a table, rejecting rows whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    row,
                    found: cells.len(),
                    expected: columns.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of a column looked up by name.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, TableError> {
        let index = self
            .columns
            .iter()
            .position(|c| c.trim() == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Start/stop text pairs in row order.
    pub fn interval_text(&self) -> Result<Vec<(&str, &str)>, TableError> {
        let starts = self.column(START_TIME)?;
        let stops = self.column(STOP_TIME)?;
        Ok(starts.into_iter().zip(stops).collect())
    }

    /// Project the table onto the given column indices, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<AccessTable, TableError> {
        let width = self.columns.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= width) {
            return Err(TableError::ColumnIndex { index, width });
        }
        let pick = |cells: &[String]| -> Vec<String> {
            indices.iter().map(|&i| cells[i].clone()).collect()
        };
        Ok(AccessTable {
            columns: pick(self.columns.as_slice()),
            rows: self.rows.iter().map(|row| pick(row.as_slice())).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AccessTable {
        AccessTable::new(
            vec![
                "Access Number".into(),
                "From Pass".into(),
                "Start Time".into(),
                "Stop Time".into(),
                "Duration".into(),
            ],
            vec![
                vec![
                    "1".into(),
                    "3".into(),
                    "1 Jun 2016 15:00:00.000".into(),
                    "1 Jun 2016 15:10:00.000".into(),
                    "600.000".into(),
                ],
                vec![
                    "2".into(),
                    "4".into(),
                    "1 Jun 2016 16:00:00.000".into(),
                    "1 Jun 2016 16:05:00.000".into(),
                    "300.000".into(),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn interval_text_pairs_by_column_name() {
        let table = sample();
        let pairs = table.interval_text().unwrap();
        assert_eq!(
            pairs[1],
            ("1 Jun 2016 16:00:00.000", "1 Jun 2016 16:05:00.000")
        );
    }

    #[test]
    fn select_reorders_and_checks_bounds() {
        let table = sample();
        let projected = table.select(&[0, 2, 3, 4]).unwrap();
        assert_eq!(projected.columns()[1], "Start Time");
        assert_eq!(projected.rows()[0][3], "600.000");
        assert_eq!(
            table.select(&[7]).unwrap_err(),
            TableError::ColumnIndex { index: 7, width: 5 }
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = AccessTable::new(vec!["a".into(), "b".into()], vec![vec!["1".into()]])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::RaggedRow {
                row: 0,
                found: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn missing_column_is_named() {
        let table = AccessTable::new(vec!["Start Time".into()], vec![]).unwrap();
        assert_eq!(
            table.interval_text().unwrap_err(),
            TableError::MissingColumn("Stop Time".into())
        );
    }
}
