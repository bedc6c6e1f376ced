//! Keyed Table Module
//! A numeric frame with a named row key, as produced by preprocessing.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Row not found: {0}")]
    MissingRow(String),
    #[error("Column not found: {0}")]
    MissingColumn(String),
    #[error("Column label is not a year: {0}")]
    InvalidYear(String),
    #[error("Index has {keys} keys but frame has {rows} rows")]
    LengthMismatch { keys: usize, rows: usize },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Ordered values of one entity across a contiguous year range.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub points: Vec<(i32, f64)>,
}

impl NamedSeries {
    /// Points with a finite value, in year order.
    pub fn finite_points(&self) -> Vec<(i32, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|(_, v)| v.is_finite())
            .collect()
    }
}

/// Entity-by-label table. Every column of `frame` is Float64, `index[i]`
/// names row `i` and `labels[j]` names column `j`.
///
/// Row keys and labels may repeat (blank country cells, duplicated names);
/// lookups resolve to the first match.
#[derive(Debug, Clone)]
pub struct Table {
    index: Vec<String>,
    labels: Vec<String>,
    frame: DataFrame,
}

impl Table {
    /// Pair a row key with a numeric frame of the same height. Column
    /// labels are the frame's column names.
    pub fn new(index: Vec<String>, frame: DataFrame) -> Result<Self, TableError> {
        let labels = frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::with_labels(index, labels, frame)
    }

    fn with_labels(
        index: Vec<String>,
        labels: Vec<String>,
        frame: DataFrame,
    ) -> Result<Self, TableError> {
        if frame.width() > 0 && frame.height() != index.len() {
            return Err(TableError::LengthMismatch {
                keys: index.len(),
                rows: frame.height(),
            });
        }
        Ok(Self {
            index,
            labels,
            frame,
        })
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// The numeric frame, without the key column. A transposed table names
    /// its frame columns by position; `columns` holds the labels.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn columns(&self) -> Vec<String> {
        self.labels.clone()
    }

    pub fn row_position(&self, row: &str) -> Result<usize, TableError> {
        self.index
            .iter()
            .position(|key| key == row)
            .ok_or_else(|| TableError::MissingRow(row.to_string()))
    }

    pub fn column_position(&self, column: &str) -> Result<usize, TableError> {
        self.labels
            .iter()
            .position(|label| label == column)
            .ok_or_else(|| TableError::MissingColumn(column.to_string()))
    }

    /// Value at (`row`, `column`). Nulls read as NaN.
    pub fn value(&self, row: &str, column: &str) -> Result<f64, TableError> {
        let i = self.row_position(row)?;
        let j = self.column_position(column)?;
        self.cell(i, j)
    }

    fn cell(&self, i: usize, j: usize) -> Result<f64, TableError> {
        let values = self.frame.get_columns()[j].f64()?;
        Ok(values.get(i).unwrap_or(f64::NAN))
    }

    /// Values of `row` for the columns labelled `from` through `to`,
    /// both inclusive, in column order.
    pub fn row_range(&self, row: &str, from: i32, to: i32) -> Result<NamedSeries, TableError> {
        let i = self.row_position(row)?;
        let start = self.column_position(&from.to_string())?;
        let end = self.column_position(&to.to_string())?;
        let mut points = Vec::new();
        for j in start..=end {
            let label = &self.labels[j];
            let year = label
                .parse::<i32>()
                .map_err(|_| TableError::InvalidYear(label.clone()))?;
            points.push((year, self.cell(i, j)?));
        }

        Ok(NamedSeries {
            name: row.to_string(),
            points,
        })
    }

    /// Swap row keys and column labels. Repeated row keys become repeated
    /// labels.
    pub fn transpose(&self) -> Result<Table, TableError> {
        let index = self.labels.clone();
        let mut columns = Vec::with_capacity(self.index.len());

        for i in 0..self.index.len() {
            let values = (0..index.len())
                .map(|j| self.cell(i, j))
                .collect::<Result<Vec<f64>, TableError>>()?;
            columns.push(Column::new(format!("column_{}", i).into(), values));
        }

        Table::with_labels(index, self.index.clone(), DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let frame = df!(
            "1995" => [1.0, 10.0],
            "2000" => [2.0, 20.0],
            "2005" => [3.0, f64::NAN],
            "BRICS share" => [0.5, 0.25],
        )
        .unwrap();
        Table::new(vec!["Brazil".into(), "China".into()], frame).unwrap()
    }

    #[test]
    fn value_looks_up_by_keys() {
        let table = sample();
        assert_eq!(table.value("China", "2000").unwrap(), 20.0);
        assert!(table.value("China", "2005").unwrap().is_nan());
    }

    #[test]
    fn missing_keys_are_errors() {
        let table = sample();
        assert!(matches!(
            table.value("Narnia", "2000"),
            Err(TableError::MissingRow(r)) if r == "Narnia"
        ));
        assert!(matches!(
            table.value("Brazil", "1890"),
            Err(TableError::MissingColumn(c)) if c == "1890"
        ));
    }

    #[test]
    fn row_range_is_inclusive() {
        let series = sample().row_range("Brazil", 1995, 2005).unwrap();
        assert_eq!(series.name, "Brazil");
        assert_eq!(series.points, vec![(1995, 1.0), (2000, 2.0), (2005, 3.0)]);
    }

    #[test]
    fn row_range_rejects_non_year_labels() {
        let frame = df!(
            "1995" => [1.0],
            "note" => [2.0],
            "2000" => [3.0],
        )
        .unwrap();
        let table = Table::new(vec!["India".into()], frame).unwrap();
        assert!(matches!(
            table.row_range("India", 1995, 2000),
            Err(TableError::InvalidYear(label)) if label == "note"
        ));
    }

    #[test]
    fn finite_points_skips_gaps() {
        let series = sample().row_range("China", 1995, 2005).unwrap();
        assert_eq!(series.finite_points(), vec![(1995, 10.0), (2000, 20.0)]);
    }

    #[test]
    fn transpose_swaps_keys() {
        let transposed = sample().transpose().unwrap();
        assert_eq!(transposed.index(), ["1995", "2000", "2005", "BRICS share"]);
        assert_eq!(transposed.columns(), vec!["Brazil", "China"]);
        assert_eq!(transposed.value("BRICS share", "China").unwrap(), 0.25);
        assert_eq!(transposed.value("1995", "Brazil").unwrap(), 1.0);
    }

    #[test]
    fn transpose_keeps_repeated_and_blank_keys() {
        let frame = df!(
            "1990" => [1.0, 2.0, 3.0, 4.0, 5.0],
            "2020" => [10.0, 20.0, 30.0, 40.0, 50.0],
        )
        .unwrap();
        let index = vec![
            "Brazil".to_string(),
            String::new(),
            String::new(),
            "BRICS".to_string(),
            "Brazil".to_string(),
        ];
        let transposed = Table::new(index, frame).unwrap().transpose().unwrap();

        assert_eq!(
            transposed.columns(),
            vec!["Brazil", "", "", "BRICS", "Brazil"]
        );
        assert_eq!(transposed.value("2020", "BRICS").unwrap(), 40.0);
        assert_eq!(transposed.value("1990", "Brazil").unwrap(), 1.0);
        assert_eq!(transposed.value("2020", "").unwrap(), 20.0);
    }

    #[test]
    fn index_must_match_frame_height() {
        let frame = df!("1995" => [1.0, 2.0]).unwrap();
        assert!(Table::new(vec!["Brazil".into()], frame).is_err());
    }
}
