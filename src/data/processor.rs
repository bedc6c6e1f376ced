//! Data Processor Module
//! Re-keys loaded frames by country and reshapes tables into plot series.

use crate::config::{COUNTRY_COLUMN, YEARS};
use crate::data::table::{Table, TableError};
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Table error: {0}")]
    TableError(#[from] TableError),
    #[error("Key column not found: {0}")]
    MissingKeyColumn(String),
}

/// Handles re-indexing and reshaping of loaded data.
pub struct DataProcessor;

impl DataProcessor {
    /// Promote the `country` column to the row key and drop it from the
    /// frame. Remaining columns are cast to Float64.
    ///
    /// Keys are taken verbatim, so `"Brazil "` does not match `"Brazil"`.
    /// Blank key cells become empty keys and may repeat.
    ///
    /// A frame without a `country` column, such as one that was already
    /// preprocessed, is rejected.
    pub fn preprocess_data(df: &DataFrame) -> Result<Table, ProcessorError> {
        let key = df
            .column(COUNTRY_COLUMN)
            .map_err(|_| ProcessorError::MissingKeyColumn(COUNTRY_COLUMN.to_string()))?;
        let key = key.cast(&DataType::String)?;
        let index: Vec<String> = key
            .str()?
            .into_iter()
            .map(|name| name.unwrap_or_default().to_string())
            .collect();

        let rest = df.drop(COUNTRY_COLUMN)?;
        let columns = rest
            .get_columns()
            .iter()
            .map(|col| col.cast(&DataType::Float64))
            .collect::<PolarsResult<Vec<Column>>>()?;

        debug!("Preprocessed {} rows, {} columns", index.len(), columns.len());
        Ok(Table::new(index, DataFrame::new(columns)?)?)
    }

    /// Values of `group` at every sample year, in year order. `table` must be
    /// transposed so years are row keys.
    pub fn retrieve_data(table: &Table, group: &str) -> Result<Vec<f64>, ProcessorError> {
        YEARS
            .iter()
            .map(|year| Ok(table.value(&year.to_string(), group)?))
            .collect()
    }

    /// Values of each of `rows` at `year`, rounded to `decimals` places.
    pub fn values_at(
        table: &Table,
        rows: &[&str],
        year: i32,
        decimals: i32,
    ) -> Result<Vec<f64>, ProcessorError> {
        let column = year.to_string();
        rows.iter()
            .map(|row| Ok(Self::round_to(table.value(row, &column)?, decimals)))
            .collect()
    }

    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> DataFrame {
        df!(
            "country" => ["Brazil", "BRICS", "Europe"],
            "1990" => [1.0, 10.0, 100.0],
            "1995" => [2.0, 20.0, 200.0],
            "2000" => [3.0, 30.0, 300.0],
            "2005" => [4.0, 40.0, 400.0],
            "2010" => [5.0, 50.0, 500.0],
            "2015" => [6.0, 60.0, 600.0],
            "2020" => [7.0, 70.0, 1234.5678],
        )
        .unwrap()
    }

    #[test]
    fn preprocess_promotes_country_to_index() {
        let table = DataProcessor::preprocess_data(&raw()).unwrap();
        assert_eq!(table.index(), ["Brazil", "BRICS", "Europe"]);
        assert!(!table.columns().contains(&COUNTRY_COLUMN.to_string()));
        assert_eq!(table.columns().len(), 7);
        assert_eq!(table.value("Europe", "1995").unwrap(), 200.0);
    }

    #[test]
    fn preprocess_twice_fails() {
        let table = DataProcessor::preprocess_data(&raw()).unwrap();
        let again = DataProcessor::preprocess_data(table.frame());
        assert!(matches!(again, Err(ProcessorError::MissingKeyColumn(c)) if c == "country"));
    }

    #[test]
    fn preprocess_casts_integer_columns() {
        let df = df!(
            "country" => ["India"],
            "1990" => [12i64],
        )
        .unwrap();
        let table = DataProcessor::preprocess_data(&df).unwrap();
        assert_eq!(table.value("India", "1990").unwrap(), 12.0);
    }

    #[test]
    fn retrieve_data_returns_seven_values_in_year_order() {
        let table = DataProcessor::preprocess_data(&raw()).unwrap();
        let values = DataProcessor::retrieve_data(&table.transpose().unwrap(), "BRICS").unwrap();
        assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    }

    #[test]
    fn blank_and_padded_keys_are_kept() {
        let df = df!(
            "country" => [Some("Brazil "), None, None, Some("BRICS")],
            "1990" => [1.0, 2.0, 3.0, 10.0],
            "1995" => [1.0, 2.0, 3.0, 20.0],
            "2000" => [1.0, 2.0, 3.0, 30.0],
            "2005" => [1.0, 2.0, 3.0, 40.0],
            "2010" => [1.0, 2.0, 3.0, 50.0],
            "2015" => [1.0, 2.0, 3.0, 60.0],
            "2020" => [1.0, 2.0, 3.0, 70.0],
        )
        .unwrap();
        let table = DataProcessor::preprocess_data(&df).unwrap();
        assert_eq!(table.index(), ["Brazil ", "", "", "BRICS"]);
        assert!(matches!(
            table.value("Brazil", "1990"),
            Err(TableError::MissingRow(_))
        ));

        let values = DataProcessor::retrieve_data(&table.transpose().unwrap(), "BRICS").unwrap();
        assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    }

    #[test]
    fn retrieve_data_requires_every_year() {
        let df = df!(
            "country" => ["BRICS"],
            "1990" => [1.0],
            "2020" => [2.0],
        )
        .unwrap();
        let table = DataProcessor::preprocess_data(&df).unwrap();
        let result = DataProcessor::retrieve_data(&table.transpose().unwrap(), "BRICS");
        assert!(matches!(
            result,
            Err(ProcessorError::TableError(TableError::MissingRow(year))) if year == "1995"
        ));
    }

    #[test]
    fn retrieve_data_requires_group() {
        let table = DataProcessor::preprocess_data(&raw()).unwrap();
        let result = DataProcessor::retrieve_data(&table.transpose().unwrap(), "G7");
        assert!(matches!(
            result,
            Err(ProcessorError::TableError(TableError::MissingColumn(g))) if g == "G7"
        ));
    }

    #[test]
    fn values_at_rounds_to_two_places() {
        let table = DataProcessor::preprocess_data(&raw()).unwrap();
        let values = DataProcessor::values_at(&table, &["Europe", "Brazil"], 2020, 2).unwrap();
        assert_eq!(values, vec![1234.57, 7.0]);
    }

    #[test]
    fn round_to_handles_halves_and_negatives() {
        assert_eq!(DataProcessor::round_to(2.345, 1), 2.3);
        assert_eq!(DataProcessor::round_to(-10.126, 2), -10.13);
        assert_eq!(DataProcessor::round_to(3.0, 2), 3.0);
    }
}
