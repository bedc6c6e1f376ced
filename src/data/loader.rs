//! Spreadsheet Data Loader Module
//! Reads the first worksheet of an .xlsx workbook into a Polars DataFrame.

use calamine::{open_workbook_auto, Data, Range, Reader};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read workbook {path}: {source}")]
    WorkbookError {
        path: String,
        #[source]
        source: calamine::Error,
    },
    #[error("Workbook has no worksheets: {0}")]
    NoWorksheet(String),
    #[error("Worksheet has no header row: {0}")]
    EmptySheet(String),
    #[error("Failed to build DataFrame: {0}")]
    PolarsError(#[from] PolarsError),
}

static EMPTY_CELL: Data = Data::Empty;

/// Loads spreadsheet sources. The first row holds column names.
pub struct DataLoader;

impl DataLoader {
    /// Load the first worksheet of `path`.
    pub fn load_excel(path: &Path) -> Result<DataFrame, LoaderError> {
        let source_name = path.display().to_string();
        let workbook_error = |source| LoaderError::WorkbookError {
            path: source_name.clone(),
            source,
        };

        let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoaderError::NoWorksheet(source_name.clone()))?
            .map_err(workbook_error)?;

        let df = Self::range_to_dataframe(&range).map_err(|e| match e {
            LoaderError::EmptySheet(_) => LoaderError::EmptySheet(source_name.clone()),
            other => other,
        })?;

        info!(
            "Loaded {}: {} rows x {} columns",
            source_name,
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Convert a cell range into columns: numeric columns become Float64,
    /// everything else String.
    pub fn range_to_dataframe(range: &Range<Data>) -> Result<DataFrame, LoaderError> {
        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| LoaderError::EmptySheet(String::new()))?;
        let names: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| Self::header_name(i, cell))
            .collect();

        let body: Vec<&[Data]> = rows.collect();
        let mut columns = Vec::with_capacity(names.len());

        for (j, name) in names.iter().enumerate() {
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(j).unwrap_or(&EMPTY_CELL))
                .collect();

            let numeric = cells
                .iter()
                .all(|cell| matches!(cell, Data::Empty) || Self::numeric(cell).is_some());

            let column = if numeric {
                let values: Vec<Option<f64>> = cells.iter().map(|c| Self::numeric(c)).collect();
                Column::new(name.as_str().into(), values)
            } else {
                let values: Vec<Option<String>> = cells.iter().map(|c| Self::text(c)).collect();
                Column::new(name.as_str().into(), values)
            };
            debug!("Column {} ({})", name, column.dtype());
            columns.push(column);
        }

        Ok(DataFrame::new(columns)?)
    }

    /// Column label for header cell `i`. Whole numbers print without a
    /// fraction so year headers read "1990". Text headers are kept verbatim.
    fn header_name(i: usize, cell: &Data) -> String {
        match cell {
            Data::Empty => format!("Unnamed: {}", i),
            Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
            Data::Int(n) => n.to_string(),
            Data::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn numeric(cell: &Data) -> Option<f64> {
        match cell {
            Data::Float(f) => Some(*f),
            Data::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    fn text(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty => None,
            Data::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
