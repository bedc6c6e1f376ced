//! Charts module - static chart rendering onto plotters drawing areas

mod geometry;
mod renderer;

pub use geometry::{bar_range, pie_slices, value_range, PieSlice};
pub use renderer::{ChartStyle, StaticChartRenderer};

use crate::data::{ProcessorError, TableError};
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Table lookup failed: {0}")]
    TableError(#[from] TableError),
    #[error("Data preparation failed: {0}")]
    ProcessorError(#[from] ProcessorError),
    #[error("Drawing failed: {0}")]
    DrawingError(String),
    #[error("Series lengths differ: {consumption} consumption vs {production} production, expected {expected}")]
    SeriesLengthMismatch {
        consumption: usize,
        production: usize,
        expected: usize,
    },
    #[error("Invalid pie values: {0}")]
    InvalidSlices(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::DrawingError(e.to_string())
    }
}
