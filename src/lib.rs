//! BRICS Energy Dashboard
//!
//! Loads energy consumption, production and trade balance spreadsheets and
//! renders a 2x2 dashboard of charts with a narrative into a single PNG.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;

pub use config::DashboardConfig;
pub use dashboard::{create_dashboard, DashboardData, DashboardError};
