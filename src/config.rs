//! Dashboard Configuration
//! Fixed years, entity lists, palettes, text blocks and file locations.

use plotters::style::RGBColor;
use std::path::{Path, PathBuf};

/// Column holding entity names in every source spreadsheet.
pub const COUNTRY_COLUMN: &str = "country";

/// Row holding the BRICS aggregate, used by the comparison chart.
pub const BRICS_GROUP: &str = "BRICS";

/// Sample years for the production vs consumption comparison.
pub const YEARS: [i32; 7] = [1990, 1995, 2000, 2005, 2010, 2015, 2020];

/// Inclusive year range of the line charts.
pub const TREND_START: i32 = 1995;
pub const TREND_END: i32 = 2020;

/// Year shown by the regional distribution pie.
pub const DISTRIBUTION_YEAR: i32 = 2020;

/// Pie wedges are laid out counter-clockwise from this angle.
pub const PIE_START_ANGLE: f64 = 90.0;

/// Decimal places kept for pie wedge values.
pub const DISTRIBUTION_DECIMALS: i32 = 2;

/// A named row drawn with a fixed color.
#[derive(Debug, Clone, Copy)]
pub struct Entity {
    /// Row key in the table.
    pub name: &'static str,
    /// Short legend label, where one is used.
    pub short_label: &'static str,
    pub color: RGBColor,
}

impl Entity {
    const fn new(name: &'static str, short_label: &'static str, color: RGBColor) -> Self {
        Self {
            name,
            short_label,
            color,
        }
    }
}

pub const BRAZIL_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4); // Blue
pub const RUSSIA_COLOR: RGBColor = RGBColor(0xff, 0x7f, 0x0e); // Orange
pub const INDIA_COLOR: RGBColor = RGBColor(0x2c, 0xa0, 0x2c); // Green
pub const CHINA_COLOR: RGBColor = RGBColor(0x94, 0x67, 0xbd); // Purple
pub const SOUTH_AFRICA_COLOR: RGBColor = RGBColor(0xd6, 0x27, 0x28); // Red

/// BRICS members in legend order.
pub const BRICS: [Entity; 5] = [
    Entity::new("Brazil", "Brazil", BRAZIL_COLOR),
    Entity::new("Russia", "Russia", RUSSIA_COLOR),
    Entity::new("India", "India", INDIA_COLOR),
    Entity::new("China", "China", CHINA_COLOR),
    Entity::new("South Africa", "S. Africa", SOUTH_AFRICA_COLOR),
];

/// World regions shown in the distribution pie, counter-clockwise from the top.
pub const REGIONS: [Entity; 7] = [
    Entity::new("Europe", "Europe", RGBColor(0x00, 0x3f, 0x5c)),
    Entity::new("CIS", "CIS", RGBColor(0x2f, 0x4b, 0x7c)),
    Entity::new("North America", "North America", RGBColor(0x66, 0x51, 0x91)),
    Entity::new("Latin America", "Latin America", RGBColor(0xa0, 0x51, 0x95)),
    Entity::new("Asia", "Asia", RGBColor(0xd4, 0x50, 0x87)),
    Entity::new("Africa", "Africa", RGBColor(0xf9, 0x5d, 0x6a)),
    Entity::new("Middle-East", "Middle-East", RGBColor(0xff, 0x7c, 0x43)),
];

pub const CONSUMPTION_COLOR: RGBColor = BRAZIL_COLOR;
pub const PRODUCTION_COLOR: RGBColor = RUSSIA_COLOR;
pub const BAR_ALPHA: f64 = 0.7;
pub const BAR_HEIGHT: f64 = 0.5;
pub const BAR_OFFSET: f64 = 0.5;

pub const DASHBOARD_TITLE: &str = "Analysis of BRICS Energy Consumption and Production";

/// Static narrative. The figures quoted here are not derived from the data.
pub const NARRATIVE: &str = "\nThis dashboard analyzes Energy.\n  \
1.the countries BRICS Countries showed rise in energy consumption especially China they went 3400 from 1000.   \
2. by 2015 consumption of energy overtook production of BRiCS countries .\n  \
3.  world's year 2020 total energy usage 13356.23 Twh\n  \
4. most countries are surplus of energy or stable balance \n    \
Russia deficit reached below 600 by 2020.";

pub const ATTRIBUTION: &str = "Compiled by: D. Gaddam\nID: 22084021";

// Font sizes in points
pub const TITLE_FONT_PT: f64 = 16.0;
pub const TEXT_FONT_PT: f64 = 10.0;
pub const CAPTION_FONT_PT: f64 = 12.0;
pub const LABEL_FONT_PT: f64 = 10.0;
pub const TICK_FONT_PT: f64 = 9.0;

pub const CONSUMPTION_FILE: &str = "totalenergyconsumption.xlsx";
pub const PRODUCTION_FILE: &str = "totalenergyproduction.xlsx";
pub const TRADE_BALANCE_FILE: &str = "tradebalance.xlsx";
pub const OUTPUT_FILE: &str = "22084021.png";

/// File locations and figure geometry for one dashboard run.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub consumption_path: PathBuf,
    pub production_path: PathBuf,
    pub trade_balance_path: PathBuf,
    pub output_path: PathBuf,
    /// Figure size in inches (width, height).
    pub figure_size: (f64, f64),
    pub dpi: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            consumption_path: PathBuf::from(CONSUMPTION_FILE),
            production_path: PathBuf::from(PRODUCTION_FILE),
            trade_balance_path: PathBuf::from(TRADE_BALANCE_FILE),
            output_path: PathBuf::from(OUTPUT_FILE),
            figure_size: (15.0, 10.0),
            dpi: 300,
        }
    }
}

impl DashboardConfig {
    /// Same file names, resolved inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            consumption_path: dir.join(CONSUMPTION_FILE),
            production_path: dir.join(PRODUCTION_FILE),
            trade_balance_path: dir.join(TRADE_BALANCE_FILE),
            output_path: dir.join(OUTPUT_FILE),
            ..Self::default()
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        (
            (w * self.dpi as f64).round() as u32,
            (h * self.dpi as f64).round() as u32,
        )
    }

    /// Convert a point size to pixels at this DPI.
    pub fn points_to_pixels(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }
}
