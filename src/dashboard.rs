//! Dashboard Assembler
//! Loads the three sources, lays the four charts out on a 2x2 grid with
//! title and footer text, and writes the figure as a single PNG.

use crate::charts::{ChartStyle, RenderError, StaticChartRenderer};
use crate::config::{
    DashboardConfig, ATTRIBUTION, BRICS_GROUP, DASHBOARD_TITLE, NARRATIVE, TEXT_FONT_PT,
    TITLE_FONT_PT,
};
use crate::data::{DataLoader, DataProcessor, LoaderError, ProcessorError, Table, TableError};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to load data: {0}")]
    LoaderError(#[from] LoaderError),
    #[error("Failed to prepare data: {0}")]
    ProcessorError(#[from] ProcessorError),
    #[error("Table error: {0}")]
    TableError(#[from] TableError),
    #[error("Failed to render chart: {0}")]
    RenderError(#[from] RenderError),
    #[error("Failed to create output file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to encode PNG: {0}")]
    PngError(#[from] png::EncodingError),
    #[error("Pixel buffer does not match a {0}x{1} figure")]
    BufferSize(u32, u32),
}

/// The three preprocessed tables shared by every chart.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub consumption: Table,
    pub production: Table,
    pub trade_balance: Table,
}

impl DashboardData {
    /// Load and re-key the consumption, production and trade balance sources.
    pub fn load(config: &DashboardConfig) -> Result<Self, DashboardError> {
        Ok(Self {
            consumption: Self::load_table(&config.consumption_path)?,
            production: Self::load_table(&config.production_path)?,
            trade_balance: Self::load_table(&config.trade_balance_path)?,
        })
    }

    fn load_table(path: &Path) -> Result<Table, DashboardError> {
        let df = DataLoader::load_excel(path)?;
        Ok(DataProcessor::preprocess_data(&df)?)
    }

    /// BRICS aggregate consumption and production at the sample years.
    pub fn brics_comparison(&self) -> Result<(Vec<f64>, Vec<f64>), DashboardError> {
        let consumption =
            DataProcessor::retrieve_data(&self.consumption.transpose()?, BRICS_GROUP)?;
        let production = DataProcessor::retrieve_data(&self.production.transpose()?, BRICS_GROUP)?;
        debug!(
            "BRICS consumption {:?}, production {:?}",
            consumption, production
        );
        Ok((consumption, production))
    }
}

/// Pixel geometry of the title band, chart grid and footer band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    pub title_px: f64,
    pub text_px: f64,
    pub line_height: f64,
    /// Height reserved above the grid.
    pub title_band: i32,
    /// Height reserved below the grid.
    pub footer_band: i32,
}

impl FigureLayout {
    pub fn new(config: &DashboardConfig) -> Self {
        let (width, height) = config.pixel_size();
        let h = height as f64;
        let text_px = config.points_to_pixels(TEXT_FONT_PT);
        let line_height = text_px * 1.2;
        let footer_lines = NARRATIVE.lines().count().max(ATTRIBUTION.lines().count());
        let footer_text = footer_lines as f64 * line_height + 0.01 * h;

        Self {
            width,
            height,
            title_px: config.points_to_pixels(TITLE_FONT_PT),
            text_px,
            line_height,
            title_band: (0.05 * h).round() as i32,
            footer_band: footer_text.max(0.03 * h).ceil() as i32,
        }
    }

    pub fn grid_height(&self) -> i32 {
        (self.height as i32 - self.title_band - self.footer_band).max(1)
    }
}

/// Render the dashboard when `plot` is set; otherwise do nothing.
pub fn create_dashboard(
    plot: bool,
    data: &DashboardData,
    config: &DashboardConfig,
) -> Result<(), DashboardError> {
    if !plot {
        debug!("Dashboard disabled, nothing written");
        return Ok(());
    }

    let layout = FigureLayout::new(config);
    let (width, height) = (layout.width, layout.height);
    let style = ChartStyle::from_config(config);
    let (brics_consumption, brics_production) = data.brics_comparison()?;

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::from)?;

        let (_, body) = root.split_vertically(layout.title_band);
        let (grid, _) = body.split_vertically(layout.grid_height());
        let cells = grid.split_evenly((2, 2));

        StaticChartRenderer::draw_energy_consumption(&cells[0], &data.consumption, &style)?;
        StaticChartRenderer::draw_comparison(
            &cells[1],
            &brics_consumption,
            &brics_production,
            &style,
        )?;
        StaticChartRenderer::draw_energy_distribution(&cells[2], &data.consumption, &style)?;
        StaticChartRenderer::draw_trade_balance(&cells[3], &data.trade_balance, &style)?;

        draw_text_blocks(&root, &layout)?;
        root.present().map_err(RenderError::from)?;
    }

    let image =
        RgbImage::from_raw(width, height, buffer).ok_or(DashboardError::BufferSize(width, height))?;
    write_png(&image, config.dpi, &config.output_path)?;

    info!(
        "Dashboard written to {} ({}x{} px, {} dpi)",
        config.output_path.display(),
        width,
        height,
        config.dpi
    );
    Ok(())
}

/// Pixels per meter at `dpi`, as stored in the PNG pHYs chunk.
pub fn pixels_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / 0.0254).round() as u32
}

/// Encode `image` as 8-bit RGB PNG with its resolution recorded.
fn write_png(image: &RgbImage, dpi: u32, path: &Path) -> Result<(), DashboardError> {
    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = pixels_per_meter(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}

/// Bold title at the top, narrative bottom-left, attribution bottom-right.
fn draw_text_blocks<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &FigureLayout,
) -> Result<(), RenderError> {
    let w = layout.width as f64;
    let h = layout.height as f64;

    let title_style = ("sans-serif", layout.title_px)
        .into_font()
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(
        DASHBOARD_TITLE,
        ((w / 2.0) as i32, (0.01 * h) as i32),
        title_style,
    ))?;

    let bottom = h - 0.01 * h;
    draw_block(root, NARRATIVE, (0.01 * w) as i32, bottom, HPos::Left, layout)?;
    draw_block(root, ATTRIBUTION, (0.95 * w) as i32, bottom, HPos::Right, layout)?;
    Ok(())
}

/// Draw `text` line by line so its last line sits on `bottom`.
fn draw_block<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    text: &str,
    x: i32,
    bottom: f64,
    align: HPos,
    layout: &FigureLayout,
) -> Result<(), RenderError> {
    let lines: Vec<&str> = text.split('\n').collect();
    let n = lines.len();
    for (k, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let y = bottom - (n - 1 - k) as f64 * layout.line_height;
        let style = ("sans-serif", layout.text_px)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(align, VPos::Bottom));
        root.draw(&Text::new(*line, (x, y as i32), style))?;
    }
    Ok(())
}
