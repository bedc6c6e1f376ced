//! Static Chart Renderer
//! Draws the four dashboard panels onto plotters drawing areas.
//!
//! Panels:
//! 1. Energy consumption of the BRICS members (line chart)
//! 2. BRICS consumption vs production at the sample years (horizontal bars)
//! 3. Energy consumption by world region (pie chart)
//! 4. Energy trade balance of the BRICS members (line chart)
//!
//! Every renderer reads its data before drawing anything, so a missing
//! row or column leaves the drawing area untouched.

use super::geometry::{bar_range, pie_slices, polar_point, value_range, wedge_points};
use super::RenderError;
use crate::config::{
    DashboardConfig, BAR_ALPHA, BAR_HEIGHT, BAR_OFFSET, BRICS, CAPTION_FONT_PT,
    CONSUMPTION_COLOR, DISTRIBUTION_DECIMALS, DISTRIBUTION_YEAR, LABEL_FONT_PT, PIE_START_ANGLE,
    PRODUCTION_COLOR, REGIONS, TICK_FONT_PT, TREND_END, TREND_START, YEARS,
};
use crate::data::{DataProcessor, NamedSeries, Table};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

const FONT: &str = "sans-serif";

/// Pixel sizes for one figure resolution.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub caption: f64,
    pub label: f64,
    pub tick: f64,
    pub stroke: u32,
    pub margin: u32,
}

impl ChartStyle {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            caption: config.points_to_pixels(CAPTION_FONT_PT),
            label: config.points_to_pixels(LABEL_FONT_PT),
            tick: config.points_to_pixels(TICK_FONT_PT),
            stroke: config.points_to_pixels(1.5).round().max(1.0) as u32,
            margin: config.points_to_pixels(8.0).round().max(1.0) as u32,
        }
    }

    /// Room for tick labels plus the axis description.
    fn label_area(&self) -> u32 {
        (self.tick * 2.0 + self.label * 2.0).round() as u32
    }

    /// Width of a legend glyph.
    fn legend_len(&self) -> i32 {
        (self.label * 1.6).round() as i32
    }
}

fn text_style(size: f64, color: &RGBColor, pos: Pos) -> TextStyle<'static> {
    (FONT, size).into_font().color(color).pos(pos)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// BRICS energy consumption, one line per member over 1995-2020.
    pub fn draw_energy_consumption<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        consumption: &Table,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        let lines = BRICS
            .iter()
            .map(|e| {
                let series = consumption.row_range(e.name, TREND_START, TREND_END)?;
                Ok((e.name, e.color, series))
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        Self::draw_trend(
            area,
            &lines,
            "Energy Consumption (1995-2020)",
            "Energy Consumption (Mtoe)",
            style,
        )
    }

    /// BRICS consumption and production side by side at each sample year.
    pub fn draw_comparison<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        consumption: &[f64],
        production: &[f64],
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        if consumption.len() != YEARS.len() || production.len() != YEARS.len() {
            return Err(RenderError::SeriesLengthMismatch {
                consumption: consumption.len(),
                production: production.len(),
                expected: YEARS.len(),
            });
        }

        let all: Vec<f64> = consumption.iter().chain(production).copied().collect();
        let (x_min, x_max) = bar_range(&all);
        let y_min = YEARS[0] as f64 - 3.0;
        let y_max = YEARS[YEARS.len() - 1] as f64 + 3.0;

        let mut chart = ChartBuilder::on(area)
            .caption("BRICS Energy Production vs Consumption", (FONT, style.caption))
            .margin(style.margin)
            .x_label_area_size(style.label_area())
            .y_label_area_size(style.label_area())
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("Energy (Mtoe)")
            .y_desc("Years")
            .y_labels(8)
            .y_label_formatter(&|y: &f64| format!("{:.0}", y))
            .label_style((FONT, style.tick))
            .axis_desc_style((FONT, style.label))
            .draw()?;

        let half = (style.label / 2.0).round() as i32;
        let legend_len = style.legend_len();
        let bars = [
            ("Consumption", consumption, -BAR_OFFSET, CONSUMPTION_COLOR),
            ("Production", production, BAR_OFFSET, PRODUCTION_COLOR),
        ];

        for (label, values, offset, color) in bars {
            let fill = color.mix(BAR_ALPHA).filled();
            chart
                .draw_series(
                    YEARS
                        .iter()
                        .zip(values)
                        .filter(|(_, v)| v.is_finite())
                        .map(|(year, &v)| {
                            let center = *year as f64 + offset;
                            Rectangle::new(
                                [(0.0, center - BAR_HEIGHT / 2.0), (v, center + BAR_HEIGHT / 2.0)],
                                fill,
                            )
                        }),
                )?
                .label(label)
                .legend(move |(x, y)| Rectangle::new([(x, y - half), (x + legend_len, y + half)], fill));
        }

        Self::draw_legend(&mut chart, style)?;
        debug!("Drew comparison for {} years", YEARS.len());
        Ok(())
    }

    /// Share of each world region in 2020 energy consumption.
    pub fn draw_energy_distribution<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        consumption: &Table,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        let names: Vec<&str> = REGIONS.iter().map(|r| r.name).collect();
        let sizes = DataProcessor::values_at(
            consumption,
            &names,
            DISTRIBUTION_YEAR,
            DISTRIBUTION_DECIMALS,
        )?;
        let slices = pie_slices(&sizes, PIE_START_ANGLE)?;

        let area = area.titled(
            "Energy Consumption by Region in 2020",
            (FONT, style.caption),
        )?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = w.min(h) as f64 * 0.36;

        for (region, slice) in REGIONS.iter().zip(&slices) {
            area.draw(&Polygon::new(
                wedge_points(center, radius, slice),
                region.color.filled(),
            ))?;
        }

        for (region, slice) in REGIONS.iter().zip(&slices) {
            let mid = slice.mid_deg();
            let h_pos = if mid.to_radians().cos() >= 0.0 {
                HPos::Left
            } else {
                HPos::Right
            };

            area.draw(&Text::new(
                region.name,
                polar_point(center, radius * 1.1, mid),
                text_style(style.label, &BLACK, Pos::new(h_pos, VPos::Center)),
            ))?;
            area.draw(&Text::new(
                format!("{:.1}%", slice.percent),
                polar_point(center, radius * 0.6, mid),
                text_style(style.label, &BLACK, Pos::new(HPos::Center, VPos::Center)),
            ))?;
        }

        debug!("Drew distribution: {:?}", sizes);
        Ok(())
    }

    /// BRICS energy trade balance, one line per member over 1995-2020.
    pub fn draw_trade_balance<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        trade_balance: &Table,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        let lines = BRICS
            .iter()
            .map(|e| {
                let series = trade_balance.row_range(e.name, TREND_START, TREND_END)?;
                Ok((e.short_label, e.color, series))
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        Self::draw_trend(
            area,
            &lines,
            "Energy Trade Balance (1995-2020)",
            "Energy Trade Balance (Mtoe)",
            style,
        )
    }

    fn draw_trend<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        lines: &[(&str, RGBColor, NamedSeries)],
        title: &str,
        y_desc: &str,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        let values: Vec<f64> = lines
            .iter()
            .flat_map(|(_, _, series)| series.points.iter().map(|&(_, v)| v))
            .collect();
        let (y_min, y_max) = value_range(&values);

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, style.caption))
            .margin(style.margin)
            .x_label_area_size(style.label_area())
            .y_label_area_size(style.label_area())
            .build_cartesian_2d(TREND_START..TREND_END, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("Year")
            .y_desc(y_desc)
            .x_labels(6)
            .label_style((FONT, style.tick))
            .axis_desc_style((FONT, style.label))
            .draw()?;

        let stroke = style.stroke;
        let legend_len = style.legend_len();
        for (label, color, series) in lines {
            let color = *color;
            chart
                .draw_series(LineSeries::new(
                    series.finite_points(),
                    color.stroke_width(stroke),
                ))?
                .label(*label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + legend_len, y)], color.stroke_width(stroke))
                });
        }

        Self::draw_legend(&mut chart, style)?;
        debug!("Drew {} with {} lines", title, lines.len());
        Ok(())
    }

    fn draw_legend<'a, DB: DrawingBackend + 'a, X: Ranged, Y: Ranged>(
        chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
        style: &ChartStyle,
    ) -> Result<(), RenderError> {
        chart
            .configure_series_labels()
            .label_font((FONT, style.label))
            .legend_area_size(style.legend_len() + style.margin as i32)
            .background_style(WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::RenderError;
    use crate::data::TableError;
    use polars::prelude::*;

    fn style() -> ChartStyle {
        ChartStyle::from_config(&DashboardConfig::default().with_dpi(50))
    }

    fn blank_area(buffer: &mut [u8]) -> DrawingArea<BitMapBackend<'_>, Shift> {
        BitMapBackend::with_buffer(buffer, (400, 300)).into_drawing_area()
    }

    fn table_without(row: &str) -> Table {
        let names: Vec<&str> = ["Brazil", "Russia", "India", "China", "South Africa"]
            .into_iter()
            .filter(|n| *n != row)
            .collect();
        let mut columns = Vec::new();
        for year in TREND_START..=TREND_END {
            columns.push(Column::new(
                year.to_string().into(),
                vec![1.0f64; names.len()],
            ));
        }
        Table::new(
            names.iter().map(|s| s.to_string()).collect(),
            DataFrame::new(columns).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn style_scales_with_dpi() {
        let s = ChartStyle::from_config(&DashboardConfig::default());
        assert!((s.label - 10.0 * 300.0 / 72.0).abs() < 1e-9);
        assert!(s.caption > s.label && s.label > s.tick);
    }

    #[test]
    fn consumption_fails_on_missing_member() {
        let mut buffer = vec![255u8; 400 * 300 * 3];
        let area = blank_area(&mut buffer);
        let result =
            StaticChartRenderer::draw_energy_consumption(&area, &table_without("India"), &style());
        assert!(matches!(
            result,
            Err(RenderError::TableError(TableError::MissingRow(r))) if r == "India"
        ));
    }

    #[test]
    fn trade_balance_fails_on_missing_member() {
        let mut buffer = vec![255u8; 400 * 300 * 3];
        let area = blank_area(&mut buffer);
        let result =
            StaticChartRenderer::draw_trade_balance(&area, &table_without("South Africa"), &style());
        assert!(matches!(
            result,
            Err(RenderError::TableError(TableError::MissingRow(r))) if r == "South Africa"
        ));
    }

    #[test]
    fn distribution_fails_without_regions() {
        let mut buffer = vec![255u8; 400 * 300 * 3];
        let area = blank_area(&mut buffer);
        let result =
            StaticChartRenderer::draw_energy_distribution(&area, &table_without(""), &style());
        assert!(matches!(result, Err(RenderError::ProcessorError(_))));
    }

    #[test]
    fn comparison_rejects_mismatched_series() {
        let mut buffer = vec![255u8; 400 * 300 * 3];
        let area = blank_area(&mut buffer);
        let result =
            StaticChartRenderer::draw_comparison(&area, &[1.0; 7], &[1.0; 6], &style());
        assert!(matches!(
            result,
            Err(RenderError::SeriesLengthMismatch {
                consumption: 7,
                production: 6,
                expected: 7
            })
        ));
    }

    #[test]
    fn lookup_failure_leaves_area_untouched() {
        let mut buffer = vec![255u8; 400 * 300 * 3];
        {
            let area = blank_area(&mut buffer);
            let _ = StaticChartRenderer::draw_energy_consumption(
                &area,
                &table_without("China"),
                &style(),
            );
            area.present().unwrap();
        }
        assert!(buffer.iter().all(|&b| b == 255));
    }
}
