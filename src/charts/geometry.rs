//! Chart geometry helpers: axis ranges and pie wedges.

use super::RenderError;

/// One pie wedge. Angles are degrees counter-clockwise from the +x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub start_deg: f64,
    pub end_deg: f64,
    pub percent: f64,
}

impl PieSlice {
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Axis range covering every finite value, padded by 5% on each side.
pub fn value_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min.is_infinite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Like `value_range`, but bars grow from zero so zero is always inside.
pub fn bar_range(values: &[f64]) -> (f64, f64) {
    let mut with_zero = values.to_vec();
    with_zero.push(0.0);
    value_range(&with_zero)
}

/// Split a full turn into wedges proportional to `sizes`, laid out
/// counter-clockwise from `start_angle`.
pub fn pie_slices(sizes: &[f64], start_angle: f64) -> Result<Vec<PieSlice>, RenderError> {
    if let Some(bad) = sizes.iter().find(|v| !v.is_finite() || **v < 0.0) {
        return Err(RenderError::InvalidSlices(format!(
            "wedge size must be finite and non-negative, got {}",
            bad
        )));
    }
    let total: f64 = sizes.iter().sum();
    if total <= 0.0 {
        return Err(RenderError::InvalidSlices("wedge sizes sum to zero".into()));
    }

    let mut start = start_angle;
    Ok(sizes
        .iter()
        .map(|&v| {
            let fraction = v / total;
            let end = start + 360.0 * fraction;
            let slice = PieSlice {
                start_deg: start,
                end_deg: end,
                percent: 100.0 * fraction,
            };
            start = end;
            slice
        })
        .collect())
}

/// Pixel position at `radius` from `center` along `deg`. Pixel y grows
/// downwards, so positive angles move up.
pub fn polar_point(center: (i32, i32), radius: f64, deg: f64) -> (i32, i32) {
    let theta = deg.to_radians();
    (
        center.0 + (radius * theta.cos()).round() as i32,
        center.1 - (radius * theta.sin()).round() as i32,
    )
}

/// Closed outline of a wedge: the center followed by arc points at most
/// one degree apart.
pub fn wedge_points(center: (i32, i32), radius: f64, slice: &PieSlice) -> Vec<(i32, i32)> {
    let sweep = slice.end_deg - slice.start_deg;
    let steps = sweep.abs().ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let deg = slice.start_deg + sweep * i as f64 / steps as f64;
        points.push(polar_point(center, radius, deg));
    }
    points
}
