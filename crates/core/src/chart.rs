//! Pie chart rendering.
//!
//! Charts are rasterised to PNG and returned as `data:` URIs so they can be
//! embedded directly in a page. Labels are not drawn into the image; they
//! travel alongside it in [`ChartSlice`] so the client can build a legend.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, Rgba, RgbaImage};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

const WIDTH: u32 = 600;
const HEIGHT: u32 = 450;
const RADIUS: f64 = 180.0;
/// Half width of the white wedge separators, in pixels.
const SEPARATOR_HALF_WIDTH: f64 = 1.0;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 0]);
const SEPARATOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Pastel palette used when no usable colors are given.
const DEFAULT_PALETTE: [&str; 9] = [
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
    "#f2f2f2",
];

/// One wedge of a rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    /// Category label.
    pub label: String,
    /// Count in the category.
    pub value: u64,
    /// Share of the total, one decimal place.
    pub percent: Decimal,
    /// Fill color as `#rrggbb`.
    pub color: String,
}

/// A rendered chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartImage {
    /// Chart title.
    pub title: String,
    /// Wedges in drawing order.
    pub slices: Vec<ChartSlice>,
    /// `data:image/png;base64,...` URI.
    pub data_uri: String,
}

/// Renders a pie chart.
///
/// Returns `None` when there is nothing to draw: empty input, mismatched
/// `values`/`labels` lengths, or all values zero. `colors` is used only if
/// it covers every value and each entry is a valid `#rrggbb` color.
pub fn render_pie_chart(
    values: &[u64],
    labels: &[&str],
    title: &str,
    colors: Option<&[&str]>,
) -> Option<ChartImage> {
    if values.is_empty() || labels.is_empty() || values.len() != labels.len() {
        warn!(title, "Invalid data or labels for chart, skipping");
        return None;
    }
    let total: u64 = values.iter().sum();
    if total == 0 {
        info!(title, "No data to plot for chart, skipping");
        return None;
    }

    let palette = pick_palette(colors, values.len());
    let image = draw_pie(values, total, &palette);

    let mut png = Vec::new();
    if let Err(e) = image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png) {
        warn!(title, error = %e, "Failed to encode chart");
        return None;
    }

    let slices = values
        .iter()
        .zip(labels)
        .zip(&palette)
        .map(|((&value, &label), (hex, _))| ChartSlice {
            label: label.to_string(),
            value,
            percent: percent_of(value, total),
            color: (*hex).to_string(),
        })
        .collect();

    Some(ChartImage {
        title: title.to_string(),
        slices,
        data_uri: format!("data:image/png;base64,{}", STANDARD.encode(png)),
    })
}

fn pick_palette<'a>(colors: Option<&[&'a str]>, len: usize) -> Vec<(&'a str, Rgba<u8>)> {
    if let Some(colors) = colors.filter(|c| c.len() >= len) {
        let parsed: Option<Vec<_>> = colors[..len]
            .iter()
            .map(|hex| parse_hex(hex).map(|rgba| (*hex, rgba)))
            .collect();
        if let Some(parsed) = parsed {
            return parsed;
        }
    }

    DEFAULT_PALETTE
        .iter()
        .cycle()
        .take(len)
        .filter_map(|hex| parse_hex(hex).map(|rgba| (*hex, rgba)))
        .collect()
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

fn percent_of(value: u64, total: u64) -> Decimal {
    (Decimal::from(value) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(1)
}

/// Draws wedges counter-clockwise from 12 o'clock.
#[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
fn draw_pie(values: &[u64], total: u64, palette: &[(&str, Rgba<u8>)]) -> image::DynamicImage {
    use std::f64::consts::TAU;

    // Cumulative wedge end angles, in radians from 12 o'clock.
    let mut boundaries = Vec::with_capacity(values.len());
    let mut running = 0u64;
    for &value in values {
        running += value;
        boundaries.push(running as f64 / total as f64 * TAU);
    }
    let visible_wedges = values.iter().filter(|&&v| v > 0).count();

    let cx = f64::from(WIDTH) / 2.0;
    let cy = f64::from(HEIGHT) / 2.0;

    let image = RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| {
        let dx = f64::from(x) + 0.5 - cx;
        let dy = cy - (f64::from(y) + 0.5);
        let distance = dx.hypot(dy);
        if distance > RADIUS {
            return BACKGROUND;
        }

        let angle = (-dx).atan2(dy).rem_euclid(TAU);

        if visible_wedges > 1 {
            let near_edge = std::iter::once(0.0)
                .chain(boundaries.iter().copied())
                .any(|edge| {
                    let gap = (angle - edge).abs();
                    gap.min(TAU - gap) * distance <= SEPARATOR_HALF_WIDTH
                });
            if near_edge {
                return SEPARATOR;
            }
        }

        let wedge = boundaries
            .iter()
            .position(|&end| angle < end)
            .unwrap_or(boundaries.len() - 1);
        palette[wedge].1
    });

    image::DynamicImage::ImageRgba8(image)
}
