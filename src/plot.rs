//! Histogram of MAEcce with the test-set MAE marked.
//!
//! The figure is written to disk; the backend follows the file extension
//! (`.svg` for SVG, anything else for a bitmap such as PNG).

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const FIGURE_SIZE: (u32, u32) = (1024, 768);

/// Errors raised while rendering the histogram.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot: MAEcce has no values")]
    Empty,

    #[error("histogram needs at least one bin")]
    NoBins,

    #[error("drawing failed: {0}")]
    Drawing(String),
}

fn drawing<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Drawing(err.to_string())
}

/// Equal-width bin counts over the range of the data.
///
/// Every bin is half-open except the last, which also includes the maximum.
/// A constant sample gets the unit range centred on its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(values: &[f64], bins: usize) -> Result<Self, PlotError> {
        if bins == 0 {
            return Err(PlotError::NoBins);
        }
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Err(PlotError::Empty);
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|k| lo + width * k as f64).collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            let k = (((v - lo) / width) as usize).min(bins - 1);
            counts[k] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// `(left, right, count)` for each bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(move |(k, &c)| (self.edges[k], self.edges[k + 1], c))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Render the MAEcce histogram with the test MAE as a red point at
/// `marker_height`.
pub fn render_histogram(
    path: &Path,
    maecce: &[f64],
    test_mae: f64,
    bins: usize,
    marker_height: f64,
) -> Result<(), PlotError> {
    let histogram = Histogram::new(maecce, bins)?;

    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    let drawn = if is_svg {
        let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
        draw(&root, &histogram, test_mae, marker_height)
    } else {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        draw(&root, &histogram, test_mae, marker_height)
    };
    drawn?;

    log::info!("Wrote MAEcce histogram to {}", path.display());
    Ok(())
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    histogram: &Histogram,
    test_mae: f64,
    marker_height: f64,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(drawing)?;

    let first = histogram.edges[0];
    let last = histogram.edges[histogram.edges.len() - 1];
    let mut x_min = first.min(test_mae);
    let mut x_max = last.max(test_mae);
    let pad = (x_max - x_min) * 0.05;
    x_min -= pad;
    x_max += pad;
    let y_max = (histogram.max_count() as f64).max(marker_height) * 1.1;

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("MAEcce(histogram), MAEp(red point)")
        .y_desc("frequency")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(histogram.bars().map(|(left, right, count)| {
            Rectangle::new([(left, 0.0), (right, count as f64)], BLUE.mix(0.75).filled())
        }))
        .map_err(drawing)?;

    chart
        .draw_series(std::iter::once(Circle::new(
            (test_mae, marker_height),
            5,
            RED.filled(),
        )))
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts() {
        let values = [0.0, 0.1, 0.5, 0.9, 1.0];
        let hist = Histogram::new(&values, 2).unwrap();

        assert_eq!(hist.edges, vec![0.0, 0.5, 1.0]);
        // 0.5 opens the second bin; 1.0 closes the last
        assert_eq!(hist.counts, vec![2, 3]);
        assert_eq!(hist.max_count(), 3);
    }

    #[test]
    fn test_histogram_total_matches_input() {
        let values: Vec<f64> = (0..100).map(|i| ((i * 37) % 101) as f64 * 0.13).collect();
        let hist = Histogram::new(&values, 30).unwrap();
        assert_eq!(hist.counts.len(), 30);
        assert_eq!(hist.counts.iter().sum::<usize>(), 100);
    }

    #[test]
    fn test_histogram_constant_values() {
        let hist = Histogram::new(&[2.0, 2.0, 2.0], 4).unwrap();
        assert_eq!(hist.edges.first(), Some(&1.5));
        assert_eq!(hist.edges.last(), Some(&2.5));
        assert_eq!(hist.counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn test_histogram_errors() {
        assert!(matches!(Histogram::new(&[], 3), Err(PlotError::Empty)));
        assert!(matches!(Histogram::new(&[f64::NAN], 3), Err(PlotError::Empty)));
        assert!(matches!(Histogram::new(&[1.0], 0), Err(PlotError::NoBins)));
    }

    #[test]
    fn test_render_svg() {
        let path = std::env::temp_dir().join(format!("maecce-plot-{}.svg", std::process::id()));
        let values: Vec<f64> = (0..50).map(|i| 20.0 + (i as f64 * 0.7).sin() * 3.0).collect();

        render_histogram(&path, &values, 18.0, 30, 0.2).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("<svg"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_render_png() {
        let path = std::env::temp_dir().join(format!("maecce-plot-{}.png", std::process::id()));
        let values: Vec<f64> = (0..50).map(|i| 20.0 + (i as f64 * 0.7).cos() * 3.0).collect();

        render_histogram(&path, &values, 25.0, 30, 0.2).unwrap();

        let size = std::fs::metadata(&path).unwrap().len();
        std::fs::remove_file(&path).ok();
        assert!(size > 0);
    }

    #[test]
    fn test_render_into_missing_directory() {
        let path = std::path::Path::new("/nonexistent_maecce_dir/hist.png");
        let result = render_histogram(path, &[1.0, 2.0, 3.0], 2.0, 5, 0.2);
        assert!(matches!(result, Err(PlotError::Drawing(_))));
    }
}
