// src/visualization/distribution.rs
//! Terminal violin plot for eyeballing a score distribution.
//!
//! The outline is a Gaussian kernel density estimate (Scott's rule bandwidth, cut at
//! two bandwidths past the data) mirrored around a center line. The center line
//! marks the range with `-`, the interquartile range with `=` and the median with `o`.

use log::warn;
use std::f64::consts::PI;
use std::io::{self, Write};

const FILL: char = '#';

/// Canvas size in characters. The default keeps a 4:1 aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViolinPlotConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for ViolinPlotConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 21,
        }
    }
}

/// Scott's rule: sample standard deviation times `n^(-1/5)`. Zero for fewer than two values.
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt() * (n as f64).powf(-0.2)
}

/// Gaussian kernel density of `values` evaluated at each grid point.
pub fn kde_density(values: &[f64], grid: &[f64], bandwidth: f64) -> Vec<f64> {
    if values.is_empty() || bandwidth <= 0.0 {
        return vec![0.0; grid.len()];
    }
    let norm = values.len() as f64 * bandwidth * (2.0 * PI).sqrt();
    grid.iter()
        .map(|x| {
            values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                / norm
        })
        .collect()
}

/// Linear-interpolated quantile of already sorted values.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let (lo, hi) = (pos.floor() as usize, pos.ceil() as usize);
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Draw the plot. Non-finite values are skipped.
pub fn render_violin<W: Write>(
    values: &[f64],
    config: &ViolinPlotConfig,
    out: &mut W,
) -> io::Result<()> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return writeln!(out, "(no finite values to plot)");
    }
    sorted.sort_by(f64::total_cmp);

    let width = config.width.max(2);
    let half = config.height.max(3) / 2;
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let bandwidth = scott_bandwidth(&sorted);

    let (lo, hi, density) = if bandwidth > 0.0 {
        let (lo, hi) = (min - 2.0 * bandwidth, max + 2.0 * bandwidth);
        let step = (hi - lo) / (width - 1) as f64;
        let grid: Vec<f64> = (0..width).map(|i| lo + i as f64 * step).collect();
        (lo, hi, kde_density(&sorted, &grid, bandwidth))
    } else {
        // every value identical: a single spike
        let mut density = vec![0.0; width];
        density[width / 2] = 1.0;
        (min - 0.5, max + 0.5, density)
    };

    let peak = density.iter().copied().fold(0.0, f64::max);
    let column = |v: f64| (((v - lo) / (hi - lo)) * (width - 1) as f64).round() as usize;

    let mut canvas = vec![vec![' '; width]; 2 * half + 1];
    for (col, d) in density.iter().enumerate() {
        let extent = if peak > 0.0 {
            ((d / peak) * half as f64).round() as usize
        } else {
            0
        };
        if extent == 0 {
            continue;
        }
        for row in canvas.iter_mut().take(half + extent + 1).skip(half - extent) {
            row[col] = FILL;
        }
    }

    let (q1, median, q3) = (
        quantile(&sorted, 0.25),
        quantile(&sorted, 0.5),
        quantile(&sorted, 0.75),
    );
    let center = &mut canvas[half];
    for cell in &mut center[column(min)..=column(max)] {
        *cell = '-';
    }
    for cell in &mut center[column(q1)..=column(q3)] {
        *cell = '=';
    }
    center[column(median)] = 'o';

    for row in &canvas {
        let line: String = row.iter().collect();
        writeln!(out, "{}", line.trim_end())?;
    }

    let left = format!("{:.3}", lo);
    let right = format!("{:.3}", hi);
    let pad = width.saturating_sub(left.len() + right.len());
    writeln!(out, "+{}+", "-".repeat(width - 2))?;
    writeln!(out, "{}{}{}", left, " ".repeat(pad), right)?;
    writeln!(
        out,
        "n={} min={:.3} q1={:.3} median={:.3} q3={:.3} max={:.3}",
        sorted.len(),
        min,
        q1,
        median,
        q3,
        max
    )
}

/// Print a violin plot of `values` to stdout with the default canvas.
pub fn create_violinplot(values: &[f64]) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = render_violin(values, &ViolinPlotConfig::default(), &mut handle) {
        warn!("Could not draw violin plot: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(values: &[f64], config: &ViolinPlotConfig) -> Vec<String> {
        let mut out = Vec::new();
        render_violin(values, config, &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_scott_bandwidth() {
        assert_eq!(scott_bandwidth(&[1.0]), 0.0);
        assert_eq!(scott_bandwidth(&[2.0, 2.0, 2.0]), 0.0);
        let bw = scott_bandwidth(&[0.0, 1.0]);
        // sample std of [0, 1] is sqrt(0.5)
        assert!((bw - 0.5f64.sqrt() * 2f64.powf(-0.2)).abs() < 1e-12);
    }

    #[test]
    fn test_kde_is_symmetric_and_peaks_at_data() {
        let values = [-1.0, 1.0];
        let density = kde_density(&values, &[-3.0, -1.0, 1.0, 3.0], 0.5);
        assert!((density[0] - density[3]).abs() < 1e-12);
        assert!((density[1] - density[2]).abs() < 1e-12);
        assert!(density[1] > density[0]);
    }

    #[test]
    fn test_canvas_shape() {
        let config = ViolinPlotConfig::default();
        let lines = render(&[0.1, 0.4, 0.5, 0.55, 0.9, 1.0], &config);
        // canvas rows, axis, labels, summary
        assert_eq!(lines.len(), config.height + 3);
        assert!(lines.iter().all(|line| line.chars().count() <= config.width));
        assert!(lines[config.height / 2].contains('o'));
        assert!(lines[config.height + 2].starts_with("n=6 "));
    }

    #[test]
    fn test_constant_values_draw_a_spike() {
        let config = ViolinPlotConfig {
            width: 21,
            height: 5,
        };
        let lines = render(&[1.0, 1.0, 1.0], &config);
        assert_eq!(lines[0].trim(), "#");
        assert_eq!(lines[2].trim(), "o");
    }

    #[test]
    fn test_zero_density_columns_stay_blank() {
        let config = ViolinPlotConfig {
            width: 41,
            height: 7,
        };
        // two tight clusters far apart; the tails and the gap between them have no mass
        let mut values = vec![0.0; 1000];
        values.extend(vec![100.0; 1000]);
        let lines = render(&values, &config);
        let half = config.height / 2;
        // the first column sits two bandwidths below the minimum
        assert!(lines[half].starts_with(' '), "{:?}", lines[half]);
        for line in &lines[..config.height] {
            if line.len() > 22 {
                assert!(!line[18..23].contains('#'), "fill in empty gap: {:?}", line);
            }
        }
    }

    #[test]
    fn test_create_violinplot_prints_without_panicking() {
        create_violinplot(&[0.0, 0.25, 0.5, 1.0]);
        create_violinplot(&[]);
    }

    #[test]
    fn test_no_finite_values() {
        let lines = render(&[f64::NAN], &ViolinPlotConfig::default());
        assert_eq!(lines, vec!["(no finite values to plot)".to_string()]);
        assert_eq!(
            render(&[], &ViolinPlotConfig::default()),
            vec!["(no finite values to plot)".to_string()]
        );
    }
}
