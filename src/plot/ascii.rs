//! ASCII plotting for terminal output.
//!
//! Fixed-size character grid, deterministic output:
//! - samples: `o`
//! - curve: `-` line

use crate::domain::{CurveParams, Point};
use crate::io::FitFile;
use crate::models::predict;

/// Plot samples with the fitted curve drawn across their x-range.
pub fn render_ascii_plot(points: &[Point], params: &CurveParams, width: usize, height: usize) -> String {
    let (x_min, x_max) = x_range(points).unwrap_or((-1.0, 1.0));
    let curve = sample_fn(|x| predict(params, x), x_min, x_max, width.max(2));
    render_plot(points, &curve, x_min, x_max, width, height)
}

/// Plot a saved fit file: its precomputed grid plus the original samples.
pub fn render_fit_file_plot(file: &FitFile, width: usize, height: usize) -> String {
    let curve: Vec<(f64, f64)> = file
        .grid
        .x
        .iter()
        .zip(file.grid.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();
    let (x_min, x_max) = curve_x_range(&curve).unwrap_or((-1.0, 1.0));
    render_plot(&file.points, &curve, x_min, x_max, width, height)
}

/// Plot an arbitrary function (e.g. a shape equation) over `[x_min, x_max]`.
pub fn render_function_plot(
    f: impl Fn(f64) -> f64,
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let curve = sample_fn(f, x_min, x_max, width.max(2));
    render_plot(&[], &curve, x_min, x_max, width, height)
}

fn render_plot(
    points: &[Point],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let (y_lo, y_hi) = y_range(points, curve).unwrap_or((0.0, 1.0));
    let margin = ((y_hi - y_lo) * 0.05).max(1e-12);
    let mut canvas = Canvas::new(
        width.max(10),
        height.max(5),
        (x_min, x_max),
        (y_lo - margin, y_hi + margin),
    );

    // Samples are stamped after the curve and win any shared cell.
    canvas.polyline(curve, '-');
    for p in points.iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
        let cell = canvas.cell(p.x, p.y);
        canvas.put(cell, 'o');
    }
    canvas.render()
}

fn x_range(points: &[Point]) -> Option<(f64, f64)> {
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    (min.is_finite() && max.is_finite() && max > min).then_some((min, max))
}

fn curve_x_range(curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let (min, max) = curve
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
    (min.is_finite() && max.is_finite() && max > min).then_some((min, max))
}

fn sample_fn(f: impl Fn(f64) -> f64, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / (n as f64 - 1.0);
            (x, f(x))
        })
        .collect()
}

fn y_range(points: &[Point], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let ys = points.iter().map(|p| p.y).chain(curve.iter().map(|&(_, y)| y));
    let (min, max) = ys
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if !(min.is_finite() && max.is_finite()) {
        return None;
    }
    // Flat data still gets a visible band.
    if max > min { Some((min, max)) } else { Some((min - 0.5, max + 0.5)) }
}

/// Character grid with a fixed data window; row 0 is the top (largest y).
struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    x_window: (f64, f64),
    y_window: (f64, f64),
}

impl Canvas {
    fn new(width: usize, height: usize, x_window: (f64, f64), y_window: (f64, f64)) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
            x_window,
            y_window,
        }
    }

    /// Data coordinates to `(col, row)`, clamped onto the grid.
    fn cell(&self, x: f64, y: f64) -> (usize, usize) {
        let scale = |v: f64, (lo, hi): (f64, f64), cells: usize| {
            let u = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
            (u * (cells - 1) as f64).round() as usize
        };
        let col = scale(x, self.x_window, self.width);
        let row = self.height - 1 - scale(y, self.y_window, self.height);
        (col, row)
    }

    fn put(&mut self, (col, row): (usize, usize), ch: char) {
        self.cells[row * self.width + col] = ch;
    }

    fn put_blank(&mut self, cell: (usize, usize), ch: char) {
        if self.cells[cell.1 * self.width + cell.0] == ' ' {
            self.put(cell, ch);
        }
    }

    fn polyline(&mut self, curve: &[(f64, f64)], ch: char) {
        let mut last: Option<(usize, usize)> = None;
        for &(x, y) in curve.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
            let here = self.cell(x, y);
            match last {
                Some(from) => self.segment(from, here, ch),
                None => self.put_blank(here, ch),
            }
            last = Some(here);
        }
    }

    /// Straight segment between two cells, one cell per step along the longer axis.
    fn segment(&mut self, from: (usize, usize), to: (usize, usize), ch: char) {
        let (dc, dr) = (to.0 as f64 - from.0 as f64, to.1 as f64 - from.1 as f64);
        let steps = dc.abs().max(dr.abs()) as usize;
        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
            let col = (from.0 as f64 + dc * t).round() as usize;
            let row = (from.1 as f64 + dr * t).round() as usize;
            self.put_blank((col, row), ch);
        }
    }

    fn render(&self) -> String {
        let mut out = format!(
            "Plot: x=[{:.3}, {:.3}] | y=[{:.2}, {:.2}]\n",
            self.x_window.0, self.x_window.1, self.y_window.0, self.y_window.1
        );
        for row in self.cells.chunks(self.width) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_small() {
        let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 3.0)];
        let params = CurveParams::Linear { beta: 1.0, gamma: 0.0 };

        let txt = render_ascii_plot(&points, &params, 10, 5);
        let expected = concat!(
            "Plot: x=[0.000, 3.000] | y=[-0.15, 3.15]\n",
            "         o\n",
            "      --- \n",
            "    --    \n",
            " ---      \n",
            "o         \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn flat_function_still_renders() {
        let txt = render_function_plot(|_| 2.0, -1.0, 1.0, 12, 6);
        let rows: Vec<&str> = txt.lines().collect();
        assert_eq!(rows.len(), 7);
        assert!(rows[1..].iter().any(|r| r.trim() == "-".repeat(12)));
    }
}
