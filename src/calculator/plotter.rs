//! Numeric plotter: samples the original (pre-integration) expression over
//! the chosen domain and draws the curve, shading the integrated region
//! when bounds are given.
//!
//! The plot surface (an output file) is exclusively owned by this module
//! and follows a clear-then-redraw contract: every request starts from a
//! blank canvas, and a failed evaluation leaves the canvas cleared with
//! only the reference axes and grid, never a stale curve.

use crate::calculator::engine::SymbolicEngine;
use crate::calculator::input_normalizer::LimitPair;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use log::info;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Default sampling domain when no bounds are given.
pub const DEFAULT_DOMAIN: (f64, f64) = (-10.0, 10.0);
/// Default number of samples, fixed regardless of domain width.
pub const DEFAULT_SAMPLES: usize = 1000;

/// Tolerance below which a complex evaluation counts as real.
const IMAG_TOLERANCE: f64 = 1e-9;

/// One numerically sampled curve. Regenerated on every evaluation, never
/// persisted across requests. xs follow the order of the sampling domain
/// (descending for reversed bounds), ys match them in length.
#[derive(Debug, Clone)]
pub struct PlotSample {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Bounds take precedence over the configured default domain.
pub fn choose_domain(limits: Option<LimitPair>, default_domain: (f64, f64)) -> (f64, f64) {
    match limits {
        Some(pair) => (pair.lower, pair.upper),
        None => default_domain,
    }
}

/// Samples the expression uniformly over the domain, in the order the
/// bounds were given; reversed bounds yield a descending grid and plot
/// normally. Points where the real evaluation is non-finite are retried
/// through the complex closure; a value that stays non-finite or truly
/// complex fails the whole sampling pass with a plotting-only error.
pub fn sample_expression(
    engine: &dyn SymbolicEngine,
    expr: &Expr,
    var: &str,
    domain: (f64, f64),
    samples: usize,
) -> Result<PlotSample, String> {
    let (lower, upper) = domain;
    if samples < 2 {
        return Err(format!("at least 2 samples are required, got {}", samples));
    }

    let f = engine.compile(expr, var);
    let fc = engine.compile_complex(expr, var);

    let xs = linspace(lower, upper, samples);
    let mut ys = Vec::with_capacity(xs.len());
    for &x in &xs {
        let mut y = f(x);
        if !y.is_finite() {
            let z = fc(num_complex::Complex64::new(x, 0.0));
            if z.re.is_finite() && z.im.abs() < IMAG_TOLERANCE {
                y = z.re;
            } else {
                return Err(format!(
                    "{} is not real-valued and finite at {} = {}",
                    expr, var, x
                ));
            }
        }
        ys.push(y);
    }

    Ok(PlotSample { x: xs, y: ys })
}

/// Which rendering backend draws the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotBackend {
    #[default]
    Plotters,
    Gnuplot,
}

/// Owns the plot surface and its clear-then-redraw contract.
#[derive(Debug, Clone)]
pub struct CurvePlotter {
    pub path: PathBuf,
    pub size: (u32, u32),
    pub backend: PlotBackend,
}

impl CurvePlotter {
    pub fn new(path: PathBuf, size: (u32, u32), backend: PlotBackend) -> Self {
        CurvePlotter {
            path,
            size,
            backend,
        }
    }

    /// Draws the sampled curve, the origin axes, the grid and the legend;
    /// shades the area between curve and x-axis when a shading sample is
    /// given (definite integration).
    pub fn render(
        &self,
        var: &str,
        label: &str,
        sample: &PlotSample,
        shaded: Option<&PlotSample>,
    ) -> Result<(), String> {
        info!("drawing {} samples to {:?}", sample.x.len(), self.path);
        match self.backend {
            PlotBackend::Plotters => self.render_plotters(var, label, sample, shaded),
            PlotBackend::Gnuplot => self.render_gnuplot(var, label, sample, shaded),
        }
    }

    /// Clears the surface, leaving only the reference axes and grid. Used
    /// when the numeric evaluation failed so no stale curve survives.
    pub fn render_cleared(&self, var: &str, domain: (f64, f64)) -> Result<(), String> {
        match self.backend {
            PlotBackend::Plotters => self.render_cleared_plotters(var, domain),
            PlotBackend::Gnuplot => self.render_cleared_gnuplot(var, domain),
        }
    }

    fn render_cleared_plotters(&self, var: &str, domain: (f64, f64)) -> Result<(), String> {
        let empty = PlotSample {
            x: vec![domain.0, domain.1],
            y: vec![0.0, 0.0],
        };
        let (x_range, y_range) = plot_ranges(&empty);
        let root_area = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        root_area
            .fill(&WHITE)
            .map_err(|e| format!("plot surface error: {}", e))?;
        let mut chart = ChartBuilder::on(&root_area)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(30)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| format!("plot chart error: {}", e))?;
        chart
            .configure_mesh()
            .x_desc(var)
            .draw()
            .map_err(|e| format!("plot mesh error: {}", e))?;
        draw_origin_axes(&mut chart)?;
        root_area
            .present()
            .map_err(|e| format!("plot surface error: {}", e))?;
        Ok(())
    }

    fn render_plotters(
        &self,
        var: &str,
        label: &str,
        sample: &PlotSample,
        shaded: Option<&PlotSample>,
    ) -> Result<(), String> {
        let (x_range, y_range) = plot_ranges(sample);

        let root_area = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        root_area
            .fill(&WHITE)
            .map_err(|e| format!("plot surface error: {}", e))?;

        let mut chart = ChartBuilder::on(&root_area)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(30)
            .build_cartesian_2d(x_range, y_range)
            .map_err(|e| format!("plot chart error: {}", e))?;

        chart
            .configure_mesh()
            .x_desc(var)
            .draw()
            .map_err(|e| format!("plot mesh error: {}", e))?;

        if let Some(area) = shaded {
            let points: Vec<(f64, f64)> = area
                .x
                .iter()
                .zip(area.y.iter())
                .map(|(&x, &y)| (x, y))
                .collect();
            chart
                .draw_series(AreaSeries::new(points, 0.0, GREEN.mix(0.5)))
                .map_err(|e| format!("plot shading error: {}", e))?
                .label("Area under curve")
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], GREEN.mix(0.5).filled())
                });
        }

        let series: Vec<(f64, f64)> = sample
            .x
            .iter()
            .zip(sample.y.iter())
            .map(|(&x, &y)| (x, y))
            .collect();
        chart
            .draw_series(LineSeries::new(series, &BLUE))
            .map_err(|e| format!("plot series error: {}", e))?
            .label(format!("Function: {}", label))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        draw_origin_axes(&mut chart)?;

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| format!("plot legend error: {}", e))?;

        root_area
            .present()
            .map_err(|e| format!("plot surface error: {}", e))?;
        Ok(())
    }

    fn render_gnuplot(
        &self,
        var: &str,
        label: &str,
        sample: &PlotSample,
        shaded: Option<&PlotSample>,
    ) -> Result<(), String> {
        use gnuplot::{AxesCommon, Caption, Color, Figure, RGBString};

        let (x_range, y_range) = plot_ranges(sample);
        let mut fg = Figure::new();
        {
            let axes = fg
                .axes2d()
                .set_x_label(var, &[])
                .set_y_label(label, &[])
                .set_x_grid(true)
                .set_y_grid(true);
            if let Some(area) = shaded {
                let zeros = vec![0.0; area.x.len()];
                axes.fill_between(
                    &area.x,
                    &zeros,
                    &area.y,
                    &[Caption("Area under curve"), Color(RGBString("green"))],
                );
            }
            axes.lines(
                &sample.x,
                &sample.y,
                &[Caption(label), Color(RGBString("blue"))],
            );
            // reference axes through the origin
            axes.lines(
                &[x_range.start, x_range.end],
                &[0.0, 0.0],
                &[Color(RGBString("black"))],
            );
            axes.lines(
                &[0.0, 0.0],
                &[y_range.start, y_range.end],
                &[Color(RGBString("black"))],
            );
        }
        let filename = path_to_string(&self.path)?;
        fg.save_to_png(&filename, self.size.0, self.size.1)
            .map_err(|e| format!("gnuplot backend error: {:?}", e))?;
        Ok(())
    }

    fn render_cleared_gnuplot(&self, var: &str, domain: (f64, f64)) -> Result<(), String> {
        use gnuplot::{AxesCommon, Color, Figure, RGBString};

        let empty = PlotSample {
            x: vec![domain.0, domain.1],
            y: vec![0.0, 0.0],
        };
        let (x_range, y_range) = plot_ranges(&empty);
        let mut fg = Figure::new();
        {
            let axes = fg
                .axes2d()
                .set_x_label(var, &[])
                .set_x_grid(true)
                .set_y_grid(true);
            axes.lines(
                &[x_range.start, x_range.end],
                &[0.0, 0.0],
                &[Color(RGBString("black"))],
            );
            axes.lines(
                &[0.0, 0.0],
                &[y_range.start, y_range.end],
                &[Color(RGBString("black"))],
            );
        }
        let filename = path_to_string(&self.path)?;
        fg.save_to_png(&filename, self.size.0, self.size.1)
            .map_err(|e| format!("gnuplot backend error: {:?}", e))?;
        Ok(())
    }
}

fn path_to_string(path: &Path) -> Result<String, String> {
    path.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| format!("plot path is not valid UTF-8: {:?}", path))
}

/// Padded axis ranges that always include the origin so the reference axes
/// are visible.
fn plot_ranges(sample: &PlotSample) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let first = sample.x.first().copied().unwrap_or(-1.0);
    let last = sample.x.last().copied().unwrap_or(1.0);
    // the grid may be descending; the chart range never is
    let mut x_min = first.min(last);
    let mut x_max = first.max(last);
    if x_max - x_min < f64::EPSILON {
        x_min -= 1.0;
        x_max += 1.0;
    }

    let mut y_min = 0.0f64;
    let mut y_max = 0.0f64;
    for &y in &sample.y {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if y_max - y_min < f64::EPSILON {
        y_min -= 1.0;
        y_max += 1.0;
    }
    let pad = 0.05 * (y_max - y_min);
    (x_min..x_max, (y_min - pad)..(y_max + pad))
}

/// Reference horizontal/vertical axes through the origin, drawn whenever
/// the origin lies inside the chart ranges.
fn draw_origin_axes<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
) -> Result<(), String> {
    let x_range = chart.x_range();
    let y_range = chart.y_range();
    if x_range.start <= 0.0 && 0.0 <= x_range.end {
        chart
            .draw_series(LineSeries::new(
                vec![(0.0, y_range.start), (0.0, y_range.end)],
                &BLACK,
            ))
            .map_err(|e| format!("plot axis error: {}", e))?;
    }
    if y_range.start <= 0.0 && 0.0 <= y_range.end {
        chart
            .draw_series(LineSeries::new(
                vec![(x_range.start, 0.0), (x_range.end, 0.0)],
                &BLACK,
            ))
            .map_err(|e| format!("plot axis error: {}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::engine::ExprEngine;

    fn parse(s: &str) -> Expr {
        Expr::parse_expression(s).unwrap()
    }

    #[test]
    fn test_choose_domain_prefers_limits() {
        let limits = Some(LimitPair {
            lower: 0.0,
            upper: 2.0,
        });
        assert_eq!(choose_domain(limits, DEFAULT_DOMAIN), (0.0, 2.0));
        assert_eq!(choose_domain(None, DEFAULT_DOMAIN), (-10.0, 10.0));
    }

    #[test]
    fn test_sample_count_and_monotonic_xs() {
        let engine = ExprEngine;
        let expr = parse("x^2");
        let sample =
            sample_expression(&engine, &expr, "x", DEFAULT_DOMAIN, DEFAULT_SAMPLES).unwrap();
        assert_eq!(sample.x.len(), DEFAULT_SAMPLES);
        assert_eq!(sample.y.len(), DEFAULT_SAMPLES);
        assert!(sample.x.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(sample.x[0], -10.0);
        assert_eq!(*sample.x.last().unwrap(), 10.0);
    }

    #[test]
    fn test_sampling_over_bounds() {
        let engine = ExprEngine;
        let expr = parse("x^2");
        let sample = sample_expression(&engine, &expr, "x", (0.0, 2.0), 100).unwrap();
        assert_eq!(sample.x[0], 0.0);
        assert_eq!(*sample.x.last().unwrap(), 2.0);
        assert!(sample.y.iter().all(|y| y.is_finite()));
    }

    #[test]
    fn test_sampling_ln_over_negative_domain_fails() {
        let engine = ExprEngine;
        let expr = parse("ln(x)");
        let err = sample_expression(&engine, &expr, "x", DEFAULT_DOMAIN, 100).unwrap_err();
        assert!(err.contains("not real-valued"));
    }

    #[test]
    fn test_sampling_descending_bounds() {
        let engine = ExprEngine;
        let expr = parse("x^2");
        let sample = sample_expression(&engine, &expr, "x", (2.0, 0.0), 100).unwrap();
        assert_eq!(sample.x[0], 2.0);
        assert_eq!(*sample.x.last().unwrap(), 0.0);
        assert!(sample.x.windows(2).all(|w| w[1] < w[0]));
        assert!(sample.y.iter().all(|y| y.is_finite()));
    }

    #[test]
    fn test_plot_ranges_normalize_descending_grid() {
        let sample = PlotSample {
            x: vec![2.0, 1.0, 0.0],
            y: vec![4.0, 1.0, 0.0],
        };
        let (x_range, y_range) = plot_ranges(&sample);
        assert!(x_range.start < x_range.end);
        assert_eq!(x_range.start, 0.0);
        assert_eq!(x_range.end, 2.0);
        assert!(y_range.start < y_range.end);
    }

    #[test]
    fn test_render_writes_plot_file() {
        let engine = ExprEngine;
        let expr = parse("x^2");
        let sample = sample_expression(&engine, &expr, "x", (0.0, 2.0), 200).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.png");
        let plotter = CurvePlotter::new(path.clone(), (640, 480), PlotBackend::Plotters);
        match plotter.render("x", "x^2", &sample, Some(&sample)) {
            Ok(()) => assert!(path.exists()),
            // font-less environments fail inside the chart, not silently
            Err(msg) => assert!(msg.starts_with("plot "), "unexpected error: {}", msg),
        }
    }

    #[test]
    fn test_render_cleared_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleared.png");
        let plotter = CurvePlotter::new(path.clone(), (640, 480), PlotBackend::Plotters);
        match plotter.render_cleared("x", DEFAULT_DOMAIN) {
            Ok(()) => assert!(path.exists()),
            Err(msg) => assert!(msg.starts_with("plot "), "unexpected error: {}", msg),
        }
    }

    #[test]
    fn test_render_cleared_routes_to_gnuplot_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleared_gnuplot.png");
        let plotter = CurvePlotter::new(path.clone(), (640, 480), PlotBackend::Gnuplot);
        match plotter.render_cleared("x", DEFAULT_DOMAIN) {
            Ok(()) => assert!(path.exists()),
            // without a gnuplot binary the error names the backend
            Err(msg) => assert!(
                msg.starts_with("gnuplot backend error"),
                "unexpected error: {}",
                msg
            ),
        }
    }
}
