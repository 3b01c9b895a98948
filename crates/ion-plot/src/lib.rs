// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Charts
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! SVG charts of ionization equilibria.
//!
//! Every renderer draws into an in-memory SVG string; callers decide
//! where it goes.

use std::error::Error;

use log::debug;
use ndarray::{Array1, Array2};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use ion_core::notation::spectroscopic_name;
use ion_core::scan::{ScanResult, DOMINANT_THRESHOLD};
use ion_types::constants::PER_CM3_TO_PER_M3;
use ion_types::error::{IonError, IonResult};
use ion_types::state::IonizationResult;

pub const WIDTH: u32 = 900;
pub const HEIGHT: u32 = 500;

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = Result<(), Box<dyn Error>>;

fn render<F>(draw: F) -> IonResult<String>
where
    F: FnOnce(&SvgArea) -> DrawResult,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| IonError::Render(e.to_string()))?;
        draw(&root).map_err(|e| IonError::Render(e.to_string()))?;
        root.present()
            .map_err(|e| IonError::Render(e.to_string()))?;
    }
    debug!("rendered SVG chart, {} bytes", svg.len());
    Ok(svg)
}

fn stage_color(stage: usize) -> RGBAColor {
    Palette99::pick(stage).to_rgba()
}

/// Bar chart of percentages per stage at a single condition.
pub fn render_fraction_bars(result: &IonizationResult) -> IonResult<String> {
    let n = result.fractions.len();
    let names: Vec<String> = (0..n)
        .map(|i| spectroscopic_name(&result.symbol, i))
        .collect();
    let percent: Vec<f64> = result.fractions.iter().map(|f| f * 100.0).collect();
    let y_max = percent.iter().copied().fold(0.0, f64::max).max(1.0) * 1.15;
    let title = format!(
        "{} Ionization Fractions, T = {:.0} K, ne = {:.2e} cm⁻³",
        result.symbol,
        result.condition.temperature_k,
        result.condition.electron_density_cm3()
    );

    render(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0.0..y_max)?;

        let label = |x: &f64| {
            let i = x.round();
            if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < n {
                names[i as usize].clone()
            } else {
                String::new()
            }
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.max(2))
            .x_label_formatter(&label)
            .x_desc("Ion State")
            .y_desc("Fraction (%)")
            .axis_desc_style(("sans-serif", 16))
            .draw()?;

        chart.draw_series(percent.iter().enumerate().map(|(i, &p)| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, p)], stage_color(i).filled())
        }))?;

        chart.draw_series(percent.iter().enumerate().map(|(i, &p)| {
            Text::new(
                format!("{p:.2}%"),
                (i as f64 - 0.3, p + y_max * 0.04),
                ("sans-serif", 12).into_font(),
            )
        }))?;
        Ok(())
    })
}

fn draw_stage_lines<'a, X>(
    chart: &mut ChartContext<'a, SVGBackend<'a>, Cartesian2d<X, RangedCoordf64>>,
    scan: &ScanResult,
    symbol: &str,
    x_values: &[f64],
) -> DrawResult
where
    X: Ranged<ValueType = f64>,
{
    for stage in scan.dominant_stages(DOMINANT_THRESHOLD) {
        let Some(series) = scan.stage_series(stage) else {
            continue;
        };
        let color = stage_color(stage);
        chart
            .draw_series(LineSeries::new(
                x_values
                    .iter()
                    .zip(series.iter())
                    .map(|(&x, &f)| (x, f * 100.0)),
                color.stroke_width(2),
            ))?
            .label(spectroscopic_name(symbol, stage))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn axis_bounds(axis: &Array1<f64>) -> IonResult<(f64, f64)> {
    let min = axis.iter().copied().fold(f64::INFINITY, f64::min);
    let max = axis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() || min <= 0.0 || min >= max {
        return Err(IonError::InvalidInput(format!(
            "chart axis must be positive with at least two distinct values, got [{min}, {max}]"
        )));
    }
    Ok((min, max))
}

/// Percent per dominant stage vs temperature at fixed n_e [m⁻³].
pub fn render_temperature_scan(
    scan: &ScanResult,
    symbol: &str,
    electron_density_m3: f64,
) -> IonResult<String> {
    let (t_min, t_max) = axis_bounds(&scan.axis)?;
    let xs: Vec<f64> = scan.axis.to_vec();
    let title = format!(
        "{symbol} Ionization vs Temperature, ne = {:.2e} cm⁻³",
        electron_density_m3 / PER_CM3_TO_PER_M3
    );

    render(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(t_min..t_max, 0.0..105.0)?;
        chart
            .configure_mesh()
            .x_desc("Temperature (K)")
            .y_desc("Fraction (%)")
            .axis_desc_style(("sans-serif", 16))
            .draw()?;
        draw_stage_lines(&mut chart, scan, symbol, &xs)
    })
}

/// Percent per dominant stage vs electron density on a log axis, fixed T.
/// The scan axis is in m⁻³; the chart is labelled in cm⁻³.
pub fn render_density_scan(scan: &ScanResult, symbol: &str, temperature_k: f64) -> IonResult<String> {
    let xs: Vec<f64> = scan.axis.iter().map(|ne| ne / PER_CM3_TO_PER_M3).collect();
    let (ne_min, ne_max) = axis_bounds(&Array1::from(xs.clone()))?;
    let title = format!("{symbol} Ionization vs Electron Density, T = {temperature_k:.0} K");

    render(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((ne_min..ne_max).log_scale(), 0.0..105.0)?;
        chart
            .configure_mesh()
            .x_desc("Electron Density (cm⁻³)")
            .y_desc("Fraction (%)")
            .x_label_formatter(&|x| format!("{x:.0e}"))
            .axis_desc_style(("sans-serif", 16))
            .draw()?;
        draw_stage_lines(&mut chart, scan, symbol, &xs)
    })
}

/// Heatmap of the mean charge, `map` shaped [densities, temperatures].
pub fn render_average_ionization_map(
    map: &Array2<f64>,
    temperatures_k: &Array1<f64>,
    densities_m3: &Array1<f64>,
    symbol: &str,
) -> IonResult<String> {
    if map.dim() != (densities_m3.len(), temperatures_k.len()) {
        return Err(IonError::InvalidInput(format!(
            "map shape {:?} does not match axes ({}, {})",
            map.dim(),
            densities_m3.len(),
            temperatures_k.len()
        )));
    }
    let (t_min, t_max) = axis_bounds(temperatures_k)?;
    let ne_cm3: Vec<f64> = densities_m3.iter().map(|ne| ne / PER_CM3_TO_PER_M3).collect();
    let (ne_min, ne_max) = axis_bounds(&Array1::from(ne_cm3.clone()))?;
    let z_max = map.iter().copied().fold(0.0, f64::max).max(1e-12);
    let ts = temperatures_k.to_vec();
    let title = format!("{symbol} Average Ionization State");

    render(|root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(t_min..t_max, (ne_min..ne_max).log_scale())?;
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Temperature (K)")
            .y_desc("Electron Density (cm⁻³)")
            .y_label_formatter(&|y| format!("{y:.0e}"))
            .axis_desc_style(("sans-serif", 16))
            .draw()?;

        let mut cells = Vec::new();
        for i in 0..ne_cm3.len().saturating_sub(1) {
            for j in 0..ts.len().saturating_sub(1) {
                let frac = map[[i, j]] / z_max;
                let color = HSLColor(0.7 * (1.0 - frac), 0.8, 0.5);
                cells.push(Rectangle::new(
                    [(ts[j], ne_cm3[i]), (ts[j + 1], ne_cm3[i + 1])],
                    color.filled(),
                ));
            }
        }
        chart.draw_series(cells)?;
        Ok(())
    })
}
