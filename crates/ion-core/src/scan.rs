// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Parameter Scans
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ionization fractions across temperature and electron-density grids.
//!
//! Every grid point is an independent evaluation, fanned out with rayon.

use ndarray::{Array1, Array2, ArrayView1};
use rayon::prelude::*;

use ion_types::config::{DensityScanConfig, TemperatureScanConfig};
use ion_types::constants::PER_CM3_TO_PER_M3;
use ion_types::error::{IonError, IonResult};
use ion_types::state::{Condition, Element};

use crate::partition::PartitionModel;
use crate::saha::evaluate_element;

/// Peak fraction a stage must exceed to be drawn in scan plots.
pub const DOMINANT_THRESHOLD: f64 = 0.01;

/// Fractions along one scanned axis.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Scanned values: K for temperature scans, m⁻³ for density scans.
    pub axis: Array1<f64>,
    /// Fractions [points, stages].
    pub fractions: Array2<f64>,
}

impl ScanResult {
    pub fn points(&self) -> usize {
        self.fractions.nrows()
    }

    pub fn stages(&self) -> usize {
        self.fractions.ncols()
    }

    pub fn stage_series(&self, stage: usize) -> Option<ArrayView1<'_, f64>> {
        (stage < self.stages()).then(|| self.fractions.column(stage))
    }

    /// Stages whose peak fraction over the scan exceeds `threshold`.
    pub fn dominant_stages(&self, threshold: f64) -> Vec<usize> {
        (0..self.stages())
            .filter(|&s| {
                self.fractions
                    .column(s)
                    .iter()
                    .any(|&f| f > threshold)
            })
            .collect()
    }

    /// Mean charge at each point.
    pub fn average_ionization(&self) -> Array1<f64> {
        let charges = Array1::from_iter((0..self.stages()).map(|i| i as f64));
        self.fractions.dot(&charges)
    }
}

/// Linear grid t_min..=t_max [K].
pub fn temperature_axis(config: &TemperatureScanConfig) -> IonResult<Array1<f64>> {
    config.validate()?;
    Ok(Array1::linspace(config.t_min, config.t_max, config.points))
}

/// Logarithmic grid, converted from log10(cm⁻³) bounds to m⁻³.
pub fn density_axis(config: &DensityScanConfig) -> IonResult<Array1<f64>> {
    config.validate()?;
    let per_cm3 = Array1::logspace(10.0, config.log_ne_min, config.log_ne_max, config.points);
    Ok(per_cm3 * PER_CM3_TO_PER_M3)
}

fn evaluate_rows(
    element: &Element,
    conditions: &[Condition],
    model: &dyn PartitionModel,
) -> IonResult<Array2<f64>> {
    if conditions.is_empty() {
        return Err(IonError::InvalidInput("scan axis is empty".to_string()));
    }
    element.validate()?;

    let rows = conditions
        .par_iter()
        .map(|c| evaluate_element(element, c, model).map(|r| r.fractions))
        .collect::<IonResult<Vec<Vec<f64>>>>()?;

    let mut out = Array2::zeros((rows.len(), element.stages.len()));
    for (i, row) in rows.iter().enumerate() {
        for (j, &f) in row.iter().enumerate() {
            out[[i, j]] = f;
        }
    }
    Ok(out)
}

/// Fractions vs temperature at fixed n_e [m⁻³].
pub fn temperature_scan(
    element: &Element,
    temperatures_k: &Array1<f64>,
    electron_density_m3: f64,
    model: &dyn PartitionModel,
) -> IonResult<ScanResult> {
    let conditions: Vec<Condition> = temperatures_k
        .iter()
        .map(|&t| Condition::new(t, electron_density_m3))
        .collect();
    Ok(ScanResult {
        axis: temperatures_k.clone(),
        fractions: evaluate_rows(element, &conditions, model)?,
    })
}

/// Fractions vs electron density [m⁻³] at fixed T.
pub fn density_scan(
    element: &Element,
    densities_m3: &Array1<f64>,
    temperature_k: f64,
    model: &dyn PartitionModel,
) -> IonResult<ScanResult> {
    let conditions: Vec<Condition> = densities_m3
        .iter()
        .map(|&ne| Condition::new(temperature_k, ne))
        .collect();
    Ok(ScanResult {
        axis: densities_m3.clone(),
        fractions: evaluate_rows(element, &conditions, model)?,
    })
}

/// Mean charge over the (n_e, T) plane, shape [densities, temperatures].
pub fn average_ionization_map(
    element: &Element,
    temperatures_k: &Array1<f64>,
    densities_m3: &Array1<f64>,
    model: &dyn PartitionModel,
) -> IonResult<Array2<f64>> {
    let mut map = Array2::zeros((densities_m3.len(), temperatures_k.len()));
    for (i, &ne) in densities_m3.iter().enumerate() {
        let row = temperature_scan(element, temperatures_k, ne, model)?.average_ionization();
        map.row_mut(i).assign(&row);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomic_data::AtomicDatabase;
    use crate::partition::GroundStateModel;

    fn element(symbol: &str) -> &'static Element {
        AtomicDatabase::builtin().unwrap().element(symbol).unwrap()
    }

    #[test]
    fn test_temperature_axis() {
        let axis = temperature_axis(&TemperatureScanConfig::default()).unwrap();
        assert_eq!(axis.len(), 100);
        assert!((axis[0] - 3000.0).abs() < 1e-9);
        assert!((axis[99] - 15_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_axis_in_si() {
        let cfg = DensityScanConfig {
            log_ne_min: 12.0,
            log_ne_max: 17.0,
            points: 6,
        };
        let axis = density_axis(&cfg).unwrap();
        assert_eq!(axis.len(), 6);
        assert!((axis[0] / 1e18 - 1.0).abs() < 1e-9);
        assert!((axis[5] / 1e23 - 1.0).abs() < 1e-9);
        assert!((axis[1] / axis[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_rejects_bad_config() {
        let cfg = TemperatureScanConfig {
            t_min: 9000.0,
            t_max: 3000.0,
            points: 10,
        };
        assert!(matches!(temperature_axis(&cfg), Err(IonError::Config(_))));
    }

    #[test]
    fn test_temperature_scan_rows_normalized() {
        let fe = element("Fe");
        let axis = Array1::linspace(3000.0, 15_000.0, 25);
        let scan = temperature_scan(fe, &axis, 1e21, &GroundStateModel).unwrap();
        assert_eq!(scan.points(), 25);
        assert_eq!(scan.stages(), fe.stages.len());
        for row in scan.fractions.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
        // Neutral iron dominates the cold end, Fe II the hot end.
        let neutral = scan.stage_series(0).unwrap();
        assert!(neutral[0] > 0.5);
        assert!(neutral[24] < neutral[0]);
        assert!(scan.stage_series(fe.stages.len()).is_none());
    }

    #[test]
    fn test_density_scan_recombines() {
        let h = element("H");
        let axis = Array1::logspace(10.0, 18.0, 24.0, 13);
        let scan = density_scan(h, &axis, 10_000.0, &GroundStateModel).unwrap();
        let z = scan.average_ionization();
        for i in 1..z.len() {
            assert!(z[i] <= z[i - 1] + 1e-12, "Z̄ should not rise with n_e");
        }
    }

    #[test]
    fn test_dominant_stages_filter() {
        let scan = ScanResult {
            axis: Array1::from(vec![1.0, 2.0]),
            fractions: Array2::from_shape_vec((2, 3), vec![0.995, 0.005, 0.0, 0.5, 0.5, 0.0])
                .unwrap(),
        };
        assert_eq!(scan.dominant_stages(DOMINANT_THRESHOLD), vec![0, 1]);
        let z = scan.average_ionization();
        assert!((z[0] - 0.005).abs() < 1e-15);
        assert!((z[1] - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_empty_axis_rejected() {
        let h = element("H");
        let axis = Array1::<f64>::zeros(0);
        assert!(temperature_scan(h, &axis, 1e20, &GroundStateModel).is_err());
    }

    #[test]
    fn test_scan_propagates_invalid_point() {
        let h = element("H");
        let axis = Array1::from(vec![5000.0, 0.0, 9000.0]);
        assert!(matches!(
            temperature_scan(h, &axis, 1e20, &GroundStateModel),
            Err(IonError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_average_ionization_map_shape_and_trend() {
        let ar = element("Ar");
        let t = Array1::linspace(5000.0, 20_000.0, 8);
        let ne = Array1::logspace(10.0, 19.0, 23.0, 5);
        let map = average_ionization_map(ar, &t, &ne, &GroundStateModel).unwrap();
        assert_eq!(map.dim(), (5, 8));
        // Hotter is more ionized, denser is less ionized.
        assert!(map[[0, 7]] > map[[0, 0]]);
        assert!(map[[4, 7]] < map[[0, 7]]);
    }
}
