// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Self-Consistent Electron Density
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Charge-neutral electron density for a single-element plasma.
//!
//! Solves n_e = n_total · Z̄(n_e). The residual r(n_e) = n_total·Z̄ − n_e is
//! strictly decreasing, positive as n_e → 0 and non-positive at
//! n_e = n_total·Z_max, so bisection in ln n_e always brackets the root.

use log::{debug, warn};

use ion_types::config::SolverConfig;
use ion_types::error::{IonError, IonResult};
use ion_types::state::{Condition, Element, IonizationResult};

use crate::partition::PartitionModel;
use crate::saha::evaluate_element;

/// Converged (or best-effort) electron density and the populations at it.
#[derive(Debug, Clone)]
pub struct EquilibriumSolution {
    /// Electron density [m⁻³]
    pub electron_density_m3: f64,
    pub result: IonizationResult,
    pub iterations: usize,
    pub converged: bool,
}

fn residual(
    element: &Element,
    temperature_k: f64,
    total_density_m3: f64,
    ln_ne: f64,
    model: &dyn PartitionModel,
) -> IonResult<(f64, IonizationResult)> {
    let ne = ln_ne.exp();
    let result = evaluate_element(element, &Condition::new(temperature_k, ne), model)?;
    Ok((total_density_m3 * result.average_ionization() - ne, result))
}

/// Find n_e for heavy-particle density `total_density_m3` [m⁻³] at `temperature_k`.
///
/// Stops when the bracket on ln n_e is narrower than `config.tolerance`
/// (a relative tolerance on n_e). Running out of iterations returns the
/// midpoint with `converged = false`.
pub fn solve_electron_density(
    element: &Element,
    temperature_k: f64,
    total_density_m3: f64,
    model: &dyn PartitionModel,
    config: &SolverConfig,
) -> IonResult<EquilibriumSolution> {
    config.validate()?;
    element.validate()?;
    if !temperature_k.is_finite() || temperature_k <= 0.0 {
        return Err(IonError::InvalidInput(format!(
            "temperature must be finite and > 0 K, got {temperature_k}"
        )));
    }
    if !total_density_m3.is_finite() || total_density_m3 <= 0.0 {
        return Err(IonError::InvalidInput(format!(
            "total density must be finite and > 0 m^-3, got {total_density_m3}"
        )));
    }
    let z_max = element.transitions();
    if z_max == 0 {
        return Err(IonError::InvalidInput(format!(
            "{} has no ionization transitions, no free electrons",
            element.symbol
        )));
    }

    let mut hi = (total_density_m3 * z_max as f64).ln();
    let mut lo = f64::MIN_POSITIVE.ln();

    let (r_lo, _) = residual(element, temperature_k, total_density_m3, lo, model)?;
    if r_lo <= 0.0 {
        return Err(IonError::NumericOverflow {
            stage: 0,
            message: format!(
                "{} at {temperature_k} K: self-consistent electron density below f64 range",
                element.symbol
            ),
        });
    }

    let mut iterations = 0;
    while iterations < config.max_iterations && hi - lo > config.tolerance {
        iterations += 1;
        let mid = 0.5 * (lo + hi);
        let (r, _) = residual(element, temperature_k, total_density_m3, mid, model)?;
        if r > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let converged = hi - lo <= config.tolerance;
    let mid = 0.5 * (lo + hi);
    let (_, result) = residual(element, temperature_k, total_density_m3, mid, model)?;
    let electron_density_m3 = mid.exp();

    if converged {
        debug!(
            "{}: n_e = {electron_density_m3:.4e} m^-3 after {iterations} iterations",
            element.symbol
        );
    } else {
        warn!(
            "{}: electron density did not converge after {iterations} iterations (bracket width {:.3e} in ln n_e)",
            element.symbol,
            hi - lo
        );
    }

    Ok(EquilibriumSolution {
        electron_density_m3,
        result,
        iterations,
        converged,
    })
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
    fn test_hydrogen_charge_neutrality() {
        let h = element("H");
        let n_total = 1e21;
        let sol = solve_electron_density(h, 10_000.0, n_total, &GroundStateModel, &SolverConfig::default())
            .unwrap();
        assert!(sol.converged);
        assert!(sol.iterations <= 50);
        let expected = n_total * sol.result.average_ionization();
        assert!(
            ((sol.electron_density_m3 - expected) / expected).abs() < 1e-5,
            "n_e = {}, n_total·Z̄ = {expected}",
            sol.electron_density_m3
        );
        assert!(sol.electron_density_m3 < n_total);
    }

    #[test]
    fn test_argon_bounded_by_full_ionization() {
        let ar = element("Ar");
        let n_total = 1e22;
        let sol = solve_electron_density(ar, 15_000.0, n_total, &GroundStateModel, &SolverConfig::default())
            .unwrap();
        assert!(sol.electron_density_m3 > 0.0);
        assert!(sol.electron_density_m3 <= n_total * 18.0);
        let sum: f64 = sol.result.fractions.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let h = element("H");
        let config = SolverConfig {
            max_iterations: 3,
            tolerance: 1e-12,
        };
        let sol = solve_electron_density(h, 10_000.0, 1e21, &GroundStateModel, &config).unwrap();
        assert!(!sol.converged);
        assert_eq!(sol.iterations, 3);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let h = element("H");
        let cfg = SolverConfig::default();
        assert!(matches!(
            solve_electron_density(h, 0.0, 1e21, &GroundStateModel, &cfg),
            Err(IonError::InvalidInput(_))
        ));
        assert!(matches!(
            solve_electron_density(h, 1e4, -1.0, &GroundStateModel, &cfg),
            Err(IonError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_element_without_transitions() {
        let bare = Element {
            atomic_number: 1,
            symbol: "X".to_string(),
            name: "Test".to_string(),
            stages: vec![ion_types::state::IonStage {
                charge: 0,
                ground_level: None,
                ionization_energy_ev: None,
            }],
        };
        assert!(matches!(
            solve_electron_density(&bare, 1e4, 1e21, &GroundStateModel, &SolverConfig::default()),
            Err(IonError::InvalidInput(_))
        ));
    }
}
