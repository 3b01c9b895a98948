// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Saha Evaluator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Equilibrium ionization fractions from the Saha equation.
//!
//! N_{i+1}/N_i = (2 g_{i+1} / (n_e g_i)) · (2π m_e k_B T / h²)^{3/2} · exp(−E_i / k_B T)
//!
//! Ratios are accumulated as ln N_i with ln N_0 = 0 and normalized with a
//! log-sum-exp shift, so low-T / high-E ladders never overflow in linear
//! space. A log ratio of −∞ is a legitimate underflow (empty stage); +∞ or
//! NaN cannot be represented and is reported as `NumericOverflow`.

use log::debug;

use ion_types::constants::{G_ELECTRON, K_BOLTZMANN_EV, SAHA_COEFF};
use ion_types::error::{IonError, IonResult};
use ion_types::state::{Condition, Element, IonizationResult};

use crate::partition::PartitionModel;

/// ln(N_{i+1}/N_i) for one transition. No validation.
pub fn log_saha_ratio(energy_ev: f64, partition_ratio: f64, condition: &Condition) -> f64 {
    let t = condition.temperature_k;
    let kt_ev = K_BOLTZMANN_EV * t;
    // kT can underflow to zero for subnormal T; a zero energy then has no Boltzmann penalty.
    let boltzmann = if energy_ev == 0.0 {
        0.0
    } else {
        energy_ev / kt_ev
    };
    G_ELECTRON.ln() + partition_ratio.ln() - condition.electron_density_m3.ln()
        + 1.5 * (SAHA_COEFF.ln() + t.ln())
        - boltzmann
}

/// N_{i+1}/N_i in linear space. May be 0 or ∞ at extreme conditions.
pub fn saha_ratio(energy_ev: f64, partition_ratio: f64, condition: &Condition) -> f64 {
    log_saha_ratio(energy_ev, partition_ratio, condition).exp()
}

fn validate_ladder(energies: &[f64], partition_ratios: &[f64]) -> IonResult<()> {
    if energies.len() != partition_ratios.len() {
        return Err(IonError::InvalidInput(format!(
            "got {} ionization energies but {} partition ratios",
            energies.len(),
            partition_ratios.len()
        )));
    }
    if let Some((i, e)) = energies.iter().enumerate().find(|(_, e)| !e.is_finite()) {
        return Err(IonError::InvalidInput(format!(
            "ionization energy {} must be finite, got {e}",
            i + 1
        )));
    }
    if let Some((i, g)) = partition_ratios
        .iter()
        .enumerate()
        .find(|(_, g)| !g.is_finite() || **g <= 0.0)
    {
        return Err(IonError::InvalidInput(format!(
            "partition ratio {} must be finite and > 0, got {g}",
            i + 1
        )));
    }
    Ok(())
}

/// Population fractions of stages 0..=n for energies E_1..E_n [eV] and
/// partition ratios g_{i+1}/g_i.
///
/// The result has length n+1, every entry in [0, 1], summing to 1.
pub fn ionization_fractions(
    energies: &[f64],
    partition_ratios: &[f64],
    condition: &Condition,
) -> IonResult<Vec<f64>> {
    condition.validate()?;
    validate_ladder(energies, partition_ratios)?;

    if energies.is_empty() {
        return Ok(vec![1.0]);
    }

    let mut log_n = Vec::with_capacity(energies.len() + 1);
    log_n.push(0.0);
    for (i, (&e, &g)) in energies.iter().zip(partition_ratios).enumerate() {
        let log_k = log_saha_ratio(e, g, condition);
        if log_k.is_nan() || log_k == f64::INFINITY {
            return Err(IonError::NumericOverflow {
                stage: i + 1,
                message: format!("ln(N_{}/N_{}) = {log_k}", i + 1, i),
            });
        }
        let next = log_n[i] + log_k;
        if next.is_nan() || next == f64::INFINITY {
            return Err(IonError::NumericOverflow {
                stage: i + 1,
                message: format!("accumulated ln(N_{}/N_0) = {next}", i + 1),
            });
        }
        log_n.push(next);
    }

    normalize_log_populations(&log_n)
}

/// exp(ln N_i − max) / Σ exp(ln N_j − max).
fn normalize_log_populations(log_n: &[f64]) -> IonResult<Vec<f64>> {
    let max = log_n.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return Err(IonError::NumericOverflow {
            stage: 0,
            message: format!("largest log population is {max}"),
        });
    }
    let weights: Vec<f64> = log_n.iter().map(|l| (l - max).exp()).collect();
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(IonError::NumericOverflow {
            stage: 0,
            message: format!("normalization sum is {total}"),
        });
    }
    Ok(weights.into_iter().map(|w| w / total).collect())
}

/// Partition function value per stage from `model`, validated.
pub fn partition_functions(
    element: &Element,
    temperature_k: f64,
    model: &dyn PartitionModel,
) -> IonResult<Vec<f64>> {
    element
        .stages
        .iter()
        .map(|stage| {
            let z = model.partition_function(stage, temperature_k);
            if !z.is_finite() || z <= 0.0 {
                return Err(IonError::InvalidInput(format!(
                    "{}: partition function of charge {} must be finite and > 0, got {z}",
                    element.symbol, stage.charge
                )));
            }
            Ok(z)
        })
        .collect()
}

/// Evaluate an element's full ladder at `condition`.
pub fn evaluate_element(
    element: &Element,
    condition: &Condition,
    model: &dyn PartitionModel,
) -> IonResult<IonizationResult> {
    element.validate()?;
    condition.validate()?;

    let partition = partition_functions(element, condition.temperature_k, model)?;
    let ratios: Vec<f64> = partition.windows(2).map(|w| w[1] / w[0]).collect();
    let energies = element.ionization_energies();
    let fractions = ionization_fractions(&energies, &ratios, condition)?;

    debug!(
        "{} at T={:.1} K, n_e={:.3e} m^-3: {} stages",
        element.symbol,
        condition.temperature_k,
        condition.electron_density_m3,
        fractions.len()
    );

    Ok(IonizationResult {
        symbol: element.symbol.clone(),
        condition: *condition,
        partition_functions: partition,
        fractions,
    })
}

/// Mean ion charge Σ i·f_i.
pub use ion_types::state::mean_charge as average_ionization;
