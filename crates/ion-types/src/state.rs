// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{K_BOLTZMANN_EV, KELVIN_PER_EV, PER_CM3_TO_PER_M3};
use crate::error::{IonError, IonResult};

/// Plasma condition at which an equilibrium is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Temperature [K]
    pub temperature_k: f64,
    /// Electron density [m⁻³]
    pub electron_density_m3: f64,
    /// Pressure context [Pa], informational only (presets).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_pa: Option<f64>,
}

impl Condition {
    pub fn new(temperature_k: f64, electron_density_m3: f64) -> Self {
        Condition {
            temperature_k,
            electron_density_m3,
            pressure_pa: None,
        }
    }

    /// Electron density given in cm⁻³, as in the NIST/ICP literature.
    pub fn from_cgs(temperature_k: f64, electron_density_cm3: f64) -> Self {
        Self::new(temperature_k, electron_density_cm3 * PER_CM3_TO_PER_M3)
    }

    /// Temperature given as k_B·T in eV.
    pub fn from_ev(temperature_ev: f64, electron_density_m3: f64) -> Self {
        Self::new(temperature_ev * KELVIN_PER_EV, electron_density_m3)
    }

    pub fn with_pressure(mut self, pressure_pa: f64) -> Self {
        self.pressure_pa = Some(pressure_pa);
        self
    }

    /// k_B·T [eV]
    pub fn kt_ev(&self) -> f64 {
        K_BOLTZMANN_EV * self.temperature_k
    }

    pub fn electron_density_cm3(&self) -> f64 {
        self.electron_density_m3 / PER_CM3_TO_PER_M3
    }

    pub fn validate(&self) -> IonResult<()> {
        if !self.temperature_k.is_finite() || self.temperature_k <= 0.0 {
            return Err(IonError::InvalidInput(format!(
                "temperature must be finite and > 0 K, got {}",
                self.temperature_k
            )));
        }
        if !self.electron_density_m3.is_finite() || self.electron_density_m3 <= 0.0 {
            return Err(IonError::InvalidInput(format!(
                "electron density must be finite and > 0 m^-3, got {}",
                self.electron_density_m3
            )));
        }
        Ok(())
    }
}

/// One ionization stage of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IonStage {
    /// Ion charge: 0 = neutral.
    pub charge: u32,
    /// NIST ground-level term, e.g. `2S<1/2>`. None for the bare nucleus.
    pub ground_level: Option<String>,
    /// Energy to remove the next electron [eV]. None on the highest stage.
    pub ionization_energy_ev: Option<f64>,
}

/// Element with its ordered ionization ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    /// Stages 0..=n, where n is the number of transitions.
    pub stages: Vec<IonStage>,
}

impl Element {
    /// Number of ionization transitions (stages minus one).
    pub fn transitions(&self) -> usize {
        self.stages.len().saturating_sub(1)
    }

    pub fn max_ion_charge(&self) -> u32 {
        self.stages.last().map(|s| s.charge).unwrap_or(0)
    }

    /// E_1..E_n in eV. Stages lacking an energy are skipped; `validate`
    /// rejects such ladders.
    pub fn ionization_energies(&self) -> Vec<f64> {
        self.stages
            .iter()
            .filter_map(|s| s.ionization_energy_ev)
            .collect()
    }

    /// Structural check: contiguous charges from 0, an energy on every stage
    /// except the last, finite energies.
    pub fn validate(&self) -> IonResult<()> {
        if self.stages.is_empty() {
            return Err(IonError::InvalidInput(format!(
                "element {} has no ionization stages",
                self.symbol
            )));
        }
        let last = self.stages.len() - 1;
        for (i, stage) in self.stages.iter().enumerate() {
            if stage.charge as usize != i {
                return Err(IonError::InvalidInput(format!(
                    "element {}: stage {} has charge {}",
                    self.symbol, i, stage.charge
                )));
            }
            match (i < last, stage.ionization_energy_ev) {
                (true, None) => {
                    return Err(IonError::InvalidInput(format!(
                        "element {}: missing ionization energy for charge {}",
                        self.symbol, i
                    )));
                }
                (true, Some(e)) if !e.is_finite() => {
                    return Err(IonError::InvalidInput(format!(
                        "element {}: non-finite ionization energy for charge {}",
                        self.symbol, i
                    )));
                }
                (false, Some(_)) => {
                    return Err(IonError::InvalidInput(format!(
                        "element {}: highest stage {} cannot carry an ionization energy",
                        self.symbol, i
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Mean charge Σ i·f_i of a stage distribution.
pub fn mean_charge(fractions: &[f64]) -> f64 {
    fractions
        .iter()
        .enumerate()
        .map(|(i, f)| i as f64 * f)
        .sum()
}

/// Index of the most populated stage; the lowest index wins ties.
pub fn dominant_stage<'a>(fractions: impl IntoIterator<Item = &'a f64>) -> usize {
    fractions
        .into_iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &f)| {
            if f > best.1 {
                (i, f)
            } else {
                best
            }
        })
        .0
}

/// Equilibrium populations for one (element, condition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IonizationResult {
    pub symbol: String,
    pub condition: Condition,
    /// Partition function value per stage.
    pub partition_functions: Vec<f64>,
    /// Population fraction per stage, sums to 1.
    pub fractions: Vec<f64>,
}

impl IonizationResult {
    /// Mean charge Σ i·f_i.
    pub fn average_ionization(&self) -> f64 {
        mean_charge(&self.fractions)
    }

    /// Stage with the largest population.
    pub fn dominant_stage(&self) -> usize {
        dominant_stage(&self.fractions)
    }

    pub fn fraction(&self, charge: usize) -> Option<f64> {
        self.fractions.get(charge).copied()
    }
}
