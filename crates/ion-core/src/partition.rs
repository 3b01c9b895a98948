// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Partition Functions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Partition functions from NIST ground-level notation.
//!
//! The ground term `2S+1 L J` carries J either as a fraction in angle
//! brackets (`2S<1/2>`, `4S*<3/2>`) or as a trailing integer (`3P2`).
//! The ground-state approximation Z ≈ g₀ = 2J+1 is adequate at ICP
//! temperatures (6000–10000 K); it underestimates Z at high T.

use ion_types::state::IonStage;

/// Parse J and g = 2J+1 from a ground-level term.
///
/// Returns `None` when neither form is present.
pub fn parse_ground_level(notation: &str) -> Option<(f64, u32)> {
    let notation = notation.trim();

    if let Some(j) = bracketed_fraction(notation) {
        let g = (2.0 * j + 1.0).round();
        return (g <= u32::MAX as f64).then(|| (j, g as u32));
    }

    let digits_start = notation
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    let j: u32 = notation[digits_start..].parse().ok()?;
    let g = j.checked_mul(2)?.checked_add(1)?;
    Some((j as f64, g))
}

/// `<a/b>` anywhere in the term.
fn bracketed_fraction(notation: &str) -> Option<f64> {
    let open = notation.find('<')?;
    let rest = &notation[open + 1..];
    let close = rest.find('>')?;
    let (num, den) = rest[..close].split_once('/')?;
    let num: u32 = num.trim().parse().ok()?;
    let den: u32 = den.trim().parse().ok()?;
    if den == 0 {
        return None;
    }
    Some(num as f64 / den as f64)
}

/// Ground-state degeneracy, 1 when the term is absent or unparseable.
pub fn ground_state_degeneracy(notation: Option<&str>) -> f64 {
    notation
        .and_then(parse_ground_level)
        .map(|(_, g)| g as f64)
        .unwrap_or(1.0)
}

/// Source of per-stage partition function values.
pub trait PartitionModel: Send + Sync {
    fn partition_function(&self, stage: &IonStage, temperature_k: f64) -> f64;
}

/// Z(T) = g₀, independent of temperature.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundStateModel;

impl PartitionModel for GroundStateModel {
    fn partition_function(&self, stage: &IonStage, _temperature_k: f64) -> f64 {
        ground_state_degeneracy(stage.ground_level.as_deref())
    }
}

/// Caller-supplied values indexed by charge, for tabulated or
/// temperature-corrected partition functions computed elsewhere.
#[derive(Debug, Clone, Default)]
pub struct TabulatedModel {
    pub values: Vec<f64>,
}

impl PartitionModel for TabulatedModel {
    fn partition_function(&self, stage: &IonStage, _temperature_k: f64) -> f64 {
        self.values
            .get(stage.charge as usize)
            .copied()
            .unwrap_or(f64::NAN)
    }
}
