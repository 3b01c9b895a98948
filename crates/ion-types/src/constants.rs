// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CODATA 2018 exact/recommended values, SI units unless noted.

/// Boltzmann constant (J/K)
pub const K_BOLTZMANN: f64 = 1.380649e-23;

/// Elementary charge (C), also the J per eV conversion.
pub const Q_ELECTRON: f64 = 1.602176634e-19;

/// Joules per electron-volt.
pub const EV_TO_J: f64 = Q_ELECTRON;

/// Boltzmann constant (eV/K)
pub const K_BOLTZMANN_EV: f64 = K_BOLTZMANN / EV_TO_J;

/// Planck constant (J·s)
pub const H_PLANCK: f64 = 6.62607015e-34;

/// Electron mass (kg)
pub const M_ELECTRON: f64 = 9.1093837015e-31;

/// Statistical weight of the free electron (spin 1/2).
pub const G_ELECTRON: f64 = 2.0;

/// Thermal de Broglie coefficient 2π m_e k_B / h² (m⁻² K⁻¹).
/// Saha prefactor is (SAHA_COEFF · T)^{3/2}.
pub const SAHA_COEFF: f64 =
    2.0 * std::f64::consts::PI * M_ELECTRON * K_BOLTZMANN / (H_PLANCK * H_PLANCK);

/// cm⁻³ → m⁻³
pub const PER_CM3_TO_PER_M3: f64 = 1.0e6;

/// Kelvin per electron-volt of temperature.
pub const KELVIN_PER_EV: f64 = 1.0 / K_BOLTZMANN_EV;
