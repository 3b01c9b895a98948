// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Ion Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Saha-equation ionization equilibrium.
//!
//! Evaluator, partition model, atomic data, parameter scans and the
//! self-consistent electron density solver.

pub mod atomic_data;
pub mod equilibrium;
pub mod notation;
pub mod partition;
pub mod saha;
pub mod scan;
