// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Property-Based Tests (proptest) for ion-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for ion-types using proptest.
//!
//! Covers: Condition unit conversions and validation, Element ladder
//! invariants, preset serialization roundtrip.

use ion_types::config::{PlasmaPreset, PresetTable};
use ion_types::constants::{K_BOLTZMANN, K_BOLTZMANN_EV, Q_ELECTRON};
use ion_types::state::{Condition, Element, IonStage};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn ladder(energies: &[f64]) -> Element {
    let mut stages: Vec<IonStage> = energies
        .iter()
        .enumerate()
        .map(|(i, &e)| IonStage {
            charge: i as u32,
            ground_level: Some("1S0".to_string()),
            ionization_energy_ev: Some(e),
        })
        .collect();
    stages.push(IonStage {
        charge: energies.len() as u32,
        ground_level: None,
        ionization_energy_ev: None,
    });
    Element {
        atomic_number: energies.len() as u32,
        symbol: "X".to_string(),
        name: "Test".to_string(),
        stages,
    }
}

// ── Condition Invariants ─────────────────────────────────────────────

proptest! {
    /// cm⁻³ → m⁻³ → cm⁻³ is the identity.
    #[test]
    fn cgs_density_roundtrip(t in 1.0f64..1e8, log_ne in 0.0f64..25.0) {
        let ne = 10f64.powf(log_ne);
        let c = Condition::from_cgs(t, ne);
        prop_assert!((c.electron_density_cm3() - ne).abs() / ne < 1e-12);
        prop_assert!((c.electron_density_m3 / ne - 1e6).abs() < 1e-3);
    }

    /// k_B·T in eV agrees with the SI definition.
    #[test]
    fn kt_ev_consistent(t in 1.0f64..1e8) {
        let c = Condition::new(t, 1e20);
        let si = K_BOLTZMANN * t / Q_ELECTRON;
        prop_assert!((c.kt_ev() - si).abs() / si < 1e-12);
        prop_assert!((Condition::from_ev(c.kt_ev(), 1e20).temperature_k - t).abs() / t < 1e-12);
        prop_assert!((K_BOLTZMANN_EV - 8.617333262e-5).abs() < 1e-14);
    }

    /// Positive finite conditions validate; non-positive ones never do.
    #[test]
    fn condition_validation(t in 1e-3f64..1e9, ne in 1e-3f64..1e30, bad in -1e9f64..=0.0) {
        prop_assert!(Condition::new(t, ne).validate().is_ok());
        prop_assert!(Condition::new(bad, ne).validate().is_err());
        prop_assert!(Condition::new(t, bad).validate().is_err());
    }
}

// ── Element Ladder Invariants ────────────────────────────────────────

proptest! {
    /// A well-formed ladder has n transitions and n energies.
    #[test]
    fn ladder_shape(energies in prop::collection::vec(0.1f64..5000.0, 0..30)) {
        let el = ladder(&energies);
        prop_assert!(el.validate().is_ok());
        prop_assert_eq!(el.transitions(), energies.len());
        prop_assert_eq!(el.ionization_energies(), energies.clone());
        prop_assert_eq!(el.max_ion_charge() as usize, energies.len());
    }

    /// Dropping any intermediate energy breaks the ladder.
    #[test]
    fn ladder_missing_energy_rejected(
        energies in prop::collection::vec(0.1f64..5000.0, 1..30),
        idx in any::<prop::sample::Index>(),
    ) {
        let mut el = ladder(&energies);
        let i = idx.index(energies.len());
        el.stages[i].ionization_energy_ev = None;
        prop_assert!(el.validate().is_err());
    }
}

// ── Preset Serialization ─────────────────────────────────────────────

proptest! {
    /// Preset tables survive a JSON roundtrip.
    #[test]
    fn preset_roundtrip(
        t in 500.0f64..1e5,
        log_ne in 8.0f64..20.0,
        pressure in prop::option::of(1.0f64..1e6),
    ) {
        let mut presets = BTreeMap::new();
        presets.insert("P".to_string(), PlasmaPreset {
            temperature: t,
            electron_density: 10f64.powf(log_ne),
            description: "generated".to_string(),
            pressure,
        });
        let table = PresetTable { presets };
        let json = serde_json::to_string(&table).unwrap();
        let back = PresetTable::from_json_str(&json).unwrap();
        let (a, b) = (&table.presets["P"], &back.presets["P"]);
        prop_assert!((a.temperature - b.temperature).abs() / a.temperature < 1e-14);
        prop_assert!((a.electron_density - b.electron_density).abs() / a.electron_density < 1e-14);
        prop_assert_eq!(a.pressure.is_some(), b.pressure.is_some());
        prop_assert_eq!(&a.description, &b.description);
    }
}
