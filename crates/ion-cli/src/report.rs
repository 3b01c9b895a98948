// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Text Reports
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Plain-text tables and CSV for terminal output.

use std::fmt::Write;

use ndarray::{Array1, Array2};

use ion_core::atomic_data::AtomicDatabase;
use ion_core::equilibrium::EquilibriumSolution;
use ion_core::notation::spectroscopic_name;
use ion_core::scan::ScanResult;
use ion_types::config::PresetTable;
use ion_types::constants::PER_CM3_TO_PER_M3;
use ion_types::state::{dominant_stage, IonizationResult};

pub fn elements_table(db: &AtomicDatabase) -> String {
    let mut out = format!("{:>3}  {:<3} {:<12} {:>6}\n", "Z", "Sym", "Name", "Stages");
    for el in db.elements() {
        let _ = writeln!(
            out,
            "{:>3}  {:<3} {:<12} {:>6}",
            el.atomic_number,
            el.symbol,
            el.name,
            el.stages.len()
        );
    }
    out
}

pub fn presets_table(table: &PresetTable) -> String {
    let mut out = format!(
        "{:<20} {:>10} {:>12}  {}\n",
        "Preset", "T (K)", "ne (cm⁻³)", "Description"
    );
    for (name, p) in &table.presets {
        let _ = writeln!(
            out,
            "{:<20} {:>10.0} {:>12.3e}  {}",
            name, p.temperature, p.electron_density, p.description
        );
    }
    out
}

pub fn fractions_table(result: &IonizationResult) -> String {
    let c = &result.condition;
    let mut out = format!(
        "{}  T = {:.0} K  ne = {:.3e} cm⁻³\n",
        result.symbol,
        c.temperature_k,
        c.electron_density_cm3()
    );
    let _ = writeln!(out, "{:<10} {:>12} {:>10}", "Stage", "Fraction (%)", "U");
    for (i, (f, u)) in result
        .fractions
        .iter()
        .zip(&result.partition_functions)
        .enumerate()
    {
        let _ = writeln!(
            out,
            "{:<10} {:>12.4} {:>10.3}",
            spectroscopic_name(&result.symbol, i),
            f * 100.0,
            u
        );
    }
    let _ = writeln!(out, "Average ionization: {:.4}", result.average_ionization());
    let _ = writeln!(
        out,
        "Dominant stage: {}",
        spectroscopic_name(&result.symbol, result.dominant_stage())
    );
    out
}

/// One row per scan point: axis value then every stage fraction.
pub fn scan_csv(scan: &ScanResult, symbol: &str, axis_label: &str) -> String {
    let mut out = axis_label.to_string();
    for stage in 0..scan.stages() {
        out.push(',');
        out.push_str(&spectroscopic_name(symbol, stage));
    }
    out.push('\n');
    for (x, row) in scan.axis.iter().zip(scan.fractions.rows()) {
        out.push_str(&format!("{x:.6e}"));
        for f in row {
            let _ = write!(out, ",{f:.6e}");
        }
        out.push('\n');
    }
    out
}

/// Axis value, mean charge and dominant stage per point.
pub fn scan_summary(scan: &ScanResult, symbol: &str, axis_label: &str) -> String {
    let z = scan.average_ionization();
    let mut out = format!("{axis_label:>14} {:>8}  {}\n", "Z̄", "Dominant");
    for ((x, row), z) in scan.axis.iter().zip(scan.fractions.rows()).zip(z.iter()) {
        let dominant = dominant_stage(&row);
        let _ = writeln!(
            out,
            "{x:>14.4e} {z:>8.4}  {}",
            spectroscopic_name(symbol, dominant)
        );
    }
    out
}

/// Mean-charge grid: first row holds temperatures [K], first column n_e [cm⁻³].
pub fn map_csv(map: &Array2<f64>, temperatures_k: &Array1<f64>, densities_m3: &Array1<f64>) -> String {
    let mut out = String::from("ne_cm3\\T_K");
    for t in temperatures_k {
        let _ = write!(out, ",{t:.1}");
    }
    out.push('\n');
    for (ne, row) in densities_m3.iter().zip(map.rows()) {
        let _ = write!(out, "{:.4e}", ne / PER_CM3_TO_PER_M3);
        for z in row {
            let _ = write!(out, ",{z:.5}");
        }
        out.push('\n');
    }
    out
}

pub fn solution_report(solution: &EquilibriumSolution, total_density_cm3: f64) -> String {
    let mut out = format!(
        "n_total = {total_density_cm3:.4e} cm⁻³\nne = {:.6e} cm⁻³ ({:.6e} m⁻³)\n",
        solution.electron_density_m3 / PER_CM3_TO_PER_M3,
        solution.electron_density_m3
    );
    let status = if solution.converged { "converged" } else { "NOT converged" };
    let _ = writeln!(out, "{status} after {} iterations\n", solution.iterations);
    out.push_str(&fractions_table(&solution.result));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ion_types::state::Condition;

    fn result() -> IonizationResult {
        IonizationResult {
            symbol: "H".to_string(),
            condition: Condition::from_cgs(10_000.0, 1e14),
            partition_functions: vec![2.0, 1.0],
            fractions: vec![0.25, 0.75],
        }
    }

    #[test]
    fn test_fractions_table_lists_every_stage() {
        let text = fractions_table(&result());
        assert!(text.contains("H I"));
        assert!(text.contains("H II"));
        assert!(text.contains("75.0000"));
        assert!(text.contains("Average ionization: 0.7500"));
        assert!(text.contains("Dominant stage: H II"));
    }

    #[test]
    fn test_scan_csv_layout() {
        let scan = ScanResult {
            axis: Array1::from(vec![5000.0, 6000.0]),
            fractions: Array2::from_shape_vec((2, 2), vec![0.9, 0.1, 0.4, 0.6]).unwrap(),
        };
        let csv = scan_csv(&scan, "Na", "T_K");
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "T_K,Na I,Na II");
        assert_eq!(lines[1].split(',').count(), 3);

        let summary = scan_summary(&scan, "Na", "T_K");
        assert!(summary.lines().nth(2).unwrap().ends_with("Na II"));
    }

    #[test]
    fn test_map_csv_in_cgs() {
        let map = Array2::from_elem((1, 2), 0.5);
        let t = Array1::from(vec![5000.0, 6000.0]);
        let ne = Array1::from(vec![1e20]);
        let csv = map_csv(&map, &t, &ne);
        assert!(csv.lines().nth(1).unwrap().starts_with("1.0000e14"));
    }

    #[test]
    fn test_presets_table() {
        let text = presets_table(&PresetTable::builtin());
        assert!(text.contains("ICP Standard"));
        assert!(text.contains("Arc Discharge"));
    }

    #[test]
    fn test_elements_table() {
        let db = AtomicDatabase::builtin().unwrap();
        let text = elements_table(db);
        assert!(text.lines().any(|l| l.contains("Fe") && l.contains("Iron")));
    }
}
