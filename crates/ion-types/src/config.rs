// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{IonError, IonResult};
use crate::state::Condition;

/// Named plasma condition. Maps 1:1 to an entry of `plasma_presets.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlasmaPreset {
    /// Temperature [K]
    pub temperature: f64,
    /// Electron density [cm⁻³]
    pub electron_density: f64,
    #[serde(default)]
    pub description: String,
    /// Pressure context [Pa]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl PlasmaPreset {
    pub fn condition(&self) -> Condition {
        let c = Condition::from_cgs(self.temperature, self.electron_density);
        match self.pressure {
            Some(p) => c.with_pressure(p),
            None => c,
        }
    }
}

/// Preset lookup table, `{"presets": {name: preset}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetTable {
    pub presets: BTreeMap<String, PlasmaPreset>,
}

/// Preset selected when the user has not chosen one.
pub const DEFAULT_PRESET: &str = "ICP Standard";

impl PresetTable {
    pub fn from_json_str(text: &str) -> IonResult<Self> {
        let table: Self = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_file(path: impl AsRef<Path>) -> IonResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_json_str(&contents)?;
        debug!(
            "loaded {} presets from {}",
            table.presets.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Load from `path`, falling back to the built-in table if the file is
    /// missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    "using built-in presets, could not load {}: {e}",
                    path.as_ref().display()
                );
                Self::builtin()
            }
        }
    }

    pub fn builtin() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert(
            DEFAULT_PRESET.to_string(),
            PlasmaPreset {
                temperature: 7000.0,
                electron_density: 1e15,
                description: "Typical ICP-OES conditions".to_string(),
                pressure: Some(101_325.0),
            },
        );
        presets.insert(
            "Arc Discharge".to_string(),
            PlasmaPreset {
                temperature: 10_000.0,
                electron_density: 1e17,
                description: "Atmospheric-pressure arc column".to_string(),
                pressure: Some(101_325.0),
            },
        );
        presets.insert(
            "Custom".to_string(),
            PlasmaPreset {
                temperature: 7000.0,
                electron_density: 1e15,
                description: "Custom settings".to_string(),
                pressure: None,
            },
        );
        PresetTable { presets }
    }

    pub fn get(&self, name: &str) -> IonResult<&PlasmaPreset> {
        self.presets
            .get(name)
            .ok_or_else(|| IonError::Config(format!("unknown preset: {name}")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    fn validate(&self) -> IonResult<()> {
        for (name, p) in &self.presets {
            if !p.temperature.is_finite() || p.temperature <= 0.0 {
                return Err(IonError::Config(format!(
                    "preset '{name}': temperature must be finite and > 0, got {}",
                    p.temperature
                )));
            }
            if !p.electron_density.is_finite() || p.electron_density <= 0.0 {
                return Err(IonError::Config(format!(
                    "preset '{name}': electron density must be finite and > 0, got {}",
                    p.electron_density
                )));
            }
        }
        Ok(())
    }
}

/// Linear temperature grid [K].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureScanConfig {
    #[serde(default = "default_t_min")]
    pub t_min: f64,
    #[serde(default = "default_t_max")]
    pub t_max: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

/// Logarithmic electron-density grid, bounds as log10(n_e [cm⁻³]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityScanConfig {
    #[serde(default = "default_log_ne_min")]
    pub log_ne_min: f64,
    #[serde(default = "default_log_ne_max")]
    pub log_ne_max: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_t_min() -> f64 {
    3000.0
}
fn default_t_max() -> f64 {
    15_000.0
}
fn default_log_ne_min() -> f64 {
    12.0
}
fn default_log_ne_max() -> f64 {
    17.0
}
fn default_points() -> usize {
    100
}

impl Default for TemperatureScanConfig {
    fn default() -> Self {
        TemperatureScanConfig {
            t_min: default_t_min(),
            t_max: default_t_max(),
            points: default_points(),
        }
    }
}

impl Default for DensityScanConfig {
    fn default() -> Self {
        DensityScanConfig {
            log_ne_min: default_log_ne_min(),
            log_ne_max: default_log_ne_max(),
            points: default_points(),
        }
    }
}

impl TemperatureScanConfig {
    pub fn validate(&self) -> IonResult<()> {
        if !self.t_min.is_finite() || !self.t_max.is_finite() || self.t_min <= 0.0 {
            return Err(IonError::Config(format!(
                "temperature scan bounds must be finite with t_min > 0, got [{}, {}]",
                self.t_min, self.t_max
            )));
        }
        if self.t_min >= self.t_max {
            return Err(IonError::Config(format!(
                "temperature scan requires t_min < t_max, got [{}, {}]",
                self.t_min, self.t_max
            )));
        }
        if self.points < 2 {
            return Err(IonError::Config(format!(
                "temperature scan requires at least 2 points, got {}",
                self.points
            )));
        }
        Ok(())
    }
}

impl DensityScanConfig {
    pub fn validate(&self) -> IonResult<()> {
        if !self.log_ne_min.is_finite() || !self.log_ne_max.is_finite() {
            return Err(IonError::Config(format!(
                "density scan bounds must be finite, got [{}, {}]",
                self.log_ne_min, self.log_ne_max
            )));
        }
        if self.log_ne_min >= self.log_ne_max {
            return Err(IonError::Config(format!(
                "density scan requires log_ne_min < log_ne_max, got [{}, {}]",
                self.log_ne_min, self.log_ne_max
            )));
        }
        if self.points < 2 {
            return Err(IonError::Config(format!(
                "density scan requires at least 2 points, got {}",
                self.points
            )));
        }
        Ok(())
    }
}

/// Self-consistent electron density iteration settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// Relative tolerance on n_e.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_iterations: 50,
            tolerance: 1e-6,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> IonResult<()> {
        if self.max_iterations == 0 {
            return Err(IonError::Config(
                "solver requires max_iterations >= 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(IonError::Config(format!(
                "solver tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/ion-types/, the workspace root is
    /// two levels up.
    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
    }

    #[test]
    fn test_load_presets_file() {
        let table = PresetTable::from_file(project_root().join("data/plasma_presets.json"))
            .expect("bundled presets must parse");
        let icp = table.get(DEFAULT_PRESET).unwrap();
        assert!((icp.temperature - 7000.0).abs() < 1e-10);
        assert!((icp.electron_density - 1e15).abs() < 1.0);
        assert!(table.get("Arc Discharge").is_ok());
        assert!(table.get("Custom").is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let table = PresetTable::load_or_default(project_root().join("data/does_not_exist.json"));
        assert_eq!(table, PresetTable::builtin());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = PresetTable::from_file("/nonexistent/plasma_presets.json").unwrap_err();
        assert!(matches!(err, IonError::Io(_)));
    }

    #[test]
    fn test_preset_condition_in_si() {
        let table = PresetTable::builtin();
        let c = table.get(DEFAULT_PRESET).unwrap().condition();
        assert!((c.temperature_k - 7000.0).abs() < 1e-10);
        assert!((c.electron_density_m3 - 1e21).abs() / 1e21 < 1e-12);
        assert_eq!(c.pressure_pa, Some(101_325.0));
    }

    #[test]
    fn test_unknown_preset() {
        let table = PresetTable::builtin();
        assert!(matches!(table.get("Tokamak"), Err(IonError::Config(_))));
    }

    #[test]
    fn test_preset_defaults_and_rejection() {
        let json = r#"{"presets": {"Flame": {"temperature": 2500, "electron_density": 1e10}}}"#;
        let table = PresetTable::from_json_str(json).unwrap();
        let flame = table.get("Flame").unwrap();
        assert!(flame.description.is_empty());
        assert!(flame.pressure.is_none());

        let bad = r#"{"presets": {"Cold": {"temperature": 0, "electron_density": 1e10}}}"#;
        assert!(matches!(
            PresetTable::from_json_str(bad),
            Err(IonError::Config(_))
        ));
        assert!(matches!(
            PresetTable::from_json_str("{"),
            Err(IonError::Json(_))
        ));
    }

    #[test]
    fn test_scan_config_defaults() {
        let t: TemperatureScanConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(t, TemperatureScanConfig::default());
        assert!(t.validate().is_ok());
        let n: DensityScanConfig = serde_json::from_str(r#"{"points": 20}"#).unwrap();
        assert_eq!(n.points, 20);
        assert!((n.log_ne_min - 12.0).abs() < 1e-12);
        assert!(n.validate().is_ok());
    }

    #[test]
    fn test_scan_config_rejects_bad_ranges() {
        let t = TemperatureScanConfig {
            t_min: 5000.0,
            t_max: 5000.0,
            points: 10,
        };
        assert!(t.validate().is_err());
        let t = TemperatureScanConfig {
            t_min: 0.0,
            t_max: 5000.0,
            points: 10,
        };
        assert!(t.validate().is_err());
        let n = DensityScanConfig {
            points: 1,
            ..Default::default()
        };
        assert!(n.validate().is_err());
        assert!(SolverConfig {
            max_iterations: 0,
            tolerance: 1e-6
        }
        .validate()
        .is_err());
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let table = PresetTable::builtin();
        let json = serde_json::to_string_pretty(&table).unwrap();
        let table2 = PresetTable::from_json_str(&json).unwrap();
        assert_eq!(table, table2);
    }
}
