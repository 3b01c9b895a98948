// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Atomic Data
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ionization energy table (NIST ASD tab-separated export).
//!
//! One row per ion `(element, charge)`. Required columns, matched by name:
//! `At. num`, `Element`, `El. Name`, `Ion Charge`, `Ground Level`,
//! `Ionization Energy (eV)`. Lines starting with `#` are comments.
//!
//! A ladder running up to charge Z−1 is complete and gets an implied bare
//! nucleus stage (g = 1). A shorter ladder ends at its last listed ion; that
//! ion's ionization energy is dropped because the next stage is unknown.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::OnceLock;

use log::debug;

use ion_types::error::{IonError, IonResult};
use ion_types::state::{Element, IonStage};

const BUILTIN_TSV: &str = include_str!("../../../data/ionization_energies.tsv");

static BUILTIN: OnceLock<AtomicDatabase> = OnceLock::new();

const COL_Z: &str = "At. num";
const COL_SYMBOL: &str = "Element";
const COL_NAME: &str = "El. Name";
const COL_CHARGE: &str = "Ion Charge";
const COL_GROUND: &str = "Ground Level";
const COL_ENERGY: [&str; 2] = ["Ionization Energy (eV)", "Ionization Energy (b) (eV)"];

/// Read-only element lookup keyed by symbol and atomic number.
#[derive(Debug, Clone, Default)]
pub struct AtomicDatabase {
    elements: BTreeMap<u32, Element>,
    by_symbol: HashMap<String, u32>,
}

struct Columns {
    z: usize,
    symbol: usize,
    name: usize,
    charge: usize,
    ground: usize,
    energy: usize,
}

impl Columns {
    fn from_header(line_no: usize, header: &str) -> IonResult<Self> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let find = |wanted: &str| {
            names.iter().position(|n| *n == wanted).ok_or_else(|| {
                IonError::InvalidInput(format!(
                    "atomic data line {line_no}: missing column '{wanted}'"
                ))
            })
        };
        let energy = COL_ENERGY
            .iter()
            .find_map(|wanted| names.iter().position(|n| n == wanted))
            .ok_or_else(|| {
                IonError::InvalidInput(format!(
                    "atomic data line {line_no}: missing column '{}'",
                    COL_ENERGY[0]
                ))
            })?;
        Ok(Columns {
            z: find(COL_Z)?,
            symbol: find(COL_SYMBOL)?,
            name: find(COL_NAME)?,
            charge: find(COL_CHARGE)?,
            ground: find(COL_GROUND)?,
            energy,
        })
    }
}

struct Row {
    line_no: usize,
    symbol: String,
    name: String,
    ground_level: Option<String>,
    energy_ev: f64,
}

fn parse_u32(line_no: usize, column: &str, text: &str) -> IonResult<u32> {
    text.parse::<u32>().map_err(|e| {
        IonError::InvalidInput(format!(
            "atomic data line {line_no}: failed to parse '{column}' value '{text}': {e}"
        ))
    })
}

/// NIST brackets values derived by interpolation (`[..]`) or theory (`(..)`).
fn parse_energy(line_no: usize, text: &str) -> IonResult<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '(' | ')') && !c.is_whitespace())
        .collect();
    let val = cleaned.parse::<f64>().map_err(|e| {
        IonError::InvalidInput(format!(
            "atomic data line {line_no}: failed to parse ionization energy '{text}': {e}"
        ))
    })?;
    if !val.is_finite() {
        return Err(IonError::InvalidInput(format!(
            "atomic data line {line_no}: ionization energy must be finite, got {val}"
        )));
    }
    Ok(val)
}

impl AtomicDatabase {
    pub fn from_tsv_str(text: &str) -> IonResult<Self> {
        let mut columns: Option<Columns> = None;
        let mut rows: BTreeMap<u32, BTreeMap<u32, Row>> = BTreeMap::new();

        for (idx, raw_line) in text.lines().enumerate() {
            let line_no = idx + 1;
            if raw_line.trim().is_empty() || raw_line.trim_start().starts_with('#') {
                continue;
            }
            let cols = match &columns {
                Some(cols) => cols,
                None => {
                    columns = Some(Columns::from_header(line_no, raw_line)?);
                    continue;
                }
            };

            let fields: Vec<&str> = raw_line.split('\t').map(str::trim).collect();
            let field = |i: usize| fields.get(i).copied().unwrap_or("");

            let z = parse_u32(line_no, COL_Z, field(cols.z))?;
            let charge = parse_u32(line_no, COL_CHARGE, field(cols.charge))?;
            let symbol = field(cols.symbol);
            if symbol.is_empty() {
                return Err(IonError::InvalidInput(format!(
                    "atomic data line {line_no}: empty element symbol"
                )));
            }
            if charge >= z {
                return Err(IonError::InvalidInput(format!(
                    "atomic data line {line_no}: ion charge {charge} must be below Z = {z}"
                )));
            }
            let ground = field(cols.ground);
            let row = Row {
                line_no,
                symbol: symbol.to_string(),
                name: field(cols.name).to_string(),
                ground_level: (!ground.is_empty()).then(|| ground.to_string()),
                energy_ev: parse_energy(line_no, field(cols.energy))?,
            };

            let ions = rows.entry(z).or_default();
            if let Some(first) = ions.values().next() {
                if first.symbol != row.symbol {
                    return Err(IonError::InvalidInput(format!(
                        "atomic data line {line_no}: Z = {z} listed as both {} and {}",
                        first.symbol, row.symbol
                    )));
                }
            }
            if ions.insert(charge, row).is_some() {
                return Err(IonError::InvalidInput(format!(
                    "atomic data line {line_no}: duplicate row for {symbol} charge {charge}"
                )));
            }
        }

        if columns.is_none() {
            return Err(IonError::InvalidInput(
                "atomic data has no header row".to_string(),
            ));
        }

        let mut db = AtomicDatabase::default();
        for (z, ions) in rows {
            let element = build_element(z, ions)?;
            if let Some(other) = db.by_symbol.insert(element.symbol.clone(), z) {
                return Err(IonError::InvalidInput(format!(
                    "atomic data: symbol {} used for Z = {other} and Z = {z}",
                    element.symbol
                )));
            }
            db.elements.insert(z, element);
        }
        debug!("atomic data: {} elements", db.elements.len());
        Ok(db)
    }

    pub fn from_file(path: impl AsRef<Path>) -> IonResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let db = Self::from_tsv_str(&contents)?;
        debug!("atomic data loaded from {}", path.as_ref().display());
        Ok(db)
    }

    /// Embedded dataset, parsed once per process.
    pub fn builtin() -> IonResult<&'static AtomicDatabase> {
        if let Some(db) = BUILTIN.get() {
            return Ok(db);
        }
        let db = Self::from_tsv_str(BUILTIN_TSV)?;
        Ok(BUILTIN.get_or_init(|| db))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Symbols ordered by atomic number.
    pub fn symbols(&self) -> Vec<&str> {
        self.elements.values().map(|e| e.symbol.as_str()).collect()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn element(&self, symbol: &str) -> IonResult<&Element> {
        self.by_symbol
            .get(symbol)
            .and_then(|z| self.elements.get(z))
            .ok_or_else(|| IonError::InvalidInput(format!("no atomic data for element '{symbol}'")))
    }

    pub fn element_by_number(&self, atomic_number: u32) -> Option<&Element> {
        self.elements.get(&atomic_number)
    }

    fn stage(&self, symbol: &str, charge: u32) -> Option<&IonStage> {
        self.element(symbol).ok()?.stages.get(charge as usize)
    }

    pub fn ionization_energy(&self, symbol: &str, charge: u32) -> Option<f64> {
        self.stage(symbol, charge)?.ionization_energy_ev
    }

    pub fn ground_level(&self, symbol: &str, charge: u32) -> Option<&str> {
        self.stage(symbol, charge)?.ground_level.as_deref()
    }

    pub fn element_name(&self, symbol: &str) -> Option<&str> {
        self.element(symbol).ok().map(|e| e.name.as_str())
    }

    pub fn max_ion_charge(&self, symbol: &str) -> Option<u32> {
        self.element(symbol).ok().map(Element::max_ion_charge)
    }
}

fn build_element(z: u32, ions: BTreeMap<u32, Row>) -> IonResult<Element> {
    let count = ions.len() as u32;
    let gap = ions
        .iter()
        .enumerate()
        .find(|(i, (c, _))| *i as u32 != **c);
    if let Some((i, (charge, row))) = gap {
        return Err(IonError::InvalidInput(format!(
            "atomic data line {}: {} (Z = {z}) lists charge {charge} but charge {i} is missing",
            row.line_no, row.symbol
        )));
    }

    let mut symbol = String::new();
    let mut name = String::new();
    let mut stages = Vec::with_capacity(ions.len() + 1);
    for (charge, row) in ions {
        symbol = row.symbol;
        name = row.name;
        stages.push(IonStage {
            charge,
            ground_level: row.ground_level,
            ionization_energy_ev: Some(row.energy_ev),
        });
    }

    if count == z {
        stages.push(IonStage {
            charge: z,
            ground_level: None,
            ionization_energy_ev: None,
        });
    } else if let Some(last) = stages.last_mut() {
        debug!("atomic data: {symbol} ladder truncated at charge {}", last.charge);
        last.ionization_energy_ev = None;
    }

    let element = Element {
        atomic_number: z,
        symbol,
        name,
        stages,
    };
    element.validate()?;
    Ok(element)
}
