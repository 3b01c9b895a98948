// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — ionsim
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Command-line front end: fractions, scans, maps and the charge-neutral
//! electron density for the bundled (or a user-supplied) NIST table.

mod args;
mod logger;
mod report;

use std::borrow::Cow;
use std::env;
use std::path::Path;
use std::process::ExitCode;

use log::{debug, info};

use ion_core::atomic_data::AtomicDatabase;
use ion_core::equilibrium::solve_electron_density;
use ion_core::partition::GroundStateModel;
use ion_core::saha::evaluate_element;
use ion_core::scan::{
    average_ionization_map, density_axis, density_scan, temperature_axis, temperature_scan,
};
use ion_types::config::{PresetTable, SolverConfig};
use ion_types::constants::PER_CM3_TO_PER_M3;
use ion_types::error::IonResult;
use ion_types::state::Condition;

use args::{Cli, Command, ConditionSource, USAGE};

fn load_database(path: Option<&Path>) -> IonResult<Cow<'static, AtomicDatabase>> {
    match path {
        Some(p) => Ok(Cow::Owned(AtomicDatabase::from_file(p)?)),
        None => Ok(Cow::Borrowed(AtomicDatabase::builtin()?)),
    }
}

fn load_presets(path: Option<&Path>) -> PresetTable {
    match path {
        Some(p) => PresetTable::load_or_default(p),
        None => PresetTable::builtin(),
    }
}

fn write_svg(path: &Path, svg: &str) -> IonResult<()> {
    std::fs::write(path, svg)?;
    info!("chart written to {}", path.display());
    Ok(())
}

fn run(cli: Cli) -> IonResult<()> {
    let model = GroundStateModel;

    match cli.command {
        Command::Help => println!("{USAGE}"),
        Command::Elements => {
            let db = load_database(cli.data.as_deref())?;
            print!("{}", report::elements_table(&db));
        }
        Command::Presets => {
            print!("{}", report::presets_table(&load_presets(cli.presets.as_deref())));
        }
        Command::Fractions {
            element,
            source,
            json,
            svg,
        } => {
            let db = load_database(cli.data.as_deref())?;
            let condition = match source {
                ConditionSource::Preset(name) => {
                    let presets = load_presets(cli.presets.as_deref());
                    let preset = presets.get(&name)?;
                    debug!("preset '{name}': {}", preset.description);
                    preset.condition()
                }
                ConditionSource::Explicit {
                    temperature_k,
                    density_cm3,
                } => Condition::from_cgs(temperature_k, density_cm3),
            };
            let result = evaluate_element(db.element(&element)?, &condition, &model)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::fractions_table(&result));
            }
            if let Some(path) = svg {
                write_svg(&path, &ion_plot::render_fraction_bars(&result)?)?;
            }
        }
        Command::TemperatureScan {
            element,
            density_cm3,
            scan,
            csv,
            svg,
        } => {
            let db = load_database(cli.data.as_deref())?;
            let ne_m3 = density_cm3 * PER_CM3_TO_PER_M3;
            let axis = temperature_axis(&scan)?;
            let result = temperature_scan(db.element(&element)?, &axis, ne_m3, &model)?;
            if csv {
                print!("{}", report::scan_csv(&result, &element, "T_K"));
            } else {
                print!("{}", report::scan_summary(&result, &element, "T (K)"));
            }
            if let Some(path) = svg {
                write_svg(
                    &path,
                    &ion_plot::render_temperature_scan(&result, &element, ne_m3)?,
                )?;
            }
        }
        Command::DensityScan {
            element,
            temperature_k,
            scan,
            csv,
            svg,
        } => {
            let db = load_database(cli.data.as_deref())?;
            let axis = density_axis(&scan)?;
            let result = density_scan(db.element(&element)?, &axis, temperature_k, &model)?;
            if csv {
                print!("{}", report::scan_csv(&result, &element, "ne_m3"));
            } else {
                print!("{}", report::scan_summary(&result, &element, "ne (m⁻³)"));
            }
            if let Some(path) = svg {
                write_svg(
                    &path,
                    &ion_plot::render_density_scan(&result, &element, temperature_k)?,
                )?;
            }
        }
        Command::Map {
            element,
            temperatures,
            densities,
            svg,
        } => {
            let db = load_database(cli.data.as_deref())?;
            let t_axis = temperature_axis(&temperatures)?;
            let ne_axis = density_axis(&densities)?;
            let map = average_ionization_map(db.element(&element)?, &t_axis, &ne_axis, &model)?;
            match svg {
                Some(path) => write_svg(
                    &path,
                    &ion_plot::render_average_ionization_map(&map, &t_axis, &ne_axis, &element)?,
                )?,
                None => print!("{}", report::map_csv(&map, &t_axis, &ne_axis)),
            }
        }
        Command::Solve {
            element,
            temperature_k,
            total_density_cm3,
        } => {
            let db = load_database(cli.data.as_deref())?;
            let solution = solve_electron_density(
                db.element(&element)?,
                temperature_k,
                total_density_cm3 * PER_CM3_TO_PER_M3,
                &model,
                &SolverConfig::default(),
            )?;
            print!("{}", report::solution_report(&solution, total_density_cm3));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let argv: Vec<String> = env::args().skip(1).collect();
    let cli = match args::parse(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logger::init(cli.verbose) {
        eprintln!("warning: logger unavailable: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            if e.is_validation() {
                eprintln!("run 'ionsim --help' for usage");
            }
            ExitCode::FAILURE
        }
    }
}
