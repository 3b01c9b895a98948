// ─────────────────────────────────────────────────────────────────────
// Ionization Simulator — Command-Line Arguments
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `ionsim <command> [options]` parsing.
//!
//! Every `--name value` pair is collected first, then each command takes
//! the options it understands. Anything left over is an error.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use ion_types::config::{DensityScanConfig, TemperatureScanConfig, DEFAULT_PRESET};
use ion_types::error::{IonError, IonResult};

pub const USAGE: &str = "\
usage: ionsim <command> [options]

commands:
  elements                               list bundled elements
  presets                                list plasma presets
  fractions --element SYM [--preset NAME | --temperature K --density CM3]
            [--json] [--svg PATH]
  tscan     --element SYM --density CM3 [--t-min K] [--t-max K] [--points N]
            [--csv] [--svg PATH]
  nescan    --element SYM --temperature K [--log-ne-min X] [--log-ne-max X]
            [--points N] [--csv] [--svg PATH]
  map       --element SYM [--t-min K] [--t-max K] [--log-ne-min X]
            [--log-ne-max X] [--points N] [--svg PATH]
  solve     --element SYM --temperature K --total-density CM3

global options:
  --data PATH      ionization energy table (NIST tab-separated)
  --presets PATH   preset table (JSON)
  -v, --verbose    debug logging on stderr
  -h, --help       show this message";

/// Where a single-point condition comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionSource {
    Preset(String),
    /// Temperature [K] and electron density [cm⁻³].
    Explicit { temperature_k: f64, density_cm3: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Elements,
    Presets,
    Fractions {
        element: String,
        source: ConditionSource,
        json: bool,
        svg: Option<PathBuf>,
    },
    TemperatureScan {
        element: String,
        density_cm3: f64,
        scan: TemperatureScanConfig,
        csv: bool,
        svg: Option<PathBuf>,
    },
    DensityScan {
        element: String,
        temperature_k: f64,
        scan: DensityScanConfig,
        csv: bool,
        svg: Option<PathBuf>,
    },
    Map {
        element: String,
        temperatures: TemperatureScanConfig,
        densities: DensityScanConfig,
        svg: Option<PathBuf>,
    },
    Solve {
        element: String,
        temperature_k: f64,
        total_density_cm3: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cli {
    pub data: Option<PathBuf>,
    pub presets: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

fn usage_error(message: impl Into<String>) -> IonError {
    IonError::InvalidInput(message.into())
}

#[derive(Debug, Default)]
struct Options {
    values: BTreeMap<String, String>,
    switches: BTreeSet<String>,
}

impl Options {
    fn take(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    fn switch(&mut self, name: &str) -> bool {
        self.switches.remove(name)
    }

    fn take_f64(&mut self, name: &str) -> IonResult<Option<f64>> {
        self.take(name)
            .map(|v| {
                v.parse::<f64>()
                    .map_err(|_| usage_error(format!("--{name} expects a number, got '{v}'")))
            })
            .transpose()
    }

    fn take_usize(&mut self, name: &str) -> IonResult<Option<usize>> {
        self.take(name)
            .map(|v| {
                v.parse::<usize>()
                    .map_err(|_| usage_error(format!("--{name} expects a count, got '{v}'")))
            })
            .transpose()
    }

    fn require(&mut self, name: &str, command: &str) -> IonResult<String> {
        self.take(name)
            .ok_or_else(|| usage_error(format!("{command} requires --{name}")))
    }

    fn require_f64(&mut self, name: &str, command: &str) -> IonResult<f64> {
        self.take_f64(name)?
            .ok_or_else(|| usage_error(format!("{command} requires --{name}")))
    }

    fn finish(self, command: &str) -> IonResult<()> {
        let leftover: Vec<String> = self
            .values
            .keys()
            .chain(self.switches.iter())
            .map(|k| format!("--{k}"))
            .collect();
        if leftover.is_empty() {
            Ok(())
        } else {
            Err(usage_error(format!(
                "unknown option(s) for {command}: {}",
                leftover.join(", ")
            )))
        }
    }

    fn temperature_scan(&mut self) -> IonResult<TemperatureScanConfig> {
        let defaults = TemperatureScanConfig::default();
        Ok(TemperatureScanConfig {
            t_min: self.take_f64("t-min")?.unwrap_or(defaults.t_min),
            t_max: self.take_f64("t-max")?.unwrap_or(defaults.t_max),
            points: defaults.points,
        })
    }

    fn density_scan(&mut self) -> IonResult<DensityScanConfig> {
        let defaults = DensityScanConfig::default();
        Ok(DensityScanConfig {
            log_ne_min: self.take_f64("log-ne-min")?.unwrap_or(defaults.log_ne_min),
            log_ne_max: self.take_f64("log-ne-max")?.unwrap_or(defaults.log_ne_max),
            points: defaults.points,
        })
    }
}

const SWITCHES: &[&str] = &["json", "csv"];

/// Parse arguments without the program name.
pub fn parse(args: &[String]) -> IonResult<Cli> {
    let mut opts = Options::default();
    let mut positional = Vec::new();
    let mut verbose = false;
    let mut help = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => help = true,
            _ if arg.starts_with("--") => {
                let name = &arg[2..];
                if SWITCHES.contains(&name) {
                    opts.switches.insert(name.to_string());
                } else {
                    i += 1;
                    let value = args
                        .get(i)
                        .ok_or_else(|| usage_error(format!("{arg} expects a value")))?;
                    opts.values.insert(name.to_string(), value.clone());
                }
            }
            _ => positional.push(arg),
        }
        i += 1;
    }

    let data = opts.take("data").map(PathBuf::from);
    let presets = opts.take("presets").map(PathBuf::from);

    let name = match positional.as_slice() {
        [] => "help",
        [name] => *name,
        [_, extra, ..] => return Err(usage_error(format!("unexpected argument '{extra}'"))),
    };
    let command = if help { Command::Help } else { parse_command(name, &mut opts)? };
    if command != Command::Help {
        opts.finish(name)?;
    }

    Ok(Cli {
        data,
        presets,
        verbose,
        command,
    })
}

fn parse_command(name: &str, opts: &mut Options) -> IonResult<Command> {
    let command = match name {
        "help" => Command::Help,
        "elements" => Command::Elements,
        "presets" => Command::Presets,
        "fractions" => {
            let element = opts.require("element", name)?;
            let preset = opts.take("preset");
            let temperature = opts.take_f64("temperature")?;
            let density = opts.take_f64("density")?;
            let source = match (preset, temperature, density) {
                (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                    return Err(usage_error(
                        "--preset cannot be combined with --temperature/--density",
                    ))
                }
                (Some(p), None, None) => ConditionSource::Preset(p),
                (None, Some(temperature_k), Some(density_cm3)) => ConditionSource::Explicit {
                    temperature_k,
                    density_cm3,
                },
                (None, None, None) => ConditionSource::Preset(DEFAULT_PRESET.to_string()),
                (None, _, _) => {
                    return Err(usage_error(
                        "--temperature and --density must be given together",
                    ))
                }
            };
            Command::Fractions {
                element,
                source,
                json: opts.switch("json"),
                svg: opts.take("svg").map(PathBuf::from),
            }
        }
        "tscan" => {
            let element = opts.require("element", name)?;
            let density_cm3 = opts.require_f64("density", name)?;
            let mut scan = opts.temperature_scan()?;
            if let Some(points) = opts.take_usize("points")? {
                scan.points = points;
            }
            Command::TemperatureScan {
                element,
                density_cm3,
                scan,
                csv: opts.switch("csv"),
                svg: opts.take("svg").map(PathBuf::from),
            }
        }
        "nescan" => {
            let element = opts.require("element", name)?;
            let temperature_k = opts.require_f64("temperature", name)?;
            let mut scan = opts.density_scan()?;
            if let Some(points) = opts.take_usize("points")? {
                scan.points = points;
            }
            Command::DensityScan {
                element,
                temperature_k,
                scan,
                csv: opts.switch("csv"),
                svg: opts.take("svg").map(PathBuf::from),
            }
        }
        "map" => {
            let element = opts.require("element", name)?;
            let mut temperatures = opts.temperature_scan()?;
            let mut densities = opts.density_scan()?;
            let points = opts.take_usize("points")?.unwrap_or(40);
            temperatures.points = points;
            densities.points = points;
            Command::Map {
                element,
                temperatures,
                densities,
                svg: opts.take("svg").map(PathBuf::from),
            }
        }
        "solve" => Command::Solve {
            element: opts.require("element", name)?,
            temperature_k: opts.require_f64("temperature", name)?,
            total_density_cm3: opts.require_f64("total-density", name)?,
        },
        other => return Err(usage_error(format!("unknown command '{other}'"))),
    };
    Ok(command)
}
