//! Calculator configuration: plotting domain, sample count, artifact paths
//! and the rendering backend, with a TOML override layer on top of the
//! built-in defaults.

use crate::calculator::plotter::{DEFAULT_DOMAIN, DEFAULT_SAMPLES, PlotBackend};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CalculatorSettings {
    /// Sampling domain used when no integration bounds are given.
    pub default_domain: (f64, f64),
    /// Number of curve samples, fixed regardless of domain width.
    pub samples: usize,
    pub plot_size: (u32, u32),
    pub typeset_size: (u32, u32),
    pub plot_path: PathBuf,
    pub typeset_path: PathBuf,
    pub backend: PlotBackend,
    /// Logging verbosity; None or "off"/"none" disables logging.
    pub loglevel: Option<String>,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            default_domain: DEFAULT_DOMAIN,
            samples: DEFAULT_SAMPLES,
            plot_size: (800, 600),
            typeset_size: (600, 200),
            plot_path: PathBuf::from("plot.png"),
            typeset_path: PathBuf::from("integral.png"),
            backend: PlotBackend::Plotters,
            loglevel: Some("info".to_string()),
        }
    }
}

impl CalculatorSettings {
    /// Overlays TOML keys on top of the defaults. Unknown keys are ignored,
    /// malformed values are reported.
    pub fn from_toml_str(s: &str) -> Result<Self, String> {
        let table: toml::Table = s
            .parse()
            .map_err(|e| format!("settings parse error: {}", e))?;
        let mut settings = CalculatorSettings::default();

        if let Some(value) = table.get("domain") {
            settings.default_domain = parse_pair_f64(value, "domain")?;
            if !(settings.default_domain.0 < settings.default_domain.1) {
                return Err(format!(
                    "domain [{}, {}] is empty or reversed",
                    settings.default_domain.0, settings.default_domain.1
                ));
            }
        }
        if let Some(value) = table.get("samples") {
            let n = value
                .as_integer()
                .ok_or_else(|| "samples must be an integer".to_string())?;
            if n < 2 {
                return Err(format!("samples must be at least 2, got {}", n));
            }
            settings.samples = n as usize;
        }
        if let Some(value) = table.get("plot_size") {
            settings.plot_size = parse_pair_u32(value, "plot_size")?;
        }
        if let Some(value) = table.get("typeset_size") {
            settings.typeset_size = parse_pair_u32(value, "typeset_size")?;
        }
        if let Some(value) = table.get("plot_path") {
            settings.plot_path = PathBuf::from(expect_str(value, "plot_path")?);
        }
        if let Some(value) = table.get("typeset_path") {
            settings.typeset_path = PathBuf::from(expect_str(value, "typeset_path")?);
        }
        if let Some(value) = table.get("backend") {
            settings.backend = match expect_str(value, "backend")? {
                "plotters" => PlotBackend::Plotters,
                "gnuplot" => PlotBackend::Gnuplot,
                other => return Err(format!("unknown backend '{}'", other)),
            };
        }
        if let Some(value) = table.get("loglevel") {
            settings.loglevel = Some(expect_str(value, "loglevel")?.to_string());
        }

        Ok(settings)
    }
}

fn expect_str<'a>(value: &'a toml::Value, key: &str) -> Result<&'a str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("{} must be a string", key))
}

fn as_f64(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn parse_pair_f64(value: &toml::Value, key: &str) -> Result<(f64, f64), String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("{} must be an array of two numbers", key))?;
    if items.len() != 2 {
        return Err(format!("{} must hold exactly two numbers", key));
    }
    match (as_f64(&items[0]), as_f64(&items[1])) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(format!("{} must hold exactly two numbers", key)),
    }
}

fn parse_pair_u32(value: &toml::Value, key: &str) -> Result<(u32, u32), String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("{} must be an array of two integers", key))?;
    if items.len() != 2 {
        return Err(format!("{} must hold exactly two integers", key));
    }
    match (items[0].as_integer(), items[1].as_integer()) {
        (Some(a), Some(b)) if a > 0 && b > 0 => Ok((a as u32, b as u32)),
        _ => Err(format!("{} must hold two positive integers", key)),
    }
}
