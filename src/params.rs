// Paramsweep - Parameter File Generator for Pathfinding Benchmarks
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, str::FromStr};

use crate::error::ParamError;

// Defaults for the pathfinding benchmark harness, in file order.
const DEFAULT_PARAMETERS: [(&str, ParamValue); 7] = [
    ("update_radius", ParamValue::Int(1)),
    ("seed", ParamValue::Int(160)),
    ("number_of_runs", ParamValue::Int(500)),
    ("scramble_rate", ParamValue::Int(1)),
    ("initial_randomness", ParamValue::Real(0.2)),
    ("scramble_amount", ParamValue::Real(0.1)),
    ("valid_revision_limit", ParamValue::Real(0.1)),
];

/// A single parameter value. Integers and reals render differently, so the
/// distinction is kept rather than collapsing everything to `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Real(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParamValue::Int(v) => write!(f, "{}", v),
            // Keep a trailing ".0" so an integral real never reads as an integer
            ParamValue::Real(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            ParamValue::Real(v) => write!(f, "{}", v),
        }
    }
}

impl FromStr for ParamValue {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(ParamValue::Int(v));
        }
        trimmed
            .parse::<f64>()
            .map(ParamValue::Real)
            .map_err(|_| ParamError::InvalidValue(s.to_string()))
    }
}

/// Ordered mapping from parameter name to value.
///
/// Iteration order is insertion order. Overwriting an existing key keeps its
/// position, a new key is appended at the end. Rendering is therefore
/// deterministic for a given sequence of edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    entries: IndexMap<String, ParamValue>,
}

impl Default for ParameterSet {
    fn default() -> Self {
        let mut set = Self::new();
        for (key, value) in DEFAULT_PARAMETERS {
            set.set(key, value);
        }
        set
    }
}

impl ParameterSet {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn set(&mut self, key: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<ParamValue> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Renders one `key=value\n` line per entry. The empty set renders as "".
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push('=');
            out.push_str(&value.to_string());
            out.push('\n');
        }
        out
    }

    /// Parses the text format produced by [`ParameterSet::render`].
    pub fn parse(text: &str) -> Result<Self, ParamError> {
        let mut set = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| ParamError::MalformedLine {
                line: idx + 1,
                message: format!("missing '=' in '{}'", line),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ParamError::MalformedLine {
                    line: idx + 1,
                    message: "empty parameter name".to_string(),
                });
            }
            let value = value.parse::<ParamValue>().map_err(|e| ParamError::MalformedLine {
                line: idx + 1,
                message: e.to_string(),
            })?;
            set.set(key, value);
        }
        Ok(set)
    }

    /// Applies a `key=value` override from the command line.
    pub fn apply_override(&mut self, spec: &str) -> Result<(), ParamError> {
        let (key, value) = spec
            .split_once('=')
            .ok_or_else(|| ParamError::InvalidOverride(spec.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParamError::InvalidOverride(spec.to_string()));
        }
        let value = value.parse::<ParamValue>()?;
        if self.set(key, value).is_none() {
            log::warn!("Override adds new parameter '{}'", key);
        }
        Ok(())
    }

    /// Loads a base set. `.json` files hold a flat object of name -> number,
    /// anything else is read as a `key=value` parameter file.
    pub fn load_from_disk(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameters from {}", path.display()))?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let set: Self = if is_json {
            serde_json::from_str(&data)
                .with_context(|| format!("Invalid JSON parameters in {}", path.display()))?
        } else {
            Self::parse(&data).with_context(|| format!("Invalid parameter file {}", path.display()))?
        };
        log::info!("Loaded {} parameters from {}", set.len(), path.display());
        Ok(set)
    }

    /// Exports the set as pretty JSON, creating parent directories as needed.
    pub fn save_to_disk(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
