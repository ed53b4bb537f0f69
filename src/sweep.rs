// Paramsweep - Parameter File Generator for Pathfinding Benchmarks
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use anyhow::Context;
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ParamError;
use crate::params::{ParamValue, ParameterSet};

const MANIFEST_VERSION: &str = "1.0";
const MAX_RANGE_LEN: usize = 1_000_000; // Guards against typos like 0:1e12
const RANGE_REL_TOLERANCE: f64 = 1e-12;

/// Expands sweep arguments in order. Each argument is either a single number
/// or a half-open range `start:stop[:step]`.
pub fn parse_sweep_values<S: AsRef<str>>(args: &[S]) -> Result<Vec<ParamValue>, ParamError> {
    let mut values = Vec::new();
    for arg in args {
        let arg = arg.as_ref();
        if arg.contains(':') {
            values.extend(expand_range(arg)?);
        } else {
            values.push(arg.parse()?);
        }
    }
    Ok(values)
}

/// Integer ranges when every part is an integer, real ranges otherwise.
/// Step defaults to 1 and may be negative.
pub fn expand_range(spec: &str) -> Result<Vec<ParamValue>, ParamError> {
    let invalid = |reason: &str| ParamError::InvalidRange {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(invalid("expected start:stop or start:stop:step"));
    }
    let start: ParamValue = parts[0].parse()?;
    let stop: ParamValue = parts[1].parse()?;
    let step: ParamValue = match parts.get(2) {
        Some(s) => s.parse()?,
        None => ParamValue::Int(1),
    };

    match (start, stop, step) {
        (ParamValue::Int(start), ParamValue::Int(stop), ParamValue::Int(step)) => {
            if step == 0 {
                return Err(invalid("step must not be zero"));
            }
            let len = if (step > 0 && start < stop) || (step < 0 && start > stop) {
                let span = (stop as i128 - start as i128).unsigned_abs();
                let step = (step as i128).unsigned_abs();
                span.div_ceil(step)
            } else {
                0
            };
            if len > MAX_RANGE_LEN as u128 {
                return Err(invalid("range is too long"));
            }
            // Every element lies in [start, stop), only the offset needs the headroom
            Ok((0..len as i128)
                .map(|i| ParamValue::Int((start as i128 + i * step as i128) as i64))
                .collect())
        }
        _ => {
            let (start, stop, step) = (as_real(start), as_real(stop), as_real(step));
            if step == 0.0 || !step.is_finite() || !start.is_finite() || !stop.is_finite() {
                return Err(invalid("bounds and step must be finite and step non-zero"));
            }
            // 0.4 / 0.1 is 4.000000000000001, so shave a relative hair off before rounding up
            let ratio = (stop - start) / step;
            let count = (ratio - ratio.abs().max(1.0) * RANGE_REL_TOLERANCE).ceil();
            if count > MAX_RANGE_LEN as f64 {
                return Err(invalid("range is too long"));
            }
            let len = count.max(0.0) as usize;
            // Multiply rather than accumulate so rounding error does not build up
            Ok((0..len)
                .map(|i| ParamValue::Real(start + i as f64 * step))
                .collect())
        }
    }
}

fn as_real(value: ParamValue) -> f64 {
    match value {
        ParamValue::Int(v) => v as f64,
        ParamValue::Real(v) => v,
    }
}

/// Record of a finished sweep, written next to the parameter files on request.
#[derive(Debug, Clone, Serialize)]
pub struct SweepManifest {
    version: String,
    timestamp: String,
    basename: String,
    key: String,
    base: ParameterSet,
    values: Vec<ParamValue>,
    files: Vec<PathBuf>,
}

impl SweepManifest {
    pub fn new(
        basename: &str,
        key: &str,
        base: &ParameterSet,
        values: &[ParamValue],
        files: &[PathBuf],
    ) -> Self {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self {
            version: MANIFEST_VERSION.to_string(),
            timestamp,
            basename: basename.to_string(),
            key: key.to_string(),
            base: base.clone(),
            values: values.to_vec(),
            files: files.to_vec(),
        }
    }

    pub fn save_to_disk(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write sweep manifest {}", path.display()))?;
        Ok(())
    }
}
