// Paramsweep - Parameter File Generator for Pathfinding Benchmarks
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use anyhow::Context;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::params::{ParamValue, ParameterSet};

/// Renders `set` and writes it to `path`, creating or truncating the file.
///
/// The parent directory must already exist.
pub fn write_param_file(path: &Path, set: &ParameterSet) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create parameter file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(set.render().as_bytes())
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write parameter file {}", path.display()))?;
    log::info!("Wrote {} parameters to {}", set.len(), path.display());
    Ok(())
}

/// `{basename}{index}.txt`, index in plain decimal.
pub fn sweep_file_name(basename: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{}{}.txt", basename, index))
}

/// Writes one file per value, each a copy of `set` with `key` replaced.
///
/// `set` itself is left untouched. Returns the written paths in order; an
/// empty `values` writes nothing. The first I/O failure aborts the sweep and
/// files written before it stay on disk.
pub fn write_sweep<I>(
    basename: &str,
    set: &ParameterSet,
    key: &str,
    values: I,
) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = ParamValue>,
{
    if set.get(key).is_none() {
        log::warn!("Sweep key '{}' is not in the parameter set; it will be appended", key);
    }

    let mut working = set.clone();
    let mut written = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        working.set(key, value);
        let path = sweep_file_name(basename, index);
        write_param_file(&path, &working)?;
        written.push(path);
    }
    log::info!("Sweep over '{}' wrote {} files", key, written.len());
    Ok(written)
}
