// Paramsweep - Parameter File Generator for Pathfinding Benchmarks
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::params::ParameterSet;
use crate::sweep::{parse_sweep_values, SweepManifest};
use crate::writer::{write_param_file, write_sweep};

/// Parameter file generator for pathfinding benchmark runs
#[derive(Parser, Debug)]
#[command(name = "paramsweep")]
#[command(about = "Write key=value parameter files, optionally sweeping one parameter")]
pub struct Cli {
    /// Base parameter set (.json object or key=value file) instead of the defaults
    #[arg(long, global = true, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Override a parameter, may be repeated
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Do not print confirmations to stdout
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a single parameter file
    Write {
        /// Destination file, overwritten if present
        path: PathBuf,
    },

    /// Write {basename}{index}.txt for each value of KEY
    Sweep {
        /// Optional JSON manifest describing the sweep
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Prefix of the generated files, may include directories
        basename: String,

        /// Parameter to vary
        key: String,

        /// Values or start:stop[:step] ranges; put negative ranges after `--`
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,
    },

    /// Print the resolved parameter set
    Show,

    /// Export the resolved parameter set as JSON
    Export {
        path: PathBuf,
    },
}

impl Cli {
    /// Defaults (or `--from`) with every `--set` applied in order.
    pub fn resolve_parameters(&self) -> anyhow::Result<ParameterSet> {
        let mut set = match &self.from {
            Some(path) => ParameterSet::load_from_disk(path)?,
            None => ParameterSet::default(),
        };
        for spec in &self.overrides {
            set.apply_override(spec)?;
        }
        Ok(set)
    }

    pub fn run(self) -> anyhow::Result<()> {
        let set = self.resolve_parameters()?;

        match &self.command {
            Command::Write { path } => {
                write_param_file(path, &set)?;
                if !self.quiet {
                    println!("✓ Wrote {} ({} parameters)", path.display(), set.len());
                }
            }
            Command::Sweep {
                manifest,
                basename,
                key,
                values,
            } => {
                let values = parse_sweep_values(values.as_slice())?;
                let files = write_sweep(basename, &set, key, values.iter().copied())?;
                if let Some(manifest_path) = manifest {
                    SweepManifest::new(basename, key, &set, &values, &files)
                        .save_to_disk(manifest_path)?;
                    log::info!("Sweep manifest saved to {}", manifest_path.display());
                }
                if !self.quiet {
                    println!("✓ Sweep over '{}': {} files written", key, files.len());
                }
            }
            Command::Show => {
                print!("{}", set.render());
            }
            Command::Export { path } => {
                set.save_to_disk(path)?;
                if !self.quiet {
                    println!("✓ Exported {} parameters to {}", set.len(), path.display());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamValue;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_sweep_command() {
        let cli = Cli::try_parse_from([
            "paramsweep", "sweep", "--manifest", "m.json", "params", "seed", "1", "2", "3",
        ])
        .unwrap();
        match cli.command {
            Command::Sweep {
                manifest,
                basename,
                key,
                values,
            } => {
                assert_eq!(manifest, Some(PathBuf::from("m.json")));
                assert_eq!(basename, "params");
                assert_eq!(key, "seed");
                assert_eq!(values, vec!["1", "2", "3"]);
            }
            other => panic!("expected sweep, got {:?}", other),
        }
    }

    #[test]
    fn test_sweep_accepts_no_values() {
        let cli = Cli::try_parse_from(["paramsweep", "sweep", "params", "seed"]).unwrap();
        assert!(matches!(cli.command, Command::Sweep { ref values, .. } if values.is_empty()));
    }

    #[test]
    fn test_sweep_requires_key() {
        assert!(Cli::try_parse_from(["paramsweep", "sweep", "params"]).is_err());
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "paramsweep", "write", "out.txt", "--set", "seed=7", "--set", "scramble_rate=3", "-q",
        ])
        .unwrap();
        assert!(cli.quiet);

        let set = cli.resolve_parameters().unwrap();
        assert_eq!(set.get("seed"), Some(ParamValue::Int(7)));
        assert_eq!(set.get("scramble_rate"), Some(ParamValue::Int(3)));
    }

    #[test]
    fn test_global_flags_after_sweep_values() {
        let cli = Cli::try_parse_from([
            "paramsweep", "sweep", "p", "seed", "1", "2", "--set", "seed=9", "-q",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.overrides, vec!["seed=9"]);
        assert!(matches!(cli.command, Command::Sweep { ref values, .. } if values == &["1", "2"]));
    }

    #[test]
    fn test_negative_sweep_values() {
        let cli = Cli::try_parse_from(["paramsweep", "sweep", "p", "seed", "-3", "4"]).unwrap();
        assert!(matches!(cli.command, Command::Sweep { ref values, .. } if values == &["-3", "4"]));

        let cli = Cli::try_parse_from(["paramsweep", "sweep", "p", "seed", "--", "-5:0"]).unwrap();
        assert!(matches!(cli.command, Command::Sweep { ref values, .. } if values == &["-5:0"]));
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let cli = Cli::try_parse_from(["paramsweep", "show", "--set", "seed"]).unwrap();
        assert!(cli.resolve_parameters().is_err());
    }

    #[test]
    fn test_run_write_from_base_file() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("base.json");
        let out = dir.path().join("out.txt");
        fs::write(&base, r#"{"seed": 3, "initial_randomness": 0.25}"#).unwrap();

        let base_arg = base.to_string_lossy().into_owned();
        let out_arg = out.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "paramsweep",
            "-q",
            "--from",
            base_arg.as_str(),
            "write",
            out_arg.as_str(),
        ])
        .unwrap();
        cli.run().unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "seed=3\ninitial_randomness=0.25\n");
    }

    #[test]
    fn test_run_sweep_with_range_and_manifest() {
        let dir = tempdir().unwrap();
        let basename = dir.path().join("runs_").to_string_lossy().into_owned();
        let manifest = dir.path().join("manifest.json");
        let manifest_arg = manifest.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from([
            "paramsweep",
            "-q",
            "sweep",
            "--manifest",
            manifest_arg.as_str(),
            basename.as_str(),
            "number_of_runs",
            "100:400:100",
        ])
        .unwrap();
        cli.run().unwrap();

        for (i, runs) in [100, 200, 300].iter().enumerate() {
            let text = fs::read_to_string(dir.path().join(format!("runs_{}.txt", i))).unwrap();
            assert!(text.contains(&format!("\nnumber_of_runs={}\n", runs)));
        }
        assert!(!dir.path().join("runs_3.txt").exists());
        assert!(manifest.exists());
    }
}
