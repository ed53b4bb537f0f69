// Paramsweep - Parameter File Generator for Pathfinding Benchmarks
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("invalid override '{0}': expected key=value")]
    InvalidOverride(String),
    #[error("invalid value '{0}': expected an integer or real number")]
    InvalidValue(String),
    #[error("invalid range '{spec}': {reason}")]
    InvalidRange { spec: String, reason: String },
    #[error("line {line}: {message}")]
    MalformedLine { line: usize, message: String },
}
