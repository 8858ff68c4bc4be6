// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod config;
pub mod graph;
pub mod loader;
pub mod preference;
pub mod ranking;

use std::path::PathBuf;
use thiserror::Error;

pub use config::SkyrouteConfig;
pub use graph::{Airport, Coordinates, FlightGraph, FlightPackage, PackageKey};
pub use preference::{Choice, PreferenceTree};
pub use ranking::{optimal_routes, rank, RankedRoute, Weights, MAX_RECOMMENDATIONS};

#[derive(Error, Debug)]
pub enum SkyrouteError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SkyrouteError>;

/// Directory holding `config.json`. Falls back to the working directory when
/// the platform has no notion of a config dir.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "skyroute", "skyroute")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SkyrouteError::NotFound("airport 'XXX'".to_string());
        assert_eq!(err.to_string(), "Not found: airport 'XXX'");

        let err = SkyrouteError::InvalidArgument("empty package set".to_string());
        assert!(err.to_string().starts_with("Invalid argument"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SkyrouteError = io_err.into();
        assert!(matches!(err, SkyrouteError::Io(_)));
    }
}
