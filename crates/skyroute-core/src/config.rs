// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::preference::TRAVEL_QUESTIONS;
use crate::ranking::Weights;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bump when the default question set changes; older files get their
/// questions reset on load.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyrouteConfig {
    pub flights_csv: PathBuf,
    pub airports_csv: Option<PathBuf>,
    pub traits_csv: PathBuf,
    /// Field separator of the airport coordinate table.
    pub airports_delimiter: char,
    pub default_weights: Weights,
    pub questions: Vec<String>,
    pub schema_version: u32,
}

impl Default for SkyrouteConfig {
    fn default() -> Self {
        Self {
            flights_csv: PathBuf::from("flights.csv"),
            airports_csv: Some(PathBuf::from("airports.csv")),
            traits_csv: PathBuf::from("country_traits.csv"),
            airports_delimiter: ',',
            default_weights: Weights::default(),
            questions: TRAVEL_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }
}

impl SkyrouteConfig {
    pub fn default_path() -> PathBuf {
        crate::get_config_root().join("config.json")
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let mut config: SkyrouteConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        if config.schema_version < CURRENT_SCHEMA_VERSION {
            log::info!(
                "Migrating config from schema v{} to v{}: questions reset to defaults",
                config.schema_version,
                CURRENT_SCHEMA_VERSION
            );
            config.questions = Self::default().questions;
            config.schema_version = CURRENT_SCHEMA_VERSION;
        }

        config
            .default_weights
            .validate()
            .context("Invalid default_weights in config")?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
    }

    /// Resolves relative data paths against `dir`.
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        let join = |p: &Path| {
            if p.is_relative() {
                dir.join(p)
            } else {
                p.to_path_buf()
            }
        };
        self.flights_csv = join(&self.flights_csv);
        self.traits_csv = join(&self.traits_csv);
        self.airports_csv = self.airports_csv.as_deref().map(join);
        self
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.airports_delimiter).with_context(|| {
            format!(
                "airports_delimiter '{}' is not a single-byte character",
                self.airports_delimiter
            )
        })
    }
}
