// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::graph::{Coordinates, FlightGraph, FlightPackage, PackageKey};
use crate::preference::{PreferenceTree, TraitRecord};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// One row of the flight table. Columns not listed here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightRecord {
    pub from_airport_code: String,
    pub from_country: String,
    pub dest_airport_code: String,
    pub dest_country: String,
    #[serde(default)]
    pub aircraft_type: Option<String>,
    pub airline_name: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub stops: Option<u32>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub co2_emissions: Option<f64>,
}

impl FlightRecord {
    /// The package carried by this row, or `None` when aircraft, price or
    /// emissions are missing.
    pub fn to_package(&self) -> Option<(PackageKey, FlightPackage)> {
        let aircraft = self.aircraft_type.as_deref()?.trim();
        if aircraft.is_empty() {
            return None;
        }
        let key = PackageKey::new(
            self.airline_name.trim(),
            aircraft.split('|').map(|s| s.trim().to_string()).collect(),
        );
        let package = FlightPackage {
            price: self.price?,
            stops: self.stops.unwrap_or(0),
            emissions: self.co2_emissions?,
        };
        Some((key, package))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct CoordinateRecord {
    #[serde(rename = "Airport Code")]
    code: String,
    #[serde(rename = "Latitude", deserialize_with = "csv::invalid_option")]
    lat: Option<f64>,
    #[serde(rename = "Longitude", deserialize_with = "csv::invalid_option")]
    lon: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Packages written into the graph.
    pub loaded: usize,
    /// Rows missing aircraft, price or emissions.
    pub skipped: usize,
    /// Rows the graph refused (same origin and destination, bad quantities).
    pub rejected: usize,
}

pub fn read_flight_records<R: Read>(reader: R) -> Result<Vec<FlightRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize::<FlightRecord>() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping unreadable flight row: {}", e),
        }
    }
    Ok(records)
}

pub fn read_airport_coordinates<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<HashMap<String, Coordinates>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut coords = HashMap::new();
    for result in rdr.deserialize::<CoordinateRecord>() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping unreadable airport row: {}", e);
                continue;
            }
        };
        if let (Some(lat), Some(lon)) = (record.lat, record.lon) {
            coords.insert(record.code, Coordinates { lat, lon });
        }
    }
    Ok(coords)
}

/// Reads `label, answer_1, .., answer_k` rows after a header row. The literal
/// `No` is a negative answer; any other value counts as yes.
pub fn read_country_traits<R: Read>(reader: R) -> Result<Vec<TraitRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let row = result?;
        let mut fields = row.iter();
        let label = match fields.next().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => {
                return Err(LoadError::Parse(format!(
                    "country trait row {} has no label",
                    line + 2
                )))
            }
        };
        let answers = fields.map(|f| f.trim() != "No").collect();
        records.push(TraitRecord { label, answers });
    }
    Ok(records)
}

/// Builds the airport graph. Vertices are created for both ends of every
/// usable row, with coordinates taken from `coords` when present.
pub fn build_graph<'a, I>(
    records: I,
    coords: &HashMap<String, Coordinates>,
) -> (FlightGraph, LoadSummary)
where
    I: IntoIterator<Item = &'a FlightRecord>,
{
    let mut graph = FlightGraph::new();
    let mut summary = LoadSummary::default();

    for record in records {
        let Some((key, package)) = record.to_package() else {
            summary.skipped += 1;
            continue;
        };

        let origin = record.from_airport_code.as_str();
        let dest = record.dest_airport_code.as_str();
        graph.add_vertex(origin, record.from_country.as_str(), coords.get(origin).copied());
        graph.add_vertex(dest, record.dest_country.as_str(), coords.get(dest).copied());

        match graph.add_edge(origin, dest, key, package) {
            Ok(true) => summary.loaded += 1,
            Ok(false) => summary.rejected += 1,
            Err(e) => {
                log::debug!("Rejected flight {} -> {}: {}", origin, dest, e);
                summary.rejected += 1;
            }
        }
    }

    log::info!(
        "Loaded {} flight packages across {} airports ({} skipped, {} rejected)",
        summary.loaded,
        graph.vertex_count(),
        summary.skipped,
        summary.rejected
    );
    (graph, summary)
}

pub fn build_preference_tree(records: Vec<TraitRecord>) -> PreferenceTree {
    log::debug!("Building preference tree from {} countries", records.len());
    PreferenceTree::from_records(records)
}

pub fn load_graph_from_paths<P: AsRef<Path>>(
    flights: P,
    airports: Option<P>,
    delimiter: u8,
) -> Result<(FlightGraph, LoadSummary), LoadError> {
    let records = read_flight_records(File::open(flights)?)?;
    let coords = match airports {
        Some(path) => read_airport_coordinates(File::open(path)?, delimiter)?,
        None => HashMap::new(),
    };
    Ok(build_graph(&records, &coords))
}

pub fn load_preference_tree_from_path<P: AsRef<Path>>(path: P) -> Result<PreferenceTree, LoadError> {
    let records = read_country_traits(File::open(path)?)?;
    Ok(build_preference_tree(records))
}
