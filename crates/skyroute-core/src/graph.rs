// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::{Result, SkyrouteError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub country: String,
    pub coordinates: Option<Coordinates>,
}

/// Identifies one itinerary between two airports: the operating airline plus
/// the ordered aircraft flown on each leg.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageKey {
    pub airline: String,
    pub aircraft: Vec<String>,
}

impl PackageKey {
    pub fn new<S: Into<String>>(airline: S, aircraft: Vec<String>) -> Self {
        Self {
            airline: airline.into(),
            aircraft,
        }
    }
}

impl std::fmt::Display for PackageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.airline, self.aircraft.join(" | "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightPackage {
    pub price: f64,
    pub stops: u32,
    pub emissions: f64,
}

pub type PackageMap = BTreeMap<PackageKey, FlightPackage>;

static NO_PACKAGES: PackageMap = BTreeMap::new();

#[derive(Debug, Clone)]
struct Vertex {
    airport: Airport,
    // Keyed by the neighbour's code. Both endpoints hold a copy of the same packages.
    neighbours: BTreeMap<String, PackageMap>,
}

/// Undirected multi-edge graph of airports. Every edge carries the full set of
/// flight packages offered between its two endpoints.
#[derive(Debug, Clone, Default)]
pub struct FlightGraph {
    vertices: BTreeMap<String, Vertex>,
}

impl FlightGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an airport. A second call for the same code is a no-op and
    /// keeps the attributes from the first call.
    pub fn add_vertex(
        &mut self,
        code: impl Into<String>,
        country: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) {
        let code = code.into();
        if self.vertices.contains_key(&code) {
            return;
        }
        let airport = Airport {
            code: code.clone(),
            country: country.into(),
            coordinates,
        };
        self.vertices.insert(
            code,
            Vertex {
                airport,
                neighbours: BTreeMap::new(),
            },
        );
    }

    pub fn set_coordinates(&mut self, code: &str, coordinates: Coordinates) -> Result<()> {
        let vertex = self
            .vertices
            .get_mut(code)
            .ok_or_else(|| not_found(code))?;
        vertex.airport.coordinates = Some(coordinates);
        Ok(())
    }

    /// Records `package` between `a` and `b`, overwriting any previous value
    /// under the same key.
    ///
    /// Returns `Ok(false)` without touching the graph when either endpoint is
    /// unknown. Identical endpoints and negative or non-finite quantities are
    /// rejected before any mutation.
    pub fn add_edge(
        &mut self,
        a: &str,
        b: &str,
        key: PackageKey,
        package: FlightPackage,
    ) -> Result<bool> {
        if a == b {
            return Err(SkyrouteError::InvalidArgument(format!(
                "cannot connect airport '{}' to itself",
                a
            )));
        }
        if !package.price.is_finite() || package.price < 0.0 {
            return Err(SkyrouteError::InvalidArgument(format!(
                "price must be a non-negative number, got {}",
                package.price
            )));
        }
        if !package.emissions.is_finite() || package.emissions < 0.0 {
            return Err(SkyrouteError::InvalidArgument(format!(
                "emissions must be a non-negative number, got {}",
                package.emissions
            )));
        }
        if !self.vertices.contains_key(a) || !self.vertices.contains_key(b) {
            log::debug!("Ignoring package {} between {} and {}: unknown airport", key, a, b);
            return Ok(false);
        }

        for (from, to) in [(a, b), (b, a)] {
            if let Some(vertex) = self.vertices.get_mut(from) {
                vertex
                    .neighbours
                    .entry(to.to_string())
                    .or_default()
                    .insert(key.clone(), package);
            }
        }
        Ok(true)
    }

    pub fn get_vertex(&self, code: &str) -> Result<&Airport> {
        self.vertices
            .get(code)
            .map(|v| &v.airport)
            .ok_or_else(|| not_found(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.vertices.contains_key(code)
    }

    /// All packages between `a` and `b`; empty when the two are not connected.
    pub fn neighbor_packages(&self, a: &str, b: &str) -> Result<&PackageMap> {
        let vertex = self.vertices.get(a).ok_or_else(|| not_found(a))?;
        if !self.vertices.contains_key(b) {
            return Err(not_found(b));
        }
        Ok(vertex.neighbours.get(b).unwrap_or(&NO_PACKAGES))
    }

    pub fn neighbors(&self, code: &str) -> Result<BTreeSet<String>> {
        let vertex = self.vertices.get(code).ok_or_else(|| not_found(code))?;
        Ok(vertex.neighbours.keys().cloned().collect())
    }

    pub fn max_emissions(&self, a: &str, b: &str) -> Result<f64> {
        let packages = self.non_empty_packages(a, b)?;
        Ok(packages
            .values()
            .map(|p| p.emissions)
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Mean emissions across all packages between the pair, rounded to two decimals.
    pub fn average_emissions(&self, a: &str, b: &str) -> Result<f64> {
        let packages = self.non_empty_packages(a, b)?;
        let total: f64 = packages.values().map(|p| p.emissions).sum();
        let mean = total / packages.len() as f64;
        Ok((mean * 100.0).round() / 100.0)
    }

    fn non_empty_packages(&self, a: &str, b: &str) -> Result<&PackageMap> {
        let packages = self.neighbor_packages(a, b)?;
        if packages.is_empty() {
            return Err(SkyrouteError::InvalidArgument(format!(
                "no flight packages between {} and {}",
                a, b
            )));
        }
        Ok(packages)
    }

    /// Airports in code order.
    pub fn all_vertices(&self) -> impl Iterator<Item = &Airport> {
        self.vertices.values().map(|v| &v.airport)
    }

    pub fn all_codes(&self) -> BTreeSet<String> {
        self.vertices.keys().cloned().collect()
    }

    pub fn countries(&self) -> BTreeSet<String> {
        self.vertices
            .values()
            .map(|v| v.airport.country.clone())
            .collect()
    }

    /// Each connected pair once, as `(a, b, package_count)` with `a < b`.
    pub fn edges(&self) -> Vec<(&str, &str, usize)> {
        let mut edges = Vec::new();
        for (code, vertex) in &self.vertices {
            for (other, packages) in &vertex.neighbours {
                if code < other {
                    edges.push((code.as_str(), other.as_str(), packages.len()));
                }
            }
        }
        edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Distinct packages, counting each undirected edge once.
    pub fn package_count(&self) -> usize {
        self.edges().iter().map(|(_, _, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

fn not_found(code: &str) -> SkyrouteError {
    SkyrouteError::NotFound(format!("airport '{}'", code))
}
