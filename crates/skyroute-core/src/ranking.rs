// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::graph::{FlightGraph, PackageKey, PackageMap};
use crate::{Result, SkyrouteError};
use serde::{Deserialize, Serialize};

pub const MAX_RECOMMENDATIONS: usize = 5;

/// Relative importance of price, stop count and emissions.
/// Lower weighted totals rank first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub price: f64,
    pub stops: f64,
    pub emissions: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            price: 0.1,
            stops: 0.1,
            emissions: 0.8,
        }
    }
}

impl Weights {
    pub fn new(price: f64, stops: f64, emissions: f64) -> Result<Self> {
        let weights = Self {
            price,
            stops,
            emissions,
        };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("price", self.price),
            ("stops", self.stops),
            ("emissions", self.emissions),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SkyrouteError::InvalidArgument(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.total() == 0.0 {
            return Err(SkyrouteError::InvalidArgument(
                "at least one weight must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn total(&self) -> f64 {
        self.price + self.stops + self.emissions
    }

    /// Scales the weights so they sum to 1. Ranking order is unaffected.
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;
        let total = self.total();
        Ok(Self {
            price: self.price / total,
            stops: self.stops / total,
            emissions: self.emissions / total,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRoute {
    pub key: PackageKey,
    pub price: f64,
    pub stops: u32,
    pub emissions: f64,
    pub score: f64,
}

/// Scores every package, in map order. Each attribute is divided by its
/// largest observed value, so the package holding that maximum contributes
/// exactly the attribute's weight. An attribute that is zero everywhere
/// contributes nothing.
pub fn score_packages(packages: &PackageMap, weights: &Weights) -> Result<Vec<(PackageKey, f64)>> {
    if packages.is_empty() {
        return Err(SkyrouteError::InvalidArgument(
            "cannot rank an empty set of flight packages".to_string(),
        ));
    }
    weights.validate()?;

    let mut max_price = 0.0_f64;
    let mut max_stops = 0.0_f64;
    let mut max_emissions = 0.0_f64;
    for package in packages.values() {
        max_price = max_price.max(package.price);
        max_stops = max_stops.max(package.stops as f64);
        max_emissions = max_emissions.max(package.emissions);
    }

    let scaled = |value: f64, max: f64| if max > 0.0 { value / max } else { 0.0 };

    Ok(packages
        .iter()
        .map(|(key, package)| {
            let score = weights.price * scaled(package.price, max_price)
                + weights.stops * scaled(package.stops as f64, max_stops)
                + weights.emissions * scaled(package.emissions, max_emissions);
            (key.clone(), score)
        })
        .collect())
}

/// Best packages first, at most [`MAX_RECOMMENDATIONS`] of them.
///
/// Equal scores keep map order (airline, then aircraft); no other tie-break
/// is promised.
pub fn rank(packages: &PackageMap, weights: &Weights) -> Result<Vec<RankedRoute>> {
    let mut scored = score_packages(packages, weights)?;
    // sort_by is stable
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok(scored
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .filter_map(|(key, score)| {
            packages.get(&key).map(|p| RankedRoute {
                price: p.price,
                stops: p.stops,
                emissions: p.emissions,
                score: round5(score),
                key,
            })
        })
        .collect())
}

/// Ranks the packages between two airports. Unconnected airports yield an
/// empty list; unknown airports are an error.
pub fn optimal_routes(
    graph: &FlightGraph,
    home: &str,
    dest: &str,
    weights: &Weights,
) -> Result<Vec<RankedRoute>> {
    let packages = graph.neighbor_packages(home, dest)?;
    if packages.is_empty() {
        log::debug!("No flights between {} and {}", home, dest);
        return Ok(Vec::new());
    }
    let ranked = rank(packages, weights)?;
    log::debug!(
        "Ranked {} of {} packages between {} and {}",
        ranked.len(),
        packages.len(),
        home,
        dest
    );
    Ok(ranked)
}

fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FlightPackage;

    fn key(airline: &str, aircraft: &str) -> PackageKey {
        PackageKey::new(airline, vec![aircraft.to_string()])
    }

    fn packages(entries: &[(&str, f64, u32, f64)]) -> PackageMap {
        entries
            .iter()
            .map(|(airline, price, stops, emissions)| {
                (
                    key(airline, "A320"),
                    FlightPackage {
                        price: *price,
                        stops: *stops,
                        emissions: *emissions,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_weighted_scores() {
        let mut map = PackageMap::new();
        map.insert(
            key("AC", "A330"),
            FlightPackage {
                price: 500.0,
                stops: 0,
                emissions: 1200.0,
            },
        );
        map.insert(
            key("BA", "A380"),
            FlightPackage {
                price: 400.0,
                stops: 1,
                emissions: 1500.0,
            },
        );
        let weights = Weights::new(0.5, 0.2, 0.3).unwrap();
        let ranked = rank(&map, &weights).unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key.airline, "AC");
        assert!((ranked[0].score - 0.74).abs() < 1e-9);
        assert_eq!(ranked[1].key.airline, "BA");
        assert!((ranked[1].score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_truncates_to_five() {
        let map = packages(&[
            ("A1", 100.0, 0, 10.0),
            ("A2", 200.0, 0, 20.0),
            ("A3", 300.0, 1, 30.0),
            ("A4", 400.0, 1, 40.0),
            ("A5", 500.0, 2, 50.0),
            ("A6", 600.0, 2, 60.0),
            ("A7", 700.0, 3, 70.0),
        ]);
        let ranked = rank(&map, &Weights::default()).unwrap();
        assert_eq!(ranked.len(), MAX_RECOMMENDATIONS);
        let airlines: Vec<_> = ranked.iter().map(|r| r.key.airline.as_str()).collect();
        assert_eq!(airlines, vec!["A1", "A2", "A3", "A4", "A5"]);
        assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_small_input_returned_whole() {
        let map = packages(&[
            ("X", 100.0, 1, 30.0),
            ("Y", 150.0, 0, 20.0),
            ("Z", 90.0, 2, 50.0),
        ]);
        assert_eq!(rank(&map, &Weights::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = rank(&PackageMap::new(), &Weights::default());
        assert!(matches!(result, Err(SkyrouteError::InvalidArgument(_))));
    }

    #[test]
    fn test_all_nonstop_does_not_divide_by_zero() {
        let map = packages(&[("X", 100.0, 0, 30.0), ("Y", 200.0, 0, 60.0)]);
        let ranked = rank(&map, &Weights::new(0.0, 1.0, 0.0).unwrap()).unwrap();
        assert!(ranked.iter().all(|r| r.score == 0.0));
        // Stable for ties: map order
        assert_eq!(ranked[0].key.airline, "X");
    }

    #[test]
    fn test_scaling_weights_preserves_order() {
        let map = packages(&[
            ("X", 100.0, 1, 30.0),
            ("Y", 150.0, 0, 20.0),
            ("Z", 90.0, 2, 50.0),
        ]);
        let base = Weights::new(0.2, 0.3, 0.5).unwrap();
        let scaled = Weights::new(2.0, 3.0, 5.0).unwrap();
        let order = |w: &Weights| -> Vec<String> {
            rank(&map, w)
                .unwrap()
                .into_iter()
                .map(|r| r.key.airline)
                .collect()
        };
        assert_eq!(order(&base), order(&scaled));
    }

    #[test]
    fn test_max_emissions_package_never_improves() {
        let map = packages(&[("X", 100.0, 1, 30.0), ("Y", 150.0, 0, 60.0)]);
        let score_of_y = |w: Weights| {
            score_packages(&map, &w)
                .unwrap()
                .into_iter()
                .find(|(k, _)| k.airline == "Y")
                .map(|(_, s)| s)
                .unwrap()
        };
        let low = score_of_y(Weights::new(0.4, 0.4, 0.2).unwrap());
        let high = score_of_y(Weights::new(0.4, 0.4, 0.6).unwrap());
        assert!(high >= low);
    }

    #[test]
    fn test_invalid_weights() {
        assert!(Weights::new(-0.1, 0.5, 0.5).is_err());
        assert!(Weights::new(f64::NAN, 0.5, 0.5).is_err());
        assert!(Weights::new(0.0, 0.0, 0.0).is_err());

        let normalized = Weights::new(1.0, 1.0, 2.0).unwrap().normalized().unwrap();
        assert!((normalized.emissions - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_optimal_routes_unconnected() {
        let mut graph = FlightGraph::new();
        graph.add_vertex("SYD", "Australia", None);
        graph.add_vertex("MEL", "Australia", None);
        assert!(optimal_routes(&graph, "SYD", "MEL", &Weights::default())
            .unwrap()
            .is_empty());
        assert!(matches!(
            optimal_routes(&graph, "SYD", "PER", &Weights::default()),
            Err(SkyrouteError::NotFound(_))
        ));
    }
}
