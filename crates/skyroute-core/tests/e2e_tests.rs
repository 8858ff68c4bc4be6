// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use skyroute_core::loader::load_graph_from_paths;
use skyroute_core::{optimal_routes, SkyrouteConfig, Weights};
use std::fs;
use tempfile::TempDir;

/// Data directory with the three tables the CLI reads.
struct MockData {
    _dir: TempDir,
    config: SkyrouteConfig,
}

impl MockData {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = dir.path().to_path_buf();

        fs::write(
            root.join("flights.csv"),
            "\
from_airport_code,from_country,dest_airport_code,dest_country,aircraft_type,airline_name,stops,price,co2_emissions
YYZ,Canada,LHR,United Kingdom,Airbus A330,Air Canada,0,500,1200
YYZ,Canada,LHR,United Kingdom,Airbus A380,British Airways,1,400,1500
LHR,United Kingdom,CDG,France,Airbus A320,Air France,0,120,
LHR,United Kingdom,CDG,France,Airbus A320,British Airways,0,110,95
",
        )
        .unwrap();
        fs::write(
            root.join("airports.csv"),
            "Airport Code;Latitude;Longitude\nYYZ;43.6772;-79.6306\nLHR;51.4706;-0.4619\nCDG;49.0097;2.5479\n",
        )
        .unwrap();

        let mut config = SkyrouteConfig::default();
        config.airports_delimiter = ';';
        let config = config.with_data_dir(&root);

        Self { _dir: dir, config }
    }
}

#[test]
fn test_load_and_recommend() {
    let mock = MockData::new();
    let (graph, summary) = load_graph_from_paths(
        &mock.config.flights_csv,
        mock.config.airports_csv.as_ref(),
        mock.config.delimiter_byte().unwrap(),
    )
    .unwrap();

    assert_eq!(summary.loaded, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(graph.vertex_count(), 3);
    assert!(graph.get_vertex("CDG").unwrap().coordinates.is_some());

    let weights = Weights::new(0.5, 0.2, 0.3).unwrap().normalized().unwrap();
    let routes = optimal_routes(&graph, "YYZ", "LHR", &weights).unwrap();
    assert_eq!(routes[0].key.airline, "Air Canada");

    assert!(optimal_routes(&graph, "YYZ", "CDG", &weights)
        .unwrap()
        .is_empty());
    assert_eq!(graph.neighbor_packages("CDG", "LHR").unwrap().len(), 1);
}

#[test]
fn test_missing_flights_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_graph_from_paths(dir.path().join("flights.csv"), None, b',');
    assert!(result.is_err());
}
