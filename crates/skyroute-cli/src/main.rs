// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

mod tips;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TerminalMode, TermLogger};
use skyroute_core::loader::{load_graph_from_paths, load_preference_tree_from_path};
use skyroute_core::{optimal_routes, FlightGraph, SkyrouteConfig, Weights};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tips::TipDeck;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the flight, airport and country trait tables
    #[arg(short, long, env = "SKYROUTE_DATA")]
    data: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all airports
    Airports,
    /// List airports directly connected to CODE
    Neighbors { code: String },
    /// Recommend flights between two airports
    Routes {
        from: String,
        to: String,
        /// Importance of ticket price
        #[arg(long)]
        price: Option<f64>,
        /// Importance of the number of stops
        #[arg(long)]
        stops: Option<f64>,
        /// Importance of CO2 emissions
        #[arg(long)]
        emissions: Option<f64>,
    },
    /// Show max and average emissions between two airports
    Emissions { from: String, to: String },
    /// List every country in the flight data
    Countries,
    /// Suggest destination countries from yes/no answers
    Match {
        /// Answers in question order, e.g. y,n,y,y (prompts when omitted)
        #[arg(long, value_delimiter = ',')]
        answers: Option<Vec<String>>,
    },
    /// Print the active config or write the defaults
    Config {
        #[command(flatten)]
        action: ConfigAction,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ConfigAction {
    /// Print the active config
    #[arg(long)]
    show: bool,
    /// Overwrite the config file with the defaults
    #[arg(long)]
    init: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let log_config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    if let Err(e) = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialise logger: {}", e);
    }

    let config_path = cli.config.clone().unwrap_or_else(SkyrouteConfig::default_path);

    // Resetting must work even when the existing file does not load.
    if let Commands::Config { action } = &cli.command {
        if action.init {
            init_config(&config_path)?;
            println!("Wrote default config to {:?}", config_path);
            return Ok(());
        }
    }

    let mut config = SkyrouteConfig::load(&config_path)?;
    if let Some(dir) = &cli.data {
        config = config.with_data_dir(dir);
    }

    match &cli.command {
        Commands::Airports => {
            let graph = load_graph(&config)?;
            for airport in graph.all_vertices() {
                match airport.coordinates {
                    Some(c) => println!(
                        "{:<5} {:<25} ({:.4}, {:.4})",
                        airport.code, airport.country, c.lat, c.lon
                    ),
                    None => println!("{:<5} {}", airport.code, airport.country),
                }
            }
        }
        Commands::Neighbors { code } => {
            let graph = load_graph(&config)?;
            let code = code.to_uppercase();
            let neighbors = graph.neighbors(&code)?;
            if neighbors.is_empty() {
                println!("No direct connections from {}", code);
            }
            for other in neighbors {
                let country = graph.get_vertex(&other)?.country.clone();
                let count = graph.neighbor_packages(&code, &other)?.len();
                println!("{} -> {} ({}): {} package(s)", code, other, country, count);
            }
        }
        Commands::Routes {
            from,
            to,
            price,
            stops,
            emissions,
        } => {
            let graph = load_graph(&config)?;
            let weights = if price.is_none() && stops.is_none() && emissions.is_none() {
                config.default_weights
            } else {
                Weights::new(
                    price.unwrap_or(0.0),
                    stops.unwrap_or(0.0),
                    emissions.unwrap_or(0.0),
                )?
            };
            let weights = weights.normalized()?;

            let (from, to) = (from.to_uppercase(), to.to_uppercase());
            let routes = optimal_routes(&graph, &from, &to, &weights)?;
            if routes.is_empty() {
                println!("No flights found between {} and {}", from, to);
            }
            for (i, route) in routes.iter().enumerate() {
                println!(
                    "{}. {}  price {:.2}, {} stop(s), {:.0} g CO2  [score {:.5}]",
                    i + 1,
                    route.key,
                    route.price,
                    route.stops,
                    route.emissions,
                    route.score
                );
            }
        }
        Commands::Emissions { from, to } => {
            let graph = load_graph(&config)?;
            let (from, to) = (from.to_uppercase(), to.to_uppercase());
            if graph.neighbor_packages(&from, &to)?.is_empty() {
                println!("No flights found between {} and {}", from, to);
            } else {
                println!(
                    "{} <-> {}: max {:.0}, average {:.2}",
                    from,
                    to,
                    graph.max_emissions(&from, &to)?,
                    graph.average_emissions(&from, &to)?
                );
            }
        }
        Commands::Countries => {
            let graph = load_graph(&config)?;
            for country in graph.countries() {
                println!("{}", country);
            }
        }
        Commands::Match { answers } => {
            let tree = load_preference_tree_from_path(&config.traits_csv)
                .with_context(|| format!("Failed to load {:?}", config.traits_csv))?;
            let path: Vec<bool> = match answers {
                Some(given) => answer_path(given, config.questions.len())?,
                None => ask_questions(&config.questions)?,
            };
            let matches = tree.matches(&path);
            if matches.is_empty() {
                println!("There are no countries with this match.");
            } else {
                println!(
                    "The following country(s) match your inputs: {}",
                    matches.join(", ")
                );
            }
        }
        Commands::Config { .. } => {
            println!("# {:?}", config_path);
            println!("{:#?}", config);
        }
    }

    Ok(())
}

fn load_graph(config: &SkyrouteConfig) -> Result<FlightGraph> {
    let (graph, summary) = load_graph_from_paths(
        &config.flights_csv,
        config.airports_csv.as_ref(),
        config.delimiter_byte()?,
    )
    .with_context(|| format!("Failed to load {:?}", config.flights_csv))?;
    log::debug!("{:?}", summary);
    Ok(graph)
}

fn init_config(path: &Path) -> Result<()> {
    SkyrouteConfig::default().save(path)
}

/// Only `Y` (either case) is yes; anything else is no.
fn parse_answer(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

fn answer_path(given: &[String], expected: usize) -> Result<Vec<bool>> {
    if given.len() != expected {
        anyhow::bail!(
            "Expected {} answers (one per question), got {}",
            expected,
            given.len()
        );
    }
    Ok(given.iter().map(|a| parse_answer(a)).collect())
}

fn ask_questions(questions: &[String]) -> Result<Vec<bool>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut deck = TipDeck::new();
    let mut answers = Vec::with_capacity(questions.len());

    for (i, question) in questions.iter().enumerate() {
        if i > 0 {
            println!("\nTravel tip: {}\n", deck.next_tip());
        }
        println!("{}", question);
        print!("Y/N: ");
        io::stdout().flush()?;
        let line = lines.next().transpose()?.unwrap_or_default();
        // Anything other than Y counts as no
        answers.push(parse_answer(&line));
    }
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert!(parse_answer("y"));
        assert!(parse_answer(" Y "));
        assert!(!parse_answer("yes"));
        assert!(!parse_answer("n"));
        assert!(!parse_answer("maybe"));
        assert!(!parse_answer(""));
    }

    #[test]
    fn test_cli_parses_routes() {
        let cli = Cli::try_parse_from([
            "skyroute", "routes", "yyz", "lhr", "--price", "0.5", "--emissions", "0.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Routes {
                from, price, stops, ..
            } => {
                assert_eq!(from, "yyz");
                assert_eq!(price, Some(0.5));
                assert_eq!(stops, None);
            }
            _ => panic!("Wrong command"),
        }
    }

    #[test]
    fn test_cli_parses_answers() {
        let cli = Cli::try_parse_from(["skyroute", "match", "--answers", "y,n,y,n"]).unwrap();
        match cli.command {
            Commands::Match { answers } => assert_eq!(answers.map(|a| a.len()), Some(4)),
            _ => panic!("Wrong command"),
        }
    }

    #[test]
    fn test_answer_count_must_match_questions() {
        let given: Vec<String> = ["y", "n"].iter().map(|s| s.to_string()).collect();
        assert!(answer_path(&given, 4).is_err());
        assert_eq!(answer_path(&given, 2).unwrap(), vec![true, false]);
    }

    #[test]
    fn test_config_action_required_and_exclusive() {
        assert!(Cli::try_parse_from(["skyroute", "config"]).is_err());
        assert!(Cli::try_parse_from(["skyroute", "config", "--show", "--init"]).is_err());
        let cli = Cli::try_parse_from(["skyroute", "config", "--show"]).unwrap();
        match cli.command {
            Commands::Config { action } => assert!(action.show && !action.init),
            _ => panic!("Wrong command"),
        }
    }

    #[test]
    fn test_init_overwrites_unloadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"default_weights":{"price":-1.0,"stops":0.0,"emissions":0.0}}"#,
        )
        .unwrap();
        assert!(SkyrouteConfig::load(&path).is_err());

        init_config(&path).unwrap();
        assert_eq!(SkyrouteConfig::load(&path).unwrap(), SkyrouteConfig::default());
    }
}
