// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use clap::{App, Arg, ArgMatches};
use config::Config;
use simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::collections::HashMap;
use std::path::Path;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_CONFIG: &str = "movie-ratings.toml";

fn resolve_config(matches: &ArgMatches) -> Result<Config, Error> {
    let mut config = match matches.value_of("config") {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG)?,
        None => Config::default(),
    };

    // Loads .env first, then the process environment wins
    let vars: HashMap<String, String> = dotenv::vars().collect();
    config.overlay(|key| vars.get(key).cloned())?;

    if let Some(data_dir) = matches.value_of("data-dir") {
        config.import.data_dir = data_dir.into();
    }

    if let Some(database) = matches.value_of("database") {
        config.database.database = database.into();
    }

    if matches.is_present("no-progress") {
        config.import.show_progress = false;
    }

    Ok(config)
}

fn main() -> Result<(), Error> {
    let matches = App::new("movie-ratings")
        .version(VERSION)
        .about("Loads users, movies and ratings from CSV files into a database")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("TOML config file (defaults to ./movie-ratings.toml if present)"),
        )
        .arg(
            Arg::with_name("data-dir")
                .short("d")
                .long("data-dir")
                .value_name("DIR")
                .takes_value(true)
                .help("Directory holding users.csv, movies.csv and ratings.csv"),
        )
        .arg(
            Arg::with_name("database")
                .long("database")
                .value_name("NAME")
                .takes_value(true)
                .help("Database name, or file path for sqlite"),
        )
        .arg(
            Arg::with_name("no-progress")
                .long("no-progress")
                .help("Don't draw progress spinners"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging, repeat for even more"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    TermLogger::init(level, LogConfig::default(), TerminalMode::Mixed)?;

    let config = resolve_config(&matches)?;
    log::debug!(
        "Using {} with data from {}",
        config.database.describe(),
        config.import.data_dir.display()
    );

    let report = match importer::run(&config) {
        Ok(report) => report,
        Err(e) => {
            log::error!("Import aborted: {}", e);
            return Err(e);
        }
    };

    report.to_table().printstd();
    if report.has_failures() {
        log::warn!("Some files couldn't be imported, see the errors above");
    }

    Ok(())
}
