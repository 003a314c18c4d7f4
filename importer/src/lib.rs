// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[macro_use]
extern crate diesel;

pub mod error;
pub mod import;
pub mod models;
pub mod parse;
pub mod report;
pub mod schema;
pub mod store;

pub use crate::import::{ImportStats, Importer};
pub use crate::report::{Outcome, Phase, Report};
pub use crate::store::{connect, Store};

use anyhow::Error;
use config::{Config, Table};

/// Run a whole import: connect, create the tables, load users, movies and ratings, close.
///
/// Connection and schema errors abort the run. A file that fails to import is logged and
/// recorded in the report, the following files are still attempted.
pub fn run(config: &Config) -> Result<Report, Error> {
    let store = connect(&config.database)?;
    println!("Connected to {} successfully!", config.database.describe());

    store.create_tables()?;
    println!("Tables created (if not already).");

    let importer = Importer::with_config(&*store, &config.import)?;
    let mut report = Report::default();

    for &table in Table::ALL.iter() {
        let path = config.import.path_for(table);
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = match importer.import_file(table, &path) {
            Ok(stats) => {
                println!("Imported {}", file);
                log::debug!("{}: {:?}", file, stats);
                Outcome::Imported(stats)
            }

            Err(e) => {
                log::error!("Error importing {}: {}", file, e);
                Outcome::Failed(e.to_string())
            }
        };

        report.push(table, file, outcome);
    }

    store.close();
    println!("All done! Tables created and CSV data imported.");

    Ok(report)
}
