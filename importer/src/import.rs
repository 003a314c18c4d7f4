// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::error::ErrorKind;
use crate::parse;
use crate::store::Store;
use anyhow::Error;
use config::{ImportConfig, Table};
use csv::{Reader, StringRecord};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Counters for one imported file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Data lines seen, the header not included
    pub read: usize,
    pub inserted: usize,
    /// Rows whose key already existed
    pub ignored: usize,
    /// Rows with too few fields
    pub skipped: usize,
}

/// Reads a dataset line by line and inserts every accepted row, one statement per row.
///
/// The first failing row stops the file: rows before it stay in the database, rows after it
/// are never read.
pub struct Importer<'s> {
    store: &'s dyn Store,
    separator: u8,
    show_progress: bool,
}

impl<'s> Importer<'s> {
    pub fn new(store: &'s dyn Store) -> Self {
        Self {
            store,
            separator: b',',
            show_progress: false,
        }
    }

    pub fn with_config(store: &'s dyn Store, config: &ImportConfig) -> Result<Self, Error> {
        Ok(Self::new(store)
            .separator(config.separator_byte()?)
            .show_progress(config.show_progress))
    }

    pub fn separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn import_file(&self, table: Table, path: &Path) -> Result<ImportStats, Error> {
        let file = File::open(path)
            .map_err(|e| ErrorKind::OpenFile(path.display().to_string(), e.to_string()))?;

        log::debug!("Importing {} from {}", table, path.display());
        self.import_from(table, BufReader::new(file))
    }

    pub fn import_from<R: Read>(&self, table: Table, rdr: R) -> Result<ImportStats, Error> {
        let mut csv = parse::reader(rdr, self.separator);
        let bar = self.progress_bar(table);

        let res = self.import_records(table, &mut csv, bar.clone());
        bar.finish_and_clear();

        res
    }

    fn import_records<R: Read>(
        &self,
        table: Table,
        csv: &mut Reader<R>,
        bar: ProgressBar,
    ) -> Result<ImportStats, Error> {
        let mut stats = ImportStats::default();

        for record in csv.byte_records().progress_with(bar) {
            let record = record.map_err(|e| {
                let line = e.position().map(|pos| pos.line()).unwrap_or(0);
                ErrorKind::ReadRecord(line, e.to_string())
            })?;
            let record = parse::decode(&record);

            stats.read += 1;
            match self.insert_record(table, &record)? {
                Some(0) => stats.ignored += 1,
                Some(written) => stats.inserted += written,
                None => {
                    log::trace!("Skipping short row at line {}", parse::line_of(&record));
                    stats.skipped += 1;
                }
            }
        }

        Ok(stats)
    }

    // None when the row doesn't have enough fields
    fn insert_record(&self, table: Table, record: &StringRecord) -> Result<Option<usize>, Error> {
        let sep = self.separator as char;
        let fail = |key: &str, e: Error| -> Error {
            ErrorKind::Insert(table.name(), key.into(), parse::line_of(record), e.to_string()).into()
        };

        let written = match table {
            Table::Users => match parse::user(record, sep) {
                Some(user) => self
                    .store
                    .insert_user(&user)
                    .map_err(|e| fail(&user.user_id, e))?,
                None => return Ok(None),
            },

            Table::Movies => match parse::movie(record, sep) {
                Some(movie) => self
                    .store
                    .insert_movie(&movie)
                    .map_err(|e| fail(&movie.movie_id, e))?,
                None => return Ok(None),
            },

            Table::Ratings => match parse::rating(record, sep)? {
                Some(rating) => self
                    .store
                    .insert_rating(&rating)
                    .map_err(|e| fail(&rating.rating_id, e))?,
                None => return Ok(None),
            },
        };

        Ok(Some(written))
    }

    fn progress_bar(&self, table: Table) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}: {pos} rows"));
        bar.set_message(table.name());
        bar
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    const USERS: &str = "user_id,name\nu1,Alice\nu2,Bob\n";
    const MOVIES: &str = "movie_id,title,genres\nm1,Heat,Action|Crime\nm2,Up, Up and Away,Comedy\n";
    const RATINGS: &str = "rating_id,user_id,movie_id,rating\nr1,u1,m1,4.5\nr2,u2,m2,3\n";

    fn seeded() -> Result<SqliteStore, Error> {
        let store = SqliteStore::in_memory()?;
        store.create_tables()?;

        let importer = Importer::new(&store);
        importer.import_from(Table::Users, USERS.as_bytes())?;
        importer.import_from(Table::Movies, MOVIES.as_bytes())?;

        Ok(store)
    }

    #[test]
    fn users_import_is_idempotent() -> Result<(), Error> {
        let store = seeded()?;
        let importer = Importer::new(&store);

        let again = importer.import_from(Table::Users, USERS.as_bytes())?;
        assert_eq!(
            again,
            ImportStats {
                read: 2,
                inserted: 0,
                ignored: 2,
                skipped: 0,
            }
        );

        let names: Vec<_> = store.users()?.into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);

        Ok(())
    }

    #[test]
    fn movies_keep_titles_with_separators() -> Result<(), Error> {
        let store = seeded()?;
        let movies = store.movies()?;

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].title, "Up, Up and Away");
        assert_eq!(movies[1].genres, "Comedy");

        let again = Importer::new(&store).import_from(Table::Movies, MOVIES.as_bytes())?;
        assert_eq!(again.ignored, 2);
        assert_eq!(store.movies()?.len(), 2);

        Ok(())
    }

    #[test]
    fn ratings_are_stored_with_parsed_values() -> Result<(), Error> {
        let store = seeded()?;
        let stats = Importer::new(&store).import_from(Table::Ratings, RATINGS.as_bytes())?;
        assert_eq!(stats.inserted, 2);

        let ratings = store.ratings()?;
        assert_eq!(ratings[0].user_id, "u1");
        assert_eq!(ratings[0].movie_id, "m1");
        assert_eq!(ratings[0].rating, 4.5);
        assert_eq!(ratings[1].rating, 3.0);

        Ok(())
    }

    #[test]
    fn ratings_reimport_stops_on_first_duplicate() -> Result<(), Error> {
        let store = seeded()?;
        let importer = Importer::new(&store);
        importer.import_from(Table::Ratings, RATINGS.as_bytes())?;

        let more = "rating_id,user_id,movie_id,rating\nr1,u1,m1,4.5\nr3,u1,m2,2\n";
        let err = importer
            .import_from(Table::Ratings, more.as_bytes())
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();

        assert!(err.starts_with("Couldn't insert ratings(r1) at line 2"));
        // r3 comes after the duplicate and is never attempted
        assert_eq!(store.ratings()?.len(), 2);

        Ok(())
    }

    #[test]
    fn malformed_rating_aborts_rest_of_file() -> Result<(), Error> {
        let store = seeded()?;
        let ratings = "rating_id,user_id,movie_id,rating\nr1,u1,m1,4\nr2,u1,m1,bad\nr3,u2,m2,5\n";

        let res = Importer::new(&store).import_from(Table::Ratings, ratings.as_bytes());
        assert!(res.is_err());

        let ids: Vec<_> = store.ratings()?.into_iter().map(|r| r.rating_id).collect();
        assert_eq!(ids, vec!["r1"]);

        Ok(())
    }

    #[test]
    fn dangling_rating_aborts_rest_of_file() -> Result<(), Error> {
        let store = seeded()?;
        let ratings = "rating_id,user_id,movie_id,rating\nr1,u9,m1,4\nr2,u1,m1,5\n";

        assert!(Importer::new(&store)
            .import_from(Table::Ratings, ratings.as_bytes())
            .is_err());
        assert!(store.ratings()?.is_empty());

        Ok(())
    }

    #[test]
    fn short_rows_are_counted_and_skipped() -> Result<(), Error> {
        let store = SqliteStore::in_memory()?;
        store.create_tables()?;

        let users = "user_id,name\nu1\nu2,Bob\nu3,Smith, John\n";
        let stats = Importer::new(&store).import_from(Table::Users, users.as_bytes())?;

        assert_eq!(stats.read, 3);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.inserted, 2);

        let users = store.users()?;
        assert_eq!(users[1].user_id, "u3");
        assert_eq!(users[1].name, "Smith");

        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() -> Result<(), Error> {
        let store = SqliteStore::in_memory()?;
        store.create_tables()?;

        let err = Importer::new(&store)
            .import_file(Table::Users, Path::new("/definitely/not/here/users.csv"))
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();

        assert!(err.starts_with("Couldn't open /definitely/not/here/users.csv"));
        Ok(())
    }

    #[test]
    fn empty_rating_field_skips_only_that_row() -> Result<(), Error> {
        let store = seeded()?;
        let ratings = "rating_id,user_id,movie_id,rating\nr1,u1,m1,\nr2,u1,m1,4\n";

        let stats = Importer::new(&store).import_from(Table::Ratings, ratings.as_bytes())?;
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.inserted, 1);

        let ids: Vec<_> = store.ratings()?.into_iter().map(|r| r.rating_id).collect();
        assert_eq!(ids, vec!["r2"]);

        Ok(())
    }

    #[test]
    fn user_without_name_is_skipped() -> Result<(), Error> {
        let store = SqliteStore::in_memory()?;
        store.create_tables()?;

        let stats = Importer::new(&store).import_from(Table::Users, "h\nu2,\n".as_bytes())?;
        assert_eq!(stats.skipped, 1);
        assert!(store.users()?.is_empty());

        Ok(())
    }

    #[test]
    fn latin1_bytes_do_not_abort_the_file() -> Result<(), Error> {
        let store = SqliteStore::in_memory()?;
        store.create_tables()?;

        let users: &[u8] = b"user_id,name\nu3,Jos\xe9\nu4,Bob\n";
        let stats = Importer::new(&store).import_from(Table::Users, users)?;
        assert_eq!(stats.inserted, 2);

        let names: Vec<_> = store.users()?.into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Jos\u{FFFD}", "Bob"]);

        Ok(())
    }

    #[test]
    fn semicolon_separated_files() -> Result<(), Error> {
        let store = SqliteStore::in_memory()?;
        store.create_tables()?;

        let movies = "movie_id;title;genres\nm1;Heat;Action,Crime\n";
        Importer::new(&store)
            .separator(b';')
            .import_from(Table::Movies, movies.as_bytes())?;

        assert_eq!(store.movies()?[0].genres, "Action,Crime");
        Ok(())
    }
}
