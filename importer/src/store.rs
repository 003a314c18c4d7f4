// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub use self::postgres::PgStore;
#[cfg(feature = "sqlite")]
pub use self::sqlite::SqliteStore;

use crate::error::ErrorKind;
use crate::models::{Movie, NewMovie, NewRating, NewUser, Rating, User};
use crate::schema::CREATE_TABLES;
use anyhow::Error;
use config::{Backend, DatabaseConfig, Table};

pub type Result<T> = std::result::Result<T, Error>;

pub trait Store {
    fn backend(&self) -> Backend;

    /// Create users, movies and ratings, in that order, if they don't exist yet
    fn create_tables(&self) -> Result<()>;

    /// Insert a user, an existing user_id is ignored. Returns the number of rows written
    fn insert_user(&self, user: &NewUser) -> Result<usize>;

    /// Insert a movie, an existing movie_id is ignored. Returns the number of rows written
    fn insert_movie(&self, movie: &NewMovie) -> Result<usize>;

    /// Insert a rating, fails on an existing rating_id or a dangling user/movie
    fn insert_rating(&self, rating: &NewRating) -> Result<usize>;

    fn users(&self) -> Result<Vec<User>>;
    fn movies(&self) -> Result<Vec<Movie>>;
    fn ratings(&self) -> Result<Vec<Rating>>;

    /// Close the underlying connection
    fn close(self: Box<Self>) {
        log::debug!("Closing {} connection", self.backend());
    }
}

/// Open a store for the configured backend
pub fn connect(config: &DatabaseConfig) -> Result<Box<dyn Store>> {
    log::debug!("Connecting to {}", config.describe());

    match config.backend {
        #[cfg(feature = "postgres")]
        Backend::Postgres => Ok(Box::new(PgStore::establish(config)?)),

        #[cfg(feature = "sqlite")]
        Backend::Sqlite => Ok(Box::new(SqliteStore::establish(&config.database)?)),

        #[allow(unreachable_patterns)]
        other => Err(ErrorKind::BackendUnavailable(other.to_string()).into()),
    }
}

// Shared by every backend, each statement is tagged with the table it creates
pub(crate) fn tagged_ddl() -> impl Iterator<Item = (&'static str, &'static str)> {
    let tables: &'static [Table; 3] = &Table::ALL;
    let statements: &'static [&'static str; 3] = &CREATE_TABLES;

    tables
        .iter()
        .map(|table| table.name())
        .zip(statements.iter().copied())
}
