// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod error;

use crate::error::ErrorKind;
use anyhow::Error;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix of every environment variable that overrides a config value
pub const ENV_PREFIX: &str = "MOVIE_RATINGS_";

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Sqlite
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Postgres => write!(f, "postgres"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for Backend {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(ErrorKind::UnknownBackend(other.into())),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            host: "localhost".into(),
            port: 5432,
            database: "movieratings.db".into(),
            user: "postgres".into(),
            password: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// String handed to the driver when establishing a connection. For postgres this is a
    /// libpq keyword/value string, for sqlite the database path itself.
    pub fn connection_string(&self) -> String {
        match self.backend {
            Backend::Postgres => format!(
                "host={} port={} dbname={} user={} password={}",
                quote_conninfo(&self.host),
                self.port,
                quote_conninfo(&self.database),
                quote_conninfo(&self.user),
                quote_conninfo(&self.password),
            ),
            Backend::Sqlite => self.database.clone(),
        }
    }

    /// Human readable target, never includes the password
    pub fn describe(&self) -> String {
        match self.backend {
            Backend::Postgres => format!(
                "postgres://{}@{}:{}/{}",
                self.user, self.host, self.port, self.database
            ),
            Backend::Sqlite => format!("sqlite://{}", self.database),
        }
    }
}

// libpq values go between single quotes, with backslash and quote escaped
fn quote_conninfo(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// The three datasets, in the order they must be imported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Movies,
    Ratings,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Users, Table::Movies, Table::Ratings];

    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Movies => "movies",
            Table::Ratings => "ratings",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImportConfig {
    pub data_dir: PathBuf,
    pub users: PathBuf,
    pub movies: PathBuf,
    pub ratings: PathBuf,
    pub separator: char,
    pub show_progress: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            users: PathBuf::from("users.csv"),
            movies: PathBuf::from("movies.csv"),
            ratings: PathBuf::from("ratings.csv"),
            separator: ',',
            show_progress: true,
        }
    }
}

impl ImportConfig {
    pub fn path_for(&self, table: Table) -> PathBuf {
        let file = match table {
            Table::Users => &self.users,
            Table::Movies => &self.movies,
            Table::Ratings => &self.ratings,
        };

        self.data_dir.join(file)
    }

    pub fn separator_byte(&self) -> Result<u8, ErrorKind> {
        if self.separator.is_ascii() {
            Ok(self.separator as u8)
        } else {
            Err(ErrorKind::InvalidSeparator(self.separator))
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub import: ImportConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        let parsed: Self = toml::from_str(&contents)?;
        Ok(parsed)
    }

    /// Apply `MOVIE_RATINGS_*` overrides, `lookup` receives the full variable name
    pub fn overlay<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(&format!("{}{}", ENV_PREFIX, key));

        if let Some(backend) = var("BACKEND") {
            self.database.backend = backend.parse()?;
        }

        if let Some(host) = var("HOST") {
            self.database.host = host;
        }

        if let Some(port) = var("PORT") {
            self.database.port = port
                .trim()
                .parse()
                .map_err(|_| ErrorKind::InvalidPort(port.clone()))?;
        }

        if let Some(database) = var("DATABASE") {
            self.database.database = database;
        }

        if let Some(user) = var("USER") {
            self.database.user = user;
        }

        if let Some(password) = var("PASSWORD") {
            self.database.password = password;
        }

        if let Some(data_dir) = var("DATA_DIR") {
            self.import.data_dir = data_dir.into();
        }

        Ok(())
    }
}
