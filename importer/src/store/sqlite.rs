// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::{tagged_ddl, Result, Store};
use crate::error::ErrorKind;
use crate::models::{Movie, NewMovie, NewRating, NewUser, Rating, User};
use crate::schema::{movies, ratings, users};
use config::Backend;
use diesel::connection::SimpleConnection;
use diesel::sqlite::SqliteConnection;
use diesel::{insert_into, insert_or_ignore_into, prelude::*, sql_query};

pub fn establish_connection(path: &str) -> Result<SqliteConnection> {
    let conn = SqliteConnection::establish(path)
        .map_err(|e| ErrorKind::Connection(format!("sqlite://{}", path), e.to_string()))?;

    // Off by default in sqlite
    conn.batch_execute("PRAGMA foreign_keys = ON")?;
    Ok(conn)
}

pub struct SqliteStore {
    conn: SqliteConnection,
}

impl SqliteStore {
    pub fn establish(path: &str) -> Result<Self> {
        let conn = establish_connection(path)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        Self::establish(":memory:")
    }
}

impl Store for SqliteStore {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn create_tables(&self) -> Result<()> {
        for (table, ddl) in tagged_ddl() {
            sql_query(ddl)
                .execute(&self.conn)
                .map_err(|e| ErrorKind::Schema(table, e.to_string()))?;
        }

        Ok(())
    }

    fn insert_user(&self, user: &NewUser) -> Result<usize> {
        let written = insert_or_ignore_into(users::table)
            .values(user)
            .execute(&self.conn)?;

        Ok(written)
    }

    fn insert_movie(&self, movie: &NewMovie) -> Result<usize> {
        let written = insert_or_ignore_into(movies::table)
            .values(movie)
            .execute(&self.conn)?;

        Ok(written)
    }

    fn insert_rating(&self, rating: &NewRating) -> Result<usize> {
        let written = insert_into(ratings::table)
            .values(rating)
            .execute(&self.conn)?;

        Ok(written)
    }

    fn users(&self) -> Result<Vec<User>> {
        let users = users::table.order(users::user_id).load::<User>(&self.conn)?;
        Ok(users)
    }

    fn movies(&self) -> Result<Vec<Movie>> {
        let movies = movies::table
            .order(movies::movie_id)
            .load::<Movie>(&self.conn)?;
        Ok(movies)
    }

    fn ratings(&self) -> Result<Vec<Rating>> {
        let ratings = ratings::table
            .order(ratings::rating_id)
            .load::<Rating>(&self.conn)?;

        Ok(ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Result<SqliteStore> {
        let store = SqliteStore::in_memory()?;
        store.create_tables()?;
        Ok(store)
    }

    fn user(id: &str, name: &str) -> NewUser {
        NewUser {
            user_id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn create_tables_twice() -> Result<()> {
        let store = store()?;
        store.create_tables()?;

        Ok(())
    }

    #[test]
    fn duplicate_user_is_ignored() -> Result<()> {
        let store = store()?;

        assert_eq!(store.insert_user(&user("u1", "Alice"))?, 1);
        assert_eq!(store.insert_user(&user("u1", "Someone else"))?, 0);

        let users = store.users()?;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Alice");

        Ok(())
    }

    #[test]
    fn rating_requires_user_and_movie() -> Result<()> {
        let store = store()?;
        store.insert_user(&user("u1", "Alice"))?;

        let rating = NewRating {
            rating_id: "r1".into(),
            user_id: "u1".into(),
            movie_id: "m404".into(),
            rating: 3.0,
        };

        assert!(store.insert_rating(&rating).is_err());
        assert!(store.ratings()?.is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_rating_fails() -> Result<()> {
        let store = store()?;
        store.insert_user(&user("u1", "Alice"))?;
        store.insert_movie(&NewMovie {
            movie_id: "m1".into(),
            title: "Heat".into(),
            genres: "Action".into(),
        })?;

        let rating = NewRating {
            rating_id: "r1".into(),
            user_id: "u1".into(),
            movie_id: "m1".into(),
            rating: 4.5,
        };

        assert_eq!(store.insert_rating(&rating)?, 1);
        assert!(store.insert_rating(&rating).is_err());
        assert_eq!(store.ratings()?.len(), 1);

        Ok(())
    }
}
