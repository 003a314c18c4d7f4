// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use super::{tagged_ddl, Result, Store};
use crate::error::ErrorKind;
use crate::models::{Movie, NewMovie, NewRating, NewUser, Rating, User};
use crate::schema::{movies, ratings, users};
use config::{Backend, DatabaseConfig};
use diesel::pg::PgConnection;
use diesel::{insert_into, prelude::*, sql_query};

pub fn establish_connection(config: &DatabaseConfig) -> Result<PgConnection> {
    let conn = PgConnection::establish(&config.connection_string())
        .map_err(|e| ErrorKind::Connection(config.describe(), e.to_string()))?;

    Ok(conn)
}

pub struct PgStore {
    pg_conn: PgConnection,
}

impl PgStore {
    pub fn establish(config: &DatabaseConfig) -> Result<Self> {
        let pg_conn = establish_connection(config)?;
        Ok(Self { pg_conn })
    }
}

impl Store for PgStore {
    fn backend(&self) -> Backend {
        Backend::Postgres
    }

    fn create_tables(&self) -> Result<()> {
        for (table, ddl) in tagged_ddl() {
            sql_query(ddl)
                .execute(&self.pg_conn)
                .map_err(|e| ErrorKind::Schema(table, e.to_string()))?;
        }

        Ok(())
    }

    fn insert_user(&self, user: &NewUser) -> Result<usize> {
        let written = insert_into(users::table)
            .values(user)
            .on_conflict_do_nothing()
            .execute(&self.pg_conn)?;

        Ok(written)
    }

    fn insert_movie(&self, movie: &NewMovie) -> Result<usize> {
        let written = insert_into(movies::table)
            .values(movie)
            .on_conflict_do_nothing()
            .execute(&self.pg_conn)?;

        Ok(written)
    }

    fn insert_rating(&self, rating: &NewRating) -> Result<usize> {
        let written = insert_into(ratings::table)
            .values(rating)
            .execute(&self.pg_conn)?;

        Ok(written)
    }

    fn users(&self) -> Result<Vec<User>> {
        let users = users::table.order(users::user_id).load::<User>(&self.pg_conn)?;
        Ok(users)
    }

    fn movies(&self) -> Result<Vec<Movie>> {
        let movies = movies::table
            .order(movies::movie_id)
            .load::<Movie>(&self.pg_conn)?;

        Ok(movies)
    }

    fn ratings(&self) -> Result<Vec<Rating>> {
        let ratings = ratings::table
            .order(ratings::rating_id)
            .load::<Rating>(&self.pg_conn)?;

        Ok(ratings)
    }
}
