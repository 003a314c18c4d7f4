// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::movies;

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Movie {
    pub movie_id: String,
    pub title: String,
    pub genres: String,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[table_name = "movies"]
pub struct NewMovie {
    pub movie_id: String,
    pub title: String,
    pub genres: String,
}
