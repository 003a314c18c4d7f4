// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::ratings;

#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct Rating {
    pub rating_id: String,
    pub user_id: String,
    pub movie_id: String,
    pub rating: f64,
}

// Ratings are plain inserts, a repeated rating_id is an error
#[derive(Debug, Clone, PartialEq, Insertable)]
#[table_name = "ratings"]
pub struct NewRating {
    pub rating_id: String,
    pub user_id: String,
    pub movie_id: String,
    pub rating: f64,
}
