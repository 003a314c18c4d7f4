// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::schema::users;

// To query data from the database
#[derive(Debug, Clone, PartialEq, Queryable)]
pub struct User {
    pub user_id: String,
    pub name: String,
}

// To insert a new user into the database
#[derive(Debug, Clone, PartialEq, Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub user_id: String,
    pub name: String,
}
