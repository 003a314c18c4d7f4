// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod movies;
pub mod ratings;
pub mod users;

pub use movies::{Movie, NewMovie};
pub use ratings::{NewRating, Rating};
pub use users::{NewUser, User};
