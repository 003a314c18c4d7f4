// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Couldn't connect to {0}: {1}")]
    Connection(String, String),

    #[error("Backend {0} is not available in this build")]
    BackendUnavailable(String),

    #[error("Couldn't create table {0}: {1}")]
    Schema(&'static str, String),

    #[error("Couldn't open {0}: {1}")]
    OpenFile(String, String),

    #[error("Couldn't read record at line {0}: {1}")]
    ReadRecord(u64, String),

    #[error("Malformed rating ({1}) at line {0}")]
    MalformedRating(u64, String),

    #[error("Couldn't insert {0}({1}) at line {2}: {3}")]
    Insert(&'static str, String, u64, String),
}
