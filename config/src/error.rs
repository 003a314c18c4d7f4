// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Unknown database backend ({0}), expected postgres or sqlite")]
    UnknownBackend(String),

    #[error("Couldn't parse port ({0})")]
    InvalidPort(String),

    #[error("Separator must be a single ascii character, got '{0}'")]
    InvalidSeparator(char),
}
