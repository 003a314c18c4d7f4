// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! Naive row splitting for the three datasets.
//!
//! Fields are split on every occurrence of the separator, there is no quoting. Each table
//! declares a [`Layout`] that says how many fields it needs and which one may absorb stray
//! separators.

use crate::error::ErrorKind;
use crate::models::{NewMovie, NewRating, NewUser};
use config::Table;
use csv::{ByteRecord, Reader, ReaderBuilder, StringRecord};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Take the first `n` fields, anything past them is ignored
    Leading(usize),

    /// Fixed fields at both ends, everything in between is one text field that keeps its
    /// separators verbatim
    Anchored { leading: usize, trailing: usize },
}

impl Layout {
    pub fn for_table(table: Table) -> Self {
        match table {
            Table::Users => Layout::Leading(2),
            Table::Movies => Layout::Anchored {
                leading: 1,
                trailing: 1,
            },
            Table::Ratings => Layout::Leading(4),
        }
    }

    pub fn min_fields(self) -> usize {
        match self {
            Layout::Leading(n) => n,
            Layout::Anchored { leading, trailing } => leading + 1 + trailing,
        }
    }

    /// Split a record into exactly `min_fields` values, `None` if it's too short
    pub fn split(self, record: &StringRecord, separator: char) -> Option<Vec<String>> {
        match self {
            // Trailing empty fields don't count, `u2,` has a single field
            Layout::Leading(n) => {
                let empty_tail = record.iter().rev().take_while(|f| f.is_empty()).count();
                let len = record.len() - empty_tail;
                if len < n {
                    return None;
                }

                Some(record.iter().take(n).map(String::from).collect())
            }

            Layout::Anchored { leading, trailing } => {
                let len = record.len();
                if len < self.min_fields() {
                    return None;
                }

                let mut fields: Vec<String> =
                    record.iter().take(leading).map(String::from).collect();

                let text: Vec<&str> = record
                    .iter()
                    .skip(leading)
                    .take(len - leading - trailing)
                    .collect();
                fields.push(text.join(&separator.to_string()));

                fields.extend(record.iter().skip(len - trailing).map(String::from));
                Some(fields)
            }
        }
    }
}

/// Build a reader that discards the header line, skips blank lines and never treats quotes
/// specially
pub fn reader<R: Read>(rdr: R, separator: u8) -> Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .delimiter(separator)
        .quoting(false)
        .flexible(true)
        .from_reader(rdr)
}

/// Decode a raw record, invalid utf-8 is replaced instead of failing the whole file
pub fn decode(record: &ByteRecord) -> StringRecord {
    let mut decoded: StringRecord = record
        .iter()
        .map(|field| String::from_utf8_lossy(field))
        .collect();

    decoded.set_position(record.position().cloned());
    decoded
}

pub fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}

pub fn user(record: &StringRecord, separator: char) -> Option<NewUser> {
    let mut fields = Layout::for_table(Table::Users).split(record, separator)?.into_iter();

    Some(NewUser {
        user_id: fields.next()?,
        name: fields.next()?,
    })
}

pub fn movie(record: &StringRecord, separator: char) -> Option<NewMovie> {
    let mut fields = Layout::for_table(Table::Movies).split(record, separator)?.into_iter();

    Some(NewMovie {
        movie_id: fields.next()?,
        title: fields.next()?,
        genres: fields.next()?,
    })
}

/// `Ok(None)` for a short row, an error if the rating isn't a number
pub fn rating(record: &StringRecord, separator: char) -> Result<Option<NewRating>, ErrorKind> {
    let fields = match Layout::for_table(Table::Ratings).split(record, separator) {
        Some(fields) => fields,
        None => return Ok(None),
    };

    let mut fields = fields.into_iter();
    let (rating_id, user_id, movie_id, raw) = match (
        fields.next(),
        fields.next(),
        fields.next(),
        fields.next(),
    ) {
        (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
        _ => return Ok(None),
    };

    let rating: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ErrorKind::MalformedRating(line_of(record), raw.clone()))?;

    Ok(Some(NewRating {
        rating_id,
        user_id,
        movie_id,
        rating,
    }))
}
