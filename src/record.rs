//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Razbi.
//! The Razbi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Razbi Record Module
//!
//! Rows, column identities, and the declared column layout of one source.
//!
//! A row is a plain vector of cell strings as produced by a row source. Columns
//! are addressed either by header name (when the source declares headers) or by
//! zero-based position (when it does not). [`RzColumns`] is the one place that
//! knows which of the two applies to a file, and binds row cells to
//! [`RzColumnKey`]s at evaluation time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RzError};

/// One row of cells, in source order.
pub type RzRow = Vec<String>;

/// Identity of a column inside one source file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RzColumnKey {
    /// Header name, in the canonical spelling of the source's header row.
    Name(String),
    /// Zero-based position, for sources without headers.
    Index(usize),
}

impl fmt::Display for RzColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RzColumnKey::Name(name) => write!(f, "{}", name),
            // Positions are shown 1-based, the way users type them.
            RzColumnKey::Index(idx) => write!(f, "#{}", idx + 1),
        }
    }
}

/// Declared column layout of a source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RzColumns {
    /// The source starts with a header row holding these names.
    Named(Vec<String>),
    /// The source has no header row. `count` is the width of the first row
    /// when known and bounds positional column references.
    Positional { count: Option<usize> },
}

impl Default for RzColumns {
    fn default() -> Self {
        RzColumns::Positional { count: None }
    }
}

impl RzColumns {
    pub fn named<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RzColumns::Named(headers.into_iter().map(Into::into).collect())
    }

    pub fn positional(count: Option<usize>) -> Self {
        RzColumns::Positional { count }
    }

    /// Header row, when the source declares one.
    pub fn headers(&self) -> Option<&[String]> {
        match self {
            RzColumns::Named(headers) => Some(headers),
            RzColumns::Positional { .. } => None,
        }
    }

    /// Resolves the column token a user typed at the head of a filter entry.
    ///
    /// Header names match case-insensitively and resolve to the header's own
    /// spelling. Without headers the token is a 1-based column number.
    pub fn resolve(&self, token: &str) -> Result<RzColumnKey> {
        match self {
            RzColumns::Named(headers) => {
                let wanted = token.to_lowercase();
                headers
                    .iter()
                    .find(|header| header.to_lowercase() == wanted)
                    .map(|header| RzColumnKey::Name(header.clone()))
                    .ok_or_else(|| {
                        RzError::configuration(format!("column '{}' does not exist", token))
                    })
            }
            RzColumns::Positional { count } => {
                let number: usize = token.parse().map_err(|_| {
                    RzError::configuration(format!(
                        "column number must be a positive integer, got '{}'",
                        token
                    ))
                })?;
                if number == 0 {
                    return Err(RzError::configuration("column numbers start at 1"));
                }
                if let Some(count) = count {
                    if number > *count {
                        return Err(RzError::configuration(format!(
                            "column {} does not exist, the source has {} columns",
                            number, count
                        )));
                    }
                }
                Ok(RzColumnKey::Index(number - 1))
            }
        }
    }

    /// Position of a column inside a row of this source.
    pub fn position(&self, key: &RzColumnKey) -> Option<usize> {
        match (self, key) {
            (RzColumns::Named(headers), RzColumnKey::Name(name)) => {
                headers.iter().position(|header| header == name)
            }
            (_, RzColumnKey::Index(idx)) => Some(*idx),
            (RzColumns::Positional { .. }, RzColumnKey::Name(_)) => None,
        }
    }

    /// Cell bound to `key` in `row`; a missing cell binds to the empty string.
    pub fn cell<'a>(&self, row: &'a [String], key: &RzColumnKey) -> &'a str {
        self.position(key)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True when `row` repeats the declared header row.
    pub fn is_header_row(&self, row: &[String]) -> bool {
        match self.headers() {
            Some(headers) => headers == row,
            None => false,
        }
    }
}
