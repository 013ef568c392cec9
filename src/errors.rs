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

//! # Razbi Error Module
//!
//! This module defines the error types used throughout Razbi for consistent
//! error handling and reporting.
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors while reading sources or writing partitions
//! - **Configuration**: Invalid row budgets, delimiters, or filter queries.
//!   Always raised before any row is streamed, so callers can re-prompt.
//! - **SourceFormat**: Unsupported, undecodable, or empty source files. These
//!   abort the offending file only.
//! - **Serde**: Job configuration files that fail to deserialize
//! - **Internal**: Unexpected internal failures
//!
//! Text fallback for relational operators over non-numeric cells is not an
//! error and never surfaces here.
//!
//! ## Usage
//!
//! ```rust
//! use razbi::errors::{Result, RzError};
//!
//! fn budget(raw: &str) -> Result<usize> {
//!     raw.parse::<usize>()
//!         .map_err(|_| RzError::configuration(format!("'{}' is not a row count", raw)))
//! }
//! ```

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Razbi.
pub type Result<T> = std::result::Result<T, RzError>;

/// Canonical error enumeration for Razbi.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
pub enum RzError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// Invalid run or query configuration, detected before streaming.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A source file that cannot be read as tabular data.
    #[error("source format error in '{path}': {message}")]
    SourceFormat { path: String, message: String },

    /// Wrapper for serde-style deserialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for RzError {
    fn from(err: io::Error) -> Self {
        RzError::Io(err.to_string())
    }
}

impl From<csv::Error> for RzError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => RzError::Io(err.to_string()),
            _ => RzError::Internal(format!("csv error: {err}")),
        }
    }
}

impl From<serde_json::Error> for RzError {
    fn from(err: serde_json::Error) -> Self {
        RzError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for RzError {
    fn from(err: serde_yaml::Error) -> Self {
        RzError::Serde(err.to_string())
    }
}

impl RzError {
    /// Helper to construct configuration errors.
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        RzError::Configuration {
            message: message.into(),
        }
    }

    /// Helper to construct source format errors bound to a file.
    pub fn source_format(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        RzError::SourceFormat {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        RzError::Internal(message.into())
    }

    /// Returns true when the caller may fix its input and retry.
    pub fn is_configuration(&self) -> bool {
        matches!(self, RzError::Configuration { .. })
    }

    /// Returns true when the error concerns one source file only.
    pub fn is_source_format(&self) -> bool {
        matches!(self, RzError::SourceFormat { .. })
    }
}
