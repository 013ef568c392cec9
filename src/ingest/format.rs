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

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RzError};

/// Extensions of the tabular formats Razbi accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "xls", "xlsx"];

/// Extension given to every file Razbi writes.
pub const OUTPUT_EXTENSION: &str = "csv";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RzDataFormat {
    /// Delimited text, one record per line.
    Delimited,
    /// Spreadsheet workbook; only the first sheet is read.
    Workbook,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RzFormatDetector;

impl RzFormatDetector {
    pub fn new() -> Self {
        RzFormatDetector
    }

    /// Detects the format of `path` from its extension.
    pub fn detect(&self, path: &Path) -> Result<RzDataFormat> {
        let extension = extension_of(path);

        match extension.as_str() {
            "csv" => Ok(RzDataFormat::Delimited),
            "xls" | "xlsx" => Ok(RzDataFormat::Workbook),
            _ => Err(RzError::source_format(
                path,
                format!(
                    "unsupported extension '{}', expected one of {}",
                    extension,
                    SUPPORTED_EXTENSIONS.join(", ")
                ),
            )),
        }
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        self.detect(path).is_ok()
    }
}

/// Lower-cased extension of `path`, empty when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
