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

//! # Data Ingestion Module
//!
//! Reading rows out of source files.
//!
//! ## Module Components
//!
//! - **Format Detection** ([format.rs](format/index.html)): extension-based
//!   detection of delimited text and workbook sources
//! - **Reader** ([reader.rs](reader/index.html)): row streams, the opener seam,
//!   header probing and directory scans
//!
//! ## Usage Patterns
//!
//! ```rust
//! use std::path::Path;
//! use razbi::ingest::{RzDefaultOpener, RzSourceOpener};
//!
//! let opener = RzDefaultOpener::new();
//! let headers = opener.read_headers(Path::new("a.csv"), b';')?;
//! for row in opener.open(Path::new("a.csv"), b';')? {
//!     let row = row?;
//! }
//! ```

pub mod format;
pub mod reader;

pub use format::{extension_of, RzDataFormat, RzFormatDetector, OUTPUT_EXTENSION, SUPPORTED_EXTENSIONS};
pub use reader::{normalize_path, scan_directory, RzCsvRowReader, RzDefaultOpener, RzRowStream, RzSourceOpener};
