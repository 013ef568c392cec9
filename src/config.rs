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

//! # Razbi Configuration Module
//!
//! Job descriptions for split and merge runs, loadable from JSON or YAML.
//!
//! Every value that would otherwise be asked for interactively is an explicit
//! field here: the row budget, the header re-injection flag, the per-source
//! header flag, delimiter and filter lines, and the merge reference header.
//! A job file that does not parse is a serialization error. A job file that
//! parses but carries an invalid row count or delimiter is a configuration
//! error, as is anything the pipeline rejects while preparing the job. Either
//! way a bad job fails before any row is streamed.
//!
//! ## Example
//!
//! ```yaml
//! rows_per_partition: 1000
//! add_headers: true
//! output_dir: out
//! sources:
//!   - path: a.csv
//!     has_headers: true
//!     delimiter: ";"
//!     filters:
//!       - 'name ~contains "y"'
//! ```

use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{Result, RzError};
use crate::ingest::format::extension_of;
use crate::ingest::reader::{normalize_path, scan_directory, RzSourceOpener};
use crate::operators::merge::{RzMergeConfig, RzReferenceHeader};
use crate::operators::split::RzSplitConfig;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Positive number of accepted rows per output partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RzRowBudget(NonZeroUsize);

impl RzRowBudget {
    pub fn new(rows: usize) -> Result<Self> {
        NonZeroUsize::new(rows)
            .map(RzRowBudget)
            .ok_or_else(|| RzError::configuration("row count must be at least 1"))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    fn from_count(count: i64) -> Result<Self> {
        if count < 1 {
            return Err(RzError::configuration(format!(
                "row count must be at least 1, got {}",
                count
            )));
        }
        let rows = usize::try_from(count)
            .map_err(|_| RzError::configuration(format!("row count {} is too large", count)))?;
        Self::new(rows)
    }
}

impl FromStr for RzRowBudget {
    type Err = RzError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let count: i64 = trimmed.parse().map_err(|_| {
            RzError::configuration(format!("row count must be a whole number, got '{}'", trimmed))
        })?;
        Self::from_count(count)
    }
}

impl fmt::Display for RzRowBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RzRowBudget> for usize {
    fn from(budget: RzRowBudget) -> Self {
        budget.get()
    }
}

impl Serialize for RzRowBudget {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.get() as u64)
    }
}

/// Single-byte field delimiter of a delimited text source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RzDelimiter(u8);

impl RzDelimiter {
    pub fn new(delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
            return Err(RzError::configuration(format!(
                "'{}' cannot be used as a delimiter",
                delimiter.escape_default()
            )));
        }
        Ok(RzDelimiter(delimiter as u8))
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl Default for RzDelimiter {
    fn default() -> Self {
        RzDelimiter(DEFAULT_DELIMITER)
    }
}

impl FromStr for RzDelimiter {
    type Err = RzError;

    /// An empty string selects the default delimiter.
    fn from_str(raw: &str) -> Result<Self> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(RzDelimiter::default()),
            (Some(c), None) => RzDelimiter::new(c),
            _ => Err(RzError::configuration(format!(
                "delimiter must be a single character, got '{}'",
                raw
            ))),
        }
    }
}

impl fmt::Display for RzDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 as char)
    }
}

impl Serialize for RzDelimiter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn default_true() -> bool {
    true
}

/// One source of a split job.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RzSourceSettings {
    pub path: PathBuf,
    pub has_headers: bool,
    pub delimiter: RzDelimiter,
    /// Filter entries, one query line each, applied in order.
    pub filters: Vec<String>,
}

impl RzSourceSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            has_headers: true,
            delimiter: RzDelimiter::default(),
            filters: Vec::new(),
        }
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_delimiter(mut self, delimiter: RzDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_filter(mut self, query: impl Into<String>) -> Self {
        self.filters.push(query.into());
        self
    }
}

/// Split run over one or more sources.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RzSplitJob {
    pub rows_per_partition: RzRowBudget,
    pub add_headers: bool,
    /// Directory receiving the partitions; each source's own directory when
    /// unset.
    pub output_dir: Option<PathBuf>,
    pub sources: Vec<RzSourceSettings>,
}

impl RzSplitJob {
    pub fn new(rows_per_partition: RzRowBudget) -> Self {
        Self {
            rows_per_partition,
            add_headers: true,
            output_dir: None,
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: RzSourceSettings) -> Self {
        self.sources.push(source);
        self
    }

    pub fn split_config(&self) -> RzSplitConfig {
        RzSplitConfig {
            rows_per_partition: self.rows_per_partition,
            add_headers: self.add_headers,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_document::<SplitJobDocument>(path.as_ref())?.validate()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str::<SplitJobDocument>(raw)?.validate()
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str::<SplitJobDocument>(raw)?.validate()
    }
}

/// Merge run.
///
/// Sources are the listed files followed by the eligible files of
/// `directory`, when one is given.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RzMergeJob {
    pub output: PathBuf,
    pub reference: RzReferenceHeader,
    pub delimiter: RzDelimiter,
    pub sources: Vec<PathBuf>,
    pub directory: Option<PathBuf>,
}

impl RzMergeJob {
    pub fn merge_config(&self) -> RzMergeConfig {
        RzMergeConfig {
            output: self.output.clone(),
            reference: self.reference.clone(),
            delimiter: self.delimiter.as_byte(),
        }
    }

    /// Listed sources plus the scanned directory, without the output file
    /// and without repeats.
    pub fn resolve_sources<O>(&self, opener: &O) -> Result<Vec<PathBuf>>
    where
        O: RzSourceOpener + ?Sized,
    {
        let mut sources = self.sources.clone();
        if let Some(dir) = &self.directory {
            let output = normalize_path(&self.output);
            let mut seen: Vec<PathBuf> = sources.iter().map(|path| normalize_path(path)).collect();
            for path in scan_directory(dir, opener, self.delimiter.as_byte())? {
                let identity = normalize_path(&path);
                if identity == output {
                    log::debug!("not merging {} into itself", path.display());
                    continue;
                }
                if !seen.contains(&identity) {
                    seen.push(identity);
                    sources.push(path);
                }
            }
        }
        if sources.is_empty() {
            return Err(RzError::configuration("merge job has no sources"));
        }
        Ok(sources)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_document::<MergeJobDocument>(path.as_ref())?.validate()
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str::<MergeJobDocument>(raw)?.validate()
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str::<MergeJobDocument>(raw)?.validate()
    }
}

// Job files are read into these document shapes first. Values the shapes
// accept but the job types do not are configuration errors, reported after
// the document itself parsed.

/// Row count as written in a job file: `1000`, `1000.0` or `"1000"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBudget {
    Count(i64),
    Number(f64),
    Text(String),
}

impl RawBudget {
    fn validate(self) -> Result<RzRowBudget> {
        match self {
            RawBudget::Count(count) => RzRowBudget::from_count(count),
            RawBudget::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                RzRowBudget::from_count(number as i64)
            }
            RawBudget::Number(number) => Err(RzError::configuration(format!(
                "row count must be a whole number, got {}",
                number
            ))),
            RawBudget::Text(text) => text.parse(),
        }
    }
}

fn parse_delimiter(raw: Option<String>) -> Result<RzDelimiter> {
    raw.map_or_else(|| Ok(RzDelimiter::default()), |raw| raw.parse())
}

#[derive(Deserialize)]
struct SourceDocument {
    path: PathBuf,
    #[serde(default = "default_true")]
    has_headers: bool,
    #[serde(default)]
    delimiter: Option<String>,
    #[serde(default)]
    filters: Vec<String>,
}

impl SourceDocument {
    fn validate(self) -> Result<RzSourceSettings> {
        let delimiter = parse_delimiter(self.delimiter).map_err(|err| {
            RzError::configuration(format!("source '{}': {}", self.path.display(), err))
        })?;
        Ok(RzSourceSettings {
            path: self.path,
            has_headers: self.has_headers,
            delimiter,
            filters: self.filters,
        })
    }
}

#[derive(Deserialize)]
struct SplitJobDocument {
    rows_per_partition: RawBudget,
    #[serde(default = "default_true")]
    add_headers: bool,
    #[serde(default)]
    output_dir: Option<PathBuf>,
    sources: Vec<SourceDocument>,
}

impl SplitJobDocument {
    fn validate(self) -> Result<RzSplitJob> {
        Ok(RzSplitJob {
            rows_per_partition: self.rows_per_partition.validate()?,
            add_headers: self.add_headers,
            output_dir: self.output_dir,
            sources: self
                .sources
                .into_iter()
                .map(SourceDocument::validate)
                .collect::<Result<_>>()?,
        })
    }
}

#[derive(Deserialize)]
struct MergeJobDocument {
    output: PathBuf,
    #[serde(default)]
    reference: RzReferenceHeader,
    #[serde(default)]
    delimiter: Option<String>,
    #[serde(default)]
    sources: Vec<PathBuf>,
    #[serde(default)]
    directory: Option<PathBuf>,
}

impl MergeJobDocument {
    fn validate(self) -> Result<RzMergeJob> {
        Ok(RzMergeJob {
            output: self.output,
            reference: self.reference,
            delimiter: parse_delimiter(self.delimiter)?,
            sources: self.sources,
            directory: self.directory,
        })
    }
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    match extension_of(path).as_str() {
        "json" => Ok(serde_json::from_str(&content)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        other => Err(RzError::configuration(format!(
            "unsupported job file extension '{}', expected json, yaml or yml",
            other
        ))),
    }
}
