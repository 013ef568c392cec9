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

//! # File Merger
//!
//! Concatenates several sources into one delimited text file aligned on a
//! reference header.
//!
//! A source whose first row is a header is mapped by column name: reference
//! columns it lacks come out empty and columns the reference lacks are
//! dropped. A source without a header is mapped by position, each row padded
//! or cut to the reference width. Without a reference header rows are copied
//! unchanged.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RzError};
use crate::export::writer::{RzCsvRowWriter, RzRowSink};
use crate::ingest::format::{extension_of, OUTPUT_EXTENSION};
use crate::ingest::reader::{normalize_path, RzSourceOpener};
use crate::record::RzRow;

/// Where the merged output's header comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RzReferenceHeader {
    /// Every source starts with a header; the first source's is the reference.
    FromEverySource,
    /// The header of this one source is the reference. Only that source's
    /// first row is read as a header.
    FromSource(PathBuf),
    /// A caller-supplied header.
    Explicit {
        columns: Vec<String>,
        #[serde(default)]
        sources_have_headers: bool,
    },
    /// No header at all; rows pass through unchanged.
    None,
}

impl Default for RzReferenceHeader {
    fn default() -> Self {
        Self::FromEverySource
    }
}

impl RzReferenceHeader {
    /// True when the first row of `source` is a header to map by.
    pub fn source_has_header(&self, source: &Path) -> bool {
        match self {
            RzReferenceHeader::FromEverySource => true,
            RzReferenceHeader::FromSource(path) => {
                path == source || normalize_path(path) == normalize_path(source)
            }
            RzReferenceHeader::Explicit {
                sources_have_headers,
                ..
            } => *sources_have_headers,
            RzReferenceHeader::None => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RzMergeConfig {
    pub output: PathBuf,
    #[serde(default)]
    pub reference: RzReferenceHeader,
    pub delimiter: u8,
}

impl RzMergeConfig {
    pub fn new(output: impl Into<PathBuf>, reference: RzReferenceHeader) -> Self {
        Self {
            output: output.into(),
            reference,
            delimiter: crate::config::DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Rows contributed by one source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RzMergedSource {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RzMergeReport {
    pub reference: Option<RzRow>,
    pub sources: Vec<RzMergedSource>,
    /// Data rows written, reference header excluded.
    pub rows_written: usize,
}

/// How the rows of one source are laid onto the reference header.
#[derive(Clone, Debug, PartialEq, Eq)]
enum RzColumnMapping {
    PassThrough,
    Positional(usize),
    /// Source position feeding each reference column.
    ByName(Vec<Option<usize>>),
}

impl RzColumnMapping {
    fn by_name(reference: &[String], source_header: &[String]) -> Self {
        // A name repeated in the source header maps to its last occurrence.
        RzColumnMapping::ByName(
            reference
                .iter()
                .map(|column| source_header.iter().rposition(|name| name == column))
                .collect(),
        )
    }

    fn apply(&self, mut row: RzRow) -> RzRow {
        match self {
            RzColumnMapping::PassThrough => row,
            RzColumnMapping::Positional(width) => {
                row.resize(*width, String::new());
                row
            }
            RzColumnMapping::ByName(sources) => sources
                .iter()
                .map(|idx| idx.and_then(|i| row.get(i)).cloned().unwrap_or_default())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RzMerger {
    config: RzMergeConfig,
}

impl RzMerger {
    /// Fails when the output does not carry the delimited-text extension.
    pub fn new(config: RzMergeConfig) -> Result<Self> {
        let extension = extension_of(&config.output);
        if extension != OUTPUT_EXTENSION {
            return Err(RzError::configuration(format!(
                "merge output '{}' must have the .{} extension",
                config.output.display(),
                OUTPUT_EXTENSION
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &RzMergeConfig {
        &self.config
    }

    /// Resolves the reference header for `sources`.
    pub fn reference_header<O>(&self, sources: &[PathBuf], opener: &O) -> Result<Option<RzRow>>
    where
        O: RzSourceOpener + ?Sized,
    {
        let delimiter = self.config.delimiter;
        match &self.config.reference {
            RzReferenceHeader::FromEverySource => {
                let first = sources
                    .first()
                    .ok_or_else(|| RzError::configuration("no sources to merge"))?;
                opener.read_headers(first, delimiter).map(Some)
            }
            RzReferenceHeader::FromSource(path) => opener.read_headers(path, delimiter).map(Some),
            RzReferenceHeader::Explicit { columns, .. } if columns.is_empty() => {
                Err(RzError::configuration("explicit reference header is empty"))
            }
            RzReferenceHeader::Explicit { columns, .. } => Ok(Some(columns.clone())),
            RzReferenceHeader::None => Ok(None),
        }
    }

    /// Merges `sources` into the configured output file.
    pub fn run<O>(&self, sources: &[PathBuf], opener: &O) -> Result<RzMergeReport>
    where
        O: RzSourceOpener + ?Sized,
    {
        if sources.is_empty() {
            return Err(RzError::configuration("no sources to merge"));
        }
        let output = normalize_path(&self.config.output);
        if let Some(source) = sources.iter().find(|source| normalize_path(source) == output) {
            return Err(RzError::configuration(format!(
                "merge output '{}' is also listed as source '{}'",
                self.config.output.display(),
                source.display()
            )));
        }
        let reference = self.reference_header(sources, opener)?;

        let mut writer = RzCsvRowWriter::create(&self.config.output, self.config.delimiter)?;
        let report = self.merge_with_reference(reference, sources, opener, &mut writer)?;
        let output = writer.finish()?;
        log::info!(
            "merged {} sources into {} ({} rows)",
            report.sources.len(),
            output.display(),
            report.rows_written
        );
        Ok(report)
    }

    /// Merges `sources` into any row sink.
    pub fn merge_into<O, S>(&self, sources: &[PathBuf], opener: &O, sink: &mut S) -> Result<RzMergeReport>
    where
        O: RzSourceOpener + ?Sized,
        S: RzRowSink + ?Sized,
    {
        let reference = self.reference_header(sources, opener)?;
        self.merge_with_reference(reference, sources, opener, sink)
    }

    fn merge_with_reference<O, S>(
        &self,
        reference: Option<RzRow>,
        sources: &[PathBuf],
        opener: &O,
        sink: &mut S,
    ) -> Result<RzMergeReport>
    where
        O: RzSourceOpener + ?Sized,
        S: RzRowSink + ?Sized,
    {
        if let Some(header) = &reference {
            sink.write_row(header)?;
        }

        let mut report = RzMergeReport {
            reference,
            ..RzMergeReport::default()
        };

        for source in sources {
            let mut rows = opener.open(source, self.config.delimiter)?;
            let mapping = match &report.reference {
                None => RzColumnMapping::PassThrough,
                Some(header) if self.config.reference.source_has_header(source) => {
                    match rows.next() {
                        Some(first) => RzColumnMapping::by_name(header, &first?),
                        None => {
                            log::warn!("{} is empty, nothing to merge", source.display());
                            report.sources.push(RzMergedSource {
                                path: source.clone(),
                                rows: 0,
                            });
                            continue;
                        }
                    }
                }
                Some(header) => RzColumnMapping::Positional(header.len()),
            };

            let mut written = 0;
            for row in rows {
                sink.write_row(&mapping.apply(row?))?;
                written += 1;
            }
            log::info!("merged {} rows from {}", written, source.display());

            report.rows_written += written;
            report.sources.push(RzMergedSource {
                path: source.clone(),
                rows: written,
            });
        }

        Ok(report)
    }
}
