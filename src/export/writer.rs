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

//! # Data Writer Module
//!
//! Row sinks for merge output and partition sinks for split output.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};

use crate::errors::{Result, RzError};
use crate::ingest::format::OUTPUT_EXTENSION;
use crate::ingest::reader::normalize_path;
use crate::record::RzRow;

/// Anything rows can be written to, one at a time.
pub trait RzRowSink {
    fn write_row(&mut self, row: &[String]) -> Result<()>;
}

impl RzRowSink for Vec<RzRow> {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.push(row.to_vec());
        Ok(())
    }
}

/// Sink receiving a sequence of numbered partitions.
///
/// Partitions are opened and closed strictly one after another; rows are only
/// written while a partition is open.
pub trait RzPartitionSink: RzRowSink {
    /// Opens partition `ordinal` (1-based) and returns where it is stored, if
    /// it is stored on disk.
    fn open_partition(&mut self, ordinal: usize) -> Result<Option<PathBuf>>;

    /// Finalizes the open partition.
    fn close_partition(&mut self) -> Result<()>;
}

/// Delimited-text writer over one output file.
pub struct RzCsvRowWriter {
    path: PathBuf,
    writer: Writer<File>,
}

impl RzCsvRowWriter {
    pub fn create(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let writer = WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_path(path)
            .map_err(|err| RzError::Io(format!("{}: {}", path.display(), err)))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes buffered rows and closes the file.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        Ok(self.path)
    }
}

impl RzRowSink for RzCsvRowWriter {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.writer.write_record(row)?;
        Ok(())
    }
}

/// Path of partition `ordinal` for `source`: the source's file name with its
/// extension replaced by `_<ordinal>.csv`, placed in `output_dir` or next to
/// the source.
pub fn partition_path(source: &Path, output_dir: Option<&Path>, ordinal: usize) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}_{}.{}", stem, ordinal, OUTPUT_EXTENSION);
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => source.with_file_name(file_name),
    }
}

/// True when splitting `source` into `output_dir` may write `candidate`.
pub fn is_partition_of(source: &Path, output_dir: Option<&Path>, candidate: &Path) -> bool {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{}", OUTPUT_EXTENSION);
    let ordinal = candidate
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_prefix(stem.as_str()))
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(suffix.as_str()));
    let numbered = match ordinal {
        Some(digits) => digits
            .parse::<usize>()
            .map_or(false, |n| n > 0 && n.to_string() == digits),
        None => false,
    };
    if !numbered {
        return false;
    }

    let first = normalize_path(&partition_path(source, output_dir, 1));
    first.parent() == normalize_path(candidate).parent()
}

/// Writes each partition of one source to its own delimited-text file.
pub struct RzCsvPartitionSink {
    source: PathBuf,
    output_dir: Option<PathBuf>,
    delimiter: u8,
    current: Option<RzCsvRowWriter>,
}

impl RzCsvPartitionSink {
    pub fn new(source: impl Into<PathBuf>, output_dir: Option<PathBuf>, delimiter: u8) -> Self {
        Self {
            source: source.into(),
            output_dir,
            delimiter,
            current: None,
        }
    }
}

impl RzRowSink for RzCsvPartitionSink {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        match self.current.as_mut() {
            Some(writer) => writer.write_row(row),
            None => Err(RzError::internal("row written with no open partition")),
        }
    }
}

impl RzPartitionSink for RzCsvPartitionSink {
    fn open_partition(&mut self, ordinal: usize) -> Result<Option<PathBuf>> {
        if self.current.is_some() {
            self.close_partition()?;
        }
        let path = partition_path(&self.source, self.output_dir.as_deref(), ordinal);
        self.current = Some(RzCsvRowWriter::create(&path, self.delimiter)?);
        Ok(Some(path))
    }

    fn close_partition(&mut self) -> Result<()> {
        if let Some(writer) = self.current.take() {
            writer.finish()?;
        }
        Ok(())
    }
}

/// Keeps partitions in memory.
#[derive(Debug, Default, Clone)]
pub struct RzMemoryPartitionSink {
    pub partitions: Vec<Vec<RzRow>>,
    open: bool,
}

impl RzMemoryPartitionSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RzRowSink for RzMemoryPartitionSink {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        match self.partitions.last_mut() {
            Some(partition) if self.open => {
                partition.push(row.to_vec());
                Ok(())
            }
            _ => Err(RzError::internal("row written with no open partition")),
        }
    }
}

impl RzPartitionSink for RzMemoryPartitionSink {
    fn open_partition(&mut self, _ordinal: usize) -> Result<Option<PathBuf>> {
        self.partitions.push(Vec::new());
        self.open = true;
        Ok(None)
    }

    fn close_partition(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }
}
