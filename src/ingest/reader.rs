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

//! # Row Reader Module
//!
//! Row streams over source files.
//!
//! A row stream is any iterator of `Result<RzRow>`. Opening a source hands out
//! a boxed stream that owns its file handle, so the handle is released when
//! the stream is dropped, on success or error alike.
//!
//! [`RzSourceOpener`] is the seam for formats Razbi does not decode itself:
//! the default opener reads delimited text with the `csv` crate and rejects
//! workbooks, while any `Fn(&Path, u8) -> Result<RzRowStream>` can stand in
//! for it.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecordsIntoIter};

use crate::errors::{Result, RzError};
use crate::ingest::format::{RzDataFormat, RzFormatDetector};
use crate::record::{RzColumns, RzRow};

/// Boxed row stream that owns the underlying source handle.
pub type RzRowStream = Box<dyn Iterator<Item = Result<RzRow>>>;

/// Streams the records of a delimited text file.
///
/// Records may differ in length; no row is treated as a header here.
pub struct RzCsvRowReader {
    path: PathBuf,
    records: StringRecordsIntoIter<File>,
}

impl RzCsvRowReader {
    pub fn open(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|err| classify(path, err))?;

        Ok(Self {
            path: path.to_path_buf(),
            records: reader.into_records(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for RzCsvRowReader {
    type Item = Result<RzRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.records.next()?;
        Some(
            next.map(|record| record.iter().map(str::to_string).collect())
                .map_err(|err| classify(&self.path, err)),
        )
    }
}

fn classify(path: &Path, err: csv::Error) -> RzError {
    match err.kind() {
        csv::ErrorKind::Io(_) => RzError::Io(format!("{}: {}", path.display(), err)),
        csv::ErrorKind::Utf8 { .. } => {
            RzError::source_format(path, format!("not valid UTF-8 text: {}", err))
        }
        _ => RzError::source_format(path, err.to_string()),
    }
}

/// Opens row streams for source files.
pub trait RzSourceOpener {
    fn open(&self, path: &Path, delimiter: u8) -> Result<RzRowStream>;

    /// First row of the source, read as its header.
    fn read_headers(&self, path: &Path, delimiter: u8) -> Result<RzRow> {
        let mut rows = self.open(path, delimiter)?;
        match rows.next() {
            Some(row) => row,
            None => Err(RzError::source_format(path, "source is empty")),
        }
    }

    /// Column layout of the source. Without headers, the width of the first
    /// row bounds positional references.
    fn columns(&self, path: &Path, delimiter: u8, has_headers: bool) -> Result<RzColumns> {
        let first = self.read_headers(path, delimiter)?;
        if has_headers {
            Ok(RzColumns::Named(first))
        } else {
            Ok(RzColumns::positional(Some(first.len())))
        }
    }

    /// True when the source holds no row or cannot be decoded.
    fn is_empty(&self, path: &Path, delimiter: u8) -> bool {
        self.read_headers(path, delimiter).is_err()
    }
}

impl<F> RzSourceOpener for F
where
    F: Fn(&Path, u8) -> Result<RzRowStream>,
{
    fn open(&self, path: &Path, delimiter: u8) -> Result<RzRowStream> {
        self(path, delimiter)
    }
}

/// Opener for delimited text. Workbooks need a decoder supplied by the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct RzDefaultOpener {
    detector: RzFormatDetector,
}

impl RzDefaultOpener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RzSourceOpener for RzDefaultOpener {
    fn open(&self, path: &Path, delimiter: u8) -> Result<RzRowStream> {
        match self.detector.detect(path)? {
            RzDataFormat::Delimited => Ok(Box::new(RzCsvRowReader::open(path, delimiter)?)),
            RzDataFormat::Workbook => Err(RzError::source_format(
                path,
                "workbook sources need a workbook-capable opener",
            )),
        }
    }
}

/// Absolute, symlink-free form of `path` for comparing file identities.
///
/// A file that does not exist yet resolves through its directory. When the
/// directory cannot be resolved either, the path is returned as given.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Lists the sources in `dir` that can be processed, sorted by file name.
///
/// Files with an unsupported extension, empty files and files the opener
/// cannot read are skipped.
pub fn scan_directory<O>(dir: &Path, opener: &O, delimiter: u8) -> Result<Vec<PathBuf>>
where
    O: RzSourceOpener + ?Sized,
{
    let detector = RzFormatDetector::new();
    let mut sources = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if !detector.is_supported(&path) {
            log::debug!("ignoring {}: unsupported extension", path.display());
            continue;
        }
        if opener.is_empty(&path, delimiter) {
            log::warn!("skipping {}: empty or unreadable", path.display());
            continue;
        }
        sources.push(path);
    }

    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(sources)
}
