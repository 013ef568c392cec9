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

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{RzSourceSettings, RzSplitJob};
use crate::errors::{Result, RzError};
use crate::export::writer::{is_partition_of, RzCsvPartitionSink};
use crate::ingest::reader::{RzDefaultOpener, RzSourceOpener};
use crate::operators::filter::RzRowFilter;
use crate::operators::split::{RzChunkWriter, RzPartitionObserver, RzSplitReport};
use crate::query::parser::RzFilterBuilder;

/// Result of splitting one source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RzFileOutcome {
    pub path: PathBuf,
    pub result: std::result::Result<RzSplitReport, RzError>,
}

impl RzFileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn report(&self) -> Option<&RzSplitReport> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&RzError> {
        self.result.as_ref().err()
    }
}

/// Source whose filters compiled against its columns.
struct RzPreparedSource<'j> {
    settings: &'j RzSourceSettings,
    filter: RzRowFilter,
}

/// Sequential split run over every source of a job.
///
/// Sources are prepared first: columns are probed and filter lines compiled.
/// A bad filter line aborts the run before any partition is written. A source
/// that cannot be read fails on its own and the run moves on to the next one.
pub struct RzSplitPipeline<O: RzSourceOpener = RzDefaultOpener> {
    job: RzSplitJob,
    opener: O,
}

impl RzSplitPipeline<RzDefaultOpener> {
    pub fn new(job: RzSplitJob) -> Self {
        Self {
            job,
            opener: RzDefaultOpener::new(),
        }
    }
}

impl<O: RzSourceOpener> RzSplitPipeline<O> {
    pub fn with_opener(job: RzSplitJob, opener: O) -> Self {
        Self { job, opener }
    }

    pub fn job(&self) -> &RzSplitJob {
        &self.job
    }

    /// Splits every source in order, one outcome per source.
    pub fn run<B>(&self, observer: &mut B) -> Result<Vec<RzFileOutcome>>
    where
        B: RzPartitionObserver + ?Sized,
    {
        let prepared = self.prepare()?;

        if let Some(dir) = &self.job.output_dir {
            fs::create_dir_all(dir)?;
        }
        log::info!(
            "splitting {} sources, {} rows per partition",
            prepared.len(),
            self.job.rows_per_partition
        );

        let mut outcomes = Vec::with_capacity(prepared.len());
        for (path, source) in prepared {
            let result = source.and_then(|source| self.split_source(&source, observer));
            if let Err(err) = &result {
                log::warn!("failed to split {}: {}", path.display(), err);
            }
            outcomes.push(RzFileOutcome { path, result });
        }

        let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
        log::info!("split finished: {} sources, {} failed", outcomes.len(), failed);
        Ok(outcomes)
    }

    fn prepare(&self) -> Result<Vec<(PathBuf, Result<RzPreparedSource<'_>>)>> {
        if self.job.sources.is_empty() {
            return Err(RzError::configuration("split job has no sources"));
        }
        self.check_partition_targets()?;

        let mut prepared = Vec::with_capacity(self.job.sources.len());
        for settings in &self.job.sources {
            let source = match self.prepare_source(settings) {
                Err(err) if err.is_configuration() => return Err(err),
                other => other,
            };
            prepared.push((settings.path.clone(), source));
        }
        Ok(prepared)
    }

    /// Rejects a job in which some partition would replace one of its sources.
    fn check_partition_targets(&self) -> Result<()> {
        let output_dir = self.job.output_dir.as_deref();
        for target in &self.job.sources {
            let owner = self
                .job
                .sources
                .iter()
                .find(|source| is_partition_of(&source.path, output_dir, &target.path));
            if let Some(owner) = owner {
                return Err(RzError::configuration(format!(
                    "source '{}' would be overwritten by a partition of '{}'",
                    target.path.display(),
                    owner.path.display()
                )));
            }
        }
        Ok(())
    }

    fn prepare_source<'j>(&self, settings: &'j RzSourceSettings) -> Result<RzPreparedSource<'j>> {
        let columns = self.opener.columns(
            &settings.path,
            settings.delimiter.as_byte(),
            settings.has_headers,
        )?;

        let mut builder = RzFilterBuilder::new(columns);
        builder
            .add_queries(&settings.filters)
            .map_err(|err| in_source(&settings.path, err))?;
        let columns = builder.columns().clone();
        let filter = RzRowFilter::new(columns, &builder.build())?;

        Ok(RzPreparedSource { settings, filter })
    }

    fn split_source<B>(&self, source: &RzPreparedSource<'_>, observer: &mut B) -> Result<RzSplitReport>
    where
        B: RzPartitionObserver + ?Sized,
    {
        let settings = source.settings;
        let delimiter = settings.delimiter.as_byte();
        let rows = self.opener.open(&settings.path, delimiter)?;
        let mut sink =
            RzCsvPartitionSink::new(&settings.path, self.job.output_dir.clone(), delimiter);

        let writer = RzChunkWriter::new(self.job.split_config(), &source.filter);
        let report = writer.run(rows, &mut sink, observer)?;
        log::info!(
            "{}: {} of {} rows kept in {} partitions",
            settings.path.display(),
            report.rows_accepted,
            report.rows_read,
            report.partitions.len()
        );
        Ok(report)
    }
}

/// Names the source a configuration error belongs to.
fn in_source(path: &Path, err: RzError) -> RzError {
    match err {
        RzError::Configuration { message } => {
            RzError::configuration(format!("{}: {}", path.display(), message))
        }
        other => other,
    }
}
