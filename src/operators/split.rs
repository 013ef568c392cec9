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

//! # Chunk Writer
//!
//! Splits one source's row stream into partitions of at most
//! `rows_per_partition` accepted rows.
//!
//! Rows are consumed in source order. Rows identical to the declared header
//! are dropped before filtering, rows rejected by the [`RzRowFilter`] are
//! counted and skipped, and every accepted row lands in the open partition. A
//! partition is opened on the first accepted row and whenever the open one is
//! full, so no partition is ever empty and a run where nothing passes writes
//! no partition at all.
//!
//! Partition boundaries are reported twice: as [`RzPartitionEvent`]s handed to
//! an [`RzPartitionObserver`], and as [`RzPartitionInfo`] entries in the final
//! [`RzSplitReport`]. Each partition produces exactly one `Opened` and one
//! `Closed` event.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::RzRowBudget;
use crate::errors::Result;
use crate::export::writer::RzPartitionSink;
use crate::operators::filter::RzRowFilter;
use crate::record::RzRow;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RzSplitConfig {
    pub rows_per_partition: RzRowBudget,
    /// Write the source's header row at the top of every partition.
    pub add_headers: bool,
}

impl RzSplitConfig {
    pub fn new(rows_per_partition: RzRowBudget) -> Self {
        Self {
            rows_per_partition,
            add_headers: true,
        }
    }

    pub fn with_headers(mut self, add_headers: bool) -> Self {
        self.add_headers = add_headers;
        self
    }
}

/// Partition lifecycle notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RzPartitionEvent {
    Opened {
        ordinal: usize,
        path: Option<PathBuf>,
    },
    Closed {
        ordinal: usize,
        path: Option<PathBuf>,
        rows: usize,
    },
}

/// Receives partition lifecycle events while a split runs.
pub trait RzPartitionObserver {
    fn on_event(&mut self, event: &RzPartitionEvent);
}

impl<F> RzPartitionObserver for F
where
    F: FnMut(&RzPartitionEvent),
{
    fn on_event(&mut self, event: &RzPartitionEvent) {
        self(event)
    }
}

/// Observer that reports partitions through the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct RzLogObserver;

impl RzPartitionObserver for RzLogObserver {
    fn on_event(&mut self, event: &RzPartitionEvent) {
        match event {
            RzPartitionEvent::Opened { ordinal, .. } => {
                log::debug!("partition {} opened", ordinal);
            }
            RzPartitionEvent::Closed {
                ordinal,
                path: Some(path),
                rows,
            } => {
                log::info!("partition {} written: {} ({} rows)", ordinal, path.display(), rows);
            }
            RzPartitionEvent::Closed { ordinal, rows, .. } => {
                log::info!("partition {} written ({} rows)", ordinal, rows);
            }
        }
    }
}

/// One finished partition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RzPartitionInfo {
    pub ordinal: usize,
    pub path: Option<PathBuf>,
    /// Accepted rows in the partition, header excluded.
    pub rows: usize,
}

/// Counters of one split run.
///
/// `rows_read == header_rows + rows_accepted + rows_rejected` holds for every
/// completed run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RzSplitReport {
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub rows_rejected: usize,
    /// Rows identical to the declared header, the leading one included.
    pub header_rows: usize,
    pub partitions: Vec<RzPartitionInfo>,
}

/// Streams rows into size-bounded partitions.
#[derive(Debug, Clone, Copy)]
pub struct RzChunkWriter<'a> {
    config: RzSplitConfig,
    filter: &'a RzRowFilter,
}

impl<'a> RzChunkWriter<'a> {
    pub fn new(config: RzSplitConfig, filter: &'a RzRowFilter) -> Self {
        Self { config, filter }
    }

    pub fn config(&self) -> &RzSplitConfig {
        &self.config
    }

    /// Consumes `rows` and writes the accepted ones to `sink`.
    ///
    /// A stream error closes the open partition and is returned; partitions
    /// written before it stay intact.
    pub fn run<I, S, O>(&self, rows: I, sink: &mut S, observer: &mut O) -> Result<RzSplitReport>
    where
        I: IntoIterator<Item = Result<RzRow>>,
        S: RzPartitionSink + ?Sized,
        O: RzPartitionObserver + ?Sized,
    {
        let budget = self.config.rows_per_partition.get();
        let columns = self.filter.columns();
        let header = if self.config.add_headers {
            columns.headers()
        } else {
            None
        };

        let mut report = RzSplitReport::default();
        let mut current: Option<RzPartitionInfo> = None;

        for row in rows {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    if let Err(close_err) =
                        close_partition(&mut current, sink, observer, &mut report)
                    {
                        log::warn!("could not close partition after read failure: {}", close_err);
                    }
                    return Err(err);
                }
            };
            report.rows_read += 1;

            if columns.is_header_row(&row) {
                report.header_rows += 1;
                if report.rows_read > 1 {
                    log::debug!("dropping repeated header at row {}", report.rows_read);
                }
                continue;
            }
            if !self.filter.passes(&row) {
                report.rows_rejected += 1;
                continue;
            }

            let full = current.as_ref().map_or(true, |info| info.rows >= budget);
            if full {
                close_partition(&mut current, sink, observer, &mut report)?;
                let ordinal = report.partitions.len() + 1;
                let path = sink.open_partition(ordinal)?;
                observer.on_event(&RzPartitionEvent::Opened {
                    ordinal,
                    path: path.clone(),
                });
                if let Some(header) = header {
                    sink.write_row(header)?;
                }
                current = Some(RzPartitionInfo {
                    ordinal,
                    path,
                    rows: 0,
                });
            }

            sink.write_row(&row)?;
            if let Some(info) = current.as_mut() {
                info.rows += 1;
            }
            report.rows_accepted += 1;
        }

        close_partition(&mut current, sink, observer, &mut report)?;
        Ok(report)
    }
}

fn close_partition<S, O>(
    current: &mut Option<RzPartitionInfo>,
    sink: &mut S,
    observer: &mut O,
    report: &mut RzSplitReport,
) -> Result<()>
where
    S: RzPartitionSink + ?Sized,
    O: RzPartitionObserver + ?Sized,
{
    if let Some(info) = current.take() {
        sink.close_partition()?;
        observer.on_event(&RzPartitionEvent::Closed {
            ordinal: info.ordinal,
            path: info.path.clone(),
            rows: info.rows,
        });
        report.partitions.push(info);
    }
    Ok(())
}
