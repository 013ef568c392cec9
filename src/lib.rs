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

//! # Razbi Core Library
//!
//! Razbi partitions and merges tabular files under row-count limits, with
//! optional per-column boolean filters applied while rows stream through.
//!
//! ## Module Overview
//!
//! - **errors**: [`RzError`] and the crate-wide [`Result`]
//! - **record**: rows, column identities and the declared columns of a source
//! - **query**: the filter language (tokenizer, operator registry, parser,
//!   predicate compiler)
//! - **operators**: row evaluator, chunk writer and file merger
//! - **ingest**: format detection, row streams and directory scans
//! - **export**: partition and merge output sinks
//! - **config**: split and merge jobs loaded from JSON or YAML
//! - **pipeline**: multi-source split runs with per-file outcomes
//!
//! ## Quick Start
//!
//! ```rust
//! use razbi::{RzLogObserver, RzRowBudget, RzSourceSettings, RzSplitJob, RzSplitPipeline};
//!
//! let job = RzSplitJob::new(RzRowBudget::new(1000)?)
//!     .with_source(RzSourceSettings::new("a.csv").with_filter(r#"name ~contains "y""#));
//!
//! for outcome in RzSplitPipeline::new(job).run(&mut RzLogObserver)? {
//!     println!("{}: {:?}", outcome.path.display(), outcome.result);
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, RzError>`. Configuration errors (bad row
//! budgets, unknown columns or operators, malformed filter lines) are raised
//! before any row is read; source format errors abort one file only.

#![allow(non_snake_case)]

pub mod config;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod operators;
pub mod pipeline;
pub mod query;
pub mod record;

pub use errors::{Result, RzError};
pub use record::{RzColumnKey, RzColumns, RzRow};

pub use config::{RzDelimiter, RzMergeJob, RzRowBudget, RzSourceSettings, RzSplitJob, DEFAULT_DELIMITER};
pub use query::{
    compile, tokenize, RzClause, RzColumnFilter, RzConnective, RzFilterBuilder, RzFilterElement,
    RzFilterSet, RzOperator, RzOperatorRegistry, RzOperatorSpec, RzPredicate, RzQueryParser,
    RzValue,
};
pub use operators::{
    evaluate, RzChunkWriter, RzLogObserver, RzMergeConfig, RzMergeReport, RzMergedSource,
    RzMerger, RzPartitionEvent, RzPartitionInfo, RzPartitionObserver, RzReferenceHeader,
    RzRowFilter, RzSplitConfig, RzSplitReport,
};
pub use ingest::{normalize_path, scan_directory, RzDataFormat, RzDefaultOpener, RzFormatDetector, RzRowStream, RzSourceOpener};
pub use export::{is_partition_of, partition_path, RzCsvPartitionSink, RzCsvRowWriter, RzMemoryPartitionSink, RzPartitionSink, RzRowSink};
pub use pipeline::{RzFileOutcome, RzSplitPipeline};
