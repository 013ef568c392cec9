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

//! # Razbi Core Tests - Pipeline
//!
//! End-to-end split runs over files on disk.
//!
//! ## Test Categories
//!
//! - **Partition Output Tests**: exact file names and contents
//! - **Failure Tests**: configuration errors abort, format errors stay local
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test pipeline
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use razbi::{
    RzLogObserver, RzPartitionEvent, RzRowBudget, RzSourceSettings, RzSplitJob, RzSplitPipeline,
};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn budget(rows: usize) -> RzRowBudget {
    RzRowBudget::new(rows).unwrap()
}

/// Tests the id/name scenario end to end: one partition holding the header
/// and the two rows without a "y".
#[test]
fn test_split_with_filter_end_to_end() {
    let dir = TempDir::new().unwrap();
    let source = write(dir.path(), "a.csv", "id;name\n1;x\n2;y\n3;z\n");

    let job = RzSplitJob::new(budget(2))
        .with_source(RzSourceSettings::new(&source).with_filter(r#"name ~contains "y""#));
    let outcomes = RzSplitPipeline::new(job).run(&mut RzLogObserver).unwrap();

    assert_eq!(outcomes.len(), 1);
    let report = outcomes[0].report().unwrap();
    assert_eq!(report.rows_accepted, 2);
    assert_eq!(report.rows_rejected, 1);
    assert_eq!(report.partitions.len(), 1);

    let partition = dir.path().join("a_1.csv");
    assert_eq!(report.partitions[0].path.as_deref(), Some(partition.as_path()));
    assert_eq!(fs::read_to_string(&partition).unwrap(), "id;name\n1;x\n3;z\n");
    assert!(!dir.path().join("a_2.csv").exists());
}

/// Tests partition naming and the output directory.
#[test]
fn test_partitions_written_to_output_dir() {
    let dir = TempDir::new().unwrap();
    let source = write(dir.path(), "data.csv", "1\n2\n3\n");
    let out = dir.path().join("out");

    let mut job = RzSplitJob::new(budget(2))
        .with_source(RzSourceSettings::new(&source).with_headers(false));
    job.output_dir = Some(out.clone());

    let mut events = Vec::new();
    let outcomes = RzSplitPipeline::new(job)
        .run(&mut |event: &RzPartitionEvent| events.push(event.clone()))
        .unwrap();

    assert!(outcomes[0].is_ok());
    assert_eq!(fs::read_to_string(out.join("data_1.csv")).unwrap(), "1\n2\n");
    assert_eq!(fs::read_to_string(out.join("data_2.csv")).unwrap(), "3\n");
    assert_eq!(events.len(), 4);
}

/// Tests that headers are left out when re-injection is off.
#[test]
fn test_split_without_headers() {
    let dir = TempDir::new().unwrap();
    let source = write(dir.path(), "a.csv", "id;name\n1;x\n2;y\n");

    let mut job = RzSplitJob::new(budget(1)).with_source(RzSourceSettings::new(&source));
    job.add_headers = false;
    RzSplitPipeline::new(job).run(&mut RzLogObserver).unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("a_1.csv")).unwrap(), "1;x\n");
    assert_eq!(fs::read_to_string(dir.path().join("a_2.csv")).unwrap(), "2;y\n");
}

/// Tests that a bad filter aborts the run before any partition exists.
#[test]
fn test_configuration_error_aborts_run() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "good.csv", "id\n1\n");
    let bad = write(dir.path(), "bad.csv", "id\n1\n");

    let job = RzSplitJob::new(budget(10))
        .with_source(RzSourceSettings::new(&good))
        .with_source(RzSourceSettings::new(&bad).with_filter("id >= 1"));
    let err = RzSplitPipeline::new(job).run(&mut RzLogObserver).unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("bad.csv"));
    assert!(!dir.path().join("good_1.csv").exists());
}

/// Tests that an unreadable source fails alone while the others are split.
#[test]
fn test_format_error_is_per_file() {
    let dir = TempDir::new().unwrap();
    let empty = write(dir.path(), "empty.csv", "");
    let good = write(dir.path(), "good.csv", "id\n1\n");

    let job = RzSplitJob::new(budget(10))
        .with_source(RzSourceSettings::new(&empty))
        .with_source(RzSourceSettings::new(&good));
    let outcomes = RzSplitPipeline::new(job).run(&mut RzLogObserver).unwrap();

    assert!(outcomes[0].error().unwrap().is_source_format());
    assert!(outcomes[1].is_ok());
    assert!(dir.path().join("good_1.csv").exists());

    let json = serde_json::to_string(&outcomes).unwrap();
    assert!(json.contains("SourceFormat"));
}

/// Tests that a job whose partitions would replace another of its sources is
/// refused before anything is written.
#[test]
fn test_source_named_like_partition_rejected() {
    let dir = TempDir::new().unwrap();
    let a = write(dir.path(), "a.csv", "id\n1\n2\n3\n");
    let a_1 = write(dir.path(), "a_1.csv", "id\n9\n");

    let job = RzSplitJob::new(budget(2))
        .with_source(RzSourceSettings::new(&a))
        .with_source(RzSourceSettings::new(&a_1));
    let err = RzSplitPipeline::new(job).run(&mut RzLogObserver).unwrap_err();
    assert!(err.is_configuration(), "{:?}", err);
    assert_eq!(fs::read_to_string(&a_1).unwrap(), "id\n9\n");
    assert!(!dir.path().join("a_2.csv").exists());

    // Partitions land elsewhere, so both sources are safe.
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let mut job = RzSplitJob::new(budget(2))
        .with_source(RzSourceSettings::new(&a))
        .with_source(RzSourceSettings::new(&a_1));
    job.output_dir = Some(out.clone());
    let outcomes = RzSplitPipeline::new(job).run(&mut RzLogObserver).unwrap();
    assert!(outcomes.iter().all(|outcome| outcome.is_ok()));
    assert_eq!(fs::read_to_string(out.join("a_1.csv")).unwrap(), "id\n1\n2\n");
    assert_eq!(fs::read_to_string(&a_1).unwrap(), "id\n9\n");
}
