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

//! # Razbi Core Tests - Configuration
//!
//! Tests for loading split and merge jobs from YAML and JSON.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test config
//! ```

use std::fs;
use std::path::PathBuf;

use razbi::{RzDefaultOpener, RzError, RzMergeJob, RzReferenceHeader, RzSplitJob};
use tempfile::TempDir;

/// Tests a YAML split job with defaults filled in.
#[test]
fn test_split_job_from_yaml() {
    let job = RzSplitJob::from_yaml_str(
        r#"
rows_per_partition: "250"
sources:
  - path: a.csv
    filters:
      - 'name ~contains "y"'
  - path: b.csv
    has_headers: false
    delimiter: ","
"#,
    )
    .unwrap();

    assert_eq!(job.rows_per_partition.get(), 250);
    assert!(job.add_headers);
    assert_eq!(job.output_dir, None);
    assert_eq!(job.sources.len(), 2);
    assert!(job.sources[0].has_headers);
    assert_eq!(job.sources[0].delimiter.as_byte(), b';');
    assert_eq!(job.sources[0].filters, vec![r#"name ~contains "y""#.to_string()]);
    assert!(!job.sources[1].has_headers);
    assert_eq!(job.sources[1].delimiter.as_byte(), b',');
}

/// Tests that invalid budgets and delimiters are configuration errors.
#[test]
fn test_invalid_values_rejected() {
    for budget in ["0", "-5", "\"ten\"", "2.5"] {
        let raw = format!(r#"{{"rows_per_partition": {}, "sources": []}}"#, budget);
        let err = RzSplitJob::from_json_str(&raw).unwrap_err();
        assert!(err.is_configuration(), "budget {} gave {:?}", budget, err);
    }
    let err = RzSplitJob::from_yaml_str("rows_per_partition: 0
sources: []
").unwrap_err();
    assert!(err.is_configuration(), "{:?}", err);

    let raw = r#"{"rows_per_partition": 10, "sources": [{"path": "a.csv", "delimiter": ";;"}]}"#;
    assert!(RzSplitJob::from_json_str(raw).unwrap_err().is_configuration());

    let err = RzMergeJob::from_yaml_str("output: all.csv\ndelimiter: ab\n").unwrap_err();
    assert!(err.is_configuration(), "{:?}", err);
}

/// Tests that a document that does not parse stays a serialization error.
#[test]
fn test_malformed_document_is_serde_error() {
    let err = RzSplitJob::from_json_str(r#"{"rows_per_partition": 10"#).unwrap_err();
    assert!(matches!(err, RzError::Serde(_)), "{:?}", err);

    let err = RzSplitJob::from_json_str(r#"{"sources": []}"#).unwrap_err();
    assert!(matches!(err, RzError::Serde(_)), "{:?}", err);
}

/// Tests that a whole number written as a float is accepted.
#[test]
fn test_whole_float_budget() {
    let job = RzSplitJob::from_json_str(r#"{"rows_per_partition": 40.0, "sources": []}"#).unwrap();
    assert_eq!(job.rows_per_partition.get(), 40);
}

/// Tests loading by file extension.
#[test]
fn test_load_by_extension() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("job.json");
    fs::write(&json, r#"{"rows_per_partition": 3, "add_headers": false, "sources": [{"path": "a.csv"}]}"#).unwrap();
    let job = RzSplitJob::load(&json).unwrap();
    assert!(!job.add_headers);
    assert_eq!(job.split_config().rows_per_partition.get(), 3);

    let toml = dir.path().join("job.toml");
    fs::write(&toml, "rows_per_partition = 3").unwrap();
    assert!(RzSplitJob::load(&toml).unwrap_err().is_configuration());
}

/// Tests the reference header spellings of a merge job.
#[test]
fn test_merge_job_reference_modes() {
    let job = RzMergeJob::from_yaml_str("output: all.csv\nsources: [a.csv]\n").unwrap();
    assert_eq!(job.reference, RzReferenceHeader::FromEverySource);

    let job = RzMergeJob::from_yaml_str(
        "output: all.csv\nreference: !from_source a.csv\nsources: [a.csv, b.csv]\n",
    )
    .unwrap();
    assert_eq!(job.reference, RzReferenceHeader::FromSource(PathBuf::from("a.csv")));

    let job = RzMergeJob::from_json_str(
        r#"{"output": "all.csv", "reference": {"explicit": {"columns": ["id"]}}, "sources": ["a.csv"]}"#,
    )
    .unwrap();
    assert_eq!(
        job.reference,
        RzReferenceHeader::Explicit {
            columns: vec!["id".into()],
            sources_have_headers: false
        }
    );

    let job = RzMergeJob::from_json_str(r#"{"output": "all.csv", "reference": "none"}"#).unwrap();
    assert_eq!(job.reference, RzReferenceHeader::None);
    assert_eq!(job.merge_config().delimiter, b';');
}

/// Tests that a merge job adds scanned sources after the listed ones.
#[test]
fn test_merge_job_resolves_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.csv"), "id\n2\n").unwrap();
    fs::write(dir.path().join("a.csv"), "id\n1\n").unwrap();
    fs::write(dir.path().join("all.csv"), "id\n").unwrap();

    let job = RzMergeJob {
        output: dir.path().join("all.csv"),
        reference: RzReferenceHeader::FromEverySource,
        delimiter: Default::default(),
        sources: vec![dir.path().join("b.csv")],
        directory: Some(dir.path().to_path_buf()),
    };
    let sources = job.resolve_sources(&RzDefaultOpener::new()).unwrap();
    assert_eq!(sources, vec![dir.path().join("b.csv"), dir.path().join("a.csv")]);
}
