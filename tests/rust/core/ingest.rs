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

//! # Razbi Core Tests - Ingest
//!
//! Tests for format detection, row streams, header probing and directory
//! scans.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test ingest
//! ```

use std::fs;
use std::path::Path;

use razbi::{
    scan_directory, RzColumns, RzDefaultOpener, RzRow, RzRowStream, RzSourceOpener,
};
use tempfile::TempDir;

/// Tests that rows stream in order with uneven lengths allowed.
#[test]
fn test_rows_stream_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.csv");
    fs::write(&path, "id;name\n1;x\n2\n").unwrap();

    let rows: Vec<RzRow> = RzDefaultOpener::new()
        .open(&path, b';')
        .unwrap()
        .collect::<razbi::Result<_>>()
        .unwrap();
    assert_eq!(
        rows,
        vec![
            vec!["id".to_string(), "name".to_string()],
            vec!["1".to_string(), "x".to_string()],
            vec!["2".to_string()],
        ]
    );
}

/// Tests header probing and the declared column layout.
#[test]
fn test_columns_from_first_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.csv");
    fs::write(&path, "id;name;age\n1;x;3\n").unwrap();
    let opener = RzDefaultOpener::new();

    assert_eq!(
        opener.columns(&path, b';', true).unwrap(),
        RzColumns::named(["id", "name", "age"])
    );
    assert_eq!(
        opener.columns(&path, b';', false).unwrap(),
        RzColumns::positional(Some(3))
    );
}

/// Tests the format errors a source can raise.
#[test]
fn test_source_format_errors() {
    let dir = TempDir::new().unwrap();
    let opener = RzDefaultOpener::new();

    let empty = dir.path().join("empty.csv");
    fs::write(&empty, "").unwrap();
    assert!(opener.read_headers(&empty, b';').unwrap_err().is_source_format());
    assert!(opener.is_empty(&empty, b';'));

    let text = dir.path().join("notes.txt");
    fs::write(&text, "a;b\n").unwrap();
    assert!(opener.open(&text, b';').err().unwrap().is_source_format());

    let workbook = dir.path().join("book.xlsx");
    fs::write(&workbook, [0x50u8, 0x4b, 0x03, 0x04]).unwrap();
    assert!(opener.open(&workbook, b';').err().unwrap().is_source_format());

    let binary = dir.path().join("binary.csv");
    fs::write(&binary, [0xffu8, 0xfe, b';', 0x80, b'\n']).unwrap();
    assert!(opener.read_headers(&binary, b';').unwrap_err().is_source_format());
}

/// Tests that directory scans keep eligible, non-empty sources sorted by name.
#[test]
fn test_scan_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.csv"), "x\n").unwrap();
    fs::write(dir.path().join("a.CSV"), "x\n").unwrap();
    fs::write(dir.path().join("empty.csv"), "").unwrap();
    fs::write(dir.path().join("readme.md"), "x\n").unwrap();
    fs::create_dir(dir.path().join("nested.csv")).unwrap();

    let found = scan_directory(dir.path(), &RzDefaultOpener::new(), b';').unwrap();
    let names: Vec<String> = found
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.CSV", "b.csv"]);
}

/// Tests that any function of the right shape can open sources, such as a
/// workbook decoder supplied by the caller.
#[test]
fn test_closure_opener() {
    let opener = |path: &Path, _delimiter: u8| -> razbi::Result<RzRowStream> {
        let rows: Vec<razbi::Result<RzRow>> =
            vec![Ok(vec!["sheet".to_string()]), Ok(vec![path.display().to_string()])];
        Ok(Box::new(rows.into_iter()))
    };

    let headers = opener.read_headers(Path::new("book.xlsx"), b';').unwrap();
    assert_eq!(headers, vec!["sheet".to_string()]);
    assert!(!opener.is_empty(Path::new("book.xlsx"), b';'));
}
