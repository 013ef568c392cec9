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

//! # Razbi Query Tests - Row Evaluator
//!
//! Tests for operator semantics, predicate precedence and per-row verdicts.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test evaluator
//! ```

use std::collections::HashMap;

use razbi::{
    compile, evaluate, RzColumnKey, RzColumns, RzFilterBuilder, RzOperator, RzPredicate,
    RzQueryParser, RzRowFilter, RzValue,
};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

fn row_filter(columns: RzColumns, queries: &[&str]) -> RzRowFilter {
    let mut builder = RzFilterBuilder::new(columns.clone());
    builder.add_queries(queries).unwrap();
    RzRowFilter::new(columns, &builder.build()).unwrap()
}

/// Tests that `contains` ignores case.
#[test]
fn test_contains_ignores_case() {
    assert!(RzOperator::Contains.apply("Hello World", &RzValue::parse("world"), "world"));
    assert!(!RzOperator::NotContains.apply("Hello World", &RzValue::parse("WORLD"), "WORLD"));
}

/// Tests numeric and textual ordering of relational operators.
#[test]
fn test_relational_coercion() {
    assert!(RzOperator::Greater.apply("10", &RzValue::parse("9"), "9"));
    assert!(!RzOperator::Greater.apply("10", &RzValue::Text("9".into()), "9"));
}

/// Tests the text fallback when the cell is not a number.
#[test]
fn test_non_numeric_cell_falls_back_to_text() {
    assert!(RzOperator::Greater.apply("n/a", &RzValue::parse("5"), "5"));
    assert!(RzOperator::Equal.apply("Paris", &RzValue::parse("paris"), "paris"));
}

/// Tests that `and` binds tighter than `or`.
#[test]
fn test_and_over_or_precedence() {
    let columns = RzColumns::named(["v"]);
    let parser = RzQueryParser::new(&columns);
    // a or (b and c)
    let filter = parser.parse("v = a or = b and = c").unwrap();
    let predicate = compile(&filter).unwrap();
    assert!(matches!(predicate, RzPredicate::Or(_, _)));

    let judge = |value: &str| {
        let cells = row(&[value]);
        evaluate(&predicate, &|key: &RzColumnKey| columns.cell(&cells, key))
    };
    assert!(judge("a"));
    assert!(!judge("b"));
    assert!(!judge("c"));
}

/// Tests numeric ranges chained with `and`.
#[test]
fn test_numeric_range() {
    let filter = row_filter(RzColumns::named(["age"]), &["age > 10 and < 20"]);
    assert!(filter.passes(&row(&["15"])));
    assert!(!filter.passes(&row(&["20"])));
    assert!(!filter.passes(&row(&["9.5"])));
}

/// Tests that a row must satisfy the filter of every column.
#[test]
fn test_and_across_columns() {
    let filter = row_filter(
        RzColumns::named(["id", "name"]),
        &["id > 1", r#"name ~contains "y""#],
    );
    assert!(filter.passes(&row(&["3", "z"])));
    assert!(!filter.passes(&row(&["1", "z"])));
    assert!(!filter.passes(&row(&["3", "yes"])));
}

/// Tests that a short row reads missing cells as empty.
#[test]
fn test_short_row_binds_empty() {
    let filter = row_filter(RzColumns::named(["id", "name"]), &["name ~contains x"]);
    assert!(filter.passes(&row(&["1"])));

    let filter = row_filter(RzColumns::named(["id", "name"]), &["name contains x"]);
    assert!(!filter.passes(&row(&["1"])));
}

/// Tests positional filters on header-less sources.
#[test]
fn test_positional_filter() {
    let filter = row_filter(RzColumns::positional(Some(2)), &["2 = b"]);
    assert!(filter.passes(&row(&["a", "B"])));
    assert!(!filter.passes(&row(&["b", "a"])));
}

/// Tests judging rows already bound to column identities.
#[test]
fn test_bound_rows() {
    let filter = row_filter(RzColumns::named(["id", "name"]), &["name = x"]);
    let mut bound = HashMap::new();
    bound.insert(RzColumnKey::Name("name".into()), "X".to_string());
    assert!(filter.passes_bound(&bound));
    assert!(!filter.passes_bound(&HashMap::new()));
}
