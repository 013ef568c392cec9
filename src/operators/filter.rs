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

use std::collections::HashMap;

use crate::errors::{Result, RzError};
use crate::query::compiler::compile;
use crate::query::ir::{RzFilterSet, RzPredicate};
use crate::record::{RzColumnKey, RzColumns};

/// Evaluates a predicate tree, short-circuiting `and` / `or`.
pub fn evaluate<'r, F>(predicate: &RzPredicate, cell: &F) -> bool
where
    F: Fn(&RzColumnKey) -> &'r str,
{
    match predicate {
        RzPredicate::Clause(clause) => {
            clause
                .operator
                .apply(cell(&clause.column), &clause.value, &clause.literal)
        }
        RzPredicate::And(left, right) => evaluate(left, cell) && evaluate(right, cell),
        RzPredicate::Or(left, right) => evaluate(left, cell) || evaluate(right, cell),
    }
}

/// Row verdicts for one source file.
///
/// Holds the compiled predicate of every column filter in a filter set. A row
/// passes when it satisfies all of them; with no filters every row passes.
/// Built once before streaming and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RzRowFilter {
    columns: RzColumns,
    predicates: Vec<(RzColumnKey, RzPredicate)>,
}

impl RzRowFilter {
    /// Compiles `filters` against the columns of the source.
    pub fn new(columns: RzColumns, filters: &RzFilterSet) -> Result<Self> {
        let mut predicates = Vec::with_capacity(filters.len());
        for (column, filter) in filters.iter() {
            let known = match (&columns, column) {
                (RzColumns::Positional { count: Some(count) }, RzColumnKey::Index(idx)) => idx < count,
                _ => columns.position(column).is_some(),
            };
            if !known {
                return Err(RzError::configuration(format!(
                    "filter references column '{}' which the source does not declare",
                    column
                )));
            }
            predicates.push((column.clone(), compile(filter)?));
        }
        Ok(Self { columns, predicates })
    }

    /// A filter that accepts every row.
    pub fn accept_all(columns: RzColumns) -> Self {
        Self {
            columns,
            predicates: Vec::new(),
        }
    }

    pub fn columns(&self) -> &RzColumns {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Judges a row given in source order.
    pub fn passes(&self, row: &[String]) -> bool {
        let cell = |key: &RzColumnKey| self.columns.cell(row, key);
        self.predicates
            .iter()
            .all(|(_, predicate)| evaluate(predicate, &cell))
    }

    /// Judges a row already bound to column identities. Absent columns read
    /// as empty cells.
    pub fn passes_bound(&self, row: &HashMap<RzColumnKey, String>) -> bool {
        let cell = |key: &RzColumnKey| row.get(key).map(String::as_str).unwrap_or("");
        self.predicates
            .iter()
            .all(|(_, predicate)| evaluate(predicate, &cell))
    }
}
