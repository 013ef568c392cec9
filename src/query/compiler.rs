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

use crate::errors::{Result, RzError};
use crate::query::ir::{RzColumnFilter, RzConnective, RzFilterElement, RzPredicate};

/// Compiles a column filter into a predicate tree.
///
/// `and` binds tighter than `or`; both associate to the left. There is no
/// explicit grouping in the query language.
pub fn compile(filter: &RzColumnFilter) -> Result<RzPredicate> {
    let mut disjuncts: Vec<RzPredicate> = Vec::new();
    let mut conjunction: Option<RzPredicate> = None;
    let mut pending: Option<RzConnective> = None;

    for element in filter.elements() {
        match element {
            RzFilterElement::Clause(clause) => {
                let leaf = RzPredicate::Clause(clause.clone());
                conjunction = Some(match (conjunction.take(), pending.take()) {
                    (None, _) => leaf,
                    (Some(left), Some(RzConnective::And)) => {
                        RzPredicate::And(Box::new(left), Box::new(leaf))
                    }
                    (Some(left), Some(RzConnective::Or)) => {
                        disjuncts.push(left);
                        leaf
                    }
                    (Some(_), None) => {
                        return Err(RzError::internal(format!(
                            "filter '{}' holds two clauses without a connective",
                            filter
                        )))
                    }
                });
            }
            RzFilterElement::Connective(connective) => pending = Some(*connective),
        }
    }

    let last = conjunction
        .ok_or_else(|| RzError::internal(format!("filter on '{}' has no clauses", filter.column())))?;
    disjuncts.push(last);

    let mut disjuncts = disjuncts.into_iter();
    let first = disjuncts
        .next()
        .ok_or_else(|| RzError::internal("empty disjunction"))?;
    Ok(disjuncts.fold(first, |left, right| {
        RzPredicate::Or(Box::new(left), Box::new(right))
    }))
}
