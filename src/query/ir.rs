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

use std::collections::btree_map::{BTreeMap, Iter};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::registry::RzOperator;
use crate::record::RzColumnKey;

/// A filter literal, typed once when the query is parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RzValue {
    Number(f64),
    Text(String),
}

impl RzValue {
    /// Numbers are literals that parse as a finite float; everything else is text.
    pub fn parse(literal: &str) -> Self {
        match literal.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => RzValue::Number(number),
            _ => RzValue::Text(literal.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            RzValue::Number(number) => Some(*number),
            RzValue::Text(_) => None,
        }
    }
}

/// Logical connective between two clauses of one column filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RzConnective {
    And,
    Or,
}

impl RzConnective {
    /// Recognizes `and` / `or` in any letter case.
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("and") {
            Some(RzConnective::And)
        } else if token.eq_ignore_ascii_case("or") {
            Some(RzConnective::Or)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RzConnective::And => "and",
            RzConnective::Or => "or",
        }
    }
}

/// One `(column, operator, literal)` comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RzClause {
    pub column: RzColumnKey,
    pub operator: RzOperator,
    /// Literal exactly as typed, quotes stripped.
    pub literal: String,
    pub value: RzValue,
}

impl RzClause {
    pub fn new(column: RzColumnKey, operator: RzOperator, literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let value = RzValue::parse(&literal);
        Self {
            column,
            operator,
            literal,
            value,
        }
    }
}

impl fmt::Display for RzClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.column, self.operator.symbol(), self.literal)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RzFilterElement {
    Clause(RzClause),
    Connective(RzConnective),
}

/// Clause/connective sequence bound to one column.
///
/// Elements alternate clause, connective, clause, ... so a filter with N
/// connectives always holds N+1 clauses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RzColumnFilter {
    column: RzColumnKey,
    elements: Vec<RzFilterElement>,
}

impl RzColumnFilter {
    /// Starts a filter from its leading clause; the filter binds to that
    /// clause's column.
    pub fn new(first: RzClause) -> Self {
        Self {
            column: first.column.clone(),
            elements: vec![RzFilterElement::Clause(first)],
        }
    }

    /// Chains a clause. Its column is replaced by the filter's bound column.
    pub fn push(&mut self, connective: RzConnective, mut clause: RzClause) {
        clause.column = self.column.clone();
        self.elements.push(RzFilterElement::Connective(connective));
        self.elements.push(RzFilterElement::Clause(clause));
    }

    pub fn column(&self) -> &RzColumnKey {
        &self.column
    }

    pub fn elements(&self) -> &[RzFilterElement] {
        &self.elements
    }

    pub fn clauses(&self) -> impl Iterator<Item = &RzClause> {
        self.elements.iter().filter_map(|element| match element {
            RzFilterElement::Clause(clause) => Some(clause),
            RzFilterElement::Connective(_) => None,
        })
    }

    pub fn connectives(&self) -> impl Iterator<Item = RzConnective> + '_ {
        self.elements.iter().filter_map(|element| match element {
            RzFilterElement::Connective(connective) => Some(*connective),
            RzFilterElement::Clause(_) => None,
        })
    }
}

impl fmt::Display for RzColumnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, element) in self.elements.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            match element {
                RzFilterElement::Clause(clause) => write!(f, "{}", clause)?,
                RzFilterElement::Connective(connective) => write!(f, "{}", connective.as_str())?,
            }
        }
        Ok(())
    }
}

/// Boolean expression tree evaluated per row.
#[derive(Clone, Debug, PartialEq)]
pub enum RzPredicate {
    Clause(RzClause),
    And(Box<RzPredicate>, Box<RzPredicate>),
    Or(Box<RzPredicate>, Box<RzPredicate>),
}

/// All column filters configured for one source file, at most one per column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RzFilterSet {
    filters: BTreeMap<RzColumnKey, RzColumnFilter>,
}

impl RzFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `filter` under its column, returning the filter it replaced.
    pub fn insert(&mut self, filter: RzColumnFilter) -> Option<RzColumnFilter> {
        self.filters.insert(filter.column().clone(), filter)
    }

    pub fn get(&self, column: &RzColumnKey) -> Option<&RzColumnFilter> {
        self.filters.get(column)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, RzColumnKey, RzColumnFilter> {
        self.filters.iter()
    }
}
