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

//! # Operator Registry Module
//!
//! Maps the five filter operator symbols to their comparison semantics and a
//! help label.
//!
//! ## Coercion Rules
//!
//! - `>`, `<`, `=`: when the literal is a number and the cell parses as one,
//!   the comparison is numeric. Otherwise both sides are lower-cased and
//!   compared as text. The text fallback is deterministic and never an error.
//! - `contains`, `~contains`: case-insensitive substring test against the
//!   literal as typed, whatever its type.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query::ir::RzValue;

/// Comparison applied to `(cell, typed literal, literal as typed)`.
pub type RzCompareFn = fn(&str, &RzValue, &str) -> bool;

/// The registered filter operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RzOperator {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "~contains")]
    NotContains,
}

impl RzOperator {
    /// Looks a symbol up in the standard registry.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        STANDARD_OPERATORS
            .iter()
            .find(|spec| spec.symbol == symbol)
            .map(|spec| spec.operator)
    }

    pub fn spec(&self) -> &'static RzOperatorSpec {
        // Every variant has exactly one entry in the table.
        match self {
            RzOperator::Greater => &STANDARD_OPERATORS[0],
            RzOperator::Less => &STANDARD_OPERATORS[1],
            RzOperator::Equal => &STANDARD_OPERATORS[2],
            RzOperator::Contains => &STANDARD_OPERATORS[3],
            RzOperator::NotContains => &STANDARD_OPERATORS[4],
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.spec().symbol
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    /// Applies the operator to a row cell.
    pub fn apply(&self, cell: &str, value: &RzValue, literal: &str) -> bool {
        (self.spec().compare)(cell, value, literal)
    }
}

impl fmt::Display for RzOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Symbol, semantics and display label of one operator.
#[derive(Clone, Copy)]
pub struct RzOperatorSpec {
    pub operator: RzOperator,
    pub symbol: &'static str,
    pub compare: RzCompareFn,
    pub label: &'static str,
}

impl fmt::Debug for RzOperatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RzOperatorSpec")
            .field("symbol", &self.symbol)
            .field("label", &self.label)
            .finish()
    }
}

static STANDARD_OPERATORS: [RzOperatorSpec; 5] = [
    RzOperatorSpec {
        operator: RzOperator::Greater,
        symbol: ">",
        compare: greater_than,
        label: "Greater than",
    },
    RzOperatorSpec {
        operator: RzOperator::Less,
        symbol: "<",
        compare: less_than,
        label: "Less than",
    },
    RzOperatorSpec {
        operator: RzOperator::Equal,
        symbol: "=",
        compare: equal_to,
        label: "Equal to",
    },
    RzOperatorSpec {
        operator: RzOperator::Contains,
        symbol: "contains",
        compare: contains,
        label: "Contains",
    },
    RzOperatorSpec {
        operator: RzOperator::NotContains,
        symbol: "~contains",
        compare: not_contains,
        label: "Does not contain",
    },
];

/// Registry of the operators a filter query may use.
#[derive(Debug, Clone, Copy, Default)]
pub struct RzOperatorRegistry;

impl RzOperatorRegistry {
    pub fn new() -> Self {
        RzOperatorRegistry
    }

    pub fn get(&self, symbol: &str) -> Option<&'static RzOperatorSpec> {
        STANDARD_OPERATORS.iter().find(|spec| spec.symbol == symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn specs(&self) -> &'static [RzOperatorSpec] {
        &STANDARD_OPERATORS
    }

    /// Help lines in `symbol: label` form, in registry order.
    pub fn help(&self) -> Vec<String> {
        STANDARD_OPERATORS
            .iter()
            .map(|spec| format!("{}: {}", spec.symbol, spec.label))
            .collect()
    }
}

fn ordering(cell: &str, value: &RzValue, literal: &str) -> Option<Ordering> {
    if let Some(number) = value.as_number() {
        if let Ok(cell_number) = cell.trim().parse::<f64>() {
            return cell_number.partial_cmp(&number);
        }
    }
    Some(cell.to_lowercase().cmp(&literal.to_lowercase()))
}

fn greater_than(cell: &str, value: &RzValue, literal: &str) -> bool {
    ordering(cell, value, literal) == Some(Ordering::Greater)
}

fn less_than(cell: &str, value: &RzValue, literal: &str) -> bool {
    ordering(cell, value, literal) == Some(Ordering::Less)
}

fn equal_to(cell: &str, value: &RzValue, literal: &str) -> bool {
    ordering(cell, value, literal) == Some(Ordering::Equal)
}

fn contains(cell: &str, _value: &RzValue, literal: &str) -> bool {
    cell.to_lowercase().contains(&literal.to_lowercase())
}

fn not_contains(cell: &str, value: &RzValue, literal: &str) -> bool {
    !contains(cell, value, literal)
}
