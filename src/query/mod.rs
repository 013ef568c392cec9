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

//! # Filter Query Module
//!
//! A small boolean filter language, one line per column filter:
//!
//! ```text
//! name ~contains "spam mail"
//! age > 18 and < 65
//! city = Paris or = "New York"
//! ```
//!
//! ## Architecture
//!
//! - **Tokenizer** ([tokenizer.rs](tokenizer/index.html)): splits a line into
//!   literal tokens, honoring double-quoted literals
//! - **Registry** ([registry.rs](registry/index.html)): the five operator
//!   symbols, their coercion rules and help labels
//! - **IR** ([ir.rs](ir/index.html)): clauses, connectives, column filters,
//!   filter sets and the predicate tree
//! - **Parser** ([parser.rs](parser/index.html)): validates a token sequence and
//!   structures it, applying the column-reuse rule
//! - **Compiler** ([compiler.rs](compiler/index.html)): turns a column filter
//!   into a predicate tree with `and` binding tighter than `or`
//!
//! Rows are judged by [`crate::operators::filter::RzRowFilter`], which holds the
//! compiled predicates of a whole filter set.

pub mod compiler;
pub mod ir;
pub mod parser;
pub mod registry;
pub mod tokenizer;

pub use compiler::compile;
pub use ir::{RzClause, RzColumnFilter, RzConnective, RzFilterElement, RzFilterSet, RzPredicate, RzValue};
pub use parser::{RzFilterBuilder, RzQueryParser};
pub use registry::{RzOperator, RzOperatorRegistry, RzOperatorSpec};
pub use tokenizer::tokenize;
