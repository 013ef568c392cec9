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

//! # Query Parser
//!
//! Validates a tokenized filter entry and structures it into a
//! [`RzColumnFilter`].
//!
//! ## Grammar
//!
//! ```text
//! COLUMN OPERATOR VALUE [ (and|or) OPERATOR VALUE ]*
//! ```
//!
//! Only the leading clause names a column. Every clause chained after a
//! connective reuses that column, so `age > 10 and < 20` reads as
//! `age > 10 and age < 20`. Writing the column again after a connective is
//! rejected as a malformed entry: the reuse rule is part of the language,
//! not a shorthand.
//!
//! All checks run before any row is streamed and fail with
//! [`RzError::Configuration`], so an interactive caller can simply re-prompt.

use crate::errors::{Result, RzError};
use crate::query::ir::{RzClause, RzColumnFilter, RzConnective, RzFilterSet};
use crate::query::registry::{RzOperator, RzOperatorRegistry};
use crate::query::tokenizer::tokenize;
use crate::record::{RzColumnKey, RzColumns};

/// Parses filter entries against the columns of one source.
#[derive(Debug)]
pub struct RzQueryParser<'a> {
    columns: &'a RzColumns,
    registry: RzOperatorRegistry,
}

impl<'a> RzQueryParser<'a> {
    pub fn new(columns: &'a RzColumns) -> Self {
        Self {
            columns,
            registry: RzOperatorRegistry::new(),
        }
    }

    /// Tokenizes and structures one raw filter line.
    pub fn parse(&self, line: &str) -> Result<RzColumnFilter> {
        let tokens = tokenize(line);
        self.structure(&tokens)
    }

    /// Checks a token sequence and returns the column it binds to.
    pub fn validate(&self, tokens: &[String]) -> Result<RzColumnKey> {
        let first = tokens
            .first()
            .ok_or_else(|| RzError::configuration("filter cannot be empty"))?;
        let column = self.columns.resolve(first)?;

        if tokens.len() < 3 {
            return Err(RzError::configuration(
                "not enough arguments, expected COLUMN OPERATOR VALUE",
            ));
        }

        if tokens.len() > 3 && !tokens.iter().any(|token| RzConnective::parse(token).is_some()) {
            return Err(RzError::configuration(
                "clauses must be joined with 'and' or 'or'",
            ));
        }

        let misplaced = (tokens.len() - 3) % 3 != 0
            || tokens[3..]
                .iter()
                .step_by(3)
                .any(|token| RzConnective::parse(token).is_none());
        if misplaced {
            return Err(RzError::configuration(format!(
                "malformed filter '{}': after '{} OPERATOR VALUE' each 'and'/'or' takes only OPERATOR VALUE",
                tokens.join(" "),
                first
            )));
        }

        let unknown: Vec<&str> = tokens[1..]
            .iter()
            .step_by(3)
            .map(String::as_str)
            .filter(|symbol| !self.registry.contains(symbol))
            .collect();
        if !unknown.is_empty() {
            return Err(RzError::configuration(format!(
                "{} - not operators",
                unknown.join(", ")
            )));
        }

        Ok(column)
    }

    /// Groups a validated token sequence into clauses and connectives,
    /// binding every clause to the leading column.
    pub fn structure(&self, tokens: &[String]) -> Result<RzColumnFilter> {
        let column = self.validate(tokens)?;

        let mut filter = RzColumnFilter::new(RzClause::new(
            column.clone(),
            self.operator(&tokens[1])?,
            tokens[2].as_str(),
        ));
        for chunk in tokens[3..].chunks(3) {
            let connective = RzConnective::parse(&chunk[0])
                .ok_or_else(|| RzError::internal("connective vanished after validation"))?;
            let clause = RzClause::new(column.clone(), self.operator(&chunk[1])?, chunk[2].as_str());
            filter.push(connective, clause);
        }

        Ok(filter)
    }

    fn operator(&self, symbol: &str) -> Result<RzOperator> {
        RzOperator::from_symbol(symbol)
            .ok_or_else(|| RzError::configuration(format!("{} - not an operator", symbol)))
    }
}

/// Query-entry session for one source file.
///
/// Each accepted entry is stored under its column, replacing any earlier
/// entry for the same column. A rejected entry leaves the set untouched.
#[derive(Debug, Clone, Default)]
pub struct RzFilterBuilder {
    columns: RzColumns,
    filters: RzFilterSet,
}

impl RzFilterBuilder {
    pub fn new(columns: RzColumns) -> Self {
        Self {
            columns,
            filters: RzFilterSet::new(),
        }
    }

    pub fn columns(&self) -> &RzColumns {
        &self.columns
    }

    pub fn filters(&self) -> &RzFilterSet {
        &self.filters
    }

    /// Parses and stores one filter line.
    pub fn add_query(&mut self, line: &str) -> Result<&mut Self> {
        let filter = RzQueryParser::new(&self.columns).parse(line)?;
        log::debug!("registered filter: {}", filter);
        if let Some(previous) = self.filters.insert(filter) {
            log::debug!("replaced filter: {}", previous);
        }
        Ok(self)
    }

    /// Parses and stores several lines, stopping at the first rejected one.
    pub fn add_queries<I, S>(&mut self, lines: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_query(line.as_ref())?;
        }
        Ok(self)
    }

    pub fn build(self) -> RzFilterSet {
        self.filters
    }
}
