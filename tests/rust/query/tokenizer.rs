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

//! # Razbi Query Tests - Tokenizer
//!
//! Tests for splitting raw filter lines into literal tokens.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test tokenizer
//! ```

use proptest::prelude::*;
use razbi::tokenize;

/// Tests that a quoted literal keeps its inner spaces.
#[test]
fn test_quoted_literal() {
    assert_eq!(tokenize(r#"a "b c" d"#), vec!["a", "b c", "d"]);
}

/// Tests that an unterminated quote stops tokenizing without a panic.
#[test]
fn test_unterminated_quote() {
    assert_eq!(tokenize(r#"a "b"#), vec!["a", "b"]);
    assert_eq!(tokenize(r#"name contains "half open and more"#), vec!["name", "contains", "half open and more"]);
}

/// Tests that consecutive whitespace never yields empty tokens.
#[test]
fn test_whitespace_collapses() {
    assert_eq!(tokenize("age    >   10"), vec!["age", ">", "10"]);
    assert!(tokenize("").is_empty());
}

/// Tests that a trailing bare word is flushed at end of input.
#[test]
fn test_trailing_token_flushed() {
    assert_eq!(tokenize("city = Paris"), vec!["city", "=", "Paris"]);
}

/// Tests that an explicit empty literal is kept as an empty token.
#[test]
fn test_empty_quoted_literal() {
    assert_eq!(tokenize(r#"note = """#), vec!["note", "=", ""]);
}

proptest! {
    /// Tokenizing arbitrary input never panics and never yields an empty
    /// token unless the input holds a `""` pair.
    #[test]
    fn test_tokenize_total(line in ".*") {
        let tokens = tokenize(&line);
        if !line.contains("\"\"") {
            prop_assert!(tokens.iter().all(|token| !token.is_empty()));
        }
    }

    /// Without quotes, tokenizing is plain whitespace splitting.
    #[test]
    fn test_unquoted_matches_split(line in "[a-z0-9<>=~ \t]{0,40}") {
        let expected: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        prop_assert_eq!(tokenize(&line), expected);
    }
}
