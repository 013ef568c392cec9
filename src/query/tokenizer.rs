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

//! # Filter Line Tokenizer
//!
//! Splits one raw filter line into literal tokens.
//!
//! - Whitespace outside quotes separates tokens; runs of whitespace collapse.
//! - A double quote opens a literal that runs to the next double quote, keeping
//!   inner spaces. The quotes themselves are dropped.
//! - An unterminated literal ends tokenizing at end of input without error.
//! - There is no escape for an embedded quote.

/// Tokenizes a filter line.
///
/// ```text
/// a "b c" d   ->  [a, b c, d]
/// a "b        ->  [a, b]
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '"' {
                        closed = true;
                        break;
                    }
                    current.push(inner);
                }
                if closed {
                    // `""` is a legitimate empty literal.
                    tokens.push(std::mem::take(&mut current));
                } else {
                    if !current.is_empty() {
                        tokens.push(current);
                    }
                    return tokens;
                }
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
