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

//! # Operators Module
//!
//! Row-level processing stages of Razbi.
//!
//! ## Operator Categories
//!
//! - **filter**: Row evaluator turning a filter set into per-row verdicts
//! - **split**: Chunk writer emitting size-bounded partitions
//! - **merge**: File merger aligning several sources on one reference header
//!
//! ## Usage
//!
//! A split compiles a [`filter::RzRowFilter`] once per source and hands it to
//! a [`split::RzChunkWriter`] together with the source's row stream. A merge
//! needs only an [`merge::RzMerger`] and a source opener.

pub mod filter;
pub mod merge;
pub mod split;

pub use filter::{evaluate, RzRowFilter};
pub use merge::{RzMergeConfig, RzMergeReport, RzMergedSource, RzMerger, RzReferenceHeader};
pub use split::{
    RzChunkWriter, RzLogObserver, RzPartitionEvent, RzPartitionInfo, RzPartitionObserver,
    RzSplitConfig, RzSplitReport,
};
