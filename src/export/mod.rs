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

//! # Data Export Module
//!
//! Writing rows to delimited text.
//!
//! - **Row sinks**: [`RzRowSink`] for single-file output such as a merge
//! - **Partition sinks**: [`RzPartitionSink`] for numbered split output, on disk
//!   ([`RzCsvPartitionSink`]) or in memory ([`RzMemoryPartitionSink`])
//!
//! Partition files are named after their source: `report.xlsx` split into
//! three partitions yields `report_1.csv`, `report_2.csv` and `report_3.csv`.

pub mod writer;

pub use writer::{
    is_partition_of, partition_path, RzCsvPartitionSink, RzCsvRowWriter, RzMemoryPartitionSink, RzPartitionSink,
    RzRowSink,
};
