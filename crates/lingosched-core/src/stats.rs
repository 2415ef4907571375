// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::Serialize;

use crate::scheduler::due_items;
use crate::types::date::Date;
use crate::types::record::ReviewRecord;
use crate::types::record::Stage;
use crate::types::timestamp::Timestamp;

/// A summary of a learner's records.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewStats {
    pub total: usize,
    pub new: usize,
    pub learning: usize,
    /// Items with three or more consecutive successes ("mastered").
    pub review: usize,
    pub lapsed: usize,
    pub due: usize,
    /// Mean ease factor, rounded to two decimals.
    pub average_ease: Option<f64>,
    pub last_reviewed_at: Option<Timestamp>,
}

impl ReviewStats {
    pub fn compute(records: &[ReviewRecord], as_of: Date) -> Self {
        let count = |stage: Stage| records.iter().filter(|r| r.stage() == stage).count();
        let average_ease = if records.is_empty() {
            None
        } else {
            let sum: u64 = records
                .iter()
                .map(|r| u64::from(r.ease_factor.hundredths()))
                .sum();
            let mean = sum as f64 / records.len() as f64;
            Some(mean.round() / 100.0)
        };
        ReviewStats {
            total: records.len(),
            new: count(Stage::New),
            learning: count(Stage::Learning),
            review: count(Stage::Review),
            lapsed: count(Stage::Lapsed),
            due: due_items(records, as_of).len(),
            average_ease,
            last_reviewed_at: records.iter().filter_map(|r| r.last_reviewed_at).max(),
        }
    }
}
