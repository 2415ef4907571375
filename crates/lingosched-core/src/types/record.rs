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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::date::Date;
use crate::types::ease::EaseFactor;
use crate::types::ids::LearnerId;
use crate::types::ids::VocabularyId;
use crate::types::timestamp::Timestamp;

/// Scheduling state for one (learner, vocabulary item) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub learner_id: LearnerId,
    pub vocabulary_id: VocabularyId,
    /// Retention difficulty multiplier. Never below 1.3.
    pub ease_factor: EaseFactor,
    /// Days between the last review and the next one. Zero means the item
    /// has never been reviewed.
    pub interval: u32,
    /// Consecutive successful recalls since the last failure.
    pub repetitions: u32,
    /// The day the item becomes due.
    pub next_review_date: Date,
    /// When the item was last graded.
    pub last_reviewed_at: Option<Timestamp>,
}

impl ReviewRecord {
    /// The record for a pair the learner has never attempted: due today.
    pub fn new(learner_id: LearnerId, vocabulary_id: VocabularyId, today: Date) -> Self {
        Self {
            learner_id,
            vocabulary_id,
            ease_factor: EaseFactor::INITIAL,
            interval: 0,
            repetitions: 0,
            next_review_date: today,
            last_reviewed_at: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.last_reviewed_at.is_none()
    }

    pub fn is_due(&self, as_of: Date) -> bool {
        self.next_review_date <= as_of
    }

    pub fn stage(&self) -> Stage {
        match (self.repetitions, self.last_reviewed_at) {
            (0, None) => Stage::New,
            (0, Some(_)) => Stage::Lapsed,
            (1..=2, _) => Stage::Learning,
            _ => Stage::Review,
        }
    }
}

/// Where a record sits in its lifecycle. Derived from the record, never
/// stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Never reviewed.
    New,
    /// One or two consecutive successes.
    Learning,
    /// Three or more consecutive successes.
    Review,
    /// The last grading was a failure.
    Lapsed,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::New => "new",
            Stage::Learning => "learning",
            Stage::Review => "review",
            Stage::Lapsed => "lapsed",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
