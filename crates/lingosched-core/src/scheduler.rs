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

use std::borrow::Borrow;

use crate::sm2::LAPSE_INTERVAL;
use crate::sm2::new_ease;
use crate::sm2::success_interval;
use crate::types::date::Date;
use crate::types::ease::EaseFactor;
use crate::types::quality::GradeError;
use crate::types::quality::Quality;
use crate::types::record::ReviewRecord;
use crate::types::timestamp::Timestamp;

/// Computes the successor of `record` after a recall graded `quality` at
/// `now`. The input is left untouched.
pub fn grade(record: &ReviewRecord, quality: Quality, now: Timestamp) -> ReviewRecord {
    let ease_factor: EaseFactor = new_ease(record.ease_factor, quality);
    let (repetitions, interval): (u32, u32) = if quality.is_success() {
        let repetitions = record.repetitions.saturating_add(1);
        let interval = success_interval(repetitions, record.interval, ease_factor);
        (repetitions, interval)
    } else {
        (0, LAPSE_INTERVAL)
    };
    ReviewRecord {
        learner_id: record.learner_id.clone(),
        vocabulary_id: record.vocabulary_id.clone(),
        ease_factor,
        interval,
        repetitions,
        next_review_date: now.date().add_days(interval),
        last_reviewed_at: Some(now),
    }
}

/// Like [`grade`], but takes the raw grade as supplied by a caller and
/// rejects anything outside `[0, 5]`.
pub fn try_grade(
    record: &ReviewRecord,
    quality: i64,
    now: Timestamp,
) -> Result<ReviewRecord, GradeError> {
    let quality = Quality::new(quality)?;
    Ok(grade(record, quality, now))
}

/// The records due on or before `as_of`, in input order.
pub fn due_items<I>(records: I, as_of: Date) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Borrow<ReviewRecord>,
{
    records
        .into_iter()
        .filter(|r| Borrow::<ReviewRecord>::borrow(r).is_due(as_of))
        .collect()
}
