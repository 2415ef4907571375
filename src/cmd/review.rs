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

use lingosched_core::LearnerId;
use lingosched_core::Quality;
use lingosched_core::ReviewRecord;
use lingosched_core::Timestamp;
use lingosched_core::VocabularyId;
use lingosched_core::review;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;

/// Grades one recall attempt and stores the updated record.
pub fn review_item(
    collection: &mut Collection,
    learner: &LearnerId,
    vocabulary: &VocabularyId,
    quality: i64,
    now: Timestamp,
) -> Fallible<ReviewRecord> {
    // An invalid quality is reported ahead of an unknown item.
    Quality::new(quality)?;
    if !collection.catalog.contains(vocabulary) {
        return fail(format!("unknown vocabulary item: {vocabulary}"));
    }
    let record = collection.db.transaction(|db| {
        let record = review(db, learner, vocabulary, quality, now)?;
        db.record_study(learner, now.date())?;
        Ok(record)
    })?;
    log::debug!(
        "Graded {learner}/{vocabulary} with quality {quality}: repetitions={} interval={} ease={}",
        record.repetitions,
        record.interval,
        record.ease_factor
    );
    Ok(record)
}

pub fn render_review(collection: &Collection, record: &ReviewRecord) -> String {
    let word = collection
        .catalog
        .entry(&record.vocabulary_id)
        .map(|e| e.word.as_str())
        .unwrap_or("?");
    let days = if record.interval == 1 { "day" } else { "days" };
    format!(
        "{word} ({}): next review on {} (in {} {days}), {} consecutive, ease {}",
        record.vocabulary_id,
        record.next_review_date,
        record.interval,
        record.repetitions,
        record.ease_factor,
    )
}

#[cfg(test)]
mod tests {
    use lingosched_core::ReviewStore;

    use super::*;
    use crate::helper::create_tmp_collection;

    fn at(s: &str) -> Fallible<Timestamp> {
        Ok(Timestamp::try_from(s.to_string())?)
    }

    #[test]
    fn test_review_item() -> Fallible<()> {
        let (_dir, config) = create_tmp_collection()?;
        let mut collection = Collection::open(&config)?;
        let ana = LearnerId::from("ana");
        let bill = VocabularyId::from("cafe-bill");

        let first = review_item(&mut collection, &ana, &bill, 5, at("2024-04-01T12:00:00.000")?)?;
        assert_eq!(
            render_review(&collection, &first),
            "la cuenta (cafe-bill): next review on 2024-04-02 (in 1 day), 1 consecutive, ease 2.60"
        );
        let second = review_item(&mut collection, &ana, &bill, 5, at("2024-04-02T12:00:00.000")?)?;
        assert_eq!(
            render_review(&collection, &second),
            "la cuenta (cafe-bill): next review on 2024-04-08 (in 6 days), 2 consecutive, ease 2.70"
        );
        let third = review_item(&mut collection, &ana, &bill, 1, at("2024-04-08T12:00:00.000")?)?;
        assert_eq!(third.repetitions, 0);
        assert_eq!(third.interval, 1);
        assert_eq!(third.ease_factor.hundredths(), 216);
        assert_eq!(collection.db.get(&ana, &bill)?, Some(third));
        Ok(())
    }

    #[test]
    fn test_review_extends_streak() -> Fallible<()> {
        let (_dir, config) = create_tmp_collection()?;
        let mut collection = Collection::open(&config)?;
        let ana = LearnerId::from("ana");
        let coffee = VocabularyId::from("cafe-coffee");
        let bill = VocabularyId::from("cafe-bill");

        review_item(&mut collection, &ana, &coffee, 4, at("2024-04-01T09:00:00.000")?)?;
        review_item(&mut collection, &ana, &bill, 4, at("2024-04-01T21:00:00.000")?)?;
        assert_eq!(collection.db.streak(&ana)?.current, 1);

        review_item(&mut collection, &ana, &coffee, 4, at("2024-04-02T09:00:00.000")?)?;
        assert_eq!(collection.db.streak(&ana)?.current, 2);

        // A rejected grade is not a study day.
        let rejected = review_item(&mut collection, &ana, &bill, 7, at("2024-04-03T09:00:00.000")?);
        assert!(rejected.is_err());
        let streak = collection.db.streak(&ana)?;
        assert_eq!(streak.current, 2);
        assert_eq!(
            streak.last_study_date.map(|d| d.to_string()).as_deref(),
            Some("2024-04-02")
        );

        review_item(&mut collection, &ana, &bill, 4, at("2024-04-05T09:00:00.000")?)?;
        assert_eq!(collection.db.streak(&ana)?.current, 1);
        Ok(())
    }

    #[test]
    fn test_invalid_quality_writes_nothing() -> Fallible<()> {
        let (_dir, config) = create_tmp_collection()?;
        let mut collection = Collection::open(&config)?;
        let ana = LearnerId::from("ana");
        let bill = VocabularyId::from("cafe-bill");
        let now = at("2024-04-01T12:00:00.000")?;
        for bad in [-1, 6] {
            let err = review_item(&mut collection, &ana, &bill, bad, now)
                .err()
                .map(|e| e.to_string());
            assert_eq!(
                err,
                Some(format!(
                    "error: invalid quality {bad}: must be an integer from 0 to 5"
                ))
            );
        }
        assert_eq!(collection.db.get(&ana, &bill)?, None);
        Ok(())
    }

    #[test]
    fn test_unknown_vocabulary() -> Fallible<()> {
        let (_dir, config) = create_tmp_collection()?;
        let mut collection = Collection::open(&config)?;
        let result = review_item(
            &mut collection,
            &LearnerId::from("ana"),
            &VocabularyId::from("cafe-croissant"),
            4,
            at("2024-04-01T12:00:00.000")?,
        );
        assert!(result.is_err());
        assert!(collection.db.all_records()?.is_empty());
        Ok(())
    }
}
