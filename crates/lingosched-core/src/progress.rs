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

//! Learner progress beyond what review records show: the daily study streak
//! and the scenarios a learner has completed.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::stats::ReviewStats;
use crate::types::date::Date;
use crate::types::ids::VocabularyId;
use crate::types::record::ReviewRecord;
use crate::types::record::Stage;

/// Consecutive days on which a learner graded at least one item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyStreak {
    pub current: u32,
    pub last_study_date: Option<Date>,
}

impl StudyStreak {
    /// The streak after studying on `today`. Studying the day after the last
    /// study day extends the streak, studying again on the same day leaves
    /// it alone, and any gap starts a new streak of one. Days earlier than
    /// the last study day are ignored.
    pub fn record(self, today: Date) -> Self {
        let current = match self.last_study_date {
            Some(last) if last > today => return self,
            Some(last) if last == today => self.current.max(1),
            Some(last) if last.days_until(today) == 1 => self.current.saturating_add(1),
            _ => 1,
        };
        StudyStreak {
            current,
            last_study_date: Some(today),
        }
    }

    /// The streak as seen on `as_of`: still alive if the learner studied
    /// that day or the day before, otherwise zero.
    pub fn active(&self, as_of: Date) -> u32 {
        match self.last_study_date {
            Some(last) if (0..=1).contains(&last.days_until(as_of)) => self.current,
            _ => 0,
        }
    }
}

/// Scenarios whose items are all in the review stage. Scenarios without
/// vocabulary are never complete.
pub fn completed_scenarios(catalog: &Catalog, records: &[ReviewRecord]) -> Vec<String> {
    let mastered: HashSet<&VocabularyId> = records
        .iter()
        .filter(|r| r.stage() == Stage::Review)
        .map(|r| &r.vocabulary_id)
        .collect();
    catalog
        .scenarios()
        .iter()
        .filter(|scenario| {
            !scenario.vocabulary.is_empty()
                && scenario.vocabulary.iter().all(|e| mastered.contains(&e.id))
        })
        .map(|scenario| scenario.id.clone())
        .collect()
}

/// Everything reported about a learner: record statistics, the streak, and
/// completed scenarios.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LearnerProgress {
    #[serde(flatten)]
    pub stats: ReviewStats,
    pub current_streak: u32,
    pub last_study_date: Option<Date>,
    pub completed_scenarios: Vec<String>,
}

impl LearnerProgress {
    /// `records` holds one record per catalog item for the learner.
    pub fn compute(
        catalog: &Catalog,
        records: &[ReviewRecord],
        streak: StudyStreak,
        as_of: Date,
    ) -> Self {
        LearnerProgress {
            stats: ReviewStats::compute(records, as_of),
            current_streak: streak.active(as_of),
            last_study_date: streak.last_study_date,
            completed_scenarios: completed_scenarios(catalog, records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::error::Fallible;
    use crate::store::MemoryStore;
    use crate::store::ReviewStore;
    use crate::store::review;
    use crate::types::ids::LearnerId;
    use crate::types::timestamp::Timestamp;

    fn day(d: u32) -> Fallible<Date> {
        Date::from_ymd(2024, 3, d)
    }

    #[test]
    fn test_first_study_day() -> Fallible<()> {
        let streak = StudyStreak::default().record(day(1)?);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.last_study_date, Some(day(1)?));
        Ok(())
    }

    #[test]
    fn test_streak_continues() -> Fallible<()> {
        let streak = StudyStreak::default()
            .record(day(1)?)
            .record(day(2)?)
            .record(day(3)?);
        assert_eq!(streak.current, 3);
        assert_eq!(streak.last_study_date, Some(day(3)?));
        Ok(())
    }

    #[test]
    fn test_same_day_does_not_extend() -> Fallible<()> {
        let once = StudyStreak::default().record(day(1)?).record(day(2)?);
        let twice = once.record(day(2)?);
        assert_eq!(twice, once);
        assert_eq!(twice.current, 2);
        Ok(())
    }

    #[test]
    fn test_gap_resets() -> Fallible<()> {
        let streak = StudyStreak::default()
            .record(day(1)?)
            .record(day(2)?)
            .record(day(5)?);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.last_study_date, Some(day(5)?));
        Ok(())
    }

    #[test]
    fn test_earlier_day_is_ignored() -> Fallible<()> {
        let streak = StudyStreak::default().record(day(4)?).record(day(5)?);
        assert_eq!(streak.record(day(2)?), streak);
        Ok(())
    }

    #[test]
    fn test_active() -> Fallible<()> {
        let streak = StudyStreak::default().record(day(1)?).record(day(2)?);
        assert_eq!(streak.active(day(2)?), 2);
        assert_eq!(streak.active(day(3)?), 2);
        assert_eq!(streak.active(day(4)?), 0);
        assert_eq!(StudyStreak::default().active(day(4)?), 0);
        Ok(())
    }

    #[test]
    fn test_completed_scenarios() -> Fallible<()> {
        let catalog = parse_catalog(
            r#"
language = "spanish"

[[scenario]]
id = "greetings"
title = "Greetings"

[[scenario.vocabulary]]
id = "hola"
word = "hola"
translation = "hello"

[[scenario]]
id = "market"
title = "Market"

[[scenario.vocabulary]]
id = "pan"
word = "el pan"
translation = "the bread"

[[scenario.vocabulary]]
id = "queso"
word = "el queso"
translation = "the cheese"

[[scenario]]
id = "empty"
title = "Nothing here yet"
"#,
        )?;
        let ana = LearnerId::from("ana");
        let mut store = MemoryStore::new();
        for (id, grades) in [("hola", 3), ("pan", 3), ("queso", 2)] {
            for d in 1..=grades {
                let now = Timestamp::start_of(day(d * 10)?);
                review(&mut store, &ana, &VocabularyId::from(id), 5, now)?;
            }
        }
        let records = store.records_for(&ana)?;
        assert_eq!(completed_scenarios(&catalog, &records), vec!["greetings"]);

        let streak = StudyStreak::default().record(day(30)?);
        let progress = LearnerProgress::compute(&catalog, &records, streak, day(31)?);
        assert_eq!(progress.current_streak, 1);
        assert_eq!(progress.completed_scenarios, vec!["greetings"]);
        assert_eq!(progress.stats.review, 2);
        Ok(())
    }
}
