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

//! Where review records live between gradings.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::error::Fallible;
use crate::scheduler::try_grade;
use crate::types::date::Date;
use crate::types::ids::LearnerId;
use crate::types::ids::VocabularyId;
use crate::types::record::ReviewRecord;
use crate::types::timestamp::Timestamp;

/// Persistence for review records, keyed by (learner, vocabulary item).
/// At most one record exists per pair.
pub trait ReviewStore {
    fn get(&self, learner: &LearnerId, vocabulary: &VocabularyId)
    -> Fallible<Option<ReviewRecord>>;

    /// Inserts the record, replacing any record for the same pair.
    fn put(&mut self, record: &ReviewRecord) -> Fallible<()>;

    /// All records for a learner, sorted by vocabulary id.
    fn records_for(&self, learner: &LearnerId) -> Fallible<Vec<ReviewRecord>>;

    /// Every record in the store, sorted by learner then vocabulary id.
    fn all_records(&self) -> Fallible<Vec<ReviewRecord>>;

    /// Removes the record for a pair. Returns whether one existed.
    fn delete(&mut self, learner: &LearnerId, vocabulary: &VocabularyId) -> Fallible<bool>;

    /// The stored record for the pair, or a fresh one due `today`. Does not
    /// write anything.
    fn lookup_or_create(
        &self,
        learner: &LearnerId,
        vocabulary: &VocabularyId,
        today: Date,
    ) -> Fallible<ReviewRecord> {
        match self.get(learner, vocabulary)? {
            Some(record) => Ok(record),
            None => Ok(ReviewRecord::new(
                learner.clone(),
                vocabulary.clone(),
                today,
            )),
        }
    }
}

/// Grades one recall and persists the result. An invalid quality is
/// rejected before the store is touched.
pub fn review<S: ReviewStore + ?Sized>(
    store: &mut S,
    learner: &LearnerId,
    vocabulary: &VocabularyId,
    quality: i64,
    now: Timestamp,
) -> Fallible<ReviewRecord> {
    let current = store.lookup_or_create(learner, vocabulary, now.date())?;
    let updated = try_grade(&current, quality, now)?;
    store.put(&updated)?;
    Ok(updated)
}

/// Records whose vocabulary item is no longer in the catalog.
pub fn find_orphans(records: Vec<ReviewRecord>, catalog: &Catalog) -> Vec<ReviewRecord> {
    records
        .into_iter()
        .filter(|r| !catalog.contains(&r.vocabulary_id))
        .collect()
}

/// An in-memory store.
#[derive(Clone, Default, Debug)]
pub struct MemoryStore {
    records: BTreeMap<(LearnerId, VocabularyId), ReviewRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ReviewStore for MemoryStore {
    fn get(
        &self,
        learner: &LearnerId,
        vocabulary: &VocabularyId,
    ) -> Fallible<Option<ReviewRecord>> {
        Ok(self
            .records
            .get(&(learner.clone(), vocabulary.clone()))
            .cloned())
    }

    fn put(&mut self, record: &ReviewRecord) -> Fallible<()> {
        let key = (record.learner_id.clone(), record.vocabulary_id.clone());
        self.records.insert(key, record.clone());
        Ok(())
    }

    fn records_for(&self, learner: &LearnerId) -> Fallible<Vec<ReviewRecord>> {
        Ok(self
            .records
            .values()
            .filter(|r| &r.learner_id == learner)
            .cloned()
            .collect())
    }

    fn all_records(&self) -> Fallible<Vec<ReviewRecord>> {
        Ok(self.records.values().cloned().collect())
    }

    fn delete(&mut self, learner: &LearnerId, vocabulary: &VocabularyId) -> Fallible<bool> {
        Ok(self
            .records
            .remove(&(learner.clone(), vocabulary.clone()))
            .is_some())
    }
}
