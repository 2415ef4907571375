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
use lingosched_core::ReviewRecord;
use lingosched_core::ReviewStore;
use lingosched_core::find_orphans;

use crate::collection::Collection;
use crate::error::Fallible;

/// Records whose vocabulary item has been removed from the catalog.
pub fn list_orphans(collection: &Collection) -> Fallible<Vec<ReviewRecord>> {
    let records = collection.db.all_records()?;
    Ok(find_orphans(records, &collection.catalog))
}

/// Deletes orphan records. Returns how many were removed.
pub fn delete_orphans(collection: &mut Collection) -> Fallible<usize> {
    let orphans = list_orphans(collection)?;
    collection.db.transaction(|db| {
        for record in &orphans {
            db.delete(&record.learner_id, &record.vocabulary_id)?;
        }
        Ok(())
    })?;
    log::debug!("Deleted {} orphan records", orphans.len());
    Ok(orphans.len())
}

/// Deletes every record of a learner who has left.
pub fn forget_learner(collection: &mut Collection, learner: &LearnerId) -> Fallible<usize> {
    let n = collection.db.delete_learner(learner)?;
    log::debug!("Deleted {n} records of {learner}");
    Ok(n)
}

#[cfg(test)]
mod tests {
    use lingosched_core::Timestamp;
    use lingosched_core::VocabularyId;
    use lingosched_core::review;

    use super::*;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_orphans() -> Fallible<()> {
        let (_dir, config) = create_tmp_collection()?;
        let mut collection = Collection::open(&config)?;
        let ana = LearnerId::from("ana");
        let now = Timestamp::try_from("2024-04-01T12:00:00.000".to_string())?;
        review(&mut collection.db, &ana, &VocabularyId::from("cafe-coffee"), 4, now)?;
        // Written directly, as if the item had since been removed from the catalog.
        review(&mut collection.db, &ana, &VocabularyId::from("cafe-tip"), 4, now)?;

        let orphans = list_orphans(&collection)?;
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].vocabulary_id.as_str(), "cafe-tip");

        assert_eq!(delete_orphans(&mut collection)?, 1);
        assert!(list_orphans(&collection)?.is_empty());
        assert_eq!(collection.db.all_records()?.len(), 1);
        assert_eq!(delete_orphans(&mut collection)?, 0);
        Ok(())
    }

    #[test]
    fn test_forget_learner() -> Fallible<()> {
        let (_dir, config) = create_tmp_collection()?;
        let mut collection = Collection::open(&config)?;
        let ana = LearnerId::from("ana");
        let ben = LearnerId::from("ben");
        let now = Timestamp::try_from("2024-04-01T12:00:00.000".to_string())?;
        for id in ["cafe-coffee", "cafe-bill"] {
            review(&mut collection.db, &ana, &VocabularyId::from(id), 4, now)?;
        }
        review(&mut collection.db, &ben, &VocabularyId::from("cafe-bill"), 4, now)?;

        assert_eq!(forget_learner(&mut collection, &ana)?, 2);
        assert_eq!(forget_learner(&mut collection, &ana)?, 0);
        assert!(collection.db.records_for(&ana)?.is_empty());
        assert_eq!(collection.db.records_for(&ben)?.len(), 1);
        Ok(())
    }
}
