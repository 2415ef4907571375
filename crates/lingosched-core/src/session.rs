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

use crate::catalog::Catalog;
use crate::catalog::VocabularyEntry;
use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::store::ReviewStore;
use crate::types::date::Date;
use crate::types::ids::LearnerId;
use crate::types::record::ReviewRecord;

#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    /// Only include items from this scenario.
    pub scenario: Option<String>,
    /// Maximum number of items in the session.
    pub item_limit: Option<usize>,
    /// Maximum number of never-reviewed items in the session.
    pub new_item_limit: Option<usize>,
    /// Shuffle the session with this seed.
    pub shuffle_seed: Option<u64>,
}

/// A vocabulary item eligible for review, with its current record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionItem {
    pub scenario_id: String,
    pub entry: VocabularyEntry,
    pub record: ReviewRecord,
}

/// Collects the catalog items due for `learner` on `today`. New items get a
/// fresh record; nothing is written to the store.
pub fn build_session<S: ReviewStore + ?Sized>(
    catalog: &Catalog,
    store: &S,
    learner: &LearnerId,
    today: Date,
    options: &SessionOptions,
) -> Fallible<Vec<SessionItem>> {
    if let Some(scenario) = &options.scenario {
        if catalog.scenario(scenario).is_none() {
            return fail(format!("no such scenario: {scenario}"));
        }
    }

    let mut candidates = Vec::new();
    for (scenario_id, entry) in catalog.vocabulary() {
        if options.scenario.as_deref().is_some_and(|s| s != scenario_id) {
            continue;
        }
        let record = store.lookup_or_create(learner, &entry.id, today)?;
        candidates.push(SessionItem {
            scenario_id: scenario_id.to_string(),
            entry: entry.clone(),
            record,
        });
    }

    let mut items: Vec<SessionItem> = candidates
        .into_iter()
        .filter(|item| item.record.is_due(today))
        .collect();

    if let Some(limit) = options.new_item_limit {
        let mut new_count = 0;
        items.retain(|item| {
            if !item.record.is_new() {
                return true;
            }
            new_count += 1;
            new_count <= limit
        });
    }

    if let Some(limit) = options.item_limit {
        items.truncate(limit);
    }

    if let Some(seed) = options.shuffle_seed {
        TinyRng::from_seed(seed).shuffle(&mut items);
    }

    Ok(items)
}
