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


//! Review state persisted in the browser's localStorage.

use std::collections::BTreeMap;

use lingosched_core::Date;
use lingosched_core::ErrorReport;
use lingosched_core::Fallible;
use lingosched_core::LearnerId;
use lingosched_core::MemoryStore;
use lingosched_core::ReviewRecord;
use lingosched_core::ReviewStore;
use lingosched_core::StudyStreak;
use lingosched_core::VocabularyId;
use serde::Deserialize;
use serde::Serialize;
use web_sys::Storage as WebStorage;

const STORAGE_KEY: &str = "lingosched_state";

/// Where snapshots of the review state are kept.
pub trait Backend {
    fn load(&self, key: &str) -> Fallible<Option<String>>;

    fn save(&self, key: &str, data: &str) -> Fallible<()>;
}

/// The browser's localStorage. Without it (private browsing, non-browser
/// hosts) nothing is saved and state only lives as long as the page.
pub struct LocalStorage {
    inner: Option<WebStorage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        Self { inner }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for LocalStorage {
    fn load(&self, key: &str) -> Fallible<Option<String>> {
        match &self.inner {
            Some(storage) => storage
                .get_item(key)
                .map_err(|e| ErrorReport::new(format!("localStorage error: {e:?}"))),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, data: &str) -> Fallible<()> {
        match &self.inner {
            Some(storage) => storage
                .set_item(key, data)
                .map_err(|e| ErrorReport::new(format!("localStorage error: {e:?}"))),
            None => Ok(()),
        }
    }
}

/// Review records and study streaks for every learner on this device.
#[derive(Clone, Debug, Default)]
pub struct StoreState {
    pub records: MemoryStore,
    pub streaks: BTreeMap<LearnerId, StudyStreak>,
}

impl StoreState {
    /// Counts `today` as a study day for the learner.
    pub fn record_study(&mut self, learner: &LearnerId, today: Date) -> StudyStreak {
        let streak = self
            .streaks
            .get(learner)
            .copied()
            .unwrap_or_default()
            .record(today);
        self.streaks.insert(learner.clone(), streak);
        streak
    }
}

/// The saved form of `StoreState`.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    records: Vec<ReviewRecord>,
    #[serde(default)]
    streaks: BTreeMap<LearnerId, StudyStreak>,
}

/// Keeps the state in memory and saves a full snapshot after every change.
/// A change only becomes visible once its snapshot is saved.
pub struct BrowserStore<B: Backend> {
    backend: B,
    state: StoreState,
}

impl<B: Backend> BrowserStore<B> {
    pub fn open(backend: B) -> Fallible<Self> {
        let mut state = StoreState::default();
        if let Some(data) = backend.load(STORAGE_KEY)? {
            let snapshot: Snapshot = serde_json::from_str(&data)?;
            for record in &snapshot.records {
                state.records.put(record)?;
            }
            state.streaks = snapshot.streaks;
        }
        Ok(Self { backend, state })
    }

    /// Applies `f` to a copy of the state and saves it. If `f` or the save
    /// fails, the store is left as it was.
    pub fn transaction<T>(
        &mut self,
        f: impl FnOnce(&mut StoreState) -> Fallible<T>,
    ) -> Fallible<T> {
        let mut next = self.state.clone();
        let value = f(&mut next)?;
        let snapshot = Snapshot {
            records: next.records.all_records()?,
            streaks: next.streaks.clone(),
        };
        let data = serde_json::to_string(&snapshot)?;
        self.backend.save(STORAGE_KEY, &data)?;
        self.state = next;
        Ok(value)
    }

    pub fn streak(&self, learner: &LearnerId) -> StudyStreak {
        self.state.streaks.get(learner).copied().unwrap_or_default()
    }

    /// Replaces every stored record. Streaks are kept.
    pub fn replace_all(&mut self, records: &[ReviewRecord]) -> Fallible<()> {
        self.transaction(|state| {
            state.records = MemoryStore::new();
            for record in records {
                state.records.put(record)?;
            }
            Ok(())
        })
    }
}

impl<B: Backend> ReviewStore for BrowserStore<B> {
    fn get(
        &self,
        learner: &LearnerId,
        vocabulary: &VocabularyId,
    ) -> Fallible<Option<ReviewRecord>> {
        self.state.records.get(learner, vocabulary)
    }

    fn put(&mut self, record: &ReviewRecord) -> Fallible<()> {
        self.transaction(|state| state.records.put(record))
    }

    fn records_for(&self, learner: &LearnerId) -> Fallible<Vec<ReviewRecord>> {
        self.state.records.records_for(learner)
    }

    fn all_records(&self) -> Fallible<Vec<ReviewRecord>> {
        self.state.records.all_records()
    }

    fn delete(&mut self, learner: &LearnerId, vocabulary: &VocabularyId) -> Fallible<bool> {
        self.transaction(|state| state.records.delete(learner, vocabulary))
    }
}
