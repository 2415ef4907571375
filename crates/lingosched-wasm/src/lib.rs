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


//! WASM bindings for lingosched: runs vocabulary review sessions in the browser.

use std::fmt::Display;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::console;

use lingosched_core::Catalog;
use lingosched_core::Date;
use lingosched_core::LearnerId;
use lingosched_core::LearnerProgress;
use lingosched_core::ReviewRecord;
use lingosched_core::ReviewStore;
use lingosched_core::SessionItem;
use lingosched_core::SessionOptions;
use lingosched_core::Timestamp;
use lingosched_core::build_session;
use lingosched_core::parse_catalog;
use lingosched_core::review;

mod storage;

use storage::BrowserStore;
use storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"lingosched WASM initialized".into());
}

fn js_error(context: &str, e: impl Display) -> JsValue {
    JsValue::from_str(&format!("{context}: {e}"))
}

/// The result of grading the current item.
#[derive(Serialize)]
struct GradeOutcome<'a> {
    record: &'a ReviewRecord,
    /// Whether the item went back into the session queue.
    requeued: bool,
}

/// Review session state for one learner, managed from JavaScript.
#[wasm_bindgen]
pub struct ReviewApp {
    learner: LearnerId,
    catalog: Option<Catalog>,
    store: BrowserStore<LocalStorage>,
    /// Items remaining in the current session. The current item is last.
    session_items: Vec<SessionItem>,
    total_session_items: usize,
    reviews_this_session: usize,
}

#[wasm_bindgen]
impl ReviewApp {
    /// Create an app for the given learner, loading saved records.
    #[wasm_bindgen(constructor)]
    pub fn new(learner_id: &str) -> Result<ReviewApp, JsValue> {
        if learner_id.trim().is_empty() {
            return Err(JsValue::from_str("Learner id must not be empty"));
        }
        Ok(Self {
            learner: LearnerId::from(learner_id),
            catalog: None,
            store: BrowserStore::open(LocalStorage::new())
                .map_err(|e| js_error("Failed to load saved state", e))?,
            session_items: Vec::new(),
            total_session_items: 0,
            reviews_this_session: 0,
        })
    }

    /// Load the vocabulary catalog from TOML. Returns the number of items.
    #[wasm_bindgen]
    pub fn load_catalog(&mut self, catalog_toml: &str) -> Result<usize, JsValue> {
        let catalog =
            parse_catalog(catalog_toml).map_err(|e| js_error("Failed to parse catalog", e))?;
        let n = catalog.len();
        self.catalog = Some(catalog);
        Ok(n)
    }

    /// Start a new review session. Returns the number of items due.
    #[wasm_bindgen]
    pub fn start_session(
        &mut self,
        today_str: &str,
        do_shuffle: bool,
        item_limit: Option<usize>,
        new_item_limit: Option<usize>,
        scenario: Option<String>,
    ) -> Result<usize, JsValue> {
        let today =
            Date::try_from(today_str.to_string()).map_err(|e| js_error("Invalid date", e))?;
        let options = SessionOptions {
            scenario,
            item_limit,
            new_item_limit,
            shuffle_seed: do_shuffle.then(|| js_sys::Date::now() as u64),
        };
        let mut items = build_session(self.catalog()?, &self.store, &self.learner, today, &options)
            .map_err(|e| js_error("Failed to start session", e))?;
        // The current item is popped from the back.
        items.reverse();

        self.total_session_items = items.len();
        self.session_items = items;
        self.reviews_this_session = 0;
        Ok(self.session_items.len())
    }

    #[wasm_bindgen]
    pub fn has_items(&self) -> bool {
        !self.session_items.is_empty()
    }

    #[wasm_bindgen]
    pub fn remaining_items(&self) -> usize {
        self.session_items.len()
    }

    #[wasm_bindgen]
    pub fn total_items(&self) -> usize {
        self.total_session_items
    }

    #[wasm_bindgen]
    pub fn reviews_this_session(&self) -> usize {
        self.reviews_this_session
    }

    /// Get progress (items finished / total).
    #[wasm_bindgen]
    pub fn progress(&self) -> f64 {
        if self.total_session_items == 0 {
            1.0
        } else {
            (self.total_session_items - self.session_items.len()) as f64
                / self.total_session_items as f64
        }
    }

    /// The current item, with its scenario and review record, as JSON.
    #[wasm_bindgen]
    pub fn current_item_json(&self) -> Result<String, JsValue> {
        let item = self
            .session_items
            .last()
            .ok_or_else(|| JsValue::from_str("No items in session"))?;
        serde_json::to_string(item).map_err(|e| js_error("Failed to serialize item", e))
    }

    /// Grade the current item with a quality from 0 to 5 and count today as
    /// a study day. Failed items go back to the end of the session. Returns
    /// the outcome as JSON.
    #[wasm_bindgen]
    pub fn grade_current(&mut self, quality: i32, now_str: &str) -> Result<String, JsValue> {
        let now =
            Timestamp::try_from(now_str.to_string()).map_err(|e| js_error("Invalid timestamp", e))?;
        let vocabulary = self
            .session_items
            .last()
            .map(|item| item.entry.id.clone())
            .ok_or_else(|| JsValue::from_str("No items in session"))?;
        let learner = &self.learner;
        let record = self
            .store
            .transaction(|state| {
                let record = review(
                    &mut state.records,
                    learner,
                    &vocabulary,
                    i64::from(quality),
                    now,
                )?;
                state.record_study(learner, now.date());
                Ok(record)
            })
            .map_err(|e| js_error("Failed to grade item", e))?;
        self.reviews_this_session += 1;

        let requeued = record.repetitions == 0;
        if let Some(mut item) = self.session_items.pop() {
            if requeued {
                item.record = record.clone();
                self.session_items.insert(0, item);
            }
        }

        let outcome = GradeOutcome {
            record: &record,
            requeued,
        };
        serde_json::to_string(&outcome).map_err(|e| js_error("Failed to serialize outcome", e))
    }

    /// Progress over the loaded catalog as JSON: statistics, the study
    /// streak and completed scenarios.
    #[wasm_bindgen]
    pub fn stats_json(&self, today_str: &str) -> Result<String, JsValue> {
        let today =
            Date::try_from(today_str.to_string()).map_err(|e| js_error("Invalid date", e))?;
        let mut records = Vec::new();
        for (_, entry) in self.catalog()?.vocabulary() {
            let record = self
                .store
                .lookup_or_create(&self.learner, &entry.id, today)
                .map_err(|e| js_error("Failed to read records", e))?;
            records.push(record);
        }
        let streak = self.store.streak(&self.learner);
        let progress = LearnerProgress::compute(self.catalog()?, &records, streak, today);
        serde_json::to_string(&progress).map_err(|e| js_error("Failed to serialize stats", e))
    }

    /// Export every saved record as JSON.
    #[wasm_bindgen]
    pub fn export_records(&self) -> Result<String, JsValue> {
        let records = self
            .store
            .all_records()
            .map_err(|e| js_error("Failed to read records", e))?;
        serde_json::to_string(&records).map_err(|e| js_error("Failed to serialize records", e))
    }

    /// Replace every saved record with the given JSON export.
    #[wasm_bindgen]
    pub fn import_records(&mut self, json: &str) -> Result<usize, JsValue> {
        let records: Vec<ReviewRecord> =
            serde_json::from_str(json).map_err(|e| js_error("Failed to parse records", e))?;
        self.store
            .replace_all(&records)
            .map_err(|e| js_error("Failed to save records", e))?;
        Ok(records.len())
    }
}

impl ReviewApp {
    fn catalog(&self) -> Result<&Catalog, JsValue> {
        self.catalog
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No catalog loaded"))
    }
}

/// Get the current timestamp as a string (YYYY-MM-DDTHH:MM:SS.sss).
#[wasm_bindgen]
pub fn now_timestamp() -> String {
    let date = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        date.get_full_year(),
        date.get_month() + 1,
        date.get_date(),
        date.get_hours(),
        date.get_minutes(),
        date.get_seconds(),
        date.get_milliseconds()
    )
}

/// Get today's date as a string (YYYY-MM-DD).
#[wasm_bindgen]
pub fn today_date() -> String {
    let date = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        date.get_full_year(),
        date.get_month() + 1,
        date.get_date()
    )
}
