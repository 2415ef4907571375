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

use lingosched_core::Date;
use lingosched_core::LearnerId;
use lingosched_core::SessionItem;
use lingosched_core::SessionOptions;
use lingosched_core::build_session;

use crate::cmd::OutputFormat;
use crate::collection::Collection;
use crate::error::Fallible;

pub fn due_session(
    collection: &Collection,
    learner: &LearnerId,
    as_of: Date,
    options: &SessionOptions,
) -> Fallible<Vec<SessionItem>> {
    let items = build_session(&collection.catalog, &collection.db, learner, as_of, options)?;
    log::debug!("{} items due for {learner} as of {as_of}", items.len());
    Ok(items)
}

pub fn render_due(items: &[SessionItem], as_of: Date, format: OutputFormat) -> Fallible<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Text => {
            if items.is_empty() {
                return Ok(format!("Nothing due as of {as_of}."));
            }
            let mut out = String::new();
            for item in items {
                let overdue = item.record.next_review_date.days_until(as_of);
                let status = if item.record.is_new() {
                    "new".to_string()
                } else if overdue > 0 {
                    format!("{} overdue {overdue}d", item.record.stage())
                } else {
                    item.record.stage().to_string()
                };
                out.push_str(&format!(
                    "{:<20} {:<24} {:<24} {}\n",
                    item.entry.id, item.entry.word, item.entry.translation, status
                ));
            }
            out.push_str(&format!("{} due as of {as_of}.", items.len()));
            Ok(out)
        }
    }
}
