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
use lingosched_core::LearnerProgress;
use lingosched_core::ReviewRecord;
use lingosched_core::ReviewStore;

use crate::cmd::OutputFormat;
use crate::collection::Collection;
use crate::error::Fallible;

/// Progress over every catalog item for a learner. Items never attempted
/// count as new; records for items no longer in the catalog are ignored.
pub fn learner_stats(
    collection: &Collection,
    learner: &LearnerId,
    as_of: Date,
) -> Fallible<LearnerProgress> {
    let mut records: Vec<ReviewRecord> = Vec::with_capacity(collection.catalog.len());
    for (_, entry) in collection.catalog.vocabulary() {
        records.push(collection.db.lookup_or_create(learner, &entry.id, as_of)?);
    }
    let streak = collection.db.streak(learner)?;
    Ok(LearnerProgress::compute(&collection.catalog, &records, streak, as_of))
}

pub fn render_stats(
    learner: &LearnerId,
    progress: &LearnerProgress,
    format: OutputFormat,
) -> Fallible<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(progress)?),
        OutputFormat::Text => {
            let stats = &progress.stats;
            let ease = stats
                .average_ease
                .map(|e| format!("{e:.2}"))
                .unwrap_or_else(|| "-".to_string());
            let last = stats
                .last_reviewed_at
                .map(|ts| ts.to_string())
                .unwrap_or_else(|| "never".to_string());
            let completed = if progress.completed_scenarios.is_empty() {
                "-".to_string()
            } else {
                progress.completed_scenarios.join(", ")
            };
            let days = if progress.current_streak == 1 { "day" } else { "days" };
            Ok([
                format!("Learner:       {learner}"),
                format!("Items:         {}", stats.total),
                format!("  new:         {}", stats.new),
                format!("  learning:    {}", stats.learning),
                format!("  review:      {}", stats.review),
                format!("  lapsed:      {}", stats.lapsed),
                format!("Due:           {}", stats.due),
                format!("Average ease:  {ease}"),
                format!("Last review:   {last}"),
                format!("Streak:        {} {days}", progress.current_streak),
                format!("Completed:     {completed}"),
            ]
            .join("\n"))
        }
    }
}
