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

use std::fs::write;
use std::path::Path;

use lingosched_core::LearnerId;
use lingosched_core::ReviewStore;

use crate::db::Database;
use crate::error::Fallible;

/// Serializes review records as pretty JSON: every record, or only one
/// learner's.
pub fn export_records(db: &Database, learner: Option<&LearnerId>) -> Fallible<String> {
    let records = match learner {
        Some(learner) => db.records_for(learner)?,
        None => db.all_records()?,
    };
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Writes the export to `output`, or prints it if there is none.
pub fn export_collection(
    db: &Database,
    learner: Option<&LearnerId>,
    output: Option<&Path>,
) -> Fallible<()> {
    let json = export_records(db, learner)?;
    match output {
        Some(path) => {
            write(path, json)?;
            log::debug!("Exported records to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
