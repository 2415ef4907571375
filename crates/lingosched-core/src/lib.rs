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

//! lingosched-core: review scheduling for vocabulary learning.
//!
//! This library is WASM-compatible and never reads the clock unless the
//! `clock` feature is enabled. It provides:
//! - The SM-2 scheduler (`grade`, `try_grade`, `due_items`)
//! - Review records and the storage contract they flow through
//! - The vocabulary catalog and review-session assembly
//! - Progress statistics and study streaks

pub mod catalog;
pub mod error;
pub mod progress;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use catalog::{Catalog, VocabularyEntry, parse_catalog};
pub use error::{ErrorReport, Fallible, fail};
pub use progress::{LearnerProgress, StudyStreak, completed_scenarios};
pub use scheduler::{due_items, grade, try_grade};
pub use session::{SessionItem, SessionOptions, build_session};
pub use stats::ReviewStats;
pub use store::{MemoryStore, ReviewStore, find_orphans, review};
pub use types::date::Date;
pub use types::ease::EaseFactor;
pub use types::ids::{LearnerId, VocabularyId};
pub use types::quality::{GradeError, Quality};
pub use types::record::{ReviewRecord, Stage};
pub use types::timestamp::Timestamp;
