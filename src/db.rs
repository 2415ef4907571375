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

use std::path::Path;

use lingosched_core::Date;
use lingosched_core::EaseFactor;
use lingosched_core::LearnerId;
use lingosched_core::ReviewRecord;
use lingosched_core::ReviewStore;
use lingosched_core::StudyStreak;
use lingosched_core::Timestamp;
use lingosched_core::VocabularyId;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;

use crate::error::Fallible;

const SCHEMA: &str = "
create table if not exists review_schedule (
    learner_id       text not null,
    vocabulary_id    text not null,
    ease_factor      integer not null default 250,
    interval         integer not null default 0,
    repetitions      integer not null default 0,
    next_review_date text not null,
    last_reviewed_at text,
    primary key (learner_id, vocabulary_id)
) strict;

create table if not exists study_streak (
    learner_id      text primary key,
    current_streak  integer not null,
    last_study_date text not null
) strict;
";

const COLUMNS: &str = "learner_id, vocabulary_id, ease_factor, interval, repetitions, next_review_date, last_reviewed_at";

pub struct Database {
    conn: Connection,
}

/// A row as stored, before validation.
struct RawRecord {
    learner_id: String,
    vocabulary_id: String,
    ease_factor: u32,
    interval: u32,
    repetitions: u32,
    next_review_date: String,
    last_reviewed_at: Option<String>,
}

impl RawRecord {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(RawRecord {
            learner_id: row.get(0)?,
            vocabulary_id: row.get(1)?,
            ease_factor: row.get(2)?,
            interval: row.get(3)?,
            repetitions: row.get(4)?,
            next_review_date: row.get(5)?,
            last_reviewed_at: row.get(6)?,
        })
    }

    fn into_record(self) -> lingosched_core::Fallible<ReviewRecord> {
        Ok(ReviewRecord {
            learner_id: LearnerId::new(self.learner_id),
            vocabulary_id: VocabularyId::new(self.vocabulary_id),
            ease_factor: EaseFactor::from_hundredths(self.ease_factor)?,
            interval: self.interval,
            repetitions: self.repetitions,
            next_review_date: Date::try_from(self.next_review_date)?,
            last_reviewed_at: self.last_reviewed_at.map(Timestamp::try_from).transpose()?,
        })
    }
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Fallible<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Database { conn })
    }

    /// Runs `f` inside an immediate transaction, so concurrent writers to
    /// the same database are serialized. Rolls back if `f` fails.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&mut Self) -> Fallible<T>) -> Fallible<T> {
        self.conn.execute_batch("begin immediate")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("commit")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.conn.execute_batch("rollback") {
                    log::warn!("Rollback failed: {rollback}");
                }
                Err(e)
            }
        }
    }

    /// Deletes every record belonging to a learner, and their streak.
    /// Returns the number of review records removed.
    pub fn delete_learner(&mut self, learner: &LearnerId) -> Fallible<usize> {
        let n = self.conn.execute(
            "delete from review_schedule where learner_id = ?",
            params![learner.as_str()],
        )?;
        self.conn.execute(
            "delete from study_streak where learner_id = ?",
            params![learner.as_str()],
        )?;
        Ok(n)
    }

    /// The learner's study streak. Learners who never studied have an empty
    /// one.
    pub fn streak(&self, learner: &LearnerId) -> Fallible<StudyStreak> {
        let row: Option<(u32, String)> = self
            .conn
            .query_row(
                "select current_streak, last_study_date from study_streak where learner_id = ?",
                params![learner.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        match row {
            Some((current, last)) => Ok(StudyStreak {
                current,
                last_study_date: Some(Date::try_from(last)?),
            }),
            None => Ok(StudyStreak::default()),
        }
    }

    /// Counts `today` as a study day for the learner.
    pub fn record_study(&mut self, learner: &LearnerId, today: Date) -> Fallible<StudyStreak> {
        let streak = self.streak(learner)?.record(today);
        if let Some(last) = streak.last_study_date {
            self.conn.execute(
                "insert into study_streak (learner_id, current_streak, last_study_date)
                 values (?, ?, ?)
                 on conflict (learner_id) do update set
                    current_streak = excluded.current_streak,
                    last_study_date = excluded.last_study_date",
                params![learner.as_str(), streak.current, last.to_string()],
            )?;
        }
        Ok(streak)
    }

    fn query(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> lingosched_core::Fallible<Vec<ReviewRecord>> {
        let mut stmt = self.conn.prepare(sql).map_err(core_error)?;
        let raw: Vec<RawRecord> = stmt
            .query_map(params, RawRecord::from_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<_>>())
            .map_err(core_error)?;
        let mut records = Vec::with_capacity(raw.len());
        for r in raw {
            records.push(r.into_record()?);
        }
        Ok(records)
    }
}

impl ReviewStore for Database {
    fn get(
        &self,
        learner: &LearnerId,
        vocabulary: &VocabularyId,
    ) -> lingosched_core::Fallible<Option<ReviewRecord>> {
        let sql = format!(
            "select {COLUMNS} from review_schedule where learner_id = ? and vocabulary_id = ?"
        );
        let raw: Option<RawRecord> = self
            .conn
            .query_row(
                &sql,
                params![learner.as_str(), vocabulary.as_str()],
                RawRecord::from_row,
            )
            .optional()
            .map_err(core_error)?;
        raw.map(RawRecord::into_record).transpose()
    }

    fn put(&mut self, record: &ReviewRecord) -> lingosched_core::Fallible<()> {
        let sql = format!(
            "insert into review_schedule ({COLUMNS}) values (?, ?, ?, ?, ?, ?, ?)
             on conflict (learner_id, vocabulary_id) do update set
                ease_factor = excluded.ease_factor,
                interval = excluded.interval,
                repetitions = excluded.repetitions,
                next_review_date = excluded.next_review_date,
                last_reviewed_at = excluded.last_reviewed_at"
        );
        self.conn
            .execute(
                &sql,
                params![
                    record.learner_id.as_str(),
                    record.vocabulary_id.as_str(),
                    record.ease_factor.hundredths(),
                    record.interval,
                    record.repetitions,
                    record.next_review_date.to_string(),
                    record.last_reviewed_at.map(|ts| ts.to_string()),
                ],
            )
            .map_err(core_error)?;
        Ok(())
    }

    fn records_for(&self, learner: &LearnerId) -> lingosched_core::Fallible<Vec<ReviewRecord>> {
        let sql = format!(
            "select {COLUMNS} from review_schedule where learner_id = ? order by vocabulary_id"
        );
        self.query(&sql, params![learner.as_str()])
    }

    fn all_records(&self) -> lingosched_core::Fallible<Vec<ReviewRecord>> {
        let sql =
            format!("select {COLUMNS} from review_schedule order by learner_id, vocabulary_id");
        self.query(&sql, [])
    }

    fn delete(
        &mut self,
        learner: &LearnerId,
        vocabulary: &VocabularyId,
    ) -> lingosched_core::Fallible<bool> {
        let n = self
            .conn
            .execute(
                "delete from review_schedule where learner_id = ? and vocabulary_id = ?",
                params![learner.as_str(), vocabulary.as_str()],
            )
            .map_err(core_error)?;
        Ok(n > 0)
    }
}

fn core_error(e: rusqlite::Error) -> lingosched_core::ErrorReport {
    lingosched_core::ErrorReport::new(format!("database error: {e}"))
}
