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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use lingosched_core::Date;
use lingosched_core::LearnerId;
use lingosched_core::SessionOptions;
use lingosched_core::Timestamp;
use lingosched_core::VocabularyId;

use crate::cmd::OutputFormat;
use crate::cmd::due::due_session;
use crate::cmd::due::render_due;
use crate::cmd::export::export_collection;
use crate::cmd::orphans::delete_orphans;
use crate::cmd::orphans::forget_learner;
use crate::cmd::orphans::list_orphans;
use crate::cmd::review::render_review;
use crate::cmd::review::review_item;
use crate::cmd::stats::learner_stats;
use crate::cmd::stats::render_stats;
use crate::collection::Collection;
use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. By default, `lingosched.toml` in the current directory is used if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Grade a recall attempt and reschedule the item.
    Review {
        /// The learner who made the attempt.
        #[arg(long)]
        learner: String,
        /// The vocabulary item that was attempted.
        vocabulary: String,
        /// Recall quality, from 0 (total failure) to 5 (perfect recall).
        #[arg(allow_negative_numbers = true)]
        quality: i64,
        /// When the attempt happened (YYYY-MM-DDTHH:MM:SS.sss). By default, now.
        #[arg(long)]
        at: Option<String>,
    },
    /// List the items due for review.
    Due {
        /// The learner to list items for.
        #[arg(long)]
        learner: String,
        /// The date to check against (YYYY-MM-DD). By default, today.
        #[arg(long)]
        as_of: Option<String>,
        /// Only list items from this scenario.
        #[arg(long)]
        scenario: Option<String>,
        /// Maximum number of items to list.
        #[arg(long)]
        limit: Option<usize>,
        /// Maximum number of never-reviewed items to list.
        #[arg(long)]
        new_limit: Option<usize>,
        /// Shuffle the list.
        #[arg(long)]
        shuffle: bool,
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print a learner's progress.
    Stats {
        /// The learner to summarize.
        #[arg(long)]
        learner: String,
        /// The date to count due items against (YYYY-MM-DD). By default, today.
        #[arg(long)]
        as_of: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Commands relating to records whose vocabulary item left the catalog.
    Orphans {
        #[command(subcommand)]
        command: OrphanCommand,
    },
    /// Delete every record of a learner.
    Forget {
        /// The learner to forget.
        #[arg(long)]
        learner: String,
    },
    /// Export review records as JSON.
    Export {
        /// Only export this learner's records.
        #[arg(long)]
        learner: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum OrphanCommand {
    /// List orphan records.
    List,
    /// Remove all orphan records from the database.
    Delete,
}

fn parse_date(value: Option<String>) -> Fallible<Date> {
    match value {
        Some(s) => Ok(Date::try_from(s)?),
        None => Ok(Date::today()),
    }
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Review {
            learner,
            vocabulary,
            quality,
            at,
        } => {
            let now = match at {
                Some(s) => Timestamp::try_from(s)?,
                None => Timestamp::now(),
            };
            let mut collection = Collection::open(&config)?;
            let record = review_item(
                &mut collection,
                &LearnerId::new(learner),
                &VocabularyId::new(vocabulary),
                quality,
                now,
            )?;
            println!("{}", render_review(&collection, &record));
            Ok(())
        }
        Command::Due {
            learner,
            as_of,
            scenario,
            limit,
            new_limit,
            shuffle,
            format,
        } => {
            let as_of = parse_date(as_of)?;
            let collection = Collection::open(&config)?;
            let shuffle_seed = shuffle.then(|| {
                let millis = Timestamp::now().into_inner().and_utc().timestamp_millis();
                millis as u64
            });
            let options = SessionOptions {
                scenario,
                item_limit: limit,
                new_item_limit: new_limit.or(config.new_item_limit),
                shuffle_seed,
            };
            let items = due_session(&collection, &LearnerId::new(learner), as_of, &options)?;
            println!("{}", render_due(&items, as_of, format)?);
            Ok(())
        }
        Command::Stats {
            learner,
            as_of,
            format,
        } => {
            let as_of = parse_date(as_of)?;
            let collection = Collection::open(&config)?;
            let learner = LearnerId::new(learner);
            let progress = learner_stats(&collection, &learner, as_of)?;
            println!("{}", render_stats(&learner, &progress, format)?);
            Ok(())
        }
        Command::Orphans { command } => {
            let mut collection = Collection::open(&config)?;
            match command {
                OrphanCommand::List => {
                    for record in list_orphans(&collection)? {
                        println!("{}\t{}", record.learner_id, record.vocabulary_id);
                    }
                }
                OrphanCommand::Delete => {
                    let n = delete_orphans(&mut collection)?;
                    println!("Deleted {n} orphan records.");
                }
            }
            Ok(())
        }
        Command::Forget { learner } => {
            let mut collection = Collection::open(&config)?;
            let learner = LearnerId::new(learner);
            let n = forget_learner(&mut collection, &learner)?;
            println!("Deleted {n} records of {learner}.");
            Ok(())
        }
        Command::Export { learner, output } => {
            let db = Database::new(&config.database)?;
            let learner = learner.map(LearnerId::from);
            export_collection(&db, learner.as_ref(), output.as_deref())
        }
    }
}
