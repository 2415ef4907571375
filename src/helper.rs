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

//! Test fixtures.

use std::fs::write;
use std::path::PathBuf;

use tempfile::TempDir;
use tempfile::tempdir;

use crate::config::Config;
use crate::error::Fallible;

pub const TEST_CATALOG: &str = r#"
language = "spanish"

[[scenario]]
id = "cafe"
title = "Ordering at a cafe"

[[scenario.vocabulary]]
id = "cafe-coffee"
word = "el café"
translation = "the coffee"
difficulty = "beginner"

[[scenario.vocabulary]]
id = "cafe-bill"
word = "la cuenta"
translation = "the bill"

[[scenario]]
id = "transit"
title = "Taking the bus"

[[scenario.vocabulary]]
id = "transit-stop"
word = "la parada"
translation = "the stop"
difficulty = "beginner"
"#;

/// A scratch directory and the path of a (not yet created) database in it.
/// The directory is deleted when the `TempDir` is dropped.
pub fn create_tmp_database() -> Fallible<(TempDir, PathBuf)> {
    let dir = tempdir()?;
    let path = dir.path().join("reviews.db");
    Ok((dir, path))
}

/// A scratch directory holding `TEST_CATALOG`, and a configuration
/// pointing at it.
pub fn create_tmp_collection() -> Fallible<(TempDir, Config)> {
    let dir = tempdir()?;
    let catalog = dir.path().join("catalog.toml");
    write(&catalog, TEST_CATALOG)?;
    let config = Config {
        database: dir.path().join("reviews.db"),
        catalog,
        new_item_limit: None,
    };
    Ok((dir, config))
}
