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

use std::fs::read_to_string;

use lingosched_core::Catalog;
use lingosched_core::parse_catalog;

use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

/// The catalog and the review database, opened together.
pub struct Collection {
    pub catalog: Catalog,
    pub db: Database,
}

impl Collection {
    pub fn open(config: &Config) -> Fallible<Self> {
        if !config.catalog.exists() {
            return fail(format!(
                "catalog does not exist: {}",
                config.catalog.display()
            ));
        }
        let text = read_to_string(&config.catalog)?;
        let catalog = parse_catalog(&text)?;
        log::debug!(
            "Loaded {} vocabulary items ({}) from {}",
            catalog.len(),
            catalog.language(),
            config.catalog.display()
        );
        let db = Database::new(&config.database)?;
        Ok(Collection { catalog, db })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_open() -> Fallible<()> {
        let (_dir, config) = create_tmp_collection()?;
        let collection = Collection::open(&config)?;
        assert_eq!(collection.catalog.language(), "spanish");
        assert_eq!(collection.catalog.len(), 3);
        assert!(config.database.exists());
        Ok(())
    }

    #[test]
    fn test_missing_catalog() -> Fallible<()> {
        let (_dir, mut config) = create_tmp_collection()?;
        config.catalog = PathBuf::from("./derpherp.toml");
        let err = Collection::open(&config).err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("error: catalog does not exist: ./derpherp.toml")
        );
        Ok(())
    }
}
