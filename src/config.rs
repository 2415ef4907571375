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
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

/// The configuration file looked up in the working directory when
/// `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lingosched.toml";

const DEFAULT_DATABASE: &str = "lingosched.db";
const DEFAULT_CATALOG: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite database holding review records.
    pub database: PathBuf,
    /// Path to the vocabulary catalog.
    pub catalog: PathBuf,
    /// Default cap on never-reviewed items per session.
    pub new_item_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            catalog: PathBuf::from(DEFAULT_CATALOG),
            new_item_limit: None,
        }
    }
}

impl Config {
    /// Loads the configuration. An explicit path must exist; the default
    /// file is optional. Relative paths inside the file are resolved
    /// against the file's directory.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let path: PathBuf = match path {
            Some(p) => {
                if !p.exists() {
                    return fail(format!("config file does not exist: {}", p.display()));
                }
                p.to_path_buf()
            }
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Config::default());
                }
                p
            }
        };
        log::debug!("Loading configuration from {}", path.display());
        let text = read_to_string(&path)?;
        let config: Config = toml::from_str(&text)?;
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(config.relative_to(base))
    }

    fn relative_to(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Config {
            database: resolve(self.database),
            catalog: resolve(self.catalog),
            new_item_limit: self.new_item_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_explicit_file() -> Fallible<()> {
        let dir = tempdir()?;
        let result = Config::load(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_load_resolves_relative_paths() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lingosched.toml");
        write(
            &path,
            "database = \"data/reviews.db\"\ncatalog = \"/srv/catalog.toml\"\nnew_item_limit = 10\n",
        )?;
        let config = Config::load(Some(&path))?;
        assert_eq!(config.database, dir.path().join("data/reviews.db"));
        assert_eq!(config.catalog, PathBuf::from("/srv/catalog.toml"));
        assert_eq!(config.new_item_limit, Some(10));
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lingosched.toml");
        write(&path, "new_item_limit = 5\n")?;
        let config = Config::load(Some(&path))?;
        assert_eq!(config.database, dir.path().join(DEFAULT_DATABASE));
        assert_eq!(config.catalog, dir.path().join(DEFAULT_CATALOG));
        Ok(())
    }

    #[test]
    fn test_unknown_key_rejected() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lingosched.toml");
        write(&path, "databse = \"typo.db\"\n")?;
        assert!(Config::load(Some(&path)).is_err());
        Ok(())
    }
}
