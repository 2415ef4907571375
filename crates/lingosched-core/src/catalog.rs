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

//! The vocabulary catalog: scenarios and the words taught in each.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::ids::VocabularyId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: VocabularyId,
    pub word: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    /// A sentence using the word, in the target language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub vocabulary: Vec<VocabularyEntry>,
}

/// The on-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    language: String,
    #[serde(default, rename = "scenario")]
    scenarios: Vec<Scenario>,
}

#[derive(Clone, Debug)]
pub struct Catalog {
    language: String,
    scenarios: Vec<Scenario>,
    /// Vocabulary id to (scenario index, entry index).
    index: HashMap<VocabularyId, (usize, usize)>,
}

/// Parses and validates a TOML catalog.
pub fn parse_catalog(text: &str) -> Fallible<Catalog> {
    let file: CatalogFile = toml::from_str(text)?;
    if file.language.trim().is_empty() {
        return fail("catalog language must not be empty");
    }
    let mut scenario_ids: HashSet<&str> = HashSet::new();
    let mut index = HashMap::new();
    for (s, scenario) in file.scenarios.iter().enumerate() {
        if scenario.id.trim().is_empty() {
            return fail(format!("scenario #{} has an empty id", s + 1));
        }
        if !scenario_ids.insert(&scenario.id) {
            return fail(format!("duplicate scenario id: {}", scenario.id));
        }
        for (v, entry) in scenario.vocabulary.iter().enumerate() {
            if entry.id.as_str().trim().is_empty() {
                return fail(format!(
                    "vocabulary entry #{} in scenario '{}' has an empty id",
                    v + 1,
                    scenario.id
                ));
            }
            if index.insert(entry.id.clone(), (s, v)).is_some() {
                return fail(format!("duplicate vocabulary id: {}", entry.id));
            }
        }
    }
    Ok(Catalog {
        language: file.language,
        scenarios: file.scenarios,
        index,
    })
}

impl Catalog {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Every entry with the id of its scenario, in document order.
    pub fn vocabulary(&self) -> impl Iterator<Item = (&str, &VocabularyEntry)> {
        self.scenarios
            .iter()
            .flat_map(|s| s.vocabulary.iter().map(move |v| (s.id.as_str(), v)))
    }

    pub fn entry(&self, id: &VocabularyId) -> Option<&VocabularyEntry> {
        self.index
            .get(id)
            .map(|&(s, v)| &self.scenarios[s].vocabulary[v])
    }

    pub fn contains(&self, id: &VocabularyId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
language = "spanish"

[[scenario]]
id = "grocery"
title = "At the grocery store"

[[scenario.vocabulary]]
id = "grocery-apple"
word = "la manzana"
translation = "the apple"
difficulty = "beginner"

[[scenario.vocabulary]]
id = "grocery-receipt"
word = "el recibo"
translation = "the receipt"
pronunciation = "el reh-SEE-boh"
example_sentence = "¿Me da el recibo, por favor?"
example_translation = "Can you give me the receipt, please?"

[[scenario]]
id = "doctor"
title = "At the doctor"

[[scenario.vocabulary]]
id = "doctor-fever"
word = "la fiebre"
translation = "the fever"
difficulty = "intermediate"
"#;

    #[test]
    fn test_parse() -> Fallible<()> {
        let catalog = parse_catalog(CATALOG)?;
        assert_eq!(catalog.language(), "spanish");
        assert_eq!(catalog.scenarios().len(), 2);
        assert_eq!(catalog.len(), 3);
        let ids: Vec<(&str, &str)> = catalog
            .vocabulary()
            .map(|(s, v)| (s, v.id.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("grocery", "grocery-apple"),
                ("grocery", "grocery-receipt"),
                ("doctor", "doctor-fever"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lookup() -> Fallible<()> {
        let catalog = parse_catalog(CATALOG)?;
        let fever = catalog.entry(&VocabularyId::from("doctor-fever"));
        assert_eq!(fever.map(|e| e.word.as_str()), Some("la fiebre"));
        assert_eq!(
            fever.and_then(|e| e.difficulty),
            Some(Difficulty::Intermediate)
        );
        assert!(catalog.contains(&VocabularyId::from("grocery-apple")));
        assert!(!catalog.contains(&VocabularyId::from("grocery-pear")));
        assert_eq!(
            catalog.scenario("doctor").map(|s| s.title.as_str()),
            Some("At the doctor")
        );
        assert!(catalog.scenario("airport").is_none());
        Ok(())
    }

    #[test]
    fn test_example_sentences() -> Fallible<()> {
        let catalog = parse_catalog(CATALOG)?;
        let receipt = catalog.entry(&VocabularyId::from("grocery-receipt"));
        assert_eq!(
            receipt.and_then(|e| e.example_sentence.as_deref()),
            Some("¿Me da el recibo, por favor?")
        );
        assert_eq!(
            receipt.and_then(|e| e.example_translation.as_deref()),
            Some("Can you give me the receipt, please?")
        );
        let apple = catalog.entry(&VocabularyId::from("grocery-apple"));
        assert_eq!(apple.and_then(|e| e.example_sentence.as_deref()), None);
        Ok(())
    }

    #[test]
    fn test_empty_catalog() -> Fallible<()> {
        let catalog = parse_catalog("language = \"french\"")?;
        assert!(catalog.is_empty());
        assert_eq!(catalog.vocabulary().count(), 0);
        Ok(())
    }

    #[test]
    fn test_duplicate_vocabulary_id() {
        let text = r#"
language = "spanish"

[[scenario]]
id = "a"
title = "A"

[[scenario.vocabulary]]
id = "dup"
word = "uno"
translation = "one"

[[scenario]]
id = "b"
title = "B"

[[scenario.vocabulary]]
id = "dup"
word = "dos"
translation = "two"
"#;
        let err = parse_catalog(text).err().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("error: duplicate vocabulary id: dup"));
    }

    #[test]
    fn test_duplicate_scenario_id() {
        let text = r#"
language = "spanish"

[[scenario]]
id = "a"
title = "A"

[[scenario]]
id = "a"
title = "Again"
"#;
        assert!(parse_catalog(text).is_err());
    }

    #[test]
    fn test_empty_vocabulary_id() {
        let text = r#"
language = "spanish"

[[scenario]]
id = "a"
title = "A"

[[scenario.vocabulary]]
id = " "
word = "uno"
translation = "one"
"#;
        assert!(parse_catalog(text).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(parse_catalog("language = ").is_err());
        assert!(parse_catalog("title = \"no language\"").is_err());
    }
}
