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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

/// The lowest grade that counts as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

/// The highest grade.
pub const MAX_QUALITY: u8 = 5;

/// The grade of a single recall attempt, from 0 (total failure) to 5
/// (perfect recall).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Quality(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeError {
    /// The grade was outside `[0, 5]`.
    InvalidQuality(i64),
}

impl Display for GradeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeError::InvalidQuality(q) => {
                write!(f, "invalid quality {q}: must be an integer from 0 to {MAX_QUALITY}")
            }
        }
    }
}

impl Error for GradeError {}

impl Quality {
    pub fn new(value: i64) -> Result<Self, GradeError> {
        match u8::try_from(value) {
            Ok(q) if q <= MAX_QUALITY => Ok(Self(q)),
            _ => Err(GradeError::InvalidQuality(value)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether the learner recalled the item (grade 3 or higher).
    pub fn is_success(self) -> bool {
        self.0 >= PASSING_QUALITY
    }

    pub fn as_str(&self) -> &str {
        match self.0 {
            0 => "blackout",
            1 => "wrong",
            2 => "hard",
            3 => "effortful",
            4 => "good",
            _ => "perfect",
        }
    }
}

impl TryFrom<i64> for Quality {
    type Error = GradeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.0
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_zero_through_five() {
        for q in 0..=5 {
            assert_eq!(Quality::new(q).map(Quality::value), Ok(q as u8));
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(Quality::new(-1), Err(GradeError::InvalidQuality(-1)));
        assert_eq!(Quality::new(6), Err(GradeError::InvalidQuality(6)));
        assert_eq!(Quality::new(256), Err(GradeError::InvalidQuality(256)));
    }

    #[test]
    fn test_success_threshold() -> Result<(), GradeError> {
        assert!(!Quality::new(2)?.is_success());
        assert!(Quality::new(3)?.is_success());
        assert!(Quality::new(5)?.is_success());
        Ok(())
    }

    #[test]
    fn test_names() -> Result<(), GradeError> {
        assert_eq!(Quality::new(0)?.as_str(), "blackout");
        assert_eq!(Quality::new(3)?.as_str(), "effortful");
        assert_eq!(Quality::new(5)?.as_str(), "perfect");
        Ok(())
    }

    #[test]
    fn test_serde_rejects_invalid() {
        assert!(serde_json::from_str::<Quality>("9").is_err());
        assert!(matches!(serde_json::from_str::<Quality>("3"), Ok(q) if q.value() == 3));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            GradeError::InvalidQuality(6).to_string(),
            "invalid quality 6: must be an integer from 0 to 5"
        );
    }
}
