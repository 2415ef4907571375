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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// The ease factor of a brand-new record, in hundredths.
pub const INITIAL_EASE: u32 = 250;

/// The ease factor floor, in hundredths.
pub const MINIMUM_EASE: u32 = 130;

/// How fast review intervals grow for an item. Lower means harder.
///
/// Held as an integer number of hundredths (250 = 2.5). Every SM-2 ease
/// adjustment is a whole number of hundredths, so this representation is
/// exact and matches the persisted column.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EaseFactor(u32);

impl EaseFactor {
    pub const INITIAL: EaseFactor = EaseFactor(INITIAL_EASE);
    pub const MINIMUM: EaseFactor = EaseFactor(MINIMUM_EASE);

    /// Builds an ease factor from its persisted form. Values under the floor
    /// can only come from corrupted data and are rejected.
    pub fn from_hundredths(hundredths: u32) -> Result<Self, ErrorReport> {
        if hundredths < MINIMUM_EASE {
            return Err(ErrorReport::new(format!(
                "ease factor {hundredths} is below the minimum of {MINIMUM_EASE}"
            )));
        }
        Ok(Self(hundredths))
    }

    pub fn hundredths(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Adds a (possibly negative) adjustment in hundredths, flooring the
    /// result at the minimum. There is no ceiling.
    pub fn adjust(self, delta: i32) -> Self {
        let raw = i64::from(self.0) + i64::from(delta);
        let floored = raw.max(i64::from(MINIMUM_EASE));
        Self(u32::try_from(floored).unwrap_or(u32::MAX))
    }

    /// `round(days × ease)`, rounding halves up, saturating at `u32::MAX`.
    pub fn scale(self, days: u32) -> u32 {
        let product = u64::from(days) * u64::from(self.0);
        let rounded = (product + 50) / 100;
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }
}

impl Default for EaseFactor {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl TryFrom<u32> for EaseFactor {
    type Error = ErrorReport;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        EaseFactor::from_hundredths(value)
    }
}

impl From<EaseFactor> for u32 {
    fn from(ease: EaseFactor) -> u32 {
        ease.0
    }
}

impl Display for EaseFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_display() -> Fallible<()> {
        assert_eq!(EaseFactor::INITIAL.to_string(), "2.50");
        assert_eq!(EaseFactor::MINIMUM.to_string(), "1.30");
        assert_eq!(EaseFactor::from_hundredths(216)?.to_string(), "2.16");
        assert_eq!(EaseFactor::from_hundredths(305)?.to_string(), "3.05");
        Ok(())
    }

    #[test]
    fn test_rejects_below_floor() {
        assert!(EaseFactor::from_hundredths(129).is_err());
        assert!(EaseFactor::from_hundredths(130).is_ok());
    }

    #[test]
    fn test_adjust_floors() {
        assert_eq!(EaseFactor::INITIAL.adjust(-80).hundredths(), 170);
        assert_eq!(EaseFactor::MINIMUM.adjust(-80), EaseFactor::MINIMUM);
        assert_eq!(EaseFactor::MINIMUM.adjust(10).hundredths(), 140);
    }

    #[test]
    fn test_scale_rounds() -> Fallible<()> {
        assert_eq!(EaseFactor::INITIAL.scale(6), 15);
        assert_eq!(EaseFactor::MINIMUM.scale(1), 1);
        // 5 × 1.3 = 6.5 rounds up.
        assert_eq!(EaseFactor::MINIMUM.scale(5), 7);
        // 6 × 2.36 = 14.16.
        assert_eq!(EaseFactor::from_hundredths(236)?.scale(6), 14);
        assert_eq!(EaseFactor::INITIAL.scale(0), 0);
        Ok(())
    }

    #[test]
    fn test_scale_saturates() {
        assert_eq!(EaseFactor::INITIAL.scale(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_serialize_as_integer() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&EaseFactor::INITIAL)?, "250");
        let ease: EaseFactor = serde_json::from_str("174")?;
        assert_eq!(ease.hundredths(), 174);
        assert!(serde_json::from_str::<EaseFactor>("100").is_err());
        Ok(())
    }
}
