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

use chrono::NaiveDateTime;
use chrono::SubsecRound;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::types::date::Date;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// The instant of a grading event: no timezone, millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(ndt: NaiveDateTime) -> Self {
        Self(ndt.trunc_subsecs(3))
    }

    /// Midnight at the start of the given date.
    pub fn start_of(date: Date) -> Self {
        Self(date.into_inner().and_time(chrono::NaiveTime::MIN))
    }

    pub fn into_inner(self) -> NaiveDateTime {
        self.0
    }

    /// The current timestamp in the user's local time.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Local::now().naive_local().trunc_subsecs(3))
    }

    /// The date component of this timestamp.
    pub fn date(self) -> Date {
        Date::new(self.0.date())
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let ndt = NaiveDateTime::parse_from_str(&value, FORMAT)
            .map_err(|_| ErrorReport::new(format!("Failed to parse timestamp: '{value}'.")))?;
        Ok(Timestamp(ndt))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_round_trip_string() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123".to_string())?;
        assert_eq!(ts.to_string(), "2023-10-05T14:30:15.123");
        Ok(())
    }

    #[test]
    fn test_serialize() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T14:30:15.123".to_string())?;
        assert_eq!(serde_json::to_string(&ts)?, "\"2023-10-05T14:30:15.123\"");
        let back: Timestamp = serde_json::from_str("\"2023-10-05T14:30:15.123\"")?;
        assert_eq!(back, ts);
        Ok(())
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Timestamp::try_from("yesterday".to_string()).is_err());
    }

    #[test]
    fn test_date_and_start_of() -> Fallible<()> {
        let ts = Timestamp::try_from("2023-10-05T23:59:59.999".to_string())?;
        let date = Date::from_ymd(2023, 10, 5)?;
        assert_eq!(ts.date(), date);
        assert_eq!(Timestamp::start_of(date).to_string(), "2023-10-05T00:00:00.000");
        Ok(())
    }

    #[test]
    fn test_new_truncates_to_millis() -> Fallible<()> {
        let ndt = Date::from_ymd(2023, 10, 5)?
            .into_inner()
            .and_hms_micro_opt(14, 30, 15, 123_456)
            .ok_or_else(|| ErrorReport::new("invalid time"))?;
        assert_eq!(Timestamp::new(ndt).to_string(), "2023-10-05T14:30:15.123");
        Ok(())
    }
}
