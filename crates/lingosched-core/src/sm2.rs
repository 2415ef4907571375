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

//! The SM-2 update rules, in integer hundredths.

use crate::types::ease::EaseFactor;
use crate::types::quality::MAX_QUALITY;
use crate::types::quality::Quality;

/// Interval after the first successful recall, in days.
pub const FIRST_INTERVAL: u32 = 1;

/// Interval after the second consecutive successful recall, in days.
pub const SECOND_INTERVAL: u32 = 6;

/// Interval after a failed recall, in days.
pub const LAPSE_INTERVAL: u32 = 1;

/// `EF' - EF = 0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)`, times 100.
pub fn ease_delta(q: Quality) -> i32 {
    let miss = i32::from(MAX_QUALITY - q.value());
    10 - miss * (8 + miss * 2)
}

pub fn new_ease(ease: EaseFactor, q: Quality) -> EaseFactor {
    ease.adjust(ease_delta(q))
}

/// The interval after a success that brings the streak to `repetitions`.
/// From the third success on, the previous interval compounds by the
/// already-updated ease factor.
pub fn success_interval(repetitions: u32, previous_interval: u32, ease: EaseFactor) -> u32 {
    match repetitions {
        0 | 1 => FIRST_INTERVAL,
        2 => SECOND_INTERVAL,
        _ => ease.scale(previous_interval),
    }
}
