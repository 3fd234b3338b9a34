// Copyright (C) 2026 CrewRota Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rotation pattern model.
//!
//! A rotation pattern is a repeating cycle of shift-day markers. Each crew
//! is placed into the cycle at a phase offset; expanding the pattern over a
//! date range produces concrete assignments (see [`crate::rotation`]).
//!
//! ## Invariants
//!
//! - The cycle is non-empty and every phase offset is smaller than the
//!   cycle length.
//! - Given the phase map, every cycle day has at least the pattern's
//!   intended number of simultaneous crews on duty.
//! - Day indices are computed with euclidean remainders, so dates before
//!   the pattern epoch still resolve deterministically.

use crate::error::DomainError;
use crate::types::{Crew, ShiftType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day of a rotation cycle: either off duty or on duty for a given
/// shift type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleDay {
    /// The crew is off duty.
    Off,
    /// The crew works the given shift type.
    On(ShiftType),
}

impl CycleDay {
    /// Returns the shift type if this day is on duty.
    #[must_use]
    pub const fn shift_type(&self) -> Option<ShiftType> {
        match self {
            Self::Off => None,
            Self::On(shift) => Some(*shift),
        }
    }
}

/// Maps each crew to its phase offset within a pattern cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewPhaseMap {
    offsets: BTreeMap<Crew, u32>,
}

impl CrewPhaseMap {
    /// Creates a phase map from `(crew, offset)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if no crews are given.
    pub fn new<I>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (Crew, u32)>,
    {
        let offsets: BTreeMap<Crew, u32> = pairs.into_iter().collect();
        if offsets.is_empty() {
            return Err(DomainError::EmptyPhaseMap);
        }
        Ok(Self { offsets })
    }

    /// Returns the phase offset for a crew, if the crew is in the map.
    #[must_use]
    pub fn offset_for(&self, crew: Crew) -> Option<u32> {
        self.offsets.get(&crew).copied()
    }

    /// Iterates over `(crew, offset)` pairs in crew order.
    pub fn iter(&self) -> impl Iterator<Item = (Crew, u32)> + '_ {
        self.offsets.iter().map(|(crew, offset)| (*crew, *offset))
    }

    /// Returns the number of crews in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns whether the map is empty. Construction rejects empty maps,
    /// so this is false for any map built through [`CrewPhaseMap::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// A rotation pattern: a repeating cycle of shift-day markers anchored at
/// an epoch date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationPattern {
    /// The pattern identifier (e.g., "2-2", "pitman").
    pattern_id: String,
    /// The ordered cycle of shift-day markers.
    cycle: Vec<CycleDay>,
    /// The calendar date at which cycle day 0 begins for a crew with
    /// phase offset 0.
    epoch: NaiveDate,
    /// How many crews the pattern intends to have simultaneously on duty
    /// on any calendar day.
    required_on_duty: u32,
}

impl RotationPattern {
    /// Creates a new `RotationPattern`.
    ///
    /// # Arguments
    ///
    /// * `pattern_id` - The pattern identifier
    /// * `cycle` - The ordered cycle of shift-day markers
    /// * `epoch` - The date at which cycle day 0 begins
    /// * `required_on_duty` - Intended simultaneous on-duty crew count
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty, the cycle is empty, or
    /// `required_on_duty` is zero.
    pub fn new(
        pattern_id: &str,
        cycle: Vec<CycleDay>,
        epoch: NaiveDate,
        required_on_duty: u32,
    ) -> Result<Self, DomainError> {
        if pattern_id.trim().is_empty() {
            return Err(DomainError::InvalidPatternId(String::from(
                "Pattern identifier cannot be empty",
            )));
        }
        if cycle.is_empty() {
            return Err(DomainError::EmptyCycle {
                pattern_id: pattern_id.to_string(),
            });
        }
        if required_on_duty == 0 {
            return Err(DomainError::InvalidRequiredOnDuty {
                required: 0,
                crews: 0,
            });
        }
        Ok(Self {
            pattern_id: pattern_id.trim().to_string(),
            cycle,
            epoch,
            required_on_duty,
        })
    }

    /// The 2-on/2-off pattern for four crews: two days of day shift, two
    /// off, two nights, two off, over an eight-day cycle. Offsets 0/2/4/6
    /// keep one day crew and one night crew on duty every calendar day.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in cycle; the `Result` mirrors
    /// [`RotationPattern::new`].
    pub fn two_two(epoch: NaiveDate) -> Result<Self, DomainError> {
        use CycleDay::{Off, On};
        use ShiftType::{Day, Night};
        Self::new(
            "2-2",
            vec![On(Day), On(Day), Off, Off, On(Night), On(Night), Off, Off],
            epoch,
            2,
        )
    }

    /// The 4-on/4-off pattern for four crews over a sixteen-day cycle.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in cycle; the `Result` mirrors
    /// [`RotationPattern::new`].
    pub fn four_four(epoch: NaiveDate) -> Result<Self, DomainError> {
        use CycleDay::{Off, On};
        use ShiftType::{Day, Night};
        let mut cycle: Vec<CycleDay> = Vec::with_capacity(16);
        cycle.extend([On(Day); 4]);
        cycle.extend([Off; 4]);
        cycle.extend([On(Night); 4]);
        cycle.extend([Off; 4]);
        Self::new("4-4", cycle, epoch, 2)
    }

    /// The Pitman (2-3-2) pattern for four crews over a 28-day cycle:
    /// fourteen days following the 2-on/2-off/3-on/2-off/2-on/3-off shape
    /// on day shift, then the same shape on night shift. The shape is
    /// complementary at a seven-day offset, so offsets 0/7/14/21 put
    /// exactly one day crew and one night crew on duty each date.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in cycle; the `Result` mirrors
    /// [`RotationPattern::new`].
    pub fn pitman(epoch: NaiveDate) -> Result<Self, DomainError> {
        const SHAPE: [bool; 14] = [
            true, true, false, false, true, true, true, false, false, true, true, false, false,
            false,
        ];
        let mut cycle: Vec<CycleDay> = Vec::with_capacity(28);
        for shift in [ShiftType::Day, ShiftType::Night] {
            for on in SHAPE {
                cycle.push(if on {
                    CycleDay::On(shift)
                } else {
                    CycleDay::Off
                });
            }
        }
        Self::new("pitman", cycle, epoch, 2)
    }

    /// Returns the pattern identifier.
    #[must_use]
    pub fn pattern_id(&self) -> &str {
        &self.pattern_id
    }

    /// Returns the cycle length in days.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cycle_length(&self) -> u32 {
        // Cycle lengths are small domain constants; they never approach u32::MAX.
        self.cycle.len() as u32
    }

    /// Returns the pattern epoch.
    #[must_use]
    pub const fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Returns the intended simultaneous on-duty crew count.
    #[must_use]
    pub const fn required_on_duty(&self) -> u32 {
        self.required_on_duty
    }

    /// Computes the cycle day index for a date and phase offset.
    ///
    /// Uses the euclidean remainder, so dates before the epoch resolve to
    /// a valid index rather than a negative one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn day_index(&self, date: NaiveDate, phase_offset: u32) -> u32 {
        let days_since_epoch: i64 = date.signed_duration_since(self.epoch).num_days();
        let cycle_length: i64 = i64::from(self.cycle_length());
        // rem_euclid of a positive modulus is in [0, cycle_length).
        ((days_since_epoch + i64::from(phase_offset)).rem_euclid(cycle_length)) as u32
    }

    /// Returns the cycle entry for a date and phase offset.
    #[must_use]
    pub fn entry_for(&self, date: NaiveDate, phase_offset: u32) -> CycleDay {
        self.cycle[self.day_index(date, phase_offset) as usize]
    }

    /// Validates a phase map against this pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any offset is not smaller than the cycle length
    /// - The phase map holds fewer crews than `required_on_duty`
    /// - Any cycle day would have fewer than `required_on_duty` crews on
    ///   duty
    #[allow(clippy::cast_possible_truncation)]
    pub fn validate_phase_map(&self, phase_map: &CrewPhaseMap) -> Result<(), DomainError> {
        let cycle_length: u32 = self.cycle_length();
        for (crew, offset) in phase_map.iter() {
            if offset >= cycle_length {
                return Err(DomainError::InvalidPhaseOffset {
                    crew,
                    offset,
                    cycle_length,
                });
            }
        }

        let crews: u32 = phase_map.len() as u32;
        if crews < self.required_on_duty {
            return Err(DomainError::InvalidRequiredOnDuty {
                required: self.required_on_duty,
                crews,
            });
        }

        // Walk one full cycle and count on-duty crews per day.
        for day_index in 0..cycle_length {
            let on_duty: u32 = phase_map
                .iter()
                .filter(|(_, offset)| {
                    let idx: usize = ((day_index + offset) % cycle_length) as usize;
                    matches!(self.cycle[idx], CycleDay::On(_))
                })
                .count() as u32;
            if on_duty < self.required_on_duty {
                return Err(DomainError::InsufficientCrewCoverage {
                    day_index,
                    on_duty,
                    required: self.required_on_duty,
                });
            }
        }

        Ok(())
    }
}
