// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Two-tier cycle over (mode, manual value).
//!
//! Manual values form a fine-grained sub-cycle nested inside the coarse mode
//! cycle. Stepping from a Manual value that still has a successor selects that
//! successor; every other position advances the mode, wrapping around. Values
//! never wrap back to the first entry on their own: exhausting them moves on to
//! the next mode.

use mrcam_session::PropertyMode;

/// Index into a list of known length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Position in the list.
    pub index: usize,
    /// Length of the list.
    pub count: usize,
}

/// Where a property currently sits in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CyclePosition {
    /// Current mode within the supported modes, if it was found there.
    pub mode: Option<Slot>,
    /// Current manual value within the supported values. Only set in Manual
    /// mode.
    pub value: Option<Slot>,
}

/// The single mutation an advance performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStep {
    /// Select the manual value at this index; the mode stays Manual.
    Value(usize),
    /// Select the mode at this index.
    Mode(usize),
}

impl CyclePosition {
    /// Next step from this position, or `None` when no value step remains and
    /// the current mode is unknown.
    pub fn step(&self) -> Option<CycleStep> {
        if let Some(value) = self.value {
            if value.index + 1 < value.count {
                return Some(CycleStep::Value(value.index + 1));
            }
        }
        let mode = self.mode?;
        (mode.index + 1).checked_rem(mode.count).map(CycleStep::Mode)
    }
}

/// Number of advances after which a property returns to where it started,
/// assuming nothing else changes the device meanwhile.
///
/// Every non-Manual mode is one position; Manual contributes one position per
/// manual value (at least one).
pub fn cycle_period(modes: &[PropertyMode], value_count: usize) -> usize {
    modes
        .iter()
        .map(|mode| match mode {
            PropertyMode::Manual => value_count.max(1),
            PropertyMode::Off | PropertyMode::Auto => 1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(mode: Option<(usize, usize)>, value: Option<(usize, usize)>) -> CyclePosition {
        let slot = |(index, count): (usize, usize)| Slot { index, count };
        CyclePosition {
            mode: mode.map(slot),
            value: value.map(slot),
        }
    }

    #[test]
    fn manual_with_remaining_values_steps_value() {
        assert_eq!(at(Some((2, 3)), Some((0, 2))).step(), Some(CycleStep::Value(1)));
    }

    #[test]
    fn last_value_steps_mode_and_wraps() {
        assert_eq!(at(Some((2, 3)), Some((1, 2))).step(), Some(CycleStep::Mode(0)));
    }

    #[test]
    fn non_manual_steps_mode() {
        assert_eq!(at(Some((0, 3)), None).step(), Some(CycleStep::Mode(1)));
        assert_eq!(at(Some((1, 3)), None).step(), Some(CycleStep::Mode(2)));
    }

    #[test]
    fn single_mode_wraps_onto_itself() {
        assert_eq!(at(Some((0, 1)), Some((1, 2))).step(), Some(CycleStep::Mode(0)));
    }

    #[test]
    fn unknown_mode_still_allows_value_step() {
        assert_eq!(at(None, Some((0, 4))).step(), Some(CycleStep::Value(1)));
        assert_eq!(at(None, Some((3, 4))).step(), None);
        assert_eq!(at(None, None).step(), None);
    }

    #[test]
    fn empty_mode_list_has_no_step() {
        assert_eq!(at(Some((0, 0)), None).step(), None);
    }

    #[test]
    fn period_counts_manual_values() {
        use PropertyMode::{Auto, Manual, Off};
        assert_eq!(cycle_period(&[Off, Auto, Manual], 2), 4);
        assert_eq!(cycle_period(&[Auto, Manual], 0), 2);
        assert_eq!(cycle_period(&[Manual], 5), 5);
        assert_eq!(cycle_period(&[], 5), 0);
    }
}
