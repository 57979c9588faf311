//! Cancellable deadline callbacks for gesture detection.
//!
//! Long-press and picker-hold detection each arm one deadline on
//! pointer-down and cancel it on pointer-up or when a competing gesture
//! (double-tap, swipe) wins. At most one deadline is live per input surface;
//! arming replaces any previous one. The host drives them by calling
//! [`GestureTimers::take_due_long_press`] /
//! [`GestureTimers::take_due_picker_hold`] from its frame poll.

use gridtap_core::{CellIndex, Digit};

/// The armed deadlines of both input surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureTimers {
    long_press: Option<(CellIndex, f64)>,
    picker_hold: Option<(Digit, f64)>,
}

impl GestureTimers {
    /// Arms the grid long-press deadline, replacing any armed one.
    pub fn arm_long_press(&mut self, cell: CellIndex, fire_at: f64) {
        self.long_press = Some((cell, fire_at));
    }

    /// Cancels the grid long-press deadline.
    pub fn cancel_long_press(&mut self) {
        self.long_press = None;
    }

    /// Consumes and returns the long-press cell if its deadline has passed.
    pub fn take_due_long_press(&mut self, now: f64) -> Option<CellIndex> {
        match self.long_press {
            Some((cell, fire_at)) if now >= fire_at => {
                self.long_press = None;
                Some(cell)
            }
            _ => None,
        }
    }

    /// Arms the picker hold deadline, replacing any armed one.
    pub fn arm_picker_hold(&mut self, digit: Digit, fire_at: f64) {
        self.picker_hold = Some((digit, fire_at));
    }

    /// Cancels the picker hold deadline.
    pub fn cancel_picker_hold(&mut self) {
        self.picker_hold = None;
    }

    /// Consumes and returns the held digit if its deadline has passed.
    pub fn take_due_picker_hold(&mut self, now: f64) -> Option<Digit> {
        match self.picker_hold {
            Some((digit, fire_at)) if now >= fire_at => {
                self.picker_hold = None;
                Some(digit)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_deadline() {
        let mut timers = GestureTimers::default();
        timers.arm_long_press(CellIndex::new(5), 1.5);

        assert_eq!(timers.take_due_long_press(1.0), None);
        assert_eq!(timers.take_due_long_press(1.5), Some(CellIndex::new(5)));
        // Consumed: does not fire twice.
        assert_eq!(timers.take_due_long_press(2.0), None);
    }

    #[test]
    fn cancel_disarms() {
        let mut timers = GestureTimers::default();
        timers.arm_long_press(CellIndex::new(5), 1.5);
        timers.cancel_long_press();
        assert_eq!(timers.take_due_long_press(10.0), None);
    }

    #[test]
    fn rearming_replaces_previous_deadline() {
        let mut timers = GestureTimers::default();
        timers.arm_picker_hold(Digit::D1, 1.0);
        timers.arm_picker_hold(Digit::D2, 2.0);
        assert_eq!(timers.take_due_picker_hold(1.2), None);
        assert_eq!(timers.take_due_picker_hold(2.0), Some(Digit::D2));
    }
}
