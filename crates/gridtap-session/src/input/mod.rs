//! Raw-input interpretation: gesture state, deadline timers, and drag
//! rasterization.
//!
//! The grid receives one undifferentiated pointer stream; this module holds
//! the state needed to pull taps, double-taps, and long-press drags apart.
//! The event methods themselves live on [`Session`](crate::Session), which
//! owns the surrounding board, selection, and history context.

pub mod line;
pub mod timers;

use gridtap_core::{CellIndex, Digit};

use crate::selection::DragMode;

/// Seconds a press must be held before the long-press select gesture fires.
pub const LONG_PRESS_SECS: f64 = 0.5;

/// Maximum seconds between two taps of the same cell to count as a
/// double-tap.
pub const DOUBLE_TAP_SECS: f64 = 0.3;

/// Seconds a picker button must be held before the candidate pill opens.
pub const PICKER_HOLD_SECS: f64 = 0.5;

/// Vertical pointer travel (in screen units) that turns a picker hold into
/// a swipe.
pub const SWIPE_THRESHOLD: f32 = 20.0;

/// The grid pointer gesture currently in flight.
///
/// `Pending` covers the span between pointer-down and either the long-press
/// deadline or pointer-up; a pointer-up inside [`LONG_PRESS_SECS`] while
/// still `Pending` is a tap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerGesture {
    /// No button held.
    #[default]
    Idle,
    /// Button held, long-press not yet fired.
    Pending {
        /// The cell under the initial press.
        cell: CellIndex,
        /// Press timestamp, seconds.
        pressed_at: f64,
    },
    /// A long-press fired and the pointer is sweeping cells.
    Dragging {
        /// Whether the sweep selects or deselects.
        mode: DragMode,
        /// The last cell sampled under the pointer, the origin of the next
        /// raster segment.
        last: CellIndex,
    },
}

/// Gesture-tracking state for the grid and picker input surfaces.
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    /// The in-flight grid gesture.
    pub pointer: PointerGesture,
    /// Cell and timestamp of the previous tap, for double-tap detection.
    pub last_tap: Option<(CellIndex, f64)>,
    /// Armed deadline callbacks.
    pub timers: timers::GestureTimers,
    /// The in-flight picker button gesture.
    pub picker: Option<PickerPress>,
}

/// A held number-picker button.
///
/// Dropped as soon as the press resolves into a swipe, a hold, or a tap, so
/// its mere presence means the button is still live.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerPress {
    /// The digit of the held button.
    pub digit: Digit,
    /// Pointer position at press time.
    pub start: (f32, f32),
    /// Press timestamp, seconds.
    pub pressed_at: f64,
}

impl GestureState {
    /// Drops any in-flight gesture and cancels its timers.
    pub fn cancel_all(&mut self) {
        self.pointer = PointerGesture::Idle;
        self.picker = None;
        self.timers.cancel_long_press();
        self.timers.cancel_picker_hold();
    }
}
