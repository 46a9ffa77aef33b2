// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input normalization.
//!
//! Hosts deliver pointer input from heterogeneous sources: mouse events carry their own
//! coordinates, pen contacts behave like a mouse with a tip, and touch events carry lists of
//! contact points. [`PointerInput`] models all three, and [`position`] reduces any of them to a
//! single viewport coordinate so gesture state machines never have to care where input came from.
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::pointer::{MouseButton, PointerInput, is_primary_button, position};
//!
//! let press = PointerInput::mouse(Point::new(12.0, 30.0), MouseButton::Primary);
//! assert_eq!(position(&press), Point::new(12.0, 30.0));
//! assert!(is_primary_button(&press));
//!
//! // On touch end there are no active touches left; the changed touch is used instead.
//! let lift = PointerInput::touch_end(Point::new(40.0, 8.0));
//! assert_eq!(position(&lift), Point::new(40.0, 8.0));
//! ```

use kurbo::Point;
use smallvec::{SmallVec, smallvec};

/// Contact points of a touch event, in viewport coordinates.
pub type TouchList = SmallVec<[Point; 2]>;

/// Kind of device that produced pointer input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A mouse or trackpad cursor.
    Mouse,
    /// A finger on a touch surface.
    Touch,
    /// A stylus.
    Pen,
}

/// Mouse (or pen barrel) button, numbered the way DOM `MouseEvent.button` numbers them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Main button, usually the left button or the pen tip.
    Primary,
    /// Auxiliary button, usually the wheel button.
    Auxiliary,
    /// Secondary button, usually the right button or the pen barrel button.
    Secondary,
    /// Browser back button.
    Back,
    /// Browser forward button.
    Forward,
    /// Any other button index.
    Other(u8),
}

impl MouseButton {
    /// Map a DOM-style button index to a [`MouseButton`].
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            3 => Self::Back,
            4 => Self::Forward,
            other => Self::Other(other),
        }
    }
}

/// Raw pointer input as delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput {
    /// Mouse input with its own coordinates.
    Mouse {
        /// Cursor position.
        position: Point,
        /// Button that changed state (or the held button for moves).
        button: MouseButton,
    },
    /// Pen input with its own coordinates.
    Pen {
        /// Contact position.
        position: Point,
        /// Button that changed state; the tip reports [`MouseButton::Primary`].
        button: MouseButton,
    },
    /// Touch input with a list of contacts.
    Touch {
        /// Contacts still on the surface.
        touches: TouchList,
        /// Contacts that changed in this event (the lifted ones on touch end).
        changed_touches: TouchList,
    },
}

impl PointerInput {
    /// Mouse input at `position`.
    pub fn mouse(position: Point, button: MouseButton) -> Self {
        Self::Mouse { position, button }
    }

    /// Pen input at `position`.
    pub fn pen(position: Point, button: MouseButton) -> Self {
        Self::Pen { position, button }
    }

    /// Touch start or move with a single active contact.
    pub fn touch(position: Point) -> Self {
        Self::Touch {
            touches: smallvec![position],
            changed_touches: smallvec![position],
        }
    }

    /// Touch end or cancel: the contact at `position` has left the surface.
    pub fn touch_end(position: Point) -> Self {
        Self::Touch {
            touches: SmallVec::new(),
            changed_touches: smallvec![position],
        }
    }

    /// The device kind that produced this input.
    pub fn kind(&self) -> PointerKind {
        match self {
            Self::Mouse { .. } => PointerKind::Mouse,
            Self::Pen { .. } => PointerKind::Pen,
            Self::Touch { .. } => PointerKind::Touch,
        }
    }
}

/// Viewport coordinate of `input`.
///
/// Touch input uses the first active contact, falling back to the first changed contact
/// (touch end reports no active contacts). Touch input without any contact yields the origin.
pub fn position(input: &PointerInput) -> Point {
    match input {
        PointerInput::Mouse { position, .. } | PointerInput::Pen { position, .. } => *position,
        PointerInput::Touch {
            touches,
            changed_touches,
        } => touches
            .first()
            .or_else(|| changed_touches.first())
            .copied()
            .unwrap_or(Point::ZERO),
    }
}

/// Whether `input` is a press of the primary mouse button (or the pen tip).
///
/// Touch input is never a mouse button press.
pub fn is_primary_button(input: &PointerInput) -> bool {
    matches!(
        input,
        PointerInput::Mouse {
            button: MouseButton::Primary,
            ..
        } | PointerInput::Pen {
            button: MouseButton::Primary,
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_uses_first_active_contact() {
        let input = PointerInput::Touch {
            touches: smallvec![Point::new(1.0, 2.0), Point::new(50.0, 60.0)],
            changed_touches: smallvec![Point::new(50.0, 60.0)],
        };
        assert_eq!(position(&input), Point::new(1.0, 2.0));
    }

    #[test]
    fn touch_end_falls_back_to_changed_contact() {
        let input = PointerInput::touch_end(Point::new(7.0, 9.0));
        assert_eq!(position(&input), Point::new(7.0, 9.0));
    }

    #[test]
    fn empty_touch_yields_origin() {
        let input = PointerInput::Touch {
            touches: SmallVec::new(),
            changed_touches: SmallVec::new(),
        };
        assert_eq!(position(&input), Point::ZERO);
    }

    #[test]
    fn mouse_and_pen_use_own_coordinates() {
        let mouse = PointerInput::mouse(Point::new(3.0, 4.0), MouseButton::Secondary);
        let pen = PointerInput::pen(Point::new(5.0, 6.0), MouseButton::Primary);
        assert_eq!(position(&mouse), Point::new(3.0, 4.0));
        assert_eq!(position(&pen), Point::new(5.0, 6.0));
    }

    #[test]
    fn only_primary_mouse_or_pen_counts_as_primary() {
        assert!(is_primary_button(&PointerInput::mouse(
            Point::ZERO,
            MouseButton::Primary
        )));
        assert!(is_primary_button(&PointerInput::pen(
            Point::ZERO,
            MouseButton::Primary
        )));
        assert!(!is_primary_button(&PointerInput::mouse(
            Point::ZERO,
            MouseButton::Secondary
        )));
        assert!(!is_primary_button(&PointerInput::touch(Point::ZERO)));
    }

    #[test]
    fn button_index_mapping() {
        assert_eq!(MouseButton::from_index(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_index(2), MouseButton::Secondary);
        assert_eq!(MouseButton::from_index(9), MouseButton::Other(9));
    }

    #[test]
    fn kind_reports_source_device() {
        assert_eq!(PointerInput::touch(Point::ZERO).kind(), PointerKind::Touch);
        assert_eq!(
            PointerInput::pen(Point::ZERO, MouseButton::Primary).kind(),
            PointerKind::Pen
        );
        assert_eq!(
            PointerInput::mouse(Point::ZERO, MouseButton::Primary).kind(),
            PointerKind::Mouse
        );
    }
}
