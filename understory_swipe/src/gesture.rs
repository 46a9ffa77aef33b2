// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping pan events onto content offsets and release decisions.
//!
//! A swipe claims a pan only if its first event has barely moved vertically; anything else is
//! left to the page as a scroll. While claimed, every intermediate event maps to
//! `drag_origin + offset.x`, pinned to zero toward a side without a slot. On release, [`settle`]
//! picks the resting state.

use understory_event_state::pan::PanEvent;

use crate::host::SwipeSurface;
use crate::session::{Side, Slots, SwipeSession};

/// Decide the resting state at the end of a drag.
///
/// - Starting closed, a net displacement of at most `threshold` stays closed (inclusive).
/// - Starting open, a drag of at least `threshold` but less than the open panel's width closes,
///   whichever way it went.
/// - Otherwise the sign of `drag_origin + offset_x` picks the side; exactly zero is closed.
///
/// ```
/// use understory_swipe::{Side, settle};
///
/// // Closed, 40px to the right, 80px left panel, 10px threshold: reveal left.
/// assert_eq!(settle(0.0, 40.0, 40.0, 80.0, 0.0, 10.0), Some(Side::Left));
/// // Left revealed, dragged back 75px: close.
/// assert_eq!(settle(80.0, -75.0, 75.0, 80.0, 0.0, 10.0), None);
/// ```
pub fn settle(
    drag_origin: f64,
    offset_x: f64,
    distance_x: f64,
    left_width: f64,
    right_width: f64,
    threshold: f64,
) -> Option<Side> {
    let final_offset = drag_origin + offset_x;
    match Side::from_offset(drag_origin) {
        None => {
            if final_offset.abs() <= threshold {
                return None;
            }
        }
        Some(origin_side) => {
            let origin_width = match origin_side {
                Side::Left => left_width,
                Side::Right => right_width,
            };
            if distance_x >= threshold && distance_x < origin_width {
                return None;
            }
        }
    }
    Side::from_offset(final_offset)
}

/// Claim a gesture on its first event.
///
/// Returns `false`, leaving the session untouched, when the initial vertical displacement exceeds
/// `vertical_tolerance`.
pub(crate) fn begin(
    session: &mut SwipeSession,
    pan: &PanEvent,
    vertical_tolerance: f64,
    surface: &impl SwipeSurface,
) -> bool {
    if pan.distance.y > vertical_tolerance {
        return false;
    }
    for side in [Side::Left, Side::Right] {
        session.set_panel_width(side, surface.panel_width(side).unwrap_or(0.0));
    }
    let origin = surface.content_offset();
    session.drag_origin = if origin.is_finite() { origin } else { 0.0 };
    session.active = true;
    true
}

/// Live offset for an intermediate event.
pub(crate) fn drag_target(session: &SwipeSession, slots: Slots, pan: &PanEvent) -> f64 {
    let candidate = pan.offset.x + session.drag_origin;
    match Side::from_offset(candidate) {
        Some(side) if !slots.has(side) => 0.0,
        _ => candidate,
    }
}

/// End the gesture and pick the resting side.
pub(crate) fn release(
    session: &mut SwipeSession,
    pan: &PanEvent,
    threshold: f64,
) -> Option<Side> {
    session.active = false;
    settle(
        session.drag_origin,
        pan.offset.x,
        pan.distance.x,
        session.left_width,
        session.right_width,
        threshold,
    )
}
