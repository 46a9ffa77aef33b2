// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities the surrounding UI layer provides to a swipe control.
//!
//! The control never creates or owns display elements. It reads geometry and writes transforms
//! through [`SwipeSurface`], and defers visual updates and auto-close timeouts through
//! [`Scheduler`]. When a scheduled frame or timer fires, the host calls back into
//! [`SwipeReveal::on_frame`](crate::SwipeReveal::on_frame) or
//! [`SwipeReveal::on_timer`](crate::SwipeReveal::on_timer) with the handle it returned.

use smallvec::SmallVec;

use crate::session::Side;

/// Handle of a requested animation frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Handle of a started timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Transform written to one action element for the parallax reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ActionTransform {
    /// Horizontal translation relative to the element's natural position.
    pub translate_x: f64,
    /// Stacking order, set only when the panel holds more than one action.
    pub z_index: Option<i32>,
}

/// Geometry reads and transform writes on the control's elements.
pub trait SwipeSurface {
    /// Width of the action panel on `side`, or `None` when no panel element is mounted.
    fn panel_width(&self, side: Side) -> Option<f64>;

    /// Widths of the action elements inside the panel on `side`, in document order.
    fn action_widths(&self, side: Side) -> SmallVec<[f64; 4]>;

    /// Current horizontal offset of the content relative to the root element.
    fn content_offset(&self) -> f64;

    /// Write the content's horizontal transform.
    fn set_content_offset(&mut self, offset: f64);

    /// Write the transform of action element `index` in the panel on `side`.
    fn set_action_transform(&mut self, side: Side, index: usize, transform: ActionTransform);

    /// Enable or disable CSS-style transitions on the root while a finger is down.
    fn set_transitions(&mut self, enabled: bool);
}

/// One-shot, cancellable scheduling of frames and timers.
pub trait Scheduler {
    /// Request a callback on the next animation frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a frame that has not run yet. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start a one-shot timer firing after `delay_ms`.
    fn start_timer(&mut self, delay_ms: u64) -> TimerHandle;

    /// Cancel a timer that has not fired yet. Unknown handles are ignored.
    fn cancel_timer(&mut self, handle: TimerHandle);
}
