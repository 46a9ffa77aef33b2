// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-control session state and configuration.

use crate::host::{FrameHandle, TimerHandle};

/// One of the two action panels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The panel exposed by dragging the content to the right.
    Left,
    /// The panel exposed by dragging the content to the left.
    Right,
}

impl Side {
    /// Sign of the content offset that reveals this side.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// The side a content offset points at, or `None` for zero (and NaN).
    pub fn from_offset(offset: f64) -> Option<Self> {
        if offset > 0.0 {
            Some(Self::Left)
        } else if offset < 0.0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Which action slots the surrounding UI provides.
///
/// A side without a slot can never be dragged into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slots {
    /// A left action slot is present.
    pub left: bool,
    /// A right action slot is present.
    pub right: bool,
}

impl Slots {
    /// Both slots present.
    pub const BOTH: Self = Self {
        left: true,
        right: true,
    };
    /// Only the left slot present.
    pub const LEFT: Self = Self {
        left: true,
        right: false,
    };
    /// Only the right slot present.
    pub const RIGHT: Self = Self {
        left: false,
        right: true,
    };
    /// No slots present.
    pub const NONE: Self = Self {
        left: false,
        right: false,
    };

    /// Whether the slot on `side` is present.
    pub fn has(self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

impl Default for Slots {
    fn default() -> Self {
        Self::BOTH
    }
}

/// Configuration for a swipe control.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwipeConfig {
    /// Minimum net displacement, in pixels, to change the resting state on release.
    pub threshold: f64,
    /// Ignore all pan input.
    pub disabled: bool,
    /// Side revealed when the control mounts.
    pub initial_revealed: Option<Side>,
    /// Fraction of a panel's width the content may be dragged past it.
    pub overshoot: f64,
    /// Close a revealed side automatically after this many milliseconds.
    pub auto_close_ms: Option<u64>,
    /// Largest initial vertical displacement for which a pan is claimed as a swipe.
    pub vertical_tolerance: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: 45.0,
            disabled: false,
            initial_revealed: None,
            overshoot: 0.0,
            auto_close_ms: None,
            vertical_tolerance: 5.0,
        }
    }
}

impl SwipeConfig {
    /// Set [`threshold`](Self::threshold).
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set [`disabled`](Self::disabled).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set [`initial_revealed`](Self::initial_revealed).
    #[must_use]
    pub fn with_initial_revealed(mut self, side: Option<Side>) -> Self {
        self.initial_revealed = side;
        self
    }

    /// Set [`overshoot`](Self::overshoot). Negative and non-finite values mean no overshoot.
    #[must_use]
    pub fn with_overshoot(mut self, overshoot: f64) -> Self {
        self.overshoot = overshoot;
        self
    }

    /// Set [`auto_close_ms`](Self::auto_close_ms).
    #[must_use]
    pub fn with_auto_close(mut self, delay_ms: Option<u64>) -> Self {
        self.auto_close_ms = delay_ms;
        self
    }
}

/// A visual update waiting for its frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct PendingFrame {
    pub(crate) handle: FrameHandle,
    pub(crate) target: f64,
}

/// Mutable state of one mounted swipe control.
///
/// Element handles stay with the surrounding UI layer; the session only caches the geometry it
/// read from them and the handles of outstanding scheduled work.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwipeSession {
    pub(crate) revealed: Option<Side>,
    pub(crate) active: bool,
    pub(crate) left_width: f64,
    pub(crate) right_width: f64,
    pub(crate) drag_origin: f64,
    pub(crate) applied_offset: f64,
    pub(crate) pending_frame: Option<PendingFrame>,
    pub(crate) pending_timer: Option<TimerHandle>,
    pub(crate) reveal_generation: u64,
}

impl SwipeSession {
    /// Persisted open state.
    pub fn revealed(&self) -> Option<Side> {
        self.revealed
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cached width of the panel on `side`.
    pub fn panel_width(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_width,
            Side::Right => self.right_width,
        }
    }

    /// Content offset at the start of the current (or last) gesture.
    pub fn drag_origin(&self) -> f64 {
        self.drag_origin
    }

    /// Offset most recently written to the content.
    pub fn applied_offset(&self) -> f64 {
        self.applied_offset
    }

    /// Offset the content is heading to: the pending frame's target, or the applied offset.
    pub fn target_offset(&self) -> f64 {
        self.pending_frame
            .map_or(self.applied_offset, |pending| pending.target)
    }

    /// Handle of the outstanding visual update, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame.map(|pending| pending.handle)
    }

    /// Handle of the outstanding auto-close timer, if any.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending_timer
    }

    /// Whether the session is at rest: no gesture and no pending visual update.
    pub fn is_at_rest(&self) -> bool {
        !self.active && self.pending_frame.is_none()
    }

    pub(crate) fn set_panel_width(&mut self, side: Side, width: f64) {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        match side {
            Side::Left => self.left_width = width,
            Side::Right => self.right_width = width,
        }
    }

    /// Resting offset for the persisted open state.
    pub(crate) fn resting_offset(&self) -> f64 {
        self.revealed
            .map_or(0.0, |side| side.sign() * self.panel_width(side))
    }
}
