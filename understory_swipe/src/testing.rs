// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host doubles for unit tests.

use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::host::{ActionTransform, FrameHandle, Scheduler, SwipeSurface, TimerHandle};
use crate::session::Side;

#[derive(Debug, Default)]
pub(crate) struct TestSurface {
    pub(crate) left: Option<f64>,
    pub(crate) right: Option<f64>,
    pub(crate) left_actions: SmallVec<[f64; 4]>,
    pub(crate) right_actions: SmallVec<[f64; 4]>,
    pub(crate) offset: f64,
    pub(crate) offset_writes: Vec<f64>,
    pub(crate) action_writes: Vec<(Side, usize, ActionTransform)>,
    pub(crate) transitions: Vec<bool>,
}

impl TestSurface {
    pub(crate) fn new(left: Option<f64>, right: Option<f64>) -> Self {
        Self {
            left,
            right,
            ..Self::default()
        }
    }
}

impl SwipeSurface for TestSurface {
    fn panel_width(&self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn action_widths(&self, side: Side) -> SmallVec<[f64; 4]> {
        match side {
            Side::Left => self.left_actions.clone(),
            Side::Right => self.right_actions.clone(),
        }
    }

    fn content_offset(&self) -> f64 {
        self.offset
    }

    fn set_content_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.offset_writes.push(offset);
    }

    fn set_action_transform(&mut self, side: Side, index: usize, transform: ActionTransform) {
        self.action_writes.push((side, index, transform));
    }

    fn set_transitions(&mut self, enabled: bool) {
        self.transitions.push(enabled);
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestScheduler {
    next: u64,
    pub(crate) frames: Vec<FrameHandle>,
    pub(crate) cancelled_frames: Vec<FrameHandle>,
    pub(crate) timers: Vec<(TimerHandle, u64)>,
    pub(crate) cancelled_timers: Vec<TimerHandle>,
}

impl TestScheduler {
    pub(crate) fn live_frames(&self) -> Vec<FrameHandle> {
        self.frames
            .iter()
            .copied()
            .filter(|f| !self.cancelled_frames.contains(f))
            .collect()
    }

    pub(crate) fn live_timers(&self) -> Vec<TimerHandle> {
        self.timers
            .iter()
            .map(|(t, _)| *t)
            .filter(|t| !self.cancelled_timers.contains(t))
            .collect()
    }
}

impl Scheduler for TestScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled_frames.push(handle);
    }

    fn start_timer(&mut self, delay_ms: u64) -> TimerHandle {
        self.next += 1;
        let handle = TimerHandle(self.next);
        self.timers.push((handle, delay_ms));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.cancelled_timers.push(handle);
    }
}
