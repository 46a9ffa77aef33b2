// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The swipe controller: pan input, imperative reveal operations, and notifications.

use smallvec::SmallVec;
use understory_event_state::pan::PanEvent;

use crate::animator::Animator;
use crate::gesture;
use crate::host::{FrameHandle, Scheduler, SwipeSurface, TimerHandle};
use crate::session::{Side, Slots, SwipeConfig, SwipeSession};

/// Notifications produced by one controller call, in emission order.
pub type SwipeEvents = SmallVec<[SwipeEvent; 4]>;

/// Token that closes the reveal it was issued for.
///
/// Handed out with every reveal notification. Passing it to [`SwipeReveal::close_with`] after
/// the control has been closed or revealed again does nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CloseHandle {
    generation: u64,
}

/// Lifecycle notification for the surrounding UI layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SwipeEvent {
    /// A gesture was claimed (`true`) or ended (`false`).
    Active(bool),
    /// The persisted open state changed (two-way `revealed` binding).
    RevealedChanged(Option<Side>),
    /// The control closed.
    Closed,
    /// A side was revealed.
    Revealed {
        /// The revealed side.
        side: Side,
        /// Closes this reveal.
        close: CloseHandle,
    },
    /// The left side was revealed.
    LeftRevealed {
        /// Closes this reveal.
        close: CloseHandle,
    },
    /// The right side was revealed.
    RightRevealed {
        /// Closes this reveal.
        close: CloseHandle,
    },
}

/// Swipe-to-reveal controller for one mounted control.
///
/// Feed it the [`PanEvent`]s of a recognizer bound to the control's root, forward scheduled
/// frames and timers back to it, and relay the returned [`SwipeEvents`] to observers.
#[derive(Clone, Debug)]
pub struct SwipeReveal {
    config: SwipeConfig,
    slots: Slots,
    session: SwipeSession,
    animator: Animator,
}

impl SwipeReveal {
    /// Create a controller. Nothing is measured or written until [`mount`](Self::mount).
    pub fn new(config: SwipeConfig, slots: Slots) -> Self {
        Self {
            config,
            slots,
            session: SwipeSession::default(),
            animator: Animator::new(config.overshoot),
        }
    }

    /// Apply [`SwipeConfig::initial_revealed`] once the elements exist.
    pub fn mount(
        &mut self,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        match self.config.initial_revealed {
            Some(side) => self.reveal(Some(side), true, surface, scheduler),
            None => SwipeEvents::new(),
        }
    }

    /// Cancel outstanding frames and timers before the elements go away.
    pub fn unmount(&mut self, scheduler: &mut impl Scheduler) {
        self.animator.cancel(&mut self.session, scheduler);
        self.cancel_timer(scheduler);
        self.session.active = false;
    }

    /// Current configuration.
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Slot presence flags.
    pub fn slots(&self) -> Slots {
        self.slots
    }

    /// Session state.
    pub fn session(&self) -> &SwipeSession {
        &self.session
    }

    /// Persisted open state.
    pub fn revealed(&self) -> Option<Side> {
        self.session.revealed
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.session.active
    }

    /// Ignore (or stop ignoring) pan input.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// Change the settle threshold.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.config.threshold = threshold;
    }

    /// Update slot presence after the surrounding UI re-renders.
    pub fn set_slots(&mut self, slots: Slots) {
        self.slots = slots;
    }

    /// Interpret one pan event.
    ///
    /// A disabled control claims no new gestures and stops following the pointer, but a gesture
    /// claimed before it was disabled still settles on its final event.
    pub fn on_pan(
        &mut self,
        pan: &PanEvent,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        let mut events = SwipeEvents::new();
        if self.config.disabled && !(self.session.active && pan.is_final) {
            return events;
        }

        if pan.is_first {
            if gesture::begin(
                &mut self.session,
                pan,
                self.config.vertical_tolerance,
                surface,
            ) {
                #[cfg(feature = "tracing")]
                tracing::debug!(origin = self.session.drag_origin, "swipe claimed");
                surface.set_transitions(false);
                self.cancel_timer(scheduler);
                events.push(SwipeEvent::Active(true));
            }
            return events;
        }

        if !self.session.active {
            return events;
        }

        if pan.is_final {
            surface.set_transitions(true);
            let side = gesture::release(&mut self.session, pan, self.config.threshold);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                origin = self.session.drag_origin,
                offset = pan.offset.x,
                distance = pan.distance.x,
                ?side,
                "swipe settled"
            );
            events.push(SwipeEvent::Active(false));
            events.extend(self.reveal(side, false, surface, scheduler));
            return events;
        }

        let target = gesture::drag_target(&self.session, self.slots, pan);
        self.animator.apply(&mut self.session, target, scheduler);
        events
    }

    /// End a claimed gesture that will never deliver its final event.
    ///
    /// Call this when the recognizer drops a gesture without a final event: after
    /// [`cancel_gesture`](understory_event_state::pan::PanRecognizer::cancel_gesture) (for example
    /// when the touch target was detached), or when a press reports
    /// [`cancelled`](understory_event_state::pan::PanResponse::cancelled) because it restarted the
    /// gesture. The content returns to its persisted open state.
    pub fn on_pan_cancelled(
        &mut self,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        let mut events = SwipeEvents::new();
        if !self.session.active {
            return events;
        }
        self.session.active = false;
        surface.set_transitions(true);
        let resting = self.session.resting_offset();
        self.animator.apply(&mut self.session, resting, scheduler);
        events.push(SwipeEvent::Active(false));
        events
    }

    /// Run a scheduled frame. Returns the offset written, or `None` for stale frames.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        surface: &mut impl SwipeSurface,
    ) -> Option<f64> {
        self.animator.on_frame(&mut self.session, handle, surface)
    }

    /// Fire a scheduled auto-close timer. Stale timers are ignored.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        if self.session.pending_timer != Some(handle) {
            return SwipeEvents::new();
        }
        self.session.pending_timer = None;
        self.close(surface, scheduler)
    }

    /// Move to `side` (or close with `None`).
    ///
    /// Does nothing mid-gesture when `side` is already the revealed side. A side without a slot
    /// or panel element degrades to closing. With `recalculate_width` the panel is re-measured
    /// before animating to it.
    pub fn reveal(
        &mut self,
        side: Option<Side>,
        recalculate_width: bool,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        let mut events = SwipeEvents::new();
        if self.session.active && self.session.revealed == side {
            return events;
        }

        let side = side.filter(|s| self.slots.has(*s) && surface.panel_width(*s).is_some());
        #[cfg(feature = "tracing")]
        tracing::trace!(?side, recalculate_width, "swipe reveal");
        self.session.revealed = side;
        events.push(SwipeEvent::RevealedChanged(side));
        self.cancel_timer(scheduler);

        let Some(side) = side else {
            self.animator.apply(&mut self.session, 0.0, scheduler);
            events.push(SwipeEvent::Closed);
            return events;
        };

        if recalculate_width {
            if let Some(width) = surface.panel_width(side) {
                self.session.set_panel_width(side, width);
            }
        }
        let target = side.sign() * self.session.panel_width(side);
        self.animator.apply(&mut self.session, target, scheduler);

        self.session.reveal_generation += 1;
        let close = CloseHandle {
            generation: self.session.reveal_generation,
        };
        events.push(SwipeEvent::Revealed { side, close });
        events.push(match side {
            Side::Left => SwipeEvent::LeftRevealed { close },
            Side::Right => SwipeEvent::RightRevealed { close },
        });

        if !self.session.active {
            if let Some(delay) = self.config.auto_close_ms {
                self.session.pending_timer = Some(scheduler.start_timer(delay));
            }
        }
        events
    }

    /// Follow an external change of the two-way `revealed` binding.
    pub fn set_revealed(
        &mut self,
        side: Option<Side>,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        if side == self.session.revealed {
            return SwipeEvents::new();
        }
        self.reveal(side, true, surface, scheduler)
    }

    /// Close the control. Does nothing mid-gesture or when already closed.
    pub fn close(
        &mut self,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        if self.session.active || self.session.revealed.is_none() {
            return SwipeEvents::new();
        }
        self.reveal(None, true, surface, scheduler)
    }

    /// Close the reveal `handle` was issued for, if it is still current.
    pub fn close_with(
        &mut self,
        handle: CloseHandle,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        if handle.generation != self.session.reveal_generation {
            return SwipeEvents::new();
        }
        self.close(surface, scheduler)
    }

    /// Reveal the left panel. Does nothing mid-gesture or without a left panel.
    pub fn reveal_left(
        &mut self,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        self.reveal_side(Side::Left, surface, scheduler)
    }

    /// Reveal the right panel. Does nothing mid-gesture or without a right panel.
    pub fn reveal_right(
        &mut self,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        self.reveal_side(Side::Right, surface, scheduler)
    }

    fn reveal_side(
        &mut self,
        side: Side,
        surface: &mut impl SwipeSurface,
        scheduler: &mut impl Scheduler,
    ) -> SwipeEvents {
        if self.session.active || !self.slots.has(side) || surface.panel_width(side).is_none() {
            return SwipeEvents::new();
        }
        self.reveal(Some(side), true, surface, scheduler)
    }

    fn cancel_timer(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(timer) = self.session.pending_timer.take() {
            scheduler.cancel_timer(timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestScheduler, TestSurface};
    use kurbo::{Point, Vec2};
    use understory_event_state::pan::PanDirection;
    use understory_event_state::pointer::{PointerInput, PointerKind};

    fn pan(offset_x: f64, offset_y: f64, is_first: bool, is_final: bool) -> PanEvent {
        let position = Point::new(offset_x, offset_y);
        PanEvent {
            source: PointerInput::touch(position),
            position,
            direction: if offset_x < 0.0 {
                PanDirection::Left
            } else {
                PanDirection::Right
            },
            is_first,
            is_final,
            pointer: PointerKind::Touch,
            duration: 0,
            distance: Vec2::new(offset_x.abs(), offset_y.abs()),
            offset: Vec2::new(offset_x, offset_y),
            delta: Vec2::ZERO,
        }
    }

    struct Harness {
        swipe: SwipeReveal,
        surface: TestSurface,
        scheduler: TestScheduler,
    }

    impl Harness {
        fn new(config: SwipeConfig, slots: Slots, left: Option<f64>, right: Option<f64>) -> Self {
            Self {
                swipe: SwipeReveal::new(config, slots),
                surface: TestSurface::new(left, right),
                scheduler: TestScheduler::default(),
            }
        }

        fn pan(&mut self, event: PanEvent) -> SwipeEvents {
            self.swipe
                .on_pan(&event, &mut self.surface, &mut self.scheduler)
        }

        fn flush(&mut self) -> Option<f64> {
            let handle = self.swipe.session().pending_frame()?;
            self.swipe.on_frame(handle, &mut self.surface)
        }

        fn drag(&mut self, steps: &[f64]) -> SwipeEvents {
            let mut events = self.pan(pan(0.0, 0.0, true, false));
            for step in steps {
                events.extend(self.pan(pan(*step, 0.0, false, false)));
                self.flush();
            }
            let last = steps.last().copied().unwrap_or(0.0);
            events.extend(self.pan(pan(last, 0.0, false, true)));
            self.flush();
            events
        }
    }

    #[test]
    fn missing_right_panel_clamps_and_settles_closed() {
        let mut h = Harness::new(
            SwipeConfig::default().with_threshold(10.0),
            Slots::LEFT,
            Some(80.0),
            None,
        );
        let events = h.pan(pan(0.0, 0.0, true, false));
        assert_eq!(events.as_slice(), [SwipeEvent::Active(true)]);

        let _ = h.pan(pan(-50.0, 0.0, false, false));
        assert_eq!(h.flush(), Some(0.0));

        let events = h.pan(pan(-50.0, 0.0, false, true));
        assert_eq!(
            events.as_slice(),
            [
                SwipeEvent::Active(false),
                SwipeEvent::RevealedChanged(None),
                SwipeEvent::Closed
            ]
        );
        assert_eq!(h.flush(), Some(0.0));
        assert_eq!(h.swipe.revealed(), None);
    }

    #[test]
    fn drag_past_threshold_reveals_left() {
        let mut h = Harness::new(
            SwipeConfig::default().with_threshold(10.0),
            Slots::LEFT,
            Some(80.0),
            None,
        );
        let events = h.drag(&[20.0, 40.0]);
        assert_eq!(h.swipe.revealed(), Some(Side::Left));
        assert_eq!(h.surface.offset, 80.0);
        assert!(matches!(
            events.as_slice(),
            [
                SwipeEvent::Active(true),
                SwipeEvent::Active(false),
                SwipeEvent::RevealedChanged(Some(Side::Left)),
                SwipeEvent::Revealed {
                    side: Side::Left,
                    ..
                },
                SwipeEvent::LeftRevealed { .. },
            ]
        ));
        assert!(h.swipe.session().is_at_rest());
    }

    #[test]
    fn dragging_back_from_left_closes() {
        let mut h = Harness::new(
            SwipeConfig::default().with_threshold(10.0),
            Slots::LEFT,
            Some(80.0),
            None,
        );
        let _ = h.swipe.reveal_left(&mut h.surface, &mut h.scheduler);
        h.flush();
        assert_eq!(h.surface.offset, 80.0);

        let _ = h.drag(&[-30.0, -75.0]);
        assert_eq!(h.swipe.session().drag_origin(), 80.0);
        assert_eq!(h.swipe.revealed(), None);
        assert_eq!(h.surface.offset, 0.0);
    }

    #[test]
    fn threshold_drag_stays_closed_and_one_more_pixel_reveals() {
        let config = SwipeConfig::default().with_threshold(10.0);
        let mut h = Harness::new(config, Slots::BOTH, Some(80.0), Some(80.0));
        let _ = h.drag(&[10.0]);
        assert_eq!(h.swipe.revealed(), None);

        let _ = h.drag(&[11.0]);
        assert_eq!(h.swipe.revealed(), Some(Side::Left));
    }

    #[test]
    fn vertical_start_is_not_claimed() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), Some(80.0));
        assert!(h.pan(pan(2.0, 6.0, true, false)).is_empty());
        assert!(!h.swipe.is_active());
        assert!(h.pan(pan(60.0, 6.0, false, false)).is_empty());
        assert!(h.swipe.session().pending_frame().is_none());
        assert!(h.pan(pan(60.0, 6.0, false, true)).is_empty());
        assert!(h.surface.transitions.is_empty());
    }

    #[test]
    fn disabled_ignores_pans() {
        let config = SwipeConfig::default().with_disabled(true);
        let mut h = Harness::new(config, Slots::BOTH, Some(80.0), Some(80.0));
        assert!(h.drag(&[100.0]).is_empty());
        assert_eq!(h.swipe.revealed(), None);

        h.swipe.set_disabled(false);
        let _ = h.drag(&[100.0]);
        assert_eq!(h.swipe.revealed(), Some(Side::Left));
    }

    #[test]
    fn disabling_mid_gesture_still_settles_the_claimed_gesture() {
        let config = SwipeConfig::default().with_threshold(10.0);
        let mut h = Harness::new(config, Slots::BOTH, Some(80.0), Some(80.0));
        let _ = h.pan(pan(0.0, 0.0, true, false));
        let _ = h.pan(pan(30.0, 0.0, false, false));
        assert_eq!(h.flush(), Some(30.0));

        h.swipe.set_disabled(true);
        assert!(h.pan(pan(60.0, 0.0, false, false)).is_empty());
        assert!(h.swipe.session().pending_frame().is_none());

        let events = h.pan(pan(60.0, 0.0, false, true));
        assert_eq!(events.first(), Some(&SwipeEvent::Active(false)));
        assert!(!h.swipe.is_active());
        assert_eq!(h.swipe.revealed(), Some(Side::Left));
        assert_eq!(h.flush(), Some(80.0));
        assert_eq!(h.surface.transitions, [false, true]);

        // Nothing new is claimed while disabled.
        assert!(h.pan(pan(0.0, 0.0, true, false)).is_empty());
        assert!(!h.swipe.is_active());
    }

    #[test]
    fn transitions_are_suspended_while_dragging() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), Some(80.0));
        let _ = h.drag(&[-100.0]);
        assert_eq!(h.surface.transitions, [false, true]);
    }

    #[test]
    fn close_twice_emits_once() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), Some(80.0));
        assert!(h.swipe.close(&mut h.surface, &mut h.scheduler).is_empty());

        let _ = h.swipe.reveal_right(&mut h.surface, &mut h.scheduler);
        let first = h.swipe.close(&mut h.surface, &mut h.scheduler);
        assert_eq!(
            first.as_slice(),
            [SwipeEvent::RevealedChanged(None), SwipeEvent::Closed]
        );
        assert!(h.swipe.close(&mut h.surface, &mut h.scheduler).is_empty());
    }

    #[test]
    fn reveal_then_close_returns_to_zero() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), Some(120.0));
        let _ = h.swipe.reveal_left(&mut h.surface, &mut h.scheduler);
        assert_eq!(h.flush(), Some(80.0));
        let _ = h.swipe.close(&mut h.surface, &mut h.scheduler);
        assert_eq!(h.flush(), Some(0.0));
        assert_eq!(h.swipe.session().applied_offset(), 0.0);

        let _ = h.swipe.reveal_right(&mut h.surface, &mut h.scheduler);
        assert_eq!(h.flush(), Some(-120.0));
    }

    #[test]
    fn reveal_missing_side_degrades_to_closed() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), None);
        let events = h
            .swipe
            .reveal(Some(Side::Right), true, &mut h.surface, &mut h.scheduler);
        assert_eq!(
            events.as_slice(),
            [SwipeEvent::RevealedChanged(None), SwipeEvent::Closed]
        );
        assert!(h.swipe.reveal_right(&mut h.surface, &mut h.scheduler).is_empty());
    }

    #[test]
    fn slotless_side_is_unreachable_even_with_panel() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::RIGHT, Some(80.0), Some(80.0));
        assert!(h.swipe.reveal_left(&mut h.surface, &mut h.scheduler).is_empty());
        let _ = h.drag(&[70.0]);
        assert_eq!(h.swipe.revealed(), None);
        assert_eq!(h.surface.offset, 0.0);
    }

    #[test]
    fn imperative_ops_are_ignored_mid_gesture() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), Some(80.0));
        let _ = h.pan(pan(0.0, 0.0, true, false));
        assert!(h.swipe.reveal_left(&mut h.surface, &mut h.scheduler).is_empty());
        assert!(h.swipe.reveal_right(&mut h.surface, &mut h.scheduler).is_empty());
        assert!(h.swipe.close(&mut h.surface, &mut h.scheduler).is_empty());
        // Same side as already revealed (closed) mid-gesture: no-op.
        assert!(
            h.swipe
                .reveal(None, false, &mut h.surface, &mut h.scheduler)
                .is_empty()
        );
    }

    #[test]
    fn recalculate_width_remeasures_panel() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), None);
        let _ = h.swipe.reveal_left(&mut h.surface, &mut h.scheduler);
        h.surface.left = Some(100.0);
        let _ = h
            .swipe
            .reveal(Some(Side::Left), false, &mut h.surface, &mut h.scheduler);
        assert_eq!(h.flush(), Some(80.0));
        let _ = h
            .swipe
            .reveal(Some(Side::Left), true, &mut h.surface, &mut h.scheduler);
        assert_eq!(h.flush(), Some(100.0));
    }

    #[test]
    fn close_handle_only_closes_its_own_reveal() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), Some(80.0));
        let events = h.swipe.reveal_left(&mut h.surface, &mut h.scheduler);
        let Some(SwipeEvent::LeftRevealed { close: stale }) = events.last().copied() else {
            panic!("expected a left reveal notification");
        };
        let events = h.swipe.reveal_right(&mut h.surface, &mut h.scheduler);
        let Some(SwipeEvent::RightRevealed { close: current }) = events.last().copied() else {
            panic!("expected a right reveal notification");
        };

        assert!(
            h.swipe
                .close_with(stale, &mut h.surface, &mut h.scheduler)
                .is_empty()
        );
        assert_eq!(h.swipe.revealed(), Some(Side::Right));
        assert!(
            !h.swipe
                .close_with(current, &mut h.surface, &mut h.scheduler)
                .is_empty()
        );
        assert_eq!(h.swipe.revealed(), None);
    }

    #[test]
    fn auto_close_timer_closes_and_is_cleared_by_gestures() {
        let config = SwipeConfig::default().with_auto_close(Some(2000));
        let mut h = Harness::new(config, Slots::BOTH, Some(80.0), Some(80.0));

        let _ = h.swipe.reveal_left(&mut h.surface, &mut h.scheduler);
        h.flush();
        let timer = h.swipe.session().pending_timer().unwrap();
        assert_eq!(h.scheduler.timers, [(timer, 2000)]);

        // A gesture start clears the timer; a stale fire does nothing.
        let _ = h.pan(pan(0.0, 0.0, true, false));
        assert!(h.swipe.session().pending_timer().is_none());
        assert!(h.scheduler.live_timers().is_empty());
        assert!(
            h.swipe
                .on_timer(timer, &mut h.surface, &mut h.scheduler)
                .is_empty()
        );

        // Releasing open re-arms it; firing closes.
        let _ = h.pan(pan(5.0, 0.0, false, true));
        assert_eq!(h.swipe.revealed(), Some(Side::Left));
        let timer = h.swipe.session().pending_timer().unwrap();
        let events = h.swipe.on_timer(timer, &mut h.surface, &mut h.scheduler);
        assert_eq!(
            events.as_slice(),
            [SwipeEvent::RevealedChanged(None), SwipeEvent::Closed]
        );
    }

    #[test]
    fn mount_applies_initial_revealed() {
        let config = SwipeConfig::default().with_initial_revealed(Some(Side::Right));
        let mut h = Harness::new(config, Slots::BOTH, Some(80.0), Some(64.0));
        let events = h.swipe.mount(&mut h.surface, &mut h.scheduler);
        assert_eq!(events.len(), 3);
        assert_eq!(h.flush(), Some(-64.0));
        assert_eq!(h.swipe.revealed(), Some(Side::Right));
    }

    #[test]
    fn set_revealed_only_reacts_to_changes() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), Some(64.0));
        assert!(
            h.swipe
                .set_revealed(None, &mut h.surface, &mut h.scheduler)
                .is_empty()
        );
        assert_eq!(
            h.swipe
                .set_revealed(Some(Side::Left), &mut h.surface, &mut h.scheduler)
                .len(),
            3
        );
        assert!(
            h.swipe
                .set_revealed(Some(Side::Left), &mut h.surface, &mut h.scheduler)
                .is_empty()
        );
    }

    #[test]
    fn cancelled_gesture_snaps_back_to_resting_offset() {
        let mut h = Harness::new(SwipeConfig::default(), Slots::BOTH, Some(80.0), Some(80.0));
        let _ = h.swipe.reveal_left(&mut h.surface, &mut h.scheduler);
        h.flush();

        let _ = h.pan(pan(0.0, 0.0, true, false));
        let _ = h.pan(pan(-30.0, 0.0, false, false));
        assert_eq!(h.flush(), Some(50.0));

        let events = h.swipe.on_pan_cancelled(&mut h.surface, &mut h.scheduler);
        assert_eq!(events.as_slice(), [SwipeEvent::Active(false)]);
        assert_eq!(h.flush(), Some(80.0));
        assert!(
            h.swipe
                .on_pan_cancelled(&mut h.surface, &mut h.scheduler)
                .is_empty()
        );
    }

    #[test]
    fn unmount_cancels_outstanding_work() {
        let config = SwipeConfig::default().with_auto_close(Some(500));
        let mut h = Harness::new(config, Slots::BOTH, Some(80.0), Some(80.0));
        let _ = h.swipe.reveal_left(&mut h.surface, &mut h.scheduler);
        h.swipe.unmount(&mut h.scheduler);
        assert!(h.swipe.session().pending_frame().is_none());
        assert!(h.swipe.session().pending_timer().is_none());
        assert!(h.scheduler.live_timers().is_empty());
    }

    #[test]
    fn overshoot_allows_dragging_past_panel() {
        let config = SwipeConfig::default().with_overshoot(0.25);
        let mut h = Harness::new(config, Slots::BOTH, Some(80.0), Some(80.0));
        let _ = h.pan(pan(0.0, 0.0, true, false));
        let _ = h.pan(pan(500.0, 0.0, false, false));
        assert_eq!(h.flush(), Some(100.0));
        let _ = h.pan(pan(500.0, 0.0, false, true));
        assert_eq!(h.flush(), Some(80.0));
    }
}
