// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalesced, frame-deferred content offsets with a parallax reveal of the action elements.
//!
//! [`Animator::apply`] never writes to the surface directly. It cancels any update still waiting
//! for its frame and requests a new one, so any number of requests between two frames produce
//! exactly one write carrying the last requested offset. The write happens in
//! [`Animator::on_frame`], which clamps against the live panel widths first.

use crate::host::{ActionTransform, FrameHandle, Scheduler, SwipeSurface};
use crate::session::{PendingFrame, Side, SwipeSession};

/// Frame-coalescing offset writer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Animator {
    overshoot: f64,
}

impl Animator {
    /// Create an animator allowing the content to travel `overshoot` × panel width past a panel.
    ///
    /// Negative and non-finite margins are treated as zero.
    pub fn new(overshoot: f64) -> Self {
        let overshoot = if overshoot.is_finite() {
            overshoot.max(0.0)
        } else {
            0.0
        };
        Self { overshoot }
    }

    /// Allowed overshoot fraction.
    pub fn overshoot(&self) -> f64 {
        self.overshoot
    }

    /// Clamp `offset` to `[-right·(1+ε), left·(1+ε)]`. NaN clamps to zero.
    pub fn clamp(&self, offset: f64, left_width: f64, right_width: f64) -> f64 {
        let stretch = 1.0 + self.overshoot;
        if offset > 0.0 {
            offset.min(left_width.max(0.0) * stretch)
        } else if offset < 0.0 {
            offset.max(-right_width.max(0.0) * stretch)
        } else {
            0.0
        }
    }

    /// Schedule a visual update to `offset`, replacing any update still waiting for its frame.
    pub fn apply(&self, session: &mut SwipeSession, offset: f64, scheduler: &mut impl Scheduler) {
        if let Some(pending) = session.pending_frame.take() {
            scheduler.cancel_frame(pending.handle);
        }
        let handle = scheduler.request_frame();
        session.pending_frame = Some(PendingFrame {
            handle,
            target: offset,
        });
    }

    /// Drop any pending update without writing it.
    pub fn cancel(&self, session: &mut SwipeSession, scheduler: &mut impl Scheduler) {
        if let Some(pending) = session.pending_frame.take() {
            scheduler.cancel_frame(pending.handle);
        }
    }

    /// Run the pending update if `handle` is its frame.
    ///
    /// Returns the offset written to the content, or `None` for stale or unknown frames.
    pub fn on_frame(
        &self,
        session: &mut SwipeSession,
        handle: FrameHandle,
        surface: &mut impl SwipeSurface,
    ) -> Option<f64> {
        let pending = session.pending_frame.filter(|p| p.handle == handle)?;
        session.pending_frame = None;

        let left = live_width(surface, Side::Left);
        let right = live_width(surface, Side::Right);
        let offset = self.clamp(pending.target, left, right);
        debug_assert!(offset.is_finite(), "clamped offsets are finite");
        surface.set_content_offset(offset);
        session.applied_offset = offset;

        if let Some(side) = Side::from_offset(offset) {
            let width = if side == Side::Left { left } else { right };
            parallax(surface, side, offset.abs(), width);
        }
        Some(offset)
    }
}

fn live_width(surface: &impl SwipeSurface, side: Side) -> f64 {
    surface
        .panel_width(side)
        .filter(|w| w.is_finite())
        .map_or(0.0, |w| w.max(0.0))
}

/// Spread the actions on `side` in proportion to how far the panel is exposed.
///
/// Fully exposed actions sit at their natural positions. Partially exposed ones are drawn toward
/// the panel's outer edge so that each shows a slice proportional to its own width; later actions
/// stack above earlier ones on the left, earlier above later on the right.
fn parallax(surface: &mut impl SwipeSurface, side: Side, exposed: f64, width: f64) {
    if width <= 0.0 {
        return;
    }
    let progress = exposed / width;
    let widths = surface.action_widths(side);
    let count = widths.len();
    let total: f64 = widths.iter().sum();
    let mut before = 0.0;
    for (index, action_width) in widths.iter().enumerate() {
        let (translate_x, z_index) = match side {
            Side::Left => (-before * (1.0 - progress), index + 1),
            Side::Right => {
                let after = total - before - action_width;
                (after * (1.0 - progress), count - index)
            }
        };
        let z_index = (count > 1).then(|| i32::try_from(z_index).unwrap_or(i32::MAX));
        surface.set_action_transform(
            side,
            index,
            ActionTransform {
                translate_x,
                z_index,
            },
        );
        before += action_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TestScheduler, TestSurface};

    #[test]
    fn clamp_respects_panel_widths_and_overshoot() {
        let exact = Animator::new(0.0);
        assert_eq!(exact.clamp(120.0, 80.0, 60.0), 80.0);
        assert_eq!(exact.clamp(-120.0, 80.0, 60.0), -60.0);
        assert_eq!(exact.clamp(30.0, 80.0, 60.0), 30.0);
        assert_eq!(exact.clamp(-30.0, 0.0, 60.0), -30.0);
        assert_eq!(exact.clamp(30.0, 0.0, 60.0), 0.0);
        assert_eq!(exact.clamp(f64::NAN, 80.0, 60.0), 0.0);

        let stretchy = Animator::new(0.25);
        assert_eq!(stretchy.clamp(200.0, 80.0, 60.0), 100.0);
        assert_eq!(stretchy.clamp(-200.0, 80.0, 60.0), -75.0);
    }

    #[test]
    fn negative_overshoot_is_ignored() {
        assert_eq!(Animator::new(-1.0).overshoot(), 0.0);
        assert_eq!(Animator::new(f64::NAN).overshoot(), 0.0);
    }

    #[test]
    fn rapid_requests_coalesce_into_one_write() {
        let animator = Animator::default();
        let mut session = SwipeSession::default();
        let mut scheduler = TestScheduler::default();
        let mut surface = TestSurface::new(Some(100.0), Some(100.0));

        for offset in [10.0, 20.0, 30.0, 40.0, -15.0] {
            animator.apply(&mut session, offset, &mut scheduler);
        }
        assert_eq!(scheduler.live_frames().len(), 1);
        assert_eq!(scheduler.cancelled_frames.len(), 4);

        let handle = session.pending_frame().unwrap();
        assert_eq!(animator.on_frame(&mut session, handle, &mut surface), Some(-15.0));
        assert_eq!(surface.offset_writes, [-15.0]);
        assert!(session.pending_frame().is_none());
    }

    #[test]
    fn stale_frames_are_ignored() {
        let animator = Animator::default();
        let mut session = SwipeSession::default();
        let mut scheduler = TestScheduler::default();
        let mut surface = TestSurface::new(Some(100.0), None);

        animator.apply(&mut session, 10.0, &mut scheduler);
        let stale = session.pending_frame().unwrap();
        animator.apply(&mut session, 20.0, &mut scheduler);

        assert_eq!(animator.on_frame(&mut session, stale, &mut surface), None);
        assert!(surface.offset_writes.is_empty());

        let current = session.pending_frame().unwrap();
        assert_eq!(animator.on_frame(&mut session, current, &mut surface), Some(20.0));
        // Running the same frame twice writes once.
        assert_eq!(animator.on_frame(&mut session, current, &mut surface), None);
        assert_eq!(surface.offset_writes, [20.0]);
    }

    #[test]
    fn frame_clamps_against_live_widths() {
        let animator = Animator::default();
        let mut session = SwipeSession::default();
        let mut scheduler = TestScheduler::default();
        let mut surface = TestSurface::new(Some(80.0), None);

        animator.apply(&mut session, -50.0, &mut scheduler);
        let handle = session.pending_frame().unwrap();
        assert_eq!(animator.on_frame(&mut session, handle, &mut surface), Some(0.0));

        surface.left = Some(40.0);
        animator.apply(&mut session, 70.0, &mut scheduler);
        let handle = session.pending_frame().unwrap();
        assert_eq!(animator.on_frame(&mut session, handle, &mut surface), Some(40.0));
        assert_eq!(session.applied_offset(), 40.0);
    }

    #[test]
    fn left_parallax_spreads_actions_proportionally() {
        let animator = Animator::default();
        let mut session = SwipeSession::default();
        let mut scheduler = TestScheduler::default();
        let mut surface = TestSurface::new(Some(100.0), None);
        surface.left_actions = smallvec::smallvec![40.0, 60.0];

        animator.apply(&mut session, 50.0, &mut scheduler);
        let handle = session.pending_frame().unwrap();
        let _ = animator.on_frame(&mut session, handle, &mut surface);

        assert_eq!(
            surface.action_writes,
            [
                (
                    Side::Left,
                    0,
                    ActionTransform {
                        translate_x: 0.0,
                        z_index: Some(1)
                    }
                ),
                (
                    Side::Left,
                    1,
                    ActionTransform {
                        translate_x: -20.0,
                        z_index: Some(2)
                    }
                ),
            ]
        );
    }

    #[test]
    fn right_parallax_mirrors_and_fully_exposed_is_natural() {
        let animator = Animator::default();
        let mut session = SwipeSession::default();
        let mut scheduler = TestScheduler::default();
        let mut surface = TestSurface::new(None, Some(90.0));
        surface.right_actions = smallvec::smallvec![30.0, 60.0];

        animator.apply(&mut session, -45.0, &mut scheduler);
        let handle = session.pending_frame().unwrap();
        let _ = animator.on_frame(&mut session, handle, &mut surface);
        assert_eq!(surface.action_writes[0].2.translate_x, 30.0);
        assert_eq!(surface.action_writes[0].2.z_index, Some(2));
        assert_eq!(surface.action_writes[1].2.translate_x, 0.0);
        assert_eq!(surface.action_writes[1].2.z_index, Some(1));

        surface.action_writes.clear();
        animator.apply(&mut session, -90.0, &mut scheduler);
        let handle = session.pending_frame().unwrap();
        let _ = animator.on_frame(&mut session, handle, &mut surface);
        assert!(
            surface
                .action_writes
                .iter()
                .all(|(_, _, t)| t.translate_x == 0.0)
        );
    }

    #[test]
    fn single_action_has_no_stacking_order() {
        let animator = Animator::default();
        let mut session = SwipeSession::default();
        let mut scheduler = TestScheduler::default();
        let mut surface = TestSurface::new(Some(60.0), None);
        surface.left_actions = smallvec::smallvec![60.0];

        animator.apply(&mut session, 30.0, &mut scheduler);
        let handle = session.pending_frame().unwrap();
        let _ = animator.on_frame(&mut session, handle, &mut surface);
        assert_eq!(surface.action_writes[0].2.z_index, None);
    }
}
