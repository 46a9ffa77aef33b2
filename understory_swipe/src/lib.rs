// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_swipe --heading-base-level=0

//! Understory Swipe: swipe-to-reveal state for list rows and cards.
//!
//! ## Overview
//!
//! A swipe control is a content element laid over up to two action panels. Dragging the content
//! horizontally exposes the panel on the opposite side; on release it settles closed or fully
//! revealing one side. This crate holds the state and decisions for that control and leaves the
//! elements themselves to the surrounding UI layer.
//!
//! - [`SwipeReveal`]: the controller. It consumes [`PanEvent`](understory_event_state::pan::PanEvent)s
//!   from a horizontal [`PanRecognizer`](understory_event_state::pan::PanRecognizer), exposes
//!   imperative [`reveal_left`](SwipeReveal::reveal_left),
//!   [`reveal_right`](SwipeReveal::reveal_right), and [`close`](SwipeReveal::close) operations,
//!   and returns [`SwipeEvent`] notifications.
//! - [`settle`]: the pure release decision, usable on its own.
//! - [`Animator`]: coalesces offset updates to one write per frame, clamps them to the panel
//!   widths, and spreads the panel's actions in a parallax reveal.
//! - [`SwipeSurface`] and [`Scheduler`]: the capabilities a host provides.
//!
//! ## Wiring
//!
//! ```
//! use smallvec::SmallVec;
//! use understory_swipe::{
//!     ActionTransform, FrameHandle, Scheduler, Side, Slots, SwipeConfig, SwipeReveal,
//!     SwipeSurface, TimerHandle,
//! };
//!
//! struct Row {
//!     offset: f64,
//! }
//!
//! impl SwipeSurface for Row {
//!     fn panel_width(&self, side: Side) -> Option<f64> {
//!         (side == Side::Right).then_some(96.0)
//!     }
//!     fn action_widths(&self, _side: Side) -> SmallVec<[f64; 4]> {
//!         SmallVec::new()
//!     }
//!     fn content_offset(&self) -> f64 {
//!         self.offset
//!     }
//!     fn set_content_offset(&mut self, offset: f64) {
//!         self.offset = offset;
//!     }
//!     fn set_action_transform(&mut self, _: Side, _: usize, _: ActionTransform) {}
//!     fn set_transitions(&mut self, _enabled: bool) {}
//! }
//!
//! #[derive(Default)]
//! struct Frames(u64);
//!
//! impl Scheduler for Frames {
//!     fn request_frame(&mut self) -> FrameHandle {
//!         self.0 += 1;
//!         FrameHandle(self.0)
//!     }
//!     fn cancel_frame(&mut self, _: FrameHandle) {}
//!     fn start_timer(&mut self, _delay_ms: u64) -> TimerHandle {
//!         self.0 += 1;
//!         TimerHandle(self.0)
//!     }
//!     fn cancel_timer(&mut self, _: TimerHandle) {}
//! }
//!
//! let mut row = Row { offset: 0.0 };
//! let mut frames = Frames::default();
//! let mut swipe = SwipeReveal::new(SwipeConfig::default(), Slots::RIGHT);
//!
//! let _ = swipe.reveal_right(&mut row, &mut frames);
//! let frame = swipe.session().pending_frame().unwrap();
//! assert_eq!(swipe.on_frame(frame, &mut row), Some(-96.0));
//! assert_eq!(swipe.revealed(), Some(Side::Right));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `understory_event_state/std`.
//! - `libm`: `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `tracing`: emit `tracing` events for claimed gestures, settle decisions, and reveals.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod animator;
mod gesture;
mod host;
mod reveal;
mod session;

#[cfg(test)]
mod testing;

pub use animator::Animator;
pub use gesture::settle;
pub use host::{ActionTransform, FrameHandle, Scheduler, SwipeSurface, TimerHandle};
pub use reveal::{CloseHandle, SwipeEvent, SwipeEvents, SwipeReveal};
pub use session::{Side, Slots, SwipeConfig, SwipeSession};
