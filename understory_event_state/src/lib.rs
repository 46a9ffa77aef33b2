// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: small state machines over raw pointer input.
//!
//! ## Overview
//!
//! This crate turns heterogeneous pointer input into higher-level gesture state without knowing
//! anything about widgets, display trees, or a particular UI framework.
//!
//! - [`pointer`]: normalizes mouse, pen, and touch input into a single viewport coordinate
//!   and detects primary-button presses.
//! - [`observer`]: an explicit [`ObserverRegistry`](observer::ObserverRegistry) service that
//!   suppresses competing recognizers while one gesture is live.
//! - [`pan`]: a [`PanRecognizer`](pan::PanRecognizer) that classifies movement as horizontal or
//!   vertical, locks the axis once per gesture, and emits a canonical first → intermediate →
//!   final stream of [`PanEvent`](pan::PanEvent)s.
//!
//! ## Host responsibilities
//!
//! Hosts own the actual event listeners and the document. The recognizer asks for listener groups
//! and document-level effects through [`PanHost`](pan::PanHost), and reports per-event
//! prevent-default and stop-propagation requests in [`PanResponse`](pan::PanResponse). Timestamps
//! are caller-supplied milliseconds so the state machines stay deterministic under test.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `tracing`: emit `tracing` events for press, classification, abort, and release.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod observer;
pub mod pan;
pub mod pointer;
