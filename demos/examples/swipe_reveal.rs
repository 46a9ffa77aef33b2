// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Swipe-to-reveal driven by synthetic touch input.
//!
//! This example shows how to combine:
//! - `understory_event_state` for pointer normalization, pan recognition, and suppression of
//!   sibling rows,
//! - `understory_swipe` for drag offsets, settle decisions, and frame-coalesced writes.
//!
//! The "elements" are plain numbers and the frame loop is a queue drained after every input, so
//! the output shows exactly which writes a real host would perform.
//!
//! Run:
//! - `cargo run -p understory_demos --example swipe_reveal`

use kurbo::Point;
use smallvec::{SmallVec, smallvec};
use understory_event_state::observer::{ContextId, ObserverRegistry};
use understory_event_state::pan::{
    DocumentEffects, ListenerOptions, ListenerSet, PanHost, PanModifiers, PanRecognizer,
};
use understory_event_state::pointer::PointerInput;
use understory_swipe::{
    ActionTransform, FrameHandle, Scheduler, Side, Slots, SwipeConfig, SwipeEvent, SwipeReveal,
    SwipeSurface, TimerHandle,
};

/// Document-level side effects, logged.
struct Document;

impl PanHost for Document {
    fn attach(&mut self, context: ContextId, listeners: ListenerSet, options: ListenerOptions) {
        println!("  [doc] attach {listeners:?} for #{} ({options:?})", context.get());
    }

    fn detach(&mut self, context: ContextId, listeners: ListenerSet) {
        println!("  [doc] detach {listeners:?} for #{}", context.get());
    }

    fn apply_effects(&mut self, effects: DocumentEffects) {
        println!("  [doc] apply {effects:?}");
    }

    fn revert_effects(&mut self, effects: DocumentEffects) {
        println!("  [doc] revert {effects:?}");
    }
}

/// A list row: content over two action panels.
struct RowElements {
    name: &'static str,
    left_actions: SmallVec<[f64; 4]>,
    right_actions: SmallVec<[f64; 4]>,
    offset: f64,
}

impl SwipeSurface for RowElements {
    fn panel_width(&self, side: Side) -> Option<f64> {
        let actions = match side {
            Side::Left => &self.left_actions,
            Side::Right => &self.right_actions,
        };
        (!actions.is_empty()).then(|| actions.iter().sum())
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
        println!("  [{}] content translateX({offset:.1})", self.name);
    }

    fn set_action_transform(&mut self, side: Side, index: usize, transform: ActionTransform) {
        println!(
            "  [{}] {side:?} action {index}: translateX({:.1}) z={:?}",
            self.name, transform.translate_x, transform.z_index
        );
    }

    fn set_transitions(&mut self, enabled: bool) {
        println!("  [{}] transitions {}", self.name, if enabled { "on" } else { "off" });
    }
}

/// Frame and timer queue drained by the demo loop.
#[derive(Default)]
struct Frames {
    next: u64,
    frames: Vec<FrameHandle>,
    timers: Vec<(TimerHandle, u64)>,
}

impl Scheduler for Frames {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.retain(|h| *h != handle);
    }

    fn start_timer(&mut self, delay_ms: u64) -> TimerHandle {
        self.next += 1;
        let handle = TimerHandle(self.next);
        self.timers.push((handle, delay_ms));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
    }
}

struct Row {
    pan: PanRecognizer,
    swipe: SwipeReveal,
    elements: RowElements,
    frames: Frames,
}

impl Row {
    fn new(
        name: &'static str,
        registry: &mut ObserverRegistry,
        config: SwipeConfig,
        left_actions: SmallVec<[f64; 4]>,
        right_actions: SmallVec<[f64; 4]>,
    ) -> Self {
        let slots = Slots {
            left: !left_actions.is_empty(),
            right: !right_actions.is_empty(),
        };
        let mut row = Self {
            pan: PanRecognizer::bind(
                PanModifiers::HORIZONTAL | PanModifiers::PREVENT,
                registry,
                &mut Document,
            ),
            swipe: SwipeReveal::new(config, slots),
            elements: RowElements {
                name,
                left_actions,
                right_actions,
                offset: 0.0,
            },
            frames: Frames::default(),
        };
        let events = row.swipe.mount(&mut row.elements, &mut row.frames);
        row.report(&events);
        row.drain_frames();
        row
    }

    fn report(&self, events: &[SwipeEvent]) {
        for event in events {
            println!("  [{}] -> {event:?}", self.elements.name);
        }
    }

    fn drain_frames(&mut self) {
        for handle in core::mem::take(&mut self.frames.frames) {
            let _ = self.swipe.on_frame(handle, &mut self.elements);
        }
    }

    fn fire_timers(&mut self) {
        for (handle, delay) in core::mem::take(&mut self.frames.timers) {
            println!("  [{}] timer fired after {delay}ms", self.elements.name);
            let events = self.swipe.on_timer(handle, &mut self.elements, &mut self.frames);
            self.report(&events);
        }
        self.drain_frames();
    }

    /// Touch down at `from`, move through `path`, lift at the last point.
    fn swipe(&mut self, registry: &mut ObserverRegistry, from: Point, path: &[Point]) {
        let mut now = 0;
        let response = self
            .pan
            .on_down(&PointerInput::touch(from), now, registry, &mut Document);
        if response.cancelled {
            let events = self
                .swipe
                .on_pan_cancelled(&mut self.elements, &mut self.frames);
            self.report(&events);
        }
        for p in path {
            now += 16;
            let response = self.pan.on_move(&PointerInput::touch(*p), now, &mut Document);
            if let Some(event) = response.event {
                let events = self.swipe.on_pan(&event, &mut self.elements, &mut self.frames);
                self.report(&events);
            }
            self.drain_frames();
        }
        now += 16;
        let end = path.last().copied().unwrap_or(from);
        let response = self
            .pan
            .on_up(&PointerInput::touch_end(end), now, registry, &mut Document);
        if let Some(event) = response.event {
            let events = self.swipe.on_pan(&event, &mut self.elements, &mut self.frames);
            self.report(&events);
        }
        self.drain_frames();
    }
}

fn horizontal(y: f64, xs: &[f64]) -> Vec<Point> {
    xs.iter().map(|x| Point::new(*x, y)).collect()
}

fn main() {
    let mut registry = ObserverRegistry::new();
    let config = SwipeConfig::default().with_threshold(20.0);

    let mut inbox = Row::new(
        "inbox",
        &mut registry,
        config.with_auto_close(Some(3000)),
        smallvec![60.0, 60.0],
        smallvec![90.0],
    );
    let mut archive = Row::new(
        "archive",
        &mut registry,
        config.with_initial_revealed(Some(Side::Right)),
        SmallVec::new(),
        smallvec![40.0, 50.0],
    );

    println!("Drag inbox right past the threshold:");
    inbox.swipe(
        &mut registry,
        Point::new(100.0, 20.0),
        &horizontal(20.0, &[104.0, 130.0, 160.0, 190.0]),
    );

    println!("\nAuto-close fires:");
    inbox.fire_timers();

    println!("\nA short drag on inbox stays closed:");
    inbox.swipe(
        &mut registry,
        Point::new(100.0, 20.0),
        &horizontal(20.0, &[95.0, 88.0]),
    );

    println!("\nArchive starts open; drag it back closed:");
    archive.swipe(
        &mut registry,
        Point::new(200.0, 80.0),
        &horizontal(80.0, &[205.0, 230.0, 260.0]),
    );

    println!("\nArchive has no left panel; dragging right does nothing:");
    archive.swipe(
        &mut registry,
        Point::new(200.0, 80.0),
        &horizontal(80.0, &[210.0, 260.0]),
    );

    println!("\nVertical scroll over inbox is left to the page:");
    inbox.swipe(
        &mut registry,
        Point::new(100.0, 20.0),
        &[Point::new(101.0, 40.0), Point::new(102.0, 90.0)],
    );

    println!("\nImperative reveal and close:");
    let events = inbox.swipe.reveal_right(&mut inbox.elements, &mut inbox.frames);
    inbox.report(&events);
    inbox.drain_frames();
    if let Some(SwipeEvent::RightRevealed { close }) = events.last().copied() {
        let events = inbox
            .swipe
            .close_with(close, &mut inbox.elements, &mut inbox.frames);
        inbox.report(&events);
        inbox.drain_frames();
    }
}
