// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan gesture recognition with direction locking.
//!
//! [`PanRecognizer`] turns raw pointer input on one bound element into a canonical stream of
//! [`PanEvent`]s: exactly one first event, any number of intermediate events, and at most one
//! final event.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──down──▶ Pressed ──move (|dx| ≠ |dy|)──▶ Tracking ──up/cancel──▶ Idle
//!                   │                               (emits first, then intermediates,
//!                   └──move against axis──▶ Aborted  final on release)
//!                                               └──up/cancel──▶ Idle (nothing emitted)
//! ```
//!
//! - **Press** records the origin, timestamp, and pointer kind, suppresses competing
//!   recognizers in the [`ObserverRegistry`], and (for mouse input) attaches document-level
//!   move/up listeners for the duration of the gesture.
//! - **Classification** happens on the first move whose horizontal and vertical displacements
//!   differ. Equal displacement is not a decision. Once classified the axis is frozen for the
//!   rest of the gesture. A gesture that moves predominantly against a single configured axis is
//!   aborted: it emits nothing but still releases cleanly.
//! - **Tracking** applies the document-level [`DocumentEffects`] and emits a [`PanEvent`] for
//!   every move with a nonzero delta along the governing axis.
//! - **Release** emits one final event measured from the gesture origin, but only if at least
//!   one event was emitted before. Effects, listeners, and suppression are reverted exactly once.
//!
//! ## Host integration
//!
//! The recognizer never touches a display surface. Listener wiring and document-level side
//! effects go through the [`PanHost`] trait; prevent-default and stop-propagation requests come
//! back in each [`PanResponse`].
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::observer::ObserverRegistry;
//! use understory_event_state::pan::{PanModifiers, PanRecognizer};
//! use understory_event_state::pointer::PointerInput;
//!
//! let mut registry = ObserverRegistry::new();
//! let mut host = ();
//! let mut pan = PanRecognizer::bind(PanModifiers::HORIZONTAL, &mut registry, &mut host);
//!
//! let _ = pan.on_down(&PointerInput::touch(Point::new(0.0, 0.0)), 0, &mut registry, &mut host);
//! let first = pan.on_move(&PointerInput::touch(Point::new(10.0, 2.0)), 16, &mut host);
//! assert!(first.event.as_ref().is_some_and(|e| e.is_first));
//!
//! let _ = pan.on_move(&PointerInput::touch(Point::new(30.0, 4.0)), 32, &mut host);
//! let end = PointerInput::touch_end(Point::new(40.0, 4.0));
//! let last = pan.on_up(&end, 48, &mut registry, &mut host);
//! let last = last.event.unwrap();
//! assert!(last.is_final);
//! assert_eq!(last.offset.x, 40.0);
//! assert_eq!(last.duration, 48);
//! ```

use bitflags::bitflags;
use kurbo::{Point, Vec2};

use crate::observer::{ContextId, ObserverRegistry};
use crate::pointer::{PointerInput, PointerKind, is_primary_button, position};

bitflags! {
    /// Binding modifiers selecting axes, input sources, and event handling.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PanModifiers: u16 {
        /// Recognize horizontal pans.
        const HORIZONTAL = 1 << 0;
        /// Recognize vertical pans.
        const VERTICAL = 1 << 1;
        /// Also recognize pans driven by the primary mouse button.
        const MOUSE = 1 << 2;
        /// Request `preventDefault` on tracked touch/pen events.
        const PREVENT = 1 << 3;
        /// Request `stopPropagation` on tracked touch/pen events.
        const STOP = 1 << 4;
        /// Touch listeners must be non-passive because a handler might prevent default.
        const MIGHT_PREVENT = 1 << 5;
        /// Request `preventDefault` on tracked mouse events.
        const MOUSE_PREVENT = 1 << 6;
        /// Request `stopPropagation` on tracked mouse events.
        const MOUSE_STOP = 1 << 7;
        /// Mouse listeners must be non-passive because a handler might prevent default.
        const MOUSE_MIGHT_PREVENT = 1 << 8;
        /// Mouse pans are never aborted for moving against the configured axis.
        const MOUSE_ALL_DIR = 1 << 9;
    }
}

bitflags! {
    /// Document-level side effects held for the duration of a tracked pan.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DocumentEffects: u8 {
        /// Show a grabbing cursor on the document root.
        const GRABBING_CURSOR = 1 << 0;
        /// Disable pointer events on the document body.
        const NO_POINTER_EVENTS = 1 << 1;
        /// Disable text selection on the document body.
        const NON_SELECTABLE = 1 << 2;
    }
}

bitflags! {
    /// Listener groups a recognizer asks its host to wire up.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListenerSet: u8 {
        /// Touch start/move/end/cancel (and pen) on the bound element, for the binding's lifetime.
        const TOUCH = 1 << 0;
        /// Mouse down on the bound element, for the binding's lifetime.
        const MOUSE_DOWN = 1 << 1;
        /// Mouse move/up on the document, for the duration of one mouse gesture.
        const DOCUMENT = 1 << 2;
    }
}

/// Options for attaching a listener group.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
    /// Listeners promise never to call `preventDefault`.
    pub passive: bool,
    /// Listeners run in the capture phase.
    pub capture: bool,
}

/// Axes a recognizer responds to, derived from [`PanModifiers`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PanAxes {
    /// Horizontal movement is recognized.
    pub horizontal: bool,
    /// Vertical movement is recognized.
    pub vertical: bool,
    /// Both axes are recognized and no movement aborts the gesture.
    pub all: bool,
}

impl PanAxes {
    /// Derive axes from modifiers. Selecting neither axis selects both.
    pub fn from_modifiers(modifiers: PanModifiers) -> Self {
        let horizontal = modifiers.contains(PanModifiers::HORIZONTAL);
        let vertical = modifiers.contains(PanModifiers::VERTICAL);
        let none = !horizontal && !vertical;
        Self {
            horizontal: horizontal || none,
            vertical: vertical || none,
            all: none || (horizontal && vertical),
        }
    }
}

impl PanModifiers {
    /// Axes selected by these modifiers.
    pub fn axes(self) -> PanAxes {
        PanAxes::from_modifiers(self)
    }

    /// Options for the element-level touch listeners.
    pub fn touch_listener_options(self) -> ListenerOptions {
        ListenerOptions {
            passive: !self.intersects(Self::MIGHT_PREVENT | Self::PREVENT),
            capture: false,
        }
    }

    /// Options for mouse listeners, on the element and on the document.
    pub fn mouse_listener_options(self) -> ListenerOptions {
        ListenerOptions {
            passive: !self.intersects(Self::MOUSE_MIGHT_PREVENT | Self::MOUSE_PREVENT),
            capture: true,
        }
    }
}

/// Host capabilities a [`PanRecognizer`] needs: listener wiring and document-level effects.
///
/// The unit type implements this trait as a no-op host.
pub trait PanHost {
    /// Start delivering `listeners` events for `context` to the recognizer.
    fn attach(&mut self, context: ContextId, listeners: ListenerSet, options: ListenerOptions);
    /// Stop delivering `listeners` events for `context`.
    fn detach(&mut self, context: ContextId, listeners: ListenerSet);
    /// Apply document-level `effects`.
    fn apply_effects(&mut self, effects: DocumentEffects);
    /// Revert document-level `effects`.
    fn revert_effects(&mut self, effects: DocumentEffects);
}

impl PanHost for () {
    fn attach(&mut self, _: ContextId, _: ListenerSet, _: ListenerOptions) {}
    fn detach(&mut self, _: ContextId, _: ListenerSet) {}
    fn apply_effects(&mut self, _: DocumentEffects) {}
    fn revert_effects(&mut self, _: DocumentEffects) {}
}

/// Dominant direction of a pan step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PanDirection {
    /// Toward negative x.
    Left,
    /// Toward positive x.
    Right,
    /// Toward negative y.
    Up,
    /// Toward positive y.
    Down,
}

/// One normalized step of a pan gesture.
#[derive(Clone, Debug, PartialEq)]
pub struct PanEvent {
    /// Input that produced this step.
    pub source: PointerInput,
    /// Pointer position in viewport coordinates.
    pub position: Point,
    /// Direction of the cumulative offset along the governing axis.
    pub direction: PanDirection,
    /// First emission of the gesture.
    pub is_first: bool,
    /// Final emission of the gesture.
    pub is_final: bool,
    /// Kind of pointer driving the gesture.
    pub pointer: PointerKind,
    /// Milliseconds since the press.
    pub duration: u64,
    /// Absolute displacement from the gesture origin.
    pub distance: Vec2,
    /// Signed displacement from the gesture origin.
    pub offset: Vec2,
    /// Signed displacement from the previous emission.
    pub delta: Vec2,
}

impl PanEvent {
    /// Whether the gesture is driven by a mouse.
    pub fn is_mouse(&self) -> bool {
        self.pointer == PointerKind::Mouse
    }
}

/// Result of feeding one input to a [`PanRecognizer`].
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanResponse {
    /// Pan event to deliver to the handler, if any.
    pub event: Option<PanEvent>,
    /// The host should call `preventDefault` on the source event.
    pub prevent_default: bool,
    /// The host should call `stopPropagation` on the source event.
    pub stop_propagation: bool,
    /// A live gesture ended without a final event while handling this input.
    ///
    /// Set when a press restarts a gesture that was still live (for example a second finger
    /// touching down). Handlers that track the earlier gesture must treat it as abandoned.
    pub cancelled: bool,
}

impl PanResponse {
    /// Whether nothing was emitted and nothing was requested of the host.
    pub fn is_ignored(&self) -> bool {
        self.event.is_none() && !self.prevent_default && !self.stop_propagation && !self.cancelled
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Stage {
    Pressed,
    Tracking,
    Aborted,
}

/// Transient state of one pointer-down → pointer-up interaction.
#[derive(Clone, Debug)]
struct Gesture {
    origin: Point,
    start_time: u64,
    pointer: PointerKind,
    axes: PanAxes,
    modifiers: PanModifiers,
    stage: Stage,
    is_first: bool,
    last: Point,
    effects: DocumentEffects,
}

impl Gesture {
    fn changes(&self, input: &PointerInput, timestamp: u64, is_final: bool) -> PanEvent {
        let pos = position(input);
        let offset = pos - self.origin;
        let distance = Vec2::new(offset.x.abs(), offset.y.abs());
        let horizontal_dir = if offset.x < 0.0 {
            PanDirection::Left
        } else {
            PanDirection::Right
        };
        let vertical_dir = if offset.y < 0.0 {
            PanDirection::Up
        } else {
            PanDirection::Down
        };
        let direction = match (self.axes.horizontal, self.axes.vertical) {
            (true, false) => horizontal_dir,
            (false, true) => vertical_dir,
            _ if distance.x >= distance.y => horizontal_dir,
            _ => vertical_dir,
        };
        PanEvent {
            source: input.clone(),
            position: pos,
            direction,
            is_first: self.is_first,
            is_final,
            pointer: self.pointer,
            duration: timestamp.saturating_sub(self.start_time),
            distance,
            offset,
            delta: pos - self.last,
        }
    }

    fn should_trigger(&self, event: &PanEvent) -> bool {
        match (self.axes.horizontal, self.axes.vertical) {
            (true, false) => event.delta.x != 0.0,
            (false, true) => event.delta.y != 0.0,
            _ => true,
        }
    }

    fn response(&self, event: Option<PanEvent>) -> PanResponse {
        let (prevent, stop) = if self.pointer == PointerKind::Mouse {
            (PanModifiers::MOUSE_PREVENT, PanModifiers::MOUSE_STOP)
        } else {
            (PanModifiers::PREVENT, PanModifiers::STOP)
        };
        PanResponse {
            event,
            prevent_default: self.modifiers.contains(prevent),
            stop_propagation: self.modifiers.contains(stop),
            cancelled: false,
        }
    }
}

/// Pan recognizer bound to one element.
#[derive(Clone, Debug)]
pub struct PanRecognizer {
    id: ContextId,
    modifiers: PanModifiers,
    attached: ListenerSet,
    bound: bool,
    gesture: Option<Gesture>,
}

impl PanRecognizer {
    /// Register a new recognizer and attach its element-level listeners.
    pub fn bind(
        modifiers: PanModifiers,
        registry: &mut ObserverRegistry,
        host: &mut impl PanHost,
    ) -> Self {
        let mut recognizer = Self {
            id: registry.register(),
            modifiers,
            attached: ListenerSet::empty(),
            bound: true,
            gesture: None,
        };
        recognizer.attach_element_listeners(host);
        recognizer
    }

    /// Replace the binding's modifiers.
    ///
    /// Element listeners are detached and re-attached with the new options. A live gesture keeps
    /// the axes it was pressed with; the new modifiers apply from the next press.
    pub fn rebind(&mut self, modifiers: PanModifiers, host: &mut impl PanHost) {
        if !self.bound {
            return;
        }
        let element = self.attached & (ListenerSet::TOUCH | ListenerSet::MOUSE_DOWN);
        if !element.is_empty() {
            host.detach(self.id, element);
            self.attached.remove(element);
        }
        self.modifiers = modifiers;
        self.attach_element_listeners(host);
    }

    /// Tear down the binding.
    ///
    /// Ends any live gesture without a final event, reverts its effects, detaches every listener,
    /// and unregisters from `registry`. Calling this more than once is harmless.
    pub fn unbind(&mut self, registry: &mut ObserverRegistry, host: &mut impl PanHost) {
        self.cancel_gesture(registry, host);
        if !self.attached.is_empty() {
            host.detach(self.id, self.attached);
            self.attached = ListenerSet::empty();
        }
        if self.bound {
            registry.unregister(self.id);
            self.bound = false;
        }
    }

    /// Identity of this recognizer in its [`ObserverRegistry`].
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Current binding modifiers.
    pub fn modifiers(&self) -> PanModifiers {
        self.modifiers
    }

    /// Whether the recognizer is still bound.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Listener groups currently attached through the host.
    pub fn attached(&self) -> ListenerSet {
        self.attached
    }

    /// Whether a pointer is currently down on this recognizer.
    pub fn is_pressed(&self) -> bool {
        self.gesture.is_some()
    }

    /// Whether the live gesture has been classified and is emitting events.
    pub fn is_tracking(&self) -> bool {
        self.gesture
            .as_ref()
            .is_some_and(|g| g.stage == Stage::Tracking)
    }

    /// Whether the live gesture was aborted for moving against the configured axis.
    pub fn is_aborted(&self) -> bool {
        self.gesture
            .as_ref()
            .is_some_and(|g| g.stage == Stage::Aborted)
    }

    /// Document-level effects currently applied on behalf of the live gesture.
    pub fn applied_effects(&self) -> DocumentEffects {
        self.gesture
            .as_ref()
            .map_or(DocumentEffects::empty(), |g| g.effects)
    }

    /// Process a pointer down (touch start, pen down, or mouse down).
    ///
    /// Mouse input starts a gesture only with [`PanModifiers::MOUSE`] and the primary button;
    /// pen input only with the tip. Presses on a recognizer suppressed by another live gesture
    /// are ignored. A press while a gesture is already live restarts it without a final event.
    pub fn on_down(
        &mut self,
        input: &PointerInput,
        timestamp: u64,
        registry: &mut ObserverRegistry,
        host: &mut impl PanHost,
    ) -> PanResponse {
        if !self.bound {
            return PanResponse::default();
        }
        let pointer = input.kind();
        let accepted = match pointer {
            PointerKind::Mouse => {
                self.modifiers.contains(PanModifiers::MOUSE) && is_primary_button(input)
            }
            PointerKind::Pen => is_primary_button(input),
            PointerKind::Touch => true,
        };
        if !accepted || registry.is_suppressed(self.id) {
            return PanResponse::default();
        }

        let cancelled = self.cancel_gesture(registry, host);
        registry.suppress_others(self.id);
        if pointer == PointerKind::Mouse {
            host.attach(
                self.id,
                ListenerSet::DOCUMENT,
                self.modifiers.mouse_listener_options(),
            );
            self.attached.insert(ListenerSet::DOCUMENT);
        }

        let origin = position(input);
        #[cfg(feature = "tracing")]
        tracing::trace!(
            context = self.id.get(),
            ?pointer,
            x = origin.x,
            y = origin.y,
            cancelled,
            "pan pressed"
        );
        self.gesture = Some(Gesture {
            origin,
            start_time: timestamp,
            pointer,
            axes: self.modifiers.axes(),
            modifiers: self.modifiers,
            stage: Stage::Pressed,
            is_first: true,
            last: origin,
            effects: DocumentEffects::empty(),
        });
        PanResponse {
            cancelled,
            ..PanResponse::default()
        }
    }

    /// Process a pointer move.
    ///
    /// Moves without a live gesture, from a different pointer kind than the one that pressed, or
    /// after an abort are ignored.
    pub fn on_move(
        &mut self,
        input: &PointerInput,
        timestamp: u64,
        host: &mut impl PanHost,
    ) -> PanResponse {
        let Some(gesture) = self.gesture.as_mut() else {
            return PanResponse::default();
        };
        if gesture.pointer != input.kind() {
            return PanResponse::default();
        }

        match gesture.stage {
            Stage::Aborted => return PanResponse::default(),
            Stage::Tracking => {}
            Stage::Pressed => {
                let pos = position(input);
                let dist_x = (pos.x - gesture.origin.x).abs();
                let dist_y = (pos.y - gesture.origin.y).abs();
                if dist_x == dist_y {
                    return PanResponse::default();
                }

                let axes = gesture.axes;
                let mouse_all_dir = gesture.pointer == PointerKind::Mouse
                    && gesture.modifiers.contains(PanModifiers::MOUSE_ALL_DIR);
                let aborted = !axes.all
                    && !mouse_all_dir
                    && if axes.vertical {
                        dist_x > dist_y
                    } else {
                        dist_x < dist_y
                    };
                if aborted {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(context = self.id.get(), dist_x, dist_y, "pan aborted");
                    gesture.stage = Stage::Aborted;
                    return PanResponse::default();
                }

                #[cfg(feature = "tracing")]
                tracing::debug!(context = self.id.get(), dist_x, dist_y, "pan classified");
                gesture.stage = Stage::Tracking;
                gesture.effects = DocumentEffects::all();
                host.apply_effects(gesture.effects);
            }
        }

        let event = gesture.changes(input, timestamp, false);
        if gesture.should_trigger(&event) {
            gesture.last = event.position;
            gesture.is_first = false;
            gesture.response(Some(event))
        } else {
            gesture.response(None)
        }
    }

    /// Process a pointer up (touch end, pen up, or mouse up).
    ///
    /// Emits the final event, measured from the gesture origin, if the gesture was tracked and
    /// emitted at least once. Effects, listeners, and suppression are reverted either way.
    pub fn on_up(
        &mut self,
        input: &PointerInput,
        timestamp: u64,
        registry: &mut ObserverRegistry,
        host: &mut impl PanHost,
    ) -> PanResponse {
        if self
            .gesture
            .as_ref()
            .is_none_or(|g| g.pointer != input.kind())
        {
            return PanResponse::default();
        }
        let Some(gesture) = self.end_gesture(registry, host) else {
            return PanResponse::default();
        };

        if gesture.stage != Stage::Tracking || gesture.is_first {
            #[cfg(feature = "tracing")]
            tracing::trace!(context = self.id.get(), "pan released without tracking");
            return PanResponse::default();
        }

        let event = gesture.changes(input, timestamp, true);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            context = self.id.get(),
            offset_x = event.offset.x,
            offset_y = event.offset.y,
            duration = event.duration,
            "pan released"
        );
        gesture.response(Some(event))
    }

    /// Process a pointer cancel. Identical to [`on_up`](Self::on_up).
    pub fn on_cancel(
        &mut self,
        input: &PointerInput,
        timestamp: u64,
        registry: &mut ObserverRegistry,
        host: &mut impl PanHost,
    ) -> PanResponse {
        self.on_up(input, timestamp, registry, host)
    }

    /// End any live gesture without emitting a final event.
    ///
    /// Use this when the touch target is removed from the element mid-gesture (the platform
    /// stops delivering its events). Returns `true` if a gesture was live.
    pub fn cancel_gesture(
        &mut self,
        registry: &mut ObserverRegistry,
        host: &mut impl PanHost,
    ) -> bool {
        self.end_gesture(registry, host).is_some()
    }

    fn end_gesture(
        &mut self,
        registry: &mut ObserverRegistry,
        host: &mut impl PanHost,
    ) -> Option<Gesture> {
        let gesture = self.gesture.take()?;
        registry.release(self.id);
        if !gesture.effects.is_empty() {
            host.revert_effects(gesture.effects);
        }
        if self.attached.contains(ListenerSet::DOCUMENT) {
            host.detach(self.id, ListenerSet::DOCUMENT);
            self.attached.remove(ListenerSet::DOCUMENT);
        }
        Some(gesture)
    }

    fn attach_element_listeners(&mut self, host: &mut impl PanHost) {
        host.attach(
            self.id,
            ListenerSet::TOUCH,
            self.modifiers.touch_listener_options(),
        );
        self.attached.insert(ListenerSet::TOUCH);
        if self.modifiers.contains(PanModifiers::MOUSE) {
            host.attach(
                self.id,
                ListenerSet::MOUSE_DOWN,
                self.modifiers.mouse_listener_options(),
            );
            self.attached.insert(ListenerSet::MOUSE_DOWN);
        }
    }
}
