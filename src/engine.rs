//! Per-frame interaction orchestration.
//!
//! [`InteractionEngine::tick`] is the whole core pipeline for one frame:
//! classify the hand, hit-test the fingertip, step the click machine,
//! dispatch any confirmed click to the text buffer, and emit render hints.
//! It is pure over its inputs (hand record + monotonic timestamp), so tests
//! drive it directly with synthetic frames; frame I/O lives in
//! [`crate::runner`].

use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::clicker::ClickTracker;
use crate::config::{AppConfig, FrameParams};
use crate::gesture::{self, HandFrame, landmark};
use crate::layout::{KeyId, KeyKind, KeyLayout};
use crate::text::TextBuffer;

/// Identifies one key in a render hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyRef {
    pub index: KeyId,
    pub label: String,
}

/// The active press session, for drawing a proportional fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressHint {
    pub index: KeyId,
    pub label: String,
    /// Fraction of the hold duration elapsed, in `[0,1]`.
    pub progress: f64,
}

/// Everything an external renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderHints {
    /// Fist detected - interaction paused this frame.
    pub paused: bool,
    /// The key under the index fingertip, if any.
    pub hovered: Option<KeyRef>,
    pub pressing: Option<PressHint>,
    /// A click confirmed this frame.
    pub clicked: Option<KeyRef>,
    /// Current text buffer contents.
    pub text: String,
    /// Remaining cooldown fraction in `[0,1]`, 0.0 when clicks are open.
    pub cooldown_remaining: f64,
}

/// Owns all cross-frame interaction state: the static layout, the click
/// tracker, and the text buffer. One instance per session, single-threaded,
/// advanced once per frame.
pub struct InteractionEngine {
    layout: KeyLayout,
    tracker: ClickTracker,
    buffer: TextBuffer,
    frame: FrameParams,
}

impl InteractionEngine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            layout: KeyLayout::build(&config.layout),
            tracker: ClickTracker::new(config.thresholds.clone()),
            buffer: TextBuffer::new(),
            frame: config.frame,
        }
    }

    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Advance the interaction by one frame.
    ///
    /// `hand` is the detector's output for this frame (`None` when nothing
    /// was detected); `now` is a monotonic timestamp supplied by the caller.
    pub fn tick(&mut self, hand: Option<&HandFrame>, now: Duration) -> RenderHints {
        let mut paused = false;
        let mut hovered = None;
        let mut confirmed = None;

        match hand {
            Some(h) if h.is_complete() => {
                if gesture::is_fist(&h.landmarks) {
                    paused = true;
                    self.tracker.reset();
                } else {
                    let tip = gesture::to_pixel(
                        h.landmarks[landmark::INDEX_FINGER_TIP],
                        self.frame.width,
                        self.frame.height,
                    );
                    let mid = gesture::to_pixel(
                        h.landmarks[landmark::MIDDLE_FINGER_TIP],
                        self.frame.width,
                        self.frame.height,
                    );
                    let distance = gesture::pinch_distance(tip, mid);
                    hovered = self.layout.hit_test(tip.0, tip.1);
                    confirmed = self.tracker.step(hovered, distance, now);
                }
            }
            Some(h) => {
                // Truncated landmark set from the detector; same as no hand.
                debug!(
                    "incomplete landmark set ({} points), ignoring hand",
                    h.landmarks.len()
                );
                self.tracker.reset();
            }
            None => self.tracker.reset(),
        }

        let clicked = confirmed.and_then(|key| self.dispatch(key));

        RenderHints {
            paused,
            hovered: hovered.and_then(|id| self.key_ref(id)),
            pressing: self.tracker.progress(now).and_then(|(id, progress)| {
                self.layout.get(id).map(|t| PressHint {
                    index: id,
                    label: t.label.clone(),
                    progress,
                })
            }),
            clicked,
            text: self.buffer.as_str().to_string(),
            cooldown_remaining: self.tracker.cooldown_fraction(now),
        }
    }

    fn key_ref(&self, id: KeyId) -> Option<KeyRef> {
        self.layout.get(id).map(|t| KeyRef {
            index: id,
            label: t.label.clone(),
        })
    }

    /// Apply a confirmed click to the text buffer. The layout is static, so
    /// the id always resolves; an unknown id is dropped rather than applied.
    fn dispatch(&mut self, key: KeyId) -> Option<KeyRef> {
        let target = self.layout.get(key)?;
        let label = target.label.clone();
        let kind = target.kind;

        match kind {
            KeyKind::Character => self.buffer.append(&label),
            KeyKind::Backspace => self.buffer.backspace(),
            KeyKind::ClearAll => self.buffer.clear_all(),
        }
        info!("click: {kind} '{label}'");

        Some(KeyRef { index: key, label })
    }
}
