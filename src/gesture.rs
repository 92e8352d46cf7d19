//! Hand-landmark data model and single-frame gesture classification.
//!
//! Landmarks follow the MediaPipe 21-point hand model: normalized
//! coordinates in `[0,1]` with the y axis growing downward, indexed by the
//! constants in [`landmark`]. Classification here is purely geometric over
//! one frame - no temporal smoothing, no state.

use serde::Deserialize;

/// Landmark indices of the 21-point hand model.
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Number of points in a complete hand record.
pub const LANDMARK_COUNT: usize = 21;

/// Fingertip/middle-knuckle pairs of the four non-thumb fingers.
const FINGER_PAIRS: [(usize, usize); 4] = [
    (landmark::INDEX_FINGER_TIP, landmark::INDEX_FINGER_PIP),
    (landmark::MIDDLE_FINGER_TIP, landmark::MIDDLE_FINGER_PIP),
    (landmark::RING_FINGER_TIP, landmark::RING_FINGER_PIP),
    (landmark::PINKY_TIP, landmark::PINKY_PIP),
];

/// One normalized landmark point. `z` is depth relative to the wrist and is
/// optional on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// One detected hand: the detector's ordered landmark sequence for a single
/// frame. Produced fresh each frame, never retained across frames.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandFrame {
    pub landmarks: Vec<Landmark>,
}

impl HandFrame {
    /// Whether the record carries the full 21-point set the classifier needs.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= LANDMARK_COUNT
    }
}

/// One line of detector output: `{"hand": {...}}` or `{"hand": null}`.
///
/// Decoupled from the wire so the engine can be driven with synthetic
/// frames in tests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrameRecord {
    pub hand: Option<HandFrame>,
}

/// Fist heuristic: every non-thumb fingertip sits at or below its middle
/// knuckle in normalized space. Any extended finger breaks the fist.
///
/// Caller must supply a complete landmark set (see
/// [`HandFrame::is_complete`]).
pub fn is_fist(landmarks: &[Landmark]) -> bool {
    FINGER_PAIRS
        .iter()
        .all(|&(tip, pip)| landmarks[tip].y >= landmarks[pip].y)
}

/// Convert a normalized landmark to pixel coordinates.
pub fn to_pixel(lm: Landmark, width: u32, height: u32) -> (f64, f64) {
    (lm.x * f64::from(width), lm.y * f64::from(height))
}

/// Euclidean distance between two pixel-space points.
pub fn pinch_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}
