//! Static key layout and fingertip hit-testing.

use strum::{Display, EnumString, IntoStaticStr};

use crate::config::LayoutParams;

/// What a confirmed click on a key does to the text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum KeyKind {
    #[strum(serialize = "character")]
    Character,
    #[strum(serialize = "backspace")]
    Backspace,
    #[strum(serialize = "clear_all")]
    ClearAll,
}

/// Stable index into [`KeyLayout`]'s target list. The layout is immutable
/// after construction, so an id stays valid for the whole session; it is the
/// only cross-module handle to a key.
pub type KeyId = usize;

/// One axis-aligned key rectangle in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTarget {
    pub label: String,
    pub kind: KeyKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl KeyTarget {
    /// Strict containment: a point exactly on the rectangle edge is a miss.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px > self.x && px < self.x + self.width && py > self.y && py < self.y + self.height
    }
}

/// Owns the full set of key targets, built once at startup. Regular grid
/// keys come first, then the special keys, and hit-testing follows that
/// order as the tie-break for overlapping rectangles.
#[derive(Debug, Clone)]
pub struct KeyLayout {
    targets: Vec<KeyTarget>,
    regular_count: usize,
}

impl KeyLayout {
    pub fn build(params: &LayoutParams) -> Self {
        let mut targets = Vec::new();

        for (row, labels) in params.rows.iter().enumerate() {
            for (col, label) in labels.iter().enumerate() {
                targets.push(KeyTarget {
                    label: label.clone(),
                    kind: KeyKind::Character,
                    x: params.cell_pitch * col as f64 + params.margin,
                    y: params.cell_pitch * row as f64 + params.margin,
                    width: params.cell_size,
                    height: params.cell_size,
                });
            }
        }
        let regular_count = targets.len();

        let (special_w, special_h) = params.special_size;
        targets.push(KeyTarget {
            label: "Backspace".to_string(),
            kind: KeyKind::Backspace,
            x: params.backspace_pos.0,
            y: params.backspace_pos.1,
            width: special_w,
            height: special_h,
        });
        targets.push(KeyTarget {
            label: "Clear All".to_string(),
            kind: KeyKind::ClearAll,
            x: params.clear_all_pos.0,
            y: params.clear_all_pos.1,
            width: special_w,
            height: special_h,
        });

        Self {
            targets,
            regular_count,
        }
    }

    /// All targets, regular keys first.
    pub fn targets(&self) -> &[KeyTarget] {
        &self.targets
    }

    /// The grid keys, in row-major order.
    pub fn regular(&self) -> &[KeyTarget] {
        &self.targets[..self.regular_count]
    }

    /// The special keys (Backspace, Clear All).
    pub fn special(&self) -> &[KeyTarget] {
        &self.targets[self.regular_count..]
    }

    pub fn get(&self, id: KeyId) -> Option<&KeyTarget> {
        self.targets.get(id)
    }

    /// First target strictly containing the point; regular keys win over
    /// specials when rectangles overlap. `None` when nothing is hovered.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<KeyId> {
        self.targets.iter().position(|t| t.contains(px, py))
    }
}
