//! Fixed correspondences between the flat and layered chart conventions.

/// Layered X units per flat X unit.
pub const X_SCALE: f32 = 6.75;
/// Layered Y units per flat Y unit.
pub const Y_SCALE: f32 = 4.5;
/// Layered speed units per flat speed unit.
pub const DEFAULT_SPEED_RATIO: f32 = 6.0;
/// The only judge line texture the flat schema can express.
pub const LINE_TEXTURE: &str = "line.png";

// Indexed by layered easing id - 1.
const LAYERED_TO_FLAT_EASING: [i32; 29] = [
    0, 2, 1, 5, 4, 3, 6, 8, 7, 11, 10, 9, 12, 14, 13, 17, 16, 20, 19, 23, 22, 21, 24, 26, 25, 29,
    28, 30, 27,
];

/// Flat easing id for a layered easing id; unmapped ids become flat 0 (linear).
pub fn flat_easing(layered_id: i32) -> i32 {
    usize::try_from(layered_id)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| LAYERED_TO_FLAT_EASING.get(i).copied())
        .unwrap_or(0)
}

/// Layered easing id for a flat easing id; unmapped ids (including 18) become layered 1.
pub fn layered_easing(flat_id: i32) -> i32 {
    LAYERED_TO_FLAT_EASING
        .iter()
        .position(|&id| id == flat_id)
        .map_or(1, |i| i as i32 + 1)
}

/// Note kinds shared by both schemas, which number them differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteKind {
    /// Tap note.
    Tap,
    /// Drag note.
    Drag,
    /// Hold note.
    Hold,
    /// Flick note.
    Flick,
}

impl NoteKind {
    /// Flat numbering: 1 Tap, 2 Drag, 3 Hold, 4 Flick. Unknown ids are taps.
    pub fn from_flat(id: i32) -> Self {
        match id {
            2 => Self::Drag,
            3 => Self::Hold,
            4 => Self::Flick,
            _ => Self::Tap,
        }
    }

    /// Layered numbering: 1 Tap, 2 Hold, 3 Flick, 4 Drag. Unknown ids are taps.
    pub fn from_layered(id: i32) -> Self {
        match id {
            2 => Self::Hold,
            3 => Self::Flick,
            4 => Self::Drag,
            _ => Self::Tap,
        }
    }

    /// Flat id.
    pub fn flat_id(self) -> i32 {
        match self {
            Self::Tap => 1,
            Self::Drag => 2,
            Self::Hold => 3,
            Self::Flick => 4,
        }
    }

    /// Layered id.
    pub fn layered_id(self) -> i32 {
        match self {
            Self::Tap => 1,
            Self::Hold => 2,
            Self::Flick => 3,
            Self::Drag => 4,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/mapping.rs"]
mod tests;
